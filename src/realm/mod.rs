//! Realm Simulation
//!
//! Nations with square territories, exclaves and roaming ships on a
//! bounded 2D map. Each year unrest erodes unstable nations, ships that
//! stray into foreign territory start wars, and ships drift or home in
//! on their targets.

pub mod events;
pub mod names;
pub mod nation;
pub mod output;
pub mod registry;
pub mod requests;
pub mod scheduler;
pub mod systems;
pub mod world;

pub use events::{Collapse, Notification, NotificationKind, NotificationLog};
pub use nation::{Exclave, Nation, Ship};
pub use output::{FrameSink, LogFrameSink, RenderFrame};
pub use registry::{NationAttributes, Registry};
pub use requests::{CreateRequest, EditRequest};
pub use scheduler::{Control, Mode, Scheduler, TickReport};
pub use world::{SimWorld, TickContext};
