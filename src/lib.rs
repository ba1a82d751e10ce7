//! Nation Sim - Territorial Realm Simulation

pub mod core;
pub mod persistence;
pub mod realm;
