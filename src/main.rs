//! Nation Sim - Entry Point
//!
//! Loads configuration, restores or generates the world, then runs the
//! tick scheduler until the tick limit is reached or `q` is entered.

use std::path::PathBuf;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::runtime::Runtime;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use nation_sim::core::config::SimulationConfig;
use nation_sim::core::error::Result;
use nation_sim::persistence::{load_or_generate, JsonFileStore, MemoryStore};
use nation_sim::realm::scheduler::run;
use nation_sim::realm::{Control, CreateRequest, EditRequest, LogFrameSink, Scheduler};

#[derive(Parser, Debug)]
#[command(name = "nation_sim")]
#[command(about = "Simulate nations competing for territory")]
struct Args {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save file, restored at startup and rewritten every tick
    #[arg(long, default_value = "nations.json")]
    save: PathBuf,

    /// Random seed (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    ticks: Option<u64>,

    /// Milliseconds between ticks (overrides config)
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Ignore any existing save and generate a new world
    #[arg(long)]
    fresh: bool,

    /// Verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let default_directive = if args.verbose { "nation_sim=debug" } else { "nation_sim=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive)),
        )
        .init();

    let mut config = match &args.config {
        Some(path) => SimulationConfig::load(path)?,
        None => SimulationConfig::default(),
    };
    if args.seed.is_some() {
        config.scheduler.seed = args.seed;
    }
    if let Some(interval) = args.interval_ms {
        config.scheduler.tick_interval_ms = interval;
    }
    config.validate()?;

    let mut store = JsonFileStore::new(&args.save);
    let world = if args.fresh {
        load_or_generate(&config, &MemoryStore::new())
    } else {
        load_or_generate(&config, &store)
    };
    tracing::info!(
        "Starting at year {} with {} nations, saving to {}",
        world.year(),
        world.registry.len(),
        store.path().display()
    );

    println!("Commands: p (pause/resume), c [name] (create), e name key=value.. (edit), f name (find), q (quit)");

    let rt = Runtime::new()?;
    rt.block_on(async {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(read_commands(tx));

        let mut scheduler = Scheduler::new(world, config);
        let mut sink = LogFrameSink::default();
        run(&mut scheduler, &mut sink, &mut store, rx, args.ticks).await;
    });
    // The stdin reader may still be parked on a blocking read
    rt.shutdown_background();

    Ok(())
}

async fn read_commands(tx: mpsc::UnboundedSender<Control>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("Stopped reading commands: {}", e);
                return;
            }
        };
        match parse_command(&line) {
            Some(control) => {
                if tx.send(control).is_err() {
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => println!("Unknown command: {}", line.trim()),
        }
    }
}

fn parse_command(line: &str) -> Option<Control> {
    let mut words = line.split_whitespace();
    let command = words.next()?;
    let rest: Vec<&str> = words.collect();

    match command {
        "p" | "pause" => Some(Control::Toggle),
        "q" | "quit" => Some(Control::Quit),
        "c" | "create" => Some(Control::Create(CreateRequest {
            name: rest.first().map(|n| n.to_string()),
            ..CreateRequest::default()
        })),
        "f" | "find" => rest.first().map(|n| Control::Find(n.to_string())),
        "e" | "edit" => {
            let (name, assignments) = rest.split_first()?;
            let mut request = EditRequest::named(*name);
            for assignment in assignments {
                let (key, value) = assignment.split_once('=')?;
                let value: f32 = value.parse().ok()?;
                match key {
                    "strength" => request.strength = Some(value),
                    "population" => request.population = Some(value),
                    "stability" => request.stability = Some(value),
                    "army" | "army_size" => request.army_size = Some(value),
                    _ => return None,
                }
            }
            Some(Control::Edit(request))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert!(matches!(parse_command("p"), Some(Control::Toggle)));
        assert!(matches!(parse_command(" q "), Some(Control::Quit)));
        assert!(parse_command("").is_none());
        assert!(parse_command("f").is_none());
        assert!(matches!(parse_command("f Tesa"), Some(Control::Find(n)) if n == "Tesa"));
    }

    #[test]
    fn test_parse_create_with_optional_name() {
        match parse_command("c") {
            Some(Control::Create(request)) => assert!(request.name.is_none()),
            other => panic!("unexpected {:?}", other),
        }
        match parse_command("c Rize") {
            Some(Control::Create(request)) => assert_eq!(request.name.as_deref(), Some("Rize")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_edit_assignments() {
        match parse_command("e Tesa strength=40 army=12") {
            Some(Control::Edit(request)) => {
                assert_eq!(request.name, "Tesa");
                assert_eq!(request.strength, Some(40.0));
                assert_eq!(request.army_size, Some(12.0));
                assert_eq!(request.population, None);
            }
            other => panic!("unexpected {:?}", other),
        }
        assert!(parse_command("e Tesa strength=lots").is_none());
        assert!(parse_command("e Tesa color=3").is_none());
    }
}
