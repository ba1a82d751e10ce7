//! Integration tests for saving and restoring the realm

use std::fs;

use nation_sim::core::config::SimulationConfig;
use nation_sim::persistence::{load_or_generate, JsonFileStore, SaveStore};
use nation_sim::realm::{LogFrameSink, Scheduler};

fn config(seed: u64) -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.scheduler.seed = Some(seed);
    config
}

#[test]
fn test_restart_resumes_saved_world() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nations.json");
    let mut store = JsonFileStore::new(&path);
    let mut sink = LogFrameSink::default();

    let world = load_or_generate(&config(11), &store);
    let mut s = Scheduler::new(world, config(11));
    for _ in 0..5 {
        s.step(&mut sink, &mut store);
    }
    let saved = s.world().registry.all().to_vec();

    let restored = load_or_generate(&config(99), &JsonFileStore::new(&path));

    assert_eq!(restored.year(), 5);
    assert_eq!(restored.registry.all(), &saved[..]);
}

#[test]
fn test_corrupt_save_falls_back_to_generation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nations.json");
    fs::write(&path, "{ \"nations\": [").unwrap();

    let world = load_or_generate(&config(12), &JsonFileStore::new(&path));

    assert_eq!(world.year(), 0);
    assert_eq!(world.registry.len(), 10);
}

#[test]
fn test_save_document_shape() {
    let dir = tempfile::tempdir().unwrap();
    let mut store = JsonFileStore::new(dir.path().join("nations.json"));
    let mut sink = LogFrameSink::default();

    let mut s = Scheduler::new(load_or_generate(&config(13), &store), config(13));
    s.step(&mut sink, &mut store);

    let document = store.load().unwrap().unwrap();
    assert_eq!(document["year"], 1);
    let first = &document["nations"][0];
    for key in ["id", "name", "x", "y", "peaceLevel", "armySize", "territory", "color", "ships"] {
        assert!(first.get(key).is_some(), "missing {}", key);
    }
}
