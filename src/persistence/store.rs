//! Save stores - where snapshots live between sessions

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::core::error::Result;
use crate::persistence::record::SaveFile;

/// Persistence collaborator. `load` yields the raw document so the
/// caller can recover field by field from damaged saves.
pub trait SaveStore {
    fn load(&self) -> Result<Option<Value>>;
    fn save(&mut self, save: &SaveFile) -> Result<()>;
}

/// Pretty-printed JSON file on disk
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SaveStore for JsonFileStore {
    fn load(&self) -> Result<Option<Value>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&content)?))
    }

    fn save(&mut self, save: &SaveFile) -> Result<()> {
        let json = save.to_json()?;
        // Write then rename so a crash never leaves half a save behind
        let staging = self.path.with_extension("json.tmp");
        fs::write(&staging, json)?;
        fs::rename(&staging, &self.path)?;
        Ok(())
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub document: Option<Value>,
    pub saves: u32,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(document: Value) -> Self {
        Self { document: Some(document), saves: 0 }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Result<Option<Value>> {
        Ok(self.document.clone())
    }

    fn save(&mut self, save: &SaveFile) -> Result<()> {
        self.document = Some(serde_json::to_value(save)?);
        self.saves += 1;
        Ok(())
    }
}
