//! Pin management: assigns identities to configured and ad-hoc pins.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::app::classify::classify_path;
use crate::domain::model::{ExtensionCategory, Pin, PinId};
use crate::infra::config::PinEntry;

/// Ordered collection of pins shown in the list view.
#[derive(Debug, Default, Clone)]
pub struct PinBoard {
    pins: Vec<Arc<Pin>>,
    next_id: u64,
}

impl PinBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from configured entries followed by extra paths.
    pub fn from_sources(entries: &[PinEntry], extra: &[PathBuf]) -> Result<Self> {
        let mut board = Self::new();
        for entry in entries {
            board
                .add(expand_home(&entry.path), entry.label.clone())
                .with_context(|| format!("invalid pin in config: {:?}", entry.path))?;
        }
        for path in extra {
            board
                .add(path.clone(), None)
                .with_context(|| format!("invalid pin path: {}", path.display()))?;
        }
        Ok(board)
    }

    /// Create a pin with a fresh identity. Duplicate paths are allowed.
    pub fn add(&mut self, path: impl Into<PathBuf>, label: Option<String>) -> Result<Arc<Pin>> {
        self.next_id += 1;
        let pin = Arc::new(Pin::new(PinId(self.next_id), path, label)?);
        self.pins.push(Arc::clone(&pin));
        Ok(pin)
    }

    pub fn pins(&self) -> &[Arc<Pin>] {
        &self.pins
    }

    pub fn get(&self, index: usize) -> Option<&Arc<Pin>> {
        self.pins.get(index)
    }

    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Serializable listing used by the `pins` command.
    pub fn rows(&self) -> Vec<PinRow> {
        self.pins.iter().map(|pin| PinRow::from(pin.as_ref())).collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PinRow {
    pub id: u64,
    pub name: String,
    pub path: String,
    pub category: ExtensionCategory,
    pub exists: bool,
}

impl From<&Pin> for PinRow {
    fn from(pin: &Pin) -> Self {
        Self {
            id: pin.id().0,
            name: pin.display_name(),
            path: pin.path().display().to_string(),
            category: classify_path(pin.path()),
            exists: pin.path().exists(),
        }
    }
}

fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs_next::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
