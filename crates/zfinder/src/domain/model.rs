//! Domain models for pins, the active selection, and extension categories.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::errors::DomainError;

/// Identity of a pin. Two pins pointing at the same path are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PinId(pub u64);

impl fmt::Display for PinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A user-saved filesystem location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pin {
    id: PinId,
    path: PathBuf,
    label: Option<String>,
}

impl Pin {
    /// Build a pin. The path is not required to exist.
    pub fn new(
        id: PinId,
        path: impl Into<PathBuf>,
        label: Option<String>,
    ) -> Result<Self, DomainError> {
        let path = path.into();
        if path.as_os_str().is_empty() {
            return Err(DomainError::EmptyPath);
        }
        Ok(Self {
            id,
            path,
            label: label.and_then(clean_label),
        })
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label if configured, otherwise the final path component, otherwise the full path.
    pub fn display_name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.display().to_string())
    }
}

/// The only mutable state of the core: which pin, if any, is being detailed.
#[derive(Debug, Clone, Default)]
pub enum Selection {
    #[default]
    NoSelection,
    Selected(Arc<Pin>),
}

impl Selection {
    pub fn pin(&self) -> Option<&Arc<Pin>> {
        match self {
            Selection::NoSelection => None,
            Selection::Selected(pin) => Some(pin),
        }
    }

    pub fn is_selected(&self) -> bool {
        matches!(self, Selection::Selected(_))
    }
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Selection::NoSelection, Selection::NoSelection) => true,
            (Selection::Selected(a), Selection::Selected(b)) => a.id() == b.id(),
            _ => false,
        }
    }
}

impl Eq for Selection {}

/// Icon bucket a file extension falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionCategory {
    Photo,
    Document,
    Spreadsheet,
    Presentation,
    Audio,
    Video,
    Archive,
    Executable,
    Generic,
}

impl ExtensionCategory {
    pub const ALL: [ExtensionCategory; 9] = [
        ExtensionCategory::Photo,
        ExtensionCategory::Document,
        ExtensionCategory::Spreadsheet,
        ExtensionCategory::Presentation,
        ExtensionCategory::Audio,
        ExtensionCategory::Video,
        ExtensionCategory::Archive,
        ExtensionCategory::Executable,
        ExtensionCategory::Generic,
    ];

    /// Stable lower-case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtensionCategory::Photo => "photo",
            ExtensionCategory::Document => "document",
            ExtensionCategory::Spreadsheet => "spreadsheet",
            ExtensionCategory::Presentation => "presentation",
            ExtensionCategory::Audio => "audio",
            ExtensionCategory::Video => "video",
            ExtensionCategory::Archive => "archive",
            ExtensionCategory::Executable => "executable",
            ExtensionCategory::Generic => "generic",
        }
    }

    /// Symbolic icon name understood by the desktop icon set.
    pub fn symbol_name(&self) -> &'static str {
        match self {
            ExtensionCategory::Photo => "photo",
            ExtensionCategory::Document => "doc.plaintext",
            ExtensionCategory::Spreadsheet => "filemenu.and.selection",
            ExtensionCategory::Presentation => "slider.horizontal.below.rectangle",
            ExtensionCategory::Audio => "music.note",
            ExtensionCategory::Video => "film",
            ExtensionCategory::Archive => "doc.zipper",
            ExtensionCategory::Executable => "app",
            ExtensionCategory::Generic => "doc",
        }
    }
}

impl fmt::Display for ExtensionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExtensionCategory {
    type Err = CategoryParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let needle = value.trim().to_ascii_lowercase();
        ExtensionCategory::ALL
            .into_iter()
            .find(|category| category.as_str() == needle)
            .ok_or(CategoryParseError::UnknownCategory(needle))
    }
}

/// Error returned when parsing an [`ExtensionCategory`] fails.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum CategoryParseError {
    #[error("unknown extension category '{0}'")]
    UnknownCategory(String),
}

fn clean_label(label: String) -> Option<String> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
