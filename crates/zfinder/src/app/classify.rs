//! Mapping file extensions to icon categories.

use std::path::Path;

use serde::Serialize;

use crate::domain::model::ExtensionCategory;

/// Classify a file extension. Matching ignores case and a single leading `.`.
///
/// Total: anything outside the known table, including the empty string, is
/// [`ExtensionCategory::Generic`].
pub fn classify(extension: &str) -> ExtensionCategory {
    let normalized = extension
        .strip_prefix('.')
        .unwrap_or(extension)
        .to_lowercase();

    match normalized.as_str() {
        "jpg" | "jpeg" | "png" | "gif" | "svg" => ExtensionCategory::Photo,
        "doc" | "docx" | "pdf" | "txt" | "rtf" => ExtensionCategory::Document,
        "xls" | "xlsx" | "csv" | "tsv" | "json" => ExtensionCategory::Spreadsheet,
        "ppt" | "pptx" | "key" | "odp" => ExtensionCategory::Presentation,
        "mp3" | "wav" | "flac" | "aac" => ExtensionCategory::Audio,
        "mp4" | "mov" | "avi" | "mkv" => ExtensionCategory::Video,
        "zip" | "tar" | "rar" | "7z" => ExtensionCategory::Archive,
        "app" | "exe" | "sh" | "bat" => ExtensionCategory::Executable,
        _ => ExtensionCategory::Generic,
    }
}

/// Classify a path by its final extension. Paths without one are generic.
pub fn classify_path(path: &Path) -> ExtensionCategory {
    path.extension()
        .map(|ext| classify(&ext.to_string_lossy()))
        .unwrap_or(ExtensionCategory::Generic)
}

/// One classified extension, as printed by the `classify` command.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Classification {
    pub extension: String,
    pub category: ExtensionCategory,
    pub symbol: &'static str,
}

pub fn classify_all<S: AsRef<str>>(extensions: &[S]) -> Vec<Classification> {
    extensions
        .iter()
        .map(|ext| {
            let category = classify(ext.as_ref());
            Classification {
                extension: ext.as_ref().to_string(),
                category,
                symbol: category.symbol_name(),
            }
        })
        .collect()
}

/// Tab-separated `extension category symbol` lines.
pub fn render_report(rows: &[Classification]) -> String {
    rows.iter()
        .map(|row| format!("{}\t{}\t{}", row.extension, row.category, row.symbol))
        .collect::<Vec<_>>()
        .join("\n")
}
