//! Icon mappings for pinned entries.

use crate::domain::model::ExtensionCategory;
use crate::infra::config::IconStyle;

/// Glyph for a pin: directories get a folder, files their category icon.
pub fn icon_for_entry(is_dir: bool, category: ExtensionCategory, style: IconStyle) -> &'static str {
    if is_dir {
        return match style {
            IconStyle::Nerd => "\u{f07b}",
            IconStyle::Ascii => "[dir]",
        };
    }

    match style {
        IconStyle::Nerd => match category {
            ExtensionCategory::Photo => "\u{f1c5}",
            ExtensionCategory::Document => "\u{f15c}",
            ExtensionCategory::Spreadsheet => "\u{f1c3}",
            ExtensionCategory::Presentation => "\u{f1c4}",
            ExtensionCategory::Audio => "\u{f1c7}",
            ExtensionCategory::Video => "\u{f1c8}",
            ExtensionCategory::Archive => "\u{f1c6}",
            ExtensionCategory::Executable => "\u{f120}",
            ExtensionCategory::Generic => "\u{f15b}",
        },
        IconStyle::Ascii => match category {
            ExtensionCategory::Photo => "[img]",
            ExtensionCategory::Document => "[doc]",
            ExtensionCategory::Spreadsheet => "[tab]",
            ExtensionCategory::Presentation => "[ppt]",
            ExtensionCategory::Audio => "[aud]",
            ExtensionCategory::Video => "[vid]",
            ExtensionCategory::Archive => "[zip]",
            ExtensionCategory::Executable => "[exe]",
            ExtensionCategory::Generic => "[---]",
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ascii_icons_share_a_width() {
        for category in ExtensionCategory::ALL {
            assert_eq!(icon_for_entry(false, category, IconStyle::Ascii).len(), 5);
        }
        assert_eq!(icon_for_entry(true, ExtensionCategory::Photo, IconStyle::Ascii), "[dir]");
    }
}
