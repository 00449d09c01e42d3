use crate::data::{ConfigNode, Path};

/// Curated section titles that replace the generically formatted label.
///
/// Lookup happens after generic formatting and takes precedence when present.
const CURATED_TITLES: &[(&str, &str)] = &[
    ("Ui Settings", "User Interface Settings"),
    ("Worksafe Bc", "WorkSafe BC Configuration"),
    ("Excel To Pdf", "Excel to PDF Configuration"),
    ("Nop", "Notice of Project (NOP) Configuration"),
    ("Debug Paths", "Debug/Development Paths"),
];

/// Raw key names whose sections start collapsed.
const COLLAPSED_KEYS: &[&str] = &["debug_paths", "NOP", "EXCEL_TO_PDF", "timeouts"];

/// How a section lays out its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionLayout {
    /// Two-column grid; used when every visible child is primitive-or-array.
    Grid,
    /// One full-width row per child; gives nested sections room to breathe.
    Stacked,
}

/// Derive a display label from a raw key.
///
/// Separators (`_`, `-`) become spaces, a space is inserted at each
/// lowercase→uppercase transition, and each word is Title-Cased.
pub fn field_label(key: &str) -> String {
    let mut spaced = String::with_capacity(key.len() + 4);
    let mut prev_lower = false;
    for ch in key.chars() {
        if ch == '_' || ch == '-' {
            spaced.push(' ');
            prev_lower = false;
            continue;
        }
        if prev_lower && ch.is_ascii_uppercase() {
            spaced.push(' ');
        }
        prev_lower = ch.is_ascii_lowercase();
        spaced.push(ch);
    }

    spaced
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Derive a section title from a raw key.
///
/// Generic formatting first, then the curated lookup table.
pub fn section_title(key: &str) -> String {
    let formatted = field_label(key);
    for (from, to) in CURATED_TITLES {
        if formatted == *from {
            return (*to).to_string();
        }
    }
    formatted
}

/// Whether a section with this raw key starts collapsed.
///
/// Collapse state is per-render-session UI state, never persisted.
pub fn collapsed_by_default(key: &str) -> bool {
    COLLAPSED_KEYS.contains(&key)
}

/// Pick a layout from the visible children of an object.
///
/// [`SectionLayout::Grid`] when no child is itself an object.
pub fn layout_for<'a>(mut children: impl Iterator<Item = &'a ConfigNode>) -> SectionLayout {
    if children.any(ConfigNode::is_object) {
        SectionLayout::Stacked
    } else {
        SectionLayout::Grid
    }
}

/// Display affordance: fields whose path mentions a URL or filesystem path
/// are marked required. Nothing blocks saving an empty value.
pub fn required_by_heuristic(path: &Path) -> bool {
    let s = path.to_string();
    s.contains("url") || s.contains("path")
}
