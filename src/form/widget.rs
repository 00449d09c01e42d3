use crate::data::ConfigNode;

/// String length above which a string leaf is edited in a multi-line widget.
const MULTILINE_THRESHOLD: usize = 100;

/// Edit widget selected for a leaf value.
///
/// This is a heuristic, not a schema: inference runs on every render from
/// the current value, so a field's widget can change when its value's shape
/// changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    /// Boolean toggle.
    Checkbox,
    /// Integer or float input, no further distinction.
    Numeric,
    /// Single-line input for `http://` / `https://` values.
    Url,
    /// Single-line text input. Also the fallback for anything unrecognized.
    Text,
    /// Multi-line text input for long prose.
    TextArea,
}

impl WidgetKind {
    /// Classify a leaf value, in priority order:
    ///
    /// 1. boolean → [`WidgetKind::Checkbox`]
    /// 2. number → [`WidgetKind::Numeric`]
    /// 3. string starting with `http://`/`https://` → [`WidgetKind::Url`]
    /// 4. string containing a path separator (`/` or `\`) → [`WidgetKind::Text`]
    /// 5. string longer than 100 characters → [`WidgetKind::TextArea`]
    /// 6. everything else → [`WidgetKind::Text`]
    pub fn infer(value: &ConfigNode) -> WidgetKind {
        match value {
            ConfigNode::Bool(_) => WidgetKind::Checkbox,
            ConfigNode::Number(_) => WidgetKind::Numeric,
            ConfigNode::String(s) => {
                if s.starts_with("http://") || s.starts_with("https://") {
                    WidgetKind::Url
                } else if s.contains('/') || s.contains('\\') {
                    // File system path: keep on one line regardless of length.
                    WidgetKind::Text
                } else if s.chars().count() > MULTILINE_THRESHOLD {
                    WidgetKind::TextArea
                } else {
                    WidgetKind::Text
                }
            }
            _ => WidgetKind::Text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn infer(value: serde_json::Value) -> WidgetKind {
        WidgetKind::infer(&ConfigNode::from(value))
    }

    #[test]
    fn inference_table() {
        assert_eq!(infer(json!(true)), WidgetKind::Checkbox);
        assert_eq!(infer(json!(42)), WidgetKind::Numeric);
        assert_eq!(infer(json!(2.5)), WidgetKind::Numeric);
        assert_eq!(infer(json!("https://example.com")), WidgetKind::Url);
        assert_eq!(infer(json!("http://intranet/form")), WidgetKind::Url);
        assert_eq!(infer(json!("C:\\templates")), WidgetKind::Text);
        assert_eq!(infer(json!("/opt/templates")), WidgetKind::Text);
        assert_eq!(infer(json!("short label")), WidgetKind::Text);
        assert_eq!(infer(json!("x".repeat(150))), WidgetKind::TextArea);
    }

    #[test]
    fn long_path_stays_single_line() {
        let long_path = format!("C:\\{}", "sub\\".repeat(40));
        assert_eq!(infer(json!(long_path)), WidgetKind::Text);
    }

    #[test]
    fn boundary_length_is_single_line() {
        assert_eq!(infer(json!("y".repeat(100))), WidgetKind::Text);
        assert_eq!(infer(json!("y".repeat(101))), WidgetKind::TextArea);
    }

    #[test]
    fn non_scalar_falls_back_to_text() {
        assert_eq!(infer(json!(null)), WidgetKind::Text);
        assert_eq!(infer(json!([1, 2])), WidgetKind::Text);
    }
}
