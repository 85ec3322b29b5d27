//! Widget declarations: the closed widget-kind set and its persisted formats
//!
//! Widgets are declared as a JSON array of objects like
//! `{"type": "INT", "name": "MyAge", "value": "30", "min": "0", ...}`.
//! Older workflows used a comma-delimited line format
//! (`TYPE,name,value[,min,max,step[,precision]]`, with `COMBO` carrying its
//! options after the value); both are accepted on load.
//!
//! Internally the string-typed `type` field is replaced by a tagged variant
//! over the closed kind set, so a numeric widget cannot carry options and a
//! choice widget cannot carry a step.

use log::warn;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Result, SpecError};

/// A declared widget: a unique name plus its kind-specific configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetSpec {
    /// Unique key, also the user-facing label
    pub name: String,
    /// Kind and kind-specific fields
    pub kind: WidgetKind,
}

/// The closed set of widget kinds.
///
/// Declared defaults and numeric bounds are kept as strings and coerced
/// lazily, matching the persisted format.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetKind {
    /// Integer spinner
    Int {
        default: String,
        min: Option<String>,
        max: Option<String>,
        step: Option<String>,
    },
    /// Decimal spinner with optional display precision
    Float {
        default: String,
        min: Option<String>,
        max: Option<String>,
        step: Option<String>,
        precision: Option<String>,
    },
    /// Single-line text field
    Text { default: String },
    /// Multi-line text area backed by a host editor element
    MultilineText { default: String },
    /// Boolean toggle
    Toggle { default: String },
    /// Drop-down over a fixed, ordered option list
    Choice {
        default: String,
        options: Vec<String>,
    },
}

impl WidgetKind {
    /// The persisted type tag for this kind
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Int { .. } => "INT",
            Self::Float { .. } => "FLOAT",
            Self::Text { .. } => "STRING",
            Self::MultilineText { .. } => "MSTRING",
            Self::Toggle { .. } => "BOOLEAN",
            Self::Choice { .. } => "COMBO",
        }
    }

    /// The port type tag a widget of this kind exposes when promoted to a
    /// connectable input
    pub fn port_type(&self) -> &'static str {
        match self {
            Self::Int { .. } => "INT",
            Self::Float { .. } => "FLOAT",
            Self::Text { .. } | Self::MultilineText { .. } => "STRING",
            Self::Toggle { .. } => "BOOLEAN",
            Self::Choice { .. } => "COMBO",
        }
    }

    /// Whether this kind owns a host editor element that needs explicit
    /// teardown when the widget is discarded
    pub fn needs_editor(&self) -> bool {
        matches!(self, Self::MultilineText { .. })
    }

    /// Coerce the declared default into its runtime value.
    ///
    /// Integer and decimal defaults that fail to parse become `null` with a
    /// diagnostic; booleans compare case-insensitively against `"true"`;
    /// everything else is the literal string.
    pub fn default_value(&self) -> Value {
        match self {
            Self::Int { default, .. } => match default.trim().parse::<i64>() {
                Ok(n) => Value::from(n),
                Err(_) => {
                    warn!("widget default '{default}' is not an integer");
                    Value::Null
                }
            },
            Self::Float { default, .. } => match default.trim().parse::<f64>() {
                Ok(n) => Value::from(n),
                Err(_) => {
                    warn!("widget default '{default}' is not a number");
                    Value::Null
                }
            },
            Self::Toggle { default } => Value::from(default.trim().eq_ignore_ascii_case("true")),
            Self::Text { default }
            | Self::MultilineText { default }
            | Self::Choice { default, .. } => Value::from(default.clone()),
        }
    }
}

/// Persisted JSON shape of one widget entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawWidget {
    #[serde(rename = "type")]
    ty: String,
    name: String,
    #[serde(default)]
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    min: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    max: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    step: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    precision: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    values: Vec<String>,
}

impl RawWidget {
    /// Convert one raw entry, or `None` (with a warning) for unknown kinds.
    fn into_spec(self) -> Option<WidgetSpec> {
        let kind = match self.ty.to_uppercase().as_str() {
            "INT" => WidgetKind::Int {
                default: self.value,
                min: self.min,
                max: self.max,
                step: self.step,
            },
            "FLOAT" => WidgetKind::Float {
                default: self.value,
                min: self.min,
                max: self.max,
                step: self.step,
                precision: self.precision,
            },
            "STRING" => WidgetKind::Text {
                default: self.value,
            },
            "MSTRING" => WidgetKind::MultilineText {
                default: self.value,
            },
            "BOOLEAN" => WidgetKind::Toggle {
                default: self.value,
            },
            "COMBO" => WidgetKind::Choice {
                default: self.value,
                options: self.values,
            },
            other => {
                warn!("skipping widget '{}' of unknown kind '{other}'", self.name);
                return None;
            }
        };
        Some(WidgetSpec {
            name: self.name,
            kind,
        })
    }

    fn from_spec(spec: &WidgetSpec) -> Self {
        let tag = spec.kind.tag().to_string();
        let (value, min, max, step, precision, values) = match &spec.kind {
            WidgetKind::Int {
                default,
                min,
                max,
                step,
            } => (
                default.clone(),
                min.clone(),
                max.clone(),
                step.clone(),
                None,
                Vec::new(),
            ),
            WidgetKind::Float {
                default,
                min,
                max,
                step,
                precision,
            } => (
                default.clone(),
                min.clone(),
                max.clone(),
                step.clone(),
                precision.clone(),
                Vec::new(),
            ),
            WidgetKind::Text { default }
            | WidgetKind::MultilineText { default }
            | WidgetKind::Toggle { default } => {
                (default.clone(), None, None, None, None, Vec::new())
            }
            WidgetKind::Choice { default, options } => {
                (default.clone(), None, None, None, None, options.clone())
            }
        };
        Self {
            ty: tag,
            name: spec.name.clone(),
            value,
            min,
            max,
            step,
            precision,
            values,
        }
    }
}

/// Strict parse of a widget spec string, used by the dialog commit path.
///
/// Accepts the JSON array form or the legacy line form. Unknown kinds are
/// still skipped (they are recoverable), but malformed JSON is an error
/// here so an edit can be rejected before it is committed.
pub fn try_parse_widget_spec(spec: &str) -> Result<Vec<WidgetSpec>> {
    let trimmed = spec.trim();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }
    if trimmed.starts_with('[') {
        let raw: Vec<RawWidget> =
            serde_json::from_str(trimmed).map_err(SpecError::WidgetConfig)?;
        return Ok(raw.into_iter().filter_map(RawWidget::into_spec).collect());
    }
    Ok(parse_legacy_lines(trimmed))
}

/// Forgiving parse of a widget spec string, used on load and rebuild.
///
/// Malformed JSON degrades to an empty widget list with a diagnostic; the
/// node still gets its inputs and outputs.
pub fn parse_widget_spec(spec: &str) -> Vec<WidgetSpec> {
    match try_parse_widget_spec(spec) {
        Ok(widgets) => widgets,
        Err(err) => {
            warn!("widget config parse error, treating widget list as empty: {err}");
            Vec::new()
        }
    }
}

/// Parse the legacy comma-delimited line format.
///
/// `TYPE,name,value[,min,max,step[,precision]]`; `COMBO` carries its option
/// list after the value. Malformed lines are skipped with a diagnostic.
fn parse_legacy_lines(spec: &str) -> Vec<WidgetSpec> {
    spec.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if fields.len() < 2 {
                warn!("skipping malformed widget line '{line}'");
                return None;
            }
            let field = |idx: usize| fields.get(idx).map(|s| s.to_string());
            let raw = RawWidget {
                ty: fields[0].to_string(),
                name: fields[1].to_string(),
                value: field(2).unwrap_or_default(),
                min: field(3),
                max: field(4),
                step: field(5),
                precision: field(6),
                values: if fields[0].eq_ignore_ascii_case("COMBO") {
                    fields
                        .get(3..)
                        .unwrap_or(&[])
                        .iter()
                        .map(|s| s.to_string())
                        .collect()
                } else {
                    Vec::new()
                },
            };
            raw.into_spec()
        })
        .collect()
}

/// Format a widget list back to the persisted JSON array form.
pub fn format_widget_spec(widgets: &[WidgetSpec]) -> String {
    let raw: Vec<RawWidget> = widgets.iter().map(RawWidget::from_spec).collect();
    serde_json::to_string_pretty(&raw).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_array() {
        let widgets = parse_widget_spec(
            r#"[
                {"type": "INT", "name": "MyAge", "value": "30", "min": "0", "max": "100", "step": "1"},
                {"type": "COMBO", "name": "Gender", "value": "male", "values": ["male", "female"]}
            ]"#,
        );
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].name, "MyAge");
        assert_eq!(
            widgets[0].kind,
            WidgetKind::Int {
                default: "30".to_string(),
                min: Some("0".to_string()),
                max: Some("100".to_string()),
                step: Some("1".to_string()),
            }
        );
        assert_eq!(
            widgets[1].kind,
            WidgetKind::Choice {
                default: "male".to_string(),
                options: vec!["male".to_string(), "female".to_string()],
            }
        );
    }

    #[test]
    fn test_boolean_default_coercion() {
        let widgets =
            parse_widget_spec(r#"[{"type":"BOOLEAN","name":"Active","value":"true"}]"#);
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].kind.default_value(), Value::from(true));
    }

    #[test]
    fn test_numeric_default_coercion() {
        let int = WidgetKind::Int {
            default: "30".to_string(),
            min: None,
            max: None,
            step: None,
        };
        assert_eq!(int.default_value(), Value::from(30));

        let float = WidgetKind::Float {
            default: "75.5".to_string(),
            min: None,
            max: None,
            step: None,
            precision: None,
        };
        assert_eq!(float.default_value(), Value::from(75.5));
    }

    #[test]
    fn test_unparseable_numeric_default_is_null() {
        let int = WidgetKind::Int {
            default: "abc".to_string(),
            min: None,
            max: None,
            step: None,
        };
        assert_eq!(int.default_value(), Value::Null);
    }

    #[test]
    fn test_unknown_kind_is_skipped() {
        let widgets = parse_widget_spec(
            r#"[{"type":"VECTOR","name":"V","value":"0"},{"type":"STRING","name":"Name","value":"John"}]"#,
        );
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].name, "Name");
    }

    #[test]
    fn test_malformed_json_degrades_to_empty() {
        assert!(parse_widget_spec(r#"[{"type": "INT""#).is_empty());
    }

    #[test]
    fn test_malformed_json_is_rejected_strictly() {
        assert!(try_parse_widget_spec(r#"[{"type": "INT""#).is_err());
    }

    #[test]
    fn test_legacy_line_format() {
        let widgets = parse_widget_spec("INT,MyAge,30,0,100,1\nCOMBO,Gender,male,male,female");
        assert_eq!(widgets.len(), 2);
        assert_eq!(widgets[0].kind.tag(), "INT");
        assert_eq!(
            widgets[1].kind,
            WidgetKind::Choice {
                default: "male".to_string(),
                options: vec!["male".to_string(), "female".to_string()],
            }
        );
    }

    #[test]
    fn test_legacy_float_with_precision() {
        let widgets = parse_widget_spec("FLOAT,Weight,75.5,50,150,0.5,3");
        assert_eq!(
            widgets[0].kind,
            WidgetKind::Float {
                default: "75.5".to_string(),
                min: Some("50".to_string()),
                max: Some("150".to_string()),
                step: Some("0.5".to_string()),
                precision: Some("3".to_string()),
            }
        );
    }

    #[test]
    fn test_format_round_trip() {
        let widgets = parse_widget_spec(
            r#"[{"type":"FLOAT","name":"Weight","value":"75.5","min":"50","max":"150","step":"0.5","precision":"3"}]"#,
        );
        let formatted = format_widget_spec(&widgets);
        assert_eq!(parse_widget_spec(&formatted), widgets);
    }
}
