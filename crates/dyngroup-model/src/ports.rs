//! Port declarations parsed from newline-delimited spec strings
//!
//! Each line declares one port: `name` or `name: TYPE`. A missing type means
//! the wildcard type, which connects to anything.

use serde::{Deserialize, Serialize};

/// The wildcard type tag. Wildcard ports accept any connection.
pub const WILDCARD_TYPE: &str = "*";

/// A single declared port: a name plus an upper-cased type tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortSpec {
    /// Port name, unique within its collection
    pub name: String,
    /// Type tag, stored upper-cased; `*` is the wildcard
    #[serde(rename = "type")]
    pub ty: String,
}

impl PortSpec {
    /// Create a port spec, normalizing the type tag to upper-case
    pub fn new(name: impl Into<String>, ty: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into().to_uppercase(),
        }
    }

    /// Create a wildcard-typed port
    pub fn wildcard(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ty: WILDCARD_TYPE.to_string(),
        }
    }

    /// Whether this port accepts any connection
    pub fn is_wildcard(&self) -> bool {
        self.ty == WILDCARD_TYPE
    }

    /// Display form of the type: lower-case, with the wildcard shown as `any`
    pub fn display_type(&self) -> String {
        if self.is_wildcard() {
            "any".to_string()
        } else {
            self.ty.to_lowercase()
        }
    }
}

/// Parse a newline-delimited port spec string into an ordered port list.
///
/// Lines are trimmed; blank lines are skipped rather than aborting the
/// parse. A line with a `:` splits once on the first `:` into name and
/// type; otherwise the whole line is the name and the type defaults to the
/// wildcard. An empty type after the `:` also falls back to the wildcard.
pub fn parse_port_spec(spec: &str) -> Vec<PortSpec> {
    spec.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.split_once(':') {
            Some((name, ty)) => {
                let ty = ty.trim();
                if ty.is_empty() {
                    PortSpec::wildcard(name.trim())
                } else {
                    PortSpec::new(name.trim(), ty)
                }
            }
            None => PortSpec::wildcard(line),
        })
        .collect()
}

/// Format a port list back to the newline-delimited spec form.
///
/// Wildcard ports format as a bare name, so formatting and re-parsing a
/// valid port list round-trips to an equal list.
pub fn format_port_spec(ports: &[PortSpec]) -> String {
    ports
        .iter()
        .map(|port| {
            if port.is_wildcard() {
                port.name.clone()
            } else {
                format!("{}: {}", port.name, port.ty)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_typed_lines() {
        let ports = parse_port_spec("var1: STRING\nvar2: INT");
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0], PortSpec::new("var1", "STRING"));
        assert_eq!(ports[1], PortSpec::new("var2", "INT"));
    }

    #[test]
    fn test_parse_defaults_to_wildcard() {
        let ports = parse_port_spec("value");
        assert_eq!(ports, vec![PortSpec::wildcard("value")]);
        assert!(ports[0].is_wildcard());
    }

    #[test]
    fn test_parse_normalizes_case_and_whitespace() {
        let ports = parse_port_spec("  image :  latent  ");
        assert_eq!(ports, vec![PortSpec::new("image", "LATENT")]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let ports = parse_port_spec("a: INT\n\n   \nb");
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[0].name, "a");
        assert_eq!(ports[1].name, "b");
    }

    #[test]
    fn test_empty_type_after_colon_is_wildcard() {
        let ports = parse_port_spec("value:");
        assert_eq!(ports, vec![PortSpec::wildcard("value")]);
    }

    #[test]
    fn test_display_type() {
        assert_eq!(PortSpec::new("a", "STRING").display_type(), "string");
        assert_eq!(PortSpec::wildcard("a").display_type(), "any");
    }

    #[test]
    fn test_format_round_trip() {
        let ports = vec![
            PortSpec::new("var1", "STRING"),
            PortSpec::wildcard("var2"),
            PortSpec::new("var3", "INT"),
        ];
        let formatted = format_port_spec(&ports);
        assert_eq!(parse_port_spec(&formatted), ports);
    }
}
