// Shared pieces of the record serializers
use crate::geometry::RingClosure;
use crate::graph::{Graph, Term};
use crate::model::{Distribution, MetadataRecord};
use std::str::FromStr;

/// GeoNetwork's protocol token for direct downloads
pub const DEFAULT_DOWNLOAD_PROTOCOL: &str = "WWW:DOWNLOAD-1.0-http--download";

pub trait RecordSerializer {
    fn serialize(&self, record: &MetadataRecord) -> Graph;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Dcat,
    SchemaOrg,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dcat" => Ok(OutputFormat::Dcat),
            "schema-org" | "schemaorg" | "schema.org" => Ok(OutputFormat::SchemaOrg),
            other => Err(format!("unknown output format `{}`", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SerializerConfig {
    /// Distributions with exactly this protocol are treated as downloads
    pub download_protocol: String,
    pub ring_closure: RingClosure,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            download_protocol: DEFAULT_DOWNLOAD_PROTOCOL.to_string(),
            ring_closure: RingClosure::default(),
        }
    }
}

impl SerializerConfig {
    pub fn is_download(&self, distribution: &Distribution) -> bool {
        distribution.protocol.as_deref() == Some(self.download_protocol.as_str())
    }
}

/// Pack several texts into one literal: `{"a","b",https://x}`.
/// Bare http(s) URLs are left unquoted; `"` and `\` inside quoted items are
/// backslash-escaped.
pub fn set_literal<S: AsRef<str>>(items: &[S]) -> String {
    let parts: Vec<String> = items
        .iter()
        .map(|item| {
            let item = item.as_ref();
            if is_url(item) {
                item.to_string()
            } else {
                format!("\"{}\"", item.replace('\\', "\\\\").replace('"', "\\\""))
            }
        })
        .collect();
    format!("{{{}}}", parts.join(","))
}

fn is_url(text: &str) -> bool {
    (text.starts_with("http://") || text.starts_with("https://")) && !text.contains(char::is_whitespace)
}

/// Insert a plain literal unless the value is empty
pub(crate) fn insert_text(graph: &mut Graph, subject: &Term, predicate: String, value: &str) {
    if !value.is_empty() {
        graph.insert(subject.clone(), predicate, Term::literal(value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_literal() {
        assert_eq!(
            set_literal(&["Not for navigation", "https://example.org/terms", "Cite \"us\""]),
            r#"{"Not for navigation",https://example.org/terms,"Cite \"us\""}"#
        );
        assert_eq!(set_literal(&[r"C:\data"]), r#"{"C:\\data"}"#);
        assert_eq!(set_literal::<&str>(&[]), "{}");
    }

    #[test]
    fn test_download_detection() {
        let config = SerializerConfig::default();
        let mut dist = Distribution {
            protocol: Some(DEFAULT_DOWNLOAD_PROTOCOL.to_string()),
            ..Distribution::default()
        };
        assert!(config.is_download(&dist));
        dist.protocol = Some("WWW:LINK-1.0-http--link".to_string());
        assert!(!config.is_download(&dist));
        dist.protocol = None;
        assert!(!config.is_download(&dist));
    }

    #[test]
    fn test_output_format_from_str() {
        assert_eq!("dcat".parse::<OutputFormat>(), Ok(OutputFormat::Dcat));
        assert_eq!("Schema-Org".parse::<OutputFormat>(), Ok(OutputFormat::SchemaOrg));
        assert!("turtle".parse::<OutputFormat>().is_err());
    }
}
