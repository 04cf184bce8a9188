//! isde-translator - ISO 19115/19139 metadata to DCAT, Schema.org, WKT and GeoJSON
//!
//! Licensed under Apache-2.0

pub mod dcat;
pub mod extractor;
pub mod geometry;
pub mod graph;
pub mod keywords;
pub mod license;
pub mod model;
pub mod namespaces;
pub mod queries;
pub mod schema_org;
pub mod serializer;
pub mod xml;

// Re-export main types
pub use dcat::DcatSerializer;
pub use extractor::{Extractor, ExtractorConfig};
pub use geometry::RingClosure;
pub use graph::{Graph, Term, Triple};
pub use model::{
    BoundingBox, Distribution, DistributionFunction, Keyword, License, MetadataRecord,
    TemporalExtent, Thesaurus,
};
pub use schema_org::SchemaOrgSerializer;
pub use serializer::{OutputFormat, RecordSerializer, SerializerConfig};
pub use xml::XmlDocument;

use std::path::Path;

/// One-call wrapper: XML in, record or statement graph out.
pub struct Translator {
    extractor: Extractor,
    serializer: SerializerConfig,
}

impl Translator {
    pub fn new() -> Self {
        Self::with_config(TranslatorConfig::default())
    }

    pub fn with_config(config: TranslatorConfig) -> Self {
        Self {
            extractor: Extractor::with_config(config.extractor),
            serializer: config.serializer,
        }
    }

    /// Extract a record from XML text. Only a document that is not well-formed fails.
    pub fn extract_str(&self, xml: &str, base_uri: &str) -> Result<MetadataRecord> {
        let doc = XmlDocument::parse(xml)?;
        Ok(self.extractor.extract_with_base_uri(&doc, base_uri))
    }

    pub fn extract_file<P: AsRef<Path>>(&self, path: P, base_uri: &str) -> Result<MetadataRecord> {
        let doc = XmlDocument::parse_file(path)?;
        Ok(self.extractor.extract_with_base_uri(&doc, base_uri))
    }

    pub fn translate_str(&self, xml: &str, base_uri: &str, format: OutputFormat) -> Result<Graph> {
        let record = self.extract_str(xml, base_uri)?;
        Ok(self.serialize(&record, format))
    }

    pub fn serialize(&self, record: &MetadataRecord, format: OutputFormat) -> Graph {
        match format {
            OutputFormat::Dcat => DcatSerializer::with_config(self.serializer.clone()).serialize(record),
            OutputFormat::SchemaOrg => {
                SchemaOrgSerializer::with_config(self.serializer.clone()).serialize(record)
            }
        }
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::new()
    }
}

/// Combined extraction and serialization settings
#[derive(Debug, Clone, Default)]
pub struct TranslatorConfig {
    pub extractor: ExtractorConfig,
    pub serializer: SerializerConfig,
}

impl TranslatorConfig {
    pub fn with_legacy_wkt(mut self, legacy: bool) -> Self {
        self.serializer.ring_closure = if legacy {
            RingClosure::Legacy
        } else {
            RingClosure::Closed
        };
        self
    }

    pub fn with_download_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.serializer.download_protocol = protocol.into();
        self
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML error: {0}")]
    Xml(String),

    #[error("Invalid path query `{query}`: {reason}")]
    Query { query: String, reason: String },

    #[error("Construction error: {0}")]
    Construction(String),

    #[error("Geometry encoding error: {0}")]
    GeometryEncoding(String),
}
