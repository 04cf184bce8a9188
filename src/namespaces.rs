// RDF vocabularies used by the serializers

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Namespace {
    pub prefix: &'static str,
    pub iri: &'static str,
}

impl Namespace {
    pub const fn new(prefix: &'static str, iri: &'static str) -> Self {
        Self { prefix, iri }
    }

    /// Full IRI of a term in this vocabulary
    pub fn term(&self, local: &str) -> String {
        let mut iri = String::with_capacity(self.iri.len() + local.len());
        iri.push_str(self.iri);
        iri.push_str(local);
        iri
    }

    /// Prefixed name for an IRI in this vocabulary, if it is one
    pub fn compact(&self, iri: &str) -> Option<String> {
        iri.strip_prefix(self.iri)
            .filter(|local| !local.is_empty() && !local.contains('/') && !local.contains('#'))
            .map(|local| format!("{}:{}", self.prefix, local))
    }
}

pub const ADMS: Namespace = Namespace::new("adms", "http://www.w3.org/ns/adms#");
pub const DCAT: Namespace = Namespace::new("dcat", "http://www.w3.org/ns/dcat#");
pub const DCT: Namespace = Namespace::new("dct", "http://purl.org/dc/terms/");
pub const GSP: Namespace = Namespace::new("gsp", "http://www.opengis.net/ont/geosparql#");
pub const LOCN: Namespace = Namespace::new("locn", "http://www.w3.org/ns/locn#");
pub const RDF: Namespace = Namespace::new("rdf", "http://www.w3.org/1999/02/22-rdf-syntax-ns#");
pub const RDFS: Namespace = Namespace::new("rdfs", "http://www.w3.org/2000/01/rdf-schema#");
pub const SDO: Namespace = Namespace::new("sdo", "https://schema.org/");
pub const SKOS: Namespace = Namespace::new("skos", "http://www.w3.org/2004/02/skos/core#");
pub const XSD: Namespace = Namespace::new("xsd", "http://www.w3.org/2001/XMLSchema#");

pub const ALL: &[Namespace] = &[ADMS, DCAT, DCT, GSP, LOCN, RDF, RDFS, SDO, SKOS, XSD];

/// Datatype of GeoJSON geometry literals
pub const GEOJSON_MEDIA_TYPE: &str = "https://www.iana.org/assignments/media-types/application/vnd.geo+json";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_and_compact() {
        assert_eq!(DCT.term("title"), "http://purl.org/dc/terms/title");
        assert_eq!(DCT.compact("http://purl.org/dc/terms/title").as_deref(), Some("dct:title"));
        assert_eq!(SDO.compact("https://schema.org/"), None);
        assert_eq!(DCAT.compact("http://purl.org/dc/terms/title"), None);
    }
}
