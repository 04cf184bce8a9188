// Schema.org Dataset serialization
use crate::geometry::SchemaOrgGeo;
use crate::graph::{Graph, Term};
use crate::model::{Keyword, MetadataRecord, TemporalExtent};
use crate::namespaces::{RDF, RDFS, SDO, XSD};
use crate::serializer::{insert_text, set_literal, RecordSerializer, SerializerConfig};
use tracing::trace;

const DOI_REGISTRY: &str = "https://registry.identifiers.org/registry/doi";

pub struct SchemaOrgSerializer {
    config: SerializerConfig,
}

impl SchemaOrgSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    fn keywords(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        for category in &record.topic_categories {
            graph.insert(dataset.clone(), SDO.term("keywords"), Term::literal(category));
        }

        for keyword in record.keywords.iter().chain(&record.themes) {
            if keyword.url.is_some() {
                defined_term(graph, dataset, keyword);
            } else {
                graph.insert(dataset.clone(), SDO.term("keywords"), Term::literal(&keyword.name));
            }
        }

        for variable in &record.variables_measured {
            let property = graph.blank_node();
            graph.insert(dataset.clone(), SDO.term("variableMeasured"), property.clone());
            graph.insert(property.clone(), RDF.term("type"), Term::iri(SDO.term("PropertyValue")));
            graph.insert(property.clone(), SDO.term("name"), Term::literal(&variable.name));
            if let Some(url) = variable.url.as_deref() {
                graph.insert(property, SDO.term("url"), Term::iri(url));
            }
        }
    }

    fn spatial(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        let Some(bb) = &record.bounding_box else {
            return;
        };
        let place = graph.blank_node();
        let geo = graph.blank_node();
        graph.insert(dataset.clone(), SDO.term("spatialCoverage"), place.clone());
        graph.insert(place.clone(), RDF.term("type"), Term::iri(SDO.term("Place")));
        graph.insert(place, SDO.term("geo"), geo.clone());

        match SchemaOrgGeo::from_bounding_box(bb) {
            SchemaOrgGeo::GeoCoordinates { latitude, longitude } => {
                graph.insert(geo.clone(), RDF.term("type"), Term::iri(SDO.term("GeoCoordinates")));
                graph.insert(
                    geo.clone(),
                    SDO.term("latitude"),
                    Term::typed_literal(latitude.to_string(), XSD.term("double")),
                );
                graph.insert(
                    geo,
                    SDO.term("longitude"),
                    Term::typed_literal(longitude.to_string(), XSD.term("double")),
                );
            }
            SchemaOrgGeo::GeoShape { shape_box } => {
                graph.insert(geo.clone(), RDF.term("type"), Term::iri(SDO.term("GeoShape")));
                graph.insert(geo, SDO.term("box"), Term::literal(shape_box));
            }
        }
    }

    fn distributions(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        for dist in &record.distributions {
            let Some(url) = dist.url.as_deref() else {
                trace!("distribution without a linkage skipped");
                continue;
            };
            if !self.config.is_download(dist) {
                graph.insert(dataset.clone(), RDFS.term("seeAlso"), Term::iri(url));
                continue;
            }

            let download = graph.blank_node();
            graph.insert(dataset.clone(), SDO.term("distribution"), download.clone());
            graph.insert(download.clone(), RDF.term("type"), Term::iri(SDO.term("DataDownload")));
            graph.insert(download.clone(), SDO.term("contentUrl"), Term::iri(url));
            if let Some(title) = dist.title() {
                graph.insert(download.clone(), SDO.term("name"), Term::literal(title));
            }
            if let Some(summary) = dist.summary() {
                graph.insert(download.clone(), SDO.term("description"), Term::literal(summary));
            }
            if let Some(license) = &record.license {
                graph.insert(download, SDO.term("license"), Term::iri(license.url.as_str()));
            }
        }
    }

    fn doi(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        if record.doi.is_empty() {
            return;
        }
        let doi_url = format!("https://doi.org/{}", record.doi);
        let identifier = Term::iri(doi_url.as_str());
        graph.insert(dataset.clone(), SDO.term("identifier"), identifier.clone());
        graph.insert(identifier.clone(), RDF.term("type"), Term::iri(SDO.term("PropertyValue")));
        graph.insert(identifier.clone(), SDO.term("propertyID"), Term::iri(DOI_REGISTRY));
        graph.insert(identifier.clone(), SDO.term("value"), Term::literal(format!("doi:{}", record.doi)));
        graph.insert(identifier.clone(), SDO.term("url"), Term::iri(doi_url.as_str()));
        graph.insert(identifier, SDO.term("name"), Term::literal(format!("DOI: {}", record.doi)));
    }
}

impl Default for SchemaOrgSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSerializer for SchemaOrgSerializer {
    fn serialize(&self, record: &MetadataRecord) -> Graph {
        let mut graph = Graph::new();
        let dataset = record.subject();

        graph.insert(dataset.clone(), RDF.term("type"), Term::iri(SDO.term("Dataset")));
        insert_text(&mut graph, &dataset, SDO.term("name"), &record.title);
        insert_text(&mut graph, &dataset, SDO.term("description"), &record.abstract_text);
        insert_text(&mut graph, &dataset, SDO.term("identifier"), &record.identifier);
        insert_text(&mut graph, &dataset, SDO.term("datePublished"), &record.date_issued);
        insert_text(&mut graph, &dataset, SDO.term("citation"), &record.citation);

        self.keywords(&mut graph, &dataset, record);
        self.spatial(&mut graph, &dataset, record);

        if let Some(coverage) = record.temporal_extent.as_ref().and_then(temporal_coverage) {
            graph.insert(dataset.clone(), SDO.term("temporalCoverage"), Term::literal(coverage));
        }

        self.distributions(&mut graph, &dataset, record);

        if let Some(license) = &record.license {
            graph.insert(dataset.clone(), SDO.term("license"), Term::iri(license.url.as_str()));
        }
        if !record.use_limitations.is_empty() {
            graph.insert(
                dataset.clone(),
                SDO.term("usageInfo"),
                Term::literal(set_literal(&record.use_limitations)),
            );
        }

        self.doi(&mut graph, &dataset, record);

        trace!(statements = graph.len(), "Schema.org graph built");
        graph
    }
}

/// ISO 8601 interval; `..` marks an open end
pub fn temporal_coverage(extent: &TemporalExtent) -> Option<String> {
    match (extent.start.as_deref(), extent.end.as_deref()) {
        (Some(start), Some(end)) => Some(format!("{}/{}", start, end)),
        (Some(start), None) => Some(format!("{}/..", start)),
        (None, Some(end)) => Some(format!("../{}", end)),
        (None, None) => None,
    }
}

fn defined_term(graph: &mut Graph, dataset: &Term, keyword: &Keyword) {
    let Some(url) = keyword.url.as_deref() else {
        return;
    };
    let term = Term::iri(url);
    graph.insert(dataset.clone(), SDO.term("keywords"), term.clone());
    graph.insert(term.clone(), RDF.term("type"), Term::iri(SDO.term("DefinedTerm")));
    graph.insert(term.clone(), SDO.term("name"), Term::literal(&keyword.name));

    let Some(thesaurus) = &keyword.thesaurus else {
        return;
    };
    if let Some(set_url) = thesaurus.url.as_deref() {
        let set = Term::iri(set_url);
        graph.insert(term, SDO.term("inDefinedTermSet"), set.clone());
        graph.insert(set.clone(), RDF.term("type"), Term::iri(SDO.term("DefinedTermSet")));
        graph.insert(set.clone(), SDO.term("url"), Term::iri(set_url));
        if let Some(title) = &thesaurus.title {
            graph.insert(set, SDO.term("name"), Term::literal(title));
        }
    }
}
