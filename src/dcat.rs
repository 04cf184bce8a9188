// W3C DCAT serialization
use crate::geometry;
use crate::graph::{Graph, Term};
use crate::model::{Keyword, MetadataRecord};
use crate::namespaces::{ADMS, DCAT, DCT, GEOJSON_MEDIA_TYPE, GSP, LOCN, RDF, RDFS, SKOS};
use crate::serializer::{insert_text, set_literal, RecordSerializer, SerializerConfig};
use tracing::{debug, trace};

pub struct DcatSerializer {
    config: SerializerConfig,
}

impl DcatSerializer {
    pub fn new() -> Self {
        Self::with_config(SerializerConfig::default())
    }

    pub fn with_config(config: SerializerConfig) -> Self {
        Self { config }
    }

    fn keywords(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        for category in &record.topic_categories {
            graph.insert(dataset.clone(), DCAT.term("theme"), Term::literal(category));
        }

        for keyword in &record.keywords {
            graph.insert(dataset.clone(), DCAT.term("keyword"), Term::literal(&keyword.name));
            concept(graph, dataset, keyword);
        }

        for theme in &record.themes {
            if theme.url.is_some() {
                concept(graph, dataset, theme);
            } else {
                graph.insert(dataset.clone(), DCAT.term("theme"), Term::literal(&theme.name));
            }
        }

        for variable in &record.variables_measured {
            graph.insert(dataset.clone(), DCAT.term("keyword"), Term::literal(&variable.name));
        }
    }

    fn spatial(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        let Some(bb) = &record.bounding_box else {
            return;
        };
        let location = graph.blank_node();
        graph.insert(dataset.clone(), DCT.term("spatial"), location.clone());
        graph.insert(location.clone(), RDF.term("type"), Term::iri(DCT.term("Location")));
        graph.insert(
            location.clone(),
            LOCN.term("geometry"),
            Term::typed_literal(geometry::to_wkt_with(bb, self.config.ring_closure), GSP.term("wktLiteral")),
        );
        match geometry::to_geojson(bb) {
            Ok(json) => {
                graph.insert(location, LOCN.term("geometry"), Term::typed_literal(json, GEOJSON_MEDIA_TYPE));
            }
            Err(e) => debug!(error = %e, "GeoJSON geometry skipped"),
        }
    }

    fn temporal(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        let Some(extent) = &record.temporal_extent else {
            return;
        };
        let period = graph.blank_node();
        graph.insert(dataset.clone(), DCT.term("temporal"), period.clone());
        graph.insert(period.clone(), RDF.term("type"), Term::iri(DCT.term("PeriodOfTime")));
        if let Some(start) = &extent.start {
            graph.insert(period.clone(), DCAT.term("startDate"), Term::literal(start));
        }
        if let Some(end) = &extent.end {
            graph.insert(period, DCAT.term("endDate"), Term::literal(end));
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

            let node = graph.blank_node();
            graph.insert(dataset.clone(), DCAT.term("distribution"), node.clone());
            graph.insert(node.clone(), RDF.term("type"), Term::iri(DCAT.term("Distribution")));
            graph.insert(node.clone(), DCAT.term("accessURL"), Term::iri(url));
            if let Some(title) = dist.title() {
                graph.insert(node.clone(), DCT.term("title"), Term::literal(title));
            }
            if let Some(summary) = dist.summary() {
                graph.insert(node.clone(), DCT.term("description"), Term::literal(summary));
            }
            if let Some(license) = &record.license {
                graph.insert(node, DCT.term("license"), Term::iri(license.url.as_str()));
            }
        }
    }

    fn rights(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        if let Some(license) = &record.license {
            let document = Term::iri(license.url.as_str());
            graph.insert(dataset.clone(), DCT.term("license"), document.clone());
            graph.insert(document.clone(), RDF.term("type"), Term::iri(DCT.term("LicenseDocument")));
            graph.insert(document.clone(), RDFS.term("label"), Term::literal(&license.name));
            graph.insert(document, DCT.term("identifier"), Term::iri(license.spdx_url.as_str()));
        }

        if !record.use_limitations.is_empty() {
            graph.insert(
                dataset.clone(),
                DCT.term("rights"),
                Term::literal(set_literal(&record.use_limitations)),
            );
        }
    }

    fn doi(&self, graph: &mut Graph, dataset: &Term, record: &MetadataRecord) {
        if record.doi.is_empty() {
            return;
        }
        let doi_url = format!("https://doi.org/{}", record.doi);
        graph.insert(dataset.clone(), DCT.term("identifier"), Term::literal(&record.doi));
        graph.insert(dataset.clone(), DCT.term("identifier"), Term::literal(doi_url.as_str()));

        let identifier = Term::iri(doi_url.as_str());
        graph.insert(dataset.clone(), ADMS.term("identifier"), identifier.clone());
        graph.insert(identifier.clone(), RDF.term("type"), Term::iri(ADMS.term("Identifier")));
        graph.insert(identifier, SKOS.term("notation"), Term::literal(doi_url));
    }
}

impl Default for DcatSerializer {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordSerializer for DcatSerializer {
    fn serialize(&self, record: &MetadataRecord) -> Graph {
        let mut graph = Graph::new();
        let dataset = record.subject();

        graph.insert(dataset.clone(), RDF.term("type"), Term::iri(DCAT.term("Dataset")));
        insert_text(&mut graph, &dataset, DCT.term("title"), &record.title);
        insert_text(&mut graph, &dataset, DCT.term("description"), &record.abstract_text);
        insert_text(&mut graph, &dataset, DCT.term("identifier"), &record.identifier);
        insert_text(&mut graph, &dataset, DCT.term("issued"), &record.date_issued);

        self.keywords(&mut graph, &dataset, record);
        self.spatial(&mut graph, &dataset, record);
        self.temporal(&mut graph, &dataset, record);
        self.distributions(&mut graph, &dataset, record);
        self.rights(&mut graph, &dataset, record);
        self.doi(&mut graph, &dataset, record);

        trace!(statements = graph.len(), "DCAT graph built");
        graph
    }
}

/// `dcat:theme` link to a SKOS concept, with its scheme when the thesaurus has a URL
fn concept(graph: &mut Graph, dataset: &Term, keyword: &Keyword) {
    let Some(url) = keyword.url.as_deref() else {
        return;
    };
    let concept = Term::iri(url);
    graph.insert(dataset.clone(), DCAT.term("theme"), concept.clone());
    graph.insert(concept.clone(), RDF.term("type"), Term::iri(SKOS.term("Concept")));
    graph.insert(concept.clone(), SKOS.term("prefLabel"), Term::literal(&keyword.name));

    let Some(thesaurus) = &keyword.thesaurus else {
        return;
    };
    if let Some(scheme_url) = thesaurus.url.as_deref() {
        let scheme = Term::iri(scheme_url);
        graph.insert(concept, SKOS.term("inScheme"), scheme.clone());
        graph.insert(scheme.clone(), RDF.term("type"), Term::iri(SKOS.term("ConceptScheme")));
        if let Some(title) = &thesaurus.title {
            graph.insert(scheme, DCT.term("title"), Term::literal(title));
        }
    }
}
