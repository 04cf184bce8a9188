//! ISO 19139 record extraction
//!
//! Every field is read on its own: a missing or malformed field leaves that
//! field at its default and never stops the rest of the record being read.

use crate::keywords::{self, KeywordHandling, KeywordRule};
use crate::model::*;
use crate::queries::{self, ScalarField};
use crate::xml::{Element, XmlDocument, XLINK};
use crate::{license, Result};
use tracing::{debug, trace};

#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Run the streaming constraint scan when the path query finds no license
    pub license_fallback: bool,
    pub keyword_rules: Vec<KeywordRule>,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            license_fallback: true,
            keyword_rules: keywords::default_rules(),
        }
    }
}

impl ExtractorConfig {
    pub fn with_license_fallback(mut self, enabled: bool) -> Self {
        self.license_fallback = enabled;
        self
    }

    pub fn with_keyword_rules(mut self, rules: Vec<KeywordRule>) -> Self {
        self.keyword_rules = rules;
        self
    }
}

#[derive(Debug, Default)]
struct KeywordGroups {
    keywords: Vec<Keyword>,
    themes: Vec<Keyword>,
    variables_measured: Vec<Keyword>,
}

pub struct Extractor {
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new() -> Self {
        Self::with_config(ExtractorConfig::default())
    }

    pub fn with_config(config: ExtractorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extract without a caller-supplied base URI; the dataset URI is used if present
    pub fn extract(&self, doc: &XmlDocument) -> MetadataRecord {
        self.extract_with_base_uri(doc, "")
    }

    pub fn extract_with_base_uri(&self, doc: &XmlDocument, base_uri: &str) -> MetadataRecord {
        let mut record = MetadataRecord::new();

        for field in ScalarField::ALL {
            match last_text(doc.find_all(field.query())) {
                Ok(Some(text)) => assign_scalar(&mut record, field, text),
                Ok(None) => {}
                Err(e) => debug!(?field, error = %e, "scalar field skipped"),
            }
        }

        record.base_uri = if !base_uri.is_empty() {
            base_uri.to_string()
        } else if is_http_uri(&record.dataset_uri) {
            record.dataset_uri.clone()
        } else {
            String::new()
        };

        if let Some(categories) = isolate("topic_categories", self.topic_categories(doc)) {
            record.topic_categories = categories;
        }

        if let Some(groups) = isolate("keywords", self.keywords(doc)) {
            record.keywords = groups.keywords;
            record.themes = groups.themes;
            record.variables_measured = groups.variables_measured;
        }

        record.bounding_box = isolate("bounding_box", self.bounding_box(doc)).flatten();
        record.temporal_extent = self.temporal_extent(doc);

        if let Some(distributions) = isolate("distributions", self.distributions(doc)) {
            record.distributions = distributions;
        }

        self.apply_constraints(doc, &mut record);

        debug!(
            identifier = %record.identifier,
            keywords = record.keywords.len(),
            distributions = record.distributions.len(),
            has_bounding_box = record.bounding_box.is_some(),
            has_license = record.license.is_some(),
            "record extracted"
        );
        record
    }

    fn topic_categories(&self, doc: &XmlDocument) -> Result<Vec<String>> {
        Ok(doc
            .find_all(queries::TOPIC_CATEGORIES)?
            .into_iter()
            .filter_map(|e| non_empty(e.text()))
            .collect())
    }

    fn keywords(&self, doc: &XmlDocument) -> Result<KeywordGroups> {
        let mut groups = KeywordGroups::default();

        for block in doc.find_all(queries::KEYWORD_BLOCKS)? {
            let thesaurus = thesaurus_of(block);
            let handling = keywords::handling_for(
                &self.config.keyword_rules,
                thesaurus.as_ref().and_then(|t| t.title.as_deref()),
            );

            let target = match handling {
                KeywordHandling::Ignore => {
                    trace!(thesaurus = ?thesaurus, "keyword block ignored");
                    continue;
                }
                KeywordHandling::Keyword => &mut groups.keywords,
                KeywordHandling::Theme => &mut groups.themes,
                KeywordHandling::VariableMeasured => &mut groups.variables_measured,
            };

            for term in block.find_all(queries::KEYWORD)? {
                if let Some(name) = non_empty(term.text()) {
                    target.push(Keyword {
                        name,
                        url: term.attribute(Some(XLINK), "href").and_then(non_empty),
                        thesaurus: thesaurus.clone(),
                    });
                }
            }
        }

        Ok(groups)
    }

    fn bounding_box(&self, doc: &XmlDocument) -> Result<Option<BoundingBox>> {
        let north = last_text(doc.find_all(queries::BOUND_NORTH))?;
        let south = last_text(doc.find_all(queries::BOUND_SOUTH))?;
        let east = last_text(doc.find_all(queries::BOUND_EAST))?;
        let west = last_text(doc.find_all(queries::BOUND_WEST))?;

        if north.is_none() && south.is_none() && east.is_none() && west.is_none() {
            return Ok(None);
        }

        // Individually missing bounds default to zero
        BoundingBox::from_text(
            north.unwrap_or("0.0"),
            south.unwrap_or("0.0"),
            east.unwrap_or("0.0"),
            west.unwrap_or("0.0"),
        )
        .map(Some)
    }

    fn temporal_extent(&self, doc: &XmlDocument) -> Option<TemporalExtent> {
        let start = isolate("temporal_start", last_text(doc.find_all(queries::TEMPORAL_BEGIN)))
            .flatten()
            .and_then(non_empty);
        let end = isolate("temporal_end", last_text(doc.find_all(queries::TEMPORAL_END)))
            .flatten()
            .and_then(non_empty);

        if start.is_none() && end.is_none() {
            None
        } else {
            Some(TemporalExtent { start, end })
        }
    }

    fn distributions(&self, doc: &XmlDocument) -> Result<Vec<Distribution>> {
        Ok(doc
            .find_all(queries::ONLINE_RESOURCES)?
            .into_iter()
            .map(|resource| Distribution {
                name: child_text(resource, queries::NAME),
                description: child_text(resource, queries::DESCRIPTION),
                url: child_text(resource, queries::LINKAGE),
                protocol: child_text(resource, queries::PROTOCOL),
                function: function_code(resource).map(|code| DistributionFunction::from_code(&code)),
            })
            .collect())
    }

    fn apply_constraints(&self, doc: &XmlDocument, record: &mut MetadataRecord) {
        match doc.find_all(queries::USE_LIMITATIONS) {
            Ok(found) => {
                for element in found {
                    classify_limitation(element.text().trim(), record);
                }
            }
            Err(e) => debug!(error = %e, "use limitation query failed"),
        }

        if record.license.is_some() || !self.config.license_fallback {
            return;
        }

        // The path query misses constraints outside MD_Constraints, e.g. in
        // MD_LegalConstraints or otherConstraints, so scan the raw events instead
        match doc.scan_texts(queries::CONSTRAINT_TEXT_ELEMENTS) {
            Ok(texts) => {
                for text in texts {
                    if record.use_limitations.contains(&text) {
                        continue;
                    }
                    classify_limitation(&text, record);
                }
            }
            Err(e) => debug!(error = %e, "constraint scan failed"),
        }
    }
}

impl Default for Extractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Log and absorb a failed field so the rest of the record is still read
fn isolate<T>(field: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            debug!(field, error = %e, "field extraction failed, keeping default");
            None
        }
    }
}

/// Last match wins
fn last_text(found: Result<Vec<&Element>>) -> Result<Option<&str>> {
    Ok(found?.last().copied().map(Element::text))
}

fn non_empty(text: &str) -> Option<String> {
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

fn child_text(element: &Element, query: &str) -> Option<String> {
    isolate(query, last_text(element.find_all(query)))
        .flatten()
        .and_then(non_empty)
}

fn function_code(resource: &Element) -> Option<String> {
    let found = isolate(queries::FUNCTION, resource.find_all(queries::FUNCTION))?;
    let code = found.last()?;
    code.attribute(None, "codeListValue")
        .and_then(non_empty)
        .or_else(|| non_empty(code.text()))
}

fn thesaurus_of(block: &Element) -> Option<Thesaurus> {
    let found = isolate(queries::THESAURUS_TITLE, block.find_all(queries::THESAURUS_TITLE))?;
    let title = found.last()?;
    let thesaurus = Thesaurus {
        title: non_empty(title.text()),
        url: title.attribute(Some(XLINK), "href").and_then(non_empty),
    };
    if thesaurus.title.is_none() && thesaurus.url.is_none() {
        None
    } else {
        Some(thesaurus)
    }
}

fn assign_scalar(record: &mut MetadataRecord, field: ScalarField, text: &str) {
    match field {
        ScalarField::Title => record.title = text.trim().to_string(),
        ScalarField::Abstract => record.abstract_text = normalize_abstract(text),
        ScalarField::Identifier => record.identifier = text.trim().to_string(),
        ScalarField::DateIssued => record.date_issued = text.trim().to_string(),
        ScalarField::Citation => record.citation = text.trim().to_string(),
        ScalarField::Doi => record.doi = normalize_doi(text),
        ScalarField::DatasetUri => {
            record.dataset_uri = text.trim().to_string();
            // ISDE records carry the DOI here; it overrides the citation identifier
            let doi = normalize_doi(text);
            if !doi.is_empty() {
                record.doi = doi;
            }
        }
    }
}

fn is_http_uri(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Trim, then collapse each run of line breaks into one space
fn normalize_abstract(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_break = false;
    for ch in text.trim().chars() {
        if ch == '\n' || ch == '\r' {
            if !in_break {
                out.push(' ');
                in_break = true;
            }
        } else {
            out.push(ch);
            in_break = false;
        }
    }
    out
}

const DOI_PREFIXES: &[&str] = &[
    "https://doi.org/",
    "http://doi.org/",
    "https://dx.doi.org/",
    "http://dx.doi.org/",
    "doi:",
];

/// Bare `10.xxxx/...` form, or empty when the text is not a DOI
fn normalize_doi(text: &str) -> String {
    let text = text.trim();
    let bare = DOI_PREFIXES
        .iter()
        .find_map(|prefix| text.strip_prefix(prefix))
        .unwrap_or(text);
    if bare.starts_with("10.") {
        bare.to_string()
    } else {
        String::new()
    }
}

/// Known license labels become the record license (first one wins); any other
/// text is kept verbatim as a use limitation
fn classify_limitation(text: &str, record: &mut MetadataRecord) {
    if text.is_empty() {
        return;
    }
    match license::match_label(text) {
        Some(found) => {
            if record.license.is_none() {
                record.license = Some(found);
            } else {
                debug!(label = text, "second license label ignored");
            }
        }
        None => record.use_limitations.push(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MARINE: &str = include_str!("../fixtures/ie_marine_data_dataset_3757.xml");
    const BIOMAR: &str = include_str!("../fixtures/ie_nbdc_dataset_biomar.xml");

    fn wrap(identification: &str) -> String {
        format!(
            r#"<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd"
                 xmlns:gco="http://www.isotc211.org/2005/gco">
  <gmd:fileIdentifier><gco:CharacterString>test-record</gco:CharacterString></gmd:fileIdentifier>
  <gmd:identificationInfo>
    <gmd:MD_DataIdentification>
      {}
    </gmd:MD_DataIdentification>
  </gmd:identificationInfo>
</gmd:MD_Metadata>"#,
            identification
        )
    }

    fn extract(xml: &str) -> MetadataRecord {
        let doc = XmlDocument::parse(xml).unwrap();
        Extractor::new().extract(&doc)
    }

    #[test]
    fn test_marine_institute_scalars() {
        let doc = XmlDocument::parse(MARINE).unwrap();
        let record = Extractor::new().extract_with_base_uri(&doc, "https://example.org/3757");

        assert_eq!(
            record.title,
            "Water quality and meteorological data from the Lough Feeagh Automatic Water Quality Monitoring Station (AWQMS), 2004-2019"
        );
        assert_eq!(record.identifier, "ie.marine.data:dataset.3757");
        assert_eq!(record.date_issued, "2020-03-04T10:15:00");
        assert_eq!(record.doi, "10.20393/ms.3757");
        assert_eq!(record.base_uri, "https://example.org/3757");
        assert!(record.citation.starts_with("Marine Institute (2020)"));
        assert!(!record.abstract_text.contains('\n'));
        assert!(record.abstract_text.starts_with("The Automatic Water Quality Monitoring Station"));
    }

    #[test]
    fn test_marine_institute_point_bounding_box() {
        let record = extract(MARINE);
        let bb = record.bounding_box.unwrap();
        assert_eq!(bb.north(), 53.945276);
        assert_eq!(bb.south(), 53.945276);
        assert_eq!(bb.east(), -9.577527);
        assert_eq!(bb.west(), -9.577527);
        assert!(bb.is_point());
    }

    #[test]
    fn test_topic_categories_keep_document_order() {
        let record = extract(MARINE);
        assert_eq!(
            record.topic_categories,
            vec!["oceans", "geoscientificInformation", "environment", "biota"]
        );
    }

    #[test]
    fn test_keyword_blocks_follow_rules() {
        let record = extract(MARINE);

        let names: Vec<&str> = record.keywords.iter().map(|k| k.name.as_str()).collect();
        assert_eq!(names, vec!["Lough Feeagh", "Burrishoole"]);
        assert!(record.keywords[0].thesaurus.is_none());

        assert_eq!(record.themes.len(), 1);
        assert_eq!(record.themes[0].name, "oceans");
        assert_eq!(
            record.themes[0].url.as_deref(),
            Some("http://vocab.nerc.ac.uk/collection/P05/current/008/")
        );
        let thesaurus = record.themes[0].thesaurus.as_ref().unwrap();
        assert_eq!(thesaurus.url.as_deref(), Some("http://vocab.nerc.ac.uk/collection/P05/current/"));

        assert_eq!(record.variables_measured.len(), 1);
        assert_eq!(record.variables_measured[0].name, "Temperature of the water body");

        // Calendar block is dropped
        assert!(record.keywords.iter().all(|k| k.name != "2019"));
    }

    #[test]
    fn test_custom_keyword_rules() {
        let doc = XmlDocument::parse(MARINE).unwrap();
        let config = ExtractorConfig::default().with_keyword_rules(Vec::new());
        let record = Extractor::with_config(config).extract(&doc);
        assert!(record.themes.is_empty());
        assert!(record.variables_measured.is_empty());
        assert_eq!(record.keywords.len(), 5);
    }

    #[test]
    fn test_temporal_extent() {
        let record = extract(MARINE);
        let temporal = record.temporal_extent.unwrap();
        assert_eq!(temporal.start.as_deref(), Some("2004-01-01T00:00:00"));
        assert_eq!(temporal.end.as_deref(), Some("2019-12-31T23:59:59"));
    }

    #[test]
    fn test_distributions_in_order() {
        let record = extract(MARINE);
        assert_eq!(record.distributions.len(), 2);

        let download = &record.distributions[0];
        assert_eq!(download.protocol.as_deref(), Some("WWW:DOWNLOAD-1.0-http--download"));
        assert_eq!(download.function, Some(DistributionFunction::Download));
        assert_eq!(
            download.url.as_deref(),
            Some("https://erddap.marine.ie/erddap/tabledap/IMI_EPA_Feeagh.csv")
        );
        assert_eq!(download.name.as_deref(), Some("Lough Feeagh AWQMS data (CSV)"));
        assert!(download.description.is_none());

        let info = &record.distributions[1];
        assert!(info.name.is_none());
        assert_eq!(info.function, Some(DistributionFunction::Information));
        assert_eq!(info.description.as_deref(), Some("Burrishoole research facility"));
    }

    #[test]
    fn test_license_from_use_limitation() {
        let record = extract(MARINE);
        let license = record.license.unwrap();
        assert_eq!(license.spdx_url, "https://spdx.org/licenses/CC-BY-4.0");
        assert_eq!(record.use_limitations, vec!["Not to be used for navigation"]);
    }

    #[test]
    fn test_biomar_polygon_and_gml31_temporal() {
        let record = extract(BIOMAR);
        assert_eq!(
            record.bounding_box,
            Some(BoundingBox::new(55.44532946, 51.42459778, -5.76884641, -10.60604422).unwrap())
        );
        let temporal = record.temporal_extent.unwrap();
        assert_eq!(temporal.start.as_deref(), Some("1993-01-01T00:00:00"));
        assert_eq!(temporal.end.as_deref(), Some("1996-12-31T00:00:00"));
        assert_eq!(record.date_issued, "2019-06-20");
        assert!(record.doi.is_empty());
    }

    #[test]
    fn test_license_fallback_scan() {
        let record = extract(BIOMAR);
        let license = record.license.unwrap();
        assert_eq!(license.spdx_url, "https://spdx.org/licenses/CC-BY-NC-4.0");
        assert_eq!(
            record.use_limitations,
            vec![
                "Acknowledge the National Biodiversity Data Centre",
                "https://www.biodiversityireland.ie/terms-of-use/"
            ]
        );
    }

    #[test]
    fn test_license_fallback_disabled() {
        let doc = XmlDocument::parse(BIOMAR).unwrap();
        let config = ExtractorConfig::default().with_license_fallback(false);
        let record = Extractor::with_config(config).extract(&doc);
        assert!(record.license.is_none());
        assert!(record.use_limitations.is_empty());
    }

    #[test]
    fn test_base_uri_falls_back_to_dataset_uri() {
        let record = extract(BIOMAR);
        assert_eq!(record.base_uri, "https://www.isde.ie/geonetwork/srv/api/records/ie.nbdc.dataset.BioMar");
    }

    #[test]
    fn test_missing_abstract_is_empty() {
        let record = extract(&wrap(
            r#"<gmd:citation><gmd:CI_Citation><gmd:title><gco:CharacterString>Only a title</gco:CharacterString></gmd:title></gmd:CI_Citation></gmd:citation>"#,
        ));
        assert_eq!(record.abstract_text, "");
        assert_eq!(record.title, "Only a title");
        assert_eq!(record.identifier, "test-record");
    }

    #[test]
    fn test_last_match_wins() {
        let record = extract(&wrap(
            r#"<gmd:citation><gmd:CI_Citation>
                 <gmd:title><gco:CharacterString>First</gco:CharacterString></gmd:title>
                 <gmd:title><gco:CharacterString>Second</gco:CharacterString></gmd:title>
               </gmd:CI_Citation></gmd:citation>"#,
        ));
        assert_eq!(record.title, "Second");
    }

    #[test]
    fn test_abstract_normalization() {
        let record = extract(&wrap(
            "<gmd:abstract><gco:CharacterString>\n  Line one\r\n\r\nline two\nline three  </gco:CharacterString></gmd:abstract>",
        ));
        assert_eq!(record.abstract_text, "Line one line two line three");
    }

    #[test]
    fn test_malformed_bound_is_absorbed() {
        let record = extract(&wrap(
            r#"<gmd:citation><gmd:CI_Citation><gmd:title><gco:CharacterString>Still here</gco:CharacterString></gmd:title></gmd:CI_Citation></gmd:citation>
               <gmd:extent><gmd:EX_Extent><gmd:geographicElement><gmd:EX_GeographicBoundingBox>
                 <gmd:westBoundLongitude><gco:Decimal>-10.5</gco:Decimal></gmd:westBoundLongitude>
                 <gmd:eastBoundLongitude><gco:Decimal>-5.5</gco:Decimal></gmd:eastBoundLongitude>
                 <gmd:southBoundLatitude><gco:Decimal>fifty one</gco:Decimal></gmd:southBoundLatitude>
                 <gmd:northBoundLatitude><gco:Decimal>55.5</gco:Decimal></gmd:northBoundLatitude>
               </gmd:EX_GeographicBoundingBox></gmd:geographicElement></gmd:EX_Extent></gmd:extent>"#,
        ));
        assert!(record.bounding_box.is_none());
        assert_eq!(record.title, "Still here");
    }

    #[test]
    fn test_missing_bound_defaults_to_zero() {
        let record = extract(&wrap(
            r#"<gmd:extent><gmd:EX_Extent><gmd:geographicElement><gmd:EX_GeographicBoundingBox>
                 <gmd:northBoundLatitude><gco:Decimal>55.5</gco:Decimal></gmd:northBoundLatitude>
               </gmd:EX_GeographicBoundingBox></gmd:geographicElement></gmd:EX_Extent></gmd:extent>"#,
        ));
        assert_eq!(record.bounding_box, Some(BoundingBox::new(55.5, 0.0, 0.0, 0.0).unwrap()));
    }

    #[test]
    fn test_empty_document_yields_empty_record() {
        let record = extract(&wrap(""));
        assert_eq!(record.identifier, "test-record");
        assert!(record.bounding_box.is_none());
        assert!(record.temporal_extent.is_none());
        assert!(record.distributions.is_empty());
        assert!(record.license.is_none());
        assert_eq!(record.base_uri, "");
    }

    #[test]
    fn test_open_ended_temporal_extent() {
        let record = extract(&wrap(
            r#"<gmd:extent><gmd:EX_Extent><gmd:temporalElement><gmd:EX_TemporalExtent><gmd:extent>
                 <gml:TimePeriod xmlns:gml="http://www.opengis.net/gml/3.2">
                   <gml:beginPosition>2010-05-01</gml:beginPosition>
                   <gml:endPosition indeterminatePosition="now"/>
                 </gml:TimePeriod>
               </gmd:extent></gmd:EX_TemporalExtent></gmd:temporalElement></gmd:EX_Extent></gmd:extent>"#,
        ));
        let temporal = record.temporal_extent.unwrap();
        assert_eq!(temporal.start.as_deref(), Some("2010-05-01"));
        assert!(temporal.end.is_none());
    }

    #[test]
    fn test_first_license_wins() {
        let record = extract(&wrap(
            r#"<gmd:resourceConstraints><gmd:MD_Constraints>
                 <gmd:useLimitation><gco:CharacterString>Creative Commons CC-BY 3.0</gco:CharacterString></gmd:useLimitation>
                 <gmd:useLimitation><gco:CharacterString>Creative Commons CC-BY 4.0</gco:CharacterString></gmd:useLimitation>
               </gmd:MD_Constraints></gmd:resourceConstraints>"#,
        ));
        assert_eq!(record.license.unwrap().spdx_url, "https://spdx.org/licenses/CC-BY-3.0");
        assert!(record.use_limitations.is_empty());
    }

    #[test]
    fn test_doi_from_dataset_uri() {
        let record = extract(&format!(
            r#"<gmd:MD_Metadata xmlns:gmd="http://www.isotc211.org/2005/gmd"
                 xmlns:gco="http://www.isotc211.org/2005/gco">
  <gmd:dataSetURI><gco:CharacterString>10.20393/edd58462-ae36-44b2-bf36-0ef06c6e8357</gco:CharacterString></gmd:dataSetURI>
  {}
</gmd:MD_Metadata>"#,
            r#"<gmd:identificationInfo><gmd:MD_DataIdentification><gmd:citation><gmd:CI_Citation>
                 <gmd:identifier><gmd:MD_Identifier><gmd:code><gco:CharacterString>doi:10.1000/older</gco:CharacterString></gmd:code></gmd:MD_Identifier></gmd:identifier>
               </gmd:CI_Citation></gmd:citation></gmd:MD_DataIdentification></gmd:identificationInfo>"#
        ));
        assert_eq!(record.doi, "10.20393/edd58462-ae36-44b2-bf36-0ef06c6e8357");
        assert_eq!(record.dataset_uri, "10.20393/edd58462-ae36-44b2-bf36-0ef06c6e8357");
        // A bare DOI is not an IRI, so it never becomes the subject
        assert_eq!(record.base_uri, "");
    }

    #[test]
    fn test_doi_url_in_dataset_uri_is_also_base_uri() {
        let record = extract(&wrap(
            "<gmd:dataSetURI><gco:CharacterString>https://doi.org/10.20393/ms.3757</gco:CharacterString></gmd:dataSetURI>",
        ));
        assert_eq!(record.doi, "10.20393/ms.3757");
        assert_eq!(record.base_uri, "https://doi.org/10.20393/ms.3757");
    }

    #[test]
    fn test_citation_identifier_doi_kept_when_dataset_uri_is_not_a_doi() {
        let record = extract(MARINE);
        assert_eq!(record.doi, "10.20393/ms.3757");
        assert!(record.dataset_uri.starts_with("https://data.marine.ie/"));
    }

    #[test]
    fn test_license_found_skips_constraint_scan() {
        let record = extract(&wrap(
            r#"<gmd:resourceConstraints><gmd:MD_Constraints>
                 <gmd:useLimitation><gco:CharacterString>Creative Commons CC-BY 4.0</gco:CharacterString></gmd:useLimitation>
               </gmd:MD_Constraints></gmd:resourceConstraints>
               <gmd:resourceConstraints><gmd:MD_LegalConstraints>
                 <gmd:otherConstraints><gco:CharacterString>Cite the data provider</gco:CharacterString></gmd:otherConstraints>
                 <gmd:useLimitation><gco:CharacterString>Creative Commons CC-BY-NC 4.0</gco:CharacterString></gmd:useLimitation>
               </gmd:MD_LegalConstraints></gmd:resourceConstraints>"#,
        ));
        assert_eq!(record.license.unwrap().spdx_url, "https://spdx.org/licenses/CC-BY-4.0");
        assert!(record.use_limitations.is_empty());
    }

    #[test]
    fn test_normalize_doi() {
        assert_eq!(normalize_doi("https://doi.org/10.1000/xyz"), "10.1000/xyz");
        assert_eq!(normalize_doi(" doi:10.1000/xyz "), "10.1000/xyz");
        assert_eq!(normalize_doi("10.1000/xyz"), "10.1000/xyz");
        assert_eq!(normalize_doi("ie.nbdc.dataset.BioMar"), "");
    }

    #[test]
    fn test_ignore_rule_is_configurable() {
        let doc = XmlDocument::parse(MARINE).unwrap();
        let rules = vec![KeywordRule::new("BODC Parameter Usage Vocabulary", KeywordHandling::Ignore)];
        let record = Extractor::with_config(ExtractorConfig::default().with_keyword_rules(rules)).extract(&doc);
        assert!(record.variables_measured.is_empty());
        assert!(record.keywords.iter().all(|k| k.name != "Temperature of the water body"));
    }
}
