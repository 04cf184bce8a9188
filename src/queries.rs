// Fixed path queries into an ISO 19139 record
//
// Queries starting with `.//` run from the document node, those starting with
// `./` run relative to an element selected by another query.

pub const TITLE: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:citation/gmd:CI_Citation/gmd:title/gco:CharacterString";

pub const ABSTRACT: &str =
    ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:abstract/gco:CharacterString";

pub const FILE_IDENTIFIER: &str = ".//gmd:fileIdentifier/gco:CharacterString";

// gco:Date or gco:DateTime
pub const DATE_STAMP: &str = ".//gmd:dateStamp/*";

pub const CITATION: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:citation/gmd:CI_Citation/gmd:otherCitationDetails/gco:CharacterString";

// Secondary DOI source, overridden by a DOI in gmd:dataSetURI.
// MD_Identifier or RS_Identifier, code as CharacterString or Anchor
pub const DOI: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:citation/gmd:CI_Citation/gmd:identifier/*/gmd:code/*";

pub const DATASET_URI: &str = ".//gmd:dataSetURI/gco:CharacterString";

pub const BOUND_NORTH: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:geographicElement/gmd:EX_GeographicBoundingBox/gmd:northBoundLatitude/gco:Decimal";
pub const BOUND_SOUTH: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:geographicElement/gmd:EX_GeographicBoundingBox/gmd:southBoundLatitude/gco:Decimal";
pub const BOUND_EAST: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:geographicElement/gmd:EX_GeographicBoundingBox/gmd:eastBoundLongitude/gco:Decimal";
pub const BOUND_WEST: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:geographicElement/gmd:EX_GeographicBoundingBox/gmd:westBoundLongitude/gco:Decimal";

pub const TOPIC_CATEGORIES: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:topicCategory/gmd:MD_TopicCategoryCode";

// TimePeriod and its positions come in either GML namespace, so they are matched by local name
pub const TEMPORAL_BEGIN: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:temporalElement/gmd:EX_TemporalExtent/gmd:extent/*/beginPosition";
pub const TEMPORAL_END: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:extent/gmd:EX_Extent/gmd:temporalElement/gmd:EX_TemporalExtent/gmd:extent/*/endPosition";

pub const USE_LIMITATIONS: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:resourceConstraints/gmd:MD_Constraints/gmd:useLimitation/gco:CharacterString";

// Local names picked up by the streaming license scan
pub const CONSTRAINT_TEXT_ELEMENTS: &[&str] = &["useLimitation", "otherConstraints"];

pub const KEYWORD_BLOCKS: &str = ".//gmd:identificationInfo/gmd:MD_DataIdentification/gmd:descriptiveKeywords/gmd:MD_Keywords";

// Relative to gmd:MD_Keywords
pub const KEYWORD: &str = "./gmd:keyword/*";
pub const THESAURUS_TITLE: &str = "./gmd:thesaurusName/gmd:CI_Citation/gmd:title/*";

pub const ONLINE_RESOURCES: &str = ".//gmd:distributionInfo/gmd:MD_Distribution/gmd:transferOptions/gmd:MD_DigitalTransferOptions/gmd:onLine/gmd:CI_OnlineResource";

// Relative to gmd:CI_OnlineResource
pub const LINKAGE: &str = "./gmd:linkage/gmd:URL";
pub const PROTOCOL: &str = "./gmd:protocol/*";
pub const NAME: &str = "./gmd:name/*";
pub const DESCRIPTION: &str = "./gmd:description/*";
pub const FUNCTION: &str = "./gmd:function/gmd:CI_OnLineFunctionCode";

/// Scalar text fields and the query each one is read from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalarField {
    Title,
    Abstract,
    Identifier,
    DateIssued,
    Citation,
    Doi,
    DatasetUri,
}

impl ScalarField {
    pub const ALL: [ScalarField; 7] = [
        ScalarField::Title,
        ScalarField::Abstract,
        ScalarField::Identifier,
        ScalarField::DateIssued,
        ScalarField::Citation,
        ScalarField::Doi,
        ScalarField::DatasetUri,
    ];

    pub fn query(self) -> &'static str {
        match self {
            ScalarField::Title => TITLE,
            ScalarField::Abstract => ABSTRACT,
            ScalarField::Identifier => FILE_IDENTIFIER,
            ScalarField::DateIssued => DATE_STAMP,
            ScalarField::Citation => CITATION,
            ScalarField::Doi => DOI,
            ScalarField::DatasetUri => DATASET_URI,
        }
    }
}
