use crate::geometry::{self, RingClosure};
use crate::graph::Term;
use crate::{Error, Result};
use serde::Serialize;
use std::fmt;

// ============================================================================
// Bounding box
// ============================================================================

/// Geographic extent in degrees. No CRS is implied and no range check is made;
/// east may be less than west for boxes crossing the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    north: f64,
    south: f64,
    east: f64,
    west: f64,
}

impl BoundingBox {
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> Result<Self> {
        for (label, value) in [("north", north), ("south", south), ("east", east), ("west", west)] {
            if !value.is_finite() {
                return Err(Error::Construction(format!(
                    "{} bound must be a finite number, got {}",
                    label, value
                )));
            }
        }
        Ok(Self {
            north,
            south,
            east,
            west,
        })
    }

    /// Build from decimal text, e.g. the content of `gco:Decimal` elements
    pub fn from_text(north: &str, south: &str, east: &str, west: &str) -> Result<Self> {
        Self::new(
            parse_decimal("north", north)?,
            parse_decimal("south", south)?,
            parse_decimal("east", east)?,
            parse_decimal("west", west)?,
        )
    }

    #[inline]
    pub fn north(&self) -> f64 {
        self.north
    }

    #[inline]
    pub fn south(&self) -> f64 {
        self.south
    }

    #[inline]
    pub fn east(&self) -> f64 {
        self.east
    }

    #[inline]
    pub fn west(&self) -> f64 {
        self.west
    }

    /// Zero-area boxes are encoded as points
    pub fn is_point(&self) -> bool {
        self.north == self.south && self.east == self.west
    }
}

impl fmt::Display for BoundingBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "north: {}, south: {}, east: {}, west: {}",
            self.north, self.south, self.east, self.west
        )
    }
}

fn parse_decimal(label: &str, text: &str) -> Result<f64> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| Error::Construction(format!("{} bound is not numeric: {:?}", label, text)))
}

// ============================================================================
// Temporal extent, distributions, licenses, keywords
// ============================================================================

/// Opaque date/time strings; a missing end means the dataset is ongoing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TemporalExtent {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// ISO `CI_OnLineFunctionCode` values
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum DistributionFunction {
    Download,
    Information,
    OfflineAccess,
    Order,
    Search,
    Other(String),
}

impl DistributionFunction {
    pub fn from_code(code: &str) -> Self {
        match code {
            "download" => DistributionFunction::Download,
            "information" => DistributionFunction::Information,
            "offlineAccess" => DistributionFunction::OfflineAccess,
            "order" => DistributionFunction::Order,
            "search" => DistributionFunction::Search,
            other => DistributionFunction::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            DistributionFunction::Download => "download",
            DistributionFunction::Information => "information",
            DistributionFunction::OfflineAccess => "offlineAccess",
            DistributionFunction::Order => "order",
            DistributionFunction::Search => "search",
            DistributionFunction::Other(code) => code,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Distribution {
    pub name: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub protocol: Option<String>,
    pub function: Option<DistributionFunction>,
}

impl Distribution {
    /// Name, falling back to the description
    pub fn title(&self) -> Option<&str> {
        self.name.as_deref().or(self.description.as_deref())
    }

    /// Description, falling back to the name
    pub fn summary(&self) -> Option<&str> {
        self.description.as_deref().or(self.name.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct License {
    pub name: String,
    pub url: String,
    pub spdx_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Thesaurus {
    pub title: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Keyword {
    pub name: String,
    pub url: Option<String>,
    pub thesaurus: Option<Thesaurus>,
}

// ============================================================================
// Metadata record
// ============================================================================

/// Normalized metadata for one dataset. Text fields are empty strings when the
/// source has no value for them; nothing distinguishes "not parsed" from "absent".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataRecord {
    pub title: String,
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    pub identifier: String,
    pub base_uri: String,
    pub date_issued: String,
    pub citation: String,
    pub doi: String,
    pub dataset_uri: String,
    pub topic_categories: Vec<String>,
    pub keywords: Vec<Keyword>,
    pub themes: Vec<Keyword>,
    pub variables_measured: Vec<Keyword>,
    pub bounding_box: Option<BoundingBox>,
    pub temporal_extent: Option<TemporalExtent>,
    pub distributions: Vec<Distribution>,
    pub license: Option<License>,
    pub use_limitations: Vec<String>,
}

impl MetadataRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Graph subject: the base URI, or a blank node when the record has none
    pub fn subject(&self) -> Term {
        if self.base_uri.is_empty() {
            Term::blank("dataset")
        } else {
            Term::iri(self.base_uri.as_str())
        }
    }

    pub fn bounding_box_to_wkt(&self) -> Result<String> {
        self.bounding_box_to_wkt_with(RingClosure::default())
    }

    pub fn bounding_box_to_wkt_with(&self, closure: RingClosure) -> Result<String> {
        Ok(geometry::to_wkt_with(self.require_bounding_box()?, closure))
    }

    pub fn bounding_box_to_geojson(&self) -> Result<String> {
        geometry::to_geojson(self.require_bounding_box()?)
    }

    fn require_bounding_box(&self) -> Result<&BoundingBox> {
        self.bounding_box
            .as_ref()
            .ok_or_else(|| Error::GeometryEncoding("record has no bounding box".to_string()))
    }
}
