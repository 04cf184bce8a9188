// Bounding box encoders: WKT, GeoJSON and Schema.org geo shapes
use crate::model::BoundingBox;
use crate::{Error, Result};
use serde::Serialize;

/// Closing vertex of a WKT polygon ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RingClosure {
    /// Ring ends on its first vertex (west, south)
    #[default]
    Closed,
    /// Ring ends on (east, north), as older exports of these records did
    Legacy,
}

/// `POINT (w s)` for a degenerate box, otherwise a five-vertex polygon
pub fn to_wkt(bb: &BoundingBox) -> String {
    to_wkt_with(bb, RingClosure::default())
}

pub fn to_wkt_with(bb: &BoundingBox, closure: RingClosure) -> String {
    let (n, s, e, w) = (bb.north(), bb.south(), bb.east(), bb.west());
    if bb.is_point() {
        return format!("POINT ({} {})", w, s);
    }
    let (close_x, close_y) = match closure {
        RingClosure::Closed => (w, s),
        RingClosure::Legacy => (e, n),
    };
    format!(
        "POLYGON (({} {},{} {},{} {},{} {},{} {}))",
        w, s, w, n, e, n, e, s, close_x, close_y
    )
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
enum GeoJson {
    Point { coordinates: [f64; 2] },
    Polygon { coordinates: Vec<Vec<[f64; 2]>> },
}

impl GeoJson {
    fn from_bounding_box(bb: &BoundingBox) -> Self {
        let (n, s, e, w) = (bb.north(), bb.south(), bb.east(), bb.west());
        if bb.is_point() {
            GeoJson::Point { coordinates: [w, s] }
        } else {
            GeoJson::Polygon {
                coordinates: vec![vec![[w, s], [w, n], [e, n], [e, s], [w, s]]],
            }
        }
    }
}

/// Compact GeoJSON geometry with `type` first; polygon rings are always closed
pub fn to_geojson(bb: &BoundingBox) -> Result<String> {
    serde_json::to_string(&GeoJson::from_bounding_box(bb))
        .map_err(|e| Error::GeometryEncoding(e.to_string()))
}

/// Value of a Schema.org `Place`'s `geo` property
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "@type")]
pub enum SchemaOrgGeo {
    GeoCoordinates { latitude: f64, longitude: f64 },
    GeoShape {
        #[serde(rename = "box")]
        shape_box: String,
    },
}

impl SchemaOrgGeo {
    pub fn from_bounding_box(bb: &BoundingBox) -> Self {
        if bb.is_point() {
            SchemaOrgGeo::GeoCoordinates {
                latitude: bb.south(),
                longitude: bb.west(),
            }
        } else {
            SchemaOrgGeo::GeoShape {
                shape_box: format!("{} {} {} {}", bb.south(), bb.west(), bb.north(), bb.east()),
            }
        }
    }
}

#[derive(Serialize)]
struct Place<'a> {
    #[serde(rename = "@type")]
    kind: &'static str,
    geo: &'a SchemaOrgGeo,
}

/// `{"@type":"Place","geo":{...}}`
pub fn to_schema_org_place(bb: &BoundingBox) -> Result<String> {
    let geo = SchemaOrgGeo::from_bounding_box(bb);
    serde_json::to_string(&Place { kind: "Place", geo: &geo })
        .map_err(|e| Error::GeometryEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn point() -> BoundingBox {
        BoundingBox::new(53.945276, 53.945276, -9.577527, -9.577527).unwrap()
    }

    fn biomar() -> BoundingBox {
        BoundingBox::new(55.44532946, 51.42459778, -5.76884641, -10.60604422).unwrap()
    }

    #[test]
    fn test_point_geojson() {
        assert_eq!(
            to_geojson(&point()).unwrap(),
            r#"{"type":"Point","coordinates":[-9.577527,53.945276]}"#
        );
    }

    #[test]
    fn test_polygon_geojson_ring_is_closed() {
        let bb = BoundingBox::new(55.445, 51.425, -5.769, -10.606).unwrap();
        let json: serde_json::Value = serde_json::from_str(&to_geojson(&bb).unwrap()).unwrap();
        assert_eq!(json["type"], "Polygon");

        let ring = json["coordinates"][0].as_array().unwrap();
        assert_eq!(ring.len(), 5);
        assert_eq!(ring[0], serde_json::json!([-10.606, 51.425]));
        assert_eq!(ring[4], ring[0]);
        assert_eq!(ring[2], serde_json::json!([-5.769, 55.445]));
    }

    #[test]
    fn test_polygon_geojson_text() {
        assert_eq!(
            to_geojson(&biomar()).unwrap(),
            "{\"type\":\"Polygon\",\"coordinates\":[[[-10.60604422,51.42459778],[-10.60604422,55.44532946],\
             [-5.76884641,55.44532946],[-5.76884641,51.42459778],[-10.60604422,51.42459778]]]}"
        );
    }

    #[test]
    fn test_point_wkt() {
        assert_eq!(to_wkt(&point()), "POINT (-9.577527 53.945276)");
    }

    #[test]
    fn test_polygon_wkt_closed() {
        assert_eq!(
            to_wkt(&biomar()),
            "POLYGON ((-10.60604422 51.42459778,-10.60604422 55.44532946,-5.76884641 55.44532946,-5.76884641 51.42459778,-10.60604422 51.42459778))"
        );
    }

    #[test]
    fn test_polygon_wkt_legacy() {
        assert_eq!(
            to_wkt_with(&biomar(), RingClosure::Legacy),
            "POLYGON ((-10.60604422 51.42459778,-10.60604422 55.44532946,-5.76884641 55.44532946,-5.76884641 51.42459778,-5.76884641 55.44532946))"
        );
    }

    #[test]
    fn test_legacy_closure_does_not_affect_points() {
        assert_eq!(to_wkt_with(&point(), RingClosure::Legacy), "POINT (-9.577527 53.945276)");
    }

    #[test]
    fn test_schema_org_geo() {
        assert_eq!(
            SchemaOrgGeo::from_bounding_box(&point()),
            SchemaOrgGeo::GeoCoordinates {
                latitude: 53.945276,
                longitude: -9.577527
            }
        );
        assert_eq!(
            SchemaOrgGeo::from_bounding_box(&biomar()),
            SchemaOrgGeo::GeoShape {
                shape_box: "51.42459778 -10.60604422 55.44532946 -5.76884641".to_string()
            }
        );
    }

    #[test]
    fn test_schema_org_place_json() {
        assert_eq!(
            to_schema_org_place(&point()).unwrap(),
            r#"{"@type":"Place","geo":{"@type":"GeoCoordinates","latitude":53.945276,"longitude":-9.577527}}"#
        );
    }

    #[test]
    fn test_one_degree_box_is_polygon() {
        let bb = BoundingBox::new(1.0, 0.0, 1.0, 0.0).unwrap();
        assert!(to_wkt(&bb).starts_with("POLYGON"));
        assert!(to_geojson(&bb).unwrap().contains("\"Polygon\""));
    }
}
