//! Boundary dataset: GeoJSON feature collections and TopoJSON topologies.
//!
//! Both layouts reduce to a flat list of [`BoundaryFeature`]s carrying the
//! numeric country code, an optional display name and the outline. Features
//! whose geometry is missing or not areal keep `geometry: None`; the catalog
//! builder decides what to do with them.
//!
//! Feature collections go through the `geojson` crate. Topologies are not
//! GeoJSON, so their arcs are decoded and stitched here.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use geo_types::{Coord, LineString, Polygon};
use geojson::{Feature, GeoJson, Position, Value as Shape, feature::Id};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::reference::parse_numeric_code;
use crate::error::DatasetError;
use crate::geo::Outline;

/// Object name used by `world-atlas` topologies.
const DEFAULT_OBJECT: &str = "countries";

/// One outline from the boundary dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryFeature {
    /// Numeric country code used to join with the reference dataset.
    pub numeric_code: Option<i32>,
    /// Display name carried by the boundary dataset.
    pub name: Option<String>,
    /// Polygon or multipolygon outline.
    pub geometry: Option<Outline>,
}

#[derive(Debug, Deserialize)]
struct TopologyDoc {
    #[serde(default)]
    transform: Option<TransformDoc>,
    arcs: Vec<Vec<Vec<f64>>>,
    objects: BTreeMap<String, TopoGeometryDoc>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct TransformDoc {
    scale: [f64; 2],
    translate: [f64; 2],
}

/// TopoJSON geometry object. `arcs` changes shape with `type`, so it is
/// decoded after the type is known.
#[derive(Debug, Deserialize)]
struct TopoGeometryDoc {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    arcs: Option<Value>,
    #[serde(default)]
    geometries: Vec<TopoGeometryDoc>,
    #[serde(default)]
    id: Option<TopoId>,
    #[serde(default)]
    properties: Option<TopoProperties>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TopoId {
    Number(f64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
struct TopoProperties {
    #[serde(default)]
    name: Option<String>,
}

/// Parse a boundary dataset from JSON text (GeoJSON or TopoJSON).
///
/// # Errors
///
/// Returns an error if the text is not one of the two layouts or a
/// topology references arcs that do not exist.
pub fn parse_boundaries(json: &str) -> Result<Vec<BoundaryFeature>, DatasetError> {
    let value: Value = serde_json::from_str(json).map_err(|source| DatasetError::Json {
        context: "boundary features".to_string(),
        source,
    })?;
    document_features(value, "boundary features")
}

/// Read and parse a boundary dataset.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_boundaries(path: &Path) -> Result<Vec<BoundaryFeature>, DatasetError> {
    let text = fs::read_to_string(path).map_err(|source| DatasetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let context = path.display().to_string();
    let value: Value = serde_json::from_str(&text).map_err(|source| DatasetError::Json {
        context: context.clone(),
        source,
    })?;
    document_features(value, &context)
}

fn document_features(value: Value, context: &str) -> Result<Vec<BoundaryFeature>, DatasetError> {
    if value.get("type").and_then(Value::as_str) == Some("Topology") {
        let topology: TopologyDoc =
            serde_json::from_value(value).map_err(|source| DatasetError::Json {
                context: context.to_string(),
                source,
            })?;
        return topology_features(&topology);
    }

    let geojson = GeoJson::from_json_value(value).map_err(|source| DatasetError::GeoJson {
        context: context.to_string(),
        source: Box::new(source),
    })?;
    match geojson {
        GeoJson::FeatureCollection(collection) => collection
            .features
            .into_iter()
            .map(|feature| geojson_feature(feature, context))
            .collect(),
        GeoJson::Feature(_) => Err(DatasetError::Layout("single feature".to_string())),
        GeoJson::Geometry(_) => Err(DatasetError::Layout("bare geometry".to_string())),
    }
}

fn geojson_feature(feature: Feature, context: &str) -> Result<BoundaryFeature, DatasetError> {
    let numeric_code = match &feature.id {
        Some(Id::Number(number)) => number.as_f64().and_then(integral_code),
        Some(Id::String(text)) => parse_numeric_code(text),
        None => None,
    };
    let name = feature
        .property("name")
        .and_then(Value::as_str)
        .map(str::to_string);
    let geometry = match feature.geometry {
        Some(geometry) => outline(geometry.value).map_err(|source| DatasetError::GeoJson {
            context: context.to_string(),
            source: Box::new(source),
        })?,
        None => None,
    };

    Ok(BoundaryFeature {
        numeric_code,
        name,
        geometry,
    })
}

/// Areal GeoJSON geometry as an outline; anything else has none.
fn outline(mut shape: Shape) -> Result<Option<Outline>, geojson::Error> {
    drop_short_positions(&mut shape);
    match shape {
        Shape::Polygon(_) => Polygon::<f64>::try_from(shape).map(|p| Some(Outline::from(p))),
        Shape::MultiPolygon(_) => Outline::try_from(shape).map(Some),
        _ => {
            debug!("ignoring non-areal geometry");
            Ok(None)
        }
    }
}

/// Positions need a longitude and a latitude; shorter ones are dropped.
fn drop_short_positions(shape: &mut Shape) {
    let keep = |ring: &mut Vec<Position>| ring.retain(|p| p.len() >= 2);
    match shape {
        Shape::Polygon(rings) => rings.iter_mut().for_each(keep),
        Shape::MultiPolygon(polygons) => polygons.iter_mut().flatten().for_each(keep),
        _ => {}
    }
}

fn integral_code(n: f64) -> Option<i32> {
    if n.is_finite() && n.fract().abs() < f64::EPSILON {
        #[allow(clippy::cast_possible_truncation)]
        Some(n as i32)
    } else {
        None
    }
}

impl TopoId {
    fn numeric_code(&self) -> Option<i32> {
        match self {
            Self::Number(n) => integral_code(*n),
            Self::Text(text) => parse_numeric_code(text),
        }
    }
}

fn topology_features(topology: &TopologyDoc) -> Result<Vec<BoundaryFeature>, DatasetError> {
    let arcs = decode_arcs(&topology.arcs, topology.transform);
    let object = topology
        .objects
        .get(DEFAULT_OBJECT)
        .or_else(|| topology.objects.values().next())
        .ok_or_else(|| DatasetError::Topology("topology has no objects".to_string()))?;

    let mut features = Vec::new();
    topo_features(object, &arcs, &mut features)?;
    Ok(features)
}

/// Absolute coordinates for every arc, undoing quantization and delta
/// encoding when the topology carries a transform.
fn decode_arcs(arcs: &[Vec<Vec<f64>>], transform: Option<TransformDoc>) -> Vec<Vec<Coord<f64>>> {
    arcs.iter()
        .map(|arc| {
            let positions = arc.iter().filter(|p| p.len() >= 2);
            match transform {
                Some(TransformDoc { scale, translate }) => {
                    let (mut x, mut y) = (0.0, 0.0);
                    positions
                        .map(|p| {
                            x += p[0];
                            y += p[1];
                            Coord {
                                x: x * scale[0] + translate[0],
                                y: y * scale[1] + translate[1],
                            }
                        })
                        .collect()
                }
                None => positions.map(|p| Coord { x: p[0], y: p[1] }).collect(),
            }
        })
        .collect()
}

fn topo_features(
    object: &TopoGeometryDoc,
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<BoundaryFeature>,
) -> Result<(), DatasetError> {
    let geometry = match (object.kind.as_deref(), &object.arcs) {
        (Some("GeometryCollection"), _) => {
            for child in &object.geometries {
                topo_features(child, arcs, out)?;
            }
            return Ok(());
        }
        (Some("Polygon"), Some(value)) => {
            let rings: Vec<Vec<i64>> = arcs_value(value)?;
            Some(Outline::from(stitch_polygon(&rings, arcs)?))
        }
        (Some("MultiPolygon"), Some(value)) => {
            let polygons: Vec<Vec<Vec<i64>>> = arcs_value(value)?;
            Some(
                polygons
                    .iter()
                    .map(|rings| stitch_polygon(rings, arcs))
                    .collect::<Result<Vec<_>, _>>()?
                    .into(),
            )
        }
        _ => None,
    };

    out.push(BoundaryFeature {
        numeric_code: object.id.as_ref().and_then(TopoId::numeric_code),
        name: object.properties.as_ref().and_then(|p| p.name.clone()),
        geometry,
    });
    Ok(())
}

fn arcs_value<T: serde::de::DeserializeOwned>(value: &Value) -> Result<T, DatasetError> {
    T::deserialize(value).map_err(|e| DatasetError::Topology(format!("malformed arcs: {e}")))
}

fn stitch_polygon(
    rings: &[Vec<i64>],
    arcs: &[Vec<Coord<f64>>],
) -> Result<Polygon<f64>, DatasetError> {
    let mut rings = rings
        .iter()
        .map(|ring| stitch_ring(ring, arcs))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_else(|| LineString(Vec::new()));
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Join arcs into one ring. Consecutive arcs share an endpoint, which is
/// kept once; a negative index `!i` walks arc `i` backwards.
fn stitch_ring(indices: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>, DatasetError> {
    let mut points: Vec<Coord<f64>> = Vec::new();

    for &index in indices {
        let (arc_index, reversed) = if index < 0 { (!index, true) } else { (index, false) };
        let arc = usize::try_from(arc_index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or_else(|| DatasetError::Topology(format!("arc {index} out of range")))?;

        points.pop();
        let start = points.len();
        points.extend_from_slice(arc);
        if reversed {
            points[start..].reverse();
        }
    }

    // Rings need four positions; pad degenerate ones.
    if let Some(&first) = points.first() {
        while points.len() < 4 {
            points.push(first);
        }
    }

    Ok(LineString(points))
}
