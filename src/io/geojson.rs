//! GeoJSON `FeatureCollection` export and import of shape collections.
//!
//! Each shape becomes one `Feature`. Its `properties` object carries the
//! shape's opaque properties plus the reserved keys `id`, `shapeType` and,
//! for circles, `radius`. Reserved keys win over opaque ones of the same name.

use geo::{Coord, Geometry, LineString, MultiPolygon, Point, Polygon};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{FormatError, Result};
use crate::geometry::{Shape, ShapeId, ShapeKind};

const ID_KEY: &str = "id";
const KIND_KEY: &str = "shapeType";
const RADIUS_KEY: &str = "radius";

/// A GeoJSON position. Ordinates past the second (altitude) are ignored on
/// import.
type Position = Vec<f64>;

/// The subset of GeoJSON geometry objects shapes can hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GeoJsonGeometry {
    Point { coordinates: Position },
    LineString { coordinates: Vec<Position> },
    Polygon { coordinates: Vec<Vec<Position>> },
    MultiPolygon { coordinates: Vec<Vec<Vec<Position>>> },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum FeatureTag {
    Feature,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum CollectionTag {
    FeatureCollection,
}

/// A single GeoJSON feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(rename = "type")]
    tag: FeatureTag,
    pub geometry: GeoJsonGeometry,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// A GeoJSON feature collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    tag: CollectionTag,
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Builds a collection from shapes, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::UnsupportedGeometry` if a shape holds a geometry
    /// GeoJSON export does not cover.
    pub fn from_shapes(shapes: &[Shape]) -> Result<Self> {
        let features = shapes
            .iter()
            .map(Feature::from_shape)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            tag: CollectionTag::FeatureCollection,
            features,
        })
    }

    /// Converts every feature back into a shape.
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` for the first feature that is not a valid shape.
    pub fn into_shapes(self) -> Result<Vec<Shape>> {
        self.features.into_iter().map(Feature::into_shape).collect()
    }
}

impl Feature {
    /// Encodes one shape.
    ///
    /// # Errors
    ///
    /// Returns `FormatError::UnsupportedGeometry` for geometries other than
    /// points, line strings, polygons and multipolygons.
    pub fn from_shape(shape: &Shape) -> Result<Self> {
        let mut properties = shape.properties.clone();
        properties.insert(ID_KEY.to_owned(), Value::from(shape.id.as_str()));
        properties.insert(KIND_KEY.to_owned(), Value::from(shape.kind.as_str()));
        if let Some(radius) = shape.radius {
            properties.insert(RADIUS_KEY.to_owned(), Value::from(radius));
        }
        Ok(Self {
            tag: FeatureTag::Feature,
            geometry: encode_geometry(&shape.geometry)?,
            properties,
        })
    }

    /// Decodes this feature into a shape, splitting reserved keys out of the
    /// property bag.
    ///
    /// # Errors
    ///
    /// - `FormatError::MissingProperty` if `id` or `shapeType` is absent
    /// - `FormatError::InvalidProperty` if a reserved key has the wrong type
    /// - `FormatError::ShortPosition` if a position has fewer than two ordinates
    pub fn into_shape(self) -> Result<Shape> {
        let mut properties = self.properties;

        let id = match properties.remove(ID_KEY) {
            Some(Value::String(id)) => ShapeId::from(id),
            Some(other) => return Err(invalid(ID_KEY, &other, "expected a string")),
            None => return Err(FormatError::MissingProperty(ID_KEY).into()),
        };

        let kind_value = properties
            .remove(KIND_KEY)
            .ok_or(FormatError::MissingProperty(KIND_KEY))?;
        let kind: ShapeKind = serde_json::from_value(kind_value.clone()).map_err(|_| {
            invalid(
                KIND_KEY,
                &kind_value,
                "expected Polygon, Rectangle, Circle or LineString",
            )
        })?;

        let radius = match properties.remove(RADIUS_KEY) {
            None | Some(Value::Null) => None,
            Some(value) => Some(
                value
                    .as_f64()
                    .ok_or_else(|| invalid(RADIUS_KEY, &value, "expected a number"))?,
            ),
        };

        Ok(Shape {
            id,
            kind,
            geometry: decode_geometry(self.geometry)?,
            radius,
            properties,
        })
    }
}

/// Serializes shapes as a pretty-printed GeoJSON `FeatureCollection`.
///
/// # Errors
///
/// Returns a `FormatError` if a geometry cannot be encoded.
pub fn to_geojson_string(shapes: &[Shape]) -> Result<String> {
    let collection = FeatureCollection::from_shapes(shapes)?;
    Ok(serde_json::to_string_pretty(&collection).map_err(FormatError::from)?)
}

/// Parses a GeoJSON `FeatureCollection` into shapes, in document order.
///
/// # Errors
///
/// Returns `FormatError::Json` for malformed documents and other
/// `FormatError` variants for features that are not valid shapes.
pub fn from_geojson_str(json: &str) -> Result<Vec<Shape>> {
    let collection: FeatureCollection = serde_json::from_str(json).map_err(FormatError::from)?;
    collection.into_shapes()
}

fn invalid(key: &'static str, value: &Value, expected: &str) -> crate::error::ShapefenceError {
    FormatError::InvalidProperty {
        key,
        reason: format!("{expected}, got {value}"),
    }
    .into()
}

fn encode_geometry(geometry: &Geometry<f64>) -> Result<GeoJsonGeometry> {
    let encoded = match geometry {
        Geometry::Point(p) => GeoJsonGeometry::Point {
            coordinates: position(p.0),
        },
        Geometry::LineString(line) => GeoJsonGeometry::LineString {
            coordinates: ring(line),
        },
        Geometry::Polygon(poly) => GeoJsonGeometry::Polygon {
            coordinates: rings(poly),
        },
        Geometry::MultiPolygon(mp) => GeoJsonGeometry::MultiPolygon {
            coordinates: mp.iter().map(rings).collect(),
        },
        Geometry::Line(_) => return Err(unsupported("Line")),
        Geometry::MultiPoint(_) => return Err(unsupported("MultiPoint")),
        Geometry::MultiLineString(_) => return Err(unsupported("MultiLineString")),
        Geometry::GeometryCollection(_) => return Err(unsupported("GeometryCollection")),
        Geometry::Rect(_) => return Err(unsupported("Rect")),
        Geometry::Triangle(_) => return Err(unsupported("Triangle")),
    };
    Ok(encoded)
}

fn unsupported(name: &str) -> crate::error::ShapefenceError {
    FormatError::UnsupportedGeometry(name.to_owned()).into()
}

fn position(c: Coord<f64>) -> Position {
    vec![c.x, c.y]
}

fn ring(line: &LineString<f64>) -> Vec<Position> {
    line.coords().copied().map(position).collect()
}

fn rings(poly: &Polygon<f64>) -> Vec<Vec<Position>> {
    std::iter::once(poly.exterior())
        .chain(poly.interiors())
        .map(ring)
        .collect()
}

fn decode_geometry(geometry: GeoJsonGeometry) -> Result<Geometry<f64>> {
    let decoded = match geometry {
        GeoJsonGeometry::Point { coordinates } => Geometry::Point(Point(coord(&coordinates)?)),
        GeoJsonGeometry::LineString { coordinates } => {
            Geometry::LineString(line_string(&coordinates)?)
        }
        GeoJsonGeometry::Polygon { coordinates } => Geometry::Polygon(polygon(&coordinates)?),
        GeoJsonGeometry::MultiPolygon { coordinates } => Geometry::MultiPolygon(MultiPolygon::new(
            coordinates
                .iter()
                .map(|p| polygon(p))
                .collect::<Result<Vec<_>>>()?,
        )),
    };
    Ok(decoded)
}

fn coord(position: &[f64]) -> Result<Coord<f64>> {
    match position {
        [x, y, ..] => Ok(Coord { x: *x, y: *y }),
        _ => Err(FormatError::ShortPosition(position.len()).into()),
    }
}

fn line_string(positions: &[Position]) -> Result<LineString<f64>> {
    positions
        .iter()
        .map(|p| coord(p))
        .collect::<Result<Vec<_>>>()
        .map(LineString::new)
}

fn polygon(rings: &[Vec<Position>]) -> Result<Polygon<f64>> {
    let mut rings = rings.iter().map(|r| line_string(r));
    let exterior = rings
        .next()
        .transpose()?
        .unwrap_or_else(|| LineString::new(vec![]));
    let interiors = rings.collect::<Result<Vec<_>>>()?;
    Ok(Polygon::new(exterior, interiors))
}
