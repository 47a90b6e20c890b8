pub mod geojson;

pub use geojson::{from_geojson_str, to_geojson_string, Feature, FeatureCollection, GeoJsonGeometry};
