use tracing::info;

use crate::config::{EngineConfig, ShapeLimits};
use crate::error::{Result, StoreError};
use crate::geometry::{Shape, ShapeId, ShapeKind};
use crate::io::geojson;
use crate::operations::{Resolution, Resolve};

/// The accepted shape collection together with its capacity policy.
///
/// Shapes are kept in acceptance order, which is the order candidates are
/// folded against. The store only grows through [`FeatureStore::submit`],
/// so its members never enclose or overlap one another (unless replaced
/// wholesale through [`FeatureStore::set_shapes`]).
#[derive(Debug, Clone, Default)]
pub struct FeatureStore {
    shapes: Vec<Shape>,
    config: EngineConfig,
}

impl FeatureStore {
    /// Creates an empty store with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            shapes: Vec::new(),
            config,
        }
    }

    /// Returns the accepted shapes in acceptance order.
    #[must_use]
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Returns the shape with the given id.
    #[must_use]
    pub fn get(&self, id: &ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| &s.id == id)
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn limits(&self) -> &ShapeLimits {
        &self.config.limits
    }

    /// Capacity for `kind`.
    #[must_use]
    pub fn limit(&self, kind: ShapeKind) -> usize {
        self.config.limits.get(kind)
    }

    /// Number of stored shapes labelled `kind`.
    #[must_use]
    pub fn count(&self, kind: ShapeKind) -> usize {
        self.shapes.iter().filter(|s| s.kind == kind).count()
    }

    /// Changes the capacity for `kind`. Existing shapes are never evicted.
    pub fn set_limit(&mut self, kind: ShapeKind, limit: usize) {
        self.config.limits.set(kind, limit);
    }

    /// Offers a candidate to the collection.
    ///
    /// The capacity for the candidate's declared kind is checked first; the
    /// engine only runs when there is room. An accepted shape (possibly
    /// trimmed and re-tagged) is appended; a rejection leaves the store as it
    /// was. Either way the resolution is returned to the caller.
    ///
    /// # Errors
    ///
    /// - `StoreError::LimitReached` if the kind is at capacity
    /// - `StoreError::DuplicateId` if a stored shape already uses the id
    pub fn submit(&mut self, candidate: Shape) -> Result<Resolution> {
        let limit = self.limit(candidate.kind);
        if self.count(candidate.kind) >= limit {
            info!(id = %candidate.id, kind = %candidate.kind, limit, "capacity reached");
            return Err(StoreError::LimitReached {
                kind: candidate.kind,
                limit,
            }
            .into());
        }
        if self.get(&candidate.id).is_some() {
            return Err(StoreError::DuplicateId(candidate.id).into());
        }

        let resolution = Resolve::new(&candidate, &self.shapes)
            .with_params(self.config.circle)
            .execute();
        match &resolution {
            Resolution::Accepted(shape) => {
                info!(id = %shape.id, kind = %shape.kind, total = self.shapes.len() + 1, "shape accepted");
                self.shapes.push(shape.clone());
            }
            Resolution::Rejected(rejection) => {
                info!(id = %candidate.id, existing = %rejection.existing_id(), %rejection, "shape rejected");
            }
        }
        Ok(resolution)
    }

    /// Removes the shape with the given id, keeping the order of the rest.
    pub fn remove(&mut self, id: &ShapeId) -> Option<Shape> {
        let index = self.shapes.iter().position(|s| &s.id == id)?;
        info!(%id, "shape removed");
        Some(self.shapes.remove(index))
    }

    /// Replaces the whole collection without running the engine.
    pub fn set_shapes(&mut self, shapes: Vec<Shape>) {
        self.shapes = shapes;
    }

    /// Removes every shape. Limits are kept.
    pub fn reset(&mut self) {
        self.shapes.clear();
    }

    /// Exports the collection as a GeoJSON `FeatureCollection`.
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` if a stored geometry cannot be encoded.
    pub fn export_geojson(&self) -> Result<String> {
        geojson::to_geojson_string(&self.shapes)
    }

    /// Replaces the collection with the shapes of a GeoJSON document.
    ///
    /// The store is left untouched if the document fails to parse.
    ///
    /// # Errors
    ///
    /// Returns a `FormatError` for malformed documents or invalid features.
    pub fn import_geojson(&mut self, json: &str) -> Result<()> {
        let shapes = geojson::from_geojson_str(json)?;
        self.set_shapes(shapes);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::CircleParams;
    use crate::error::ShapefenceError;
    use crate::operations::Rejection;
    use geo::{coord, line_string, point};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn planar_store() -> FeatureStore {
        init_tracing();
        FeatureStore::new(EngineConfig {
            circle: CircleParams::planar(),
            ..EngineConfig::default()
        })
    }

    fn rect(id: &str, x0: f64, y0: f64, x1: f64, y1: f64) -> Shape {
        Shape::rectangle(id, coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 })
    }

    #[test]
    fn accepted_shapes_are_appended_in_order() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        store.submit(rect("b", 5.0, 5.0, 6.0, 6.0)).unwrap();
        let ids: Vec<&str> = store.shapes().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "b"]);
        assert_eq!(store.count(ShapeKind::Rectangle), 2);
    }

    #[test]
    fn trimmed_shape_is_stored_as_polygon() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let resolution = store.submit(rect("b", 5.0, 5.0, 15.0, 15.0)).unwrap();
        assert!(resolution.is_accepted());
        assert_eq!(store.get(&"b".into()).unwrap().kind, ShapeKind::Polygon);
        assert_eq!(store.count(ShapeKind::Rectangle), 1);
        assert_eq!(store.count(ShapeKind::Polygon), 1);
    }

    #[test]
    fn rejection_leaves_store_untouched() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        let before = store.shapes().to_vec();
        let resolution = store.submit(rect("b", -5.0, -5.0, 15.0, 15.0)).unwrap();
        assert_eq!(
            resolution.rejection(),
            Some(&Rejection::EnclosesExisting {
                existing: "a".into()
            })
        );
        assert_eq!(store.shapes(), before.as_slice());
    }

    #[test]
    fn capacity_refuses_before_resolving() {
        let mut store = planar_store();
        store.set_limit(ShapeKind::Circle, 1);
        store.submit(Shape::circle("c1", point!(x: 0.0, y: 0.0), 1.0)).unwrap();
        let err = store
            .submit(Shape::circle("c2", point!(x: 50.0, y: 50.0), 1.0))
            .unwrap_err();
        assert!(matches!(
            err,
            ShapefenceError::Store(StoreError::LimitReached {
                kind: ShapeKind::Circle,
                limit: 1
            })
        ));
        assert_eq!(err.to_string(), "Limit reached for Circle (1)");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn zero_limit_blocks_kind() {
        let mut store = planar_store();
        store.set_limit(ShapeKind::LineString, 0);
        let line = Shape::line_string("l", line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]);
        assert!(store.submit(line).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn duplicate_ids_are_refused() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        let err = store.submit(rect("a", 5.0, 5.0, 6.0, 6.0)).unwrap_err();
        assert!(matches!(
            err,
            ShapefenceError::Store(StoreError::DuplicateId(ref id)) if id.as_str() == "a"
        ));
    }

    #[test]
    fn remove_keeps_order() {
        let mut store = planar_store();
        for (i, id) in ["a", "b", "c"].into_iter().enumerate() {
            #[allow(clippy::cast_precision_loss)]
            let x = i as f64 * 10.0;
            store.submit(rect(id, x, 0.0, x + 1.0, 1.0)).unwrap();
        }
        let removed = store.remove(&"b".into()).unwrap();
        assert_eq!(removed.id.as_str(), "b");
        assert!(store.remove(&"b".into()).is_none());
        let ids: Vec<&str> = store.shapes().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn removal_frees_room_for_overlapping_shape() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        store.remove(&"a".into());
        let resolution = store.submit(rect("b", -5.0, -5.0, 15.0, 15.0)).unwrap();
        assert_eq!(resolution.accepted().unwrap().kind, ShapeKind::Rectangle);
    }

    #[test]
    fn reset_clears_shapes_but_keeps_limits() {
        let mut store = planar_store();
        store.set_limit(ShapeKind::Polygon, 3);
        store.submit(rect("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        store.reset();
        assert!(store.is_empty());
        assert_eq!(store.limit(ShapeKind::Polygon), 3);
        assert_eq!(store.limits().get(ShapeKind::Circle), 10);
    }

    #[test]
    fn geojson_round_trip_through_store() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 10.0, 10.0)).unwrap();
        store.submit(rect("b", 5.0, 5.0, 15.0, 15.0)).unwrap();
        store.submit(Shape::circle("c", point!(x: 30.0, y: 30.0), 2.0)).unwrap();
        let json = store.export_geojson().unwrap();

        let mut restored = planar_store();
        restored.import_geojson(&json).unwrap();
        assert_eq!(restored.shapes(), store.shapes());
    }

    #[test]
    fn failed_import_keeps_shapes() {
        let mut store = planar_store();
        store.submit(rect("a", 0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(store.import_geojson("not json").is_err());
        assert_eq!(store.len(), 1);
    }
}
