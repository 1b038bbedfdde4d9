//! Composite of intersectable objects.

use crate::intersectable::{GeoPoint, Intersectable};
use glint_math::Ray;

/// An ordered collection of intersectable objects.
///
/// Intersection is the union of the children's hits, in child order. Nothing hit
/// (including an empty collection) is `None`.
#[derive(Default)]
pub struct Geometries {
    objects: Vec<Box<dyn Intersectable>>,
}

impl Geometries {
    /// Create a new empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object to the collection.
    pub fn add(&mut self, object: impl Intersectable + 'static) {
        self.objects.push(Box::new(object));
    }

    /// Add an object, builder style.
    pub fn with(mut self, object: impl Intersectable + 'static) -> Self {
        self.add(object);
        self
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Intersectable for Geometries {
    fn intersect(&self, ray: &Ray) -> Option<Vec<GeoPoint<'_>>> {
        let mut hits: Option<Vec<GeoPoint<'_>>> = None;

        for object in &self.objects {
            if let Some(found) = object.intersect(ray) {
                hits.get_or_insert_with(Vec::new).extend(found);
            }
        }

        hits
    }
}
