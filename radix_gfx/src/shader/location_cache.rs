/// Per-program uniform/attribute location cache
///
/// Each name is resolved through the graphics API once; the answer
/// (including `Location::NOT_FOUND`) is kept for the program's lifetime.
/// Programs never change after link, so entries are never invalidated.

use rustc_hash::FxHashMap;

use crate::graphics_device::{Location, LocationKind};

#[derive(Debug, Default, Clone)]
pub struct LocationCache {
    uniforms: FxHashMap<String, Location>,
    attributes: FxHashMap<String, Location>,
}

impl LocationCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn namespace(&self, kind: LocationKind) -> &FxHashMap<String, Location> {
        match kind {
            LocationKind::Uniform => &self.uniforms,
            LocationKind::Attribute => &self.attributes,
        }
    }

    /// Cached location, or the result of `query` stored for next time
    pub fn get_or_query<F>(&mut self, kind: LocationKind, name: &str, query: F) -> Location
    where
        F: FnOnce(&str) -> Location,
    {
        if let Some(location) = self.cached(kind, name) {
            return location;
        }

        let location = query(name);
        let map = match kind {
            LocationKind::Uniform => &mut self.uniforms,
            LocationKind::Attribute => &mut self.attributes,
        };
        map.insert(name.to_string(), location);
        location
    }

    /// Location previously stored for `name`, without querying
    pub fn cached(&self, kind: LocationKind, name: &str) -> Option<Location> {
        self.namespace(kind).get(name).copied()
    }

    /// Number of cached names in one namespace
    pub fn len(&self, kind: LocationKind) -> usize {
        self.namespace(kind).len()
    }

    pub fn is_empty(&self) -> bool {
        self.uniforms.is_empty() && self.attributes.is_empty()
    }
}

#[cfg(test)]
#[path = "location_cache_tests.rs"]
mod tests;
