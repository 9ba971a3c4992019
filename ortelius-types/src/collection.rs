use crate::{Geometry, UNSET_SRID};
use serde::{Deserialize, Serialize};

/// A heterogeneous collection of geometries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeometryCollection {
    /// Member geometries, possibly of mixed variants.
    pub geometries: Vec<Geometry>,
    /// Spatial reference identifier.
    pub srid: i32,
}

impl GeometryCollection {
    /// Creates a collection from its members.
    pub fn new(geometries: Vec<Geometry>) -> Self {
        Self {
            geometries,
            srid: UNSET_SRID,
        }
    }

    /// Creates the empty collection.
    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// True when there are no members or all members are empty.
    pub fn is_empty(&self) -> bool {
        self.geometries.iter().all(Geometry::is_empty)
    }
}

impl PartialEq for GeometryCollection {
    fn eq(&self, other: &Self) -> bool {
        self.geometries == other.geometries
    }
}
