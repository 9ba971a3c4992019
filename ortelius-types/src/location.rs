use serde::{Deserialize, Serialize};

/// Topological position of a point relative to a geometry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Location {
    /// Inside the geometry's interior.
    Interior,
    /// On the geometry's boundary.
    Boundary,
    /// Outside the geometry.
    Exterior,
}

impl Location {
    /// Matrix row/column index of this location.
    pub fn index(&self) -> usize {
        match self {
            Location::Interior => 0,
            Location::Boundary => 1,
            Location::Exterior => 2,
        }
    }
}
