// src/math/geometry/polygon/mod.rs

// Geometrie-Kern: ein Inside/Outside- und Abstandsorakel für alle Felder und Integratoren
pub mod containment;
pub mod intersection;
pub mod properties;
pub mod proximity;
pub mod region;

pub use self::containment::{orient_vector_inside, reflect_direction_inside};
pub use self::intersection::{clip_line, line_intersections};
pub use self::properties::{
    Orientation, PolygonProperties, centroid, orientation, point_in_polygon, signed_area,
};
pub use self::proximity::{
    EdgeInfo, closest_point_on_segment, distance_to_boundary, nearest_edge,
    point_segment_distance, signed_distance,
};
pub use self::region::PolygonRegion;
