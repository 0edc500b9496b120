// src/math/geometry/mod.rs

pub mod polygon;

// Re-Exporte für einen schnellen Zugriff auf die Kern-Geometrietypen
pub use self::polygon::{
    EdgeInfo, Orientation, PolygonProperties, PolygonRegion, line_intersections, nearest_edge,
    orient_vector_inside, point_in_polygon, reflect_direction_inside, signed_distance,
};
