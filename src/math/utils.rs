// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    pub const EPSILON: f32 = 1e-6;
    pub const EPSILON_SQUARED: f32 = EPSILON * EPSILON; // Für Vergleiche mit Längen
    /// Wird auf Nenner von Kantenschnitten addiert (horizontale Kanten im Ray-Casting).
    pub const INTERSECT_EPSILON: f32 = 1e-12;
    pub const PI: f32 = std::f32::consts::PI;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    use super::constants::EPSILON;

    /// Prüft ob Float (nahezu) Null ist
    pub fn nearly_zero(a: f32) -> bool {
        a.abs() < EPSILON
    }

    /// Lineare Interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Smoothstep interpolation (hermite interpolation)
    pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
        if (edge1 - edge0).abs() < EPSILON {
            return if x < edge0 { 0.0 } else { 1.0 };
        }
        let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
        t * t * (3.0 - 2.0 * t)
    }
}

/// Winkel-Hilfsfunktionen
pub mod angles {
    use super::constants::PI;
    use bevy::math::Vec2;

    /// Konvertiert Grad zu Radiant
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * PI / 180.0
    }

    /// Einheitsvektor für einen Winkel in Grad
    pub fn unit_from_degrees(degrees: f32) -> Vec2 {
        Vec2::from_angle(deg_to_rad(degrees))
    }
}

#[cfg(test)]
mod tests {
    use super::comparison::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_smoothstep_edges() {
        assert_abs_diff_eq!(smoothstep(0.0, 10.0, -1.0), 0.0);
        assert_abs_diff_eq!(smoothstep(0.0, 10.0, 5.0), 0.5);
        assert_abs_diff_eq!(smoothstep(0.0, 10.0, 12.0), 1.0);
        // Entartete Kante: Stufenfunktion statt NaN
        assert_abs_diff_eq!(smoothstep(3.0, 3.0, 2.0), 0.0);
        assert_abs_diff_eq!(smoothstep(3.0, 3.0, 4.0), 1.0);
    }

    #[test]
    fn test_lerp() {
        assert_abs_diff_eq!(lerp(2.0, 4.0, 0.25), 2.5);
    }
}
