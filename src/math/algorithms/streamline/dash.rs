// src/math/algorithms/streamline/dash.rs

use crate::math::error::{MathError, MathResult};
use crate::math::types::*;
use crate::math::utils::constants;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Strichmuster für gestrichelte Streamlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashPattern {
    pub on_length: f32,
    pub off_length: f32,
    /// Zufälliger Einstieg ins Muster, damit benachbarte Linien nicht gleich beginnen.
    pub random_phase: bool,
    /// Relative Streuung der Strichlänge, `[0, 1)`.
    pub length_jitter: f32,
}

impl Default for DashPattern {
    fn default() -> Self {
        Self {
            on_length: 8.0,
            off_length: 4.0,
            random_phase: true,
            length_jitter: 0.0,
        }
    }
}

impl DashPattern {
    pub fn new(on_length: f32, off_length: f32) -> Self {
        Self {
            on_length,
            off_length,
            random_phase: false,
            length_jitter: 0.0,
        }
    }

    pub fn with_random_phase(mut self, random_phase: bool) -> Self {
        self.random_phase = random_phase;
        self
    }

    pub fn with_length_jitter(mut self, jitter: f32) -> Self {
        self.length_jitter = jitter;
        self
    }

    pub fn period(&self) -> f32 {
        self.on_length + self.off_length
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.on_length.is_finite() && self.on_length > 0.0) {
            return Err(MathError::config("dash on_length must be positive"));
        }
        if !(self.off_length.is_finite() && self.off_length >= 0.0) {
            return Err(MathError::config("dash off_length must not be negative"));
        }
        if !(0.0..1.0).contains(&self.length_jitter) {
            return Err(MathError::config("dash length_jitter must lie in [0, 1)"));
        }
        Ok(())
    }

    fn dash_length<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.length_jitter <= 0.0 {
            return self.on_length;
        }
        let jitter = rng.random_range(-self.length_jitter..=self.length_jitter);
        (self.on_length * (1.0 + jitter)).max(constants::EPSILON)
    }
}

/// Zerlegt eine Polyline entlang ihrer Bogenlänge in Striche.
///
/// Jeder Strich hat mindestens zwei Punkte; Lücken erzeugen keine Ausgabe.
/// Ohne Lücke (`off_length == 0`) kommt die Polyline unverändert als ein Strich zurück.
pub fn dash_polyline<R: Rng + ?Sized>(
    points: &[Point2D],
    pattern: &DashPattern,
    rng: &mut R,
) -> Vec<Vec<Point2D>> {
    if points.len() < 2 || pattern.on_length <= 0.0 {
        return Vec::new();
    }
    if pattern.off_length <= 0.0 {
        return vec![points.to_vec()];
    }

    let mut on_length = pattern.dash_length(rng);
    let phase = if pattern.random_phase {
        rng.random_range(0.0..on_length + pattern.off_length)
    } else {
        0.0
    };
    let (mut drawing, mut remaining) = if phase < on_length {
        (true, on_length - phase)
    } else {
        (false, on_length + pattern.off_length - phase)
    };

    let mut dashes = Vec::new();
    let mut current: Vec<Point2D> = if drawing { vec![points[0]] } else { Vec::new() };

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let length = a.distance(b);
        if length < constants::EPSILON {
            continue;
        }

        let mut travelled = 0.0;
        while length - travelled > remaining {
            travelled += remaining;
            let cut = a.lerp(b, travelled / length);
            if drawing {
                current.push(cut);
                if current.len() >= 2 {
                    dashes.push(std::mem::take(&mut current));
                }
                current.clear();
                remaining = pattern.off_length;
            } else {
                current.push(cut);
                on_length = pattern.dash_length(rng);
                remaining = on_length;
            }
            drawing = !drawing;
        }
        remaining -= length - travelled;
        if drawing {
            current.push(b);
        }
    }

    if drawing && current.len() >= 2 {
        dashes.push(current);
    }
    dashes
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn line(length: f32) -> Vec<Vec2> {
        vec![Vec2::ZERO, Vec2::new(length, 0.0)]
    }

    fn dash_length(dash: &[Vec2]) -> f32 {
        dash.windows(2).map(|w| w[0].distance(w[1])).sum()
    }

    #[test]
    fn test_regular_dashes() {
        let mut rng = StdRng::seed_from_u64(1);
        let dashes = dash_polyline(&line(30.0), &DashPattern::new(5.0, 5.0), &mut rng);
        assert_eq!(dashes.len(), 3);
        for (k, dash) in dashes.iter().enumerate() {
            assert_abs_diff_eq!(dash[0].x, k as f32 * 10.0, epsilon = 1e-4);
            assert_abs_diff_eq!(dash_length(dash), 5.0, epsilon = 1e-4);
        }
    }

    #[test]
    fn test_dashes_follow_corners() {
        let mut rng = StdRng::seed_from_u64(1);
        let path = vec![Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.0, 10.0)];
        let dashes = dash_polyline(&path, &DashPattern::new(6.0, 2.0), &mut rng);
        // Erster Strich geht um die Ecke
        assert_eq!(dashes[0].len(), 3);
        assert_abs_diff_eq!(dash_length(&dashes[0]), 6.0, epsilon = 1e-4);
        assert_abs_diff_eq!(dashes[1][0].y, 5.0, epsilon = 1e-4);
    }

    #[test]
    fn test_total_ink_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let pattern = DashPattern::new(4.0, 3.0)
            .with_random_phase(true)
            .with_length_jitter(0.3);
        let path: Vec<Vec2> = (0..40)
            .map(|k| Vec2::new(k as f32 * 2.5, (k as f32 * 0.3).sin() * 10.0))
            .collect();
        let total: f32 = path.windows(2).map(|w| w[0].distance(w[1])).sum();
        let dashes = dash_polyline(&path, &pattern, &mut rng);

        assert!(!dashes.is_empty());
        let ink: f32 = dashes.iter().map(|d| dash_length(d)).sum();
        assert!(ink < total);
        for dash in &dashes {
            assert!(dash.len() >= 2);
            assert!(dash_length(dash) <= 4.0 * 1.3 + 1e-3);
        }
    }

    #[test]
    fn test_degenerate_inputs() {
        let mut rng = StdRng::seed_from_u64(3);
        assert!(dash_polyline(&[Vec2::ZERO], &DashPattern::default(), &mut rng).is_empty());
        let solid = dash_polyline(&line(10.0), &DashPattern::new(2.0, 0.0), &mut rng);
        assert_eq!(solid, vec![line(10.0)]);
    }

    #[test]
    fn test_same_seed_same_dashes() {
        let pattern = DashPattern::default().with_length_jitter(0.5);
        let a = dash_polyline(&line(200.0), &pattern, &mut StdRng::seed_from_u64(42));
        let b = dash_polyline(&line(200.0), &pattern, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_validate() {
        assert!(DashPattern::default().validate().is_ok());
        assert!(DashPattern::new(0.0, 1.0).validate().is_err());
        assert!(DashPattern::new(1.0, 1.0).with_length_jitter(1.0).validate().is_err());
    }
}
