// src/math/algorithms/streamline/direction.rs

use crate::math::field::{FieldSampler, VectorSampler};
use crate::math::utils::angles;
use bevy::math::Vec2;

/// Liefert die Feldrichtung an einem Punkt. Die Länge ist egal, der Integrator normiert;
/// `Vec2::ZERO` bedeutet "keine Information" und beendet die Streamline.
pub trait DirectionField {
    fn direction_at(&self, point: Vec2) -> Vec2;
}

impl<F> DirectionField for F
where
    F: Fn(Vec2) -> Vec2,
{
    fn direction_at(&self, point: Vec2) -> Vec2 {
        self(point)
    }
}

/// Gradient des Abstandsfelds: läuft vom Rand ins Innere.
impl DirectionField for VectorSampler<'_> {
    fn direction_at(&self, point: Vec2) -> Vec2 {
        self.sample(point)
    }
}

/// Senkrechte zum Gradienten: folgt den Iso-Linien, also parallel zum Rand.
#[derive(Debug, Clone, Copy)]
pub struct TangentField<'a> {
    gradient: VectorSampler<'a>,
}

impl<'a> TangentField<'a> {
    pub fn new(gradient: VectorSampler<'a>) -> Self {
        Self { gradient }
    }
}

impl DirectionField for TangentField<'_> {
    fn direction_at(&self, point: Vec2) -> Vec2 {
        self.gradient.sample(point).perp()
    }
}

/// Überall dieselbe Richtung.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformField {
    direction: Vec2,
}

impl UniformField {
    pub fn new(direction: Vec2) -> Self {
        Self { direction }
    }

    pub fn from_degrees(angle_deg: f32) -> Self {
        Self::new(angles::unit_from_degrees(angle_deg))
    }
}

impl DirectionField for UniformField {
    fn direction_at(&self, _point: Vec2) -> Vec2 {
        self.direction
    }
}
