// src/math/algorithms/streamline/config.rs

use crate::math::error::{MathError, MathResult};
use crate::math::utils::{angles, comparison::smoothstep};
use bevy::math::Vec2;
use serde::{Deserialize, Serialize};

/// Konfiguration für die Integration einer einzelnen Streamline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamlineConfig {
    /// Schrittlänge in Weltkoordinaten.
    pub step_size: f32,
    /// Maximale Anzahl geometrischer Schritte pro Richtung.
    pub max_steps: usize,
    /// Anteil der vorherigen Richtung, der in jeden Schritt übernommen wird (0 = keiner).
    pub smoothing: f32,
    /// Feldrichtung auf die vorherige Richtung ausrichten (für vorzeichenlose Tangentenfelder).
    pub align_with_previous: bool,
    /// Erlaubt Schritte, die gegen die vorherige Richtung laufen. Ohne das endet eine
    /// Streamline am Rand, statt dort hin- und herzuspringen.
    pub allow_fold_back: bool,
    /// Am Rand an der Kantennormale spiegeln statt abzubrechen.
    pub reflect_on_boundary: bool,
    /// Obergrenze für Schleifendurchläufe, unabhängig von der Schrittzahl.
    pub max_guard_iterations: usize,
    /// Nach so vielen Schritten wird der Nettofortschritt geprüft (0 = aus).
    pub stagnation_window: usize,
    /// Mindestfortschritt pro Fenster, in Vielfachen von `step_size`.
    pub stagnation_ratio: f32,
}

impl Default for StreamlineConfig {
    fn default() -> Self {
        Self {
            step_size: 2.0,
            max_steps: 400,
            smoothing: 0.4,
            align_with_previous: true,
            allow_fold_back: false,
            reflect_on_boundary: false,
            max_guard_iterations: 1600,
            stagnation_window: 24,
            stagnation_ratio: 0.5,
        }
    }
}

impl StreamlineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_step_size(mut self, step_size: f32) -> Self {
        self.step_size = step_size;
        self
    }

    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self.max_guard_iterations = self.max_guard_iterations.max(max_steps);
        self
    }

    pub fn with_smoothing(mut self, smoothing: f32) -> Self {
        self.smoothing = smoothing;
        self
    }

    pub fn with_reflection(mut self, reflect: bool) -> Self {
        self.reflect_on_boundary = reflect;
        self
    }

    pub fn with_fold_back(mut self, allow: bool) -> Self {
        self.allow_fold_back = allow;
        self
    }

    pub fn with_stagnation_window(mut self, window: usize) -> Self {
        self.stagnation_window = window;
        self
    }

    pub fn with_guard_iterations(mut self, iterations: usize) -> Self {
        self.max_guard_iterations = iterations;
        self
    }

    /// Harte Obergrenze der Schleifendurchläufe. Liegt sie unter `max_steps`, endet die
    /// Integration vorher mit `GuardExhausted`.
    pub fn guard_budget(&self) -> usize {
        self.max_guard_iterations
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.step_size.is_finite() && self.step_size > 0.0) {
            return Err(MathError::config("step_size must be a positive finite number"));
        }
        if !(0.0..1.0).contains(&self.smoothing) {
            return Err(MathError::config("smoothing must lie in [0, 1)"));
        }
        if self.stagnation_ratio < 0.0 {
            return Err(MathError::config("stagnation_ratio must not be negative"));
        }
        Ok(())
    }
}

/// Richtungsmischung in Randnähe ("turn reach").
///
/// Zieht die Richtung konstant zu `bias_angle_deg` und, abhängig vom Randabstand, zur
/// Tangente der nächsten Kante. Das Gewicht ist `max(near, 0.6 * far)` mit
/// `near = 1 - smoothstep(0, near_reach, d)` und `far = 1 - smoothstep(near_reach, far_reach, d)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnPolicy {
    pub bias_angle_deg: f32,
    /// Konstanter Zug zur Bias-Richtung, `[0, 1]`.
    pub bias_weight: f32,
    pub near_reach: f32,
    pub far_reach: f32,
    /// Skaliert das randabhängige Tangentengewicht, `[0, 1]`.
    pub tangent_strength: f32,
}

impl Default for TurnPolicy {
    fn default() -> Self {
        Self {
            bias_angle_deg: 0.0,
            bias_weight: 0.0,
            near_reach: 6.0,
            far_reach: 24.0,
            tangent_strength: 0.8,
        }
    }
}

impl TurnPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bias(mut self, angle_deg: f32, weight: f32) -> Self {
        self.bias_angle_deg = angle_deg;
        self.bias_weight = weight;
        self
    }

    pub fn with_reach(mut self, near: f32, far: f32) -> Self {
        self.near_reach = near;
        self.far_reach = far;
        self
    }

    pub fn with_tangent_strength(mut self, strength: f32) -> Self {
        self.tangent_strength = strength;
        self
    }

    pub fn bias_direction(&self) -> Vec2 {
        angles::unit_from_degrees(self.bias_angle_deg)
    }

    /// Gewicht der Randtangente bei Randabstand `distance` (positiv innen).
    pub fn turn_weight(&self, distance: f32) -> f32 {
        let d = distance.max(0.0);
        let near = 1.0 - smoothstep(0.0, self.near_reach, d);
        let far = 1.0 - smoothstep(self.near_reach, self.far_reach, d);
        near.max(0.6 * far)
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(0.0..=1.0).contains(&self.bias_weight) {
            return Err(MathError::config("bias_weight must lie in [0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.tangent_strength) {
            return Err(MathError::config("tangent_strength must lie in [0, 1]"));
        }
        if self.near_reach < 0.0 || self.far_reach < self.near_reach {
            return Err(MathError::config(
                "turn reach requires 0 <= near_reach <= far_reach",
            ));
        }
        Ok(())
    }
}

/// Vorzeitiger Abbruch, sobald die Laufrichtung wieder mit einer Zielrichtung übereinstimmt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExitAlignment {
    pub target_angle_deg: f32,
    /// Kosinus-Schwelle: Abbruch bei `dot(dir, target) >= threshold`.
    pub threshold: f32,
    /// Vorher wird nie abgebrochen.
    pub min_steps: usize,
}

impl Default for ExitAlignment {
    fn default() -> Self {
        Self {
            target_angle_deg: 0.0,
            threshold: 0.97,
            min_steps: 12,
        }
    }
}

impl ExitAlignment {
    pub fn target(&self) -> Vec2 {
        angles::unit_from_degrees(self.target_angle_deg)
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(-1.0..=1.0).contains(&self.threshold) {
            return Err(MathError::config("alignment threshold must lie in [-1, 1]"));
        }
        Ok(())
    }
}
