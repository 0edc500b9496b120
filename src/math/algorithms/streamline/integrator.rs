// src/math/algorithms/streamline/integrator.rs

use super::config::{ExitAlignment, StreamlineConfig, TurnPolicy};
use super::direction::DirectionField;
use crate::math::geometry::polygon::{
    PolygonRegion, nearest_edge, orient_vector_inside, point_in_polygon, reflect_direction_inside,
};
use crate::math::types::*;
use bevy::log::debug;

/// Grund, aus dem eine Integration beendet wurde.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Termination {
    /// Kein Schritt blieb im Polygon (oder der Startpunkt lag außerhalb).
    Exited,
    /// `max_steps` erreicht.
    StepBudget,
    /// Zu wenig Nettofortschritt innerhalb eines Fensters.
    Stagnated,
    /// Feld oder Mischung lieferte den Nullvektor.
    NoDirection,
    /// Laufrichtung stimmt wieder mit der Zielrichtung überein.
    Aligned,
    /// Schleifenbudget `max_guard_iterations` aufgebraucht.
    GuardExhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TraceResult {
    pub points: Vec<Point2D>,
    pub termination: Termination,
}

/// Eine in beide Richtungen integrierte Linie, vom hinteren zum vorderen Ende geordnet.
#[derive(Debug, Clone, PartialEq)]
pub struct Streamline {
    pub points: Vec<Point2D>,
    pub forward: Termination,
    pub backward: Termination,
}

impl Streamline {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Bogenlänge der Polyline.
    pub fn arc_length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(w[1])).sum()
    }
}

/// Schrittweiser Integrator über einem [`DirectionField`], begrenzt durch ein Polygon.
///
/// Jeder ausgegebene Punkt liegt im Polygon: ein Schritt wird nur ausgeführt, wenn
/// [`orient_vector_inside`] für genau diesen Schritt eine Richtung liefert.
pub struct StreamlineIntegrator<'a, D: DirectionField + ?Sized> {
    field: &'a D,
    region: &'a PolygonRegion,
    config: StreamlineConfig,
    turn: Option<TurnPolicy>,
    exit: Option<ExitAlignment>,
}

impl<'a, D: DirectionField + ?Sized> StreamlineIntegrator<'a, D> {
    pub fn new(field: &'a D, region: &'a PolygonRegion, config: StreamlineConfig) -> Self {
        Self {
            field,
            region,
            config,
            turn: None,
            exit: None,
        }
    }

    pub fn with_turn_policy(mut self, policy: TurnPolicy) -> Self {
        self.turn = Some(policy);
        self
    }

    pub fn with_exit_alignment(mut self, exit: ExitAlignment) -> Self {
        self.exit = Some(exit);
        self
    }

    pub fn config(&self) -> &StreamlineConfig {
        &self.config
    }

    /// Integriert von `seed` aus in Richtung `sign` (+1 vorwärts, -1 rückwärts).
    ///
    /// Das Vorzeichen wirkt auf Feld, Bias und Zielrichtung. Ein Startpunkt außerhalb des
    /// Polygons ergibt eine leere Linie mit [`Termination::Exited`].
    pub fn trace(&self, seed: Point2D, sign: f32) -> TraceResult {
        let vertices = self.region.vertices();
        if !point_in_polygon(seed, vertices) {
            return TraceResult {
                points: Vec::new(),
                termination: Termination::Exited,
            };
        }

        let sign = if sign < 0.0 { -1.0 } else { 1.0 };
        let step = self.config.step_size;
        let retain = self.config.smoothing.clamp(0.0, 0.99);
        let guard_budget = self.config.guard_budget();
        let window = self.config.stagnation_window;
        let min_progress = step * self.config.stagnation_ratio;

        let mut points = vec![seed];
        let mut pos = seed;
        let mut prev: Option<Vec2> = None;
        let mut steps = 0usize;
        let mut guard = 0usize;
        let mut window_start = seed;

        let termination = loop {
            if steps >= self.config.max_steps {
                break Termination::StepBudget;
            }
            guard += 1;
            if guard > guard_budget {
                break Termination::GuardExhausted;
            }

            let Some(mut raw) = (self.field.direction_at(pos) * sign).try_normalize() else {
                break Termination::NoDirection;
            };
            if self.config.align_with_previous && prev.is_some_and(|p| raw.dot(p) < 0.0) {
                raw = -raw;
            }

            let mut dir = match prev {
                Some(p) => raw * (1.0 - retain) + p * retain,
                None => raw,
            };
            if let Some(turn) = &self.turn {
                dir = self.apply_turn(turn, pos, dir, sign);
            }
            let Some(dir) = dir.try_normalize() else {
                break Termination::NoDirection;
            };

            let oriented = orient_vector_inside(pos, step, dir, vertices).filter(|d| {
                self.config.allow_fold_back || prev.is_none_or(|p| d.dot(p) >= 0.0)
            });

            let next_dir = match oriented {
                Some(d) => d,
                None if self.config.reflect_on_boundary => {
                    match reflect_direction_inside(pos, step, dir, vertices) {
                        Some(reflected) => reflected,
                        None => break Termination::Exited,
                    }
                }
                None => break Termination::Exited,
            };

            pos += next_dir * step;
            points.push(pos);
            prev = Some(next_dir);
            steps += 1;

            if let Some(exit) = &self.exit {
                if steps >= exit.min_steps && next_dir.dot(exit.target() * sign) >= exit.threshold
                {
                    break Termination::Aligned;
                }
            }

            if window > 0 && steps % window == 0 {
                if pos.distance(window_start) < min_progress {
                    break Termination::Stagnated;
                }
                window_start = pos;
            }
        };

        TraceResult {
            points,
            termination,
        }
    }

    /// Integriert in beide Richtungen und fügt die Hälften am Startpunkt zusammen.
    ///
    /// `None`, wenn der Startpunkt außerhalb liegt.
    pub fn trace_bidirectional(&self, seed: Point2D) -> Option<Streamline> {
        let forward = self.trace(seed, 1.0);
        if forward.points.is_empty() {
            return None;
        }
        let backward = self.trace(seed, -1.0);

        let mut points = backward.points;
        points.reverse();
        // Der Startpunkt steht am Ende der umgedrehten Rückwärtshälfte
        points.extend(forward.points.into_iter().skip(1));

        debug!(
            "streamline from ({:.1}, {:.1}): {} points, {:?}/{:?}",
            seed.x,
            seed.y,
            points.len(),
            backward.termination,
            forward.termination
        );

        Some(Streamline {
            points,
            forward: forward.termination,
            backward: backward.termination,
        })
    }

    fn apply_turn(&self, turn: &TurnPolicy, pos: Point2D, dir: Vec2, sign: f32) -> Vec2 {
        let mut dir = dir;
        if turn.bias_weight > 0.0 {
            let bias = turn.bias_direction() * sign;
            dir = dir * (1.0 - turn.bias_weight) + bias * turn.bias_weight;
        }
        if turn.tangent_strength > 0.0 {
            if let Some(edge) = nearest_edge(pos, self.region.vertices()) {
                let weight = turn.turn_weight(edge.distance) * turn.tangent_strength;
                let tangent = if edge.tangent.dot(dir) < 0.0 {
                    -edge.tangent
                } else {
                    edge.tangent
                };
                dir = dir * (1.0 - weight) + tangent * weight;
            }
        }
        dir
    }
}
