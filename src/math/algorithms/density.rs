// src/math/algorithms/density.rs

use crate::math::error::{MathError, MathResult};
use crate::math::types::*;
use bevy::utils::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

pub type CellKey = (i32, i32);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DensityConfig {
    /// Kantenlänge der Belegungszellen.
    pub cell_size: f32,
    /// Höchster Anteil bereits belegter Zellen, bei dem ein Pfad noch angenommen wird.
    pub max_overlap: f32,
    /// Zellen mit weniger Belegungen gelten als unterversorgt; ein Pfad, der eine solche
    /// Zelle berührt, wird immer angenommen.
    pub min_coverage: u32,
}

impl Default for DensityConfig {
    fn default() -> Self {
        Self {
            cell_size: 6.0,
            max_overlap: 0.4,
            min_coverage: 1,
        }
    }
}

impl DensityConfig {
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    pub fn with_max_overlap(mut self, ratio: f32) -> Self {
        self.max_overlap = ratio;
        self
    }

    pub fn with_min_coverage(mut self, coverage: u32) -> Self {
        self.min_coverage = coverage;
        self
    }

    pub fn validate(&self) -> MathResult<()> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(MathError::config("density cell_size must be positive"));
        }
        if !(0.0..=1.0).contains(&self.max_overlap) {
            return Err(MathError::config("max_overlap must lie in [0, 1]"));
        }
        Ok(())
    }
}

/// Grobe Belegungskarte, die entscheidet, ob ein weiterer Pfad noch Platz hat.
///
/// Jeder Pfad zählt pro Zelle höchstens einmal, egal wie viele seiner Punkte hineinfallen.
#[derive(Debug, Clone)]
pub struct DensityGrid {
    config: DensityConfig,
    counts: HashMap<CellKey, u32>,
}

impl DensityGrid {
    pub fn new(config: DensityConfig) -> Self {
        Self {
            config,
            counts: HashMap::default(),
        }
    }

    pub fn config(&self) -> &DensityConfig {
        &self.config
    }

    pub fn cell_of(&self, point: Point2D) -> CellKey {
        let size = self.config.cell_size.max(f32::EPSILON);
        (
            (point.x / size).floor() as i32,
            (point.y / size).floor() as i32,
        )
    }

    /// Eindeutige Zellen eines Pfads in Durchlaufreihenfolge.
    fn unique_cells(&self, path: &[Point2D]) -> Vec<CellKey> {
        let mut seen = HashSet::default();
        path.iter()
            .map(|p| self.cell_of(*p))
            .filter(|key| seen.insert(*key))
            .collect()
    }

    /// Nimmt einen Pfad an, wenn der Anteil schon belegter Zellen unter `max_overlap` liegt
    /// oder er mindestens eine unterversorgte Zelle berührt. Leere Pfade nie.
    pub fn should_keep(&self, path: &[Point2D]) -> bool {
        let cells = self.unique_cells(path);
        if cells.is_empty() {
            return false;
        }

        let mut occupied = 0usize;
        let mut undercovered = false;
        for key in &cells {
            let count = self.coverage(*key);
            if count > 0 {
                occupied += 1;
            }
            if count < self.config.min_coverage {
                undercovered = true;
            }
        }

        let overlap = occupied as f32 / cells.len() as f32;
        overlap < self.config.max_overlap || undercovered
    }

    /// Zählt jede Zelle des Pfads genau einmal hoch.
    pub fn commit(&mut self, path: &[Point2D]) {
        for key in self.unique_cells(path) {
            *self.counts.entry(key).or_insert(0) += 1;
        }
    }

    /// `should_keep` und bei Erfolg `commit` in einem Schritt.
    pub fn offer(&mut self, path: &[Point2D]) -> bool {
        let keep = self.should_keep(path);
        if keep {
            self.commit(path);
        }
        keep
    }

    pub fn coverage(&self, key: CellKey) -> u32 {
        self.counts.get(&key).copied().unwrap_or(0)
    }

    pub fn coverage_at(&self, point: Point2D) -> u32 {
        self.coverage(self.cell_of(point))
    }

    /// Anzahl der Zellen mit mindestens einer Belegung.
    pub fn occupied_cells(&self) -> usize {
        self.counts.len()
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }
}
