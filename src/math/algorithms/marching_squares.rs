// src/math/algorithms/marching_squares.rs

use crate::math::scalar_field::ScalarField2D;
use crate::math::utils::constants;
use bevy::math::Vec2;
use bevy::utils::HashMap;

/// Kanten einer Gitterzelle. Oben = Zeile `j`, unten = Zeile `j + 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CellEdge {
    Top,
    Right,
    Bottom,
    Left,
}

use CellEdge::*;

/// Segmente pro Zellkonfiguration.
/// Konvention: Bit 8: oben-links, Bit 4: oben-rechts, Bit 2: unten-rechts, Bit 1: unten-links.
/// Die Sattelfälle 5 und 10 werden immer gleich aufgelöst (innere Ecken verbunden),
/// ohne Mittelpunkt-Test.
const EDGE_TABLE: [[Option<(CellEdge, CellEdge)>; 2]; 16] = [
    [None, None],                                 // 0000
    [Some((Left, Bottom)), None],                 // 0001
    [Some((Bottom, Right)), None],                // 0010
    [Some((Left, Right)), None],                  // 0011
    [Some((Top, Right)), None],                   // 0100
    [Some((Top, Left)), Some((Bottom, Right))],   // 0101 Sattel
    [Some((Top, Bottom)), None],                  // 0110
    [Some((Top, Left)), None],                    // 0111
    [Some((Left, Top)), None],                    // 1000
    [Some((Top, Bottom)), None],                  // 1001
    [Some((Top, Right)), Some((Left, Bottom))],   // 1010 Sattel
    [Some((Top, Right)), None],                   // 1011
    [Some((Left, Right)), None],                  // 1100
    [Some((Bottom, Right)), None],                // 1101
    [Some((Bottom, Left)), None],                 // 1110
    [None, None],                                 // 1111
];

/// Extrahierte Iso-Linie als Polyline (aus Segmenten zusammengesetzt).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contour {
    pub vertices: Vec<Vec2>,
    pub is_closed: bool,
}

impl Contour {
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

/// Marching Squares über einem beliebigen [`ScalarField2D`].
pub struct MarchingSquares;

impl MarchingSquares {
    /// Läuft über alle 2×2-Zellen und meldet jedes Iso-Segment über `emit`.
    ///
    /// Es wird nichts gesammelt; der Speicherbedarf bleibt bei einer Zelle.
    pub fn march<F, E>(field: &F, iso_level: f32, mut emit: E)
    where
        F: ScalarField2D + ?Sized,
        E: FnMut(Vec2, Vec2),
    {
        let width = field.width();
        let height = field.height();
        if width < 2 || height < 2 {
            return;
        }

        for y in 0..height - 1 {
            for x in 0..width - 1 {
                let cell = Cell::read(field, x, y);
                let config = cell.configuration(iso_level);
                for (e1, e2) in EDGE_TABLE[config].iter().flatten() {
                    let p1 = cell.edge_point(*e1, iso_level);
                    let p2 = cell.edge_point(*e2, iso_level);
                    emit(p1, p2);
                }
            }
        }
    }

    /// Sammelt alle Segmente eines Iso-Levels.
    pub fn extract_segments<F: ScalarField2D + ?Sized>(
        field: &F,
        iso_level: f32,
    ) -> Vec<(Vec2, Vec2)> {
        let mut segments = Vec::new();
        Self::march(field, iso_level, |a, b| segments.push((a, b)));
        segments
    }

    /// Setzt Segmente zu Polylines zusammen. Endpunkte gelten als gleich, wenn sie
    /// auf dasselbe `tolerance`-Raster fallen.
    pub fn chain_segments(segments: &[(Vec2, Vec2)], tolerance: f32) -> Vec<Contour> {
        let tolerance = tolerance.max(constants::EPSILON);
        let key = |p: Vec2| {
            (
                (p.x / tolerance).round() as i64,
                (p.y / tolerance).round() as i64,
            )
        };

        // Endpunkt -> Segmentindizes
        let mut by_endpoint: HashMap<(i64, i64), Vec<usize>> = HashMap::default();
        for (idx, (a, b)) in segments.iter().enumerate() {
            by_endpoint.entry(key(*a)).or_default().push(idx);
            by_endpoint.entry(key(*b)).or_default().push(idx);
        }

        let mut used = vec![false; segments.len()];
        let mut contours = Vec::new();

        for start in 0..segments.len() {
            if used[start] {
                continue;
            }
            used[start] = true;
            let (a, b) = segments[start];
            let mut forward = vec![a, b];
            Self::extend_chain(&mut forward, segments, &by_endpoint, &mut used, key);

            let mut backward = vec![a];
            Self::extend_chain(&mut backward, segments, &by_endpoint, &mut used, key);
            backward.reverse();
            backward.pop();
            backward.extend(forward);

            let is_closed =
                backward.len() > 3 && key(backward[0]) == key(backward[backward.len() - 1]);
            if is_closed {
                backward.pop();
            }
            contours.push(Contour {
                vertices: backward,
                is_closed,
            });
        }
        contours
    }

    fn extend_chain(
        chain: &mut Vec<Vec2>,
        segments: &[(Vec2, Vec2)],
        by_endpoint: &HashMap<(i64, i64), Vec<usize>>,
        used: &mut [bool],
        key: impl Fn(Vec2) -> (i64, i64),
    ) {
        while let Some(&tail) = chain.last() {
            let next = by_endpoint
                .get(&key(tail))
                .and_then(|candidates| candidates.iter().copied().find(|&c| !used[c]));
            let Some(idx) = next else {
                break;
            };
            used[idx] = true;
            let (a, b) = segments[idx];
            chain.push(if key(a) == key(tail) { b } else { a });
        }
    }
}

/// Vier Eckwerte einer Zelle plus ihre Weltpositionen.
struct Cell {
    tl: (f32, Vec2),
    tr: (f32, Vec2),
    br: (f32, Vec2),
    bl: (f32, Vec2),
}

impl Cell {
    fn read<F: ScalarField2D + ?Sized>(field: &F, x: usize, y: usize) -> Self {
        let at = |i: usize, j: usize| (field.get_value(i, j), field.cell_to_world(i, j));
        Self {
            tl: at(x, y),
            tr: at(x + 1, y),
            br: at(x + 1, y + 1),
            bl: at(x, y + 1),
        }
    }

    fn configuration(&self, iso_level: f32) -> usize {
        let mut config_idx = 0;
        if self.tl.0 >= iso_level {
            config_idx |= 8;
        }
        if self.tr.0 >= iso_level {
            config_idx |= 4;
        }
        if self.br.0 >= iso_level {
            config_idx |= 2;
        }
        if self.bl.0 >= iso_level {
            config_idx |= 1;
        }
        config_idx
    }

    fn edge_point(&self, edge: CellEdge, iso_level: f32) -> Vec2 {
        let (a, b) = match edge {
            Top => (self.tl, self.tr),
            Right => (self.tr, self.br),
            Bottom => (self.bl, self.br),
            Left => (self.tl, self.bl),
        };
        interpolate_intersection(iso_level, a.0, b.0, a.1, b.1)
    }
}

fn interpolate_intersection(iso_level: f32, val1: f32, val2: f32, p1: Vec2, p2: Vec2) -> Vec2 {
    if (val1 - val2).abs() < constants::EPSILON {
        return (p1 + p2) * 0.5;
    }
    let t = ((iso_level - val1) / (val2 - val1)).clamp(0.0, 1.0);
    p1.lerp(p2, t)
}
