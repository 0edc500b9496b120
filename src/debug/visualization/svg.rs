// src/debug/visualization/svg.rs
use crate::math::error::MathResult;
use crate::math::geometry::polygon::PolygonRegion;
use crate::math::types::*;
use crate::modes::DrawingSink;
use bevy::log::info;
use std::path::Path;
use svg::Document;
use svg::node::element::path::Data;
use svg::node::element::{Path as SvgPath, Rectangle};

/// Schreibt alle empfangenen Striche als SVG-Pfade.
///
/// Die ViewBox entspricht der Leinwand, Strichbreiten sind absolut in Weltkoordinaten.
#[derive(Debug, Clone)]
pub struct SvgSink {
    canvas: CanvasBounds,
    stroke: String,
    stroke_width: f32,
    background: Option<String>,
    outline: Option<Vec<Point2D>>,
    paths: Vec<SvgPath>,
}

impl SvgSink {
    pub fn new(canvas: CanvasBounds) -> Self {
        let stroke_width = (canvas.width + canvas.height) as f32 / 2.0 * 0.002;
        Self {
            canvas,
            stroke: "#1a1a1a".to_string(),
            stroke_width: stroke_width.max(0.25),
            background: Some("#f0f0f0".to_string()),
            outline: None,
            paths: Vec::new(),
        }
    }

    pub fn with_stroke(mut self, color: impl Into<String>, width: f32) -> Self {
        self.stroke = color.into();
        self.stroke_width = width;
        self
    }

    pub fn with_background(mut self, color: Option<String>) -> Self {
        self.background = color;
        self
    }

    /// Zeichnet den Umriss der Region gestrichelt mit.
    pub fn with_outline(mut self, region: &PolygonRegion) -> Self {
        self.outline = Some(region.vertices().to_vec());
        self
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    fn stroke_path(&self, data: Data) -> SvgPath {
        SvgPath::new()
            .set("fill", "none")
            .set("stroke", self.stroke.as_str())
            .set("stroke-width", self.stroke_width)
            .set("stroke-linecap", "round")
            .set("stroke-linejoin", "round")
            .set("d", data)
    }

    pub fn document(&self) -> Document {
        let width = self.canvas.width;
        let height = self.canvas.height;
        let mut document = Document::new()
            .set("width", width)
            .set("height", height)
            .set("viewBox", format!("0 0 {width} {height}"));

        if let Some(color) = &self.background {
            document = document.add(
                Rectangle::new()
                    .set("x", 0)
                    .set("y", 0)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", color.as_str()),
            );
        }

        if let Some(outline) = self.outline.as_deref().filter(|o| o.len() >= 2) {
            let mut data = Data::new().move_to((outline[0].x, outline[0].y));
            for p in &outline[1..] {
                data = data.line_to((p.x, p.y));
            }
            document = document.add(
                SvgPath::new()
                    .set("fill", "none")
                    .set("stroke", "#888888")
                    .set("stroke-width", self.stroke_width)
                    .set("stroke-dasharray", "4,4")
                    .set("d", data.close()),
            );
        }

        self.paths
            .iter()
            .cloned()
            .fold(document, |doc, path| doc.add(path))
    }

    pub fn save(&self, filename: impl AsRef<Path>) -> MathResult<()> {
        let filename = filename.as_ref();
        svg::save(filename, &self.document())?;
        info!(
            "SVG '{}' written ({} strokes).",
            filename.display(),
            self.paths.len()
        );
        Ok(())
    }
}

impl DrawingSink for SvgSink {
    fn polyline(&mut self, points: &[Point2D]) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        if rest.is_empty() {
            return;
        }
        let data = rest
            .iter()
            .fold(Data::new().move_to((first.x, first.y)), |data, p| {
                data.line_to((p.x, p.y))
            });
        let path = self.stroke_path(data);
        self.paths.push(path);
    }
}
