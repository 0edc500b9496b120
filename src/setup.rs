// ./src/setup.rs
use bevy::prelude::*;
use field_strokes::math::geometry::polygon::PolygonRegion;
use field_strokes::math::types::*;
use std::path::PathBuf;

const CANVAS_SIZE: u32 = 400;

/// Die Regionen, die der Demo-Lauf füllt.
#[derive(Resource, Debug, Clone)]
pub struct DemoScene {
    pub canvas: CanvasBounds,
    pub regions: Vec<(String, PolygonRegion)>,
    pub output_dir: PathBuf,
}

pub fn setup_scene(mut commands: Commands) {
    let canvas = CanvasBounds::new(CANVAS_SIZE, CANVAS_SIZE);
    let center = canvas.to_bounds().center();

    // Konkaves "L", damit Ecken und Engstellen sichtbar werden
    let l_shape = PolygonRegion::new(vec![
        Vec2::new(40.0, 40.0),
        Vec2::new(360.0, 40.0),
        Vec2::new(360.0, 160.0),
        Vec2::new(170.0, 160.0),
        Vec2::new(170.0, 360.0),
        Vec2::new(40.0, 360.0),
    ]);

    let regions = vec![
        ("hexagon".to_string(), PolygonRegion::regular(center, 160.0, 6)),
        ("l_shape".to_string(), l_shape),
    ];

    info!("Demo scene with {} regions prepared.", regions.len());
    commands.insert_resource(DemoScene {
        canvas,
        regions,
        output_dir: PathBuf::from("output"),
    });
}
