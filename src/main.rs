// ./src/main.rs
use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;

use field_strokes::debug::visualization::SvgSink;
use field_strokes::math::algorithms::{DashPattern, TurnPolicy};
use field_strokes::math::probability::SeedResource;
use field_strokes::modes::{
    ContourConfig, ContourMode, DrawingMode, FlowConfig, FlowFollow, FlowMode, GuidedFlowConfig,
    GuidedFlowMode, HatchConfig, HatchMode, RenderContext,
};

mod setup;

use setup::{DemoScene, setup_scene};

fn main() {
    App::new()
        .add_plugins(MinimalPlugins.set(ScheduleRunnerPlugin::run_once()))
        .add_plugins(LogPlugin::default())
        .insert_resource(SeedResource::from_text("field-strokes"))
        .add_systems(Startup, setup_scene)
        .add_systems(Update, render_modes_system)
        .run();
}

fn demo_modes() -> Vec<Box<dyn DrawingMode>> {
    vec![
        Box::new(ContourMode::new(ContourConfig::default().with_spacing(10.0))),
        Box::new(FlowMode::new(
            FlowConfig::default()
                .with_follow(FlowFollow::Tangent)
                .with_turn(Some(TurnPolicy::default().with_bias(20.0, 0.1))),
        )),
        Box::new(FlowMode::new(
            FlowConfig::default()
                .with_follow(FlowFollow::Gradient)
                .with_dash(Some(DashPattern::default().with_length_jitter(0.3))),
        )),
        Box::new(GuidedFlowMode::new(GuidedFlowConfig::default().with_bias(-35.0, 0.4))),
        Box::new(HatchMode::new(
            HatchConfig::default()
                .with_angle(30.0)
                .with_jitter(0.2)
                .with_cross(true),
        )),
    ]
}

/// Rendert jeden Modus in jede Region und schreibt je eine SVG-Datei.
fn render_modes_system(scene: Res<DemoScene>, seed: Res<SeedResource>) {
    if let Err(err) = std::fs::create_dir_all(&scene.output_dir) {
        error!(
            "Could not create output directory {}: {err}",
            scene.output_dir.display()
        );
        return;
    }

    for (index, mode) in demo_modes().iter().enumerate() {
        for (name, region) in &scene.regions {
            let category = format!("{}-{index}", mode.name());
            let mut ctx = RenderContext::from_seed(&seed, scene.canvas, &category);
            let mut sink = SvgSink::new(scene.canvas).with_outline(region);
            let stats = mode.render(region, &mut ctx, &mut sink);

            let filename = scene.output_dir.join(format!("{category}_{name}.svg"));
            match sink.save(&filename) {
                Ok(()) => info!(
                    "{category} on {name}: {} polylines, {} segments, {} rejected",
                    stats.polylines, stats.segments, stats.rejected
                ),
                Err(err) => error!("Failed to write {}: {err}", filename.display()),
            }
        }
    }
}
