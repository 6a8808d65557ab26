use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

use crate::engine::loading::lifecycle::AssetLifecycle;
use crate::engine::loading::progress::LoadStatus;
use crate::engine::particles::SphereSpawner;

#[derive(Component)]
pub struct StatsText;

pub fn spawn_stats_overlay(mut commands: Commands) {
    commands
        .spawn(Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("FPS: "),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1., 0., 0.)),
                Node {
                    position_type: PositionType::Absolute,
                    bottom: Val::Px(12.0),
                    right: Val::Px(12.0),
                    ..default()
                },
                StatsText,
            ));
        });
}

pub fn format_stats(
    fps: Option<f64>,
    displayed: Option<&str>,
    spheres: usize,
    status: &LoadStatus,
) -> String {
    let mut text = match fps {
        Some(value) => format!("FPS: {value:.1}"),
        None => "FPS: -".to_string(),
    };
    text.push_str(&format!("\nAsset: {}", displayed.unwrap_or("-")));
    if status.in_flight > 0 {
        text.push_str(&format!(" (loading {})", status.in_flight));
    }
    text.push_str(&format!("\nSpheres: {spheres}"));
    if let Some(error) = &status.last_error {
        text.push_str(&format!("\nError: {error}"));
    }
    text
}

pub fn stats_text_update_system(
    diagnostics: Res<DiagnosticsStore>,
    lifecycle: Res<AssetLifecycle>,
    spawner: Res<SphereSpawner>,
    status: Res<LoadStatus>,
    mut query: Query<&mut Text, With<StatsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed());
    let displayed = lifecycle.displayed().map(|asset| asset.id.as_str());

    for mut text in &mut query {
        text.0 = format_stats(fps, displayed, spawner.live_count(), &status);
    }
}
