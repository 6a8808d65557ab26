use bevy::asset::AssetMetaCheck;
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy_common_assets::json::JsonAssetPlugin;
use bevy_egui::EguiPlugin;

// Crate engine modules
use crate::engine::assets::catalog::{
    ActiveCatalog, AssetCatalog, apply_loaded_catalog, start_catalog_loading,
};
use crate::engine::camera::orbit_camera::{orbit_camera_controller, spawn_viewer_camera};
use crate::engine::core::settings::{ViewerSettings, configure_frame_time};
use crate::engine::core::window_config::create_window_config;
use crate::engine::loading::animation::play_first_clip;
use crate::engine::loading::asset_loader::{
    LoadAssetRequest, ModelLoadFailed, ModelLoaded, PendingLoads, poll_pending_loads,
    request_asset_loads,
};
use crate::engine::loading::lifecycle::{AssetLifecycle, install_loaded_model};
use crate::engine::loading::progress::{LoadStatus, record_load_failures};
use crate::engine::particles::{
    SphereSpawner, create_sphere_assets, integrate_falling_spheres, spawn_falling_spheres,
};
use crate::engine::scene::environment::spawn_environment;
use crate::engine::scene::marker::{place_marker_above_model, spawn_target_marker};
use crate::engine::systems::fps_tracking::{spawn_stats_overlay, stats_text_update_system};
// Crate tools modules
use crate::tools::{
    controls_panel::{
        ControlsPanelState, controls_panel_ui, request_default_asset,
        resync_selection_after_failure,
    },
    directional_pad::{handle_directional_buttons, spawn_directional_pad, track_pad_hover},
    input::{InputFlags, PointerCapture, apply_camera_movement, read_keyboard_input},
    morph::{MorphBindings, rebuild_morph_bindings},
};

const LOG_FILTER: &str = "info,wgpu=error,naga=warn,character_viewer=debug";

pub fn create_app() -> App {
    let mut app = App::new();

    app.add_plugins(create_default_plugins())
        .add_plugins(EguiPlugin {
            enable_multipass_for_primary_context: false,
        })
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        // Registers the asset catalog as a loadable asset type from JSON files.
        .add_plugins(JsonAssetPlugin::<AssetCatalog>::new(&["json"]));

    // Initialise resources early
    app.init_resource::<ViewerSettings>()
        .init_resource::<ActiveCatalog>()
        .init_resource::<PendingLoads>()
        .init_resource::<LoadStatus>()
        .init_resource::<AssetLifecycle>()
        .init_resource::<MorphBindings>()
        .init_resource::<SphereSpawner>()
        .init_resource::<InputFlags>()
        .init_resource::<PointerCapture>()
        .init_resource::<ControlsPanelState>()
        .add_event::<LoadAssetRequest>()
        .add_event::<ModelLoaded>()
        .add_event::<ModelLoadFailed>();

    app.add_systems(
        Startup,
        (
            configure_frame_time,
            spawn_environment,
            (create_sphere_assets, spawn_target_marker).chain(),
            spawn_viewer_camera,
            spawn_directional_pad,
            spawn_stats_overlay,
            start_catalog_loading,
        ),
    );

    // Loading: catalog, requests, completion and the single install point
    app.add_systems(
        Update,
        (
            apply_loaded_catalog,
            request_default_asset,
            request_asset_loads,
            poll_pending_loads,
            record_load_failures,
            install_loaded_model,
        )
            .chain(),
    );

    // Follow-up once the new scene instance is ready
    app.add_systems(
        Update,
        (play_first_clip, rebuild_morph_bindings, place_marker_above_model)
            .after(install_loaded_model)
            .before(spawn_falling_spheres),
    );

    // Frame driver
    app.add_systems(
        Update,
        (
            read_keyboard_input,
            handle_directional_buttons,
            track_pad_hover,
            spawn_falling_spheres,
            integrate_falling_spheres,
            apply_camera_movement,
            orbit_camera_controller,
            stats_text_update_system,
        )
            .chain(),
    );

    app.add_systems(
        Update,
        resync_selection_after_failure.after(record_load_failures),
    );

    app.add_systems(
        Update,
        controls_panel_ui
            .after(request_default_asset)
            .before(request_asset_loads)
            .before(orbit_camera_controller),
    );

    app
}

fn create_default_plugins() -> impl PluginGroup {
    let window_config = WindowPlugin {
        primary_window: Some(create_window_config()),
        ..default()
    };

    let asset_config = AssetPlugin {
        meta_check: AssetMetaCheck::Never,
        ..default()
    };

    let log_config = LogPlugin {
        filter: LOG_FILTER.to_string(),
        ..default()
    };

    DefaultPlugins
        .set(window_config)
        .set(asset_config)
        .set(log_config)
}
