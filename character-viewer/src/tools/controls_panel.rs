use bevy::prelude::*;
use bevy::render::mesh::morph::MorphWeights;
use bevy_egui::{EguiContexts, egui};

use crate::engine::assets::catalog::ActiveCatalog;
use crate::engine::loading::asset_loader::{LoadAssetRequest, ModelLoadFailed};
use crate::engine::loading::lifecycle::AssetLifecycle;
use crate::engine::loading::progress::LoadStatus;

use super::input::PointerCapture;
use super::morph::MorphBindings;

/// Selector state. Holds the last identifier the user picked, which may still be loading.
#[derive(Resource, Debug, Default)]
pub struct ControlsPanelState {
    pub selected_asset: Option<String>,
}

impl ControlsPanelState {
    /// Record a pick and return the request to issue, if the pick is new.
    pub fn select(&mut self, id: &str) -> Option<LoadAssetRequest> {
        if self.selected_asset.as_deref() == Some(id) {
            return None;
        }
        self.selected_asset = Some(id.to_string());
        Some(LoadAssetRequest { id: id.to_string() })
    }
}

/// Point the selector back at the displayed asset when the picked one fails to
/// load, so picking it again retries.
pub fn resync_selection_after_failure(
    mut failures: EventReader<ModelLoadFailed>,
    lifecycle: Res<AssetLifecycle>,
    mut state: ResMut<ControlsPanelState>,
) {
    for failure in failures.read() {
        if state.selected_asset.as_deref() != Some(failure.error.asset_id()) {
            continue;
        }
        state.selected_asset = lifecycle.displayed().map(|asset| asset.id.clone());
    }
}

/// Load the catalog's default asset once the catalog is settled.
pub fn request_default_asset(
    catalog: Res<ActiveCatalog>,
    mut state: ResMut<ControlsPanelState>,
    mut requests: EventWriter<LoadAssetRequest>,
    mut requested: Local<bool>,
) {
    if *requested || !catalog.is_settled() {
        return;
    }
    *requested = true;

    let Some(default) = catalog.catalog.default_asset() else {
        warn!("Asset catalog is empty, nothing to display");
        return;
    };
    if let Some(request) = state.select(default) {
        requests.write(request);
    }
}

/// Asset selector, load status and, when the asset has morph targets, one
/// slider per target grouped by mesh.
#[allow(clippy::too_many_arguments)]
pub fn controls_panel_ui(
    mut contexts: EguiContexts,
    catalog: Res<ActiveCatalog>,
    status: Res<LoadStatus>,
    bindings: Res<MorphBindings>,
    mut weights: Query<&mut MorphWeights>,
    mut state: ResMut<ControlsPanelState>,
    mut requests: EventWriter<LoadAssetRequest>,
    mut capture: ResMut<PointerCapture>,
) {
    let Some(ctx) = contexts.try_ctx_mut() else {
        return;
    };

    let mut picked = None;
    egui::Window::new("Controls")
        .default_pos(egui::pos2(12.0, 12.0))
        .default_width(280.0)
        .show(ctx, |ui| {
            let selected_text = state.selected_asset.as_deref().unwrap_or("-");
            egui::ComboBox::from_label("Asset")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    for id in &catalog.catalog.assets {
                        let is_selected = state.selected_asset.as_deref() == Some(id.as_str());
                        if ui.selectable_label(is_selected, id).clicked() {
                            picked = Some(id.clone());
                        }
                    }
                });

            if status.in_flight > 0 {
                ui.label(format!("Loading ({})...", status.in_flight));
            }
            if let Some(error) = &status.last_error {
                ui.colored_label(egui::Color32::LIGHT_RED, error.to_string());
            }

            if !bindings.is_visible() {
                return;
            }
            ui.separator();
            ui.heading("Morphs");
            for group in bindings.groups() {
                let Ok(mut morph) = weights.get_mut(group.entity) else {
                    continue;
                };
                egui::CollapsingHeader::new(&group.label)
                    .id_salt(group.entity)
                    .default_open(true)
                    .show(ui, |ui| {
                        for binding in &group.bindings {
                            let Some(mut value) = morph.weights().get(binding.index).copied()
                            else {
                                continue;
                            };
                            let slider = egui::Slider::new(&mut value, 0.0..=1.0)
                                .step_by(0.01)
                                .text(&binding.name);
                            if ui.add(slider).changed() {
                                morph.weights_mut()[binding.index] = value;
                            }
                        }
                    });
            }
        });

    capture.ui_wants_pointer = ctx.wants_pointer_input() || ctx.is_pointer_over_area();

    if let Some(id) = picked {
        if let Some(request) = state.select(&id) {
            info!("Selected `{}`", id);
            requests.write(request);
        }
    }
}
