use eframe::egui::{
    self,
    containers,
};

use crate::{
    core::{
        SyncCore,
        SyncState,
    },
    gui::theme::Theme,
    service::PointPrediction,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopBarAction {
    RefreshProjection,
    ToggleDarkMode,
}

/// Last answer from the service probe; `None` until the first probe returns.
#[derive(Debug, Clone, Default)]
pub struct ServiceStatus {
    pub online: Option<bool>,
    pub prediction: Option<PointPrediction>,
}

pub struct TopBar;

impl TopBar {
    pub fn show(
        ctx: &egui::Context,
        core: &SyncCore,
        service: &ServiceStatus,
        theme: &Theme,
    ) -> Option<TopBarAction> {
        let mut action = None;

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            containers::menu::Bar::new().ui(ui, |ui| {
                ui.label(theme.heading(ctx, "██ Myo-Sim Bio-Deck"));
                ui.add_space(8.0);
                ui.menu_button("View", |ui| {
                    if ui.button("Refresh projection").clicked() {
                        action = Some(TopBarAction::RefreshProjection);
                    }
                    if ui.button("Toggle dark mode").clicked() {
                        action = Some(TopBarAction::ToggleDarkMode);
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    Self::show_status_indicators(ui, core, service);
                });
            });
        });

        action
    }

    fn show_status_indicators(ui: &mut egui::Ui, core: &SyncCore, service: &ServiceStatus) {
        let (service_color, service_tooltip) = match service.online {
            Some(true) => (egui::Color32::from_rgb(0, 200, 0), "Risk service reachable".to_string()),
            Some(false) => (egui::Color32::from_rgb(200, 80, 80), "Risk service offline".to_string()),
            None => (egui::Color32::GRAY, "Checking risk service...".to_string()),
        };
        let service_tooltip = match &service.prediction {
            Some(prediction) => format!(
                "{} (current: {:?}, {:.1}%)",
                service_tooltip,
                prediction.risk,
                prediction.probability * 100.0
            ),
            None => service_tooltip,
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            ui.small("Service").on_hover_text(service_tooltip.as_str());
            ui.small(egui::RichText::new("●").color(service_color)).on_hover_text(service_tooltip.as_str());
        });

        ui.add_space(6.0);

        let state_color = match core.state() {
            SyncState::Settled => egui::Color32::from_rgb(0, 200, 0),
            SyncState::Failed => egui::Color32::from_rgb(200, 80, 80),
            SyncState::PendingDebounce | SyncState::RequestInFlight => {
                egui::Color32::from_rgb(220, 180, 60)
            }
            SyncState::Idle => egui::Color32::GRAY,
        };

        ui.horizontal(|ui| {
            ui.spacing_mut().item_spacing.x = 2.0;
            if core.state() == SyncState::RequestInFlight {
                ui.add(egui::Spinner::new().size(10.0));
            }
            ui.small(core.state().label());
            ui.small(egui::RichText::new("●").color(state_color));
            if core.is_stale() {
                ui.small(egui::RichText::new("STALE").color(egui::Color32::from_rgb(200, 80, 80)));
            }
        });
    }
}
