use std::time::{
    Duration,
    Instant,
};

use eframe::egui;
use log::{
    info,
    warn,
};

use super::{
    chart,
    controls::{
        ControlAction,
        ControlPanel,
    },
    theme::{
        set_theme,
        Theme,
    },
    top_bar::{
        ServiceStatus,
        TopBar,
        TopBarAction,
    },
};
use crate::{
    config::{
        Settings,
        SETTINGS_FILE,
    },
    core::{
        models::ParameterSet,
        tasks::{
            TaskManager,
            TaskResult,
        },
        MyoSimError,
        SyncCore,
    },
    persistence::save_json,
};

const IN_FLIGHT_REPAINT: Duration = Duration::from_millis(100);

pub struct MyoSimApp {
    // Projection state
    core: SyncCore,

    // Configuration
    settings: Settings,

    // UI State
    theme: Theme,
    service: ServiceStatus,
    last_service_check: Option<Instant>,

    // External Services
    task_manager: TaskManager,
}

impl MyoSimApp {
    pub fn new(cc: &eframe::CreationContext<'_>, settings: Settings) -> Result<Self, MyoSimError> {
        let task_manager = TaskManager::new(&settings)?;
        let mut core = SyncCore::new(ParameterSet::default(), settings.debounce_window());

        // the default profile is projected without waiting for an edit
        core.request_refresh(Instant::now());

        let theme = Theme::bio_deck();
        set_theme(&cc.egui_ctx, &theme);
        cc.egui_ctx.set_theme(if settings.dark_mode { egui::Theme::Dark } else { egui::Theme::Light });

        info!(
            "event=app_ready service_url={} debounce_ms={}",
            settings.service_url, settings.debounce_ms
        );

        Ok(Self {
            core,
            settings,
            theme,
            service: ServiceStatus::default(),
            last_service_check: None,
            task_manager,
        })
    }

    fn handle_task_result(&mut self, result: TaskResult) {
        match result {
            TaskResult::Projection { generation, result } => {
                self.core.apply_response(generation, result);
            }
            TaskResult::ServiceStatus(result) => match result {
                Ok(prediction) => {
                    self.service.online = Some(true);
                    self.service.prediction = Some(prediction);
                }
                Err(failure) => {
                    if self.service.online != Some(false) {
                        warn!("event=service_offline error={}", failure);
                    }
                    self.service.online = Some(false);
                    self.service.prediction = None;
                }
            },
        }
    }

    fn update_service_status(&mut self, now: Instant) {
        let should_check = match self.last_service_check {
            None => true,
            Some(last_check) => {
                now.duration_since(last_check) >= self.settings.service_check_interval()
            }
        };

        if should_check {
            self.task_manager.check_service(self.core.parameters().clone());
            self.last_service_check = Some(now);
        }
    }

    fn apply_control_actions(&mut self, actions: Vec<ControlAction>, now: Instant) {
        for action in actions {
            match action {
                ControlAction::SetField(field, value) => {
                    self.core.set_field(field, value, now);
                }
                ControlAction::ResetParameters => {
                    self.core.replace_parameters(ParameterSet::default(), now);
                }
                ControlAction::Scrub(offset) => {
                    self.core.set_offset(offset);
                }
            }
        }
    }

    fn handle_top_bar_action(&mut self, action: TopBarAction, ctx: &egui::Context, now: Instant) {
        match action {
            TopBarAction::RefreshProjection => self.core.request_refresh(now),
            TopBarAction::ToggleDarkMode => {
                self.settings.dark_mode = !self.settings.dark_mode;
                ctx.set_theme(if self.settings.dark_mode {
                    egui::Theme::Dark
                } else {
                    egui::Theme::Light
                });
                self.save_settings();
            }
        }
    }

    fn schedule_repaint(&self, ctx: &egui::Context, now: Instant) {
        if let Some(deadline) = self.core.next_deadline() {
            ctx.request_repaint_after(deadline.saturating_duration_since(now));
        }
        if self.core.awaiting_generation().is_some() {
            ctx.request_repaint_after(IN_FLIGHT_REPAINT);
        }
        ctx.request_repaint_after(self.settings.service_check_interval());
    }

    fn save_settings(&self) {
        if let Err(e) = save_json(&self.settings, SETTINGS_FILE) {
            warn!("event=settings_save_failed error={}", e);
        }
    }
}

impl eframe::App for MyoSimApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        for result in self.task_manager.poll_results() {
            self.handle_task_result(result);
        }

        self.update_service_status(now);
        self.core.tick(now, &self.task_manager);

        if let Some(action) = TopBar::show(ctx, &self.core, &self.service, &self.theme) {
            self.handle_top_bar_action(action, ctx, now);
        }

        let actions = egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(350.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .show(ui, |ui| ControlPanel::show(ui, &self.core, &self.theme))
                    .inner
            })
            .inner;
        self.apply_control_actions(actions, now);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                chart::risk_gauge(ui, &self.core, &self.theme);
                ui.add_space(24.0);
                chart::trajectory(ui, &self.core, &self.theme);
                ui.add_space(16.0);
                chart::projection_table(ui, &self.core, &self.theme);
            });
        });

        self.schedule_repaint(ctx, now);
    }
}
