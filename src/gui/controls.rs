use eframe::egui;

use crate::{
    core::{
        models::{
            Field,
            FieldKind,
            ParameterSet,
        },
        SyncCore,
    },
    gui::theme::Theme,
};

const SLIDER_FIELDS: [Field; 5] =
    [Field::Age, Field::RestingBp, Field::Cholesterol, Field::MaxHeartRate, Field::StDepression];

const CATEGORICAL_FIELDS: [Field; 7] = [
    Field::ChestPain,
    Field::FastingBloodSugar,
    Field::RestingEcg,
    Field::ExerciseAngina,
    Field::Slope,
    Field::Vessels,
    Field::Thal,
];

#[derive(Debug, Clone, PartialEq)]
pub enum ControlAction {
    SetField(Field, f64),
    ResetParameters,
    Scrub(i64),
}

pub struct ControlPanel;

impl ControlPanel {
    /// Draws the inputs and reports what the user changed this frame.
    pub fn show(ui: &mut egui::Ui, core: &SyncCore, theme: &Theme) -> Vec<ControlAction> {
        let mut actions = Vec::new();
        let params = core.parameters();
        let ctx = ui.ctx().clone();

        ui.label(theme.heading(&ctx, "Patient Vitals"));
        ui.add_space(6.0);
        for field in SLIDER_FIELDS {
            Self::slider(ui, field, params, theme, &mut actions);
        }

        ui.add_space(12.0);
        ui.label(theme.section(&ctx, "Categorical"));
        ui.add_space(6.0);
        Self::sex_buttons(ui, params, theme, &mut actions);
        ui.add_space(6.0);
        egui::Grid::new("categorical_grid").num_columns(2).spacing([8.0, 6.0]).show(ui, |ui| {
            for field in CATEGORICAL_FIELDS {
                ui.small(field.label());
                Self::categorical(ui, field, params, &mut actions);
                ui.end_row();
            }
        });

        ui.add_space(8.0);
        if ui.button("Reset to defaults").clicked() {
            actions.push(ControlAction::ResetParameters);
        }

        ui.add_space(24.0);
        ui.label(egui::RichText::new("⏳ Chronos Engine").color(theme.yellow(&ctx)).strong());
        ui.horizontal(|ui| {
            ui.small(format!("Years Ahead: +{}", core.offset()));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(
                    egui::RichText::new(format!("{} yrs old", core.selected_age()))
                        .color(theme.teal(&ctx))
                        .strong(),
                );
            });
        });

        let mut offset = core.offset();
        let response = ui.add(egui::Slider::new(&mut offset, 0..=core.horizon()).show_value(false));
        if response.changed() {
            actions.push(ControlAction::Scrub(offset as i64));
        }

        actions
    }

    fn slider(
        ui: &mut egui::Ui,
        field: Field,
        params: &ParameterSet,
        theme: &Theme,
        actions: &mut Vec<ControlAction>,
    ) {
        let bounds = field.bounds();
        let mut value = params.get(field);

        ui.horizontal(|ui| {
            ui.small(field.label());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.small(
                    egui::RichText::new(format_value(field, value))
                        .color(theme.teal(ui.ctx()))
                        .strong(),
                );
            });
        });

        let slider = egui::Slider::new(&mut value, bounds.min..=bounds.max)
            .step_by(bounds.step)
            .show_value(false);
        if ui.add(slider).changed() {
            actions.push(ControlAction::SetField(field, value));
        }
        ui.add_space(4.0);
    }

    fn sex_buttons(
        ui: &mut egui::Ui,
        params: &ParameterSet,
        theme: &Theme,
        actions: &mut Vec<ControlAction>,
    ) {
        ui.horizontal(|ui| {
            for &(code, name) in Field::Sex.options() {
                let selected = params.sex == code;
                let fill = if selected {
                    theme.blue(ui.ctx())
                } else {
                    ui.visuals().widgets.inactive.bg_fill
                };
                let button = egui::Button::new(name).fill(fill).min_size(egui::vec2(80.0, 24.0));
                if ui.add(button).clicked() && !selected {
                    actions.push(ControlAction::SetField(Field::Sex, code as f64));
                }
            }
        });
    }

    fn categorical(
        ui: &mut egui::Ui,
        field: Field,
        params: &ParameterSet,
        actions: &mut Vec<ControlAction>,
    ) {
        let current = params.get(field);

        if field.kind() == FieldKind::Continuous {
            // vessel count is a float on the wire, edited as a small number
            let bounds = field.bounds();
            let mut value = current;
            if ui.add(egui::DragValue::new(&mut value).range(bounds.min..=bounds.max)).changed() {
                actions.push(ControlAction::SetField(field, value));
            }
            return;
        }

        let selected_text = field
            .options()
            .iter()
            .find(|(code, _)| *code as f64 == current)
            .map(|(_, name)| name.to_string())
            .unwrap_or_else(|| current.to_string());

        egui::ComboBox::from_id_salt(field.name()).selected_text(selected_text).width(150.0).show_ui(
            ui,
            |ui| {
                for &(code, name) in field.options() {
                    if ui.selectable_label(code as f64 == current, name).clicked() {
                        actions.push(ControlAction::SetField(field, code as f64));
                    }
                }
            },
        );
    }
}

fn format_value(field: Field, value: f64) -> String {
    if field.bounds().step < 1.0 {
        format!("{:.1}", value)
    } else {
        format!("{:.0}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_field_has_a_control() {
        for field in Field::ALL {
            let covered = field == Field::Sex
                || SLIDER_FIELDS.contains(&field)
                || CATEGORICAL_FIELDS.contains(&field);
            assert!(covered, "{} has no control", field);
        }
    }

    #[test]
    fn test_value_formatting_follows_step() {
        assert_eq!(format_value(Field::StDepression, 1.24), "1.2");
        assert_eq!(format_value(Field::Cholesterol, 212.0), "212");
    }
}
