use eframe::egui::{
    self,
    Align2,
    Color32,
    FontId,
    Pos2,
    Rect,
    Sense,
    Shape,
    Stroke,
};
use egui_extras::{
    Column,
    TableBuilder,
};

use crate::{
    core::{
        models::{
            Projection,
            HIGH_RISK_THRESHOLD,
        },
        SyncCore,
    },
    gui::theme::Theme,
};

const CHART_HEIGHT: f32 = 300.0;
const CHART_MARGIN: f32 = 32.0;

pub fn risk_gauge(ui: &mut egui::Ui, core: &SyncCore, theme: &Theme) {
    let ctx = ui.ctx().clone();
    let color = theme.risk(&ctx, core.is_high_risk());

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new("CVD PROBABILITY").size(14.0).color(color));
        ui.label(
            egui::RichText::new(format!("{:.1}%", core.derived_risk() * 100.0))
                .size(48.0)
                .strong()
                .color(color),
        );
        ui.label(
            egui::RichText::new(format!("Simulated Status: {}", core.risk_level().label()))
                .color(theme.muted(&ctx)),
        );

        if let Some(failure) = core.last_failure() {
            ui.add_space(4.0);
            ui.label(
                egui::RichText::new(format!("⚠ Offline, showing last projection ({})", failure.kind.label()))
                    .small()
                    .color(theme.yellow(&ctx)),
            )
            .on_hover_text(failure.message.as_str());
        }
    });
}

/// Maps projection space (year offset, probability) onto the plot rect.
struct PlotFrame {
    rect: Rect,
    max_offset: f32,
}

impl PlotFrame {
    fn point(&self, offset: f32, probability: f64) -> Pos2 {
        let x = if self.max_offset > 0.0 { offset / self.max_offset } else { 0.0 };
        Pos2::new(
            self.rect.left() + x * self.rect.width(),
            self.rect.bottom() - probability.clamp(0.0, 1.0) as f32 * self.rect.height(),
        )
    }
}

/// Last year offset on the x axis; long projections widen it past the horizon.
fn x_extent(horizon: u32, projection: Option<&Projection>) -> f32 {
    let last = projection.map(|p| p.len().saturating_sub(1)).unwrap_or(0);
    horizon.max(last as u32) as f32
}

pub fn trajectory(ui: &mut egui::Ui, core: &SyncCore, theme: &Theme) {
    let ctx = ui.ctx().clone();
    ui.vertical_centered(|ui| {
        ui.label(
            egui::RichText::new("Chronos Engine: 20-Year Risk Projection").color(theme.muted(&ctx)),
        );
    });

    let size = egui::vec2(ui.available_width(), CHART_HEIGHT);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let frame = PlotFrame {
        rect: response.rect.shrink2(egui::vec2(CHART_MARGIN, 16.0)),
        max_offset: x_extent(core.horizon(), core.projection()),
    };

    let grid = Stroke::new(1.0, theme.grid(&ctx));
    for tick in [0.0, 0.25, 0.5, 0.75, 1.0] {
        let left = frame.point(0.0, tick);
        let right = frame.point(frame.max_offset, tick);
        painter.line_segment([left, right], grid);
        painter.text(
            left - egui::vec2(6.0, 0.0),
            Align2::RIGHT_CENTER,
            format!("{:.2}", tick),
            FontId::monospace(10.0),
            theme.muted(&ctx),
        );
    }

    let threshold = [frame.point(0.0, HIGH_RISK_THRESHOLD), frame.point(frame.max_offset, HIGH_RISK_THRESHOLD)];
    painter.extend(Shape::dashed_line(&threshold, Stroke::new(1.0, Color32::GRAY), 4.0, 4.0));

    let Some(projection) = core.projection() else {
        painter.text(
            frame.rect.center(),
            Align2::CENTER_CENTER,
            "Waiting for first projection...",
            FontId::proportional(14.0),
            theme.muted(&ctx),
        );
        return;
    };

    draw_series(&painter, &frame, projection, theme.red(&ctx));
    draw_age_axis(&painter, &frame, projection, theme.muted(&ctx));

    let offset = core.offset();
    if let Some(point) = projection.get(offset as usize) {
        let top = frame.point(offset as f32, 1.0);
        let bottom = frame.point(offset as f32, 0.0);
        painter.line_segment([top, bottom], Stroke::new(1.5, theme.yellow(&ctx)));
        painter.circle_filled(frame.point(offset as f32, point.probability), 4.5, theme.yellow(&ctx));
    }

    if let Some(hover) = response.hover_pos() {
        if let Some(point) = nearest_point(&frame, projection, hover.x) {
            response.on_hover_text(format!(
                "Age {}: {:.1}%",
                point.age,
                point.probability * 100.0
            ));
        }
    }
}

fn draw_series(painter: &egui::Painter, frame: &PlotFrame, projection: &Projection, color: Color32) {
    let line: Vec<Pos2> = projection
        .points()
        .iter()
        .enumerate()
        .map(|(i, point)| frame.point(i as f32, point.probability))
        .collect();

    let fill = color.linear_multiply(0.15);
    for pair in line.windows(2) {
        let base_left = Pos2::new(pair[0].x, frame.rect.bottom());
        let base_right = Pos2::new(pair[1].x, frame.rect.bottom());
        painter.add(Shape::convex_polygon(
            vec![base_left, pair[0], pair[1], base_right],
            fill,
            Stroke::NONE,
        ));
    }

    painter.add(Shape::line(line, Stroke::new(2.0, color)));
}

fn draw_age_axis(painter: &egui::Painter, frame: &PlotFrame, projection: &Projection, color: Color32) {
    for (i, point) in projection.points().iter().enumerate().step_by(5) {
        let anchor = frame.point(i as f32, 0.0) + egui::vec2(0.0, 4.0);
        painter.text(anchor, Align2::CENTER_TOP, point.age.to_string(), FontId::monospace(10.0), color);
    }
}

fn nearest_point<'a>(
    frame: &PlotFrame,
    projection: &'a Projection,
    x: f32,
) -> Option<&'a crate::core::ProjectionPoint> {
    if projection.is_empty() || frame.rect.width() <= 0.0 {
        return None;
    }
    let relative = ((x - frame.rect.left()) / frame.rect.width()).clamp(0.0, 1.0);
    let index = (relative * frame.max_offset).round() as usize;
    projection.get(index.min(projection.len() - 1))
}

pub fn projection_table(ui: &mut egui::Ui, core: &SyncCore, theme: &Theme) {
    let Some(projection) = core.projection() else {
        return;
    };
    let ctx = ui.ctx().clone();
    let selected = core.offset() as usize;

    if let Some(peak) = projection.peak() {
        let source = core.cache().generation().map(|g| format!(" (projection {})", g)).unwrap_or_default();
        ui.label(
            egui::RichText::new(format!(
                "Peak risk {:.1}% at age {}{}",
                peak.probability * 100.0,
                peak.age,
                source
            ))
            .color(theme.muted(&ctx)),
        );
    }

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
        .column(Column::auto().at_least(60.0))
        .column(Column::auto().at_least(60.0))
        .column(Column::remainder())
        .max_scroll_height(180.0)
        .header(20.0, |mut header| {
            header.col(|ui| {
                ui.label(theme.heading(&ctx, "Year"));
            });
            header.col(|ui| {
                ui.label(theme.heading(&ctx, "Age"));
            });
            header.col(|ui| {
                ui.label(theme.heading(&ctx, "Risk"));
            });
        })
        .body(|body| {
            body.rows(18.0, projection.len(), |mut row| {
                let index = row.index();
                let Some(point) = projection.get(index) else {
                    return;
                };
                let color = if index == selected {
                    theme.yellow(&ctx)
                } else {
                    theme.risk(&ctx, point.probability > HIGH_RISK_THRESHOLD)
                };

                row.col(|ui| {
                    ui.label(egui::RichText::new(format!("+{}", index)).color(color));
                });
                row.col(|ui| {
                    ui.label(egui::RichText::new(point.age.to_string()).color(color));
                });
                row.col(|ui| {
                    ui.label(
                        egui::RichText::new(format!("{:.1}%", point.probability * 100.0))
                            .color(color),
                    );
                });
            });
        });
}
