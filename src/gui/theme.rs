use eframe::egui::{
    self,
    RichText,
};
use egui::{
    epaint::Shadow,
    style::{
        Selection,
        WidgetVisuals,
        Widgets,
    },
    Color32,
    Stroke,
    Visuals,
};

#[derive(Clone)]
pub struct Theme {
    dark: ThemeDetails,
    light: ThemeDetails,
}

impl Default for Theme {
    fn default() -> Self {
        Self::bio_deck()
    }
}

impl Theme {
    pub fn bio_deck() -> Self {
        Theme { dark: ThemeDetails::bio_deck_dark(), light: ThemeDetails::bio_deck_light() }
    }

    fn details(&self, ctx: &egui::Context) -> &ThemeDetails {
        if ctx.style().visuals.dark_mode {
            &self.dark
        } else {
            &self.light
        }
    }

    pub fn heading(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.details(ctx).teal).strong()
    }

    pub fn section(&self, ctx: &egui::Context, content: &str) -> RichText {
        RichText::new(content).color(self.details(ctx).orange).strong()
    }

    pub fn muted(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).muted
    }

    pub fn teal(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).teal
    }

    pub fn red(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).red
    }

    pub fn yellow(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).yellow
    }

    pub fn blue(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).blue
    }

    pub fn grid(&self, ctx: &egui::Context) -> Color32 {
        self.details(ctx).border
    }

    /// Red above the high-risk threshold, teal otherwise.
    pub fn risk(&self, ctx: &egui::Context, high: bool) -> Color32 {
        if high {
            self.red(ctx)
        } else {
            self.teal(ctx)
        }
    }
}

#[derive(Clone)]
struct ThemeDetails {
    background: Color32,
    panel: Color32,
    widget: Color32,
    border: Color32,
    foreground: Color32,
    muted: Color32,
    teal: Color32,
    red: Color32,
    yellow: Color32,
    orange: Color32,
    blue: Color32,
}

impl ThemeDetails {
    fn bio_deck_dark() -> Self {
        Self {
            background: Color32::from_rgb(0x1e, 0x1e, 0x1e),
            panel: Color32::from_rgb(0x25, 0x25, 0x26),
            widget: Color32::from_rgb(0x33, 0x33, 0x33),
            border: Color32::from_rgb(0x44, 0x44, 0x44),
            foreground: Color32::from_rgb(0xe0, 0xe0, 0xe0),
            muted: Color32::from_rgb(0xaa, 0xaa, 0xaa),
            teal: Color32::from_rgb(0x4e, 0xc9, 0xb0),
            red: Color32::from_rgb(0xf1, 0x4c, 0x4c),
            yellow: Color32::from_rgb(0xdc, 0xdc, 0xaa),
            orange: Color32::from_rgb(0xce, 0x91, 0x78),
            blue: Color32::from_rgb(0x00, 0x7a, 0xcc),
        }
    }

    fn bio_deck_light() -> Self {
        Self {
            background: Color32::from_rgb(248, 248, 246),
            panel: Color32::from_rgb(238, 238, 236),
            widget: Color32::from_rgb(222, 222, 220),
            border: Color32::from_rgb(200, 200, 200),
            foreground: Color32::from_rgb(36, 36, 36),
            muted: Color32::from_rgb(110, 110, 110),
            teal: Color32::from_rgb(0x1f, 0x8f, 0x7a),
            red: Color32::from_rgb(200, 60, 60),
            yellow: Color32::from_rgb(160, 140, 40),
            orange: Color32::from_rgb(180, 100, 60),
            blue: Color32::from_rgb(0x00, 0x6a, 0xb4),
        }
    }
}

pub fn set_theme(ctx: &egui::Context, theme: &Theme) {
    set_theme_variant(ctx, &theme.dark, true);
    set_theme_variant(ctx, &theme.light, false);
}

fn set_theme_variant(ctx: &egui::Context, theme: &ThemeDetails, is_dark: bool) {
    let (default, variant) = match is_dark {
        true => (Visuals::dark(), egui::Theme::Dark),
        false => (Visuals::light(), egui::Theme::Light),
    };

    let widget = |base: WidgetVisuals, fill: Color32, stroke: Color32| WidgetVisuals {
        bg_fill: fill,
        weak_bg_fill: fill,
        bg_stroke: Stroke { color: stroke, ..base.bg_stroke },
        fg_stroke: Stroke { color: theme.foreground, ..base.fg_stroke },
        ..base
    };

    ctx.set_visuals_of(
        variant,
        Visuals {
            dark_mode: is_dark,
            widgets: Widgets {
                noninteractive: widget(default.widgets.noninteractive, theme.panel, theme.border),
                inactive: widget(default.widgets.inactive, theme.widget, theme.border),
                hovered: widget(default.widgets.hovered, theme.widget, theme.teal),
                active: widget(default.widgets.active, theme.blue, theme.teal),
                open: widget(default.widgets.open, theme.panel, theme.teal),
            },
            selection: Selection {
                bg_fill: theme.blue,
                stroke: Stroke { color: theme.foreground, ..default.selection.stroke },
            },
            hyperlink_color: theme.teal,
            faint_bg_color: theme.panel,
            extreme_bg_color: theme.background,
            error_fg_color: theme.red,
            warn_fg_color: theme.orange,
            window_shadow: Shadow { color: theme.background, ..default.window_shadow },
            window_fill: theme.panel,
            window_stroke: Stroke { color: theme.border, ..default.window_stroke },
            panel_fill: theme.background,
            ..default
        },
    );

    ctx.all_styles_mut(|style| {
        style.interaction.tooltip_delay = 0.0;
    });
}
