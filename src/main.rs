use eframe::egui;
use myosim::{
    config::{
        Settings,
        SETTINGS_FILE,
    },
    gui::MyoSimApp,
    logging,
    persistence::{
        get_app_data_dir,
        load_json_or_default,
    },
};

fn main() -> eframe::Result {
    let settings = load_json_or_default::<Settings>(SETTINGS_FILE);

    if let Err(e) = logging::init_logging(&settings.log_level, &get_app_data_dir().join("logs")) {
        eprintln!("Failed to start logging: {}", e);
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Myo-Sim Bio-Deck")
            .with_inner_size([1100.0, 760.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Myo-Sim Bio-Deck",
        options,
        Box::new(move |cc| create_app(cc, settings)),
    )
}

fn create_app(
    cc: &eframe::CreationContext<'_>,
    settings: Settings,
) -> Result<Box<dyn eframe::App>, Box<dyn std::error::Error + Send + Sync>> {
    Ok(Box::new(MyoSimApp::new(cc, settings)?))
}
