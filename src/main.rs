mod app;
use card_trainer::config::Config;
use clap::Parser;

use app::TrainerApp;

fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = Config::parse();
    log::debug!("Starting with {:?}", config);

    let app = TrainerApp::new(config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 720.0])
            .with_title("Card Trainer"),
        ..Default::default()
    };
    eframe::run_native(
        "Card Trainer",
        options,
        Box::new(|_cc| Ok(Box::new(app))),
    )
}
