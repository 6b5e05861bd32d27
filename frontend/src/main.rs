mod app;

use app::App;

fn main() -> eframe::Result<()> {
    env_logger::init();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 720.0]),
        ..Default::default()
    };

    eframe::run_native(
        "maze editor",
        native_options,
        Box::new(|cc| Box::new(App::new(cc))),
    )
}
