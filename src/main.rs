/// Awesome Image Editor entry point.
///
/// Usage: `aie-native [--demo] [IMAGE...]`. Images given on the command
/// line are imported at startup; `--demo` adds generated layers.
fn main() {
    use std::path::PathBuf;

    use aie::config::AppConfig;
    use aie::constants::{DEFAULT_WINDOW_SIZE, MIN_WINDOW_SIZE};
    use aie::EditorApp;
    use aie_ui::{init_logging, run, Settings};

    let config_path = AppConfig::default_path();
    let config = AppConfig::load_from_default_path().unwrap_or_default();
    let log_level = config.preferences.log_level.to_level_filter();
    init_logging(log_level);
    log::info!("Configuration file: {:?}", config_path);

    let mut demo = false;
    let mut paths = Vec::new();
    for arg in std::env::args().skip(1) {
        if arg == "--demo" {
            demo = true;
        } else {
            paths.push(PathBuf::from(arg));
        }
    }

    let mut app = EditorApp::new(config).with_config_path(config_path);
    if demo {
        app.add_layers(aie::test_image::demo_layers());
    }
    app.import_paths(paths);

    let settings = Settings {
        window_title: Some("Awesome Image Editor".to_string()),
        window_size: DEFAULT_WINDOW_SIZE,
        min_window_size: Some(MIN_WINDOW_SIZE),
        resizable: true,
        log_level,
        ..Settings::default()
    };

    if let Err(e) = run(app, settings) {
        log::error!("Application error: {}", e);
        eprintln!("Application error: {}", e);
        std::process::exit(1);
    }
}
