use std::path::PathBuf;

use super::ConfigOverrides;

pub fn run(overrides: &ConfigOverrides, export_dir: PathBuf) {
    let config = super::config_or_exit(overrides);
    let rt = super::runtime_or_exit();
    let _guard = rt.enter();

    let mut app = crate::tui::app::App::new(&config, export_dir);
    if let Err(e) = app.run() {
        eprintln!("TUI error: {e}");
        std::process::exit(1);
    }
}
