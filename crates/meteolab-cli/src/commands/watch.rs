//! `meteolab watch`: print the live reading each time the feed moves it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use meteolab_core::Dashboard;

use super::ConfigOverrides;

/// How often the printer checks the cell for a new revision.
const POLL: Duration = Duration::from_millis(50);

/// Feed tick that produced the reading at `revision`. Mount writes revision 1.
fn tick_of(revision: u64) -> u64 {
    revision.saturating_sub(1)
}

pub fn run(overrides: &ConfigOverrides, max_ticks: Option<u64>, json: bool) {
    let config = super::config_or_exit(overrides);
    let rt = super::runtime_or_exit();

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Error setting Ctrl+C handler: {e}");
        std::process::exit(1);
    }

    let refresh_ms = config.refresh_ms;
    let dashboard = rt.block_on(async { Dashboard::mount(&config) });
    let view = dashboard.view();

    eprintln!(
        "Watching live reading every {refresh_ms} ms{}. Ctrl+C to stop.",
        max_ticks
            .map(|n| format!(" for {n} ticks"))
            .unwrap_or_default()
    );

    let mut last_revision = None;
    while running.load(Ordering::SeqCst) {
        let (reading, revision) = view.snapshot();
        if last_revision != Some(revision)
            && let Some(reading) = reading
        {
            last_revision = Some(revision);
            let tick = tick_of(revision);
            if json {
                match serde_json::to_string(&reading) {
                    Ok(s) => println!("{s}"),
                    Err(e) => eprintln!("Failed to encode reading: {e}"),
                }
            } else {
                println!("{}", super::history::live_line(&reading, tick));
            }
            if max_ticks.is_some_and(|max| tick >= max) {
                break;
            }
        }
        std::thread::sleep(POLL);
    }

    let ticks = dashboard.ticks();
    dashboard.unmount();
    eprintln!("Stopped after {ticks} ticks.");
}
