//! `meteolab history`: print the generated daily readings.

use meteolab_core::{Dashboard, Metric, SensorReading, summarize_all};

use super::ConfigOverrides;

pub fn run(overrides: &ConfigOverrides, json: bool) {
    let config = super::config_or_exit(overrides);
    let rt = super::runtime_or_exit();

    // Mount through the dashboard so a given --seed matches the TUI and server.
    let history = rt.block_on(async {
        let dashboard = Dashboard::mount(&config);
        let history = dashboard.history().to_vec();
        dashboard.unmount();
        history
    });

    if json {
        match serde_json::to_string_pretty(&history) {
            Ok(s) => println!("{s}"),
            Err(e) => {
                eprintln!("Failed to encode history: {e}");
                std::process::exit(1);
            }
        }
        return;
    }

    print_table(&history);
}

fn print_table(history: &[SensorReading]) {
    println!(
        "{:<14} {:>10} {:>10} {:>10} {:>10}",
        "Date", "Temp °C", "Hum %", "Light lx", "Height cm"
    );
    println!("{}", "─".repeat(58));
    for r in history {
        println!("{}", row(r));
    }
    println!("{}", "─".repeat(58));

    for s in summarize_all(history) {
        println!(
            "{:<18} min {:>9}  max {:>9}  mean {:>9}",
            s.metric.label(),
            s.metric.format(s.min),
            s.metric.format(s.max),
            s.metric.format(s.mean),
        );
    }
}

fn row(r: &SensorReading) -> String {
    let height = r
        .plant_height
        .map(|h| format!("{h:.1}"))
        .unwrap_or_else(|| "—".to_string());
    format!(
        "{:<14} {:>10.1} {:>10.1} {:>10.0} {:>10}",
        r.timestamp, r.temperature, r.humidity, r.light, height
    )
}

/// One-line rendering used by `watch`.
pub fn live_line(r: &SensorReading, tick: u64) -> String {
    let fields: Vec<String> = [Metric::Temperature, Metric::Humidity, Metric::Light]
        .iter()
        .map(|m| format!("{}={}", m, m.display(r)))
        .collect();
    format!("#{tick:<5} {}  {}", r.timestamp, fields.join("  "))
}
