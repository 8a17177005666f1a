//! `meteolab config`: print or save the effective configuration.

use std::path::Path;

use super::ConfigOverrides;

pub fn run(overrides: &ConfigOverrides, output: Option<&Path>) {
    let config = super::config_or_exit(overrides);

    let result = match output {
        Some(path) => config.save(path).map(|()| {
            println!("Config written to {}", path.display());
        }),
        None => config.to_json().map(|json| println!("{json}")),
    };

    if let Err(e) = result {
        eprintln!("Failed to write config: {e}");
        std::process::exit(1);
    }
}
