use super::ConfigOverrides;

pub fn run(overrides: &ConfigOverrides, host: &str, port: u16) {
    let config = super::config_or_exit(overrides);

    let base = format!("http://{host}:{port}");

    println!("🌱 MeteoLab Server v{}", meteolab_core::VERSION);
    println!("   {base}");
    println!("   live feed every {} ms", config.refresh_ms);
    println!();
    println!("   Endpoints:");
    println!("     GET /                    API index (try: curl {base})");
    println!("     GET /health              Live feed health check");
    println!("     GET /api/history         Daily readings, oldest first");
    println!("     GET /api/current         Live current reading");
    println!("     GET /api/hypotheses      Student hypotheses");
    println!("     GET /api/timeline        Project phases");
    println!("     GET /api/light/monthly   Seasonal light averages");
    println!();
    println!("   Query params:");
    println!("     /api/history?metric=temperature|humidity|light|plant_height");
    println!("     /api/hypotheses?status=pending|verified|refuted");
    println!();

    let rt = super::runtime_or_exit();
    if let Err(e) = rt.block_on(meteolab_server::run_server(&config, host, port)) {
        eprintln!("Server error: {e}");
        std::process::exit(1);
    }
}
