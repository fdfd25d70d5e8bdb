use restreminder_core::{Config, IntervalEngine};

/// Print a fresh engine snapshot for the current configuration.
///
/// Engine state is process-local and ephemeral, so this reports what a
/// newly started timer would look like; live state is observable through
/// the `status` stdin command of a running `restreminder run`.
pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let engine = IntervalEngine::new(&config.intervals());
    println!("{}", serde_json::to_string_pretty(&engine.snapshot())?);
    Ok(())
}
