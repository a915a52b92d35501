use log::LevelFilter;

/// Initialize logging for the `swe` binary.
///
/// # Behavior
/// - Level is `Debug` if `debug_enabled`, `Info` otherwise.
/// - `RUST_LOG`, when set, overrides that default.
/// - Records go to stderr without timestamps or module paths; stdout is
///   reserved for the solver's answer.
pub fn init_logger(debug_enabled: bool) {
    let level = if debug_enabled {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder
        .filter(None, level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .target(env_logger::Target::Stderr);

    // Let RUST_LOG override our defaults if explicitly set
    if let Ok(spec) = std::env::var("RUST_LOG") {
        builder.parse_filters(&spec);
    }

    // a second call (e.g. from tests) keeps the first logger
    if builder.try_init().is_ok() {
        log::debug!("logger initialized at {level:?} level");
    }
}
