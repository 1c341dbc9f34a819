pub mod performance;

pub use performance::PhaseTimer;

/// Route `log` output through env_logger, `info` unless `RUST_LOG` says otherwise.
pub fn init() {
    let _ = env_logger::Builder::from_env(env_logger::Env::new().default_filter_or("info"))
        .format_target(false)
        .try_init();
}
