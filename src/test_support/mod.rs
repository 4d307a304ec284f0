#![cfg(test)]

//! Idempotent test logging initialization, grounded in the teacher's
//! `test_bootstrap::logging::init`: a `once_cell`-backed guard so every
//! test module can call `init()` without racing or panicking on repeat
//! initialization.

pub mod logging {
    use once_cell::sync::OnceCell;
    use tracing_subscriber::{fmt, EnvFilter};

    static INITIALIZED: OnceCell<()> = OnceCell::new();

    /// Level precedence: `TEST_LOG`, then `RUST_LOG`, then `"warn"`.
    pub fn init() {
        INITIALIZED.get_or_init(|| {
            let filter = std::env::var("TEST_LOG")
                .or_else(|_| std::env::var("RUST_LOG"))
                .map(EnvFilter::new)
                .unwrap_or_else(|_| EnvFilter::new("warn"));

            fmt()
                .with_env_filter(filter)
                .with_test_writer()
                .without_time()
                .try_init()
                .ok();
        });
    }
}
