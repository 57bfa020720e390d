use once_cell::sync::OnceCell;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static TEST_LOGGING: OnceCell<()> = OnceCell::new();

/// Install the fmt subscriber for a host process. `RUST_LOG` wins over `default_filter`.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}

/// Idempotent subscriber for tests. Level from `TEST_LOG`, then `RUST_LOG`, then `warn`.
pub fn init_for_tests() {
    TEST_LOGGING.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}
