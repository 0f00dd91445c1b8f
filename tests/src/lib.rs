
pub mod eval;

mod exec_log;
pub use exec_log::{ExecLog, Op};


mod memory;
pub use memory::{MemoryDriver, MEMORY, PLAIN};

pub use parser::TestParser;

pub mod prelude;

use semimap::{Config, EventHooks, Template};

use std::sync::Once;

/// A template over a fresh [`MemoryDriver`] with every fixture registered.
pub fn setup() -> (Template, MemoryDriver) {
    setup_with(Config::default())
}

pub fn setup_with(config: Config) -> (Template, MemoryDriver) {
    init_tracing();

    let driver = MemoryDriver::new();
    let template = Template::builder()
        .driver(driver.clone())
        .registry(fixtures::registry())
        .config(config)
        .parser(TestParser)
        .build()
        .unwrap();

    (template, driver)
}

/// Like [`setup`], with event hooks installed.
pub fn setup_with_events(events: impl EventHooks) -> (Template, MemoryDriver) {
    init_tracing();

    let driver = MemoryDriver::new();
    let template = Template::builder()
        .driver(driver.clone())
        .registry(fixtures::registry())
        .events(events)
        .parser(TestParser)
        .build()
        .unwrap();

    (template, driver)
}

/// Installs a `RUST_LOG`-filtered subscriber once per test binary.
pub fn init_tracing() {
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
