// Shared fixture for the announcement suite
//
// Builds the demo page with a recording announcer and a manual clock wired
// in, so every test can drive time explicitly and inspect exactly what was
// announced.

use std::sync::Arc;

use aria_notify_rs::{DemoPage, RecordingAnnouncer, TestClock};

pub struct Harness {
    pub demo: DemoPage,
    pub announcer: RecordingAnnouncer,
    pub clock: TestClock,
}

/// Initializes a tracing subscriber once per test binary; controlled by
/// RUST_LOG like any other binary in the workspace.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

pub fn demo_page() -> Harness {
    init_tracing();
    let announcer = RecordingAnnouncer::new();
    let clock = TestClock::new();
    let demo = DemoPage::builder()
        .announcer(Arc::new(announcer.clone()))
        .clock(Arc::new(clock.clone()))
        .build()
        .expect("demo page builds");
    Harness {
        demo,
        announcer,
        clock,
    }
}
