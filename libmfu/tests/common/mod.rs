// Shared helpers for the integration tests. Each aggregator pulls this in
// with `#[path = "../common/mod.rs"] mod common;`.
#![allow(dead_code)]

pub mod fixtures;

pub mod helpers {
    pub use libmfu::test_support::*;

    /// Route library logs through the test harness; safe to call repeatedly.
    pub fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }
}
