#![doc(test(attr(deny(warnings))))]

//! Debt Core offers the ledger primitives behind a personal debt tracker:
//! people, debts with partial repayment, reusable templates, and the
//! aggregate views (balances, periods, tag and person breakdowns) that
//! power higher level screens.

pub mod config;
pub mod domain;
pub mod errors;
pub mod reminder;
pub mod storage;
pub mod store;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Debt Core tracing initialized.");
    });
}
