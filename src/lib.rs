#![doc(test(attr(deny(warnings))))]

//! Enrolment Core holds the client-side state and validation engine behind
//! the multi-step student enrolment form, plus the adapter that submits the
//! finished record to the enrolment API.

pub mod cli;
pub mod config;
pub mod errors;
pub mod form;
pub mod submission;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Enrolment Core tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
