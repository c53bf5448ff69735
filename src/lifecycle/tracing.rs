//! # Tracing setup
//!
//! [`setup_tracing`] installs a compact `tracing-subscriber` formatter filtered by
//! `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run
//! RUST_LOG=debug cargo run                       # full payloads
//! RUST_LOG=supply_guard::contract=debug cargo run
//! ```
//!
//! At `info` the output follows the actors and the form:
//!
//! ```text
//! INFO Actor started entity_type="Category"
//! INFO Created entity_type="Category" id=tools size=1
//! INFO open: Form opened viewer=0x00000000000000000000000000000000000000c0
//! INFO submit: Submitting product sku="W754SG24"
//! INFO submit: Product saved sku="W754SG24" product_id=product_1
//! ```
//!
//! At `debug`, entry points also log their payload once (`debug!(?product, ...)`),
//! and contract calls log the resolved function signature.

/// Installs the global subscriber. Call once, at startup.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
