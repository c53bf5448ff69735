#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # SupplyGuard
//!
//! > **The client side of a decentralized marketplace.**
//!
//! This crate holds the state behind the SupplyGuard product-creation surface
//! and the binding to the SupplyGuard contract:
//!
//! - a draft product that re-derives its SKU as it is edited,
//! - reference data (the current user and the category list) loaded once per session,
//! - submission that validates the draft and always ends in success or failure,
//! - a factory that binds the contract to a wallet, when there is one.
//!
//! ## 🏗️ Design
//!
//! ### Catalog actors
//! Users, categories and products each live in their own [`ResourceActor`](framework::ResourceActor)
//! running in a Tokio task. The rest of the crate talks to them through typed
//! clients ([`UserClient`](clients::UserClient), [`CategoryClient`](clients::CategoryClient),
//! [`ProductClient`](clients::ProductClient)), which keeps message passing out of
//! the form logic.
//!
//! ### The form owns its draft
//! [`ProductForm`](form::ProductForm) is driven through `&mut self`: one event is
//! handled to completion before the next, so the last edit always wins and the
//! draft needs no locks. Its collaborators sit behind two traits,
//! [`ReferenceSource`](reference::ReferenceSource) and [`ProductStore`](form::ProductStore),
//! so tests can swap in fakes.
//!
//! ### Explicit capabilities
//! Nothing reaches for ambient state. The viewer's address is handed to the
//! form, and the wallet is handed to [`ContractFactory::bind`](contract::ContractFactory::bind),
//! which returns `None` when there is no wallet to bind.
//!
//! ### Observability
//! `tracing` everywhere. See [`lifecycle::tracing`].
//!
//! ## 🗺️ Module Tour
//!
//! - [`sku`] and [`model`]: SKU derivation, records, and the [`ProductDraft`](model::ProductDraft).
//! - [`framework`]: the generic actor and its mocks.
//! - [`user_actor`], [`category_actor`], [`product_actor`], [`clients`]: the catalog.
//! - [`reference`] and [`form`]: the creation surface.
//! - [`contract`] and [`network`]: the on-chain side.
//! - [`config`] and [`lifecycle`]: wiring it up.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run
//! cargo test
//! ```

pub mod category_actor;
pub mod clients;
pub mod config;
pub mod contract;
pub mod form;
pub mod framework;
pub mod lifecycle;
pub mod model;
pub mod network;
pub mod product_actor;
pub mod reference;
pub mod sku;
pub mod user_actor;
