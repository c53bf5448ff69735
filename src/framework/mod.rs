//! Generic actor framework behind the in-process catalog.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that catalog records implement to be managed by actors
//! - [`ResourceActor`] - Generic actor that owns one record store
//! - [`ResourceClient`] - Type-safe handle for sending requests to an actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See the [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

pub use core::*;
