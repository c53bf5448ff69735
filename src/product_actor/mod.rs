//! Product catalog, including stock management actions.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::framework::ResourceActor;
use crate::model::Product;

/// Creates a new Product actor and its client.
///
/// The actor must be run with a [`CategoryClient`](crate::clients::CategoryClient)
/// as its context.
pub fn new() -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, ProductClient::new(generic_client))
}
