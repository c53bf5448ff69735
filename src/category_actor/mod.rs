//! Product categories offered by the creation form.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CategoryClient;
use crate::framework::ResourceActor;
use crate::model::Category;

/// Creates a new Category actor and its client.
pub fn new() -> (ResourceActor<Category>, CategoryClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, CategoryClient::new(generic_client))
}
