//! User registry keyed by wallet address.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::UserClient;
use crate::framework::ResourceActor;
use crate::model::User;

/// Creates a new User actor and its client.
pub fn new() -> (ResourceActor<User>, UserClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, UserClient::new(generic_client))
}
