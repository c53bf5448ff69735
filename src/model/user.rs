use super::Address;
use serde::{Deserialize, Serialize};

/// A registered account, keyed by its wallet address.
///
/// # Actor Framework
/// Managed by a [`ResourceActor`](crate::framework::ResourceActor); see
/// [`crate::user_actor`] for the entity implementation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub address: Address,
    pub name: String,
    pub email: Option<String>,
}

impl User {
    pub fn new(address: Address, name: impl Into<String>) -> Self {
        Self {
            address,
            name: name.into(),
            email: None,
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }
}

/// Payload for registering a user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub address: Address,
    pub name: String,
    pub email: Option<String>,
}

impl From<User> for UserCreate {
    fn from(user: User) -> Self {
        Self {
            address: user.address,
            name: user.name,
            email: user.email,
        }
    }
}
