//! Entity trait implementation for the User domain type.
//!
//! Users are keyed by wallet address; registering the same address twice is
//! rejected by the actor. Users carry no custom actions.

use crate::framework::ActorEntity;
use crate::model::{Address, User, UserCreate};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for User {
    type Id = Address;
    type Create = UserCreate;
    type Update = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();

    fn assign_id(_seq: u64, params: &UserCreate) -> Address {
        params.address
    }

    fn from_create_params(address: Address, params: UserCreate) -> Result<Self, String> {
        let name = params.name.trim();
        if name.is_empty() {
            return Err("user name must not be empty".to_string());
        }
        Ok(Self {
            address,
            name: name.to_string(),
            email: params.email,
        })
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), String> {
        match action {}
    }
}
