use crate::framework::ActorEntity;
use crate::model::{Category, CategoryCreate, CategoryId};
use async_trait::async_trait;
use std::convert::Infallible;

#[async_trait]
impl ActorEntity for Category {
    type Id = CategoryId;
    type Create = CategoryCreate;
    type Update = ();
    type Action = Infallible;
    type ActionResult = ();
    type Context = ();

    fn assign_id(_seq: u64, params: &CategoryCreate) -> CategoryId {
        CategoryId::from_name(&params.name)
    }

    fn from_create_params(id: CategoryId, params: CategoryCreate) -> Result<Self, String> {
        if id.as_str().is_empty() {
            return Err(format!("{:?} has no letters or digits", params.name));
        }
        Ok(Self {
            id,
            name: params.name.trim().to_string(),
        })
    }

    async fn handle_action(&mut self, action: Infallible, _ctx: &()) -> Result<(), String> {
        match action {}
    }
}
