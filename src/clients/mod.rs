//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).

pub mod actor_client;
pub mod category_client;
pub mod product_client;
pub mod user_client;

pub use actor_client::ActorClient;
pub use category_client::*;
pub use product_client::*;
pub use user_client::*;
