//! Plain data types: catalog records, their payloads, and the product draft.

pub mod address;
pub mod category;
pub mod draft;
pub mod product;
pub mod user;

pub use address::*;
pub use category::*;
pub use draft::*;
pub use product::*;
pub use user::*;
