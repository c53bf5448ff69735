//! Reference data for the creation form: the current user and the category list.
//!
//! The viewer's address is passed in by the caller. Both lookups run
//! concurrently and each outcome is recorded on its own, so a failed category
//! fetch does not hide a successful user lookup and neither stops the form.

use crate::category_actor::CategoryError;
use crate::clients::{CategoryClient, UserClient};
use crate::model::{Address, Category, User};
use crate::user_actor::UserError;
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Errors reported by a [`ReferenceSource`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ReferenceError {
    #[error(transparent)]
    User(#[from] UserError),

    #[error(transparent)]
    Category(#[from] CategoryError),

    #[error("Reference source unavailable: {0}")]
    Unavailable(String),
}

/// Where the form gets its reference data from.
#[async_trait]
pub trait ReferenceSource: Send + Sync {
    /// Users registered under `address`.
    async fn fetch_user_by_address(&self, address: Address) -> Result<Vec<User>, ReferenceError>;

    /// Every category.
    async fn fetch_categories(&self) -> Result<Vec<Category>, ReferenceError>;
}

/// The catalog's user and category stores, seen as one reference source.
#[derive(Clone)]
pub struct Directory {
    users: UserClient,
    categories: CategoryClient,
}

impl Directory {
    pub fn new(users: UserClient, categories: CategoryClient) -> Self {
        Self { users, categories }
    }
}

#[async_trait]
impl ReferenceSource for Directory {
    async fn fetch_user_by_address(&self, address: Address) -> Result<Vec<User>, ReferenceError> {
        Ok(self.users.fetch_by_address(address).await?)
    }

    async fn fetch_categories(&self) -> Result<Vec<Category>, ReferenceError> {
        Ok(self.categories.fetch_all().await?)
    }
}

/// Outcome of one reference request.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Loaded<T> {
    #[default]
    NotRequested,
    Ready(T),
    Failed(String),
}

impl<T> Loaded<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loaded::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Loaded::Failed(_))
    }

    fn from_result<E: std::fmt::Display>(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Loaded::Ready(value),
            Err(e) => Loaded::Failed(e.to_string()),
        }
    }
}

/// Snapshot of the reference data the form shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReferenceData {
    pub current_user: Loaded<Option<User>>,
    pub categories: Loaded<Vec<Category>>,
}

impl ReferenceData {
    /// Issues one user lookup and one category fetch.
    #[instrument(skip(source))]
    pub async fn load<S: ReferenceSource + ?Sized>(source: &S, viewer: Address) -> Self {
        let (users, categories) = tokio::join!(
            source.fetch_user_by_address(viewer),
            source.fetch_categories()
        );

        let current_user = Loaded::from_result(users.map(|users| users.into_iter().next()));
        let categories = Loaded::from_result(categories);
        if let Loaded::Failed(e) = &current_user {
            warn!(error = %e, "User lookup failed");
        }
        if let Loaded::Failed(e) = &categories {
            warn!(error = %e, "Category fetch failed");
        }
        debug!(
            user_found = matches!(current_user, Loaded::Ready(Some(_))),
            categories = categories.ready().map_or(0, Vec::len),
            "Reference data loaded"
        );

        Self {
            current_user,
            categories,
        }
    }

    /// Looks up a loaded category by key or display name.
    pub fn category(&self, value: &str) -> Option<&Category> {
        self.categories.ready()?.iter().find(|c| c.matches(value))
    }
}
