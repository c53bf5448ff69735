use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Address, User, UserCreate};
use crate::user_actor::UserError;
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the User actor.
#[derive(Clone)]
pub struct UserClient {
    inner: ResourceClient<User>,
}

impl UserClient {
    pub fn new(inner: ResourceClient<User>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, user), fields(address = %user.address))]
    pub async fn register(&self, user: UserCreate) -> Result<Address, UserError> {
        debug!(?user, "register called");
        self.inner.create(user).await.map_err(UserError::from)
    }

    /// Users registered under `address`: empty or a single record.
    #[instrument(skip(self))]
    pub async fn fetch_by_address(&self, address: Address) -> Result<Vec<User>, UserError> {
        debug!("Sending request");
        let found = self.inner.get(address).await.map_err(UserError::from)?;
        Ok(found.into_iter().collect())
    }
}

#[async_trait]
impl ActorClient<User> for UserClient {
    type Error = UserError;

    fn inner(&self) -> &ResourceClient<User> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        UserError::from(e)
    }
}
