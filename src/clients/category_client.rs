use crate::category_actor::CategoryError;
use crate::clients::actor_client::ActorClient;
use crate::framework::{FrameworkError, ResourceClient};
use crate::model::{Category, CategoryCreate, CategoryId};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Category actor.
#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn add(&self, name: &str) -> Result<CategoryId, CategoryError> {
        debug!("Sending request");
        self.inner
            .create(CategoryCreate { name: name.to_string() })
            .await
            .map_err(CategoryError::from)
    }

    #[instrument(skip(self))]
    pub async fn find(&self, id: CategoryId) -> Result<Option<Category>, CategoryError> {
        debug!("Sending request");
        self.inner.get(id).await.map_err(CategoryError::from)
    }

    /// Every category, ordered by key.
    #[instrument(skip(self))]
    pub async fn fetch_all(&self) -> Result<Vec<Category>, CategoryError> {
        debug!("Sending request");
        self.inner.list().await.map_err(CategoryError::from)
    }
}

#[async_trait]
impl ActorClient<Category> for CategoryClient {
    type Error = CategoryError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        CategoryError::from(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_create, expect_list};

    #[tokio::test]
    async fn test_add_sends_the_display_name() {
        let (client, mut receiver) = create_mock_client::<Category>(10);
        let categories = CategoryClient::new(client);

        let add_task = tokio::spawn(async move { categories.add("Home & Garden").await });

        let (params, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(params.name, "Home & Garden");
        responder.send(Ok(CategoryId::from_name(&params.name))).unwrap();

        assert_eq!(add_task.await.unwrap(), Ok(CategoryId::from_name("home garden")));
    }

    #[tokio::test]
    async fn test_fetch_all_forwards_actor_failure() {
        let (client, mut receiver) = create_mock_client::<Category>(10);
        let categories = CategoryClient::new(client);

        let fetch_task = tokio::spawn(async move { categories.fetch_all().await });

        let responder = expect_list(&mut receiver).await.expect("Expected List request");
        responder.send(Err(FrameworkError::ActorDropped)).unwrap();

        assert!(matches!(
            fetch_task.await.unwrap(),
            Err(CategoryError::ActorCommunicationError(_))
        ));
    }

    #[tokio::test]
    async fn test_real_actor_rejects_duplicate_and_blank_names() {
        let (actor, categories) = crate::category_actor::new();
        let handle = tokio::spawn(actor.run(()));

        let tools = categories.add("Tools").await.unwrap();
        assert_eq!(tools.as_str(), "tools");
        assert!(matches!(categories.add(" tools ").await, Err(CategoryError::Duplicate(_))));
        assert!(matches!(categories.add("  !! ").await, Err(CategoryError::InvalidName(_))));

        let all = categories.fetch_all().await.unwrap();
        assert_eq!(all, vec![Category::new("Tools")]);
        assert!(categories.find(tools).await.unwrap().is_some());

        drop(categories);
        handle.await.unwrap();
    }
}
