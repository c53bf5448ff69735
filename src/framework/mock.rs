//! # Mock Framework
//!
//! Utilities for testing clients without spawning real actors.
//!
//! Two styles are available:
//!
//! - [`MockClient`]: queue expectations up front, run the code under test, then
//!   call [`MockClient::verify`].
//! - [`create_mock_client`] plus the `expect_*` helpers: drive the request channel
//!   by hand when a test needs to inspect payloads or control reply timing.

use crate::framework::{ActorEntity, FrameworkError, ResourceClient, ResourceRequest, Response};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

enum Expectation<T: ActorEntity> {
    Get {
        id: T::Id,
        response: Result<Option<T>, FrameworkError>,
    },
    List {
        response: Result<Vec<T>, FrameworkError>,
    },
    Create {
        response: Result<T::Id, FrameworkError>,
    },
    Action {
        id: T::Id,
        response: Result<T::ActionResult, FrameworkError>,
    },
}

impl<T: ActorEntity> Expectation<T> {
    fn kind(&self) -> &'static str {
        match self {
            Expectation::Get { .. } => "get",
            Expectation::List { .. } => "list",
            Expectation::Create { .. } => "create",
            Expectation::Action { .. } => "action",
        }
    }
}

struct MockState<T: ActorEntity> {
    expectations: VecDeque<Expectation<T>>,
    failures: Vec<String>,
}

type Shared<T> = Arc<Mutex<MockState<T>>>;

fn lock<T: ActorEntity>(state: &Shared<T>) -> MutexGuard<'_, MockState<T>> {
    // A panicking test thread must not hide the recorded failures.
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// A mock actor that answers requests from a queue of expectations.
///
/// Requests that do not match the next expectation are answered with
/// [`FrameworkError::Rejected`] and recorded; [`MockClient::verify`] reports them.
///
/// # Example
/// ```ignore
/// let mut mock = MockClient::<Category>::new();
/// mock.expect_list().return_ok(vec![category]);
///
/// let client = CategoryClient::new(mock.client());
/// // ... exercise the client ...
/// mock.verify();
/// ```
pub struct MockClient<T: ActorEntity> {
    client: ResourceClient<T>,
    state: Shared<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: ActorEntity> MockClient<T> {
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<ResourceRequest<T>>(100);
        let state: Shared<T> = Arc::new(Mutex::new(MockState {
            expectations: VecDeque::new(),
            failures: Vec::new(),
        }));
        let background = state.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let expectation = lock(&background).expectations.pop_front();
                if let Some(failure) = answer(request, expectation) {
                    lock(&background).failures.push(failure);
                }
            }
        });

        Self {
            client: ResourceClient::new(sender),
            state,
            _handle: handle,
        }
    }

    /// Returns a client wired to this mock.
    pub fn client(&self) -> ResourceClient<T> {
        self.client.clone()
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Get { id, response })
    }

    pub fn expect_list(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        ExpectationBuilder::new(self.state.clone(), |response| Expectation::List { response })
    }

    pub fn expect_create(&mut self) -> ExpectationBuilder<T, T::Id> {
        ExpectationBuilder::new(self.state.clone(), |response| Expectation::Create { response })
    }

    pub fn expect_action(&mut self, id: T::Id) -> ExpectationBuilder<T, T::ActionResult> {
        ExpectationBuilder::new(self.state.clone(), move |response| Expectation::Action {
            id,
            response,
        })
    }

    /// Panics if an expectation is still pending or a request was unexpected.
    pub fn verify(&self) {
        let state = lock(&self.state);
        if !state.failures.is_empty() {
            panic!("Unexpected requests: {}", state.failures.join("; "));
        }
        if !state.expectations.is_empty() {
            let pending: Vec<&str> = state.expectations.iter().map(Expectation::kind).collect();
            panic!("Not all expectations were met. Remaining: {}", pending.join(", "));
        }
    }
}

impl<T: ActorEntity> Default for MockClient<T> {
    fn default() -> Self {
        Self::new()
    }
}

fn reply<R>(respond_to: Response<R>, response: Result<R, FrameworkError>) {
    let _ = respond_to.send(response);
}

fn mismatch<R>(respond_to: Response<R>, message: String) -> Option<String> {
    let _ = respond_to.send(Err(FrameworkError::Rejected(message.clone())));
    Some(message)
}

/// Answers one request. Returns a failure description when it did not match.
fn answer<T: ActorEntity>(
    request: ResourceRequest<T>,
    expectation: Option<Expectation<T>>,
) -> Option<String> {
    let expected = expectation.as_ref().map_or("nothing", Expectation::kind);
    match (request, expectation) {
        (ResourceRequest::Get { id, respond_to }, Some(Expectation::Get { id: want, response })) => {
            if id != want {
                return mismatch(respond_to, format!("get {id}, expected get {want}"));
            }
            reply(respond_to, response);
            None
        }
        (ResourceRequest::List { respond_to }, Some(Expectation::List { response })) => {
            reply(respond_to, response);
            None
        }
        (ResourceRequest::Create { respond_to, .. }, Some(Expectation::Create { response })) => {
            reply(respond_to, response);
            None
        }
        (
            ResourceRequest::Action { id, respond_to, .. },
            Some(Expectation::Action { id: want, response }),
        ) => {
            if id != want {
                return mismatch(respond_to, format!("action on {id}, expected action on {want}"));
            }
            reply(respond_to, response);
            None
        }
        (ResourceRequest::Get { id, respond_to }, _) => {
            mismatch(respond_to, format!("get {id}, expected {expected}"))
        }
        (ResourceRequest::List { respond_to }, _) => {
            mismatch(respond_to, format!("list, expected {expected}"))
        }
        (ResourceRequest::Create { respond_to, .. }, _) => {
            mismatch(respond_to, format!("create, expected {expected}"))
        }
        (ResourceRequest::Update { id, respond_to, .. }, _) => {
            mismatch(respond_to, format!("update {id}, expected {expected}"))
        }
        (ResourceRequest::Action { id, respond_to, .. }, _) => {
            mismatch(respond_to, format!("action on {id}, expected {expected}"))
        }
    }
}

/// Queues the reply for one expected request.
pub struct ExpectationBuilder<T: ActorEntity, R> {
    state: Shared<T>,
    make: Box<dyn FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send>,
}

impl<T: ActorEntity, R> ExpectationBuilder<T, R> {
    fn new(
        state: Shared<T>,
        make: impl FnOnce(Result<R, FrameworkError>) -> Expectation<T> + Send + 'static,
    ) -> Self {
        Self {
            state,
            make: Box::new(make),
        }
    }

    pub fn return_ok(self, value: R) {
        let expectation = (self.make)(Ok(value));
        lock(&self.state).expectations.push_back(expectation);
    }

    pub fn return_err(self, error: FrameworkError) {
        let expectation = (self.make)(Err(error));
        lock(&self.state).expectations.push_back(expectation);
    }
}

// =============================================================================
// CHANNEL-LEVEL HELPERS
// =============================================================================

/// Creates a client whose requests land on a receiver owned by the test.
pub fn create_mock_client<T: ActorEntity>(
    buffer_size: usize,
) -> (ResourceClient<T>, mpsc::Receiver<ResourceRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (ResourceClient::new(sender), receiver)
}

/// Takes the next request if it is a create.
pub async fn expect_create<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Create, Response<T::Id>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Create { params, respond_to }) => Some((params, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is a get.
pub async fn expect_get<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, Response<Option<T>>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Get { id, respond_to }) => Some((id, respond_to)),
        _ => None,
    }
}

/// Takes the next request if it is a list.
pub async fn expect_list<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<Response<Vec<T>>> {
    match receiver.recv().await {
        Some(ResourceRequest::List { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Takes the next request if it is an action.
pub async fn expect_action<T: ActorEntity>(
    receiver: &mut mpsc::Receiver<ResourceRequest<T>>,
) -> Option<(T::Id, T::Action, Response<T::ActionResult>)> {
    match receiver.recv().await {
        Some(ResourceRequest::Action { id, action, respond_to }) => Some((id, action, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Category, CategoryCreate, CategoryId};

    #[tokio::test]
    async fn test_channel_helpers_expose_payloads() {
        let (client, mut receiver) = create_mock_client::<Category>(10);

        let create_task = tokio::spawn(async move {
            client.create(CategoryCreate { name: "Tools".into() }).await
        });

        let (payload, responder) = expect_create(&mut receiver).await.expect("Expected Create request");
        assert_eq!(payload.name, "Tools");
        responder.send(Ok(CategoryId::from_name("Tools"))).unwrap();

        let result = create_task.await.unwrap();
        assert_eq!(result, Ok(CategoryId::from_name("tools")));
    }

    #[tokio::test]
    async fn test_expectations_are_answered_in_order() {
        let mut mock = MockClient::<Category>::new();
        let tools = Category::new("Tools");
        mock.expect_list().return_ok(vec![tools.clone()]);
        mock.expect_get(tools.id.clone()).return_ok(Some(tools.clone()));

        let client = mock.client();
        assert_eq!(client.list().await.unwrap(), vec![tools.clone()]);
        assert_eq!(client.get(tools.id.clone()).await.unwrap(), Some(tools));

        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected requests")]
    async fn test_unexpected_request_is_reported() {
        let mock = MockClient::<Category>::new();
        let client = mock.client();

        let result = client.list().await;
        assert!(matches!(result, Err(FrameworkError::Rejected(_))));

        mock.verify();
    }
}
