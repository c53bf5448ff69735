//! # Core Actor Framework
//!
//! Generic building blocks for the in-process catalog.
//!
//! ## Key Types
//!
//! - [`ActorEntity`]: The trait every catalog record type implements.
//! - [`ResourceActor`]: The generic actor that owns one record store.
//! - [`ResourceClient`]: The cloneable handle used to talk to an actor.
//! - [`FrameworkError`]: Transport and store errors (closed actor, missing key, ...).

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any catalog record must implement to be managed by [`ResourceActor`].
///
/// Records choose their own key through [`ActorEntity::assign_id`]: users are keyed
/// by wallet address, categories by slug, products by a sequence number. Keys are
/// `Ord` so that listing a store is deterministic.
///
/// # Async & Context
/// Hooks receive the `Context` handed to [`ResourceActor::run`], which is how a
/// product store reaches the category store without the two actors knowing about
/// each other at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Store key.
    type Id: Ord + Clone + Send + Sync + Display + Debug;

    /// Payload for a new record.
    type Create: Send + Sync + Debug;

    /// Payload for an update. Use `()` for records that are never updated.
    type Update: Send + Sync + Debug;

    /// Record-specific operations (e.g. `ReserveStock`).
    type Action: Send + Sync + Debug;

    /// Result of a record-specific operation.
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected into every hook. Use `()` if none.
    type Context: Send + Sync;

    /// Picks the key for a new record. `seq` starts at 1 and counts create requests.
    fn assign_id(seq: u64, params: &Self::Create) -> Self::Id;

    /// Builds the record from its key and payload. Called before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, String>;

    /// Runs after construction and before the record is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), String> {
        Ok(())
    }

    /// Applies an update in place.
    async fn on_update(&mut self, _update: Self::Update, _ctx: &Self::Context) -> Result<(), String> {
        Err("record does not accept updates".to_string())
    }

    /// Handles a record-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, String>;
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors raised by the framework itself or forwarded from entity hooks.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum FrameworkError {
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped response channel")]
    ActorDropped,
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Item already exists: {0}")]
    AlreadyExists(String),
    #[error("Rejected: {0}")]
    Rejected(String),
}

/// One-shot reply channel carried by every request.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Requests understood by a [`ResourceActor`].
#[derive(Debug)]
pub enum ResourceRequest<T: ActorEntity> {
    Create {
        params: T::Create,
        respond_to: Response<T::Id>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    List {
        respond_to: Response<Vec<T>>,
    },
    Update {
        id: T::Id,
        update: T::Update,
        respond_to: Response<T>,
    },
    Action {
        id: T::Id,
        action: T::Action,
        respond_to: Response<T::ActionResult>,
    },
}

// =============================================================================
// 3. THE ACTOR
// =============================================================================

/// Owns one record store and processes requests for it sequentially.
///
/// Each actor runs in its own task, so the store needs no lock: the loop in
/// [`ResourceActor::run`] is the only code that touches it.
pub struct ResourceActor<T: ActorEntity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    seq: u64,
}

impl<T: ActorEntity> ResourceActor<T> {
    /// Creates the actor and the client that feeds it.
    ///
    /// `buffer_size` bounds the request channel; senders wait when it is full.
    pub fn new(buffer_size: usize) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            seq: 0,
        };
        (actor, ResourceClient::new(sender))
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::Create { params, respond_to } => {
                    debug!(entity_type, ?params, "Create");
                    self.seq += 1;
                    let id = T::assign_id(self.seq, &params);
                    if self.store.contains_key(&id) {
                        warn!(entity_type, %id, "Duplicate key");
                        let _ = respond_to.send(Err(FrameworkError::AlreadyExists(id.to_string())));
                        continue;
                    }

                    let mut item = match T::from_create_params(id.clone(), params) {
                        Ok(item) => item,
                        Err(e) => {
                            warn!(entity_type, error = %e, "Create failed");
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                            continue;
                        }
                    };
                    if let Err(e) = item.on_create(&context).await {
                        warn!(entity_type, %id, error = %e, "on_create failed");
                        let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        continue;
                    }
                    self.store.insert(id.clone(), item);
                    info!(entity_type, %id, size = self.store.len(), "Created");
                    let _ = respond_to.send(Ok(id));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let item = self.store.get(&id).cloned();
                    debug!(entity_type, %id, found = item.is_some(), "Get");
                    let _ = respond_to.send(Ok(item));
                }
                ResourceRequest::List { respond_to } => {
                    debug!(entity_type, size = self.store.len(), "List");
                    let _ = respond_to.send(Ok(self.store.values().cloned().collect()));
                }
                ResourceRequest::Update { id, update, respond_to } => {
                    debug!(entity_type, %id, ?update, "Update");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    // Work on a copy so a rejected update leaves the record untouched.
                    let mut updated = item.clone();
                    match updated.on_update(update, &context).await {
                        Ok(()) => {
                            *item = updated.clone();
                            info!(entity_type, %id, "Updated");
                            let _ = respond_to.send(Ok(updated));
                        }
                        Err(e) => {
                            warn!(entity_type, %id, error = %e, "Update failed");
                            let _ = respond_to.send(Err(FrameworkError::Rejected(e)));
                        }
                    }
                }
                ResourceRequest::Action { id, action, respond_to } => {
                    debug!(entity_type, %id, ?action, "Action");
                    let Some(item) = self.store.get_mut(&id) else {
                        warn!(entity_type, %id, "Not found");
                        let _ = respond_to.send(Err(FrameworkError::NotFound(id.to_string())));
                        continue;
                    };
                    let result = item
                        .handle_action(action, &context)
                        .await
                        .map_err(FrameworkError::Rejected);
                    match &result {
                        Ok(_) => info!(entity_type, %id, "Action ok"),
                        Err(e) => warn!(entity_type, %id, error = %e, "Action failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(entity_type, size = self.store.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// Type-safe handle for a [`ResourceActor`]. Clones share the same channel.
#[derive(Clone)]
pub struct ResourceClient<T: ActorEntity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: ActorEntity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn create(&self, params: T::Create) -> Result<T::Id, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Create { params, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Get { id, respond_to })
            .await
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.request(|respond_to| ResourceRequest::List { respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, update: T::Update) -> Result<T, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Update { id, update, respond_to })
            .await
    }

    pub async fn perform_action(
        &self,
        id: T::Id,
        action: T::Action,
    ) -> Result<T::ActionResult, FrameworkError> {
        self.request(|respond_to| ResourceRequest::Action { id, action, respond_to })
            .await
    }
}
