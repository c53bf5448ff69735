//! # Product creation form
//!
//! [`ProductForm`] owns everything the creation surface needs: the draft, the
//! reference data snapshot and the submission status. It is driven one event at a
//! time through `&mut self`, so the draft needs no locking.
//!
//! ## Lifecycle
//!
//! 1. [`ProductForm::open`] starts with an empty draft and loads reference data
//!    once. Opening an open form does nothing.
//! 2. [`ProductForm::change`] merges field edits into the draft.
//! 3. [`ProductForm::submit`] validates, persists, and always ends in
//!    [`SubmissionStatus::Succeeded`] or [`SubmissionStatus::Failed`].
//! 4. [`ProductForm::close`] discards the draft.
//!
//! Reference data is only re-fetched through [`ProductForm::refresh_reference_data`].

use crate::model::{Address, DraftError, NewProduct, ProductDraft, ProductId, ValidationError};
use crate::product_actor::ProductError;
use crate::reference::{ReferenceData, ReferenceSource};
use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Where submitted products are persisted.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn persist(&self, product: NewProduct) -> Result<ProductId, ProductError>;
}

/// Errors returned by form operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FormError {
    #[error("The creation form is not open")]
    Closed,

    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Could not save product: {0}")]
    Persist(#[from] ProductError),
}

/// Progress of the latest submission.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    InProgress,
    Succeeded(ProductId),
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, SubmissionStatus::Succeeded(_) | SubmissionStatus::Failed(_))
    }
}

/// State and operations of the product creation surface.
pub struct ProductForm<R, S> {
    reference: R,
    store: S,
    viewer: Address,
    open: bool,
    draft: ProductDraft,
    reference_data: ReferenceData,
    submission: SubmissionStatus,
}

impl<R: ReferenceSource, S: ProductStore> ProductForm<R, S> {
    /// `viewer` is the address whose user record is loaded as the current user.
    pub fn new(reference: R, store: S, viewer: Address) -> Self {
        Self {
            reference,
            store,
            viewer,
            open: false,
            draft: ProductDraft::new(),
            reference_data: ReferenceData::default(),
            submission: SubmissionStatus::Idle,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn draft(&self) -> &ProductDraft {
        &self.draft
    }

    pub fn reference_data(&self) -> &ReferenceData {
        &self.reference_data
    }

    pub fn submission(&self) -> &SubmissionStatus {
        &self.submission
    }

    /// Opens the surface with an empty draft and loads reference data.
    #[instrument(skip(self), fields(viewer = %self.viewer))]
    pub async fn open(&mut self) -> &ReferenceData {
        if self.open {
            debug!("Form already open");
            return &self.reference_data;
        }
        self.open = true;
        self.draft = ProductDraft::new();
        self.submission = SubmissionStatus::Idle;
        self.reference_data = ReferenceData::load(&self.reference, self.viewer).await;
        info!("Form opened");
        &self.reference_data
    }

    /// Re-fetches reference data on request.
    #[instrument(skip(self), fields(viewer = %self.viewer))]
    pub async fn refresh_reference_data(&mut self) -> Result<&ReferenceData, FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        self.reference_data = ReferenceData::load(&self.reference, self.viewer).await;
        Ok(&self.reference_data)
    }

    /// Applies one field edit to the draft.
    pub fn change(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        self.draft.reconcile(name, value)?;
        Ok(())
    }

    /// Validates and persists the draft.
    ///
    /// On success the draft is cleared for the next product; on failure it is
    /// kept so the user can correct it. Either way the status ends terminal.
    #[instrument(skip(self), fields(sku = %self.draft.sku()))]
    pub async fn submit(&mut self) -> Result<ProductId, FormError> {
        if !self.open {
            return Err(FormError::Closed);
        }
        self.submission = SubmissionStatus::InProgress;
        info!("Submitting product");

        let outcome = self.validate_and_persist().await;
        self.submission = match &outcome {
            Ok(id) => {
                info!(product_id = %id, "Product saved");
                self.draft = ProductDraft::new();
                SubmissionStatus::Succeeded(*id)
            }
            Err(e) => {
                warn!(error = %e, "Submission failed");
                SubmissionStatus::Failed(e.to_string())
            }
        };
        outcome
    }

    async fn validate_and_persist(&self) -> Result<ProductId, FormError> {
        let product = self.draft.validate()?;
        debug!(?product, "Draft validated");
        Ok(self.store.persist(product).await?)
    }

    /// Closes the surface and discards the draft.
    pub fn close(&mut self) {
        if self.open {
            info!("Form closed");
        }
        self.open = false;
        self.draft = ProductDraft::new();
    }
}
