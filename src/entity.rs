//! Lazily completed API objects.
//!
//! List endpoints return abbreviated objects while single-item endpoints return
//! the full representation. [`Entity`] models both: a `head` that is always
//! readable (identifying and summary fields) and a `detail` group that is only
//! there once the entity is complete.

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

use crate::error::{RestError, Result};

/// Fetches the full representation of an entity from its head.
#[async_trait]
pub trait Fetch<H, D>: Send + Sync {
    async fn fetch(&self, head: &H) -> Result<(H, D)>;
}

/// An API object which is either partial (head only) or complete (head and detail).
///
/// `complete` and `update` take `&mut self`, so an entity cannot be completed
/// while it is being read elsewhere. Share it across tasks behind a lock.
pub struct Entity<H, D> {
    head: H,
    detail: Option<D>,
    source: Arc<dyn Fetch<H, D>>,
}

impl<H, D> Entity<H, D> {
    /// A partial entity, as produced by list endpoints
    pub fn partial(head: H, source: Arc<dyn Fetch<H, D>>) -> Self {
        Entity {
            head,
            detail: None,
            source,
        }
    }

    /// A complete entity, as produced by single-item endpoints
    pub fn complete_with(head: H, detail: D, source: Arc<dyn Fetch<H, D>>) -> Self {
        Entity {
            head,
            detail: Some(detail),
            source,
        }
    }

    pub fn is_partial(&self) -> bool {
        self.detail.is_none()
    }

    /// Identifying and summary fields, readable in any state
    pub fn head(&self) -> &H {
        &self.head
    }

    /// Detail fields, or [`RestError::PartialObject`] while partial
    pub fn detail(&self) -> Result<&D> {
        self.detail.as_ref().ok_or(RestError::PartialObject)
    }

    /// Fetch the full representation if this entity is partial.
    ///
    /// Does nothing on a complete entity. On failure the entity is left
    /// exactly as it was.
    pub async fn complete(&mut self) -> Result<&mut Self> {
        if self.detail.is_some() {
            return Ok(self);
        }
        self.update().await
    }

    /// Re-fetch the full representation, even if already complete
    pub async fn update(&mut self) -> Result<&mut Self> {
        let (head, detail) = self.source.fetch(&self.head).await?;
        // Swap both groups at once so no half-updated state is observable
        self.head = head;
        self.detail = Some(detail);
        Ok(self)
    }
}

impl<H: Clone, D: Clone> Clone for Entity<H, D> {
    fn clone(&self) -> Self {
        Entity {
            head: self.head.clone(),
            detail: self.detail.clone(),
            source: Arc::clone(&self.source),
        }
    }
}

impl<H: fmt::Debug, D: fmt::Debug> fmt::Debug for Entity<H, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("head", &self.head)
            .field("detail", &self.detail)
            .finish()
    }
}
