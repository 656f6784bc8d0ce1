//! Storage ports
//!
//! Handlers and services only see these traits; the concrete backend
//! (in-memory, Postgres, optionally fronted by Redis) is picked at startup.

use async_trait::async_trait;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

use crate::{
    error::AppResult,
    models::{
        Feedback, HistoryEntry, Outfit, OutfitCandidate, RecommendationRequest, RecordedRequest,
        WardrobeItem, WardrobeItemInput,
    },
};

/// CRUD access to wardrobe items
#[cfg_attr(test, automock)]
#[async_trait]
pub trait WardrobeStore: Send + Sync {
    /// Returns every item, newest first
    ///
    /// Items are ordered by descending creation time; items created at the
    /// same instant are ordered by insertion, later first. The outfit
    /// selector relies on this order.
    async fn list_all(&self) -> AppResult<Vec<WardrobeItem>>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WardrobeItem>>;

    async fn create(&self, input: WardrobeItemInput) -> AppResult<WardrobeItem>;

    /// Replaces all mutable fields of an item
    ///
    /// Returns `AppError::NotFound` if the item doesn't exist.
    async fn update(&self, id: Uuid, input: WardrobeItemInput) -> AppResult<WardrobeItem>;

    /// Returns `AppError::NotFound` if the item doesn't exist.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    /// Checks the backend is reachable
    async fn ping(&self) -> AppResult<()>;
}

/// Append-only record of requests, generated outfits and feedback
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RecommendationStore: Send + Sync {
    async fn record_request(&self, request: RecommendationRequest) -> AppResult<RecordedRequest>;

    async fn find_request(&self, id: Uuid) -> AppResult<Option<RecordedRequest>>;

    /// Persists an outfit and its item links together
    async fn record_outfit(&self, request_id: Uuid, candidate: OutfitCandidate)
        -> AppResult<Outfit>;

    async fn find_outfit(&self, id: Uuid) -> AppResult<Option<Outfit>>;

    async fn record_feedback(&self, feedback: Feedback) -> AppResult<Feedback>;

    /// All feedback, newest first
    async fn list_feedback(&self) -> AppResult<Vec<Feedback>>;

    /// All recorded requests with their outfits and feedback, newest first
    async fn history(&self) -> AppResult<Vec<HistoryEntry>>;
}
