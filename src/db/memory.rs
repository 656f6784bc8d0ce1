use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{
        Feedback, HistoryEntry, Outfit, OutfitCandidate, RecommendationRequest, RecordedRequest,
        WardrobeItem, WardrobeItemInput,
    },
};

use super::store::{RecommendationStore, WardrobeStore};

/// Outfit row as kept in memory: item references, not copies
#[derive(Debug, Clone)]
struct OutfitRecord {
    id: Uuid,
    request_id: Uuid,
    item_ids: Vec<Uuid>,
    score: u8,
    rationale: String,
    created_at: DateTime<Utc>,
}

#[derive(Default)]
struct StoreInner {
    /// Insertion order
    items: Vec<WardrobeItem>,
    requests: Vec<RecordedRequest>,
    outfits: Vec<OutfitRecord>,
    feedback: Vec<Feedback>,
}

impl StoreInner {
    fn resolve(&self, record: &OutfitRecord) -> Outfit {
        let by_id: HashMap<Uuid, &WardrobeItem> =
            self.items.iter().map(|item| (item.id, item)).collect();

        Outfit {
            id: record.id,
            request_id: record.request_id,
            // deleted items drop out of historical outfits
            items: record
                .item_ids
                .iter()
                .filter_map(|id| by_id.get(id).map(|item| (*item).clone()))
                .collect(),
            score: record.score,
            rationale: record.rationale.clone(),
            created_at: record.created_at,
        }
    }
}

/// Process-local store used by default and in tests
#[derive(Default)]
pub struct InMemoryStore {
    inner: RwLock<StoreInner>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Newest first; equal timestamps keep later insertions first
fn newest_first<T: Clone>(records: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut ordered: Vec<T> = records.iter().rev().cloned().collect();
    ordered.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    ordered
}

#[async_trait]
impl WardrobeStore for InMemoryStore {
    async fn list_all(&self) -> AppResult<Vec<WardrobeItem>> {
        let inner = self.inner.read().await;
        Ok(newest_first(&inner.items, |item| item.created_at))
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<WardrobeItem>> {
        let inner = self.inner.read().await;
        Ok(inner.items.iter().find(|item| item.id == id).cloned())
    }

    async fn create(&self, input: WardrobeItemInput) -> AppResult<WardrobeItem> {
        let item = WardrobeItem::new(input);
        let mut inner = self.inner.write().await;
        inner.items.push(item.clone());
        Ok(item)
    }

    async fn update(&self, id: Uuid, input: WardrobeItemInput) -> AppResult<WardrobeItem> {
        let mut inner = self.inner.write().await;
        let item = inner
            .items
            .iter_mut()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::NotFound(format!("wardrobe item {}", id)))?;
        item.replace(input);
        Ok(item.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut inner = self.inner.write().await;
        let before = inner.items.len();
        inner.items.retain(|item| item.id != id);
        if inner.items.len() == before {
            return Err(AppError::NotFound(format!("wardrobe item {}", id)));
        }
        Ok(())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

#[async_trait]
impl RecommendationStore for InMemoryStore {
    async fn record_request(&self, request: RecommendationRequest) -> AppResult<RecordedRequest> {
        let recorded = RecordedRequest::new(request);
        let mut inner = self.inner.write().await;
        inner.requests.push(recorded.clone());
        Ok(recorded)
    }

    async fn find_request(&self, id: Uuid) -> AppResult<Option<RecordedRequest>> {
        let inner = self.inner.read().await;
        Ok(inner.requests.iter().find(|r| r.id == id).cloned())
    }

    async fn record_outfit(
        &self,
        request_id: Uuid,
        candidate: OutfitCandidate,
    ) -> AppResult<Outfit> {
        let outfit = Outfit::from_candidate(request_id, &candidate);
        let mut inner = self.inner.write().await;
        inner.outfits.push(OutfitRecord {
            id: outfit.id,
            request_id,
            item_ids: candidate.item_ids(),
            score: outfit.score,
            rationale: outfit.rationale.clone(),
            created_at: outfit.created_at,
        });
        Ok(outfit)
    }

    async fn find_outfit(&self, id: Uuid) -> AppResult<Option<Outfit>> {
        let inner = self.inner.read().await;
        Ok(inner
            .outfits
            .iter()
            .find(|o| o.id == id)
            .map(|record| inner.resolve(record)))
    }

    async fn record_feedback(&self, feedback: Feedback) -> AppResult<Feedback> {
        let mut inner = self.inner.write().await;
        inner.feedback.push(feedback.clone());
        Ok(feedback)
    }

    async fn list_feedback(&self) -> AppResult<Vec<Feedback>> {
        let inner = self.inner.read().await;
        Ok(newest_first(&inner.feedback, |f| f.created_at))
    }

    async fn history(&self) -> AppResult<Vec<HistoryEntry>> {
        let inner = self.inner.read().await;

        let entries = newest_first(&inner.requests, |r| r.created_at)
            .into_iter()
            .map(|request| {
                let outfits = inner
                    .outfits
                    .iter()
                    .filter(|o| o.request_id == request.id)
                    .map(|record| inner.resolve(record))
                    .collect();
                let feedback = inner
                    .feedback
                    .iter()
                    .filter(|f| f.request_id == request.id)
                    .cloned()
                    .collect();
                HistoryEntry {
                    request,
                    outfits,
                    feedback,
                }
            })
            .collect();

        Ok(entries)
    }
}
