use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::WardrobeItem;

/// Heuristic path that produced an outfit candidate
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStrategy {
    /// Top and bottom matched on formality, plus the first shoes
    Primary,
    /// Next top, bottom and shoes not used by the primary pick
    Alternative,
    /// Items tagged "comfortable" for high comfort requests
    Comfort,
    /// First items in store order when nothing else produced enough outfits
    Fallback,
}

/// A scored outfit produced by the selector, not yet persisted
#[derive(Debug, Clone, PartialEq)]
pub struct OutfitCandidate {
    pub items: Vec<WardrobeItem>,
    pub score: u8,
    pub rationale: String,
    pub strategy: SelectionStrategy,
}

impl OutfitCandidate {
    pub fn item_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|item| item.id).collect()
    }
}

/// A persisted outfit recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Outfit {
    pub id: Uuid,
    pub request_id: Uuid,
    pub items: Vec<WardrobeItem>,
    pub score: u8,
    pub rationale: String,
    pub created_at: DateTime<Utc>,
}

impl Outfit {
    pub fn from_candidate(request_id: Uuid, candidate: &OutfitCandidate) -> Self {
        Self {
            id: Uuid::new_v4(),
            request_id,
            items: candidate.items.clone(),
            score: candidate.score,
            rationale: candidate.rationale.clone(),
            created_at: Utc::now(),
        }
    }
}
