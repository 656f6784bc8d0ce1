use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::{outfit::Outfit, recommendation::RecordedRequest, wardrobe_item::normalize_optional};

/// A user's rating of one recommended outfit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    pub id: Uuid,
    pub request_id: Uuid,
    pub outfit_id: Uuid,
    /// Rating from 1 to 5
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Whether the user chose this outfit to wear
    pub selected: bool,
    pub created_at: DateTime<Utc>,
}

/// Feedback as listed, with the rated request and outfit attached
///
/// `request` and `outfit` are `None` only if the record they point to is gone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackEntry {
    #[serde(flatten)]
    pub feedback: Feedback,
    pub request: Option<RecordedRequest>,
    pub outfit: Option<Outfit>,
}

/// Body accepted when submitting feedback
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedbackInput {
    pub request_id: Uuid,
    pub outfit_id: Uuid,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub selected: bool,
}

impl FeedbackInput {
    /// Checks the rating range and builds the feedback record
    pub fn into_feedback(self) -> AppResult<Feedback> {
        let rating = u8::try_from(self.rating)
            .ok()
            .filter(|r| (1..=5).contains(r))
            .ok_or_else(|| AppError::InvalidInput("rating must be between 1 and 5".to_string()))?;

        Ok(Feedback {
            id: Uuid::new_v4(),
            request_id: self.request_id,
            outfit_id: self.outfit_id,
            rating,
            comment: normalize_optional(self.comment),
            selected: self.selected,
            created_at: Utc::now(),
        })
    }
}
