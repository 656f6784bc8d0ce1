use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

use super::{Feedback, Outfit};

/// How dressed-up the requested outfit should be
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum Formality {
    Casual,
    BusinessCasual,
    SemiFormal,
    Formal,
}

impl Formality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Formality::Casual => "casual",
            Formality::BusinessCasual => "business-casual",
            Formality::SemiFormal => "semi-formal",
            Formality::Formal => "formal",
        }
    }

    /// Tags that earn the formality bonus when scoring
    pub fn target_tags(&self) -> &'static [&'static str] {
        match self {
            Formality::Casual => &["casual", "comfortable"],
            Formality::BusinessCasual => &["business-casual", "versatile"],
            Formality::Formal => &["formal", "professional"],
            Formality::SemiFormal => &["formal", "professional", "elegant"],
        }
    }

    /// Text before the first hyphen, matched as a substring against item tags.
    ///
    /// `semi-formal` yields `semi`, which rarely matches anything.
    pub fn tag_prefix(&self) -> &'static str {
        let name = self.as_str();
        name.split('-').next().unwrap_or(name)
    }
}

impl Display for Formality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Formality {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "casual" => Ok(Formality::Casual),
            "business-casual" => Ok(Formality::BusinessCasual),
            "semi-formal" => Ok(Formality::SemiFormal),
            "formal" => Ok(Formality::Formal),
            other => Err(AppError::InvalidInput(format!(
                "unknown formality '{}'",
                other
            ))),
        }
    }
}

/// Spending tier for the request; recorded but not used in selection
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Budget {
    Low,
    Medium,
    High,
    Any,
}

impl Budget {
    pub fn as_str(&self) -> &'static str {
        match self {
            Budget::Low => "low",
            Budget::Medium => "medium",
            Budget::High => "high",
            Budget::Any => "any",
        }
    }
}

impl FromStr for Budget {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Budget::Low),
            "medium" => Ok(Budget::Medium),
            "high" => Ok(Budget::High),
            "any" => Ok(Budget::Any),
            other => Err(AppError::InvalidInput(format!("unknown budget '{}'", other))),
        }
    }
}

/// Raw recommendation request as received from the client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecommendationRequestInput {
    pub occasion: String,
    pub style: String,
    pub formality: Formality,
    pub comfort: i64,
    pub budget: Budget,
    #[serde(default)]
    pub constraints: Option<Vec<String>>,
}

/// A validated recommendation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendationRequest {
    pub occasion: String,
    pub style: String,
    pub formality: Formality,
    /// Desired comfort from 1 to 10
    pub comfort: u8,
    pub budget: Budget,
    /// Free-text notes echoed back to the caller; never used for filtering
    pub constraints: Vec<String>,
}

impl RecommendationRequestInput {
    /// Validates ranges and required text, producing a normalized request
    pub fn normalize(self) -> AppResult<RecommendationRequest> {
        let occasion = self.occasion.trim().to_string();
        if occasion.is_empty() {
            return Err(AppError::InvalidInput(
                "occasion must not be empty".to_string(),
            ));
        }

        let style = self.style.trim().to_string();
        if style.is_empty() {
            return Err(AppError::InvalidInput("style must not be empty".to_string()));
        }

        let comfort = u8::try_from(self.comfort)
            .ok()
            .filter(|c| (1..=10).contains(c))
            .ok_or_else(|| {
                AppError::InvalidInput("comfort must be between 1 and 10".to_string())
            })?;

        let constraints = self
            .constraints
            .unwrap_or_default()
            .into_iter()
            .map(|c| c.trim().to_string())
            .collect();

        Ok(RecommendationRequest {
            occasion,
            style,
            formality: self.formality,
            comfort,
            budget: self.budget,
            constraints,
        })
    }
}

/// A request as recorded in history
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecordedRequest {
    pub id: Uuid,
    #[serde(flatten)]
    pub request: RecommendationRequest,
    pub created_at: DateTime<Utc>,
}

impl RecordedRequest {
    pub fn new(request: RecommendationRequest) -> Self {
        Self {
            id: Uuid::new_v4(),
            request,
            created_at: Utc::now(),
        }
    }
}

/// Response body of a recommendation call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub request_id: Uuid,
    pub outfits: Vec<Outfit>,
}

/// One entry of the recommendation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    #[serde(flatten)]
    pub request: RecordedRequest,
    pub outfits: Vec<Outfit>,
    pub feedback: Vec<Feedback>,
}
