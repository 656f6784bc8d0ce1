use tracing::instrument;

use crate::{
    db::RecommendationStore,
    error::{AppError, AppResult},
    models::{Feedback, FeedbackEntry, FeedbackInput},
};

/// Validates and records a rating for one recommended outfit
///
/// The request and outfit must exist, and the outfit must have been
/// generated for that request.
#[instrument(skip_all, fields(request_id = %input.request_id, outfit_id = %input.outfit_id))]
pub async fn submit_feedback(
    history: &dyn RecommendationStore,
    input: FeedbackInput,
) -> AppResult<Feedback> {
    let feedback = input.into_feedback()?;

    if history.find_request(feedback.request_id).await?.is_none() {
        return Err(AppError::NotFound(format!(
            "recommendation request {}",
            feedback.request_id
        )));
    }

    let outfit = history
        .find_outfit(feedback.outfit_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("outfit {}", feedback.outfit_id)))?;

    if outfit.request_id != feedback.request_id {
        return Err(AppError::InvalidInput(
            "outfit does not belong to this request".to_string(),
        ));
    }

    let recorded = history.record_feedback(feedback).await?;
    tracing::info!(rating = recorded.rating, selected = recorded.selected, "Feedback recorded");
    Ok(recorded)
}

/// All feedback, newest first, each with its request and outfit
pub async fn list_feedback(history: &dyn RecommendationStore) -> AppResult<Vec<FeedbackEntry>> {
    let feedback = history.list_feedback().await?;

    let mut entries = Vec::with_capacity(feedback.len());
    for feedback in feedback {
        let request = history.find_request(feedback.request_id).await?;
        let outfit = history.find_outfit(feedback.outfit_id).await?;
        entries.push(FeedbackEntry {
            feedback,
            request,
            outfit,
        });
    }

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::MockRecommendationStore,
        models::{Budget, Formality, Outfit, RecommendationRequest, RecordedRequest},
    };
    use chrono::Utc;
    use uuid::Uuid;

    fn recorded_request() -> RecordedRequest {
        RecordedRequest::new(RecommendationRequest {
            occasion: "party".to_string(),
            style: "bold".to_string(),
            formality: Formality::SemiFormal,
            comfort: 5,
            budget: Budget::Any,
            constraints: Vec::new(),
        })
    }

    fn outfit_for(request_id: Uuid) -> Outfit {
        Outfit {
            id: Uuid::new_v4(),
            request_id,
            items: Vec::new(),
            score: 60,
            rationale: "This outfit combines Tee, Jeans.".to_string(),
            created_at: Utc::now(),
        }
    }

    fn input(request_id: Uuid, outfit_id: Uuid, rating: i64) -> FeedbackInput {
        FeedbackInput {
            request_id,
            outfit_id,
            rating,
            comment: None,
            selected: true,
        }
    }

    #[tokio::test]
    async fn test_submit_feedback_records() {
        let request = recorded_request();
        let outfit = outfit_for(request.id);
        let (request_id, outfit_id) = (request.id, outfit.id);

        let mut history = MockRecommendationStore::new();
        history
            .expect_find_request()
            .returning(move |_| Ok(Some(request.clone())));
        history
            .expect_find_outfit()
            .returning(move |_| Ok(Some(outfit.clone())));
        history
            .expect_record_feedback()
            .times(1)
            .returning(|feedback| Ok(feedback));

        let feedback = submit_feedback(&history, input(request_id, outfit_id, 5))
            .await
            .unwrap();
        assert_eq!(feedback.outfit_id, outfit_id);
        assert_eq!(feedback.rating, 5);
    }

    #[tokio::test]
    async fn test_unknown_request_is_not_found() {
        let mut history = MockRecommendationStore::new();
        history.expect_find_request().returning(|_| Ok(None));
        history.expect_record_feedback().never();

        let result = submit_feedback(&history, input(Uuid::new_v4(), Uuid::new_v4(), 3)).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_outfit_from_other_request_is_rejected() {
        let request = recorded_request();
        let request_id = request.id;
        let foreign = outfit_for(Uuid::new_v4());
        let outfit_id = foreign.id;

        let mut history = MockRecommendationStore::new();
        history
            .expect_find_request()
            .returning(move |_| Ok(Some(request.clone())));
        history
            .expect_find_outfit()
            .returning(move |_| Ok(Some(foreign.clone())));
        history.expect_record_feedback().never();

        let result = submit_feedback(&history, input(request_id, outfit_id, 2)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_rating_checked_before_lookup() {
        let mut history = MockRecommendationStore::new();
        history.expect_find_request().never();

        let result = submit_feedback(&history, input(Uuid::new_v4(), Uuid::new_v4(), 9)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_list_feedback_attaches_request_and_outfit() {
        let request = recorded_request();
        let outfit = outfit_for(request.id);
        let stored = input(request.id, outfit.id, 4).into_feedback().unwrap();
        let (request_id, outfit_id) = (request.id, outfit.id);

        let mut history = MockRecommendationStore::new();
        let listed = stored.clone();
        history
            .expect_list_feedback()
            .times(1)
            .returning(move || Ok(vec![listed.clone()]));
        history
            .expect_find_request()
            .withf(move |id| *id == request_id)
            .returning(move |_| Ok(Some(request.clone())));
        history
            .expect_find_outfit()
            .withf(move |id| *id == outfit_id)
            .returning(move |_| Ok(Some(outfit.clone())));

        let entries = list_feedback(&history).await.unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].feedback, stored);
        assert_eq!(entries[0].request.as_ref().map(|r| r.id), Some(request_id));
        assert_eq!(entries[0].outfit.as_ref().map(|o| o.id), Some(outfit_id));
    }
}
