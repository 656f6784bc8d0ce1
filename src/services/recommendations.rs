use tracing::instrument;

use crate::{
    db::{RecommendationStore, WardrobeStore},
    error::AppResult,
    models::{RecommendationRequestInput, RecommendationResponse},
};

use super::selector::select_outfits;

/// Generates and records outfit recommendations for a request
///
/// The request is recorded first, then outfits are selected from a snapshot
/// of the wardrobe and recorded one by one. An empty wardrobe produces a
/// response with no outfits. There is no transaction across the request and
/// its outfits; a failure part way leaves the request without some outfits.
#[instrument(skip_all, fields(formality = %input.formality, comfort = input.comfort))]
pub async fn recommend(
    wardrobe: &dyn WardrobeStore,
    history: &dyn RecommendationStore,
    input: RecommendationRequestInput,
) -> AppResult<RecommendationResponse> {
    let request = input.normalize()?;
    let recorded = history.record_request(request).await?;

    let items = wardrobe.list_all().await?;
    let candidates = select_outfits(&items, &recorded.request);

    tracing::info!(
        request_id = %recorded.id,
        wardrobe_size = items.len(),
        outfits = candidates.len(),
        "Selected outfits"
    );

    let mut outfits = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        tracing::debug!(strategy = ?candidate.strategy, score = candidate.score, "Recording outfit");
        outfits.push(history.record_outfit(recorded.id, candidate).await?);
    }

    Ok(RecommendationResponse {
        request_id: recorded.id,
        outfits,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        db::{MockRecommendationStore, MockWardrobeStore},
        error::AppError,
        models::{
            Budget, Category, Formality, Outfit, RecordedRequest, WardrobeItem, WardrobeItemInput,
        },
    };

    fn input(comfort: i64) -> RecommendationRequestInput {
        RecommendationRequestInput {
            occasion: "wedding".to_string(),
            style: "classic".to_string(),
            formality: Formality::Formal,
            comfort,
            budget: Budget::High,
            constraints: None,
        }
    }

    fn history_mock() -> MockRecommendationStore {
        let mut history = MockRecommendationStore::new();
        history
            .expect_record_request()
            .returning(|request| Ok(RecordedRequest::new(request)));
        history
            .expect_record_outfit()
            .returning(|request_id, candidate| Ok(Outfit::from_candidate(request_id, &candidate)));
        history
    }

    #[tokio::test]
    async fn test_recommend_records_each_outfit() {
        let items = vec![
            WardrobeItem::new(WardrobeItemInput::new(
                "Black Dress Pants",
                Category::Bottom,
                "black",
                &["formal", "professional"],
            )),
            WardrobeItem::new(WardrobeItemInput::new(
                "White Shirt",
                Category::Top,
                "white",
                &["formal"],
            )),
            WardrobeItem::new(WardrobeItemInput::new(
                "Oxfords",
                Category::Shoes,
                "black",
                &["formal", "professional"],
            )),
        ];

        let mut wardrobe = MockWardrobeStore::new();
        let snapshot = items.clone();
        wardrobe
            .expect_list_all()
            .times(1)
            .returning(move || Ok(snapshot.clone()));

        let mut history = MockRecommendationStore::new();
        history
            .expect_record_request()
            .times(1)
            .returning(|request| Ok(RecordedRequest::new(request)));
        history
            .expect_record_outfit()
            .times(2)
            .returning(|request_id, candidate| Ok(Outfit::from_candidate(request_id, &candidate)));

        let response = recommend(&wardrobe, &history, input(3)).await.unwrap();

        assert_eq!(response.outfits.len(), 2);
        assert!(response
            .outfits
            .iter()
            .all(|o| o.request_id == response.request_id));
        // shirt, pants and shoes: 5 formal-tag matches plus completeness
        assert_eq!(response.outfits[0].score, 90);
    }

    #[tokio::test]
    async fn test_recommend_with_empty_wardrobe() {
        let mut wardrobe = MockWardrobeStore::new();
        wardrobe.expect_list_all().returning(|| Ok(Vec::new()));

        let mut history = MockRecommendationStore::new();
        history
            .expect_record_request()
            .times(1)
            .returning(|request| Ok(RecordedRequest::new(request)));
        history.expect_record_outfit().never();

        let response = recommend(&wardrobe, &history, input(9)).await.unwrap();
        assert!(response.outfits.is_empty());
    }

    #[tokio::test]
    async fn test_invalid_request_is_not_recorded() {
        let mut wardrobe = MockWardrobeStore::new();
        wardrobe.expect_list_all().never();

        let mut history = MockRecommendationStore::new();
        history.expect_record_request().never();

        let result = recommend(&wardrobe, &history, input(0)).await;
        assert!(matches!(result, Err(AppError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut wardrobe = MockWardrobeStore::new();
        wardrobe
            .expect_list_all()
            .returning(|| Err(AppError::Internal("store offline".to_string())));

        let result = recommend(&wardrobe, &history_mock(), input(5)).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }
}
