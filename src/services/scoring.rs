use crate::models::{Category, RecommendationRequest, WardrobeItem};

const BASE_SCORE: i32 = 50;
const POINTS_PER_MATCHING_TAG: i32 = 5;
const COMFORT_BONUS: i32 = 10;
const COMPLETE_OUTFIT_BONUS: i32 = 15;

/// Comfort level at which "comfortable" items earn a bonus
pub const HIGH_COMFORT_THRESHOLD: u8 = 7;

/// Scores an outfit against a request on a 0-100 scale
///
/// The score starts at 50 and adds:
/// - 5 points for every tag occurrence that matches the formality's target tags
/// - 10 points if comfort is high and any item is tagged "comfortable"
/// - 15 points if the outfit has a top, a bottom and shoes
pub fn score(items: &[WardrobeItem], request: &RecommendationRequest) -> u8 {
    let target_tags = request.formality.target_tags();

    let matching_tags = items
        .iter()
        .flat_map(|item| item.tags.iter())
        .filter(|tag| target_tags.contains(&tag.as_str()))
        .count() as i32;

    let mut total = BASE_SCORE + matching_tags * POINTS_PER_MATCHING_TAG;

    if request.comfort >= HIGH_COMFORT_THRESHOLD && items.iter().any(|i| i.has_tag("comfortable")) {
        total += COMFORT_BONUS;
    }

    if is_complete(items) {
        total += COMPLETE_OUTFIT_BONUS;
    }

    total.clamp(0, 100) as u8
}

/// True when the items cover a top, a bottom and shoes
pub fn is_complete(items: &[WardrobeItem]) -> bool {
    [Category::Top, Category::Bottom, Category::Shoes]
        .iter()
        .all(|category| items.iter().any(|item| item.category == *category))
}
