use std::collections::HashSet;

use uuid::Uuid;

use crate::models::{
    Category, OutfitCandidate, RecommendationRequest, SelectionStrategy, WardrobeItem,
};

use super::{rationale::rationale, scoring::score, scoring::HIGH_COMFORT_THRESHOLD};

/// Fewest items an outfit may contain
const MIN_OUTFIT_ITEMS: usize = 2;
/// Upper bound on both outfit size (for tag-based picks) and outfits returned
const MAX_OUTFIT_ITEMS: usize = 3;
/// Below this many outfits the fallback step runs
const MIN_OUTFITS: usize = 2;
const MAX_OUTFITS: usize = 3;

/// Picks up to three outfits from a wardrobe snapshot
///
/// `items` must be in store order (newest first); every step takes the first
/// eligible item in that order, so the result is fully determined by the
/// snapshot and the request. Candidates are returned in generation order:
/// primary, alternative, comfort, fallback. A wardrobe with fewer than two
/// items yields an empty list.
pub fn select_outfits(
    items: &[WardrobeItem],
    request: &RecommendationRequest,
) -> Vec<OutfitCandidate> {
    let mut candidates = Vec::new();

    let primary = primary_picks(items, request);
    push_candidate(&mut candidates, primary.clone(), request, SelectionStrategy::Primary);

    let used: HashSet<Uuid> = primary.iter().map(|item| item.id).collect();
    let alternative = alternative_picks(items, &used);
    push_candidate(
        &mut candidates,
        alternative,
        request,
        SelectionStrategy::Alternative,
    );

    if request.comfort >= HIGH_COMFORT_THRESHOLD {
        let comfortable: Vec<WardrobeItem> = items
            .iter()
            .filter(|item| item.has_tag("comfortable"))
            .take(MAX_OUTFIT_ITEMS)
            .cloned()
            .collect();
        push_candidate(
            &mut candidates,
            comfortable,
            request,
            SelectionStrategy::Comfort,
        );
    }

    if candidates.len() < MIN_OUTFITS {
        let first: Vec<WardrobeItem> = items.iter().take(MAX_OUTFIT_ITEMS).cloned().collect();
        push_candidate(&mut candidates, first, request, SelectionStrategy::Fallback);
    }

    candidates.truncate(MAX_OUTFITS);
    candidates
}

/// Formality-matched top and bottom plus the first pair of shoes
fn primary_picks(items: &[WardrobeItem], request: &RecommendationRequest) -> Vec<WardrobeItem> {
    let prefix = request.formality.tag_prefix();
    let matches_formality =
        |item: &WardrobeItem| item.tags.iter().any(|tag| tag.contains(prefix));

    [
        first_of(items, Category::Top, matches_formality),
        first_of(items, Category::Bottom, matches_formality),
        first_of(items, Category::Shoes, |_| true),
    ]
    .into_iter()
    .flatten()
    .cloned()
    .collect()
}

/// First top, bottom and shoes not already picked
fn alternative_picks(items: &[WardrobeItem], used: &HashSet<Uuid>) -> Vec<WardrobeItem> {
    let unused = |item: &WardrobeItem| !used.contains(&item.id);

    [Category::Top, Category::Bottom, Category::Shoes]
        .into_iter()
        .filter_map(|category| first_of(items, category, unused))
        .cloned()
        .collect()
}

fn first_of<F>(items: &[WardrobeItem], category: Category, predicate: F) -> Option<&WardrobeItem>
where
    F: Fn(&WardrobeItem) -> bool,
{
    items
        .iter()
        .find(|item| item.category == category && predicate(*item))
}

fn push_candidate(
    candidates: &mut Vec<OutfitCandidate>,
    items: Vec<WardrobeItem>,
    request: &RecommendationRequest,
    strategy: SelectionStrategy,
) {
    if items.len() < MIN_OUTFIT_ITEMS {
        tracing::debug!(?strategy, found = items.len(), "Not enough items for outfit");
        return;
    }

    let score = score(&items, request);
    let rationale = rationale(&items, request, score);
    candidates.push(OutfitCandidate {
        items,
        score,
        rationale,
        strategy,
    });
}
