mod feedback;
mod outfit;
mod recommendation;
mod wardrobe_item;

pub use feedback::{Feedback, FeedbackEntry, FeedbackInput};
pub use outfit::{Outfit, OutfitCandidate, SelectionStrategy};
pub use recommendation::{
    Budget, Formality, HistoryEntry, RecommendationRequest, RecommendationRequestInput,
    RecommendationResponse, RecordedRequest,
};
pub use wardrobe_item::{Category, ItemDetails, WardrobeItem, WardrobeItemInput};
