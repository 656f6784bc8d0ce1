use crate::models::{RecommendationRequest, WardrobeItem};

use super::scoring::is_complete;

/// Builds the human-readable explanation shown next to an outfit
pub fn rationale(items: &[WardrobeItem], request: &RecommendationRequest, score: u8) -> String {
    let names: Vec<&str> = items.iter().map(|item| item.name.as_str()).collect();
    let mut text = format!("This outfit combines {}. ", names.join(", "));

    text.push_str(match score {
        80.. => "Excellent match for your requirements! ",
        60..=79 => "Good match for your requirements. ",
        _ => "Acceptable match for your requirements. ",
    });

    if is_complete(items) {
        text.push_str("This is a complete outfit ready to wear. ");
    }

    text.push_str(&format!(
        "The {} style and your comfort level of {}/10 have been considered.",
        request.formality, request.comfort
    ));

    text
}
