use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// Garment category of a wardrobe item
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Top,
    Bottom,
    Shoes,
    Accessory,
    Outerwear,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Top => "top",
            Category::Bottom => "bottom",
            Category::Shoes => "shoes",
            Category::Accessory => "accessory",
            Category::Outerwear => "outerwear",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(Category::Top),
            "bottom" => Ok(Category::Bottom),
            "shoes" => Ok(Category::Shoes),
            "accessory" => Ok(Category::Accessory),
            "outerwear" => Ok(Category::Outerwear),
            other => Err(AppError::InvalidInput(format!(
                "unknown category '{}'",
                other
            ))),
        }
    }
}

/// A clothing item in the user's wardrobe
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WardrobeItem {
    pub id: Uuid,
    pub name: String,
    pub category: Category,
    pub color: String,
    /// Free-text descriptors such as "casual" or "comfortable"
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub details: ItemDetails,
    pub created_at: DateTime<Utc>,
}

impl WardrobeItem {
    /// Builds a fresh item from validated input
    pub fn new(input: WardrobeItemInput) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: input.name,
            category: input.category,
            color: input.color,
            tags: input.tags,
            details: input.details,
            created_at: Utc::now(),
        }
    }

    /// Replaces every mutable field, keeping identity and creation time
    pub fn replace(&mut self, input: WardrobeItemInput) {
        self.name = input.name;
        self.category = input.category;
        self.color = input.color;
        self.tags = input.tags;
        self.details = input.details;
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Descriptive attributes that are stored and returned but never scored
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ItemDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fit: Option<String>,
    #[serde(default)]
    pub seasons: Vec<String>,
    #[serde(default)]
    pub styles: Vec<String>,
    #[serde(default)]
    pub occasions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    /// Warmth rating from 1 (light) to 5 (heavy)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warmth: Option<u8>,
    #[serde(default)]
    pub waterproof: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Body accepted when creating or replacing a wardrobe item
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct WardrobeItemInput {
    pub name: String,
    pub category: Category,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl WardrobeItemInput {
    /// Convenience constructor used by seeding and tests
    pub fn new(name: &str, category: Category, color: &str, tags: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            category,
            color: color.to_string(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            details: ItemDetails::default(),
        }
    }

    /// Trims and validates the input, returning the normalized form
    pub fn normalize(self) -> AppResult<Self> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(AppError::InvalidInput("name must not be empty".to_string()));
        }

        let details = self.details;
        if let Some(warmth) = details.warmth {
            if !(1..=5).contains(&warmth) {
                return Err(AppError::InvalidInput(
                    "warmth must be between 1 and 5".to_string(),
                ));
            }
        }
        if let Some(price) = details.price {
            if !price.is_finite() || price < 0.0 {
                return Err(AppError::InvalidInput(
                    "price must be a non-negative number".to_string(),
                ));
            }
        }

        Ok(Self {
            name,
            category: self.category,
            color: self.color.trim().to_string(),
            tags: normalize_set(self.tags),
            details: ItemDetails {
                subcategory: normalize_optional(details.subcategory),
                brand: normalize_optional(details.brand),
                size: normalize_optional(details.size),
                material: normalize_optional(details.material),
                pattern: normalize_optional(details.pattern),
                fit: normalize_optional(details.fit),
                seasons: normalize_set(details.seasons),
                styles: normalize_set(details.styles),
                occasions: normalize_set(details.occasions),
                condition: normalize_optional(details.condition),
                warmth: details.warmth,
                waterproof: details.waterproof,
                price: details.price,
                purchase_date: details.purchase_date,
                notes: normalize_optional(details.notes),
                image_url: normalize_optional(details.image_url),
            },
        })
    }
}

/// Trims an optional string, mapping blank values to `None`
pub(crate) fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trims entries, drops blanks and keeps the first occurrence of duplicates
fn normalize_set(values: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        let trimmed = value.trim();
        if !trimmed.is_empty() && !out.iter().any(|v| v == trimmed) {
            out.push(trimmed.to_string());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_serialization() {
        let json = serde_json::to_string(&Category::Outerwear).unwrap();
        assert_eq!(json, "\"outerwear\"");

        let parsed: Category = serde_json::from_str("\"shoes\"").unwrap();
        assert_eq!(parsed, Category::Shoes);
    }

    #[test]
    fn test_category_from_str_rejects_unknown() {
        assert_eq!("bottom".parse::<Category>().unwrap(), Category::Bottom);
        assert!("hat".parse::<Category>().is_err());
    }

    #[test]
    fn test_normalize_trims_and_dedupes_tags() {
        let mut input = WardrobeItemInput::new(
            "  Blue Jeans ",
            Category::Bottom,
            " blue ",
            &["casual", " casual", "", "comfortable "],
        );
        input.details.brand = Some("   ".to_string());
        input.details.notes = Some(" fits well ".to_string());

        let normalized = input.normalize().unwrap();
        assert_eq!(normalized.name, "Blue Jeans");
        assert_eq!(normalized.color, "blue");
        assert_eq!(normalized.tags, vec!["casual", "comfortable"]);
        assert_eq!(normalized.details.brand, None);
        assert_eq!(normalized.details.notes.as_deref(), Some("fits well"));
    }

    #[test]
    fn test_normalize_rejects_blank_name() {
        let input = WardrobeItemInput::new("   ", Category::Top, "white", &[]);
        assert!(matches!(input.normalize(), Err(AppError::InvalidInput(_))));
    }

    #[test]
    fn test_normalize_rejects_out_of_range_warmth() {
        let mut input = WardrobeItemInput::new("Parka", Category::Outerwear, "green", &[]);
        input.details.warmth = Some(6);
        assert!(input.normalize().is_err());
    }

    #[test]
    fn test_normalize_rejects_negative_price() {
        let mut input = WardrobeItemInput::new("Scarf", Category::Accessory, "blue", &[]);
        input.details.price = Some(-1.0);
        assert!(input.normalize().is_err());
    }

    #[test]
    fn test_replace_keeps_identity() {
        let mut item = WardrobeItem::new(WardrobeItemInput::new(
            "Grey Sweater",
            Category::Top,
            "grey",
            &["casual"],
        ));
        let id = item.id;
        let created_at = item.created_at;

        item.replace(WardrobeItemInput::new(
            "Charcoal Sweater",
            Category::Top,
            "charcoal",
            &["formal"],
        ));

        assert_eq!(item.id, id);
        assert_eq!(item.created_at, created_at);
        assert_eq!(item.name, "Charcoal Sweater");
        assert!(item.has_tag("formal"));
        assert!(!item.has_tag("casual"));
    }

    #[test]
    fn test_input_accepts_flat_extended_attributes() {
        let input: WardrobeItemInput = serde_json::from_value(serde_json::json!({
            "name": "Rain Jacket",
            "category": "outerwear",
            "color": "yellow",
            "tags": ["outdoor"],
            "warmth": 2,
            "waterproof": true,
            "seasons": ["spring", "autumn"],
            "purchase_date": "2024-03-15"
        }))
        .unwrap();

        assert_eq!(input.details.warmth, Some(2));
        assert!(input.details.waterproof);
        assert_eq!(input.details.seasons, vec!["spring", "autumn"]);
        assert_eq!(
            input.details.purchase_date,
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
    }
}
