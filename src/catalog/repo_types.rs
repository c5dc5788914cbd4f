use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Weather {
    Cold,
    Hot,
    Neutral,
}

impl Weather {
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if ["hot", "warm", "sunny", "humid"].iter().any(|k| s.contains(k)) {
            Some(Self::Hot)
        } else if ["cold", "chilly", "cool", "snow", "freez", "rain"].iter().any(|k| s.contains(k)) {
            Some(Self::Cold)
        } else if ["neutral", "mild", "normal"].iter().any(|k| s.contains(k)) {
            Some(Self::Neutral)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    Spicy,
    Salty,
    Sweet,
    Savory,
    Healthy,
    Light,
}

impl Flavor {
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if s.contains("spic") {
            Some(Self::Spicy)
        } else if s.contains("salt") {
            Some(Self::Salty)
        } else if s.contains("sweet") || s.contains("dessert") {
            Some(Self::Sweet)
        } else if s.contains("savory") || s.contains("savoury") || s.contains("umami") {
            Some(Self::Savory)
        } else if s.contains("health") {
            Some(Self::Healthy)
        } else if s.contains("light") {
            Some(Self::Light)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    MuscleGain,
    Balanced,
}

impl Goal {
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase().replace(['_', '-'], " ");
        if ["lose", "loss", "diet", "low cal", "slim"].iter().any(|k| s.contains(k)) {
            Some(Self::WeightLoss)
        } else if ["muscle", "protein", "bulk", "gain"].iter().any(|k| s.contains(k)) {
            Some(Self::MuscleGain)
        } else if ["balance", "maintain"].iter().any(|k| s.contains(k)) {
            Some(Self::Balanced)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MealTime {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl MealTime {
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if s.contains("breakfast") || s.contains("morning") || s.contains("brunch") {
            Some(Self::Breakfast)
        } else if s.contains("lunch") || s.contains("noon") || s.contains("midday") {
            Some(Self::Lunch)
        } else if s.contains("dinner") || s.contains("evening") || s.contains("supper") {
            Some(Self::Dinner)
        } else if s.contains("snack") || s.contains("night") {
            Some(Self::Snack)
        } else {
            None
        }
    }
}

/// Lookup-mode categories, in the order keywords are tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Spicy,
    Healthy,
    Rice,
    Pasta,
    FastFood,
    Default,
}

impl Category {
    const KEYWORDS: [(&'static str, Category); 5] = [
        ("spicy", Category::Spicy),
        ("healthy", Category::Healthy),
        ("rice", Category::Rice),
        ("pasta", Category::Pasta),
        ("fastfood", Category::FastFood),
    ];

    /// Exact or substring keyword match; spaces, `-` and `_` are ignored.
    pub fn resolve(preference: &str) -> Self {
        let normalized: String = preference
            .to_lowercase()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect();
        Self::KEYWORDS
            .iter()
            .find(|(kw, _)| normalized == *kw || normalized.contains(kw))
            .map(|(_, cat)| *cat)
            .unwrap_or(Category::Default)
    }

    pub fn key(self) -> &'static str {
        match self {
            Category::Spicy => "spicy",
            Category::Healthy => "healthy",
            Category::Rice => "rice",
            Category::Pasta => "pasta",
            Category::FastFood => "fastfood",
            Category::Default => "default",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiceType {
    Chilli,
    Mala,
    Curry,
    Kimchi,
}

impl SpiceType {
    pub fn parse(raw: &str) -> Option<Self> {
        let s = raw.trim().to_lowercase();
        if s.starts_with("chil") {
            Some(Self::Chilli)
        } else if ["mala", "sichuan", "szechuan", "numb", "peppercorn"].iter().any(|k| s.contains(k)) {
            Some(Self::Mala)
        } else if s.contains("curry") {
            Some(Self::Curry)
        } else if ["kimchi", "gochujang", "korean"].iter().any(|k| s.contains(k)) {
            Some(Self::Kimchi)
        } else {
            None
        }
    }

    pub fn key(self) -> &'static str {
        match self {
            SpiceType::Chilli => "spicy.chilli",
            SpiceType::Mala => "spicy.mala",
            SpiceType::Curry => "spicy.curry",
            SpiceType::Kimchi => "spicy.kimchi",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodEntry {
    pub name: String,
    #[serde(default)]
    pub weather: Option<Weather>,
    #[serde(default)]
    pub flavors: Vec<Flavor>,
    #[serde(default)]
    pub goals: Vec<Goal>,
    #[serde(default)]
    pub meal_times: Vec<MealTime>,
    #[serde(default)]
    pub calories: Option<u32>,
}

impl FoodEntry {
    #[cfg(test)]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weather: None,
            flavors: Vec::new(),
            goals: Vec::new(),
            meal_times: Vec::new(),
            calories: None,
        }
    }
}

/// Immutable selection universe: named lists for lookup mode, tagged entries
/// for scoring mode.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    pub lists: BTreeMap<String, Vec<String>>,
    pub entries: Vec<FoodEntry>,
}
