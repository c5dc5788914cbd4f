use std::collections::BTreeMap;
use std::path::Path;

use anyhow::Context;

use super::repo_types::{Catalog, Flavor, FoodEntry, Goal, MealTime, Weather};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CatalogError {
    #[error("catalog has no non-empty \"default\" list")]
    MissingDefault,
    #[error("catalog has no scoring entries")]
    NoEntries,
    #[error("catalog list {0:?} contains an empty name")]
    EmptyName(String),
}

const LISTS: &[(&str, &[&str])] = &[
    ("spicy", &["Kimchi Stew", "Spicy Hot Pot", "Tteokbokki", "Spicy Fried Chicken"]),
    ("spicy.chilli", &["Chilli Ramen", "Chilli Con Carne", "Chilli Crab", "Hot Chilli Wings"]),
    ("spicy.mala", &["Mala Xiang Guo", "Mapo Tofu", "Sichuan Hot Pot", "Dan Dan Noodles"]),
    ("spicy.curry", &["Vindaloo", "Thai Green Curry", "Jungle Curry", "Laksa"]),
    ("spicy.kimchi", &["Kimchi Stew", "Kimchi Fried Rice", "Buldak", "Tteokbokki"]),
    ("cold", &["Cold Noodles", "Chilled Tofu", "Fresh Salad"]),
    ("healthy", &["Grilled Salmon", "Quinoa Salad", "Steamed Vegetables", "Tofu Bowl"]),
    ("rice", &["Bibimbap", "Fried Rice", "Chicken Biryani", "Omurice"]),
    ("pasta", &["Spaghetti Carbonara", "Penne Arrabbiata", "Lasagna", "Pesto Linguine"]),
    ("fastfood", &["Cheeseburger", "Fried Chicken Bucket", "Pepperoni Pizza", "Hot Dog"]),
    ("default", &["Bibimbap", "Fried Rice", "Ramen", "Sandwich"]),
];

fn entry(
    name: &str,
    weather: Weather,
    flavors: &[Flavor],
    goals: &[Goal],
    meal_times: &[MealTime],
    calories: u32,
) -> FoodEntry {
    FoodEntry {
        name: name.to_string(),
        weather: Some(weather),
        flavors: flavors.to_vec(),
        goals: goals.to_vec(),
        meal_times: meal_times.to_vec(),
        calories: Some(calories),
    }
}

fn builtin_entries() -> Vec<FoodEntry> {
    use Flavor::*;
    use Goal::*;
    use MealTime::*;

    vec![
        entry("Ramen", Weather::Cold, &[Salty, Savory], &[Balanced], &[Lunch, Dinner], 550),
        entry("Kimchi Stew", Weather::Cold, &[Spicy, Salty], &[Balanced], &[Lunch, Dinner], 420),
        entry("Spicy Hot Pot", Weather::Cold, &[Spicy], &[MuscleGain], &[Dinner], 850),
        entry("Bibimbap", Weather::Neutral, &[Spicy, Healthy], &[Balanced], &[Lunch, Dinner], 560),
        entry("Grilled Salmon", Weather::Neutral, &[Healthy, Savory], &[WeightLoss, MuscleGain], &[Dinner], 480),
        entry("Quinoa Salad", Weather::Hot, &[Healthy, Light], &[WeightLoss], &[Lunch], 350),
        entry("Cold Noodles", Weather::Hot, &[Light, Sweet], &[Balanced], &[Lunch], 450),
        entry("Chilled Tofu", Weather::Hot, &[Light, Healthy], &[WeightLoss], &[Lunch, Snack], 200),
        entry("Chicken Breast Bowl", Weather::Neutral, &[Healthy, Savory], &[MuscleGain, WeightLoss], &[Lunch, Dinner], 520),
        entry("Oatmeal with Berries", Weather::Cold, &[Sweet, Healthy], &[WeightLoss, Balanced], &[Breakfast], 300),
        entry("Egg Sandwich", Weather::Neutral, &[Savory, Salty], &[MuscleGain], &[Breakfast], 430),
        entry("Fried Chicken", Weather::Neutral, &[Salty, Savory], &[MuscleGain], &[Dinner, Snack], 900),
        entry("Tteokbokki", Weather::Cold, &[Spicy, Sweet], &[Balanced], &[Snack], 480),
        entry("Fruit Smoothie", Weather::Hot, &[Sweet, Light], &[WeightLoss], &[Breakfast, Snack], 250),
        entry("Beef Stew", Weather::Cold, &[Savory, Salty], &[MuscleGain], &[Dinner], 700),
        entry("Poke Bowl", Weather::Hot, &[Healthy, Salty], &[Balanced, MuscleGain], &[Lunch], 590),
    ]
}

impl Catalog {
    pub fn builtin() -> Self {
        let lists = LISTS
            .iter()
            .map(|(key, names)| {
                (key.to_string(), names.iter().map(|n| n.to_string()).collect())
            })
            .collect::<BTreeMap<String, Vec<String>>>();
        Self {
            lists,
            entries: builtin_entries(),
        }
    }

    pub async fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = tokio::fs::read(path)
            .await
            .with_context(|| format!("read catalog {}", path.display()))?;
        let catalog: Catalog = serde_json::from_slice(&raw)
            .with_context(|| format!("parse catalog {}", path.display()))?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.lists.get("default").map_or(true, |l| l.is_empty()) {
            return Err(CatalogError::MissingDefault);
        }
        if self.entries.is_empty() {
            return Err(CatalogError::NoEntries);
        }
        for (key, names) in &self.lists {
            if names.iter().any(|n| n.trim().is_empty()) {
                return Err(CatalogError::EmptyName(key.clone()));
            }
        }
        if self.entries.iter().any(|e| e.name.trim().is_empty()) {
            return Err(CatalogError::EmptyName("entries".into()));
        }
        Ok(())
    }

    /// The named list, or the `default` list when the key is unknown.
    pub fn list_or_default(&self, key: &str) -> &[String] {
        self.lists
            .get(key)
            .or_else(|| self.lists.get("default"))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Case-insensitive lookup of a known food name across lists and entries.
    pub fn canonical_name(&self, raw: &str) -> Option<&str> {
        let raw = raw.trim();
        self.entries
            .iter()
            .map(|e| e.name.as_str())
            .chain(self.lists.values().flatten().map(String::as_str))
            .find(|name| name.eq_ignore_ascii_case(raw))
    }
}

#[cfg(test)]
mod catalog_tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn builtin_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.validate(), Ok(()));
        assert_eq!(catalog.list_or_default("spicy.chilli")[0], "Chilli Ramen");
    }

    #[test]
    fn unknown_list_falls_back_to_default() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.list_or_default("dessert"), catalog.list_or_default("default"));
    }

    #[test]
    fn canonical_name_ignores_case() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.canonical_name("chilli ramen"), Some("Chilli Ramen"));
        assert_eq!(catalog.canonical_name(" RAMEN "), Some("Ramen"));
        assert_eq!(catalog.canonical_name("pizza margherita"), None);
    }

    #[test]
    fn validate_rejects_incomplete_catalogs() {
        let mut catalog = Catalog::builtin();
        catalog.lists.remove("default");
        assert_eq!(catalog.validate(), Err(CatalogError::MissingDefault));

        let mut catalog = Catalog::builtin();
        catalog.entries.clear();
        assert_eq!(catalog.validate(), Err(CatalogError::NoEntries));

        let mut catalog = Catalog::builtin();
        catalog.lists.insert("pasta".into(), vec!["  ".into()]);
        assert_eq!(catalog.validate(), Err(CatalogError::EmptyName("pasta".into())));
    }

    #[tokio::test]
    async fn from_file_loads_json_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(
            &path,
            r#"{
                "lists": { "default": ["Dumplings"] },
                "entries": [{ "name": "Dumplings", "weather": "cold", "calories": 400 }]
            }"#,
        )
        .unwrap();

        let catalog = Catalog::from_file(&path).await.unwrap();
        assert_eq!(catalog.list_or_default("spicy"), ["Dumplings".to_string()]);
        assert_eq!(catalog.entries[0].calories, Some(400));
    }

    #[tokio::test]
    async fn from_file_reports_invalid_catalog() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, r#"{ "lists": {}, "entries": [] }"#).unwrap();

        let err = Catalog::from_file(&path).await.unwrap_err();
        assert!(err.to_string().contains("default"));
    }
}
