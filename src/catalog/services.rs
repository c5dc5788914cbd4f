use super::repo_types::{Catalog, Flavor, FoodEntry, Goal, MealTime, Weather};

pub const MAX_PICKS: usize = 3;
pub const LOW_CALORIE_THRESHOLD: u32 = 600;

/// Categorical inputs for scoring mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Signals {
    pub preference: Option<Flavor>,
    pub weather: Option<Weather>,
    pub goal: Option<Goal>,
    pub meal_time: Option<MealTime>,
}

/// Names the user should not be offered again right now.
#[derive(Debug, Default, Clone, Copy)]
pub struct Exclusions<'a> {
    pub recent_meal: Option<&'a str>,
    pub ledger: &'a [String],
}

impl<'a> Exclusions<'a> {
    pub fn new(recent_meal: Option<&'a str>, ledger: &'a [String]) -> Self {
        Self { recent_meal, ledger }
    }

    pub fn excludes(&self, name: &str) -> bool {
        self.recent_meal
            .is_some_and(|recent| recent.trim().eq_ignore_ascii_case(name))
            || self.ledger.iter().any(|seen| seen.eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub picks: Vec<String>,
    /// Every candidate was excluded; `picks` holds the unfiltered first entry.
    pub exhausted: bool,
}

impl Selection {
    pub fn first(&self) -> Option<&str> {
        self.picks.first().map(String::as_str)
    }
}

fn pick<'n>(ordered: impl Iterator<Item = &'n str> + Clone, exclusions: &Exclusions<'_>) -> Selection {
    let picks: Vec<String> = ordered
        .clone()
        .filter(|name| !exclusions.excludes(name))
        .take(MAX_PICKS)
        .map(str::to_string)
        .collect();
    if !picks.is_empty() {
        return Selection { picks, exhausted: false };
    }
    match ordered.into_iter().next() {
        Some(first) => Selection {
            picks: vec![first.to_string()],
            exhausted: true,
        },
        None => Selection {
            picks: Vec::new(),
            exhausted: false,
        },
    }
}

/// Lookup mode: the first non-excluded names of a named list.
pub fn select_from_list(catalog: &Catalog, key: &str, exclusions: &Exclusions<'_>) -> Selection {
    let list = catalog.list_or_default(key);
    pick(list.iter().map(String::as_str), exclusions)
}

pub fn score(entry: &FoodEntry, signals: &Signals) -> u32 {
    let mut score = 0;
    if signals.weather.is_some() && entry.weather == signals.weather {
        score += 1;
    }
    if signals.preference.is_some_and(|f| entry.flavors.contains(&f)) {
        score += 2;
    }
    if signals.goal.is_some_and(|g| entry.goals.contains(&g)) {
        score += 2;
    }
    if signals.meal_time.is_some_and(|m| entry.meal_times.contains(&m)) {
        score += 1;
    }
    if entry.calories.is_some_and(|c| c <= LOW_CALORIE_THRESHOLD) {
        score += 1;
    }
    score
}

/// Entries by descending score; equal scores keep catalog order.
pub fn rank<'c>(catalog: &'c Catalog, signals: &Signals) -> Vec<(u32, &'c FoodEntry)> {
    let mut ranked: Vec<_> = catalog
        .entries
        .iter()
        .map(|e| (score(e, signals), e))
        .collect();
    ranked.sort_by(|a, b| b.0.cmp(&a.0));
    ranked
}

/// Scoring mode: the top non-excluded entries of the ranking.
pub fn select_scored(catalog: &Catalog, signals: &Signals, exclusions: &Exclusions<'_>) -> Selection {
    let ranked = rank(catalog, signals);
    pick(ranked.iter().map(|(_, e)| e.name.as_str()), exclusions)
}

#[cfg(test)]
mod selector_tests {
    use super::*;
    use std::collections::BTreeMap;

    fn two_item_catalog() -> Catalog {
        let mut ramen = FoodEntry::named("Ramen");
        ramen.weather = Some(Weather::Cold);
        ramen.flavors = vec![Flavor::Salty];
        let mut bibimbap = FoodEntry::named("Bibimbap");
        bibimbap.weather = Some(Weather::Neutral);
        bibimbap.flavors = vec![Flavor::Spicy];
        Catalog {
            lists: BTreeMap::from([("default".to_string(), vec!["Ramen".to_string()])]),
            entries: vec![ramen, bibimbap],
        }
    }

    #[test]
    fn scoring_example_prefers_ramen() {
        let catalog = two_item_catalog();
        let signals = Signals {
            weather: Some(Weather::Cold),
            preference: Some(Flavor::Salty),
            ..Signals::default()
        };
        assert_eq!(score(&catalog.entries[0], &signals), 3);
        assert_eq!(score(&catalog.entries[1], &signals), 0);

        let selection = select_scored(&catalog, &signals, &Exclusions::default());
        assert_eq!(selection.first(), Some("Ramen"));
        assert!(!selection.exhausted);
    }

    #[test]
    fn scoring_counts_every_signal() {
        let mut entry = FoodEntry::named("Salmon");
        entry.weather = Some(Weather::Hot);
        entry.flavors = vec![Flavor::Healthy];
        entry.goals = vec![Goal::WeightLoss];
        entry.meal_times = vec![MealTime::Dinner];
        entry.calories = Some(LOW_CALORIE_THRESHOLD);

        let all = Signals {
            preference: Some(Flavor::Healthy),
            weather: Some(Weather::Hot),
            goal: Some(Goal::WeightLoss),
            meal_time: Some(MealTime::Dinner),
        };
        assert_eq!(score(&entry, &all), 7);

        entry.calories = Some(LOW_CALORIE_THRESHOLD + 1);
        assert_eq!(score(&entry, &all), 6);
        assert_eq!(score(&entry, &Signals::default()), 0);
    }

    #[test]
    fn ties_keep_catalog_order() {
        let catalog = Catalog {
            lists: BTreeMap::new(),
            entries: ["A", "B", "C", "D"].into_iter().map(FoodEntry::named).collect(),
        };
        let selection = select_scored(&catalog, &Signals::default(), &Exclusions::default());
        assert_eq!(selection.picks, vec!["A", "B", "C"]);
    }

    #[test]
    fn scoring_is_deterministic() {
        let catalog = Catalog::builtin();
        let signals = Signals {
            preference: Some(Flavor::Spicy),
            weather: Some(Weather::Cold),
            goal: None,
            meal_time: Some(MealTime::Dinner),
        };
        let a = select_scored(&catalog, &signals, &Exclusions::default());
        let b = select_scored(&catalog, &signals, &Exclusions::default());
        assert_eq!(a, b);
        assert_eq!(a.picks.len(), MAX_PICKS);
        assert_eq!(a.first(), Some("Kimchi Stew"));
    }

    #[test]
    fn lookup_takes_first_three() {
        let catalog = Catalog::builtin();
        let selection = select_from_list(&catalog, "spicy.chilli", &Exclusions::default());
        assert_eq!(selection.picks, vec!["Chilli Ramen", "Chilli Con Carne", "Chilli Crab"]);
    }

    #[test]
    fn lookup_skips_ledger_and_recent_meal() {
        let catalog = Catalog::builtin();
        let ledger = vec!["Chilli Ramen".to_string()];
        let exclusions = Exclusions::new(Some("chilli crab"), &ledger);
        let selection = select_from_list(&catalog, "spicy.chilli", &exclusions);
        assert_eq!(selection.picks, vec!["Chilli Con Carne", "Hot Chilli Wings"]);
        assert!(!selection.exhausted);
    }

    #[test]
    fn exhausted_list_falls_back_to_first_entry() {
        let catalog = Catalog::builtin();
        let ledger: Vec<String> = catalog.list_or_default("cold").to_vec();
        let selection = select_from_list(&catalog, "cold", &Exclusions::new(None, &ledger));
        assert_eq!(selection.picks, vec!["Cold Noodles"]);
        assert!(selection.exhausted);
    }

    #[test]
    fn exhausted_ranking_falls_back_to_top_entry() {
        let catalog = two_item_catalog();
        let ledger = vec!["Ramen".to_string(), "Bibimbap".to_string()];
        let signals = Signals {
            preference: Some(Flavor::Spicy),
            ..Signals::default()
        };
        let selection = select_scored(&catalog, &signals, &Exclusions::new(None, &ledger));
        assert_eq!(selection.picks, vec!["Bibimbap"]);
        assert!(selection.exhausted);
    }

    #[test]
    fn empty_list_selects_nothing() {
        let catalog = Catalog {
            lists: BTreeMap::from([("default".to_string(), Vec::new())]),
            entries: Vec::new(),
        };
        let selection = select_from_list(&catalog, "spicy", &Exclusions::default());
        assert!(selection.picks.is_empty());
        assert!(!selection.exhausted);
    }
}
