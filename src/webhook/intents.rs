/// Intent display names understood by the webhook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    StartRecommendation,
    SpicyPreference,
    HealthyPreference,
    NoPreference,
    ChooseDelivery,
    ChooseDineIn,
    PersonalizedRecommendation,
    WeatherRecommendation,
    RecentMeal,
    ShowHistory,
    Unknown,
}

impl Intent {
    #[cfg(test)]
    pub const KNOWN: [Intent; 10] = [
        Intent::StartRecommendation,
        Intent::SpicyPreference,
        Intent::HealthyPreference,
        Intent::NoPreference,
        Intent::ChooseDelivery,
        Intent::ChooseDineIn,
        Intent::PersonalizedRecommendation,
        Intent::WeatherRecommendation,
        Intent::RecentMeal,
        Intent::ShowHistory,
    ];

    pub fn from_display_name(name: &str) -> Self {
        match name.trim() {
            "start.recommendation" => Intent::StartRecommendation,
            "spicy.preference" => Intent::SpicyPreference,
            "healthy.preference" => Intent::HealthyPreference,
            "no.preference" => Intent::NoPreference,
            "choose.delivery" => Intent::ChooseDelivery,
            // the agent was published with the misspelled name
            "choosen.dinein" | "choose.dinein" => Intent::ChooseDineIn,
            "personalized.recommendation" => Intent::PersonalizedRecommendation,
            "weather.recommendation" => Intent::WeatherRecommendation,
            "recent.meal" => Intent::RecentMeal,
            "show.history" => Intent::ShowHistory,
            _ => Intent::Unknown,
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Intent::StartRecommendation => "start.recommendation",
            Intent::SpicyPreference => "spicy.preference",
            Intent::HealthyPreference => "healthy.preference",
            Intent::NoPreference => "no.preference",
            Intent::ChooseDelivery => "choose.delivery",
            Intent::ChooseDineIn => "choosen.dinein",
            Intent::PersonalizedRecommendation => "personalized.recommendation",
            Intent::WeatherRecommendation => "weather.recommendation",
            Intent::RecentMeal => "recent.meal",
            Intent::ShowHistory => "show.history",
            Intent::Unknown => "",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_intents_round_trip_through_display_name() {
        for intent in Intent::KNOWN {
            assert_eq!(Intent::from_display_name(intent.display_name()), intent);
        }
    }

    #[test]
    fn dine_in_accepts_both_spellings() {
        assert_eq!(Intent::from_display_name("choosen.dinein"), Intent::ChooseDineIn);
        assert_eq!(Intent::from_display_name("choose.dinein"), Intent::ChooseDineIn);
    }

    #[test]
    fn unknown_names_are_unknown() {
        assert_eq!(Intent::from_display_name(""), Intent::Unknown);
        assert_eq!(Intent::from_display_name("order.pizza"), Intent::Unknown);
        assert_eq!(Intent::from_display_name("Start.Recommendation"), Intent::Unknown);
    }
}
