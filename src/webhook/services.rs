use tracing::{debug, info};

use super::dto::Parameters;
use super::intents::Intent;
use crate::catalog::repo_types::{Category, Flavor, Goal, MealTime, SpiceType, Weather};
use crate::catalog::services::{select_from_list, select_scored, Exclusions, Selection, Signals};
use crate::images::services::image_url;
use crate::state::AppState;

pub const PREFERENCE_QUESTION: &str =
    "Do you have any food preferences? For example: spicy, healthy, or no preference.";
pub const SPICE_QUESTION: &str =
    "What kind of spicy are you in the mood for? Chilli, mala, curry or kimchi?";
pub const DELIVERY_QUESTION: &str = "Do you prefer delivery or dine-in?";
pub const WEATHER_QUESTION: &str = "What's the weather like? Cold or hot?";
pub const RECENT_MEAL_QUESTION: &str = "What did you have recently?";
pub const FALLBACK_TEXT: &str = "Sorry, I didn’t understand. Can you try again?";
pub const APOLOGY_TEXT: &str = "Sorry, something went wrong on my side. Please try again later.";
pub const NOTHING_FOUND_TEXT: &str = "Hmm... I couldn't find anything tasty right now. 😢";

pub mod param {
    pub const FOOD_PREFERENCE: &str = "food_preference";
    pub const SPICY_TYPE: &str = "spicy_type";
    pub const WEATHER: &str = "weather_type";
    pub const HEALTH_GOAL: &str = "health_goal";
    pub const MEAL_TIME: &str = "meal_time";
    pub const DELIVERY: &str = "delivery_option";
    pub const RECENT_MEAL: &str = "recent_meal";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DeliveryMode {
    Delivery,
    DineIn,
}

/// Produces the reply text for one turn. Errors are left to the caller.
pub async fn handle(
    state: &AppState,
    intent: Intent,
    params: &Parameters,
    user_id: &str,
) -> anyhow::Result<String> {
    debug!(intent = intent.display_name(), user_id, ?params, "dispatching");
    match intent {
        Intent::StartRecommendation => Ok(PREFERENCE_QUESTION.to_string()),
        Intent::SpicyPreference => spicy_preference(state, params, user_id).await,
        Intent::HealthyPreference => {
            preference_with_delivery(state, params, user_id, Category::Healthy).await
        }
        Intent::NoPreference => {
            preference_with_delivery(state, params, user_id, Category::Default).await
        }
        Intent::ChooseDelivery => {
            delivery_choice(state, params, user_id, DeliveryMode::Delivery).await
        }
        Intent::ChooseDineIn => delivery_choice(state, params, user_id, DeliveryMode::DineIn).await,
        Intent::PersonalizedRecommendation => personalized(state, params, user_id).await,
        Intent::WeatherRecommendation => weather_recommendation(state, params, user_id).await,
        Intent::RecentMeal => record_recent_meal(state, params, user_id).await,
        Intent::ShowHistory => show_history(state, user_id).await,
        Intent::Unknown => Ok(FALLBACK_TEXT.to_string()),
    }
}

async fn spicy_preference(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
) -> anyhow::Result<String> {
    let Some(spicy_type) = params.get(param::SPICY_TYPE) else {
        return Ok(SPICE_QUESTION.to_string());
    };
    let key = SpiceType::parse(spicy_type)
        .map(SpiceType::key)
        .unwrap_or(Category::Spicy.key());
    recommend_from_list(state, params, user_id, key, "Here’s a spicy suggestion 🌶️").await
}

async fn preference_with_delivery(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
    implied: Category,
) -> anyhow::Result<String> {
    if params.get(param::DELIVERY).is_none() {
        return Ok(DELIVERY_QUESTION.to_string());
    }
    let category = params
        .get(param::FOOD_PREFERENCE)
        .map(Category::resolve)
        .unwrap_or(implied);
    let context = match category {
        Category::Spicy => "Here’s a spicy suggestion 🌶️",
        Category::Healthy => "Here’s something healthy 🥗",
        Category::Rice => "Craving rice? 🍚",
        Category::Pasta => "Pasta time 🍝",
        Category::FastFood => "Quick and tasty 🍔",
        Category::Default => "Here are some popular picks 🍴",
    };
    recommend_from_list(state, params, user_id, category.key(), context).await
}

async fn delivery_choice(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
    mode: DeliveryMode,
) -> anyhow::Result<String> {
    let category = Category::resolve(params.get(param::FOOD_PREFERENCE).unwrap_or_default());
    let context = match (mode, category) {
        (DeliveryMode::Delivery, Category::Spicy) => "Spicy and convenient! Try these:",
        (DeliveryMode::Delivery, Category::Healthy) => "Healthy options for your choice:",
        (DeliveryMode::Delivery, _) => "Alright! Here are some tasty picks:",
        (DeliveryMode::DineIn, Category::Spicy) => "Spicy and worth going out for! Try these:",
        (DeliveryMode::DineIn, Category::Healthy) => "Healthy places to sit down for:",
        (DeliveryMode::DineIn, _) => "Alright! Here are some tasty picks to eat in:",
    };
    recommend_from_list(state, params, user_id, category.key(), context).await
}

async fn personalized(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
) -> anyhow::Result<String> {
    let Some(preference) = params.get(param::FOOD_PREFERENCE) else {
        return Ok(PREFERENCE_QUESTION.to_string());
    };
    let Some(weather) = params.get(param::WEATHER) else {
        return Ok(WEATHER_QUESTION.to_string());
    };

    let signals = Signals {
        preference: Flavor::parse(preference),
        weather: Weather::parse(weather),
        goal: params.get(param::HEALTH_GOAL).and_then(Goal::parse),
        meal_time: params.get(param::MEAL_TIME).and_then(MealTime::parse),
    };
    let context = match (signals.preference, signals.weather) {
        (Some(Flavor::Spicy), _) => "Spicy and bold 🌶️",
        (Some(Flavor::Healthy), _) => "Light and healthy 🍃",
        (_, Some(Weather::Cold)) => "Cold day? Try these hot dishes 🔥",
        (_, Some(Weather::Hot)) => "Hot weather? Try something refreshing ❄️",
        _ => "How about these:",
    };

    let recent = state.ledger.get(user_id).await?;
    let exclusions = Exclusions::new(params.get(param::RECENT_MEAL), &recent);
    let selection = select_scored(&state.catalog, &signals, &exclusions);
    debug!(?signals, picks = ?selection.picks, "scored selection");
    finish(state, user_id, context, selection).await
}

async fn weather_recommendation(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
) -> anyhow::Result<String> {
    let Some(weather) = params.get(param::WEATHER) else {
        return Ok(WEATHER_QUESTION.to_string());
    };
    let (key, context) = match Weather::parse(weather) {
        Some(Weather::Cold) => ("spicy", "Cold day? Try these hot dishes 🔥"),
        Some(Weather::Hot) => ("cold", "Hot weather? Try something refreshing ❄️"),
        _ => ("default", "How about these:"),
    };
    recommend_from_list(state, params, user_id, key, context).await
}

async fn record_recent_meal(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
) -> anyhow::Result<String> {
    let Some(raw) = params.get(param::RECENT_MEAL) else {
        return Ok(RECENT_MEAL_QUESTION.to_string());
    };
    let name = state
        .catalog
        .canonical_name(raw)
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string());
    state.ledger.add(user_id, &name).await?;
    info!(user_id, meal = %name, "recent meal recorded");
    Ok(format!(
        "Got it! I'll remember you had {name} and suggest something different next time."
    ))
}

async fn show_history(state: &AppState, user_id: &str) -> anyhow::Result<String> {
    let recent = state.ledger.get(user_id).await?;
    if recent.is_empty() {
        return Ok("I don't have any recent meals for you yet.".to_string());
    }
    Ok(format!("Your recent meals: {}.", recent.join(", ")))
}

async fn recommend_from_list(
    state: &AppState,
    params: &Parameters,
    user_id: &str,
    key: &str,
    context: &str,
) -> anyhow::Result<String> {
    let recent = state.ledger.get(user_id).await?;
    let exclusions = Exclusions::new(params.get(param::RECENT_MEAL), &recent);
    let selection = select_from_list(&state.catalog, key, &exclusions);
    debug!(list = key, picks = ?selection.picks, exhausted = selection.exhausted, "lookup selection");
    finish(state, user_id, context, selection).await
}

/// Remembers the first pick and renders the reply.
async fn finish(
    state: &AppState,
    user_id: &str,
    context: &str,
    selection: Selection,
) -> anyhow::Result<String> {
    if let Some(first) = selection.first() {
        state.ledger.add(user_id, first).await?;
        info!(user_id, meal = first, "recommended");
    }
    let mut reply = build_response(&selection, context);
    if let (Some(base), Some(first)) = (&state.config.public_base_url, selection.first()) {
        reply.push_str(&format!(" [image: {}]", image_url(base, first)));
    }
    Ok(reply)
}

pub fn build_response(selection: &Selection, context: &str) -> String {
    let Some(first) = selection.first() else {
        return NOTHING_FOUND_TEXT.to_string();
    };
    if selection.exhausted {
        return format!("Looks like you've tried them all recently! How about {first} again?");
    }
    let mut phrase = format!("{context} You might enjoy {first}");
    if selection.picks.len() > 1 {
        phrase.push_str(&format!(", or maybe {}.", selection.picks[1..].join(", ")));
    } else {
        phrase.push('.');
    }
    phrase
}
