use serde::{Deserialize, Serialize};

fn default_starting_popularity() -> i64 {
    50
}

fn default_cure_cost() -> i64 {
    30
}

fn default_food_price_per_kg() -> i64 {
    2
}

fn default_advertising_cost_per_point() -> i64 {
    20
}

fn default_market_refresh_cost() -> i64 {
    150
}

fn default_free_market_days() -> u32 {
    10
}

fn default_daily_purchase_limit() -> u32 {
    1
}

fn default_event_chance_percent() -> u32 {
    20
}

fn default_old_age_days() -> u32 {
    60
}

/// Economic constants of a session. Every field can be overridden from a scenario file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rules {
    #[serde(default = "default_starting_popularity")]
    pub starting_popularity: i64,
    #[serde(default = "default_cure_cost")]
    pub cure_cost: i64,
    /// Charged when buying food and again per kg eaten.
    #[serde(default = "default_food_price_per_kg")]
    pub food_price_per_kg: i64,
    #[serde(default = "default_advertising_cost_per_point")]
    pub advertising_cost_per_point: i64,
    #[serde(default = "default_market_refresh_cost")]
    pub market_refresh_cost: i64,
    /// Up to and including this day the market refreshes for free and purchases are unlimited.
    #[serde(default = "default_free_market_days")]
    pub free_market_days: u32,
    #[serde(default = "default_daily_purchase_limit")]
    pub daily_purchase_limit: u32,
    #[serde(default = "default_event_chance_percent")]
    pub event_chance_percent: u32,
    /// Past this age every day carries an `(age - old_age_days)`% chance of death.
    #[serde(default = "default_old_age_days")]
    pub old_age_days: u32,
}

impl Default for Rules {
    fn default() -> Self {
        Self {
            starting_popularity: default_starting_popularity(),
            cure_cost: default_cure_cost(),
            food_price_per_kg: default_food_price_per_kg(),
            advertising_cost_per_point: default_advertising_cost_per_point(),
            market_refresh_cost: default_market_refresh_cost(),
            free_market_days: default_free_market_days(),
            daily_purchase_limit: default_daily_purchase_limit(),
            event_chance_percent: default_event_chance_percent(),
            old_age_days: default_old_age_days(),
        }
    }
}

impl Rules {
    pub fn market_is_free(&self, day: u32) -> bool {
        day <= self.free_market_days
    }
}
