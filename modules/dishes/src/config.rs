use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::contract::model::Dish;

/// Configuration for the dishes module (`modules.dishes`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DishesConfig {
    /// Route prefix the dish routes are mounted under.
    #[serde(default = "default_mount_path")]
    pub mount_path: String,
    /// Store the submitted description when a dish is created.
    #[serde(default)]
    pub persist_description_on_create: bool,
    /// Dishes loaded into the store at startup.
    #[serde(default)]
    pub seed: Vec<SeedDish>,
}

impl Default for DishesConfig {
    fn default() -> Self {
        Self {
            mount_path: default_mount_path(),
            persist_description_on_create: false,
            seed: Vec::new(),
        }
    }
}

/// A dish preloaded from config, keyed by its fixed id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedDish {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Number,
    pub image_url: String,
}

impl From<SeedDish> for Dish {
    fn from(seed: SeedDish) -> Self {
        Self {
            id: seed.id,
            name: seed.name,
            description: seed.description,
            price: seed.price,
            image_url: seed.image_url,
        }
    }
}

fn default_mount_path() -> String {
    "/dishes".to_string()
}
