use async_trait::async_trait;

use crate::contract::model::Dish;

/// Public API of the dishes module for in-process consumers.
///
/// Inputs are the raw `data` objects a REST client would send, so callers go
/// through exactly the same validation as HTTP requests.
#[async_trait]
pub trait DishesApi: Send + Sync {
    /// All dishes in insertion order.
    async fn list_dishes(&self) -> anyhow::Result<Vec<Dish>>;

    async fn get_dish(&self, id: &str) -> anyhow::Result<Dish>;

    async fn create_dish(
        &self,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> anyhow::Result<Dish>;

    /// Replace every mutable field of `id`.
    async fn update_dish(
        &self,
        id: &str,
        data: serde_json::Map<String, serde_json::Value>,
    ) -> anyhow::Result<Dish>;
}
