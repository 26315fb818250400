use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;

use crate::contract::{client::DishesApi, error::DishesError, model::Dish};
use crate::domain::{error::DishError, service::Service};

/// Local implementation of the DishesApi trait that delegates to the domain service
pub struct DishesLocalClient {
    service: Arc<Service>,
}

impl DishesLocalClient {
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl DishesApi for DishesLocalClient {
    async fn list_dishes(&self) -> anyhow::Result<Vec<Dish>> {
        Ok(self.service.list())
    }

    async fn get_dish(&self, id: &str) -> anyhow::Result<Dish> {
        Ok(self.service.read(id).map_err(map_domain_error)?)
    }

    async fn create_dish(&self, data: Map<String, Value>) -> anyhow::Result<Dish> {
        Ok(self.service.create(&data).map_err(map_domain_error)?)
    }

    async fn update_dish(&self, id: &str, data: Map<String, Value>) -> anyhow::Result<Dish> {
        Ok(self.service.update(id, &data).map_err(map_domain_error)?)
    }
}

/// Map domain errors to contract errors
fn map_domain_error(err: DishError) -> DishesError {
    match err {
        DishError::NotFound { id } => DishesError::not_found(id),
        DishError::DuplicateId { .. } => DishesError::Internal,
        other => DishesError::validation(other.to_string()),
    }
}
