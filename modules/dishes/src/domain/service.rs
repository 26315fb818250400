use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::contract::model::{Dish, DishPatch, NewDish};
use crate::domain::error::DishError;
use crate::domain::id::IdGenerator;
use crate::domain::store::DishStore;
use crate::domain::validation::{self, Chain, CheckInput, ValidationContext};

/// Domain service: runs the validation chains and applies their result to the store.
/// Depends only on the store and id generator ports.
#[derive(Clone)]
pub struct Service {
    store: Arc<dyn DishStore>,
    ids: Arc<dyn IdGenerator>,
    config: ServiceConfig,
    create_chain: Chain,
    update_chain: Chain,
    read_chain: Chain,
}

#[derive(Debug, Clone, Default)]
pub struct ServiceConfig {
    /// Keep the validated description on create (it is always kept on update).
    pub persist_description_on_create: bool,
}

impl Service {
    pub fn new(store: Arc<dyn DishStore>, ids: Arc<dyn IdGenerator>, config: ServiceConfig) -> Self {
        Self {
            store,
            ids,
            config,
            create_chain: validation::create_chain(),
            update_chain: validation::update_chain(),
            read_chain: validation::read_chain(),
        }
    }

    #[instrument(name = "dishes.service.list", skip(self))]
    pub fn list(&self) -> Vec<Dish> {
        let dishes = self.store.list();
        debug!(count = dishes.len(), "listed dishes");
        dishes
    }

    #[instrument(name = "dishes.service.read", skip(self), fields(dish_id = %dish_id))]
    pub fn read(&self, dish_id: &str) -> Result<Dish, DishError> {
        let empty = Map::new();
        let ctx = self.validate(&self.read_chain, Some(dish_id), &empty)?;
        ctx.dish()
            .cloned()
            .ok_or_else(|| DishError::not_found(dish_id))
    }

    #[instrument(name = "dishes.service.create", skip(self, payload))]
    pub fn create(&self, payload: &Map<String, Value>) -> Result<Dish, DishError> {
        let ctx = self.validate(&self.create_chain, None, payload)?;

        let new_dish = NewDish {
            name: required(ctx.name(), "name")?,
            description: if self.config.persist_description_on_create {
                ctx.description().map(str::to_owned)
            } else {
                None
            },
            price: ctx
                .price_number()
                .cloned()
                .ok_or(DishError::NonPositivePrice)?,
            image_url: required(ctx.image_url(), "image_url")?,
        };

        let dish = Dish::from_new(self.ids.next_id(), new_dish);
        self.store.insert(dish.clone())?;

        info!(dish_id = %dish.id, "created dish");
        Ok(dish)
    }

    #[instrument(name = "dishes.service.update", skip(self, payload), fields(dish_id = %dish_id))]
    pub fn update(&self, dish_id: &str, payload: &Map<String, Value>) -> Result<Dish, DishError> {
        let ctx = self.validate(&self.update_chain, Some(dish_id), payload)?;

        let patch = DishPatch {
            name: required(ctx.name(), "name")?,
            description: required(ctx.description(), "description")?,
            price: ctx
                .price_number()
                .cloned()
                .ok_or(DishError::PriceNotNumber)?,
            image_url: required(ctx.image_url(), "image_url")?,
        };

        let dish = self
            .store
            .update(dish_id, patch)
            .ok_or_else(|| DishError::not_found(dish_id))?;

        info!("updated dish");
        Ok(dish)
    }

    fn validate(
        &self,
        chain: &Chain,
        dish_id: Option<&str>,
        payload: &Map<String, Value>,
    ) -> Result<ValidationContext, DishError> {
        chain.run(&CheckInput {
            dish_id,
            payload,
            store: self.store.as_ref(),
        })
    }
}

fn required(value: Option<&str>, field: &'static str) -> Result<String, DishError> {
    value
        .map(str::to_owned)
        .ok_or_else(|| DishError::missing_field(field))
}
