use std::sync::Arc;

use anyhow::{bail, Context};
use api_ingress::ApiIngress;
use tracing::{debug, info};

use crate::api::rest::routes;
use crate::config::DishesConfig;
use crate::contract::client::DishesApi;
use crate::contract::model::Dish;
use crate::domain::id::{IdGenerator, UuidIdGenerator};
use crate::domain::service::{Service, ServiceConfig};
use crate::domain::store::{DishStore, InMemoryDishStore};
use crate::gateways::local::DishesLocalClient;

/// The dishes module: owns the store and service and hands its routes to the ingress.
#[derive(Clone)]
pub struct Dishes {
    config: DishesConfig,
    service: Arc<Service>,
}

impl Dishes {
    /// Build the module from config, loading the seed dishes into a fresh store.
    pub fn new(config: DishesConfig) -> anyhow::Result<Self> {
        info!("Initializing dishes module");

        let seed = config
            .seed
            .iter()
            .cloned()
            .map(Dish::from)
            .map(check_seed_dish)
            .collect::<anyhow::Result<Vec<_>>>()?;
        let store = InMemoryDishStore::with_dishes(seed).context("invalid dishes seed")?;
        debug!(
            seeded = store.len(),
            mount_path = %config.mount_path,
            persist_description_on_create = config.persist_description_on_create,
            "Loaded dishes config"
        );

        Ok(Self::with_parts(config, Arc::new(store), Arc::new(UuidIdGenerator)))
    }

    /// Wire the module around an existing store and id source.
    pub fn with_parts(
        config: DishesConfig,
        store: Arc<dyn DishStore>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        let service_config = ServiceConfig {
            persist_description_on_create: config.persist_description_on_create,
        };
        Self {
            config,
            service: Arc::new(Service::new(store, ids, service_config)),
        }
    }

    pub fn service(&self) -> Arc<Service> {
        self.service.clone()
    }

    /// In-process client for other modules.
    pub fn client(&self) -> Arc<dyn DishesApi> {
        Arc::new(DishesLocalClient::new(self.service()))
    }

    /// Dish routes, relative to the mount path.
    pub fn router(&self) -> axum::Router {
        routes::register_routes(self.service())
    }

    pub fn openapi(&self) -> utoipa::openapi::OpenApi {
        routes::openapi()
    }

    /// Mount the dish routes on the ingress under `mount_path`.
    pub fn register_rest(&self, ingress: ApiIngress) -> anyhow::Result<ApiIngress> {
        info!(mount_path = %self.config.mount_path, "Registering dishes REST routes");
        ingress.mount(&self.config.mount_path, self.router(), self.openapi())
    }
}

fn check_seed_dish(dish: Dish) -> anyhow::Result<Dish> {
    if dish.id.is_empty() {
        bail!("seed dish '{}' has an empty id", dish.name);
    }
    if dish.name.is_empty() {
        bail!("seed dish '{}' has an empty name", dish.id);
    }
    if dish.image_url.is_empty() {
        bail!("seed dish '{}' has an empty image_url", dish.id);
    }
    if !dish.price.as_f64().is_some_and(|p| p > 0.0) {
        bail!("seed dish '{}' must have a price above 0", dish.id);
    }
    Ok(dish)
}
