use axum::{routing::get, Extension, Router};
use std::sync::Arc;
use utoipa::OpenApi;

use api_ingress::{web, ErrorBody};

use crate::api::rest::{dto, handlers};
use crate::domain::service::Service;

/// OpenAPI fragment for the dish routes, relative to the mount path.
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::list_dishes,
        handlers::create_dish,
        handlers::get_dish,
        handlers::update_dish
    ),
    components(schemas(
        dto::DishDto,
        dto::DishEnvelope,
        dto::DishListEnvelope,
        dto::DishRequest,
        dto::DishInput,
        ErrorBody
    )),
    tags((name = "dishes", description = "Dish catalogue"))
)]
pub struct DishesApiDoc;

/// Dish routes relative to the mount path. Verbs a path does not serve answer 405.
pub fn register_routes(service: Arc<Service>) -> Router {
    Router::new()
        // GET / - list, POST / - create
        .route(
            "/",
            get(handlers::list_dishes)
                .post(handlers::create_dish)
                .fallback(web::method_not_allowed),
        )
        // GET /{dishId} - read, PUT /{dishId} - update
        .route(
            "/{dishId}",
            get(handlers::get_dish)
                .put(handlers::update_dish)
                .fallback(web::method_not_allowed),
        )
        .layer(Extension(service))
}

pub fn openapi() -> utoipa::openapi::OpenApi {
    DishesApiDoc::openapi()
}
