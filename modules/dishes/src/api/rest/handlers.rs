use std::sync::Arc;

use api_ingress::{AppError, ErrorBody};
use axum::{
    extract::{rejection::JsonRejection, Path},
    http::StatusCode,
    response::Json,
    Extension,
};
use tracing::info;

use crate::api::rest::dto::{DishEnvelope, DishListEnvelope, DishRequest};
use crate::domain::service::Service;

/// List every dish in insertion order
#[utoipa::path(
    get,
    path = "/",
    operation_id = "dishes.list_dishes",
    tag = "dishes",
    responses(
        (status = 200, description = "All dishes", body = DishListEnvelope)
    )
)]
pub async fn list_dishes(Extension(svc): Extension<Arc<Service>>) -> Json<DishListEnvelope> {
    let dishes = svc.list();
    info!(count = dishes.len(), "Listing dishes");
    Json(dishes.into())
}

/// Get a dish by id
#[utoipa::path(
    get,
    path = "/{dishId}",
    operation_id = "dishes.get_dish",
    tag = "dishes",
    params(("dishId" = String, Path, description = "Dish id")),
    responses(
        (status = 200, description = "Dish found", body = DishEnvelope),
        (status = 404, description = "Unknown dish id", body = ErrorBody)
    )
)]
pub async fn get_dish(
    Extension(svc): Extension<Arc<Service>>,
    Path(dish_id): Path<String>,
) -> Result<Json<DishEnvelope>, AppError> {
    info!(%dish_id, "Getting dish");
    let dish = svc.read(&dish_id)?;
    Ok(Json(dish.into()))
}

/// Create a dish; the server assigns its id
#[utoipa::path(
    post,
    path = "/",
    operation_id = "dishes.create_dish",
    tag = "dishes",
    request_body = DishRequest,
    responses(
        (status = 201, description = "Created dish", body = DishEnvelope),
        (status = 400, description = "Missing field, bad price or malformed body", body = ErrorBody)
    )
)]
pub async fn create_dish(
    Extension(svc): Extension<Arc<Service>>,
    body: Result<Json<DishRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<DishEnvelope>), AppError> {
    let payload = DishRequest::payload(body)?;
    info!(fields = payload.len(), "Creating dish");

    let dish = svc.create(&payload)?;
    Ok((StatusCode::CREATED, Json(dish.into())))
}

/// Replace every mutable field of a dish
#[utoipa::path(
    put,
    path = "/{dishId}",
    operation_id = "dishes.update_dish",
    tag = "dishes",
    params(("dishId" = String, Path, description = "Dish id")),
    request_body = DishRequest,
    responses(
        (status = 200, description = "Updated dish", body = DishEnvelope),
        (status = 400, description = "Missing field, bad price or id mismatch", body = ErrorBody),
        (status = 404, description = "Unknown dish id", body = ErrorBody)
    )
)]
pub async fn update_dish(
    Extension(svc): Extension<Arc<Service>>,
    Path(dish_id): Path<String>,
    body: Result<Json<DishRequest>, JsonRejection>,
) -> Result<Json<DishEnvelope>, AppError> {
    let payload = DishRequest::payload(body)?;
    info!(%dish_id, "Updating dish");

    let dish = svc.update(&dish_id, &payload)?;
    Ok(Json(dish.into()))
}
