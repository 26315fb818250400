use api_ingress::AppError;
use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use utoipa::ToSchema;

use crate::contract::model::Dish;

/// REST DTO for dish representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DishDto {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Echoed exactly as it was submitted.
    #[schema(value_type = f64)]
    pub price: Number,
    pub image_url: String,
}

/// `{ "data": dish }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishEnvelope {
    pub data: DishDto,
}

/// `{ "data": [dish, ...] }`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishListEnvelope {
    pub data: Vec<DishDto>,
}

/// Request body for create and update. Fields are checked by the validation
/// chain, so `data` stays untyped here.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct DishRequest {
    #[serde(default)]
    #[schema(value_type = DishInput)]
    pub data: Value,
}

/// Documented shape of `DishRequest::data`.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct DishInput {
    /// Ignored on create. On update it must be absent, empty or equal to the path id.
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    #[schema(value_type = f64, exclusive_minimum = 0)]
    pub price: Number,
    pub image_url: String,
}

impl DishRequest {
    /// Payload of an extracted body. A body not declared as JSON counts as
    /// empty; JSON that does not parse into a request is rejected.
    pub fn payload(
        body: Result<Json<Self>, JsonRejection>,
    ) -> Result<Map<String, Value>, AppError> {
        match body {
            Ok(Json(req)) => Ok(req.into_payload()),
            Err(JsonRejection::MissingJsonContentType(_)) => Ok(Map::new()),
            Err(rejection) => Err(AppError::BadRequest(format!(
                "malformed request body: {}",
                rejection.body_text()
            ))),
        }
    }

    /// The `data` object; anything that is not an object counts as empty.
    pub fn into_payload(self) -> Map<String, Value> {
        match self.data {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }
}

// Conversion implementations between REST DTOs and contract models

impl From<Dish> for DishDto {
    fn from(dish: Dish) -> Self {
        Self {
            id: dish.id,
            name: dish.name,
            description: dish.description,
            price: dish.price,
            image_url: dish.image_url,
        }
    }
}

impl From<Dish> for DishEnvelope {
    fn from(dish: Dish) -> Self {
        Self { data: dish.into() }
    }
}

impl From<Vec<Dish>> for DishListEnvelope {
    fn from(dishes: Vec<Dish>) -> Self {
        Self {
            data: dishes.into_iter().map(DishDto::from).collect(),
        }
    }
}
