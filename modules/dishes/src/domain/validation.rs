//! Request validation as an ordered chain of checks.
//!
//! A check looks at the request ([`CheckInput`]) and the context built so far.
//! It either returns an augmented copy of the context or a [`DishError`]; the
//! chain stops at the first error, so later checks never run.

use serde_json::{Map, Number, Value};
use tracing::debug;

use crate::contract::model::Dish;
use crate::domain::error::DishError;
use crate::domain::store::DishStore;

/// Everything a check may inspect for one request.
pub struct CheckInput<'a> {
    /// `{dishId}` path parameter, when the route has one.
    pub dish_id: Option<&'a str>,
    /// The `data` object of the request body (empty when absent).
    pub payload: &'a Map<String, Value>,
    pub store: &'a dyn DishStore,
}

/// Values the checks have validated so far. Immutable: each check returns a new one.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationContext {
    name: Option<String>,
    description: Option<String>,
    price: Option<Value>,
    image_url: Option<String>,
    dish: Option<Dish>,
}

impl ValidationContext {
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Raw price as it appeared in the payload.
    pub fn price(&self) -> Option<&Value> {
        self.price.as_ref()
    }

    /// Price when it is a JSON number.
    pub fn price_number(&self) -> Option<&Number> {
        match &self.price {
            Some(Value::Number(n)) => Some(n),
            _ => None,
        }
    }

    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Dish matched by the dish-exists check.
    pub fn dish(&self) -> Option<&Dish> {
        self.dish.as_ref()
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    pub fn with_description(self, description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..self
        }
    }

    pub fn with_price(self, price: Value) -> Self {
        Self {
            price: Some(price),
            ..self
        }
    }

    pub fn with_image_url(self, image_url: impl Into<String>) -> Self {
        Self {
            image_url: Some(image_url.into()),
            ..self
        }
    }

    pub fn with_dish(self, dish: Dish) -> Self {
        Self {
            dish: Some(dish),
            ..self
        }
    }
}

pub type Check = fn(&CheckInput<'_>, ValidationContext) -> Result<ValidationContext, DishError>;

/// Named, ordered list of checks.
#[derive(Clone)]
pub struct Chain {
    name: &'static str,
    steps: Vec<(&'static str, Check)>,
}

impl Chain {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            steps: Vec::new(),
        }
    }

    pub fn then(mut self, step: &'static str, check: Check) -> Self {
        self.steps.push((step, check));
        self
    }

    pub fn step_names(&self) -> Vec<&'static str> {
        self.steps.iter().map(|(step, _)| *step).collect()
    }

    /// Run every step in order, starting from an empty context.
    pub fn run(&self, input: &CheckInput<'_>) -> Result<ValidationContext, DishError> {
        self.steps
            .iter()
            .try_fold(ValidationContext::default(), |ctx, (step, check)| {
                check(input, ctx).inspect_err(|e| {
                    debug!(chain = self.name, step, error = %e, "validation failed");
                })
            })
    }
}

impl std::fmt::Debug for Chain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Chain")
            .field("name", &self.name)
            .field("steps", &self.step_names())
            .finish()
    }
}

/// name-present → description-present → price-present → image-present → price-positive
pub fn create_chain() -> Chain {
    Chain::new("create")
        .then("name-present", name_present)
        .then("description-present", description_present)
        .then("price-present", price_present)
        .then("image-present", image_present)
        .then("price-positive", price_positive)
}

/// dish-exists → path-id-matches-body-id → field presence → price-is-positive-number-for-update
pub fn update_chain() -> Chain {
    Chain::new("update")
        .then("dish-exists", dish_exists)
        .then("path-id-matches-body-id", path_id_matches_body_id)
        .then("name-present", name_present)
        .then("description-present", description_present)
        .then("price-present", price_present)
        .then("image-present", image_present)
        .then(
            "price-is-positive-number-for-update",
            price_is_positive_number_for_update,
        )
}

pub fn read_chain() -> Chain {
    Chain::new("read").then("dish-exists", dish_exists)
}

// --- field helpers ---

/// Non-empty string value of `field`.
fn text_field<'a>(payload: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    match payload.get(field) {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Missing means absent, null, `false` or the empty string. Zero is a value.
fn present_value<'a>(payload: &'a Map<String, Value>, field: &str) -> Option<&'a Value> {
    match payload.get(field) {
        None | Some(Value::Null) | Some(Value::Bool(false)) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(v) => Some(v),
    }
}

fn is_positive_number(value: &Value) -> bool {
    value
        .as_number()
        .and_then(Number::as_f64)
        .is_some_and(|n| n > 0.0)
}

// --- checks ---

pub fn name_present(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    text_field(input.payload, "name")
        .map(|name| ctx.with_name(name))
        .ok_or_else(|| DishError::missing_field("name"))
}

pub fn description_present(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    text_field(input.payload, "description")
        .map(|description| ctx.with_description(description))
        .ok_or_else(|| DishError::missing_field("description"))
}

pub fn price_present(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    present_value(input.payload, "price")
        .map(|price| ctx.with_price(price.clone()))
        .ok_or_else(|| DishError::missing_field("price"))
}

pub fn image_present(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    text_field(input.payload, "image_url")
        .map(|image_url| ctx.with_image_url(image_url))
        .ok_or_else(|| DishError::missing_field("image_url"))
}

/// Create only: the payload price must be a number above zero.
pub fn price_positive(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    match input.payload.get("price") {
        Some(price) if is_positive_number(price) => Ok(ctx.with_price(price.clone())),
        _ => Err(DishError::NonPositivePrice),
    }
}

/// Update only: the price already recorded in the context must be a number above zero.
pub fn price_is_positive_number_for_update(
    _input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    if ctx.price().is_some_and(is_positive_number) {
        Ok(ctx)
    } else {
        Err(DishError::PriceNotNumber)
    }
}

pub fn dish_exists(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    let dish_id = input.dish_id.unwrap_or_default();
    input
        .store
        .find(dish_id)
        .map(|dish| ctx.with_dish(dish))
        .ok_or_else(|| DishError::not_found(dish_id))
}

/// A body id is optional; when given (non-null, non-empty) it must equal the path id.
pub fn path_id_matches_body_id(
    input: &CheckInput<'_>,
    ctx: ValidationContext,
) -> Result<ValidationContext, DishError> {
    let dish_id = input.dish_id.unwrap_or_default();
    match input.payload.get("id") {
        None | Some(Value::Null) => Ok(ctx),
        Some(Value::String(id)) if id.is_empty() || id == dish_id => Ok(ctx),
        Some(Value::String(id)) => Err(DishError::id_mismatch(id.as_str())),
        Some(other) => Err(DishError::id_mismatch(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::store::InMemoryDishStore;
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    fn store_with(id: &str) -> InMemoryDishStore {
        InMemoryDishStore::with_dishes([Dish {
            id: id.into(),
            name: "Stew".into(),
            description: Some("hearty".into()),
            price: Number::from(9),
            image_url: "http://img/stew.jpg".into(),
        }])
        .unwrap()
    }

    fn valid() -> Value {
        json!({
            "name": "Pasta",
            "description": "tasty",
            "price": 12,
            "image_url": "http://x/y.jpg"
        })
    }

    fn run(chain: &Chain, dish_id: Option<&str>, body: Value, store: &dyn DishStore) -> Result<ValidationContext, DishError> {
        let data = payload(body);
        chain.run(&CheckInput {
            dish_id,
            payload: &data,
            store,
        })
    }

    #[test]
    fn chains_run_in_declared_order() {
        assert_eq!(
            create_chain().step_names(),
            [
                "name-present",
                "description-present",
                "price-present",
                "image-present",
                "price-positive"
            ]
        );
        assert_eq!(
            update_chain().step_names(),
            [
                "dish-exists",
                "path-id-matches-body-id",
                "name-present",
                "description-present",
                "price-present",
                "image-present",
                "price-is-positive-number-for-update"
            ]
        );
        assert_eq!(read_chain().step_names(), ["dish-exists"]);
    }

    #[test]
    fn create_chain_collects_every_field() {
        let store = InMemoryDishStore::new();
        let ctx = run(&create_chain(), None, valid(), &store).unwrap();
        assert_eq!(ctx.name(), Some("Pasta"));
        assert_eq!(ctx.description(), Some("tasty"));
        assert_eq!(ctx.price_number(), Some(&Number::from(12)));
        assert_eq!(ctx.image_url(), Some("http://x/y.jpg"));
        assert!(ctx.dish().is_none());
    }

    #[test]
    fn each_missing_field_reports_its_own_message() {
        let store = InMemoryDishStore::new();
        for field in ["name", "description", "price", "image_url"] {
            let mut body = valid();
            body.as_object_mut().unwrap().remove(field);
            let err = run(&create_chain(), None, body, &store).unwrap_err();
            assert_eq!(err, DishError::missing_field(field));
        }
    }

    #[test]
    fn falsy_text_values_count_as_missing() {
        let store = InMemoryDishStore::new();
        for bad in [json!(""), json!(null), json!(false), json!(5)] {
            let mut body = valid();
            body["name"] = bad;
            let err = run(&create_chain(), None, body, &store).unwrap_err();
            assert_eq!(err, DishError::missing_field("name"));
        }
    }

    #[test]
    fn first_failing_check_wins() {
        let store = InMemoryDishStore::new();
        // name and price are both wrong; name is checked first
        let err = run(
            &create_chain(),
            None,
            json!({ "description": "d", "price": -1, "image_url": "i" }),
            &store,
        )
        .unwrap_err();
        assert_eq!(err, DishError::missing_field("name"));
    }

    #[test]
    fn create_rejects_non_positive_prices() {
        let store = InMemoryDishStore::new();
        for price in [json!(-5), json!(0), json!(-0.01), json!("12"), json!(true)] {
            let mut body = valid();
            body["price"] = price.clone();
            let err = run(&create_chain(), None, body, &store).unwrap_err();
            assert_eq!(err, DishError::NonPositivePrice, "price {price}");
        }
    }

    #[test]
    fn zero_price_is_present_but_not_positive() {
        let data = payload(json!({ "price": 0 }));
        let store = InMemoryDishStore::new();
        let input = CheckInput {
            dish_id: None,
            payload: &data,
            store: &store,
        };
        let ctx = price_present(&input, ValidationContext::default()).unwrap();
        assert_eq!(ctx.price(), Some(&json!(0)));
        assert_eq!(
            price_positive(&input, ctx).unwrap_err(),
            DishError::NonPositivePrice
        );
    }

    #[test]
    fn fractional_prices_are_accepted() {
        let store = InMemoryDishStore::new();
        let mut body = valid();
        body["price"] = json!(0.5);
        let ctx = run(&create_chain(), None, body, &store).unwrap();
        assert_eq!(ctx.price(), Some(&json!(0.5)));
    }

    #[test]
    fn read_chain_finds_dish_or_reports_id() {
        let store = store_with("d1");
        let ctx = run(&read_chain(), Some("d1"), json!({}), &store).unwrap();
        assert_eq!(ctx.dish().map(|d| d.name.as_str()), Some("Stew"));

        let err = run(&read_chain(), Some("nope"), json!({}), &store).unwrap_err();
        assert_eq!(err.to_string(), "Dish id not found: nope");
    }

    #[test]
    fn update_checks_existence_before_payload() {
        let store = store_with("d1");
        let err = run(&update_chain(), Some("ghost"), json!({}), &store).unwrap_err();
        assert_eq!(err, DishError::not_found("ghost"));
    }

    #[test]
    fn body_id_must_match_path_id() {
        let store = store_with("d1");
        let compliant = [json!(null), json!(""), json!("d1")];
        for id in compliant {
            let mut body = valid();
            body["id"] = id;
            assert!(run(&update_chain(), Some("d1"), body, &store).is_ok());
        }

        let mut body = valid();
        body["id"] = json!("other");
        let err = run(&update_chain(), Some("d1"), body, &store).unwrap_err();
        assert_eq!(err.to_string(), "id other must match dataId provided in parameters");

        let mut body = valid();
        body["id"] = json!(7);
        let err = run(&update_chain(), Some("d1"), body, &store).unwrap_err();
        assert_eq!(err, DishError::id_mismatch("7"));
    }

    #[test]
    fn update_price_must_be_a_positive_number() {
        let store = store_with("d1");
        for price in [json!("12"), json!(0), json!(-3), json!([1])] {
            let mut body = valid();
            body["price"] = price.clone();
            let err = run(&update_chain(), Some("d1"), body, &store).unwrap_err();
            assert_eq!(err, DishError::PriceNotNumber, "price {price}");
        }
    }

    #[test]
    fn update_price_check_reads_the_context_value() {
        let data = payload(json!({ "price": 10 }));
        let store = InMemoryDishStore::new();
        let input = CheckInput {
            dish_id: None,
            payload: &data,
            store: &store,
        };
        // Nothing recorded yet: the payload alone is not enough
        assert_eq!(
            price_is_positive_number_for_update(&input, ValidationContext::default())
                .unwrap_err(),
            DishError::PriceNotNumber
        );
        let ctx = ValidationContext::default().with_price(json!(10));
        assert!(price_is_positive_number_for_update(&input, ctx).is_ok());
    }

    #[test]
    fn update_chain_carries_matched_dish_and_fields() {
        let store = store_with("d1");
        let ctx = run(&update_chain(), Some("d1"), valid(), &store).unwrap();
        assert_eq!(ctx.dish().map(|d| d.id.as_str()), Some("d1"));
        assert_eq!(ctx.name(), Some("Pasta"));
        assert_eq!(ctx.price_number(), Some(&Number::from(12)));
    }
}
