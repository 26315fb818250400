use thiserror::Error;

/// Domain-specific errors using thiserror
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DishError {
    #[error("A '{field}' property is required.")]
    MissingField { field: &'static str },

    #[error("price cannot be less than 0")]
    NonPositivePrice,

    #[error("type of price must be number")]
    PriceNotNumber,

    #[error("Dish id not found: {id}")]
    NotFound { id: String },

    #[error("id {id} must match dataId provided in parameters")]
    IdMismatch { id: String },

    #[error("Dish id already exists: {id}")]
    DuplicateId { id: String },
}

impl DishError {
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn id_mismatch(id: impl Into<String>) -> Self {
        Self::IdMismatch { id: id.into() }
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }
}
