use thiserror::Error;

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DishesError {
    #[error("Dish id not found: {id}")]
    NotFound { id: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("Internal error")]
    Internal,
}

impl DishesError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}
