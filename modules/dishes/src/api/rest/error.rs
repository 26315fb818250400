use api_ingress::AppError;

use crate::domain::error::DishError;

/// Map a domain error onto the HTTP error the ingress renders.
pub fn map_domain_error(err: DishError) -> AppError {
    match err {
        DishError::NotFound { .. } => AppError::NotFound(err.to_string()),
        // Generated ids colliding is a server fault, not a client one
        DishError::DuplicateId { .. } => AppError::Internal(err.into()),
        DishError::MissingField { .. }
        | DishError::NonPositivePrice
        | DishError::PriceNotNumber
        | DishError::IdMismatch { .. } => AppError::BadRequest(err.to_string()),
    }
}

impl From<DishError> for AppError {
    fn from(err: DishError) -> Self {
        map_domain_error(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn statuses_follow_error_kind() {
        let cases = [
            (DishError::missing_field("name"), StatusCode::BAD_REQUEST),
            (DishError::NonPositivePrice, StatusCode::BAD_REQUEST),
            (DishError::PriceNotNumber, StatusCode::BAD_REQUEST),
            (DishError::id_mismatch("x"), StatusCode::BAD_REQUEST),
            (DishError::not_found("x"), StatusCode::NOT_FOUND),
            (DishError::duplicate_id("x"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(map_domain_error(err).status(), status);
        }
    }

    #[test]
    fn client_errors_keep_domain_message() {
        let err: AppError = DishError::not_found("abc").into();
        assert_eq!(err.to_string(), "Dish id not found: abc");
    }
}
