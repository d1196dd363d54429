use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::response::{ApiResponse, Meta};

const UNIQUE_VIOLATION: &str = "23505";

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not Found")]
    NotFound,

    #[error("Bad Request {0}")]
    BadRequest(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Login required")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error")]
    DbError(#[from] sqlx::Error),

    #[error("ORM error")]
    OrmError(#[from] sea_orm::DbErr),

    #[error("Internal Server Error")]
    Internal(#[from] anyhow::Error),

    #[error("Failed to {operation}")]
    Operation {
        operation: &'static str,
        #[source]
        source: Box<AppError>,
    },
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::DbError(err) if is_unique_violation_sqlx(err) => StatusCode::CONFLICT,
            AppError::OrmError(err) if is_unique_violation_orm(err) => StatusCode::CONFLICT,
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Operation { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Where a client should navigate after an authorization failure.
    pub fn redirect(&self) -> Option<&'static str> {
        match self {
            AppError::Unauthorized => Some("/login"),
            AppError::Forbidden => Some("/"),
            _ => None,
        }
    }

    pub fn is_unique_violation(&self) -> bool {
        match self {
            AppError::DbError(err) => is_unique_violation_sqlx(err),
            AppError::OrmError(err) => is_unique_violation_orm(err),
            _ => false,
        }
    }
}

fn is_unique_violation_sqlx(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

fn is_unique_violation_orm(err: &sea_orm::DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(sea_orm::SqlErr::UniqueConstraintViolation(_))
    )
}

/// Attaches the name of the attempted operation to backend failures.
pub trait ResultExt<T> {
    fn operation(self, operation: &'static str) -> AppResult<T>;
}

impl<T> ResultExt<T> for AppResult<T> {
    fn operation(self, operation: &'static str) -> AppResult<T> {
        self.map_err(|err| match err {
            AppError::DbError(_) | AppError::OrmError(_) | AppError::Internal(_)
                if !err.is_unique_violation() =>
            {
                tracing::error!(error = ?err, operation, "operation failed");
                AppError::Operation {
                    operation,
                    source: Box::new(err),
                }
            }
            other => other,
        })
    }
}

#[derive(Serialize)]
struct ErrorData {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    redirect: Option<&'static str>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = if status == StatusCode::CONFLICT && self.is_unique_violation() {
            "Conflict: record already exists".to_string()
        } else {
            self.to_string()
        };

        let body = ApiResponse {
            message: message.clone(),
            data: Some(ErrorData {
                error: message,
                redirect: self.redirect(),
            }),
            meta: Some(Meta::empty()),
        };

        (status, axum::Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn authorization_failures_carry_redirects() {
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::Unauthorized.redirect(), Some("/login"));
        assert_eq!(AppError::Forbidden.status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::Forbidden.redirect(), Some("/"));
        assert_eq!(AppError::NotFound.redirect(), None);
    }

    #[test]
    fn validation_is_unprocessable() {
        let err = AppError::Validation("rating must be between 1 and 5".into());
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(
            err.to_string(),
            "Validation failed: rating must be between 1 and 5"
        );
    }

    #[test]
    fn operation_wraps_backend_failures_only() {
        let failed: AppResult<()> = Err(AppError::Internal(anyhow::anyhow!("connection reset")));
        let err = failed.operation("update application").unwrap_err();
        assert_eq!(err.to_string(), "Failed to update application");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let denied: AppResult<()> = Err(AppError::Forbidden);
        let err = denied.operation("update application").unwrap_err();
        assert!(matches!(err, AppError::Forbidden));
    }
}
