//! Request validation
//!
//! Field checks are small traits so request types can read like a list of
//! rules. `ValidatedJson` / `ValidatedQuery` run those rules during
//! extraction, so handlers only ever see requests that passed.

use std::sync::LazyLock;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Query, Request};
use axum::http::request::Parts;
use axum::Json;
use regex::Regex;
use serde::de::DeserializeOwned;

use super::error::ApiError;

/// Letters only, single spaces allowed between words
static ALPHA: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]+( [A-Za-z]+)*$").expect("alpha pattern compiles"));

/// Implemented by every request type the controller accepts
pub trait Validate {
    fn validate(&self) -> Result<(), ApiError>;
}

pub trait ValidateText {
    /// Rejects empty or whitespace-only values
    fn validate_non_empty(&self, field: &str) -> Result<(), ApiError>;

    /// Non-empty, letters and single spaces only
    fn validate_alpha(&self, field: &str) -> Result<(), ApiError>;
}

impl ValidateText for str {
    fn validate_non_empty(&self, field: &str) -> Result<(), ApiError> {
        if self.trim().is_empty() {
            return Err(ApiError::bad_request(format!("{} is required", field)));
        }
        Ok(())
    }

    fn validate_alpha(&self, field: &str) -> Result<(), ApiError> {
        self.validate_non_empty(field)?;
        if !ALPHA.is_match(self) {
            return Err(ApiError::bad_request(format!(
                "{} must contain letters only",
                field
            )));
        }
        Ok(())
    }
}

impl ValidateText for String {
    fn validate_non_empty(&self, field: &str) -> Result<(), ApiError> {
        self.as_str().validate_non_empty(field)
    }

    fn validate_alpha(&self, field: &str) -> Result<(), ApiError> {
        self.as_str().validate_alpha(field)
    }
}

pub trait ValidatePositive {
    fn validate_positive(&self, field: &str) -> Result<(), ApiError>;
}

macro_rules! impl_validate_positive {
    ($($t:ty),*) => {
        $(
            impl ValidatePositive for $t {
                fn validate_positive(&self, field: &str) -> Result<(), ApiError> {
                    if *self <= 0 as $t {
                        return Err(ApiError::bad_request(format!("{} must be greater than 0", field)));
                    }
                    Ok(())
                }
            }
        )*
    };
}

impl_validate_positive!(i64, u32);

impl ValidatePositive for f64 {
    fn validate_positive(&self, field: &str) -> Result<(), ApiError> {
        if !self.is_finite() || *self <= 0.0 {
            return Err(ApiError::bad_request(format!(
                "{} must be a finite number greater than 0",
                field
            )));
        }
        Ok(())
    }
}

/// JSON body that deserialized and passed [`Validate`]
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}

/// Query string that deserialized and passed [`Validate`]
#[derive(Debug)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
    Query<T>: FromRequestParts<S, Rejection = QueryRejection>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
        value.validate()?;
        Ok(Self(value))
    }
}
