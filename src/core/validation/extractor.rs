//! Axum extractor for validated payloads
//!
//! This module provides the `Validated<T>` extractor that runs a form
//! request's authorize gate and full validation pass before a handler runs.
//! The operation mode is derived from the HTTP verb (POST creates, anything
//! else updates); route middleware may bind the record being updated by
//! inserting a [`CurrentResource`] into the request extensions.

use crate::core::error::{GateError, RequestError};
use crate::core::service::LookupService;
use crate::core::validation::FormRequest;
use crate::core::validation::context::{CurrentResource, OperationMode, ValidationContext};
use crate::core::validation::engine::RequestValidator;
use axum::{
    Json,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::Value;
use std::sync::Arc;

/// Trait for application states that can hand out the storage collaborator
pub trait LookupProvider {
    fn lookup(&self) -> Arc<dyn LookupService>;
}

/// Axum extractor that validates and filters a request payload
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_loan(
///     Validated::<LoanRequest>(payload): Validated<LoanRequest>,
/// ) -> Result<Json<Value>, StatusCode> {
///     // payload contains only the declared, validated fields
/// }
/// ```
pub struct Validated<T>(pub Value, std::marker::PhantomData<T>);

impl<T> Validated<T> {
    /// Wrap a validated payload
    pub fn new(payload: Value) -> Self {
        Self(payload, std::marker::PhantomData)
    }

    /// Get the inner payload
    pub fn into_inner(self) -> Value {
        self.0
    }
}

// Allow dereferencing to Value
impl<T> std::ops::Deref for Validated<T> {
    type Target = Value;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<S, T> FromRequest<S> for Validated<T>
where
    S: LookupProvider + Send + Sync,
    T: FormRequest + Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let method = req.method().clone();
        let current = req.extensions().get::<CurrentResource>().cloned();

        let Json(payload): Json<Value> = match Json::from_request(req, state).await {
            Ok(json) => json,
            Err(e) => {
                return Err(GateError::Request(RequestError::InvalidBody {
                    message: e.to_string(),
                })
                .into_response());
            }
        };

        let mode = match method.as_str() {
            "POST" => OperationMode::Create,
            _ => OperationMode::Update,
        };
        let ctx = ValidationContext { current };

        if !T::authorize(&ctx) {
            return Err(GateError::Request(RequestError::Forbidden {
                message: "request not authorized".to_string(),
            })
            .into_response());
        }

        let validator = RequestValidator::new(state.lookup());
        match validator.validate_request::<T>(mode, &ctx, payload).await {
            Ok(attributes) => Ok(Validated::new(attributes)),
            Err(e) => Err(e.into_response()),
        }
    }
}
