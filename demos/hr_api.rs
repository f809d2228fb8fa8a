//! HR API Example
//!
//! A minimal server with the validation gate wired in front of every handler:
//! - POST /organizations creates an organization
//! - POST /employees creates an employee
//! - PUT /employees/{id} updates an employee
//!
//! Created records are inserted into the in-memory lookup service, so
//! existence and uniqueness rules run against real data. The update route
//! binds the path id as the current resource, which excludes the record from
//! its own uniqueness checks.

use anyhow::Result;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{post, put};
use axum::{Json, Router};
use formgate::prelude::*;
use std::sync::Arc;

#[derive(Clone)]
struct AppState {
    lookup: Arc<InMemoryLookupService>,
}

impl LookupProvider for AppState {
    fn lookup(&self) -> Arc<dyn LookupService> {
        self.lookup.clone()
    }
}

async fn create_organization(
    State(state): State<AppState>,
    payload: Validated<OrganizationRequest>,
) -> Result<Json<Value>, StatusCode> {
    let attributes = payload.into_inner();
    let id = Uuid::new_v4();
    state
        .lookup
        .insert("organizations", id, attributes.clone())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    // Organization contact emails share the account namespace.
    state
        .lookup
        .insert("users", id, json!({ "email": attributes["email"].clone() }))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(json!({ "id": id.to_string(), "attributes": attributes })))
}

async fn create_employee(
    State(state): State<AppState>,
    payload: Validated<EmployeeRequest>,
) -> Result<Json<Value>, StatusCode> {
    let attributes = payload.into_inner();
    let id = Uuid::new_v4();
    state
        .lookup
        .insert("employees", id, attributes.clone())
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(json!({ "id": id.to_string(), "attributes": attributes })))
}

async fn update_employee(payload: Validated<EmployeeRequest>) -> Json<Value> {
    Json(payload.into_inner())
}

/// Bind the path id as the record this update is about
async fn bind_employee(Path(id): Path<Uuid>, mut req: Request, next: Next) -> Response {
    req.extensions_mut().insert(CurrentResource::new(id));
    next.run(req).await
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let state = AppState {
        lookup: Arc::new(InMemoryLookupService::new()),
    };

    let app = Router::new()
        .route("/organizations", post(create_organization))
        .route("/employees", post(create_employee))
        .route(
            "/employees/{id}",
            put(update_employee).layer(middleware::from_fn(bind_employee)),
        )
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;

    println!("🌐 HR validation gate demo on http://127.0.0.1:3000");
    println!("\n  POST /organizations     - create an organization");
    println!("  POST /employees         - create an employee");
    println!("  PUT  /employees/{{id}}    - update an employee");
    println!("\nTry it:");
    println!("  curl -X POST http://127.0.0.1:3000/employees \\");
    println!("    -H 'Content-Type: application/json' \\");
    println!("    -d '{{\"first_name\": \"Ada\"}}'");

    axum::serve(listener, app).await?;
    Ok(())
}
