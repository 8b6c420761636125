//! JSON REST API for the asset desk.
//!
//! Exposes an axum [`Router`] backed by any [`RecordStore`] and
//! [`TaskNotifier`]. Auth, TLS, and transport concerns are the caller's
//! responsibility; the acting user is taken from the `X-Actor` header.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", assetdesk_api::api_router(AppState::new(store, notifier)))
//! ```

pub mod actor;
pub mod assets;
pub mod dashboard;
pub mod departments;
pub mod employees;
pub mod error;
pub mod schedule;
pub mod terms;

use std::sync::Arc;

use assetdesk_core::{schedule::TaskNotifier, store::RecordStore};
use axum::{
  Router,
  routing::{get, post, put},
};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct AppState<S, N> {
  pub store:    Arc<S>,
  pub notifier: Arc<N>,
}

impl<S, N> AppState<S, N> {
  pub fn new(store: S, notifier: N) -> Self {
    Self { store: Arc::new(store), notifier: Arc::new(notifier) }
  }
}

impl<S, N> Clone for AppState<S, N> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), notifier: Arc::clone(&self.notifier) }
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, N>(state: AppState<S, N>) -> Router<()>
where
  S: RecordStore + 'static,
  N: TaskNotifier + 'static,
{
  Router::new()
    // Assets
    .route("/assets", get(assets::list::<S, N>).post(assets::create::<S, N>))
    .route("/assets/assign", post(assets::assign::<S, N>))
    .route(
      "/assets/{id}",
      get(assets::get_one::<S, N>)
        .patch(assets::edit::<S, N>)
        .delete(assets::remove::<S, N>),
    )
    .route("/assets/{id}/transfer", post(assets::transfer::<S, N>))
    .route("/assets/{id}/status", post(assets::set_status::<S, N>))
    .route("/assets/{id}/unassign", post(assets::unassign::<S, N>))
    .route("/assets/{id}/history", get(assets::history::<S, N>))
    // Employees
    .route("/employees", get(employees::list::<S, N>).post(employees::create::<S, N>))
    .route(
      "/employees/{id}",
      get(employees::get_one::<S, N>)
        .patch(employees::edit::<S, N>)
        .delete(employees::remove::<S, N>),
    )
    .route("/employees/{id}/accessories/{key}", put(employees::set_accessory::<S, N>))
    // Departments
    .route("/departments", get(departments::list::<S, N>).post(departments::create::<S, N>))
    .route(
      "/departments/{id}",
      get(departments::get_one::<S, N>)
        .patch(departments::edit::<S, N>)
        .delete(departments::remove::<S, N>),
    )
    // Derived views
    .route("/terms", post(terms::generate::<S, N>))
    .route("/dashboard", get(dashboard::handler::<S, N>))
    .route("/schedule", post(schedule::handler::<S, N>))
    .with_state(state)
}

/// Today's date in UTC; the default for hand-over and document dates.
pub(crate) fn today() -> chrono::NaiveDate { chrono::Utc::now().date_naive() }

#[cfg(test)]
mod tests;
