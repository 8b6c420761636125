//! `X-Actor` request header → [`Actor`].

use std::convert::Infallible;

use assetdesk_core::actor::Actor;
use axum::{extract::FromRequestParts, http::request::Parts};

pub const ACTOR_HEADER: &str = "x-actor";

/// The acting user for a request; [`Actor::system`] when the header is absent
/// or blank.
#[derive(Debug, Clone)]
pub struct CurrentActor(pub Actor);

impl<S: Send + Sync> FromRequestParts<S> for CurrentActor {
  type Rejection = Infallible;

  async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
    let actor = parts
      .headers
      .get(ACTOR_HEADER)
      .and_then(|v| v.to_str().ok())
      .map(str::trim)
      .filter(|s| !s.is_empty())
      .map(Actor::new)
      .unwrap_or_default();
    Ok(Self(actor))
  }
}
