//! Client for the Keycloak administrative REST API.
//!
//! Build an immutable [`Configuration`] from the admin base path and a bearer token, then hand it
//! to an API group such as [`ClientsApi`]. Each operation performs exactly one HTTP request.

mod clients;
mod configuration;
mod model;

pub use clients::*;
pub use configuration::*;
pub use model::*;
