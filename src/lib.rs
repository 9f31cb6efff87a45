//! Sign in to a Keycloak issuer with the OpenID Connect password grant, then list the clients
//! registered in a realm through the administrative REST API.
//!
//! The crate mirrors the two steps of the flow:
//!
//! 1. [`provider::Issuer::discover`] resolves the issuer metadata and
//!    [`flows::OidcClient::password_grant`] exchanges the resource-owner credentials for a
//!    [`auth::TokenRecord`].
//! 2. [`admin::ClientsApi::realm_clients_get`] calls the admin API with the bearer token.
//!
//! [`app::run`] wires both steps together exactly the way the `keycloak-clients` binary does.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod admin;
pub mod app;
pub mod auth;
pub mod config;
pub mod error;
pub mod flows;
pub mod http;
pub mod oauth;
pub mod obs;
pub mod provider;

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		str::FromStr,
		sync::Arc,
	};

	pub use parking_lot::Mutex;
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

pub use reqwest;
pub use url;
#[cfg(test)] use httpmock as _;
#[cfg(feature = "cli")] use {color_eyre as _, tracing_subscriber as _};
#[cfg(any(test, feature = "cli"))] use tokio as _;
