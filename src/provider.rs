//! Issuer-facing metadata (discovery), descriptors (data), and strategies (behavior).
//!
//! `discovery` fetches the OpenID Connect discovery document and exposes it as
//! [`ProviderMetadata`]. `descriptor` turns that metadata into a validated
//! [`ProviderDescriptor`] covering endpoints, supported grant flags, and the preferred client
//! authentication method. `strategy` defines [`ProviderStrategy`], an HTTP-client-agnostic hook
//! used by flows to augment outgoing token requests and classify token endpoint errors.

pub mod descriptor;
pub mod discovery;
pub mod strategy;

pub use descriptor::*;
pub use discovery::*;
pub use strategy::*;
