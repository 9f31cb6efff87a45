//! Token secrets, records, and ID token claims.

pub mod claims;
pub mod record;
pub mod secret;
