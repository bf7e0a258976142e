//! Well-known role name constants.
//!
//! These must match the `role` claim minted by the external identity
//! service. User records themselves live outside this engine; only the
//! id and role from the access token ever reach it.

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_OWNER: &str = "owner";
pub const ROLE_STAFF: &str = "staff";
pub const ROLE_CUSTOMER: &str = "customer";
