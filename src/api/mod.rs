//! Resource gateway: stateless mappings from domain operations to REST
//! calls. Each function is one HTTP verb/path pair with no extra business
//! logic; inputs are not validated and adapter errors propagate unchanged.

pub mod auth;
pub mod diagnosis;
pub mod profile;
pub mod verification;
