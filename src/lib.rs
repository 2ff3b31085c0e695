//! # Cutis (Skin Disease Diagnosis Client)
//!
//! `cutis` is the client side of a skin-disease diagnosis workflow: patients
//! submit dermatological images for analysis, dermatologists review the
//! results and record a verified condition.
//!
//! ## Session Model
//!
//! A session is the quintuple of access token, refresh token, role, username
//! and user id. All five are set together on login and cleared together on
//! logout; the session survives restarts through a file-backed store.
//!
//! - **Roles:** `patient` and `dermatologist`. Role-gated views redirect to
//!   `/login` on mismatch instead of failing.
//! - **Token refresh:** a `401` response triggers exactly one silent refresh
//!   and a replay of the failed request. If the refresh fails, the session is
//!   cleared and navigation is forced to `/login`.
//!
//! ## Layers
//!
//! [`session`] holds state and persistence, [`client`] wraps HTTP with bearer
//! attachment and the refresh interceptor, [`api`] maps domain operations to
//! REST calls, and [`router`] gates navigation by authentication and role.
//! They are constructed in that order, each receiving the previous one by
//! reference; nothing is discovered through globals.

pub mod api;
pub mod cli;
pub mod client;
pub mod router;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
