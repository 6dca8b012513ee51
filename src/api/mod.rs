//! # API Module
//!
//! HTTP endpoints of the local server used during authentication.
//!
//! - [`callback`] - Handles the redirect from Spotify's consent page, checks
//!   the `state` value and exchanges the authorization code for a token.
//!
//! The server itself is started by [`crate::server::start_api_server`] for
//! the duration of one consent flow.

mod callback;

pub use callback::callback;
