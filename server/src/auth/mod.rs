//! Authentication
//!
//! Provides:
//! - Signed session cookies (HS256 JWT in an HttpOnly cookie)
//! - Shared password check
//! - Middleware guarding the data endpoints

pub mod guard;
pub mod password;
pub mod session;

pub use guard::require_session;
pub use password::password_matches;
pub use session::{
    clear_session_cookie, extract_session_token, session_cookie, SessionClaims, SessionSigner,
    SESSION_COOKIE,
};
