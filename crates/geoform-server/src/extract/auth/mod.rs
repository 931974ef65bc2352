//! Session token authentication extractors.

mod claims;
mod state;

pub use self::claims::AuthClaims;
pub use self::state::{AuthState, SESSION_COOKIE};
