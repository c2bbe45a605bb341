//! TokenService 実装

mod jwt;

pub use jwt::{DEFAULT_VALIDITY_SECS, JwtTokenService};
