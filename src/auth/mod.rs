pub mod caller;
pub mod claims;
pub mod jwt;

pub use caller::resolve_caller;
pub use jwt::{JwtKeys, TokenAuthority, TokenError};
