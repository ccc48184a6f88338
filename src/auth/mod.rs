pub mod jwt;
pub mod middleware;

pub use jwt::{create_token, validate_token, Claims};
pub use middleware::AuthenticatedCaller;
