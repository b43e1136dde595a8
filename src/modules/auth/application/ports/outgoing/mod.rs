pub mod auth_gateway;
pub mod session_oracle;

pub use auth_gateway::{AuthGateway, AuthGatewayError};
pub use session_oracle::{SessionError, SessionOracle};
