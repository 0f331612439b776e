pub mod claims;
pub mod codec;
pub mod config;
pub mod error;
pub mod extractors;
pub mod gate;
pub mod password;
pub mod roles;

pub use claims::{Claims, Identity, TokenType};
pub use codec::TokenCodec;
pub use config::TokenConfig;
pub use error::{AuthError, AuthResult, ErrorBody};
pub use extractors::authenticate;
pub use gate::{access_gate, ensure_role, AccessGate, PolicyRegistry, RoutePolicy};
pub use roles::{ROLE_ADMIN, ROLE_USER};
