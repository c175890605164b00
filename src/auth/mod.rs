pub mod claims;
pub mod cookie;
pub mod jwt;
pub mod middleware;
pub mod password;
pub mod routes;
pub mod utils;

pub use claims::Claims;
pub use jwt::JwtService;
pub use middleware::{AuthGate, AuthenticatedUser};
pub use routes::RouteTable;
pub use utils::{extract_claims_from_context, optional_claims_from_context, require_same_user};
