pub mod password;
pub mod permissions;
pub mod token;

pub use permissions::permissions_for_role;
pub use token::{mint, verify, Claims, TokenError};
