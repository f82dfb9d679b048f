//! Authentication: token codec, bearer-token gate, password hashing.

pub mod extract;
pub mod password;
pub mod token;

pub use extract::Subject;
pub use token::{Claims, TokenCodec, TokenError};
