/// Security module for authentication
pub mod password;

pub use password::{Argon2Hasher, PasswordHasher};
