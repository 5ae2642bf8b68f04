/// Credential store seam and its Postgres implementation
pub mod user_repo;

use async_trait::async_trait;

use crate::error::AuthResult;
use crate::models::User;

pub use user_repo::PgCredentialStore;

/// Persistence boundary for user identities.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn exists_by_id(&self, id: &str) -> AuthResult<bool>;
    async fn exists_by_email(&self, email: &str) -> AuthResult<bool>;
    async fn find_by_id(&self, id: &str) -> AuthResult<Option<User>>;
    async fn save(&self, user: &User) -> AuthResult<User>;
}
