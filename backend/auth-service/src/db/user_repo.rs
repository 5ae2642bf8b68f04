/// User database operations
use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::db::CredentialStore;
use crate::error::{AuthError, AuthResult};
use crate::models::{Role, User};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    email: String,
    password_hash: String,
    roles: Vec<String>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let roles = self
            .roles
            .iter()
            .map(|name| {
                Role::parse(name).ok_or_else(|| {
                    AuthError::Database(format!("unknown role '{}' for user {}", name, self.id))
                })
            })
            .collect::<AuthResult<Vec<_>>>()?;

        Ok(User {
            id: self.id,
            email: self.email,
            password_hash: self.password_hash,
            roles,
        })
    }
}

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn exists_by_id(&self, id: &str) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists)
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| AuthError::Database(e.to_string()))?;

        Ok(exists)
    }

    async fn find_by_id(&self, id: &str) -> AuthResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            "SELECT id, email, password_hash, roles FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        row.map(UserRow::into_user).transpose()
    }

    async fn save(&self, user: &User) -> AuthResult<User> {
        let roles: Vec<String> = user.roles.iter().map(|r| r.as_str().to_string()).collect();

        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, email, password_hash, roles, created_at, updated_at)
            VALUES ($1, $2, $3, $4, CURRENT_TIMESTAMP, CURRENT_TIMESTAMP)
            RETURNING id, email, password_hash, roles
            "#,
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&roles)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AuthError::Database(e.to_string()))?;

        row.into_user()
    }
}
