/*
 * Responsibility
 * - Read-only SQLx access to the users table for identity resolution
 * - The credential column (password_hash) is never selected
 */
use sqlx::{FromRow, PgPool};

use crate::repos::error::RepoError;

#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: String,
    pub email: String,
    pub role: String,
    pub name: String,
    #[sqlx(rename = "community_id")]
    pub community_ref: Option<String>,
    pub is_active: bool,
}

pub async fn find_identity(db: &PgPool, user_id: &str) -> Result<Option<UserRow>, RepoError> {
    let row = sqlx::query_as::<_, UserRow>(
        r#"
        SELECT id, email, role, name, community_id, is_active
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    Ok(row)
}
