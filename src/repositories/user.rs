//! User repository for database operations
//!
//! Every fetch joins the role explicitly, so callers always receive a
//! fully populated row. Nothing here lazy-loads.

use sqlx::PgPool;

/// User row joined with its role
///
/// The role columns are optional because the join is a LEFT JOIN; a
/// missing role surfaces as None rather than failing the fetch.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserWithRole {
    pub id: i32,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub role_id: i32,
    pub role_name: Option<String>,
    pub role_description: Option<String>,
}

/// User repository for database operations
pub struct UserRepository;

impl UserRepository {
    /// List all users with their role, ordered by full name
    pub async fn list(pool: &PgPool) -> Result<Vec<UserWithRole>, sqlx::Error> {
        sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.full_name, u.email, u.password_hash, u.role_id,
                   r.name AS role_name, r.description AS role_description
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            ORDER BY u.full_name
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Find user by ID with its role
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<UserWithRole>, sqlx::Error> {
        sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.full_name, u.email, u.password_hash, u.role_id,
                   r.name AS role_name, r.description AS role_description
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find user by email with its role
    pub async fn find_by_email(
        pool: &PgPool,
        email: &str,
    ) -> Result<Option<UserWithRole>, sqlx::Error> {
        sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.full_name, u.email, u.password_hash, u.role_id,
                   r.name AS role_name, r.description AS role_description
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(pool)
        .await
    }

    /// List users with the given role, ordered by full name
    pub async fn list_by_role(
        pool: &PgPool,
        role_id: i32,
    ) -> Result<Vec<UserWithRole>, sqlx::Error> {
        sqlx::query_as::<_, UserWithRole>(
            r#"
            SELECT u.id, u.full_name, u.email, u.password_hash, u.role_id,
                   r.name AS role_name, r.description AS role_description
            FROM users u
            LEFT JOIN roles r ON r.id = u.role_id
            WHERE u.role_id = $1
            ORDER BY u.full_name
            "#,
        )
        .bind(role_id)
        .fetch_all(pool)
        .await
    }

    /// Check if any user already owns the given email
    pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
        )
        .bind(email)
        .fetch_one(pool)
        .await
    }

    /// Check if any user references the given role
    pub async fn exists_with_role(pool: &PgPool, role_id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE role_id = $1)
            "#,
        )
        .bind(role_id)
        .fetch_one(pool)
        .await
    }

    /// Insert a new user, returning the generated ID
    pub async fn insert(
        pool: &PgPool,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role_id: i32,
    ) -> Result<i32, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (full_name, email, password_hash, role_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(role_id)
        .fetch_one(pool)
        .await
    }

    /// Replace a user's mutable fields
    ///
    /// Returns None when the user no longer exists.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        full_name: &str,
        email: &str,
        password_hash: &str,
        role_id: i32,
    ) -> Result<Option<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users
            SET full_name = $2, email = $3, password_hash = $4, role_id = $5
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(full_name)
        .bind(email)
        .bind(password_hash)
        .bind(role_id)
        .fetch_optional(pool)
        .await
    }

    /// Delete a user, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
