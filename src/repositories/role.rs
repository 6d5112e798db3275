//! Role repository for database operations

use sqlx::PgPool;

/// Role record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RoleRecord {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
}

/// Role repository for database operations
pub struct RoleRepository;

impl RoleRepository {
    /// List all roles ordered by name
    pub async fn list(pool: &PgPool) -> Result<Vec<RoleRecord>, sqlx::Error> {
        sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT id, name, description
            FROM roles
            ORDER BY name
            "#,
        )
        .fetch_all(pool)
        .await
    }

    /// Find role by ID
    pub async fn find_by_id(pool: &PgPool, id: i32) -> Result<Option<RoleRecord>, sqlx::Error> {
        sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT id, name, description
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find role by exact name (used for uniqueness checks)
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<RoleRecord>, sqlx::Error> {
        sqlx::query_as::<_, RoleRecord>(
            r#"
            SELECT id, name, description
            FROM roles
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    /// Check if a role with the given ID exists
    pub async fn exists(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(SELECT 1 FROM roles WHERE id = $1)
            "#,
        )
        .bind(id)
        .fetch_one(pool)
        .await
    }

    /// Insert a new role, returning the created record
    pub async fn insert(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
    ) -> Result<RoleRecord, sqlx::Error> {
        sqlx::query_as::<_, RoleRecord>(
            r#"
            INSERT INTO roles (name, description)
            VALUES ($1, $2)
            RETURNING id, name, description
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
    }

    /// Replace a role's name and description
    ///
    /// Returns None when the role no longer exists.
    pub async fn update(
        pool: &PgPool,
        id: i32,
        name: &str,
        description: Option<&str>,
    ) -> Result<Option<RoleRecord>, sqlx::Error> {
        sqlx::query_as::<_, RoleRecord>(
            r#"
            UPDATE roles
            SET name = $2, description = $3
            WHERE id = $1
            RETURNING id, name, description
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(pool)
        .await
    }

    /// Delete a role, returning whether a row was removed
    pub async fn delete(pool: &PgPool, id: i32) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            DELETE FROM roles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    // Repository behavior is covered by the database-backed tests in
    // tests/, marked #[ignore = "requires database"].
}
