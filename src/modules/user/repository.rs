use super::model::{User, UserRole};
use sqlx::PgExecutor;

pub struct UserRepository;

impl UserRepository {
    pub async fn create<'e, E>(
        executor: E,
        name: &str,
        email: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<User, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, password_hash, role, is_blocked, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role)
        .fetch_one(executor)
        .await
    }

    pub async fn find_by_id<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_blocked, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn find_by_email<'e, E>(executor: E, email: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_blocked, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(executor)
        .await
    }

    /// Names are not unique; the oldest account wins.
    pub async fn find_by_name<'e, E>(executor: E, name: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_blocked, created_at, updated_at
            FROM users
            WHERE name = $1
            ORDER BY id ASC
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(executor)
        .await
    }

    pub async fn list_without_role<'e, E>(executor: E, excluded: UserRole) -> Result<Vec<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_blocked, created_at, updated_at
            FROM users
            WHERE role <> $1
            ORDER BY id ASC
            "#,
        )
        .bind(excluded)
        .fetch_all(executor)
        .await
    }

    pub async fn exists_with_role<'e, E>(executor: E, role: UserRole) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM users WHERE role = $1)")
            .bind(role)
            .fetch_one(executor)
            .await
    }

    pub async fn update_name<'e, E>(executor: E, id: i64, name: &str) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET name = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, name, email, password_hash, role, is_blocked, created_at, updated_at
            "#,
        )
        .bind(name)
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn update_password_hash<'e, E>(
        executor: E,
        id: i64,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
            .bind(password_hash)
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Super admins are excluded in the statement itself, so a concurrent
    /// promotion cannot slip through between a check and the write.
    pub async fn update_role<'e, E>(executor: E, id: i64, role: UserRole) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET role = $1, updated_at = NOW()
            WHERE id = $2 AND role <> 'SUPER_ADMIN'
            RETURNING id, name, email, password_hash, role, is_blocked, created_at, updated_at
            "#,
        )
        .bind(role)
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    pub async fn set_blocked<'e, E>(executor: E, id: i64, blocked: bool) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET is_blocked = $1, updated_at = NOW()
            WHERE id = $2 AND role <> 'SUPER_ADMIN'
            RETURNING id, name, email, password_hash, role, is_blocked, created_at, updated_at
            "#,
        )
        .bind(blocked)
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Exclusive row lock taken before a user is deleted. It waits for, and
    /// then blocks, review inserts that reference this user.
    pub async fn lock_for_delete<'e, E>(executor: E, id: i64) -> Result<Option<User>, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, name, email, password_hash, role, is_blocked, created_at, updated_at
            FROM users
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// The lock a foreign key check would take, acquired up front so review
    /// writers always lock the user before the car.
    pub async fn lock_key_share<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let locked = sqlx::query_scalar::<_, i64>("SELECT id FROM users WHERE id = $1 FOR KEY SHARE")
            .bind(id)
            .fetch_optional(executor)
            .await?;
        Ok(locked.is_some())
    }

    pub async fn delete<'e, E>(executor: E, id: i64) -> Result<bool, sqlx::Error>
    where
        E: PgExecutor<'e>,
    {
        let result = sqlx::query("DELETE FROM users WHERE id = $1 AND role <> 'SUPER_ADMIN'")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
