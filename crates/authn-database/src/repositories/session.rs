//! Session repository implementation.
//!
//! Every mutation is a single SQL statement so concurrent requests
//! against the same session cannot interleave a read-modify-write.

use sqlx::SqlitePool;

use authn_core::error::{AppError, ErrorKind};
use authn_core::result::AppResult;
use authn_entity::session::{CreateSession, Session};

/// Repository for session persistence.
#[derive(Debug, Clone)]
pub struct SessionRepository {
    pool: SqlitePool,
}

impl SessionRepository {
    /// Create a new session repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find a session by its identifier, in any state.
    pub async fn find_by_id(&self, session_id: &str) -> AppResult<Option<Session>> {
        sqlx::query_as::<_, Session>("SELECT * FROM sessions WHERE session_id = ?1")
            .bind(session_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find session", e))
    }

    /// List every session belonging to a user, newest first.
    pub async fn find_by_user(&self, user_id: i64) -> AppResult<Vec<Session>> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE user_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list sessions", e))
    }

    /// Insert a new session row.
    ///
    /// A primary-key or CSRF-token collision surfaces as a database error;
    /// an existing row is never overwritten.
    pub async fn create(&self, data: &CreateSession) -> AppResult<Session> {
        sqlx::query_as::<_, Session>(
            "INSERT INTO sessions (session_id, user_id, created_at, last_seen, expires_at, \
             absolute_expires_at, ip, user_agent, csrf_token, revoked) \
             VALUES (?1, ?2, ?3, ?3, ?4, ?5, ?6, ?7, ?8, 0) \
             RETURNING *",
        )
        .bind(&data.session_id)
        .bind(data.user_id)
        .bind(data.created_at)
        .bind(data.expires_at)
        .bind(data.absolute_expires_at)
        .bind(&data.ip)
        .bind(&data.user_agent)
        .bind(&data.csrf_token)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::with_source(ErrorKind::Database, "Session identifier collision", e)
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create session", e),
        })
    }

    /// Record an access at `now` and slide the idle expiry.
    ///
    /// The new expiry is `min(now + idle_ttl, absolute_expires_at)`.
    /// Revoked or already-expired rows are left untouched. Returns whether
    /// a row was updated.
    pub async fn touch(&self, session_id: &str, now: i64, idle_ttl: i64) -> AppResult<bool> {
        let result = sqlx::query(
            "UPDATE sessions \
             SET last_seen = ?1, expires_at = MIN(?1 + ?2, absolute_expires_at) \
             WHERE session_id = ?3 AND revoked = 0 \
             AND expires_at > ?1 AND absolute_expires_at > ?1",
        )
        .bind(now)
        .bind(idle_ttl)
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to touch session", e))?;

        Ok(result.rows_affected() > 0)
    }

    /// Revoke a single session. Returns the number of rows changed.
    pub async fn revoke(&self, session_id: &str) -> AppResult<u64> {
        let result = sqlx::query("UPDATE sessions SET revoked = 1 WHERE session_id = ?1")
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke session", e)
            })?;

        Ok(result.rows_affected())
    }

    /// Revoke every session owned by the user who owns `session_id`.
    ///
    /// The owner lookup and the update run as one statement. An unknown
    /// identifier revokes nothing.
    pub async fn revoke_all_for_owner(&self, session_id: &str) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE sessions SET revoked = 1 \
             WHERE user_id = (SELECT user_id FROM sessions WHERE session_id = ?1)",
        )
        .bind(session_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to revoke user sessions", e)
        })?;

        Ok(result.rows_affected())
    }

    /// Revoke every session of a user by user id.
    pub async fn revoke_all_by_user(&self, user_id: i64) -> AppResult<u64> {
        let result = sqlx::query("UPDATE sessions SET revoked = 1 WHERE user_id = ?1")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to revoke user sessions", e)
            })?;

        Ok(result.rows_affected())
    }

    /// Delete sessions that were already dead before `cutoff`: expired
    /// ones, and revoked ones last seen before it.
    pub async fn purge_dead(&self, cutoff: i64) -> AppResult<u64> {
        let result = sqlx::query(
            "DELETE FROM sessions \
             WHERE expires_at < ?1 OR absolute_expires_at < ?1 \
             OR (revoked = 1 AND last_seen < ?1)",
        )
        .bind(cutoff)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to purge sessions", e))?;

        Ok(result.rows_affected())
    }
}
