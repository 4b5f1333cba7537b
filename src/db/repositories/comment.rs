//! Comment repository
//!
//! Comments are served through the generic resource router, so this
//! repository implements [`CrudRepository`](super::CrudRepository) rather
//! than a dedicated trait.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};

use super::CrudRepository;
use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Comment, CommentInput, FieldSpec, COMMENT_FIELDS};

pub struct SqlxCommentRepository {
    pool: DynDatabasePool,
}

impl SqlxCommentRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for SqlxCommentRepository {
    type Record = Comment;
    type Input = CommentInput;

    fn fields(&self) -> &'static [FieldSpec] {
        COMMENT_FIELDS
    }

    async fn list(&self) -> Result<Vec<Comment>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn create(&self, input: CommentInput) -> Result<Comment> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn replace(&self, id: i64, input: CommentInput) -> Result<Comment> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => replace_sqlite(self.pool.as_sqlite().unwrap(), id, input).await,
            DatabaseDriver::Mysql => replace_mysql(self.pool.as_mysql().unwrap(), id, input).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

// SQLite implementations

async fn list_sqlite(pool: &SqlitePool) -> Result<Vec<Comment>> {
    let rows = sqlx::query("SELECT id, blog_id, body FROM comments ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list comments")?;
    rows.iter().map(row_to_comment_sqlite).collect()
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Comment>> {
    let row = sqlx::query("SELECT id, blog_id, body FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get comment")?;
    row.as_ref().map(row_to_comment_sqlite).transpose()
}

async fn create_sqlite(pool: &SqlitePool, input: CommentInput) -> Result<Comment> {
    let result = sqlx::query("INSERT INTO comments (blog_id, body) VALUES (?, ?)")
        .bind(input.blog_id)
        .bind(&input.body)
        .execute(pool)
        .await
        .context("Failed to create comment")?;

    Ok(Comment {
        id: result.last_insert_rowid(),
        blog_id: input.blog_id,
        body: input.body,
    })
}

async fn replace_sqlite(pool: &SqlitePool, id: i64, input: CommentInput) -> Result<Comment> {
    sqlx::query("UPDATE comments SET blog_id = ?, body = ? WHERE id = ?")
        .bind(input.blog_id)
        .bind(&input.body)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace comment")?;

    Ok(Comment {
        id,
        blog_id: input.blog_id,
        body: input.body,
    })
}

async fn delete_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete comment")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_comment_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.get("id"),
        blog_id: row.get("blog_id"),
        body: row.get("body"),
    })
}

// MySQL implementations

async fn list_mysql(pool: &MySqlPool) -> Result<Vec<Comment>> {
    let rows = sqlx::query("SELECT id, blog_id, body FROM comments ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list comments")?;
    rows.iter().map(row_to_comment_mysql).collect()
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Comment>> {
    let row = sqlx::query("SELECT id, blog_id, body FROM comments WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get comment")?;
    row.as_ref().map(row_to_comment_mysql).transpose()
}

async fn create_mysql(pool: &MySqlPool, input: CommentInput) -> Result<Comment> {
    let result = sqlx::query("INSERT INTO comments (blog_id, body) VALUES (?, ?)")
        .bind(input.blog_id)
        .bind(&input.body)
        .execute(pool)
        .await
        .context("Failed to create comment")?;

    Ok(Comment {
        id: result.last_insert_id() as i64,
        blog_id: input.blog_id,
        body: input.body,
    })
}

async fn replace_mysql(pool: &MySqlPool, id: i64, input: CommentInput) -> Result<Comment> {
    sqlx::query("UPDATE comments SET blog_id = ?, body = ? WHERE id = ?")
        .bind(input.blog_id)
        .bind(&input.body)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace comment")?;

    Ok(Comment {
        id,
        blog_id: input.blog_id,
        body: input.body,
    })
}

async fn delete_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM comments WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete comment")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_comment_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Comment> {
    Ok(Comment {
        id: row.get("id"),
        blog_id: row.get("blog_id"),
        body: row.get("body"),
    })
}
