//! Blog repository
//!
//! Blogs are served through the generic resource router, so this repository
//! implements [`CrudRepository`](super::CrudRepository) rather than a
//! dedicated trait. Records carry their comments as a derived array.

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::collections::HashMap;

use super::CrudRepository;
use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Blog, BlogInput, Comment, FieldSpec, BLOG_FIELDS};

pub struct SqlxBlogRepository {
    pool: DynDatabasePool,
}

impl SqlxBlogRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CrudRepository for SqlxBlogRepository {
    type Record = Blog;
    type Input = BlogInput;

    fn fields(&self) -> &'static [FieldSpec] {
        BLOG_FIELDS
    }

    async fn list(&self) -> Result<Vec<Blog>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Blog>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn create(&self, input: BlogInput) -> Result<Blog> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn replace(&self, id: i64, input: BlogInput) -> Result<Blog> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => replace_sqlite(self.pool.as_sqlite().unwrap(), id, input).await,
            DatabaseDriver::Mysql => replace_mysql(self.pool.as_mysql().unwrap(), id, input).await,
        }
    }

    async fn delete(&self, id: i64) -> Result<bool> {
        // Comments go with the blog via ON DELETE CASCADE
        match self.pool.driver() {
            DatabaseDriver::Sqlite => delete_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => delete_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }
}

/// Group fetched comments by their owning blog
fn group_by_blog(comments: Vec<Comment>) -> HashMap<i64, Vec<Comment>> {
    let mut grouped: HashMap<i64, Vec<Comment>> = HashMap::new();
    for comment in comments {
        grouped.entry(comment.blog_id).or_default().push(comment);
    }
    grouped
}

// SQLite implementations

async fn list_sqlite(pool: &SqlitePool) -> Result<Vec<Blog>> {
    let blog_rows = sqlx::query("SELECT id, title, body FROM blogs ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list blogs")?;

    let comment_rows = sqlx::query("SELECT id, blog_id, body FROM comments ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list comments for blogs")?;
    let comments = comment_rows
        .iter()
        .map(row_to_comment_sqlite)
        .collect::<Result<Vec<_>>>()?;
    let mut grouped = group_by_blog(comments);

    blog_rows
        .iter()
        .map(|row| {
            let mut blog = row_to_blog_sqlite(row)?;
            blog.comments = grouped.remove(&blog.id).unwrap_or_default();
            Ok(blog)
        })
        .collect()
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Blog>> {
    let row = sqlx::query("SELECT id, title, body FROM blogs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut blog = row_to_blog_sqlite(&row)?;
    blog.comments = comments_for_blog_sqlite(pool, id).await?;
    Ok(Some(blog))
}

async fn create_sqlite(pool: &SqlitePool, input: BlogInput) -> Result<Blog> {
    let result = sqlx::query("INSERT INTO blogs (title, body) VALUES (?, ?)")
        .bind(&input.title)
        .bind(&input.body)
        .execute(pool)
        .await
        .context("Failed to create blog")?;

    Ok(Blog {
        id: result.last_insert_rowid(),
        title: input.title,
        body: input.body,
        comments: Vec::new(),
    })
}

async fn replace_sqlite(pool: &SqlitePool, id: i64, input: BlogInput) -> Result<Blog> {
    sqlx::query("UPDATE blogs SET title = ?, body = ? WHERE id = ?")
        .bind(&input.title)
        .bind(&input.body)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace blog")?;

    Ok(Blog {
        id,
        title: input.title,
        body: input.body,
        comments: comments_for_blog_sqlite(pool, id).await?,
    })
}

async fn delete_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete blog")?;
    Ok(result.rows_affected() > 0)
}

async fn comments_for_blog_sqlite(pool: &SqlitePool, blog_id: i64) -> Result<Vec<Comment>> {
    let rows = sqlx::query("SELECT id, blog_id, body FROM comments WHERE blog_id = ? ORDER BY id")
        .bind(blog_id)
        .fetch_all(pool)
        .await
        .context("Failed to get comments for blog")?;
    rows.iter().map(row_to_comment_sqlite).collect()
}

fn row_to_blog_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Blog> {
    Ok(Blog {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        comments: Vec::new(),
    })
}

fn row_to_comment_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Comment> {
    Ok(Comment {
        id: row.get("id"),
        blog_id: row.get("blog_id"),
        body: row.get("body"),
    })
}

// MySQL implementations

async fn list_mysql(pool: &MySqlPool) -> Result<Vec<Blog>> {
    let blog_rows = sqlx::query("SELECT id, title, body FROM blogs ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list blogs")?;

    let comment_rows = sqlx::query("SELECT id, blog_id, body FROM comments ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list comments for blogs")?;
    let comments = comment_rows
        .iter()
        .map(row_to_comment_mysql)
        .collect::<Result<Vec<_>>>()?;
    let mut grouped = group_by_blog(comments);

    blog_rows
        .iter()
        .map(|row| {
            let mut blog = row_to_blog_mysql(row)?;
            blog.comments = grouped.remove(&blog.id).unwrap_or_default();
            Ok(blog)
        })
        .collect()
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Blog>> {
    let row = sqlx::query("SELECT id, title, body FROM blogs WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get blog")?;

    let Some(row) = row else {
        return Ok(None);
    };

    let mut blog = row_to_blog_mysql(&row)?;
    blog.comments = comments_for_blog_mysql(pool, id).await?;
    Ok(Some(blog))
}

async fn create_mysql(pool: &MySqlPool, input: BlogInput) -> Result<Blog> {
    let result = sqlx::query("INSERT INTO blogs (title, body) VALUES (?, ?)")
        .bind(&input.title)
        .bind(&input.body)
        .execute(pool)
        .await
        .context("Failed to create blog")?;

    Ok(Blog {
        id: result.last_insert_id() as i64,
        title: input.title,
        body: input.body,
        comments: Vec::new(),
    })
}

async fn replace_mysql(pool: &MySqlPool, id: i64, input: BlogInput) -> Result<Blog> {
    sqlx::query("UPDATE blogs SET title = ?, body = ? WHERE id = ?")
        .bind(&input.title)
        .bind(&input.body)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace blog")?;

    Ok(Blog {
        id,
        title: input.title,
        body: input.body,
        comments: comments_for_blog_mysql(pool, id).await?,
    })
}

async fn delete_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM blogs WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete blog")?;
    Ok(result.rows_affected() > 0)
}

async fn comments_for_blog_mysql(pool: &MySqlPool, blog_id: i64) -> Result<Vec<Comment>> {
    let rows = sqlx::query("SELECT id, blog_id, body FROM comments WHERE blog_id = ? ORDER BY id")
        .bind(blog_id)
        .fetch_all(pool)
        .await
        .context("Failed to get comments for blog")?;
    rows.iter().map(row_to_comment_mysql).collect()
}

fn row_to_blog_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Blog> {
    Ok(Blog {
        id: row.get("id"),
        title: row.get("title"),
        body: row.get("body"),
        comments: Vec::new(),
    })
}

fn row_to_comment_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Comment> {
    Ok(Comment {
        id: row.get("id"),
        blog_id: row.get("blog_id"),
        body: row.get("body"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::SqlxCommentRepository;
    use crate::db::{create_test_pool, migrations};
    use crate::models::CommentInput;

    async fn setup_test_repos() -> (SqlxBlogRepository, SqlxCommentRepository) {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        (
            SqlxBlogRepository::new(pool.clone()),
            SqlxCommentRepository::new(pool),
        )
    }

    fn input(title: &str, body: &str) -> BlogInput {
        BlogInput {
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_starts_with_no_comments() {
        let (blogs, _) = setup_test_repos().await;

        let created = blogs.create(input("Hello", "First post")).await.expect("create");
        assert!(created.id > 0);
        assert!(created.comments.is_empty());
    }

    #[tokio::test]
    async fn test_get_by_id_embeds_comments_in_order() {
        let (blogs, comments) = setup_test_repos().await;

        let blog = blogs.create(input("Hello", "First post")).await.unwrap();
        let first = comments
            .create(CommentInput {
                blog_id: blog.id,
                body: "first!".to_string(),
            })
            .await
            .unwrap();
        let second = comments
            .create(CommentInput {
                blog_id: blog.id,
                body: "second".to_string(),
            })
            .await
            .unwrap();

        let found = blogs.get_by_id(blog.id).await.unwrap().expect("blog exists");
        assert_eq!(found.comments, vec![first, second]);
    }

    #[tokio::test]
    async fn test_list_groups_comments_per_blog() {
        let (blogs, comments) = setup_test_repos().await;

        let a = blogs.create(input("A", "a")).await.unwrap();
        let b = blogs.create(input("B", "b")).await.unwrap();
        comments
            .create(CommentInput {
                blog_id: b.id,
                body: "on b".to_string(),
            })
            .await
            .unwrap();

        let all = blogs.list().await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, a.id);
        assert!(all[0].comments.is_empty());
        assert_eq!(all[1].comments.len(), 1);
    }

    #[tokio::test]
    async fn test_replace_keeps_comments() {
        let (blogs, comments) = setup_test_repos().await;

        let blog = blogs.create(input("Hello", "First post")).await.unwrap();
        comments
            .create(CommentInput {
                blog_id: blog.id,
                body: "still here".to_string(),
            })
            .await
            .unwrap();

        let replaced = blogs
            .replace(blog.id, input("Hello v2", "Edited"))
            .await
            .expect("replace");
        assert_eq!(replaced.title, "Hello v2");
        assert_eq!(replaced.comments.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_comments() {
        let (blogs, comments) = setup_test_repos().await;

        let blog = blogs.create(input("Hello", "First post")).await.unwrap();
        let comment = comments
            .create(CommentInput {
                blog_id: blog.id,
                body: "soon gone".to_string(),
            })
            .await
            .unwrap();

        assert!(blogs.delete(blog.id).await.expect("delete"));
        assert!(comments.get_by_id(comment.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let (blogs, _) = setup_test_repos().await;
        assert!(blogs.get_by_id(999).await.unwrap().is_none());
    }
}
