//! Student repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Student, StudentInput};

/// Student repository trait
#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students, ordered by primary key
    async fn list(&self) -> Result<Vec<Student>>;

    /// Get a student by primary key
    async fn get_by_id(&self, id: i64) -> Result<Option<Student>>;

    /// Persist a new student
    async fn create(&self, input: StudentInput) -> Result<Student>;

    /// Fully replace an existing student
    async fn replace(&self, id: i64, input: StudentInput) -> Result<Student>;

    /// Delete a student; returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct SqlxStudentRepository {
    pool: DynDatabasePool,
}

impl SqlxStudentRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn StudentRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl StudentRepository for SqlxStudentRepository {
    async fn list(&self) -> Result<Vec<Student>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Student>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn create(&self, input: StudentInput) -> Result<Student> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn replace(&self, id: i64, input: StudentInput) -> Result<Student> {
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

async fn list_sqlite(pool: &SqlitePool) -> Result<Vec<Student>> {
    let rows = sqlx::query("SELECT id, name, branch FROM students ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list students")?;
    rows.iter().map(row_to_student_sqlite).collect()
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Student>> {
    let row = sqlx::query("SELECT id, name, branch FROM students WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get student")?;
    row.as_ref().map(row_to_student_sqlite).transpose()
}

async fn create_sqlite(pool: &SqlitePool, input: StudentInput) -> Result<Student> {
    let result = sqlx::query("INSERT INTO students (name, branch) VALUES (?, ?)")
        .bind(&input.name)
        .bind(&input.branch)
        .execute(pool)
        .await
        .context("Failed to create student")?;

    Ok(Student {
        id: result.last_insert_rowid(),
        name: input.name,
        branch: input.branch,
    })
}

async fn replace_sqlite(pool: &SqlitePool, id: i64, input: StudentInput) -> Result<Student> {
    sqlx::query("UPDATE students SET name = ?, branch = ? WHERE id = ?")
        .bind(&input.name)
        .bind(&input.branch)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace student")?;

    Ok(Student {
        id,
        name: input.name,
        branch: input.branch,
    })
}

async fn delete_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete student")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_student_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Student> {
    Ok(Student {
        id: row.get("id"),
        name: row.get("name"),
        branch: row.get("branch"),
    })
}

// MySQL implementations

async fn list_mysql(pool: &MySqlPool) -> Result<Vec<Student>> {
    let rows = sqlx::query("SELECT id, name, branch FROM students ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list students")?;
    rows.iter().map(row_to_student_mysql).collect()
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Student>> {
    let row = sqlx::query("SELECT id, name, branch FROM students WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get student")?;
    row.as_ref().map(row_to_student_mysql).transpose()
}

async fn create_mysql(pool: &MySqlPool, input: StudentInput) -> Result<Student> {
    let result = sqlx::query("INSERT INTO students (name, branch) VALUES (?, ?)")
        .bind(&input.name)
        .bind(&input.branch)
        .execute(pool)
        .await
        .context("Failed to create student")?;

    Ok(Student {
        id: result.last_insert_id() as i64,
        name: input.name,
        branch: input.branch,
    })
}

async fn replace_mysql(pool: &MySqlPool, id: i64, input: StudentInput) -> Result<Student> {
    sqlx::query("UPDATE students SET name = ?, branch = ? WHERE id = ?")
        .bind(&input.name)
        .bind(&input.branch)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace student")?;

    Ok(Student {
        id,
        name: input.name,
        branch: input.branch,
    })
}

async fn delete_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM students WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete student")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_student_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Student> {
    Ok(Student {
        id: row.get("id"),
        name: row.get("name"),
        branch: row.get("branch"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxStudentRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxStudentRepository::new(pool)
    }

    fn input(name: &str, branch: &str) -> StudentInput {
        StudentInput {
            name: name.to_string(),
            branch: branch.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Priya", "CSE")).await.expect("create");
        assert!(created.id > 0);
        assert_eq!(created.name, "Priya");
        assert_eq!(created.branch, "CSE");
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Priya", "CSE")).await.expect("create");
        let found = repo
            .get_by_id(created.id)
            .await
            .expect("get")
            .expect("student should exist");
        assert_eq!(found, created);
    }

    #[tokio::test]
    async fn test_get_by_id_missing_returns_none() {
        let repo = setup_test_repo().await;

        let found = repo.get_by_id(999).await.expect("get");
        assert!(found.is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = setup_test_repo().await;

        let a = repo.create(input("A", "CSE")).await.unwrap();
        let b = repo.create(input("B", "ECE")).await.unwrap();

        let all = repo.list().await.expect("list");
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_all_fields() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Priya", "CSE")).await.unwrap();
        let replaced = repo
            .replace(created.id, input("Priya S", "ECE"))
            .await
            .expect("replace");

        assert_eq!(replaced.id, created.id);
        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, replaced);
        assert_eq!(found.branch, "ECE");
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Priya", "CSE")).await.unwrap();
        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
        assert!(!repo.delete(created.id).await.expect("second delete"));
    }
}
