//! Employee repository

use anyhow::{Context, Result};
use async_trait::async_trait;
use sqlx::{MySqlPool, Row, SqlitePool};
use std::sync::Arc;

use crate::config::DatabaseDriver;
use crate::db::DynDatabasePool;
use crate::models::{Employee, EmployeeInput};

/// Employee repository trait
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// All employees, ordered by primary key
    async fn list(&self) -> Result<Vec<Employee>>;

    /// Get an employee by primary key
    async fn get_by_id(&self, id: i64) -> Result<Option<Employee>>;

    /// Persist a new employee
    async fn create(&self, input: EmployeeInput) -> Result<Employee>;

    /// Fully replace an existing employee
    async fn replace(&self, id: i64, input: EmployeeInput) -> Result<Employee>;

    /// Delete an employee; returns false when no row matched
    async fn delete(&self, id: i64) -> Result<bool>;
}

pub struct SqlxEmployeeRepository {
    pool: DynDatabasePool,
}

impl SqlxEmployeeRepository {
    pub fn new(pool: DynDatabasePool) -> Self {
        Self { pool }
    }

    pub fn boxed(pool: DynDatabasePool) -> Arc<dyn EmployeeRepository> {
        Arc::new(Self::new(pool))
    }
}

#[async_trait]
impl EmployeeRepository for SqlxEmployeeRepository {
    async fn list(&self) -> Result<Vec<Employee>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => list_sqlite(self.pool.as_sqlite().unwrap()).await,
            DatabaseDriver::Mysql => list_mysql(self.pool.as_mysql().unwrap()).await,
        }
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Employee>> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => get_by_id_sqlite(self.pool.as_sqlite().unwrap(), id).await,
            DatabaseDriver::Mysql => get_by_id_mysql(self.pool.as_mysql().unwrap(), id).await,
        }
    }

    async fn create(&self, input: EmployeeInput) -> Result<Employee> {
        match self.pool.driver() {
            DatabaseDriver::Sqlite => create_sqlite(self.pool.as_sqlite().unwrap(), input).await,
            DatabaseDriver::Mysql => create_mysql(self.pool.as_mysql().unwrap(), input).await,
        }
    }

    async fn replace(&self, id: i64, input: EmployeeInput) -> Result<Employee> {
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

async fn list_sqlite(pool: &SqlitePool) -> Result<Vec<Employee>> {
    let rows = sqlx::query("SELECT id, name, role FROM employees ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list employees")?;
    rows.iter().map(row_to_employee_sqlite).collect()
}

async fn get_by_id_sqlite(pool: &SqlitePool, id: i64) -> Result<Option<Employee>> {
    let row = sqlx::query("SELECT id, name, role FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get employee")?;
    row.as_ref().map(row_to_employee_sqlite).transpose()
}

async fn create_sqlite(pool: &SqlitePool, input: EmployeeInput) -> Result<Employee> {
    let result = sqlx::query("INSERT INTO employees (name, role) VALUES (?, ?)")
        .bind(&input.name)
        .bind(&input.role)
        .execute(pool)
        .await
        .context("Failed to create employee")?;

    Ok(Employee {
        id: result.last_insert_rowid(),
        name: input.name,
        role: input.role,
    })
}

async fn replace_sqlite(pool: &SqlitePool, id: i64, input: EmployeeInput) -> Result<Employee> {
    sqlx::query("UPDATE employees SET name = ?, role = ? WHERE id = ?")
        .bind(&input.name)
        .bind(&input.role)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace employee")?;

    Ok(Employee {
        id,
        name: input.name,
        role: input.role,
    })
}

async fn delete_sqlite(pool: &SqlitePool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete employee")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_employee_sqlite(row: &sqlx::sqlite::SqliteRow) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
    })
}

// MySQL implementations

async fn list_mysql(pool: &MySqlPool) -> Result<Vec<Employee>> {
    let rows = sqlx::query("SELECT id, name, role FROM employees ORDER BY id")
        .fetch_all(pool)
        .await
        .context("Failed to list employees")?;
    rows.iter().map(row_to_employee_mysql).collect()
}

async fn get_by_id_mysql(pool: &MySqlPool, id: i64) -> Result<Option<Employee>> {
    let row = sqlx::query("SELECT id, name, role FROM employees WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
        .context("Failed to get employee")?;
    row.as_ref().map(row_to_employee_mysql).transpose()
}

async fn create_mysql(pool: &MySqlPool, input: EmployeeInput) -> Result<Employee> {
    let result = sqlx::query("INSERT INTO employees (name, role) VALUES (?, ?)")
        .bind(&input.name)
        .bind(&input.role)
        .execute(pool)
        .await
        .context("Failed to create employee")?;

    Ok(Employee {
        id: result.last_insert_id() as i64,
        name: input.name,
        role: input.role,
    })
}

async fn replace_mysql(pool: &MySqlPool, id: i64, input: EmployeeInput) -> Result<Employee> {
    sqlx::query("UPDATE employees SET name = ?, role = ? WHERE id = ?")
        .bind(&input.name)
        .bind(&input.role)
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to replace employee")?;

    Ok(Employee {
        id,
        name: input.name,
        role: input.role,
    })
}

async fn delete_mysql(pool: &MySqlPool, id: i64) -> Result<bool> {
    let result = sqlx::query("DELETE FROM employees WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await
        .context("Failed to delete employee")?;
    Ok(result.rows_affected() > 0)
}

fn row_to_employee_mysql(row: &sqlx::mysql::MySqlRow) -> Result<Employee> {
    Ok(Employee {
        id: row.get("id"),
        name: row.get("name"),
        role: row.get("role"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_test_pool, migrations};

    async fn setup_test_repo() -> SqlxEmployeeRepository {
        let pool = create_test_pool().await.expect("Failed to create test pool");
        migrations::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");
        SqlxEmployeeRepository::new(pool)
    }

    fn input(name: &str, role: &str) -> EmployeeInput {
        EmployeeInput {
            name: name.to_string(),
            role: role.to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_assigns_id() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Ana", "Engineer")).await.expect("create");
        assert!(created.id > 0);
        assert_eq!(created.name, "Ana");
        assert_eq!(created.role, "Engineer");
    }

    #[tokio::test]
    async fn test_get_by_id_round_trip() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Ana", "Engineer")).await.expect("create");
        let found = repo
            .get_by_id(created.id)
            .await
            .expect("get")
            .expect("employee should exist");
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

        let a = repo.create(input("Ana", "Engineer")).await.unwrap();
        let b = repo.create(input("Ben", "Designer")).await.unwrap();

        let all = repo.list().await.expect("list");
        assert_eq!(all, vec![a, b]);
    }

    #[tokio::test]
    async fn test_replace_overwrites_all_fields() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Ana", "Engineer")).await.unwrap();
        let replaced = repo
            .replace(created.id, input("Ana", "Staff Engineer"))
            .await
            .expect("replace");

        let found = repo.get_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(found, replaced);
        assert_eq!(found.role, "Staff Engineer");
    }

    #[tokio::test]
    async fn test_delete_reports_existence() {
        let repo = setup_test_repo().await;

        let created = repo.create(input("Ana", "Engineer")).await.unwrap();
        assert!(repo.delete(created.id).await.expect("delete"));
        assert!(!repo.delete(created.id).await.expect("second delete"));
    }
}
