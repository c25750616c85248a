use async_trait::async_trait;
use strum::{AsRefStr, Display, EnumString};

use crate::model::Employee;

pub mod memory;
pub mod mysql;

pub use memory::InMemoryEmployeeRepository;
pub use mysql::MySqlEmployeeRepository;

/// Columns a listing may be ordered by. The string form is the column name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr)]
pub enum OrderField {
    #[strum(serialize = "id")]
    Id,
    #[strum(serialize = "first_name")]
    FirstName,
    #[strum(serialize = "last_name")]
    LastName,
    #[strum(serialize = "email")]
    Email,
    #[strum(serialize = "hire_date")]
    HireDate,
    #[default]
    #[strum(serialize = "created_at")]
    CreatedAt,
    #[strum(serialize = "updated_at")]
    UpdatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, Display, AsRefStr)]
pub enum SortDirection {
    #[strum(serialize = "ASC")]
    Asc,
    #[default]
    #[strum(serialize = "DESC")]
    Desc,
}

#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record not found")]
    NotFound,
    #[error("record conflicts with an existing active record")]
    Conflict,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Persistence operations for employees. Soft-deleted rows are invisible to
/// every read and cannot be updated or deleted again.
#[async_trait]
pub trait EmployeeRepository: Send + Sync {
    /// Inserts a new record and returns it with id and timestamps assigned.
    async fn store(&self, employee: Employee) -> Result<Employee, RepositoryError>;

    /// One page of active records plus the total number of active records.
    async fn find_all(
        &self,
        limit: u32,
        offset: u64,
        order_by: OrderField,
        direction: SortDirection,
    ) -> Result<(Vec<Employee>, u64), RepositoryError>;

    async fn find_by_id(&self, id: u64) -> Result<Employee, RepositoryError>;

    async fn find_by_email(&self, email: &str) -> Result<Employee, RepositoryError>;

    /// Replaces every mutable field of the active record with `employee.id`.
    async fn update_by_id(&self, employee: Employee) -> Result<Employee, RepositoryError>;

    async fn delete_by_id(&self, id: u64) -> Result<(), RepositoryError>;
}
