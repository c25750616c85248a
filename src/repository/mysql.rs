use async_trait::async_trait;
use chrono::{DateTime, SubsecRound, Utc};
use sqlx::MySqlPool;
use tracing::debug;

use super::{EmployeeRepository, OrderField, RepositoryError, SortDirection};
use crate::model::Employee;

const COLUMNS: &str =
    "id, first_name, last_name, email, hire_date, created_at, updated_at, deleted_at";

/// SQLSTATE for integrity constraint violations (duplicate active email).
const INTEGRITY_VIOLATION: &str = "23000";

pub struct MySqlEmployeeRepository {
    pool: MySqlPool,
}

impl MySqlEmployeeRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

fn map_write_error(err: sqlx::Error) -> RepositoryError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some(INTEGRITY_VIOLATION) {
            return RepositoryError::Conflict;
        }
    }
    RepositoryError::Database(err)
}

/// ORDER BY body for a listing. Both parts come from closed enums, never from
/// raw input; `id` breaks ties so paging is stable.
fn order_clause(order_by: OrderField, direction: SortDirection) -> String {
    match order_by {
        OrderField::Id => format!("id {}", direction.as_ref()),
        _ => format!("{} {}, id ASC", order_by.as_ref(), direction.as_ref()),
    }
}

// TIMESTAMP(6) columns keep microseconds; truncating here keeps the returned
// record equal to what a later read yields.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

#[async_trait]
impl EmployeeRepository for MySqlEmployeeRepository {
    async fn store(&self, mut employee: Employee) -> Result<Employee, RepositoryError> {
        let now = now();

        let result = sqlx::query(
            r#"
            INSERT INTO employees
            (first_name, last_name, email, hire_date, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.hire_date)
        .bind(now)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        employee.id = result.last_insert_id();
        employee.created_at = Some(now);
        employee.updated_at = Some(now);
        employee.deleted_at = None;

        debug!(employee_id = employee.id, "Inserted employee");
        Ok(employee)
    }

    async fn find_all(
        &self,
        limit: u32,
        offset: u64,
        order_by: OrderField,
        direction: SortDirection,
    ) -> Result<(Vec<Employee>, u64), RepositoryError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM employees WHERE deleted_at IS NULL",
        )
        .fetch_one(&self.pool)
        .await?;

        let data_sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE deleted_at IS NULL \
             ORDER BY {} LIMIT ? OFFSET ?",
            order_clause(order_by, direction),
        );
        debug!(sql = %data_sql, limit, offset, "Fetching employees");

        let employees = sqlx::query_as::<_, Employee>(&data_sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok((employees, u64::try_from(total).unwrap_or_default()))
    }

    async fn find_by_id(&self, id: u64) -> Result<Employee, RepositoryError> {
        let sql = format!("SELECT {COLUMNS} FROM employees WHERE id = ? AND deleted_at IS NULL");

        sqlx::query_as::<_, Employee>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Employee, RepositoryError> {
        let sql = format!(
            "SELECT {COLUMNS} FROM employees WHERE email = ? AND deleted_at IS NULL LIMIT 1"
        );

        sqlx::query_as::<_, Employee>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_by_id(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE employees
            SET first_name = ?, last_name = ?, email = ?, hire_date = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            "#,
        )
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(employee.hire_date)
        .bind(now())
        .bind(employee.id)
        .execute(&self.pool)
        .await
        .map_err(map_write_error)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        self.find_by_id(employee.id).await
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), RepositoryError> {
        let result =
            sqlx::query("UPDATE employees SET deleted_at = ? WHERE id = ? AND deleted_at IS NULL")
                .bind(now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_clause_uses_column_and_direction_with_id_tiebreak() {
        let cases = [
            (OrderField::FirstName, "first_name"),
            (OrderField::LastName, "last_name"),
            (OrderField::Email, "email"),
            (OrderField::HireDate, "hire_date"),
            (OrderField::CreatedAt, "created_at"),
            (OrderField::UpdatedAt, "updated_at"),
        ];

        for (field, column) in cases {
            assert_eq!(
                order_clause(field, SortDirection::Asc),
                format!("{column} ASC, id ASC")
            );
            assert_eq!(
                order_clause(field, SortDirection::Desc),
                format!("{column} DESC, id ASC")
            );
        }
    }

    #[test]
    fn ordering_by_id_needs_no_tiebreak() {
        assert_eq!(order_clause(OrderField::Id, SortDirection::Asc), "id ASC");
        assert_eq!(order_clause(OrderField::Id, SortDirection::Desc), "id DESC");
    }

    #[test]
    fn default_listing_is_newest_first() {
        assert_eq!(
            order_clause(OrderField::default(), SortDirection::default()),
            "created_at DESC, id ASC"
        );
    }

    #[test]
    fn non_database_errors_are_not_conflicts() {
        assert!(matches!(
            map_write_error(sqlx::Error::PoolTimedOut),
            RepositoryError::Database(_)
        ));
        assert!(matches!(
            map_write_error(sqlx::Error::RowNotFound),
            RepositoryError::Database(_)
        ));
    }
}
