use sqlx::MySqlPool;
use tracing::info;

// `active_email` is NULL once a row is soft-deleted, so the unique index only
// constrains live employees. Both email columns use a binary collation: lookups
// and the unique index compare exact bytes, not case- or accent-folded text.
const CREATE_EMPLOYEES: &str = r#"
CREATE TABLE IF NOT EXISTS employees (
    id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
    first_name VARCHAR(255) NOT NULL,
    last_name VARCHAR(255) NOT NULL,
    email VARCHAR(255) COLLATE utf8mb4_bin NOT NULL,
    hire_date DATE NOT NULL,
    created_at TIMESTAMP(6) NULL,
    updated_at TIMESTAMP(6) NULL,
    deleted_at TIMESTAMP(6) NULL,
    active_email VARCHAR(255) COLLATE utf8mb4_bin GENERATED ALWAYS AS (IF(deleted_at IS NULL, email, NULL)) STORED,
    INDEX idx_employees_email (email),
    INDEX idx_employees_hire_date (hire_date),
    INDEX idx_employees_deleted_at (deleted_at),
    UNIQUE INDEX uq_employees_active_email (active_email)
)
"#;

pub async fn init_db(database_url: &str) -> Result<MySqlPool, sqlx::Error> {
    MySqlPool::connect(database_url).await
}

/// Creates the employees table when it does not exist yet.
pub async fn migrate(pool: &MySqlPool) -> Result<(), sqlx::Error> {
    info!("migrating database...");
    sqlx::query(CREATE_EMPLOYEES).execute(pool).await?;
    Ok(())
}
