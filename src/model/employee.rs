use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Persisted employee row. `deleted_at` is the soft-delete marker; a set value
/// hides the record from every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Employee {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub hire_date: NaiveDate,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Employee {
    /// Builds an unsaved record; the repository assigns id and timestamps.
    pub fn new(first_name: String, last_name: String, email: String, hire_date: NaiveDate) -> Self {
        Self {
            id: 0,
            first_name,
            last_name,
            email,
            hire_date,
            created_at: None,
            updated_at: None,
            deleted_at: None,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct EmployeeRequest {
    #[schema(example = "John")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    #[schema(example = "john.doe@company.com", format = "email")]
    pub email: String,
    #[schema(example = "2024-01-01", format = "date")]
    pub hire_date: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[schema(
    example = json!({
        "id": 1,
        "first_name": "John",
        "last_name": "Doe",
        "email": "john.doe@company.com",
        "hire_date": "2024-01-01",
        "created_at": "2024-01-02T08:00:00Z",
        "updated_at": "2024-01-02T08:00:00Z"
    })
)]
pub struct EmployeeResponse {
    #[schema(example = 1)]
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[schema(value_type = String, format = "date")]
    pub hire_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<String>, format = "date-time")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<Employee> for EmployeeResponse {
    fn from(employee: Employee) -> Self {
        Self {
            id: employee.id,
            first_name: employee.first_name,
            last_name: employee.last_name,
            email: employee.email,
            hire_date: employee.hire_date,
            created_at: employee.created_at,
            updated_at: employee.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PaginationResponse {
    #[schema(example = 1)]
    pub page_number: u32,
    #[schema(example = 20)]
    pub page_size: u32,
    #[schema(example = 3)]
    pub total_page: u64,
    pub data: Vec<EmployeeResponse>,
}
