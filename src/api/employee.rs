use actix_web::{HttpResponse, web};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::{
    api::response,
    config::Config,
    error::ApiError,
    model::{EmployeeRequest, EmployeeResponse, PaginationResponse},
    repository::{OrderField, SortDirection},
    usecase::EmployeeUsecase,
};

#[derive(Debug, Deserialize)]
pub struct EmployeeQuery {
    #[serde(rename = "pageNum")]
    pub page_num: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
    #[serde(rename = "orderBy")]
    pub order_by: Option<String>,
    pub sort: Option<String>,
}

/// Positive integer from a query value; absent or empty means `default`.
fn parse_positive(value: Option<&str>, default: u32) -> Option<u32> {
    match value {
        None | Some("") => Some(default),
        Some(raw) => raw.parse::<u32>().ok().filter(|n| *n >= 1),
    }
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    match raw.parse::<u64>() {
        Ok(id) if id >= 1 => Ok(id),
        _ => Err(ApiError::invalid_id()),
    }
}

/// Create Employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = EmployeeRequest,
    responses(
        (status = 201, description = "Employee created", body = EmployeeResponse),
        (status = 400, description = "Validation failed, invalid date or duplicate email", body = Object, example = json!({
            "code": "Bad Request",
            "message": "duplicate email",
            "serverTime": 1709424000000_i64
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "create_employee", skip(usecase, payload))]
pub async fn create_employee(
    usecase: web::Data<EmployeeUsecase>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, ApiError> {
    let employee = usecase
        .create_employee(payload.into_inner())
        .await
        .map_err(|e| ApiError::from_usecase(e, None))?;

    Ok(response::created("Successfully create new employee", employee))
}

/// List Employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(
        ("pageNum" = Option<u32>, Query, description = "Page number, starting at 1 (default 1)"),
        ("pageSize" = Option<u32>, Query, description = "Items per page (default 20)"),
        ("orderBy" = Option<String>, Query, description = "id, first_name, last_name, email, hire_date, created_at or updated_at (default created_at)"),
        ("sort" = Option<String>, Query, description = "ASC or DESC (default DESC)")
    ),
    responses(
        (status = 200, description = "Paginated employee list", body = PaginationResponse),
        (status = 400, description = "Invalid page number or page size"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "list_employees", skip(usecase, config))]
pub async fn list_employees(
    usecase: web::Data<EmployeeUsecase>,
    config: web::Data<Config>,
    query: web::Query<EmployeeQuery>,
) -> Result<HttpResponse, ApiError> {
    let page = parse_positive(query.page_num.as_deref(), 1)
        .ok_or_else(|| ApiError::BadRequest("invalid page num".to_string()))?;
    let page_size = parse_positive(query.page_size.as_deref(), config.default_page_size)
        .ok_or_else(|| ApiError::BadRequest("invalid page size".to_string()))?;

    // unknown ordering falls back to the defaults rather than failing
    let order_by = query
        .order_by
        .as_deref()
        .and_then(|v| v.parse::<OrderField>().ok())
        .unwrap_or_default();
    let direction = query
        .sort
        .as_deref()
        .and_then(|v| v.parse::<SortDirection>().ok())
        .unwrap_or_default();

    let employees = usecase
        .get_all_employee(page, page_size, order_by, direction)
        .await
        .map_err(|e| ApiError::from_usecase(e, None))?;

    Ok(response::ok("Successfully get all employee data", employees))
}

/// Get Employee by ID
#[utoipa::path(
    get,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee found", body = EmployeeResponse),
        (status = 400, description = "Non-numeric or non-positive id"),
        (status = 404, description = "Employee not found", body = Object, example = json!({
            "code": "Not Found",
            "message": "employee with id 7 not found",
            "serverTime": 1709424000000_i64
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "get_employee", skip(usecase))]
pub async fn get_employee(
    usecase: web::Data<EmployeeUsecase>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    let employee = usecase
        .get_employee_by_id(id)
        .await
        .map_err(|e| ApiError::from_usecase(e, Some(id)))?;

    Ok(response::ok(
        format!("Successfully get data for employee id {id}"),
        employee,
    ))
}

/// Update Employee
#[utoipa::path(
    put,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    request_body = EmployeeRequest,
    responses(
        (status = 200, description = "Employee updated", body = EmployeeResponse),
        (status = 400, description = "Invalid id, validation failed, invalid date or duplicate email"),
        (status = 404, description = "Employee not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "update_employee", skip(usecase, payload))]
pub async fn update_employee(
    usecase: web::Data<EmployeeUsecase>,
    path: web::Path<String>,
    payload: web::Json<EmployeeRequest>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    let employee = usecase
        .update_employee_by_id(id, payload.into_inner())
        .await
        .map_err(|e| ApiError::from_usecase(e, Some(id)))?;

    Ok(response::ok(
        format!("Successfully update data for employee id {id}"),
        employee,
    ))
}

/// Delete Employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(
        ("id", Path, description = "Employee ID")
    ),
    responses(
        (status = 200, description = "Employee soft-deleted"),
        (status = 400, description = "Non-numeric or non-positive id"),
        (status = 404, description = "Employee not found or already deleted"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Employee"
)]
#[instrument(name = "delete_employee", skip(usecase))]
pub async fn delete_employee(
    usecase: web::Data<EmployeeUsecase>,
    path: web::Path<String>,
) -> Result<HttpResponse, ApiError> {
    let id = parse_id(&path)?;

    usecase
        .delete_employee_by_id(id)
        .await
        .map_err(|e| ApiError::from_usecase(e, Some(id)))?;

    Ok(response::ok_message(format!(
        "Successfully delete data for employee id {id}"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_values_default_when_absent_or_empty() {
        assert_eq!(parse_positive(None, 20), Some(20));
        assert_eq!(parse_positive(Some(""), 20), Some(20));
        assert_eq!(parse_positive(Some("3"), 20), Some(3));
    }

    #[test]
    fn page_values_must_be_positive_integers() {
        assert_eq!(parse_positive(Some("0"), 20), None);
        assert_eq!(parse_positive(Some("-1"), 20), None);
        assert_eq!(parse_positive(Some("two"), 20), None);
    }

    #[test]
    fn ids_must_be_positive_integers() {
        assert_eq!(parse_id("7").unwrap(), 7);
        for raw in ["0", "-3", "abc", "1.5", ""] {
            assert!(parse_id(raw).is_err(), "{raw:?} should be rejected");
        }
    }
}
