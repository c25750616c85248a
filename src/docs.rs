use crate::model::{EmployeeRequest, EmployeeResponse, PaginationResponse};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Employee Service API",
        version = "1.0.0",
        description = r#"
## Employee records

Create, list, fetch, update and soft-delete employees.

### Rules
- First and last names may only contain ASCII letters and spaces; they are
  trimmed and title-cased (`"re  za"` becomes `"Re Za"`).
- `hire_date` must be `YYYY-MM-DD`.
- An email may belong to at most one active employee.
- Deleted employees disappear from every read.

### Response Format
Every body is wrapped as `{code, message, data, serverTime}` where
`serverTime` is epoch milliseconds.
"#,
    ),
    paths(
        crate::api::employee::create_employee,
        crate::api::employee::list_employees,
        crate::api::employee::get_employee,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee
    ),
    components(
        schemas(
            EmployeeRequest,
            EmployeeResponse,
            PaginationResponse
        )
    ),
    tags(
        (name = "Employee", description = "Employee management APIs"),
    )
)]
pub struct ApiDoc;
