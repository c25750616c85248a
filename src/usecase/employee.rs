use std::sync::Arc;

use tracing::{debug, info};

use crate::model::{Employee, EmployeeRequest, EmployeeResponse, PaginationResponse};
use crate::repository::{EmployeeRepository, OrderField, RepositoryError, SortDirection};
use crate::utils::date::parse_date;
use crate::utils::validator::{ValidationError, validate_and_sanitize};

#[derive(Debug, thiserror::Error)]
pub enum UsecaseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("invalid date format")]
    InvalidDate,
    #[error("duplicate email")]
    DuplicateEmail,
    #[error("page number and page size must be at least 1")]
    InvalidPagination,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl UsecaseError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, UsecaseError::Repository(RepositoryError::NotFound))
    }
}

// A uniqueness violation raised by the store itself means another writer won
// the race between the email lookup and the write.
fn conflict_as_duplicate(err: RepositoryError) -> UsecaseError {
    match err {
        RepositoryError::Conflict => UsecaseError::DuplicateEmail,
        other => UsecaseError::Repository(other),
    }
}

/// `ceil(count / page_size)`; zero records give zero pages.
pub fn total_pages(count: u64, page_size: u32) -> u64 {
    let page_size = u64::from(page_size.max(1));
    count / page_size + u64::from(count % page_size != 0)
}

/// Employee business rules on top of an [`EmployeeRepository`]. Holds no
/// state of its own between calls.
pub struct EmployeeUsecase {
    repository: Arc<dyn EmployeeRepository>,
}

impl EmployeeUsecase {
    pub fn new(repository: Arc<dyn EmployeeRepository>) -> Self {
        Self { repository }
    }

    fn prepare(request: &mut EmployeeRequest) -> Result<chrono::NaiveDate, UsecaseError> {
        validate_and_sanitize(request)?;

        parse_date(&request.hire_date).map_err(|e| {
            debug!(error = %e, hire_date = %request.hire_date, "failed to parse hire date");
            UsecaseError::InvalidDate
        })
    }

    /// Looks up the active holder of `email`; not-found is not an error here.
    async fn email_holder(&self, email: &str) -> Result<Option<Employee>, UsecaseError> {
        match self.repository.find_by_email(email).await {
            Ok(employee) => Ok(Some(employee)),
            Err(RepositoryError::NotFound) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn create_employee(
        &self,
        mut request: EmployeeRequest,
    ) -> Result<EmployeeResponse, UsecaseError> {
        let hire_date = Self::prepare(&mut request)?;

        if self.email_holder(&request.email).await?.is_some() {
            return Err(UsecaseError::DuplicateEmail);
        }

        let employee = Employee::new(
            request.first_name,
            request.last_name,
            request.email,
            hire_date,
        );

        let stored = self
            .repository
            .store(employee)
            .await
            .map_err(conflict_as_duplicate)?;

        info!(employee_id = stored.id, "successfully created employee");
        Ok(stored.into())
    }

    /// `page` is 1-based. An empty table yields an empty page, not an error.
    pub async fn get_all_employee(
        &self,
        page: u32,
        page_size: u32,
        order_by: OrderField,
        direction: SortDirection,
    ) -> Result<PaginationResponse, UsecaseError> {
        if page == 0 || page_size == 0 {
            return Err(UsecaseError::InvalidPagination);
        }

        let offset = u64::from(page - 1) * u64::from(page_size);
        let (employees, count) = self
            .repository
            .find_all(page_size, offset, order_by, direction)
            .await?;

        Ok(PaginationResponse {
            page_number: page,
            page_size,
            total_page: total_pages(count, page_size),
            data: employees.into_iter().map(EmployeeResponse::from).collect(),
        })
    }

    pub async fn get_employee_by_id(&self, id: u64) -> Result<EmployeeResponse, UsecaseError> {
        let employee = self.repository.find_by_id(id).await?;

        Ok(employee.into())
    }

    /// The duplicate decision is gated on the id of the email holder; the
    /// record being updated may hold its own email.
    pub async fn update_employee_by_id(
        &self,
        id: u64,
        mut request: EmployeeRequest,
    ) -> Result<EmployeeResponse, UsecaseError> {
        let hire_date = Self::prepare(&mut request)?;

        let existing = self.repository.find_by_id(id).await?;

        if let Some(holder) = self.email_holder(&request.email).await? {
            if holder.id != id {
                debug!(employee_id = id, holder_id = holder.id, "email held by another employee");
                return Err(UsecaseError::DuplicateEmail);
            }
        }

        let employee = Employee {
            id,
            first_name: request.first_name,
            last_name: request.last_name,
            email: request.email,
            hire_date,
            ..existing
        };

        let updated = self
            .repository
            .update_by_id(employee)
            .await
            .map_err(conflict_as_duplicate)?;

        info!(employee_id = updated.id, "successfully updated employee");
        Ok(updated.into())
    }

    pub async fn delete_employee_by_id(&self, id: u64) -> Result<(), UsecaseError> {
        self.repository.delete_by_id(id).await?;

        info!(employee_id = id, "successfully deleted employee");
        Ok(())
    }
}
