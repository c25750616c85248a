use std::cmp::Ordering;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::Utc;
use tracing::debug;

use super::{EmployeeRepository, OrderField, RepositoryError, SortDirection};
use crate::model::Employee;

#[derive(Default)]
struct State {
    records: Vec<Employee>,
    last_id: u64,
}

impl State {
    fn active(&self) -> impl Iterator<Item = &Employee> {
        self.records.iter().filter(|e| !e.is_deleted())
    }

    fn active_mut(&mut self, id: u64) -> Option<&mut Employee> {
        self.records
            .iter_mut()
            .find(|e| e.id == id && !e.is_deleted())
    }

    fn email_taken(&self, email: &str, except_id: u64) -> bool {
        self.active().any(|e| e.email == email && e.id != except_id)
    }
}

/// Process-local repository used by tests and local runs without MySQL.
/// Deleted records stay in storage with `deleted_at` set.
#[derive(Default)]
pub struct InMemoryEmployeeRepository {
    state: RwLock<State>,
}

impl InMemoryEmployeeRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every stored record, soft-deleted ones included, in insertion order.
    pub fn snapshot(&self) -> Vec<Employee> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .records
            .clone()
    }
}

fn compare(a: &Employee, b: &Employee, order_by: OrderField) -> Ordering {
    match order_by {
        OrderField::Id => a.id.cmp(&b.id),
        OrderField::FirstName => a.first_name.cmp(&b.first_name),
        OrderField::LastName => a.last_name.cmp(&b.last_name),
        OrderField::Email => a.email.cmp(&b.email),
        OrderField::HireDate => a.hire_date.cmp(&b.hire_date),
        OrderField::CreatedAt => a.created_at.cmp(&b.created_at),
        OrderField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
    }
}

#[async_trait]
impl EmployeeRepository for InMemoryEmployeeRepository {
    async fn store(&self, mut employee: Employee) -> Result<Employee, RepositoryError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.email_taken(&employee.email, 0) {
            return Err(RepositoryError::Conflict);
        }

        let now = Utc::now();
        state.last_id += 1;
        employee.id = state.last_id;
        employee.created_at = Some(now);
        employee.updated_at = Some(now);
        employee.deleted_at = None;

        state.records.push(employee.clone());
        debug!(employee_id = employee.id, "stored employee in memory");
        Ok(employee)
    }

    async fn find_all(
        &self,
        limit: u32,
        offset: u64,
        order_by: OrderField,
        direction: SortDirection,
    ) -> Result<(Vec<Employee>, u64), RepositoryError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        let mut active: Vec<&Employee> = state.active().collect();
        let total = active.len() as u64;

        active.sort_by(|a, b| {
            let ordering = compare(a, b, order_by);
            let ordering = match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then(a.id.cmp(&b.id))
        });

        let page = active
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(limit as usize)
            .cloned()
            .collect();

        Ok((page, total))
    }

    async fn find_by_id(&self, id: u64) -> Result<Employee, RepositoryError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .active()
            .find(|e| e.id == id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_email(&self, email: &str) -> Result<Employee, RepositoryError> {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        state
            .active()
            .find(|e| e.email == email)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn update_by_id(&self, employee: Employee) -> Result<Employee, RepositoryError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.active().all(|e| e.id != employee.id) {
            return Err(RepositoryError::NotFound);
        }
        if state.email_taken(&employee.email, employee.id) {
            return Err(RepositoryError::Conflict);
        }

        let record = state
            .active_mut(employee.id)
            .ok_or(RepositoryError::NotFound)?;
        record.first_name = employee.first_name;
        record.last_name = employee.last_name;
        record.email = employee.email;
        record.hire_date = employee.hire_date;
        record.updated_at = Some(Utc::now());

        Ok(record.clone())
    }

    async fn delete_by_id(&self, id: u64) -> Result<(), RepositoryError> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        let record = state.active_mut(id).ok_or(RepositoryError::NotFound)?;
        record.deleted_at = Some(Utc::now());
        Ok(())
    }
}
