pub mod employee;

pub use employee::{EmployeeUsecase, UsecaseError, total_pages};
