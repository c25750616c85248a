pub mod employee;

pub use employee::{Employee, EmployeeRequest, EmployeeResponse, PaginationResponse};
