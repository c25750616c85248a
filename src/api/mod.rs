pub mod employee;
pub mod response;
