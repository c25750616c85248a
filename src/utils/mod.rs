pub mod date;
pub mod validator;
