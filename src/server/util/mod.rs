//! Request extraction, response building and field validation helpers shared by
//! controllers and services.

pub mod extract;
pub mod response;
pub mod validate;
