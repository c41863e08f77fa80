pub mod routes;
pub mod validation;
