pub mod analyze;
pub mod health_route;
pub mod process_route;
