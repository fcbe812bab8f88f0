pub mod analyze_form;
pub mod analyze_response;
pub mod analyze_route;
