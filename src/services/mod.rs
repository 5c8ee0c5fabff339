pub mod send_service;
pub mod check_service;
pub mod dispatch_service;
pub mod script_service;
