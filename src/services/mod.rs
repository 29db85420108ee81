pub mod admin_service;
pub mod candidate_service;
pub mod dashboard_service;
pub mod debounce;
pub mod export_service;
pub mod query_service;
pub mod session_service;
