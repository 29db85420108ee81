pub mod admin;
pub mod candidate_routes;
pub mod export;
pub mod health;
