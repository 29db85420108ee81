pub mod admin_dto;
pub mod candidate_dto;
