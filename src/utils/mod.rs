pub mod crypto;
pub mod sanitize;
pub mod time;
pub mod token;
pub mod validation;
