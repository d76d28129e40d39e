mod embed;
pub mod manage_index;
pub mod query;
pub mod upload;
