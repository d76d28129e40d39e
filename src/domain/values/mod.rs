pub mod index_spec;
pub mod metric;
pub mod serverless;
pub mod vector_type;
