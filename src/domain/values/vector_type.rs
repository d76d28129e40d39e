use serde::{Deserialize, Serialize};
use std::fmt;

/// Only dense indexes are created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum VectorType {
    #[default]
    Dense,
}

impl fmt::Display for VectorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VectorType::Dense => write!(f, "dense"),
        }
    }
}
