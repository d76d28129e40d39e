//! Serverless placement (cloud + region) for newly created indexes.
//!
//! The placement is normally derived from an environment identifier of the
//! form `<region>-<cloud>`, e.g. `us-east-1-aws`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_ENVIRONMENT: &str = "us-east-1-aws";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    #[default]
    Aws,
    Gcp,
    Azure,
}

impl fmt::Display for Cloud {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cloud::Aws => write!(f, "aws"),
            Cloud::Gcp => write!(f, "gcp"),
            Cloud::Azure => write!(f, "azure"),
        }
    }
}

impl FromStr for Cloud {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(Cloud::Aws),
            "gcp" => Ok(Cloud::Gcp),
            "azure" => Ok(Cloud::Azure),
            _ => Err(format!("Unknown cloud: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerlessSpec {
    pub cloud: Cloud,
    pub region: String,
}

impl Default for ServerlessSpec {
    fn default() -> Self {
        Self {
            cloud: Cloud::Aws,
            region: "us-east-1".to_string(),
        }
    }
}

impl ServerlessSpec {
    pub fn new(cloud: Cloud, region: impl Into<String>) -> Self {
        Self {
            cloud,
            region: region.into(),
        }
    }

    /// Splits `us-east-1-aws` into region `us-east-1` and cloud `aws`.
    /// The suffix after the last `-` must name a known cloud.
    pub fn from_environment(env: &str) -> Result<Self, String> {
        let env = env.trim();
        let (region, cloud) = env
            .rsplit_once('-')
            .ok_or_else(|| format!("Environment must look like <region>-<cloud>: {env}"))?;
        if region.is_empty() {
            return Err(format!("Environment has no region: {env}"));
        }
        Ok(Self::new(cloud.parse()?, region))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_environment_matches_default_spec() {
        let spec = ServerlessSpec::from_environment(DEFAULT_ENVIRONMENT).unwrap();
        assert_eq!(spec, ServerlessSpec::default());
    }

    #[test]
    fn test_gcp_environment() {
        let spec = ServerlessSpec::from_environment("europe-west4-gcp").unwrap();
        assert_eq!(spec.cloud, Cloud::Gcp);
        assert_eq!(spec.region, "europe-west4");
    }

    #[test]
    fn test_rejects_unknown_cloud() {
        assert!(ServerlessSpec::from_environment("us-east-1-moon").is_err());
        assert!(ServerlessSpec::from_environment("aws").is_err());
        assert!(ServerlessSpec::from_environment("-aws").is_err());
    }
}
