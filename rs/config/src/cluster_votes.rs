use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::kmeans::KMeansConfig;

/// Numeric value each roll-call answer contributes to a senator's vote history.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct VoteValueConfig {
    /// Default: 1.0
    pub yea: f64,
    /// Default: -1.0
    pub nay: f64,
    /// Default: 0.0
    pub not_voting: f64,
}

impl Default for VoteValueConfig {
    fn default() -> Self {
        Self {
            yea: 1.0,
            nay: -1.0,
            not_voting: 0.0,
        }
    }
}

impl VoteValueConfig {
    /// Maps the vote column of a roll-call file to its numeric value.
    pub fn value_of(&self, vote: &str) -> Option<f64> {
        match vote {
            "Yea" => Some(self.yea),
            "Nay" => Some(self.nay),
            "Not Voting" => Some(self.not_voting),
            _ => None,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct ClusterVotesConfig {
    pub kmeans: KMeansConfig,
    pub vote_values: VoteValueConfig,
}

impl ClusterVotesConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse cluster votes config")
    }

    pub fn load_yaml<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }
}
