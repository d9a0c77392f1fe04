//! CI configuration from TOML (`[ci]` section)
//!
//! ```toml
//! [ci]
//! env = { DISPLAY = ":99" }
//!
//! [[ci.suites]]
//! name = "spec"
//! command = "bundle exec rspec"
//! ```

use agora_application::{CiConfig, TestSuite};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw CI configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCiConfig {
    pub suites: Vec<TestSuite>,
    pub env: BTreeMap<String, String>,
}

impl Default for FileCiConfig {
    fn default() -> Self {
        let defaults = CiConfig::default();
        Self {
            suites: defaults.suites,
            env: defaults.env,
        }
    }
}

impl FileCiConfig {
    pub fn to_ci_config(&self) -> CiConfig {
        CiConfig {
            suites: self.suites.clone(),
            env: self.env.clone(),
        }
    }
}
