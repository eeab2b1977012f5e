//! Network configuration

use crate::limits::DEFAULT_MAX_X;
use serde::{Deserialize, Serialize};

/// Configuration supplied when a network is created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Largest accepted x coordinate (column)
    #[serde(default = "default_max_x")]
    pub max_x: i32,

    /// Treat lowercase map symbols as antennas (folded to uppercase)
    #[serde(default)]
    pub accept_lowercase: bool,
}

fn default_max_x() -> i32 {
    DEFAULT_MAX_X
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            max_x: default_max_x(),
            accept_lowercase: false,
        }
    }
}

impl NetworkConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_x(mut self, max_x: i32) -> Self {
        self.max_x = max_x;
        self
    }

    pub fn accept_lowercase(mut self, accept: bool) -> Self {
        self.accept_lowercase = accept;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = NetworkConfig::new().with_max_x(12).accept_lowercase(true);

        assert_eq!(config.max_x, 12);
        assert!(config.accept_lowercase);
        assert_eq!(NetworkConfig::default().max_x, DEFAULT_MAX_X);
    }
}
