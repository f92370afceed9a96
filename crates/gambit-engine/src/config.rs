//! Engine configuration.

/// Errors from [`EngineConfig::validate`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("transposition table must have at least one entry")]
    EmptyTable,

    #[error("max depth must be at least 1")]
    ZeroDepth,

    #[error("time divisor must be at least 1")]
    ZeroTimeDivisor,

    #[error("poll interval must be a power of two, got {found}")]
    BadPollInterval { found: u64 },
}

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Transposition table slots.
    pub tt_entries: usize,
    /// Hard cap on iterative deepening.
    pub max_depth: u8,
    /// Per-move budget is `remaining / time_divisor`.
    pub time_divisor: u64,
    /// Check extensions allowed along one branch.
    pub max_extensions: u32,
    pub late_move_reductions: bool,
    /// Keep the transposition table across `select_move` calls.
    pub persistent_tt: bool,
    /// Nodes between clock polls. Power of two.
    pub poll_interval: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            tt_entries: 1 << 20,
            max_depth: 50,
            time_divisor: 30,
            max_extensions: 16,
            late_move_reductions: true,
            persistent_tt: false,
            poll_interval: 1024,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tt_entries == 0 {
            return Err(ConfigError::EmptyTable);
        }
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.time_divisor == 0 {
            return Err(ConfigError::ZeroTimeDivisor);
        }
        if !self.poll_interval.is_power_of_two() {
            return Err(ConfigError::BadPollInterval {
                found: self.poll_interval,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, EngineConfig};

    #[test]
    fn default_is_valid() {
        assert_eq!(EngineConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_values() {
        let base = EngineConfig::default();
        let cases = [
            (EngineConfig { tt_entries: 0, ..base.clone() }, ConfigError::EmptyTable),
            (EngineConfig { max_depth: 0, ..base.clone() }, ConfigError::ZeroDepth),
            (EngineConfig { time_divisor: 0, ..base.clone() }, ConfigError::ZeroTimeDivisor),
            (
                EngineConfig { poll_interval: 1000, ..base.clone() },
                ConfigError::BadPollInterval { found: 1000 },
            ),
            (
                EngineConfig { poll_interval: 0, ..base },
                ConfigError::BadPollInterval { found: 0 },
            ),
        ];
        for (config, expected) in cases {
            assert_eq!(config.validate(), Err(expected));
        }
    }
}
