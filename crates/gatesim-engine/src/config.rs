//! Board configuration, validation, and error types.
//!
//! [`BoardConfig`] is the builder-input for constructing a [`Board`](crate::Board).
//! [`validate()`](BoardConfig::validate) checks its invariants; the board
//! constructor calls it before accepting the config.

use std::error::Error;
use std::fmt;

// ── PropagationMode ────────────────────────────────────────────────

/// How a state change reaches the rest of the graph.
///
/// Both modes apply the same equality guards at sockets and connections
/// and reach the same fixed point on stabilizing networks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PropagationMode {
    /// Depth-first on the call stack: each committed change notifies its
    /// listeners before the committing call returns.
    #[default]
    Recursive,
    /// Breadth-first through a FIFO work queue: a committed change enqueues
    /// its notifications. Stack depth stays constant regardless of graph
    /// depth.
    Queued,
}

impl fmt::Display for PropagationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recursive => write!(f, "recursive"),
            Self::Queued => write!(f, "queued"),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`BoardConfig::validate()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// `max_depth` is zero, which would reject every propagation.
    ZeroDepth,
    /// `max_changes` is zero, which would reject every state change.
    ZeroChangeBudget,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroDepth => write!(f, "max_depth must be at least 1"),
            Self::ZeroChangeBudget => write!(f, "max_changes must be at least 1"),
        }
    }
}

impl Error for ConfigError {}

// ── BoardConfig ────────────────────────────────────────────────────

/// Configuration for a [`Board`](crate::Board).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BoardConfig {
    /// Propagation strategy. Default: [`PropagationMode::Recursive`].
    pub mode: PropagationMode,
    /// Deepest nesting of component updates a recursive propagation may
    /// reach before it fails with `DepthExceeded`. The seed's update is
    /// level 1 and each update it triggers is one deeper, so a chain of N
    /// gates needs N. Recursion runs on the caller's stack; use queued
    /// mode for deeper circuits. Ignored in queued mode. Default: 512.
    pub max_depth: usize,
    /// Socket changes one propagation may commit before it fails with
    /// `Diverged`. Default: 1,000,000.
    pub max_changes: u64,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            mode: PropagationMode::Recursive,
            max_depth: 512,
            max_changes: 1_000_000,
        }
    }
}

impl BoardConfig {
    /// Default limits with the queued strategy.
    pub fn queued() -> Self {
        Self {
            mode: PropagationMode::Queued,
            ..Self::default()
        }
    }

    /// Validate all invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_depth == 0 {
            return Err(ConfigError::ZeroDepth);
        }
        if self.max_changes == 0 {
            return Err(ConfigError::ZeroChangeBudget);
        }
        Ok(())
    }
}
