//! Board and propagation engine for the gatesim logic simulator.
//!
//! Provides the [`Board`] that owns the component/socket/connection
//! graph, drives per-tick polling of interactive components, and runs
//! zero-delay propagation of socket state changes to a fixed point.
//! Propagation is either recursive (call-stack driven) or queued
//! (breadth-first work queue); see [`PropagationMode`].

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod board;
pub mod config;
pub mod graph;
pub mod metrics;
mod propagate;
pub mod render;

pub use board::{Board, BoardError};
pub use config::{BoardConfig, ConfigError, PropagationMode};
pub use graph::Connection;
pub use metrics::{PropagationStats, StepMetrics};
pub use render::{Canvas, ComponentView, ConnectionView, RenderStyle, Rgb, SocketView};
