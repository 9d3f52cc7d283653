//! Core types and traits for the gatesim logic simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions used throughout the gatesim workspace:
//! typed IDs, sockets, placement geometry, input samples, error types,
//! and the [`Component`] / [`Interactive`] traits.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod context;
pub mod error;
pub mod geometry;
pub mod id;
pub mod input;
pub mod socket;
pub mod traits;

pub use context::UpdateContext;
pub use error::{ComponentError, PropagationError, WiringError};
pub use geometry::{Placement, Point, Rect, Size};
pub use id::{ComponentId, ConnectionId, SocketId, SocketList, TickId};
pub use input::{InputSample, InputSampler, PointerState};
pub use socket::{Socket, SocketKind};
pub use traits::{Component, Interactive};
