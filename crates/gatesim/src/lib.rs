//! Gatesim: a zero-delay digital logic simulator.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all gatesim sub-crates. For most users, adding `gatesim` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use gatesim::prelude::*;
//!
//! let mut board = Board::new(BoardConfig::default()).unwrap();
//! let switch = board.create(Switch::new().at(100.0, 100.0)).unwrap();
//! let not = board.create(Gate::not().at(200.0, 100.0)).unwrap();
//! let wire = [board.output(switch, 0).unwrap(), board.input(not, 0).unwrap()];
//! board.connect(&wire).unwrap();
//! board.add_components(&[switch, not]).unwrap();
//!
//! let out = board.output(not, 0).unwrap();
//! assert_eq!(board.socket_state(out), Some(true));
//!
//! // Click the switch: one tick pressed over it, one released.
//! board.step(&mut PointerState::new(120.0, 120.0, true)).unwrap();
//! board.step(&mut PointerState::new(120.0, 120.0, false)).unwrap();
//! assert_eq!(board.socket_state(out), Some(false));
//! assert_eq!(board.current_tick(), TickId(2));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `gatesim-core` | IDs, sockets, geometry, input, errors, core traits |
//! | [`components`] | `gatesim-components` | Logic gates, button, switch |
//! | [`engine`] | `gatesim-engine` | Board, propagation, metrics, render pass |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`gatesim-core`).
///
/// Contains sockets, placement geometry, input sampling, error types, and
/// the [`types::Component`] and [`types::Interactive`] traits.
pub use gatesim_core as types;

/// Built-in components (`gatesim-components`).
///
/// [`components::Gate`] covers every [`components::GateKind`];
/// [`components::Button`] and [`components::Switch`] are the interactive
/// sources.
pub use gatesim_components as components;

/// Board and propagation engine (`gatesim-engine`).
///
/// [`engine::Board`] owns the graph and drives ticks;
/// [`engine::Canvas`] is the drawing seam.
pub use gatesim_engine as engine;

/// Common imports for typical gatesim usage.
///
/// ```rust
/// use gatesim::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use gatesim_core::{
        Component, ComponentId, ConnectionId, InputSample, InputSampler, Interactive, Placement,
        Point, PointerState, Rect, SocketId, SocketKind, TickId, UpdateContext,
    };

    // Errors
    pub use gatesim_core::{ComponentError, PropagationError, WiringError};

    // Components
    pub use gatesim_components::{Button, Gate, GateKind, Switch};

    // Engine
    pub use gatesim_engine::{
        Board, BoardConfig, BoardError, Canvas, ComponentView, ConfigError, ConnectionView,
        PropagationMode, PropagationStats, RenderStyle, Rgb, SocketView, StepMetrics,
    };
}
