//! Error types for the gatesim logic simulator.
//!
//! Organized by phase: wiring (graph construction), component evaluation,
//! and propagation. Malformed graphs are rejected when they are built;
//! the only runtime failures are component errors and exhausted
//! propagation budgets on non-converging feedback.

use std::error::Error;
use std::fmt;

use crate::id::{ComponentId, ConnectionId, SocketId};
use crate::socket::SocketKind;

/// Errors from graph construction: creating connections and looking up sockets.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WiringError {
    /// The socket ID does not exist on this board.
    UnknownSocket(SocketId),
    /// The component ID does not exist on this board.
    UnknownComponent(ComponentId),
    /// A connection was requested with no member sockets.
    EmptyConnection,
    /// The socket is already wired into a connection.
    AlreadyWired {
        /// The socket being wired.
        socket: SocketId,
        /// The connection it already belongs to.
        connection: ConnectionId,
    },
    /// The same socket was listed twice in one connection.
    DuplicateMember(SocketId),
    /// A component has no socket at the requested position.
    NoSuchSocket {
        /// The component that was queried.
        component: ComponentId,
        /// Restricts the lookup to one direction; `None` means the full layout.
        kind: Option<SocketKind>,
        /// The requested position.
        index: usize,
    },
    /// The board already holds `u32::MAX` items of this kind.
    CapacityExceeded {
        /// What ran out: `"socket"`, `"component"` or `"connection"`.
        what: &'static str,
    },
}

impl fmt::Display for WiringError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownSocket(id) => write!(f, "unknown socket {id}"),
            Self::UnknownComponent(id) => write!(f, "unknown component {id}"),
            Self::EmptyConnection => write!(f, "connection has no member sockets"),
            Self::AlreadyWired { socket, connection } => {
                write!(f, "socket {socket} is already wired into {connection}")
            }
            Self::DuplicateMember(id) => {
                write!(f, "socket {id} listed more than once in a connection")
            }
            Self::NoSuchSocket {
                component,
                kind,
                index,
            } => match kind {
                Some(kind) => write!(f, "component {component} has no {kind} #{index}"),
                None => write!(f, "component {component} has no socket #{index}"),
            },
            Self::CapacityExceeded { what } => write!(f, "{what} count exceeds u32::MAX"),
        }
    }
}

impl Error for WiringError {}

/// Errors raised by a component's `update` function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ComponentError {
    /// The component was evaluated against a socket layout it was not built for.
    ArityMismatch {
        /// Inputs the component requires.
        expected_inputs: usize,
        /// Outputs the component requires.
        expected_outputs: usize,
        /// Inputs actually supplied.
        inputs: usize,
        /// Outputs actually supplied.
        outputs: usize,
    },
    /// An input position outside the supplied inputs was read.
    InputOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of inputs supplied.
        count: usize,
    },
    /// An output position outside the supplied outputs was accessed.
    OutputOutOfRange {
        /// The requested position.
        index: usize,
        /// Number of outputs supplied.
        count: usize,
    },
    /// A user-defined component failed.
    Failed {
        /// Human-readable description of the failure.
        reason: String,
    },
}

impl fmt::Display for ComponentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ArityMismatch {
                expected_inputs,
                expected_outputs,
                inputs,
                outputs,
            } => write!(
                f,
                "arity mismatch: expected {expected_inputs} in / {expected_outputs} out, \
                 got {inputs} in / {outputs} out"
            ),
            Self::InputOutOfRange { index, count } => {
                write!(f, "input #{index} out of range ({count} inputs)")
            }
            Self::OutputOutOfRange { index, count } => {
                write!(f, "output #{index} out of range ({count} outputs)")
            }
            Self::Failed { reason } => write!(f, "component failed: {reason}"),
        }
    }
}

impl Error for ComponentError {}

/// Errors from a propagation chain.
///
/// A propagation chain starts at one state change and runs until no
/// socket changes further. When it fails, sockets already committed
/// keep their new values; the graph is not rolled back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropagationError {
    /// A component's `update` returned an error.
    ComponentFailed {
        /// The failing component.
        component: ComponentId,
        /// Its label, for reporting.
        name: String,
        /// The underlying component error.
        reason: ComponentError,
    },
    /// Recursive propagation nested deeper than the configured limit.
    DepthExceeded {
        /// The configured `max_depth`.
        limit: usize,
    },
    /// The chain committed more socket changes than the configured budget,
    /// which means the feedback network does not settle.
    Diverged {
        /// The configured `max_changes`.
        budget: u64,
    },
    /// The socket ID does not exist on this board.
    UnknownSocket(SocketId),
    /// The component ID does not exist on this board.
    UnknownComponent(ComponentId),
    /// The connection ID does not exist on this board.
    UnknownConnection(ConnectionId),
}

impl fmt::Display for PropagationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ComponentFailed {
                component,
                name,
                reason,
            } => write!(f, "component '{name}' ({component}) failed: {reason}"),
            Self::DepthExceeded { limit } => {
                write!(f, "propagation exceeded max depth {limit}")
            }
            Self::Diverged { budget } => write!(
                f,
                "propagation did not settle within {budget} socket changes"
            ),
            Self::UnknownSocket(id) => write!(f, "unknown socket {id}"),
            Self::UnknownComponent(id) => write!(f, "unknown component {id}"),
            Self::UnknownConnection(id) => write!(f, "unknown connection {id}"),
        }
    }
}

impl Error for PropagationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ComponentFailed { reason, .. } => Some(reason),
            _ => None,
        }
    }
}
