//! Sockets: typed boolean terminals owned by a component.

use std::fmt;

use crate::error::WiringError;
use crate::id::{ComponentId, ConnectionId, SocketId};

/// Direction of a socket.
///
/// Determines what a state change notifies: an input wakes its owning
/// component, an output drives its connection.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SocketKind {
    /// Driven by a connection; a change re-evaluates the owning component.
    Input,
    /// Driven by the owning component; a change broadcasts through its connection.
    Output,
}

impl SocketKind {
    /// Whether this is [`SocketKind::Input`].
    pub fn is_input(self) -> bool {
        matches!(self, Self::Input)
    }

    /// Whether this is [`SocketKind::Output`].
    pub fn is_output(self) -> bool {
        matches!(self, Self::Output)
    }
}

impl fmt::Display for SocketKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Input => write!(f, "input"),
            Self::Output => write!(f, "output"),
        }
    }
}

/// A boolean terminal belonging to exactly one component.
///
/// The owner is fixed at construction. The connection can be attached at
/// most once, during graph construction. The state starts low and only
/// changes through [`commit`](Socket::commit), which the engine calls as
/// part of the state-change protocol.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Socket {
    state: bool,
    kind: SocketKind,
    owner: ComponentId,
    connection: Option<ConnectionId>,
}

impl Socket {
    /// Typed socket factory: a low, unwired socket of `kind` owned by `owner`.
    pub fn new(kind: SocketKind, owner: ComponentId) -> Self {
        Self {
            state: false,
            kind,
            owner,
            connection: None,
        }
    }

    /// Current boolean state. Unwired, undriven sockets read low.
    pub fn state(&self) -> bool {
        self.state
    }

    /// Input or output.
    pub fn kind(&self) -> SocketKind {
        self.kind
    }

    /// The component that owns this socket.
    pub fn owner(&self) -> ComponentId {
        self.owner
    }

    /// The connection this socket is wired into, if any.
    pub fn connection(&self) -> Option<ConnectionId> {
        self.connection
    }

    /// Whether the socket is wired into a connection.
    pub fn is_wired(&self) -> bool {
        self.connection.is_some()
    }

    /// Apply the equality guard and commit `state`.
    ///
    /// Returns `false` without touching anything if `state` equals the
    /// current value; otherwise stores it and returns `true`. Callers
    /// notify listeners only after a `true` return.
    pub fn commit(&mut self, state: bool) -> bool {
        if self.state == state {
            return false;
        }
        self.state = state;
        true
    }

    /// Wire this socket into `connection`.
    ///
    /// # Errors
    ///
    /// Returns [`WiringError::AlreadyWired`] if the socket already belongs
    /// to a connection. `id` is this socket's own ID, used for reporting.
    pub fn attach(&mut self, id: SocketId, connection: ConnectionId) -> Result<(), WiringError> {
        if let Some(existing) = self.connection {
            return Err(WiringError::AlreadyWired {
                socket: id,
                connection: existing,
            });
        }
        self.connection = Some(connection);
        Ok(())
    }
}
