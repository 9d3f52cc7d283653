//! Strongly-typed identifiers and the [`SocketList`] type alias.
//!
//! Sockets, components and connections live in arenas owned by a board.
//! Every cross-reference between them is one of these indices rather than
//! a pointer, so the Component → Socket → Connection → Socket cycle never
//! becomes an ownership cycle.

use smallvec::SmallVec;
use std::fmt;

/// Identifies a component within a board's arena.
///
/// Components are assigned sequential IDs at creation time.
/// `ComponentId(n)` corresponds to the n-th component created on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ComponentId(pub u32);

impl ComponentId {
    /// Arena slot for this ID.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

impl From<u32> for ComponentId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a socket within a board's arena.
///
/// Sockets are allocated by the socket factory when their owning
/// component is created, in the component's layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SocketId(pub u32);

impl SocketId {
    /// Arena slot for this ID.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for SocketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

impl From<u32> for SocketId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a connection (net) within a board's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ConnectionId(pub u32);

impl ConnectionId {
    /// Arena slot for this ID.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n{}", self.0)
    }
}

impl From<u32> for ConnectionId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented each time the board polls its interactive components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// An ordered list of sockets.
///
/// Uses `SmallVec<[SocketId; 4]>` so that every built-in component
/// (at most three sockets) and typical fan-out nets stay inline.
pub type SocketList = SmallVec<[SocketId; 4]>;
