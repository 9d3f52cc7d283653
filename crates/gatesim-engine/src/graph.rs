//! The component/socket/connection arena.
//!
//! [`Graph`] owns every component, socket and connection of a board in
//! flat vectors indexed by their typed IDs. It implements graph
//! construction (the socket factory and wiring) and lookups; propagation
//! lives in `propagate`, the per-tick driver in [`Board`](crate::Board).

use indexmap::IndexSet;
use tracing::debug;

use gatesim_core::{
    Component, ComponentId, ConnectionId, Socket, SocketId, SocketKind, SocketList, WiringError,
};

// ── Connection ─────────────────────────────────────────────────────

/// A net forcing its member sockets to share one boolean value.
///
/// Members are fixed when the connection is created. `state` is the last
/// value broadcast, initially low.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection {
    pub(crate) members: SocketList,
    pub(crate) state: bool,
}

impl Connection {
    /// Member sockets, in wiring order.
    pub fn members(&self) -> &[SocketId] {
        &self.members
    }

    /// Last broadcast value.
    pub fn state(&self) -> bool {
        self.state
    }
}

// ── ComponentSlot ──────────────────────────────────────────────────

/// A component plus the sockets the factory built for it.
pub(crate) struct ComponentSlot {
    pub(crate) component: Box<dyn Component>,
    /// Every socket, in layout order.
    pub(crate) sockets: SocketList,
    /// Input sockets, in layout order.
    pub(crate) inputs: SocketList,
    /// Output sockets, in layout order.
    pub(crate) outputs: SocketList,
}

// ── Graph ──────────────────────────────────────────────────────────

/// Arena of components, sockets and connections.
#[derive(Default)]
pub(crate) struct Graph {
    pub(crate) components: Vec<ComponentSlot>,
    pub(crate) sockets: Vec<Socket>,
    pub(crate) connections: Vec<Connection>,
}

fn next_id(len: usize, what: &'static str) -> Result<u32, WiringError> {
    u32::try_from(len).map_err(|_| WiringError::CapacityExceeded { what })
}

impl Graph {
    /// Store `component` and build one socket per entry of its layout.
    pub(crate) fn create(
        &mut self,
        component: Box<dyn Component>,
    ) -> Result<ComponentId, WiringError> {
        let id = ComponentId(next_id(self.components.len(), "component")?);
        let layout = component.layout();
        next_id(self.sockets.len() + layout.len(), "socket")?;

        let mut sockets = SocketList::new();
        let mut inputs = SocketList::new();
        let mut outputs = SocketList::new();
        for &kind in layout {
            let socket = SocketId(next_id(self.sockets.len(), "socket")?);
            self.sockets.push(Socket::new(kind, id));
            sockets.push(socket);
            match kind {
                SocketKind::Input => inputs.push(socket),
                SocketKind::Output => outputs.push(socket),
            }
        }

        debug!(
            component = %id,
            name = component.name(),
            inputs = inputs.len(),
            outputs = outputs.len(),
            "component created"
        );
        self.components.push(ComponentSlot {
            component,
            sockets,
            inputs,
            outputs,
        });
        Ok(id)
    }

    /// Wire `members` into a new connection.
    ///
    /// All members are checked before any is attached, so a rejected
    /// connection leaves the graph untouched.
    pub(crate) fn connect(&mut self, members: &[SocketId]) -> Result<ConnectionId, WiringError> {
        if members.is_empty() {
            return Err(WiringError::EmptyConnection);
        }
        let id = ConnectionId(next_id(self.connections.len(), "connection")?);

        let mut unique: IndexSet<SocketId> = IndexSet::with_capacity(members.len());
        for &socket in members {
            let existing = self
                .sockets
                .get(socket.index())
                .ok_or(WiringError::UnknownSocket(socket))?;
            if let Some(connection) = existing.connection() {
                return Err(WiringError::AlreadyWired { socket, connection });
            }
            if !unique.insert(socket) {
                return Err(WiringError::DuplicateMember(socket));
            }
        }

        for &socket in &unique {
            self.sockets[socket.index()].attach(socket, id)?;
        }
        debug!(connection = %id, members = unique.len(), "connection created");
        self.connections.push(Connection {
            members: unique.into_iter().collect(),
            state: false,
        });
        Ok(id)
    }

    pub(crate) fn slot(&self, id: ComponentId) -> Option<&ComponentSlot> {
        self.components.get(id.index())
    }

    pub(crate) fn socket(&self, id: SocketId) -> Option<&Socket> {
        self.sockets.get(id.index())
    }

    pub(crate) fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.connections.get(id.index())
    }

    /// The `index`-th socket of `component`, optionally counting only one kind.
    pub(crate) fn socket_at(
        &self,
        component: ComponentId,
        kind: Option<SocketKind>,
        index: usize,
    ) -> Result<SocketId, WiringError> {
        let slot = self
            .slot(component)
            .ok_or(WiringError::UnknownComponent(component))?;
        let list = match kind {
            None => &slot.sockets,
            Some(SocketKind::Input) => &slot.inputs,
            Some(SocketKind::Output) => &slot.outputs,
        };
        list.get(index).copied().ok_or(WiringError::NoSuchSocket {
            component,
            kind,
            index,
        })
    }

    /// Position of `socket` among its owner's sockets of the same kind.
    pub(crate) fn position_in_kind(&self, socket: SocketId) -> Option<usize> {
        let s = self.socket(socket)?;
        let slot = self.slot(s.owner())?;
        let list = match s.kind() {
            SocketKind::Input => &slot.inputs,
            SocketKind::Output => &slot.outputs,
        };
        list.iter().position(|&x| x == socket)
    }
}
