//! The state-change protocol and the two propagation strategies.
//!
//! A propagation starts from a [`Seed`] and runs until no socket changes
//! further. Three operations make up the protocol:
//!
//! - **set socket**: equality guard, commit, then notify. An input wakes
//!   its owning component; a wired output broadcasts through its
//!   connection.
//! - **broadcast**: equality guard on the connection's state, record it,
//!   then set every member socket to it.
//! - **update component**: snapshot inputs and current outputs into an
//!   [`UpdateContext`], run the component, then set every output socket.
//!
//! In recursive mode notifications are direct calls. In queued mode they
//! are appended to a FIFO and drained in order.
//!
//! A chain that fails part-way leaves committed sockets as they are, but
//! every connection it touched is resynced to its driving output so that
//! members and connection agree again.

use std::collections::VecDeque;

use indexmap::IndexSet;
use smallvec::SmallVec;
use tracing::{trace, warn};

use gatesim_core::{
    ComponentId, ConnectionId, PropagationError, Socket, SocketId, SocketKind, UpdateContext,
};

use crate::config::{BoardConfig, PropagationMode};
use crate::graph::Graph;
use crate::metrics::PropagationStats;

/// Where a propagation chain starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Seed {
    /// Run a component's `update`.
    Component(ComponentId),
    /// Drive a socket to a value.
    Socket(SocketId, bool),
    /// Broadcast a value through a connection.
    Connection(ConnectionId, bool),
}

/// Queued-mode work item.
#[derive(Clone, Copy, Debug)]
enum Pending {
    Component(ComponentId),
    /// Broadcast through `connection`. With an `origin`, the value is the
    /// origin socket's state when the item is dequeued, so a stale item
    /// never overwrites a newer value.
    Broadcast {
        connection: ConnectionId,
        origin: Option<SocketId>,
        state: bool,
    },
}

type Staged = SmallVec<[(SocketId, bool); 2]>;

/// Run one propagation chain to its fixed point.
pub(crate) fn propagate(
    graph: &mut Graph,
    config: &BoardConfig,
    seed: Seed,
) -> Result<PropagationStats, PropagationError> {
    let mut run = Propagation {
        graph,
        config,
        stats: PropagationStats::default(),
        touched: IndexSet::new(),
    };
    let result = match config.mode {
        PropagationMode::Recursive => run.recursive(seed),
        PropagationMode::Queued => run.queued(seed),
    };
    if let Err(err) = &result {
        if matches!(
            err,
            PropagationError::DepthExceeded { .. } | PropagationError::Diverged { .. }
        ) {
            warn!(
                ?seed,
                changes = run.stats.socket_changes,
                error = %err,
                "propagation did not settle"
            );
        }
        run.resync();
    }
    result.map(|()| run.stats)
}

struct Propagation<'g> {
    graph: &'g mut Graph,
    config: &'g BoardConfig,
    stats: PropagationStats,
    /// Connections whose state or driving output changed in this chain.
    touched: IndexSet<ConnectionId>,
}

impl Propagation<'_> {
    // ── shared steps ───────────────────────────────────────────────

    /// Count one change against the budget, before it is committed.
    fn record_change(&mut self) -> Result<(), PropagationError> {
        if self.stats.socket_changes >= self.config.max_changes {
            return Err(PropagationError::Diverged {
                budget: self.config.max_changes,
            });
        }
        self.stats.socket_changes += 1;
        Ok(())
    }

    /// Equality guard and commit. Returns the socket's kind, owner and
    /// connection if the state actually changed.
    fn commit(
        &mut self,
        id: SocketId,
        state: bool,
    ) -> Result<Option<(SocketKind, ComponentId, Option<ConnectionId>)>, PropagationError> {
        let socket = self
            .graph
            .sockets
            .get(id.index())
            .ok_or(PropagationError::UnknownSocket(id))?;
        if socket.state() == state {
            return Ok(None);
        }
        let notify = (socket.kind(), socket.owner(), socket.connection());
        self.record_change()?;
        self.graph.sockets[id.index()].commit(state);
        if let Some(connection) = notify.2 {
            self.touched.insert(connection);
        }
        trace!(socket = %id, state, "socket committed");
        Ok(Some(notify))
    }

    /// Equality guard on the connection. Returns its members if the
    /// broadcast changed its state.
    fn begin_broadcast(
        &mut self,
        id: ConnectionId,
        state: bool,
    ) -> Result<Option<SmallVec<[SocketId; 4]>>, PropagationError> {
        let connection = self
            .graph
            .connections
            .get_mut(id.index())
            .ok_or(PropagationError::UnknownConnection(id))?;
        if connection.state == state {
            return Ok(None);
        }
        connection.state = state;
        let members = connection.members.clone();
        self.touched.insert(id);
        self.stats.broadcasts += 1;
        trace!(connection = %id, state, "broadcast");
        Ok(Some(members))
    }

    /// Run a component and return the output values it staged.
    fn evaluate(&mut self, id: ComponentId) -> Result<Staged, PropagationError> {
        let graph = &mut *self.graph;
        let sockets = &graph.sockets;
        let slot = graph
            .components
            .get_mut(id.index())
            .ok_or(PropagationError::UnknownComponent(id))?;

        let inputs: SmallVec<[bool; 4]> = slot
            .inputs
            .iter()
            .map(|s| sockets[s.index()].state())
            .collect();
        let mut outputs: SmallVec<[bool; 2]> = slot
            .outputs
            .iter()
            .map(|s| sockets[s.index()].state())
            .collect();

        let mut ctx = UpdateContext::new(&inputs, &mut outputs);
        slot.component
            .update(&mut ctx)
            .map_err(|reason| PropagationError::ComponentFailed {
                component: id,
                name: slot.component.name().to_string(),
                reason,
            })?;
        self.stats.component_updates += 1;

        Ok(slot.outputs.iter().copied().zip(outputs).collect())
    }

    /// Make every connection a failed chain touched agree with its members
    /// again.
    ///
    /// The connection takes the state of its first output member (or keeps
    /// its own if it has none) and every member is set to it directly.
    /// Components are not re-run; they catch up on their next input change.
    fn resync(&mut self) {
        let graph = &mut *self.graph;
        for id in self.touched.drain(..) {
            let Some(connection) = graph.connections.get_mut(id.index()) else {
                continue;
            };
            let driver = connection
                .members
                .iter()
                .filter_map(|s| graph.sockets.get(s.index()))
                .find(|s| s.kind().is_output())
                .map(Socket::state);
            if let Some(state) = driver {
                connection.state = state;
            }
            for member in &connection.members {
                if let Some(socket) = graph.sockets.get_mut(member.index()) {
                    socket.commit(connection.state);
                }
            }
            trace!(connection = %id, state = connection.state, "connection resynced");
        }
    }

    // ── recursive ──────────────────────────────────────────────────
    //
    // `depth` is the nesting level of the component update a change would
    // trigger: the seed's own update is level 1, and every update reached
    // through it is one level deeper.

    fn recursive(&mut self, seed: Seed) -> Result<(), PropagationError> {
        match seed {
            Seed::Component(id) => self.update_component(id, 1),
            Seed::Socket(id, state) => self.set_socket(id, state, 1),
            Seed::Connection(id, state) => self.broadcast(id, state, 1),
        }
    }

    fn set_socket(
        &mut self,
        id: SocketId,
        state: bool,
        depth: usize,
    ) -> Result<(), PropagationError> {
        match self.commit(id, state)? {
            None | Some((SocketKind::Output, _, None)) => Ok(()),
            Some((SocketKind::Input, owner, _)) => self.update_component(owner, depth),
            Some((SocketKind::Output, _, Some(connection))) => {
                self.broadcast(connection, state, depth)
            }
        }
    }

    fn broadcast(
        &mut self,
        id: ConnectionId,
        state: bool,
        depth: usize,
    ) -> Result<(), PropagationError> {
        let Some(members) = self.begin_broadcast(id, state)? else {
            return Ok(());
        };
        for member in members {
            // A nested chain re-broadcast this connection with the opposite
            // value; that broadcast already reached every member.
            if self.graph.connections[id.index()].state != state {
                break;
            }
            self.set_socket(member, state, depth)?;
        }
        Ok(())
    }

    fn update_component(&mut self, id: ComponentId, depth: usize) -> Result<(), PropagationError> {
        if depth > self.config.max_depth {
            return Err(PropagationError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);
        for (socket, state) in self.evaluate(id)? {
            self.set_socket(socket, state, depth + 1)?;
        }
        Ok(())
    }

    // ── queued ─────────────────────────────────────────────────────

    fn queued(&mut self, seed: Seed) -> Result<(), PropagationError> {
        let mut queue = VecDeque::new();
        match seed {
            Seed::Component(id) => queue.push_back(Pending::Component(id)),
            Seed::Socket(id, state) => self.set_socket_queued(id, state, &mut queue)?,
            Seed::Connection(connection, state) => queue.push_back(Pending::Broadcast {
                connection,
                origin: None,
                state,
            }),
        }

        while let Some(item) = queue.pop_front() {
            match item {
                Pending::Component(id) => {
                    for (socket, state) in self.evaluate(id)? {
                        self.set_socket_queued(socket, state, &mut queue)?;
                    }
                }
                Pending::Broadcast {
                    connection,
                    origin,
                    state,
                } => {
                    let state = match origin {
                        Some(origin) => self
                            .graph
                            .sockets
                            .get(origin.index())
                            .ok_or(PropagationError::UnknownSocket(origin))?
                            .state(),
                        None => state,
                    };
                    if let Some(members) = self.begin_broadcast(connection, state)? {
                        for member in members {
                            self.set_socket_queued(member, state, &mut queue)?;
                        }
                    }
                }
            }
            self.stats.peak_queue = self.stats.peak_queue.max(queue.len());
        }
        Ok(())
    }

    fn set_socket_queued(
        &mut self,
        id: SocketId,
        state: bool,
        queue: &mut VecDeque<Pending>,
    ) -> Result<(), PropagationError> {
        match self.commit(id, state)? {
            None | Some((SocketKind::Output, _, None)) => {}
            Some((SocketKind::Input, owner, _)) => queue.push_back(Pending::Component(owner)),
            Some((SocketKind::Output, _, Some(connection))) => {
                queue.push_back(Pending::Broadcast {
                    connection,
                    origin: Some(id),
                    state,
                });
            }
        }
        self.stats.peak_queue = self.stats.peak_queue.max(queue.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatesim_components::{Button, Gate};
    use gatesim_core::{Component, ComponentError, Placement};

    fn modes() -> [BoardConfig; 2] {
        [BoardConfig::default(), BoardConfig::queued()]
    }

    /// NOT gate whose output feeds its own input: never settles.
    fn ring_oscillator() -> (Graph, ComponentId) {
        let mut g = Graph::default();
        let not = g.create(Box::new(Gate::not())).unwrap();
        let input = g.socket_at(not, Some(SocketKind::Input), 0).unwrap();
        let output = g.socket_at(not, Some(SocketKind::Output), 0).unwrap();
        g.connect(&[output, input]).unwrap();
        (g, not)
    }

    /// `n` OR gates used as buffers, each output wired to the next input.
    /// Returns the first input and the last output.
    fn or_chain(n: usize) -> (Graph, SocketId, SocketId) {
        let mut g = Graph::default();
        let first = g.create(Box::new(Gate::or())).unwrap();
        let head = g.socket_at(first, Some(SocketKind::Input), 0).unwrap();
        let mut tail = g.socket_at(first, Some(SocketKind::Output), 0).unwrap();
        for _ in 1..n {
            let next = g.create(Box::new(Gate::or())).unwrap();
            let input = g.socket_at(next, Some(SocketKind::Input), 0).unwrap();
            g.connect(&[tail, input]).unwrap();
            tail = g.socket_at(next, Some(SocketKind::Output), 0).unwrap();
        }
        (g, head, tail)
    }

    fn assert_nets_agree(g: &Graph, context: &str) {
        for (i, conn) in g.connections.iter().enumerate() {
            for m in conn.members() {
                assert_eq!(
                    g.sockets[m.index()].state(),
                    conn.state(),
                    "{context}: connection {i} member {m}"
                );
            }
        }
    }

    /// Inverts its input until the input is first seen high, then holds
    /// its output low for good.
    struct OneShot {
        tripped: bool,
    }

    const ONE_SHOT_LAYOUT: [SocketKind; 2] = [SocketKind::Input, SocketKind::Output];

    impl Component for OneShot {
        fn name(&self) -> &str {
            "ONESHOT"
        }

        fn layout(&self) -> &[SocketKind] {
            &ONE_SHOT_LAYOUT
        }

        fn placement(&self) -> Placement {
            Placement::default()
        }

        fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError> {
            if ctx.input(0)? {
                self.tripped = true;
            }
            ctx.set_output(0, !self.tripped)
        }
    }

    #[test]
    fn unwired_nand_drives_output_high() {
        for cfg in modes() {
            let mut g = Graph::default();
            let nand = g.create(Box::new(Gate::nand())).unwrap();
            let stats = propagate(&mut g, &cfg, Seed::Component(nand)).unwrap();
            assert!(g.sockets[2].state(), "{}", cfg.mode);
            assert_eq!(stats.socket_changes, 1);
            assert_eq!(stats.component_updates, 1);
            assert_eq!(stats.broadcasts, 0);
        }
    }

    #[test]
    fn equal_state_is_a_no_op() {
        for cfg in modes() {
            let mut g = Graph::default();
            g.create(Box::new(Gate::or())).unwrap();
            let stats = propagate(&mut g, &cfg, Seed::Socket(SocketId(0), false)).unwrap();
            assert!(stats.is_quiet());
            assert_eq!(stats.component_updates, 0);
        }
    }

    #[test]
    fn input_change_reevaluates_owner() {
        for cfg in modes() {
            let mut g = Graph::default();
            g.create(Box::new(Gate::or())).unwrap();
            let stats = propagate(&mut g, &cfg, Seed::Socket(SocketId(0), true)).unwrap();
            assert!(g.sockets[2].state(), "{}", cfg.mode);
            assert_eq!(stats.socket_changes, 2);
            assert_eq!(stats.component_updates, 1);
        }
    }

    #[test]
    fn broadcast_reaches_members_and_absorbs_driver() {
        for cfg in modes() {
            let mut g = Graph::default();
            let button = g.create(Box::new(Button::new())).unwrap();
            let or = g.create(Box::new(Gate::or())).unwrap();
            let out = g.socket_at(button, None, 0).unwrap();
            let a = g.socket_at(or, None, 0).unwrap();
            let conn = g.connect(&[out, a]).unwrap();

            let stats = propagate(&mut g, &cfg, Seed::Socket(out, true)).unwrap();
            assert!(g.connections[conn.index()].state());
            assert!(g.sockets[a.index()].state());
            let or_out = g.socket_at(or, Some(SocketKind::Output), 0).unwrap();
            assert!(g.sockets[or_out.index()].state(), "OR output follows");
            // out, a, or.out
            assert_eq!(stats.socket_changes, 3, "{}", cfg.mode);
            assert_eq!(stats.broadcasts, 1);
        }
    }

    #[test]
    fn ring_oscillator_exceeds_depth_when_recursive() {
        let (mut g, not) = ring_oscillator();
        let cfg = BoardConfig {
            max_depth: 64,
            ..BoardConfig::default()
        };
        match propagate(&mut g, &cfg, Seed::Component(not)) {
            Err(PropagationError::DepthExceeded { limit: 64 }) => {}
            other => panic!("expected DepthExceeded, got {other:?}"),
        }
    }

    #[test]
    fn ring_oscillator_diverges_when_queued() {
        let (mut g, not) = ring_oscillator();
        let cfg = BoardConfig {
            max_changes: 100,
            ..BoardConfig::queued()
        };
        match propagate(&mut g, &cfg, Seed::Component(not)) {
            Err(PropagationError::Diverged { budget: 100 }) => {}
            other => panic!("expected Diverged, got {other:?}"),
        }
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut g = Graph::default();
        let cfg = BoardConfig::default();
        assert_eq!(
            propagate(&mut g, &cfg, Seed::Component(ComponentId(3))),
            Err(PropagationError::UnknownComponent(ComponentId(3)))
        );
        assert_eq!(
            propagate(&mut g, &cfg, Seed::Socket(SocketId(0), true)),
            Err(PropagationError::UnknownSocket(SocketId(0)))
        );
        assert_eq!(
            propagate(&mut g, &cfg, Seed::Connection(ConnectionId(1), true)),
            Err(PropagationError::UnknownConnection(ConnectionId(1)))
        );
    }

    #[test]
    fn queued_mode_keeps_the_stack_flat() {
        // NOT (high with a dangling input) feeding 2000 ORs used as buffers.
        let mut g = Graph::default();
        let first = g.create(Box::new(Gate::not())).unwrap();
        let mut prev_out = g.socket_at(first, Some(SocketKind::Output), 0).unwrap();
        for _ in 0..2_000 {
            let next = g.create(Box::new(Gate::or())).unwrap();
            let input = g.socket_at(next, Some(SocketKind::Input), 0).unwrap();
            g.connect(&[prev_out, input]).unwrap();
            prev_out = g.socket_at(next, Some(SocketKind::Output), 0).unwrap();
        }
        let stats = propagate(&mut g, &BoardConfig::queued(), Seed::Component(first)).unwrap();
        assert_eq!(stats.max_depth, 0);
        assert!(stats.peak_queue <= 2);
        assert_eq!(stats.component_updates, 2_001);
        assert!(g.sockets[prev_out.index()].state());
    }

    #[test]
    fn default_depth_settles_a_chain_of_max_depth_gates() {
        let cfg = BoardConfig::default();
        let (mut g, head, tail) = or_chain(cfg.max_depth);
        let stats = propagate(&mut g, &cfg, Seed::Socket(head, true)).unwrap();
        assert_eq!(stats.max_depth, cfg.max_depth);
        assert_eq!(stats.component_updates, cfg.max_depth as u64);
        assert!(g.sockets[tail.index()].state());
        assert_nets_agree(&g, "settled");
    }

    #[test]
    fn one_gate_past_max_depth_is_rejected() {
        let cfg = BoardConfig::default();
        let (mut g, head, _) = or_chain(cfg.max_depth + 1);
        assert_eq!(
            propagate(&mut g, &cfg, Seed::Socket(head, true)),
            Err(PropagationError::DepthExceeded {
                limit: cfg.max_depth
            })
        );
        assert_nets_agree(&g, "after DepthExceeded");
    }

    #[test]
    fn superseded_broadcast_stops_delivering() {
        let cfg = BoardConfig::default();
        let mut g = Graph::default();
        let shot = g.create(Box::new(OneShot { tripped: false })).unwrap();
        let or = g.create(Box::new(Gate::or())).unwrap();
        propagate(&mut g, &cfg, Seed::Component(shot)).unwrap();

        let shot_in = g.socket_at(shot, Some(SocketKind::Input), 0).unwrap();
        let shot_out = g.socket_at(shot, Some(SocketKind::Output), 0).unwrap();
        let or_in = g.socket_at(or, Some(SocketKind::Input), 0).unwrap();
        let or_out = g.socket_at(or, Some(SocketKind::Output), 0).unwrap();
        assert!(g.sockets[shot_out.index()].state());
        let conn = g.connect(&[shot_in, shot_out, or_in]).unwrap();

        // Delivering high to the first member trips the one-shot, whose
        // output drives the same connection low before the outer loop
        // reaches the remaining members.
        let stats = propagate(&mut g, &cfg, Seed::Connection(conn, true)).unwrap();
        assert!(!g.connections[conn.index()].state());
        assert_nets_agree(&g, "after nested broadcast");
        assert!(!g.sockets[or_out.index()].state(), "OR never saw high");
        assert_eq!(stats.broadcasts, 2);
        assert_eq!(stats.component_updates, 2);
        // shot.in high, shot.out low, shot.in low
        assert_eq!(stats.socket_changes, 3);
    }

    #[test]
    fn exhausted_budget_leaves_nets_in_agreement() {
        for base in modes() {
            for max_changes in 1..24 {
                let cfg = BoardConfig {
                    max_changes,
                    max_depth: 1_000,
                    ..base.clone()
                };
                let (mut g, not) = ring_oscillator();
                let result = propagate(&mut g, &cfg, Seed::Component(not));
                assert_eq!(
                    result,
                    Err(PropagationError::Diverged {
                        budget: max_changes
                    }),
                    "{} budget {max_changes}",
                    cfg.mode
                );
                assert_nets_agree(&g, &format!("{} budget {max_changes}", cfg.mode));
            }
        }
    }
}
