//! The board: graph owner and per-tick driver.
//!
//! [`Board`] is the primary user-facing API. Graph construction is three
//! calls: [`create`](Board::create) a component (its sockets are built
//! from its layout), [`connect`](Board::connect) sockets into nets, and
//! [`add_components`](Board::add_components) to register components,
//! which runs each one's `update` once so steady-state values settle
//! before the first tick. After that, [`step`](Board::step) is the only
//! per-tick entry point.
//!
//! # Ownership model
//!
//! The board owns every component, socket and connection; they refer to
//! one another by ID. `Board` is [`Send`] but every mutation takes
//! `&mut self`, so propagation never runs concurrently.

use std::fmt;
use std::time::Instant;

use indexmap::IndexSet;
use tracing::debug;

use gatesim_core::{
    Component, ComponentId, ConnectionId, InputSampler, PropagationError, Socket, SocketId,
    SocketKind, TickId, WiringError,
};

use crate::config::{BoardConfig, ConfigError};
use crate::graph::{Connection, Graph};
use crate::metrics::{PropagationStats, StepMetrics};
use crate::propagate::{propagate, Seed};

// Compile-time assertion: Board is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<Board>();
    }
};

// ── BoardError ───────────────────────────────────────────────────

/// Error returned from [`Board::add_components()`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BoardError {
    /// The component ID does not exist on this board.
    UnknownComponent(ComponentId),
    /// The component is already registered (or listed twice).
    AlreadyRegistered(ComponentId),
    /// The registration-time update failed.
    Propagation(PropagationError),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownComponent(id) => write!(f, "unknown component {id}"),
            Self::AlreadyRegistered(id) => write!(f, "component {id} is already registered"),
            Self::Propagation(e) => write!(f, "propagation: {e}"),
        }
    }
}

impl std::error::Error for BoardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Propagation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PropagationError> for BoardError {
    fn from(e: PropagationError) -> Self {
        Self::Propagation(e)
    }
}

// ── Board ────────────────────────────────────────────────────────

/// A logic board: components, their sockets, and the nets between them.
///
/// # Example
///
/// ```ignore
/// let mut board = Board::new(BoardConfig::default())?;
/// let sw = board.create(Switch::new().at(100.0, 100.0))?;
/// let not = board.create(Gate::not())?;
/// board.connect(&[board.output(sw, 0)?, board.input(not, 0)?])?;
/// board.add_components(&[sw, not])?;
/// loop {
///     board.step(&mut pointer)?;
///     board.draw(&mut canvas, &style);
/// }
/// ```
pub struct Board {
    graph: Graph,
    config: BoardConfig,
    /// Registered components, in registration (= draw) order.
    registered: IndexSet<ComponentId>,
    /// Registered components with the interactive capability, in
    /// registration order.
    interactive: Vec<ComponentId>,
    current_tick: TickId,
    last_metrics: StepMetrics,
}

impl Board {
    /// Create an empty board.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if `config` fails validation.
    pub fn new(config: BoardConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            graph: Graph::default(),
            config,
            registered: IndexSet::new(),
            interactive: Vec::new(),
            current_tick: TickId(0),
            last_metrics: StepMetrics::default(),
        })
    }

    // ── graph construction ───────────────────────────────────────

    /// Store `component` and build its sockets.
    ///
    /// The component is not registered yet: it is neither drawn nor
    /// polled, and its `update` has not run. Its sockets already exist
    /// and can be wired.
    pub fn create<C: Component>(&mut self, component: C) -> Result<ComponentId, WiringError> {
        self.graph.create(Box::new(component))
    }

    /// Store an already-boxed component. See [`create`](Board::create).
    pub fn create_boxed(
        &mut self,
        component: Box<dyn Component>,
    ) -> Result<ComponentId, WiringError> {
        self.graph.create(component)
    }

    /// Wire `members` into a new connection whose state starts low.
    ///
    /// Members may be of either kind and are broadcast to in the order
    /// given. A connection with a single member is legal.
    ///
    /// # Errors
    ///
    /// [`WiringError::EmptyConnection`], [`WiringError::UnknownSocket`],
    /// [`WiringError::AlreadyWired`] or [`WiringError::DuplicateMember`].
    /// Nothing is wired when an error is returned.
    pub fn connect(&mut self, members: &[SocketId]) -> Result<ConnectionId, WiringError> {
        self.graph.connect(members)
    }

    /// Register `ids` and run each one's `update` once, in order.
    ///
    /// Registration order is draw order and per-tick poll order.
    ///
    /// # Errors
    ///
    /// [`BoardError::UnknownComponent`] or [`BoardError::AlreadyRegistered`]
    /// before anything is registered. [`BoardError::Propagation`] if an
    /// initial update fails; components before the failing one stay
    /// registered.
    pub fn add_components(&mut self, ids: &[ComponentId]) -> Result<PropagationStats, BoardError> {
        let mut seen = IndexSet::with_capacity(ids.len());
        for &id in ids {
            if self.graph.slot(id).is_none() {
                return Err(BoardError::UnknownComponent(id));
            }
            if self.registered.contains(&id) || !seen.insert(id) {
                return Err(BoardError::AlreadyRegistered(id));
            }
        }

        let mut stats = PropagationStats::default();
        for &id in ids {
            self.registered.insert(id);
            let interactive = self
                .graph
                .slot(id)
                .is_some_and(|slot| slot.component.as_interactive().is_some());
            if interactive {
                self.interactive.push(id);
            }
            debug!(component = %id, interactive, "component registered");
            stats.absorb(&propagate(
                &mut self.graph,
                &self.config,
                Seed::Component(id),
            )?);
        }
        Ok(stats)
    }

    // ── propagation entry points ─────────────────────────────────

    /// Advance one tick: sample input for every registered interactive
    /// component, in registration order, and run its `update`.
    ///
    /// Everything else that changes does so reactively inside these calls.
    ///
    /// # Errors
    ///
    /// Returns the first [`PropagationError`]. Components polled before
    /// the failure keep their effects; the tick counter still advances.
    pub fn step<S: InputSampler + ?Sized>(
        &mut self,
        sampler: &mut S,
    ) -> Result<StepMetrics, PropagationError> {
        let start = Instant::now();
        self.current_tick = TickId(self.current_tick.0 + 1);

        let mut propagation = PropagationStats::default();
        let mut polled = 0u32;
        for &id in &self.interactive {
            let slot = self
                .graph
                .components
                .get_mut(id.index())
                .ok_or(PropagationError::UnknownComponent(id))?;
            if let Some(interactive) = slot.component.as_interactive_mut() {
                let sample = sampler.sample(id, interactive.region());
                interactive.observe(sample);
            }
            propagation.absorb(&propagate(
                &mut self.graph,
                &self.config,
                Seed::Component(id),
            )?);
            polled += 1;
        }

        let metrics = StepMetrics {
            tick: self.current_tick,
            total_us: start.elapsed().as_micros() as u64,
            interactive_polled: polled,
            propagation,
        };
        debug!(
            tick = %metrics.tick,
            polled,
            changes = metrics.propagation.socket_changes,
            "board stepped"
        );
        self.last_metrics = metrics.clone();
        Ok(metrics)
    }

    /// Run a component's `update` and propagate whatever it changes.
    ///
    /// Works on registered and unregistered components alike.
    pub fn update_component(
        &mut self,
        id: ComponentId,
    ) -> Result<PropagationStats, PropagationError> {
        propagate(&mut self.graph, &self.config, Seed::Component(id))
    }

    /// Drive `socket` to `state` through the state-change protocol.
    ///
    /// A no-op if the socket already holds `state`.
    pub fn set_socket_state(
        &mut self,
        socket: SocketId,
        state: bool,
    ) -> Result<PropagationStats, PropagationError> {
        propagate(&mut self.graph, &self.config, Seed::Socket(socket, state))
    }

    /// Broadcast `state` through `connection` to every member socket.
    ///
    /// A no-op if the connection's last broadcast was already `state`.
    pub fn broadcast(
        &mut self,
        connection: ConnectionId,
        state: bool,
    ) -> Result<PropagationStats, PropagationError> {
        propagate(
            &mut self.graph,
            &self.config,
            Seed::Connection(connection, state),
        )
    }

    // ── lookups ──────────────────────────────────────────────────

    /// A component by ID.
    pub fn component(&self, id: ComponentId) -> Option<&dyn Component> {
        self.graph.slot(id).map(|slot| slot.component.as_ref())
    }

    /// A socket by ID.
    pub fn socket(&self, id: SocketId) -> Option<&Socket> {
        self.graph.socket(id)
    }

    /// A socket's state, or `None` for an unknown ID.
    pub fn socket_state(&self, id: SocketId) -> Option<bool> {
        self.graph.socket(id).map(Socket::state)
    }

    /// A connection by ID.
    pub fn connection(&self, id: ConnectionId) -> Option<&Connection> {
        self.graph.connection(id)
    }

    /// Every connection with its ID, in creation order.
    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> + '_ {
        self.graph
            .connections
            .iter()
            .enumerate()
            .map(|(i, c)| (ConnectionId(i as u32), c))
    }

    /// A component's sockets in layout order.
    pub fn sockets_of(&self, id: ComponentId) -> Option<&[SocketId]> {
        self.graph.slot(id).map(|slot| slot.sockets.as_slice())
    }

    /// The `index`-th socket of `component` in layout order.
    pub fn socket_at(&self, component: ComponentId, index: usize) -> Result<SocketId, WiringError> {
        self.graph.socket_at(component, None, index)
    }

    /// The `index`-th input socket of `component`.
    pub fn input(&self, component: ComponentId, index: usize) -> Result<SocketId, WiringError> {
        self.graph.socket_at(component, Some(SocketKind::Input), index)
    }

    /// The `index`-th output socket of `component`.
    pub fn output(&self, component: ComponentId, index: usize) -> Result<SocketId, WiringError> {
        self.graph.socket_at(component, Some(SocketKind::Output), index)
    }

    /// Registered components, in registration order.
    pub fn registered(&self) -> impl Iterator<Item = ComponentId> + '_ {
        self.registered.iter().copied()
    }

    /// Whether `id` is registered.
    pub fn is_registered(&self, id: ComponentId) -> bool {
        self.registered.contains(&id)
    }

    /// Registered interactive components, in poll order.
    pub fn interactive(&self) -> &[ComponentId] {
        &self.interactive
    }

    /// Number of components created, registered or not.
    pub fn component_count(&self) -> usize {
        self.graph.components.len()
    }

    /// Number of sockets across all components.
    pub fn socket_count(&self) -> usize {
        self.graph.sockets.len()
    }

    /// Number of connections.
    pub fn connection_count(&self) -> usize {
        self.graph.connections.len()
    }

    /// Ticks stepped so far (0 after construction).
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Metrics from the most recent successful tick.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// The board's configuration.
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub(crate) fn graph(&self) -> &Graph {
        &self.graph
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Board")
            .field("mode", &self.config.mode)
            .field("components", &self.graph.components.len())
            .field("registered", &self.registered.len())
            .field("interactive", &self.interactive.len())
            .field("sockets", &self.graph.sockets.len())
            .field("connections", &self.graph.connections.len())
            .field("current_tick", &self.current_tick)
            .finish()
    }
}
