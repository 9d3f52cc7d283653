//! Reusable circuit fixtures.
//!
//! - [`nand_latch`] / [`nor_latch`]: switch-driven SR latches.
//! - [`click`]: one press-and-release of the pointer over a component.
//! - [`FailingComponent`]: errors deterministically after N updates.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use gatesim_components::{Gate, GateKind, Switch};
use gatesim_core::{
    Component, ComponentError, ComponentId, Placement, PointerState, SocketId, SocketKind,
    UpdateContext,
};
use gatesim_engine::Board;

/// An SR latch built from two cross-coupled gates, each with one input
/// driven by a switch.
///
/// `gate1 = f(switch1, q_bar)` drives `q`; `gate2 = f(switch2, q)` drives
/// `q_bar`.
#[derive(Clone, Copy, Debug)]
pub struct Latch {
    pub switch1: ComponentId,
    pub switch2: ComponentId,
    pub gate1: ComponentId,
    pub gate2: ComponentId,
    pub q: SocketId,
    pub q_bar: SocketId,
}

impl Latch {
    /// Current `(q, q_bar)`.
    pub fn outputs(&self, board: &Board) -> (bool, bool) {
        (
            board.socket_state(self.q).unwrap_or(false),
            board.socket_state(self.q_bar).unwrap_or(false),
        )
    }
}

/// Cross-coupled NAND latch, laid out as in the demo: switches at
/// (100, 100) and (100, 200), gates at (170, 100) and (170, 200).
///
/// Registered in the order switch1, switch2, gate1, gate2. Settles at
/// `q = q_bar = true` with both switches low.
pub fn nand_latch(board: &mut Board) -> Latch {
    latch(board, GateKind::Nand)
}

/// Cross-coupled NOR latch with the same layout and registration order
/// as [`nand_latch`]. Settles at `q = true, q_bar = false`.
pub fn nor_latch(board: &mut Board) -> Latch {
    latch(board, GateKind::Nor)
}

fn latch(board: &mut Board, kind: GateKind) -> Latch {
    let switch1 = board.create(Switch::new().at(100.0, 100.0)).unwrap();
    let switch2 = board.create(Switch::new().at(100.0, 200.0)).unwrap();
    let gate1 = board.create(Gate::new(kind).at(170.0, 100.0)).unwrap();
    let gate2 = board.create(Gate::new(kind).at(170.0, 200.0)).unwrap();

    let q = board.output(gate1, 0).unwrap();
    let q_bar = board.output(gate2, 0).unwrap();

    let wire = |board: &mut Board, from: SocketId, to: SocketId| {
        board.connect(&[from, to]).unwrap();
    };
    let s1 = board.output(switch1, 0).unwrap();
    let s2 = board.output(switch2, 0).unwrap();
    let g1_set = board.input(gate1, 0).unwrap();
    let g2_set = board.input(gate2, 0).unwrap();
    let g1_fb = board.input(gate1, 1).unwrap();
    let g2_fb = board.input(gate2, 1).unwrap();
    wire(board, s1, g1_set);
    wire(board, s2, g2_set);
    wire(board, q, g2_fb);
    wire(board, q_bar, g1_fb);

    board.add_components(&[switch1, switch2, gate1, gate2]).unwrap();

    Latch {
        switch1,
        switch2,
        gate1,
        gate2,
        q,
        q_bar,
    }
}

/// Press then release the pointer over the centre of `component`:
/// two board ticks. Toggles a switch exactly once.
pub fn click(board: &mut Board, component: ComponentId) {
    let centre = board
        .component(component)
        .map(|c| c.placement().rect().center())
        .unwrap();
    board.step(&mut PointerState::new(centre.x, centre.y, true)).unwrap();
    board.step(&mut PointerState::new(centre.x, centre.y, false)).unwrap();
}

const FAILING_LAYOUT: [SocketKind; 2] = [SocketKind::Input, SocketKind::Output];

/// A buffer that copies its input to its output and fails after
/// `succeed_count` updates.
///
/// The shared counter can be read through [`calls`](FailingComponent::calls)
/// after the component has been moved into a board.
pub struct FailingComponent {
    succeed_count: usize,
    calls: Arc<AtomicUsize>,
}

impl FailingComponent {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle to the update counter.
    pub fn calls(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

impl Component for FailingComponent {
    fn name(&self) -> &str {
        "FAIL"
    }

    fn layout(&self) -> &[SocketKind] {
        &FAILING_LAYOUT
    }

    fn placement(&self) -> Placement {
        Placement::default()
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ComponentError::Failed {
                reason: format!("failed after {} updates", self.succeed_count),
            });
        }
        let value = ctx.input(0)?;
        ctx.set_output(0, value)
    }
}
