//! Gatesim SR latch: two cross-coupled NAND gates driven by two switches.
//!
//! Demonstrates:
//!   1. Creating components and wiring their sockets into connections
//!   2. Registering components so steady-state values settle
//!   3. Clicking switches with a scripted pointer, one tick at a time
//!   4. Drawing the board through a text `Canvas`
//!
//! Run with:
//!   cargo run --example sr_latch
//!
//! Set `RUST_LOG=gatesim_engine=debug` to see per-tick propagation logs.

use std::fmt::Write as _;

use gatesim::prelude::*;
use tracing_subscriber::EnvFilter;

// ─── Layout ─────────────────────────────────────────────────────

const SWITCH_X: f32 = 100.0;
const GATE_X: f32 = 170.0;
const TOP_Y: f32 = 100.0;
const BOTTOM_Y: f32 = 200.0;

// ─── Text canvas ────────────────────────────────────────────────
//
// Prints one line per component and per connection instead of
// rasterizing. A windowing frontend would implement `Canvas` the same
// way, filling rectangles and circles with `style.state_color`.

#[derive(Default)]
struct TextCanvas {
    out: String,
}

fn level(state: bool) -> char {
    if state {
        '1'
    } else {
        '0'
    }
}

impl Canvas for TextCanvas {
    fn component(&mut self, view: &ComponentView<'_>, _style: &RenderStyle) {
        let pins: String = view
            .sockets
            .iter()
            .map(|s| match s.kind {
                SocketKind::Input => format!(" in{}", level(s.state)),
                SocketKind::Output => format!(" out{}", level(s.state)),
            })
            .collect();
        let _ = writeln!(
            self.out,
            "  {:<4} {:>3} @ ({:>3}, {:>3}){pins}",
            view.name, view.id, view.placement.position.x, view.placement.position.y
        );
    }

    fn connection(&mut self, view: &ConnectionView, style: &RenderStyle) {
        let Rgb(r, g, b) = style.state_color(view.state);
        let _ = writeln!(
            self.out,
            "  wire {:>3} = {} rgb({r},{g},{b}) across {} segment(s)",
            view.id,
            level(view.state),
            view.wires().count()
        );
    }
}

// ─── Main ───────────────────────────────────────────────────────

struct Latch {
    switch1: ComponentId,
    switch2: ComponentId,
    q: SocketId,
    q_bar: SocketId,
}

fn build(board: &mut Board) -> Result<Latch, Box<dyn std::error::Error>> {
    let switch1 = board.create(Switch::new().at(SWITCH_X, TOP_Y))?;
    let switch2 = board.create(Switch::new().at(SWITCH_X, BOTTOM_Y))?;
    let nand1 = board.create(Gate::nand().at(GATE_X, TOP_Y))?;
    let nand2 = board.create(Gate::nand().at(GATE_X, BOTTOM_Y))?;

    let q = board.output(nand1, 0)?;
    let q_bar = board.output(nand2, 0)?;
    let wires = [
        [board.output(switch1, 0)?, board.input(nand1, 0)?],
        [board.output(switch2, 0)?, board.input(nand2, 0)?],
        [q, board.input(nand2, 1)?],
        [q_bar, board.input(nand1, 1)?],
    ];
    for members in &wires {
        board.connect(members)?;
    }
    board.add_components(&[switch1, switch2, nand1, nand2])?;

    Ok(Latch {
        switch1,
        switch2,
        q,
        q_bar,
    })
}

fn click(board: &mut Board, id: ComponentId) -> Result<(), Box<dyn std::error::Error>> {
    let centre = board
        .component(id)
        .ok_or("unknown component")?
        .placement()
        .rect()
        .center();
    board.step(&mut PointerState::new(centre.x, centre.y, true))?;
    board.step(&mut PointerState::new(centre.x, centre.y, false))?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut board = Board::new(BoardConfig::default())?;
    let latch = build(&mut board)?;
    let style = RenderStyle::default();

    let script = [
        ("initial", None),
        ("switch1 on", Some(latch.switch1)),
        ("switch2 on", Some(latch.switch2)),
        ("switch1 off", Some(latch.switch1)),
        ("switch1 on", Some(latch.switch1)),
        ("switch2 off", Some(latch.switch2)),
    ];

    for (label, target) in script {
        if let Some(id) = target {
            click(&mut board, id)?;
        }
        let q = board.socket_state(latch.q).unwrap_or(false);
        let q_bar = board.socket_state(latch.q_bar).unwrap_or(false);
        tracing::info!(
            tick = %board.current_tick(),
            q,
            q_bar,
            step_us = board.last_metrics().total_us,
            "{label}"
        );

        let mut canvas = TextCanvas::default();
        board.draw(&mut canvas, &style);
        print!("{}", canvas.out);
    }

    Ok(())
}
