//! Backend-neutral drawing pass.
//!
//! [`Board::draw`] walks the registered components in registration order,
//! then every connection, and hands a read-only view of each to a
//! [`Canvas`]. The engine never rasterizes anything itself; a windowing
//! frontend, a text dump, or a test recorder implements `Canvas`.

use gatesim_core::{ComponentId, ConnectionId, Placement, Point, SocketId, SocketKind};

use crate::board::Board;
use crate::graph::Graph;

// ── Style ──────────────────────────────────────────────────────────

/// An 8-bit RGB colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Pure green.
    pub const GREEN: Self = Self(0, 255, 0);
    /// Pure red.
    pub const RED: Self = Self(255, 0, 0);
    /// Magenta used for component outlines.
    pub const MAGENTA: Self = Self(200, 0, 200);
    /// White.
    pub const WHITE: Self = Self(255, 255, 255);
}

/// Colours and dimensions used when drawing a board.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderStyle {
    /// Colour of a high socket or wire.
    pub high: Rgb,
    /// Colour of a low socket or wire.
    pub low: Rgb,
    /// Component outline colour.
    pub outline: Rgb,
    /// Component label colour.
    pub label: Rgb,
    /// Component outline width, in pixels.
    pub outline_width: f32,
    /// Socket marker radius, in pixels.
    pub socket_radius: f32,
    /// Vertical distance between consecutive sockets on one side.
    pub socket_spacing: f32,
    /// Wire width, in pixels.
    pub wire_width: f32,
    /// Label font size, in points.
    pub font_size: u16,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            high: Rgb::GREEN,
            low: Rgb::RED,
            outline: Rgb::MAGENTA,
            label: Rgb::WHITE,
            outline_width: 3.0,
            socket_radius: 3.0,
            socket_spacing: 10.0,
            wire_width: 1.0,
            font_size: 32,
        }
    }
}

impl RenderStyle {
    /// The colour for a logic level.
    pub fn state_color(&self, state: bool) -> Rgb {
        if state {
            self.high
        } else {
            self.low
        }
    }
}

// ── Views ──────────────────────────────────────────────────────────

/// A socket as seen by a [`Canvas`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SocketView {
    /// The socket.
    pub id: SocketId,
    /// Its direction.
    pub kind: SocketKind,
    /// Its current state.
    pub state: bool,
    /// Where it sits on the owner's outline.
    pub anchor: Point,
}

/// A registered component as seen by a [`Canvas`].
#[derive(Clone, Debug, PartialEq)]
pub struct ComponentView<'a> {
    /// The component.
    pub id: ComponentId,
    /// Its display label.
    pub name: &'a str,
    /// Where it sits on screen.
    pub placement: Placement,
    /// Its sockets in layout order.
    pub sockets: Vec<SocketView>,
}

/// A connection as seen by a [`Canvas`].
#[derive(Clone, Debug, PartialEq)]
pub struct ConnectionView {
    /// The connection.
    pub id: ConnectionId,
    /// Its last broadcast value.
    pub state: bool,
    /// Its member sockets in wiring order.
    pub members: Vec<SocketView>,
}

impl ConnectionView {
    /// Wire segments: one from every output member to every input member.
    pub fn wires(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let outputs = self.members.iter().filter(|s| s.kind.is_output());
        outputs.flat_map(move |from| {
            self.members
                .iter()
                .filter(|s| s.kind.is_input())
                .map(move |to| (from.anchor, to.anchor))
        })
    }
}

/// A drawing backend.
pub trait Canvas {
    /// Draw one registered component with its sockets.
    fn component(&mut self, view: &ComponentView<'_>, style: &RenderStyle);

    /// Draw one connection.
    fn connection(&mut self, view: &ConnectionView, style: &RenderStyle);
}

// ── Draw pass ──────────────────────────────────────────────────────

fn socket_view(graph: &Graph, id: SocketId, spacing: f32) -> Option<SocketView> {
    let socket = graph.socket(id)?;
    let placement = graph.slot(socket.owner())?.component.placement();
    let index = graph.position_in_kind(id)?;
    Some(SocketView {
        id,
        kind: socket.kind(),
        state: socket.state(),
        anchor: placement.socket_anchor(socket.kind(), index, spacing),
    })
}

impl Board {
    /// Draw every registered component, in registration order, then
    /// every connection.
    ///
    /// Unregistered components are not drawn, but a connection touching
    /// them still is.
    pub fn draw(&self, canvas: &mut dyn Canvas, style: &RenderStyle) {
        let graph = self.graph();
        for id in self.registered() {
            let Some(slot) = graph.slot(id) else {
                continue;
            };
            let view = ComponentView {
                id,
                name: slot.component.name(),
                placement: slot.component.placement(),
                sockets: slot
                    .sockets
                    .iter()
                    .filter_map(|&s| socket_view(graph, s, style.socket_spacing))
                    .collect(),
            };
            canvas.component(&view, style);
        }
        for (id, connection) in self.connections() {
            let view = ConnectionView {
                id,
                state: connection.state(),
                members: connection
                    .members()
                    .iter()
                    .filter_map(|&s| socket_view(graph, s, style.socket_spacing))
                    .collect(),
            };
            canvas.connection(&view, style);
        }
    }
}
