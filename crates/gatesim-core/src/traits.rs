//! The [`Component`] trait and the [`Interactive`] capability.

use crate::context::UpdateContext;
use crate::error::ComponentError;
use crate::geometry::{Placement, Rect};
use crate::input::InputSample;
use crate::socket::SocketKind;

/// A logic element on a board.
///
/// # Contract
///
/// - `layout()` is read once, when the component is created on a board;
///   the socket factory builds one socket per entry, in order.
/// - `update()` recomputes outputs from inputs by staging values in the
///   [`UpdateContext`]. For gates it must be a pure function of the
///   inputs: no memory beyond what the external wiring feeds back.
/// - `update()` may be called at any time, including with unwired
///   (low) inputs, and must stay deterministic.
///
/// # Object safety
///
/// This trait is object-safe; boards store components as
/// `Box<dyn Component>`.
///
/// # Examples
///
/// A one-input buffer:
///
/// ```
/// use gatesim_core::{Component, ComponentError, Placement, SocketKind, UpdateContext};
///
/// struct Buffer(Placement);
///
/// impl Component for Buffer {
///     fn name(&self) -> &str { "BUF" }
///     fn layout(&self) -> &[SocketKind] { &[SocketKind::Input, SocketKind::Output] }
///     fn placement(&self) -> Placement { self.0 }
///     fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError> {
///         let v = ctx.input(0)?;
///         ctx.set_output(0, v)
///     }
/// }
///
/// let mut buf = Buffer(Placement::default());
/// let mut out = [false];
/// buf.update(&mut UpdateContext::new(&[true], &mut out)).unwrap();
/// assert_eq!(out, [true]);
/// ```
pub trait Component: Send + 'static {
    /// Short label drawn on the component and used in error reports.
    fn name(&self) -> &str;

    /// Socket layout, in order. Inputs first and the output last by
    /// convention; positions are how callers address sockets.
    fn layout(&self) -> &[SocketKind];

    /// Render placement. Opaque to propagation; also the hit region of
    /// interactive components.
    fn placement(&self) -> Placement;

    /// Recompute outputs from the current inputs.
    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError>;

    /// The interactive capability, if this component has one.
    ///
    /// Default: `None`.
    fn as_interactive(&self) -> Option<&dyn Interactive> {
        None
    }

    /// Mutable access to the interactive capability.
    ///
    /// Must return `Some` exactly when [`as_interactive`](Component::as_interactive) does.
    fn as_interactive_mut(&mut self) -> Option<&mut dyn Interactive> {
        None
    }
}

/// Capability of components that sample an input device once per tick.
///
/// The board hands each tick's sample to [`observe`](Interactive::observe)
/// and then calls [`Component::update`], which acts on it.
pub trait Interactive {
    /// Region the pointer must be inside for input to count.
    fn region(&self) -> Rect;

    /// Record this tick's input sample.
    fn observe(&mut self, sample: InputSample);
}
