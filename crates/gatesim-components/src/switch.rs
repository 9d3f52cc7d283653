//! Toggle switch.

use gatesim_core::{
    Component, ComponentError, InputSample, Interactive, Placement, Point, Rect, SocketKind,
    UpdateContext,
};

const LAYOUT: [SocketKind; 1] = [SocketKind::Output];

/// A source that inverts its output on every press edge over it.
///
/// A press edge is a tick where "pressed and inside" holds and did not
/// hold on the previous tick. Holding the button down or releasing it
/// never flips the output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Switch {
    placement: Placement,
    sample: InputSample,
    previously_pressed: bool,
}

impl Switch {
    /// A switch at the origin, output low.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the switch to `(x, y)`.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.placement.position = Point::new(x, y);
        self
    }

    /// Whether the last update saw the switch pressed.
    pub fn previously_pressed(&self) -> bool {
        self.previously_pressed
    }
}

impl Component for Switch {
    fn name(&self) -> &str {
        "SWC"
    }

    fn layout(&self) -> &[SocketKind] {
        &LAYOUT
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError> {
        ctx.expect_arity(0, 1)?;
        let pressed = self.sample.is_active();
        if pressed && !self.previously_pressed {
            let current = ctx.output(0)?;
            ctx.set_output(0, !current)?;
        }
        self.previously_pressed = pressed;
        Ok(())
    }

    fn as_interactive(&self) -> Option<&dyn Interactive> {
        Some(self)
    }

    fn as_interactive_mut(&mut self) -> Option<&mut dyn Interactive> {
        Some(self)
    }
}

impl Interactive for Switch {
    fn region(&self) -> Rect {
        self.placement.rect()
    }

    fn observe(&mut self, sample: InputSample) {
        self.sample = sample;
    }
}
