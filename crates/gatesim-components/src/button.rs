//! Momentary push button.

use gatesim_core::{
    Component, ComponentError, InputSample, Interactive, Placement, Point, Rect, SocketKind,
    UpdateContext,
};

const LAYOUT: [SocketKind; 1] = [SocketKind::Output];

/// A source whose output follows "pressed and pointer inside" every tick.
///
/// No memory: releasing the button or moving the pointer off it drops
/// the output on the same tick.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Button {
    placement: Placement,
    sample: InputSample,
}

impl Button {
    /// A button at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the button to `(x, y)`.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.placement.position = Point::new(x, y);
        self
    }
}

impl Component for Button {
    fn name(&self) -> &str {
        "BUT"
    }

    fn layout(&self) -> &[SocketKind] {
        &LAYOUT
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError> {
        ctx.expect_arity(0, 1)?;
        ctx.set_output(0, self.sample.is_active())
    }

    fn as_interactive(&self) -> Option<&dyn Interactive> {
        Some(self)
    }

    fn as_interactive_mut(&mut self) -> Option<&mut dyn Interactive> {
        Some(self)
    }
}

impl Interactive for Button {
    fn region(&self) -> Rect {
        self.placement.rect()
    }

    fn observe(&mut self, sample: InputSample) {
        self.sample = sample;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tick(b: &mut Button, sample: InputSample) -> bool {
        b.observe(sample);
        let mut out = [false];
        b.update(&mut UpdateContext::new(&[], &mut out)).unwrap();
        out[0]
    }

    #[test]
    fn follows_pressed_and_inside() {
        let mut b = Button::new();
        assert!(!tick(&mut b, InputSample::RELEASED));
        assert!(tick(&mut b, InputSample::PRESSED_INSIDE));
        assert!(tick(&mut b, InputSample::PRESSED_INSIDE));
        assert!(!tick(
            &mut b,
            InputSample {
                pressed: true,
                inside: false
            }
        ));
        assert!(!tick(
            &mut b,
            InputSample {
                pressed: false,
                inside: true
            }
        ));
    }

    #[test]
    fn region_tracks_placement() {
        let b = Button::new().at(100.0, 100.0);
        assert!(b.region().contains(Point::new(130.0, 120.0)));
        assert!(!b.region().contains(Point::new(10.0, 10.0)));
    }
}
