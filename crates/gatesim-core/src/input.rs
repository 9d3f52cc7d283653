//! Input samples handed to interactive components once per tick.
//!
//! Device polling lives outside the engine. The engine only asks an
//! [`InputSampler`] two questions per interactive component: is the
//! primary button pressed, and is the pointer inside this component's
//! region.

use crate::geometry::{Point, Rect};
use crate::id::ComponentId;

/// What an interactive component sees of the input device on one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSample {
    /// Primary button (or equivalent device) is held down.
    pub pressed: bool,
    /// Pointer lies within the component's region.
    pub inside: bool,
}

impl InputSample {
    /// Button up, pointer elsewhere.
    pub const RELEASED: Self = Self {
        pressed: false,
        inside: false,
    };

    /// Button down with the pointer over the component.
    pub const PRESSED_INSIDE: Self = Self {
        pressed: true,
        inside: true,
    };

    /// Pressed while inside: the only combination that acts on a component.
    pub fn is_active(self) -> bool {
        self.pressed && self.inside
    }
}

/// Source of per-tick input samples.
///
/// Implemented by whatever owns the physical device. The board calls
/// [`sample`](InputSampler::sample) once per tick for every registered
/// interactive component, in registration order.
pub trait InputSampler {
    /// Sample the device for `component`, whose hit region is `region`.
    fn sample(&mut self, component: ComponentId, region: Rect) -> InputSample;
}

/// A pointer position plus primary-button state, sampled once per frame.
///
/// Hit-tests every component against the same pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    /// Primary button held.
    pub pressed: bool,
    /// Pointer position in board space.
    pub position: Point,
}

impl PointerState {
    /// Pointer at `(x, y)` with the button in state `pressed`.
    pub fn new(x: f32, y: f32, pressed: bool) -> Self {
        Self {
            pressed,
            position: Point::new(x, y),
        }
    }
}

impl InputSampler for PointerState {
    fn sample(&mut self, _component: ComponentId, region: Rect) -> InputSample {
        InputSample {
            pressed: self.pressed,
            inside: region.contains(self.position),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Size;

    #[test]
    fn pointer_hit_tests_region() {
        let region = Rect::new(Point::new(100.0, 100.0), Size::new(60.0, 50.0));
        let mut ptr = PointerState::new(120.0, 110.0, true);
        assert_eq!(
            ptr.sample(ComponentId(0), region),
            InputSample::PRESSED_INSIDE
        );

        let mut ptr = PointerState::new(10.0, 10.0, true);
        let s = ptr.sample(ComponentId(0), region);
        assert!(s.pressed);
        assert!(!s.inside);
        assert!(!s.is_active());
    }

    #[test]
    fn released_is_default() {
        assert_eq!(InputSample::default(), InputSample::RELEASED);
    }
}
