//! Stateless logic gates.
//!
//! Every gate has a fixed layout: its inputs first, one output last.
//! Two-input gates therefore own sockets `[in0, in1, out]` and NOT owns
//! `[in0, out]`.

use std::fmt;

use gatesim_core::{Component, ComponentError, Placement, Point, SocketKind, UpdateContext};

const TWO_INPUT: [SocketKind; 3] = [SocketKind::Input, SocketKind::Input, SocketKind::Output];
const ONE_INPUT: [SocketKind; 2] = [SocketKind::Input, SocketKind::Output];

/// The boolean function a [`Gate`] computes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// `a ∧ b`
    And,
    /// `a ∨ b`
    Or,
    /// `¬(a ∧ b)`
    Nand,
    /// `¬(a ∨ b)`
    Nor,
    /// `a ⊕ b`
    Xor,
    /// `¬(a ⊕ b)`
    Xnor,
    /// `¬a`
    Not,
}

impl GateKind {
    /// Every kind, in declaration order.
    pub const ALL: [GateKind; 7] = [
        Self::And,
        Self::Or,
        Self::Nand,
        Self::Nor,
        Self::Xor,
        Self::Xnor,
        Self::Not,
    ];

    /// Number of inputs.
    pub fn arity(self) -> usize {
        match self {
            Self::Not => 1,
            _ => 2,
        }
    }

    /// Socket layout: `arity()` inputs followed by one output.
    pub fn layout(self) -> &'static [SocketKind] {
        match self {
            Self::Not => &ONE_INPUT,
            _ => &TWO_INPUT,
        }
    }

    /// Label drawn on the gate body.
    pub fn label(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
            Self::Nand => "NAND",
            Self::Nor => "NOR",
            Self::Xor => "XOR",
            Self::Xnor => "XNOR",
            Self::Not => "NOT",
        }
    }

    /// Evaluate the gate function.
    ///
    /// Returns `None` if `inputs.len()` is not [`arity()`](GateKind::arity).
    pub fn eval(self, inputs: &[bool]) -> Option<bool> {
        match (self, inputs) {
            (Self::Not, &[a]) => Some(!a),
            (Self::And, &[a, b]) => Some(a && b),
            (Self::Or, &[a, b]) => Some(a || b),
            (Self::Nand, &[a, b]) => Some(!(a && b)),
            (Self::Nor, &[a, b]) => Some(!(a || b)),
            (Self::Xor, &[a, b]) => Some(a ^ b),
            (Self::Xnor, &[a, b]) => Some(!(a ^ b)),
            _ => None,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A logic gate.
///
/// The output is re-derived from the inputs on every update; a gate keeps
/// no state of its own. Latches arise only from external feedback wiring.
#[derive(Clone, Debug, PartialEq)]
pub struct Gate {
    kind: GateKind,
    placement: Placement,
}

impl Gate {
    /// A gate of `kind` at the origin.
    pub fn new(kind: GateKind) -> Self {
        Self {
            kind,
            placement: Placement::default(),
        }
    }

    /// Two-input OR.
    pub fn or() -> Self {
        Self::new(GateKind::Or)
    }

    /// Two-input NOR.
    pub fn nor() -> Self {
        Self::new(GateKind::Nor)
    }

    /// Two-input NAND.
    pub fn nand() -> Self {
        Self::new(GateKind::Nand)
    }

    /// Two-input AND.
    pub fn and() -> Self {
        Self::new(GateKind::And)
    }

    /// Two-input XOR.
    pub fn xor() -> Self {
        Self::new(GateKind::Xor)
    }

    /// Two-input XNOR.
    pub fn xnor() -> Self {
        Self::new(GateKind::Xnor)
    }

    /// Inverter.
    pub fn not() -> Self {
        Self::new(GateKind::Not)
    }

    /// Move the gate to `(x, y)`.
    pub fn at(mut self, x: f32, y: f32) -> Self {
        self.placement.position = Point::new(x, y);
        self
    }

    /// The gate function.
    pub fn kind(&self) -> GateKind {
        self.kind
    }
}

impl Component for Gate {
    fn name(&self) -> &str {
        self.kind.label()
    }

    fn layout(&self) -> &[SocketKind] {
        self.kind.layout()
    }

    fn placement(&self) -> Placement {
        self.placement
    }

    fn update(&mut self, ctx: &mut UpdateContext<'_>) -> Result<(), ComponentError> {
        ctx.expect_arity(self.kind.arity(), 1)?;
        let value = self
            .kind
            .eval(ctx.inputs())
            .ok_or(ComponentError::ArityMismatch {
                expected_inputs: self.kind.arity(),
                expected_outputs: 1,
                inputs: ctx.inputs().len(),
                outputs: ctx.outputs().len(),
            })?;
        ctx.set_output(0, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn run(gate: &mut Gate, inputs: &[bool]) -> Result<bool, ComponentError> {
        let mut out = [false];
        gate.update(&mut UpdateContext::new(inputs, &mut out))?;
        Ok(out[0])
    }

    #[test]
    fn or_truth_table() {
        let mut g = Gate::or();
        assert!(!run(&mut g, &[false, false]).unwrap());
        assert!(run(&mut g, &[false, true]).unwrap());
        assert!(run(&mut g, &[true, false]).unwrap());
        assert!(run(&mut g, &[true, true]).unwrap());
    }

    #[test]
    fn nor_truth_table() {
        let mut g = Gate::nor();
        assert!(run(&mut g, &[false, false]).unwrap());
        assert!(!run(&mut g, &[false, true]).unwrap());
        assert!(!run(&mut g, &[true, false]).unwrap());
        assert!(!run(&mut g, &[true, true]).unwrap());
    }

    #[test]
    fn nand_truth_table() {
        let mut g = Gate::nand();
        assert!(run(&mut g, &[false, false]).unwrap());
        assert!(run(&mut g, &[false, true]).unwrap());
        assert!(run(&mut g, &[true, false]).unwrap());
        assert!(!run(&mut g, &[true, true]).unwrap());
    }

    #[test]
    fn not_inverts() {
        let mut g = Gate::not();
        assert!(run(&mut g, &[false]).unwrap());
        assert!(!run(&mut g, &[true]).unwrap());
    }

    #[test]
    fn layout_puts_output_last() {
        for kind in GateKind::ALL {
            let layout = kind.layout();
            assert_eq!(layout.len(), kind.arity() + 1, "{kind}");
            assert_eq!(layout.last(), Some(&SocketKind::Output), "{kind}");
            assert!(layout[..kind.arity()].iter().all(|k| k.is_input()));
        }
    }

    #[test]
    fn wrong_arity_is_rejected() {
        let mut g = Gate::nand();
        match run(&mut g, &[true]) {
            Err(ComponentError::ArityMismatch {
                expected_inputs: 2,
                inputs: 1,
                ..
            }) => {}
            other => panic!("expected ArityMismatch, got {other:?}"),
        }
        let mut g = Gate::not();
        assert!(run(&mut g, &[true, true]).is_err());
    }

    #[test]
    fn at_keeps_size() {
        let g = Gate::nor().at(170.0, 200.0);
        assert_eq!(g.placement().position.x, 170.0);
        assert_eq!(g.placement().position.y, 200.0);
        assert_eq!(g.placement().size.width, 60.0);
    }

    proptest! {
        #[test]
        fn two_input_laws(a: bool, b: bool) {
            prop_assert_eq!(GateKind::Or.eval(&[a, b]), Some(a || b));
            prop_assert_eq!(GateKind::Nor.eval(&[a, b]), Some(!(a || b)));
            prop_assert_eq!(GateKind::Nand.eval(&[a, b]), Some(!(a && b)));
            prop_assert_eq!(GateKind::And.eval(&[a, b]), Some(a && b));
            prop_assert_eq!(GateKind::Xor.eval(&[a, b]), Some(a != b));
            prop_assert_eq!(GateKind::Xnor.eval(&[a, b]), Some(a == b));
        }

        #[test]
        fn update_is_idempotent(kind_idx in 0usize..7, a: bool, b: bool) {
            let kind = GateKind::ALL[kind_idx];
            let inputs = [a, b];
            let inputs = &inputs[..kind.arity()];
            let mut g = Gate::new(kind);
            let mut out = [false];
            g.update(&mut UpdateContext::new(inputs, &mut out)).unwrap();
            let first = out;
            g.update(&mut UpdateContext::new(inputs, &mut out)).unwrap();
            prop_assert_eq!(first, out);
        }
    }
}
