//! The [`UpdateContext`] handed to [`Component::update`](crate::Component::update).
//!
//! The engine snapshots a component's input socket states and current
//! output socket states into the context, calls `update`, then commits
//! each output back through the state-change protocol. Components never
//! touch sockets directly, so downstream propagation always fires.

use crate::error::ComponentError;

/// Input values and writable output slots for one component evaluation.
///
/// Inputs and outputs are in the component's layout order, counted
/// separately: input #0 is the first `Input` socket, output #0 the first
/// `Output` socket. Output slots start at the sockets' current values.
#[derive(Debug)]
pub struct UpdateContext<'a> {
    inputs: &'a [bool],
    outputs: &'a mut [bool],
}

impl<'a> UpdateContext<'a> {
    /// Build a context over `inputs` and `outputs`.
    pub fn new(inputs: &'a [bool], outputs: &'a mut [bool]) -> Self {
        Self { inputs, outputs }
    }

    /// All input values.
    pub fn inputs(&self) -> &[bool] {
        self.inputs
    }

    /// All output values as currently staged.
    pub fn outputs(&self) -> &[bool] {
        self.outputs
    }

    /// Read input `index`.
    ///
    /// # Errors
    ///
    /// [`ComponentError::InputOutOfRange`] if the component has fewer inputs.
    pub fn input(&self, index: usize) -> Result<bool, ComponentError> {
        self.inputs
            .get(index)
            .copied()
            .ok_or(ComponentError::InputOutOfRange {
                index,
                count: self.inputs.len(),
            })
    }

    /// Read the staged value of output `index`.
    ///
    /// Before `update` writes it, this is the output socket's current state.
    ///
    /// # Errors
    ///
    /// [`ComponentError::OutputOutOfRange`] if the component has fewer outputs.
    pub fn output(&self, index: usize) -> Result<bool, ComponentError> {
        self.outputs
            .get(index)
            .copied()
            .ok_or(ComponentError::OutputOutOfRange {
                index,
                count: self.outputs.len(),
            })
    }

    /// Stage `value` for output `index`.
    ///
    /// # Errors
    ///
    /// [`ComponentError::OutputOutOfRange`] if the component has fewer outputs.
    pub fn set_output(&mut self, index: usize, value: bool) -> Result<(), ComponentError> {
        let count = self.outputs.len();
        let slot = self
            .outputs
            .get_mut(index)
            .ok_or(ComponentError::OutputOutOfRange { index, count })?;
        *slot = value;
        Ok(())
    }

    /// Fail unless the context has exactly `inputs` inputs and `outputs` outputs.
    ///
    /// # Errors
    ///
    /// [`ComponentError::ArityMismatch`] on any difference.
    pub fn expect_arity(&self, inputs: usize, outputs: usize) -> Result<(), ComponentError> {
        if self.inputs.len() != inputs || self.outputs.len() != outputs {
            return Err(ComponentError::ArityMismatch {
                expected_inputs: inputs,
                expected_outputs: outputs,
                inputs: self.inputs.len(),
                outputs: self.outputs.len(),
            });
        }
        Ok(())
    }
}
