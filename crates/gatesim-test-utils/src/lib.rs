//! Test utilities and mock types for gatesim development.
//!
//! Provides a scripted [`InputSampler`] ([`ScriptedSampler`]), a
//! [`Canvas`] that records draw calls ([`RecordingCanvas`]), and the
//! [`fixtures`] module with standard circuits.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use std::collections::HashMap;

use gatesim_core::{ComponentId, InputSample, InputSampler, Rect};
use gatesim_engine::{Canvas, ComponentView, ConnectionView, RenderStyle, SocketView};

/// Input sampler with a fixed sample per component.
///
/// Components without a scripted sample read as released. Every call to
/// [`sample`](InputSampler::sample) is logged, so tests can check poll
/// order.
#[derive(Default)]
pub struct ScriptedSampler {
    samples: HashMap<ComponentId, InputSample>,
    polled: Vec<ComponentId>,
}

impl ScriptedSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold the button down over `component`.
    pub fn press(&mut self, component: ComponentId) -> &mut Self {
        self.samples.insert(component, InputSample::PRESSED_INSIDE);
        self
    }

    /// Release the button over `component`.
    pub fn release(&mut self, component: ComponentId) -> &mut Self {
        self.samples.remove(&component);
        self
    }

    /// Script an arbitrary sample for `component`.
    pub fn set(&mut self, component: ComponentId, sample: InputSample) -> &mut Self {
        self.samples.insert(component, sample);
        self
    }

    /// Release everything.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Components sampled so far, in call order.
    pub fn polled(&self) -> &[ComponentId] {
        &self.polled
    }
}

impl InputSampler for ScriptedSampler {
    fn sample(&mut self, component: ComponentId, _region: Rect) -> InputSample {
        self.polled.push(component);
        self.samples
            .get(&component)
            .copied()
            .unwrap_or(InputSample::RELEASED)
    }
}

/// One recorded [`Canvas`] call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Component {
        id: ComponentId,
        name: String,
        sockets: Vec<SocketView>,
    },
    Connection {
        view: ConnectionView,
    },
}

/// Canvas that records every call instead of drawing.
#[derive(Default)]
pub struct RecordingCanvas {
    pub calls: Vec<DrawCall>,
}

impl RecordingCanvas {
    pub fn new() -> Self {
        Self::default()
    }

    /// IDs of the components drawn, in draw order.
    pub fn components(&self) -> Vec<ComponentId> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Component { id, .. } => Some(*id),
                DrawCall::Connection { .. } => None,
            })
            .collect()
    }

    /// Connection views, in draw order.
    pub fn connections(&self) -> Vec<&ConnectionView> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                DrawCall::Connection { view } => Some(view),
                DrawCall::Component { .. } => None,
            })
            .collect()
    }
}

impl Canvas for RecordingCanvas {
    fn component(&mut self, view: &ComponentView<'_>, _style: &RenderStyle) {
        self.calls.push(DrawCall::Component {
            id: view.id,
            name: view.name.to_string(),
            sockets: view.sockets.clone(),
        });
    }

    fn connection(&mut self, view: &ConnectionView, _style: &RenderStyle) {
        self.calls.push(DrawCall::Connection { view: view.clone() });
    }
}
