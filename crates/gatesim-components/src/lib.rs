//! Built-in components for the gatesim logic simulator.
//!
//! - [`Gate`]: stateless logic gates ([`GateKind`] selects the function).
//! - [`Button`]: momentary source, high while pressed over it.
//! - [`Switch`]: toggling source, flips on each press edge over it.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod button;
pub mod gate;
pub mod switch;

pub use button::Button;
pub use gate::{Gate, GateKind};
pub use switch::Switch;
