//! Request middleware: trace correlation and the username access gate.

pub mod access_gate;
pub mod trace;

pub use access_gate::AccessGate;
pub use trace::Trace;
