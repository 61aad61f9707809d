//! Request middleware. Currently only request tracing.

pub mod trace;

pub use trace::Trace;
