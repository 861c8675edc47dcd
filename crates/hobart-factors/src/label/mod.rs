//! Forward-looking labels.
//!
//! Values in this module read rows after their own date. They are training
//! targets and must never be fed back into a model as inputs.

pub mod forward_return;

pub use forward_return::ForwardReturn;
