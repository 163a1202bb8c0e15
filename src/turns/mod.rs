//! Turn order.
//!
//! The engine keeps player ids in a [`TurnQueue`]; the head is whose turn it
//! is and "pass the turn" is a rotation.

mod queue;

pub use queue::TurnQueue;
