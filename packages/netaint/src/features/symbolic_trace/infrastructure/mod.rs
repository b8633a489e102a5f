//! Trace engine: path states, value builder and the replayer

pub mod path_state;
pub mod replay;
pub mod sval_builder;

pub use path_state::SimplePathState;
pub use replay::{ReplayContext, TraceReplayer};
pub use sval_builder::SimpleSValBuilder;
