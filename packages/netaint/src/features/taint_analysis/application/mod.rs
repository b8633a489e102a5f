//! Taint analysis application layer

pub mod taint_check_usecase;

pub use taint_check_usecase::{TaintCheckService, TaintCheckUseCase};
