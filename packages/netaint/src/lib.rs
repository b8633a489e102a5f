/*
 * netaint - Network Taint Bounds Checker
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Common models (SVal, regions, program points)
 * - features/    : Vertical slices (smt → taint_analysis → symbolic_trace)
 * - config/      : Versioned YAML configuration
 *
 * Detects values returned by network byte-order conversions (ntohl/ntohs)
 * that reach a memcpy size or an array index without being bounded on the
 * current path.
 */

#![allow(clippy::module_inception)] // Module naming intentional
#![allow(clippy::new_without_default)] // Default impl not always needed

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models and utilities
pub mod shared;

/// Feature modules (constraint checking, taint checker, trace replay)
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{AnalysisConfig, NetworkTaintConfig, ReplayConfig};
pub use errors::{NetaintError, Result};
pub use features::symbolic_trace::{AnalysisReport, ProgramTrace, TraceReplayer};
pub use features::taint_analysis::{
    CheckerRegistry, Finding, NetworkTaintChecker, SinkClass, TaintCheckService, TaintCheckUseCase,
};
pub use shared::models::{NonLoc, ProgramPoint, SVal, SymbolId};
