/*
 * Network Taint Checker (ci.NetworkTaint)
 *
 * Flags integers decoded from network byte order that reach a size- or
 * address-sensitive operation while still practically unconstrained.
 *
 * Callbacks:
 * - PostCall : return value of a taint source becomes tainted
 * - PreCall  : copy sink, size is argument 2
 * - Location : element access, the index is checked
 *
 * A sink reports when its operand is tainted AND `operand > threshold` is
 * satisfiable on the current path. Anything the checker cannot interpret
 * (indirect calls, non-symbolic returns, pointer operands, undecidable
 * queries) produces no report.
 */

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, trace};

use super::boundedness::BoundednessOracle;
use super::registry::{CheckerRegistry, EventHandler};
use super::taint_oracle::TaintOracle;
use crate::config::NetworkTaintConfig;
use crate::errors::Result;
use crate::features::taint_analysis::domain::{Finding, SinkClass, SinkSite, TaintSourceRegistry};
use crate::features::taint_analysis::ports::{
    BugReport, CallEvent, CheckerContext, CheckerEvent, EventKind, LocationEvent,
};
use crate::shared::models::MemRegion;

/// Argument index of the byte count in a copy sink call
pub const COPY_SIZE_ARG: usize = 2;

#[derive(Debug, Clone)]
pub struct NetworkTaintChecker {
    sources: TaintSourceRegistry,
    copy_sinks: BTreeSet<String>,
    taint: TaintOracle,
    bounds: BoundednessOracle,
}

impl Default for NetworkTaintChecker {
    fn default() -> Self {
        Self::from_config(&NetworkTaintConfig::default())
    }
}

impl NetworkTaintChecker {
    pub const NAME: &'static str = "ci.NetworkTaint";
    pub const DESCRIPTION: &'static str =
        "Network-derived integers used as copy sizes or array indices without a bounds check";

    pub fn new(
        sources: TaintSourceRegistry,
        copy_sinks: impl IntoIterator<Item = String>,
        bounds: BoundednessOracle,
    ) -> Self {
        Self {
            sources,
            copy_sinks: copy_sinks.into_iter().collect(),
            taint: TaintOracle::new(),
            bounds,
        }
    }

    pub fn from_config(config: &NetworkTaintConfig) -> Self {
        Self::new(
            TaintSourceRegistry::new(config.taint_sources.iter().cloned()),
            config.copy_sinks.iter().cloned(),
            BoundednessOracle::from_config(config),
        )
    }

    pub fn is_copy_sink(&self, callee: &str) -> bool {
        self.copy_sinks.contains(callee)
    }

    /// Copy sink: check the size argument
    pub fn check_pre_call<C: CheckerContext>(&self, call: &CallEvent, ctx: &mut C) {
        let Some(callee) = call.callee_identifier() else {
            return;
        };
        if !self.is_copy_sink(callee) {
            return;
        }

        let site = SinkSite::new(
            SinkClass::CopySink,
            call.arg_sval(COPY_SIZE_ARG),
            ctx.program_point().clone(),
        );
        self.check_sink(&site, ctx);
    }

    /// Element access: check the index
    pub fn check_location<C: CheckerContext>(&self, access: &LocationEvent, ctx: &mut C) {
        let Some(index) = access
            .location
            .as_region()
            .and_then(MemRegion::element_index)
        else {
            return;
        };
        if index.is_undefined() {
            return;
        }

        let site = SinkSite::new(SinkClass::IndexSink, index.clone(), ctx.program_point().clone());
        self.check_sink(&site, ctx);
    }

    /// Taint source: mark the returned symbol
    pub fn check_post_call<C: CheckerContext>(&self, call: &CallEvent, ctx: &mut C) {
        let Some(callee) = call.callee_identifier() else {
            return;
        };
        if !self.sources.is_taint_source(callee) {
            return;
        }

        let Some(symbol) = call.return_value().as_symbol() else {
            trace!(callee, ret = %call.return_value(), "Source returned a non-symbolic value");
            return;
        };

        let next = self.taint.mark_tainted(symbol, ctx.state());
        debug!(callee, %symbol, point = %ctx.program_point(), "Marked tainted");
        ctx.add_transition(next);
    }

    fn check_sink<C: CheckerContext>(&self, site: &SinkSite, ctx: &mut C) {
        let state = ctx.state();
        if !self.taint.is_tainted(&site.operand, state) {
            return;
        }
        if !self
            .bounds
            .is_unconstrained(&site.operand, ctx.sval_builder(), state)
        {
            trace!(operand = %site.operand, point = %site.point, "Tainted operand is bounded");
            return;
        }

        let state = state.clone();
        let Some(node) = ctx.generate_error_node(&state, site.class.tag()) else {
            return;
        };

        let finding = Finding::at_site(Self::NAME, site);
        info!(
            point = %site.point,
            sink = %site.class,
            operand = %site.operand,
            "{}", finding.message
        );
        ctx.emit_report(BugReport { node, finding });
    }

    /// Subscribe this checker's callbacks in `registry`
    pub fn register<C>(self: Arc<Self>, registry: &mut CheckerRegistry<C>) -> Result<()>
    where
        C: CheckerContext + 'static,
    {
        let checker = Arc::clone(&self);
        let on_pre_call: EventHandler<C> =
            Box::new(move |event: &CheckerEvent<'_>, ctx: &mut C| {
                if let CheckerEvent::PreCall(call) = *event {
                    checker.check_pre_call(call, ctx);
                }
            });

        let checker = Arc::clone(&self);
        let on_post_call: EventHandler<C> =
            Box::new(move |event: &CheckerEvent<'_>, ctx: &mut C| {
                if let CheckerEvent::PostCall(call) = *event {
                    checker.check_post_call(call, ctx);
                }
            });

        let checker = self;
        let on_location: EventHandler<C> =
            Box::new(move |event: &CheckerEvent<'_>, ctx: &mut C| {
                if let CheckerEvent::Location(access) = *event {
                    checker.check_location(access, ctx);
                }
            });

        registry.add_checker(
            Self::NAME,
            Self::DESCRIPTION,
            vec![
                (EventKind::PreCall, on_pre_call),
                (EventKind::PostCall, on_post_call),
                (EventKind::Location, on_location),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::KNOWN_CHECKERS;
    use crate::features::smt::domain::ComparisonOp;
    use crate::features::symbolic_trace::infrastructure::{ReplayContext, SimplePathState};
    use crate::features::taint_analysis::ports::PathState;
    use crate::shared::models::{NonLoc, ProgramPoint, SVal, SymbolId};

    fn ctx_at(line: u32) -> ReplayContext {
        let mut ctx = ReplayContext::new(0, SimplePathState::default());
        ctx.set_program_point(ProgramPoint::new("process", line, 1));
        ctx
    }

    fn receive(checker: &NetworkTaintChecker, ctx: &mut ReplayContext, sym: u32) {
        let call = CallEvent::new("ntohl", vec![SVal::symbol(99)], SVal::symbol(sym));
        checker.check_post_call(&call, ctx);
    }

    fn memcpy(size: SVal) -> CallEvent {
        CallEvent::new(
            "memcpy",
            vec![SVal::region(MemRegion::var("dst")), SVal::region(MemRegion::var("src")), size],
            SVal::Unknown,
        )
    }

    #[test]
    fn test_name_is_known_to_config() {
        assert!(KNOWN_CHECKERS.contains(&NetworkTaintChecker::NAME));
    }

    #[test]
    fn test_source_return_becomes_tainted() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        receive(&checker, &mut ctx, 7);

        assert!(ctx.state().is_tainted(&SVal::symbol(7)));
        assert!(ctx.reports().is_empty());
    }

    #[test]
    fn test_non_source_and_indirect_calls_ignored() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        checker.check_post_call(&CallEvent::new("htonl", vec![], SVal::symbol(1)), &mut ctx);
        checker.check_post_call(
            &CallEvent {
                callee: None,
                args: vec![],
                return_value: SVal::symbol(2),
            },
            &mut ctx,
        );

        assert!(!ctx.state().is_tainted(&SVal::symbol(1)));
        assert!(!ctx.state().is_tainted(&SVal::symbol(2)));
    }

    #[test]
    fn test_non_symbolic_return_ignored() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        checker.check_post_call(&CallEvent::new("ntohs", vec![], SVal::int(80)), &mut ctx);
        assert!(ctx.state().tainted_symbols().is_empty());
    }

    #[test]
    fn test_unbounded_copy_size_reported() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        receive(&checker, &mut ctx, 0);

        ctx.set_program_point(ProgramPoint::new("process", 2, 1));
        checker.check_pre_call(&memcpy(SVal::symbol(0)), &mut ctx);

        assert_eq!(ctx.reports().len(), 1);
        let report = &ctx.reports()[0];
        assert_eq!(report.finding.sink_class, SinkClass::CopySink);
        assert_eq!(report.finding.point, ProgramPoint::new("process", 2, 1));
        assert_eq!(report.node.tag, SinkClass::CopySink.tag());
    }

    #[test]
    fn test_bounded_copy_size_not_reported() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        receive(&checker, &mut ctx, 0);

        let bound = NonLoc::compare(
            NonLoc::Symbol(SymbolId(0)),
            ComparisonOp::Le,
            NonLoc::ConcreteInt(1024),
        );
        let bounded = ctx.state().assume(&bound, true);
        ctx.add_transition(bounded);
        checker.check_pre_call(&memcpy(SVal::symbol(0)), &mut ctx);

        assert!(ctx.reports().is_empty());
    }

    #[test]
    fn test_untainted_or_short_copy_not_reported() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        checker.check_pre_call(&memcpy(SVal::symbol(5)), &mut ctx);

        receive(&checker, &mut ctx, 0);
        let short = CallEvent::new("memcpy", vec![SVal::symbol(0)], SVal::Unknown);
        checker.check_pre_call(&short, &mut ctx);

        assert!(ctx.reports().is_empty());
    }

    #[test]
    fn test_tainted_index_reported() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        receive(&checker, &mut ctx, 3);

        let access = LocationEvent {
            location: SVal::element(MemRegion::var("table"), SVal::symbol(3)),
            is_load: true,
        };
        checker.check_location(&access, &mut ctx);

        assert_eq!(ctx.reports().len(), 1);
        assert_eq!(ctx.reports()[0].finding.sink_class, SinkClass::IndexSink);
        assert_eq!(
            ctx.reports()[0].finding.message,
            "Tainted, unconstrained value used as array index"
        );
    }

    #[test]
    fn test_non_element_and_undefined_index_ignored() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        receive(&checker, &mut ctx, 3);

        let plain = LocationEvent {
            location: SVal::region(MemRegion::Symbolic { symbol: SymbolId(3) }),
            is_load: true,
        };
        let undefined = LocationEvent {
            location: SVal::element(MemRegion::var("table"), SVal::Undefined),
            is_load: false,
        };
        checker.check_location(&plain, &mut ctx);
        checker.check_location(&undefined, &mut ctx);

        assert!(ctx.reports().is_empty());
    }

    #[test]
    fn test_one_report_per_point() {
        let checker = NetworkTaintChecker::default();
        let mut ctx = ctx_at(1);
        receive(&checker, &mut ctx, 3);

        let access = LocationEvent {
            location: SVal::element(MemRegion::var("table"), SVal::symbol(3)),
            is_load: true,
        };
        checker.check_location(&access, &mut ctx);
        checker.check_location(&access, &mut ctx);

        assert_eq!(ctx.reports().len(), 1);
    }

    #[test]
    fn test_configured_source() {
        let config = NetworkTaintConfig::default().with_taint_source("xyzzy");
        let checker = NetworkTaintChecker::from_config(&config);
        let mut ctx = ctx_at(1);
        checker.check_post_call(&CallEvent::new("xyzzy", vec![], SVal::symbol(4)), &mut ctx);
        checker.check_pre_call(&memcpy(SVal::symbol(4)), &mut ctx);

        assert_eq!(ctx.reports().len(), 1);
    }

    #[test]
    fn test_register_once() {
        let checker = Arc::new(NetworkTaintChecker::default());
        let mut registry: CheckerRegistry<ReplayContext> = CheckerRegistry::new();

        Arc::clone(&checker).register(&mut registry).unwrap();
        assert!(registry.contains(NetworkTaintChecker::NAME));
        assert_eq!(registry.handler_count(EventKind::PreCall), 1);
        assert_eq!(registry.handler_count(EventKind::PostCall), 1);
        assert_eq!(registry.handler_count(EventKind::Location), 1);

        assert!(checker.register(&mut registry).is_err());
    }
}
