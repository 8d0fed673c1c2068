//! Printing as a breakpoint.
//!
//! While the document is printed, the breakpoint named by
//! [`MediaConfig::print_with_breakpoint`](crate::MediaConfig::print_with_breakpoint) is
//! pushed in front of whatever is active on screen, so print output is laid out as if that
//! breakpoint matched. Other media events are held back until printing ends, then replayed.

use std::rc::Rc;

use tracing::debug;

use crate::{
    activated::ActivatedBreakpoints, breakpoint::Breakpoint, config::MediaConfig,
    media_change::MediaChange, registry::BreakpointRegistry,
};

/// The media query that signals printing.
pub const PRINT: &str = "print";

/// What the print hook manipulates: an activation stack and a way to re-render after
/// changing it.
pub trait HookTarget {
    fn activated_breakpoints(&mut self) -> &mut ActivatedBreakpoints;
    fn update_styles(&mut self);
}

#[derive(Debug)]
pub struct PrintHook {
    registry: Rc<BreakpointRegistry>,
    print_alias: String,
    printing: bool,
    /// Whether start-printing put the print breakpoint on the stack.
    pushed: bool,
    /// Where the print breakpoint sat before it was moved to the front.
    displaced: Option<usize>,
    deferred: Vec<MediaChange>,
}

impl PrintHook {
    pub fn new(registry: Rc<BreakpointRegistry>, config: &MediaConfig) -> Self {
        Self {
            registry,
            print_alias: config.print_alias().to_string(),
            printing: false,
            pushed: false,
            displaced: None,
            deferred: Vec::new(),
        }
    }

    /// Adds the `print` query to `queries` if a print breakpoint is configured.
    pub fn with_print_query(&self, mut queries: Vec<String>) -> Vec<String> {
        if self.has_print_alias() {
            queries.push(PRINT.to_string());
        }
        queries
    }

    pub fn is_print_event(&self, event: &MediaChange) -> bool {
        event.media_query == PRINT
    }

    pub fn is_printing(&self) -> bool {
        self.printing
    }

    /// The configured print alias, `""` when unset.
    pub fn print_alias(&self) -> &str {
        &self.print_alias
    }

    pub fn has_print_alias(&self) -> bool {
        !self.print_alias.is_empty()
    }

    /// The breakpoint standing in while printing. `None` when unconfigured or unknown.
    pub fn print_breakpoint(&self) -> Option<&Rc<Breakpoint>> {
        if !self.has_print_alias() {
            return None;
        }
        self.registry.find_by_alias(&self.print_alias)
    }

    /// Builds the event filter for `target`.
    ///
    /// The returned predicate starts or stops printing on `print` events, re-rendering the
    /// target synchronously, and answers whether the event may propagate further. Nothing
    /// propagates while printing; events other than `print` are kept for
    /// [`take_deferred`](Self::take_deferred) instead.
    pub fn intercept_events<'a, T>(
        &'a mut self,
        target: &'a mut T,
    ) -> impl FnMut(&MediaChange) -> bool + 'a
    where
        T: HookTarget + ?Sized,
    {
        move |event: &MediaChange| {
            if self.is_print_event(event) {
                if event.matches && !self.printing {
                    self.start_printing(target);
                    target.update_styles();
                } else if !event.matches && self.printing {
                    self.stop_printing(target);
                    target.update_styles();
                }
            } else if self.printing {
                self.defer(event.clone());
            }
            !self.printing
        }
    }

    /// Resolves the alias of `event`, substituting the print breakpoint for `print` events.
    pub fn update_event(&self, mut event: MediaChange) -> MediaChange {
        let mut breakpoint = self.registry.find_by_query(&event.media_query);
        if self.is_print_event(&event) {
            breakpoint = self.print_breakpoint();
            event.media_query = breakpoint
                .map(|bp| bp.media_query.clone())
                .unwrap_or_default();
        }
        if let Some(bp) = breakpoint {
            event.merge_breakpoint(bp);
        }
        event
    }

    /// Holds `event` back until printing ends.
    pub fn defer(&mut self, event: MediaChange) {
        self.deferred.push(event);
    }

    /// Drains the events held back while printing, oldest first.
    pub fn take_deferred(&mut self) -> Vec<MediaChange> {
        std::mem::take(&mut self.deferred)
    }

    fn start_printing<T: HookTarget + ?Sized>(&mut self, target: &mut T) {
        self.printing = true;
        let Some(print_bp) = self.print_breakpoint().cloned() else {
            debug!(alias = %self.print_alias, "printing without a known print breakpoint");
            return;
        };

        let activated = target.activated_breakpoints();
        self.displaced = activated.position(&print_bp.alias);
        if let Some(index) = self.displaced {
            activated.remove(index);
        }
        debug!(alias = %print_bp.alias, displaced = ?self.displaced, "start printing");
        activated.push_front(print_bp);
        self.pushed = true;
    }

    fn stop_printing<T: HookTarget + ?Sized>(&mut self, target: &mut T) {
        self.printing = false;
        if !std::mem::take(&mut self.pushed) {
            return;
        }

        let activated = target.activated_breakpoints();
        let print_bp = activated.pop_front();
        if let (Some(index), Some(bp)) = (self.displaced.take(), print_bp) {
            activated.insert(index, bp);
        }
        debug!(deferred = self.deferred.len(), "stop printing");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Target {
        activated: ActivatedBreakpoints,
        updates: usize,
    }

    impl HookTarget for Target {
        fn activated_breakpoints(&mut self) -> &mut ActivatedBreakpoints {
            &mut self.activated
        }

        fn update_styles(&mut self) {
            self.updates += 1;
        }
    }

    fn hook(config: &MediaConfig) -> PrintHook {
        PrintHook::new(Rc::new(BreakpointRegistry::new(config)), config)
    }

    fn aliases(target: &Target) -> Vec<&str> {
        target.activated.aliases().collect()
    }

    fn activate(hook: &PrintHook, target: &mut Target, alias: &str) {
        let bp = hook.registry.find_by_alias(alias).unwrap().clone();
        target.activated.activate(bp);
    }

    #[test]
    fn print_query_only_when_configured() {
        let queries = vec!["(min-width: 1px)".to_string()];

        let unconfigured = hook(&MediaConfig::new());
        assert_eq!(unconfigured.with_print_query(queries.clone()), queries);
        assert_eq!(unconfigured.print_alias(), "");
        assert!(unconfigured.print_breakpoint().is_none());

        let configured = hook(&MediaConfig::new().print_with("sm"));
        let with_print = configured.with_print_query(queries);
        assert_eq!(with_print.last().map(String::as_str), Some(PRINT));
        assert_eq!(configured.print_breakpoint().unwrap().alias, "sm");
    }

    #[test]
    fn printing_pushes_and_pops_print_breakpoint() {
        let mut hook = hook(&MediaConfig::new().print_with("sm"));
        let mut target = Target::default();
        activate(&hook, &mut target, "lg");
        activate(&hook, &mut target, "gt-md");

        let mut intercept = hook.intercept_events(&mut target);
        assert!(!intercept(&MediaChange::activated(PRINT)));
        drop(intercept);
        assert!(hook.is_printing());
        assert_eq!(aliases(&target), ["sm", "lg", "gt-md"]);
        assert_eq!(target.updates, 1);

        let mut intercept = hook.intercept_events(&mut target);
        assert!(intercept(&MediaChange::deactivated(PRINT)));
        drop(intercept);
        assert!(!hook.is_printing());
        assert_eq!(aliases(&target), ["lg", "gt-md"]);
        assert_eq!(target.updates, 2);
    }

    #[test]
    fn repeated_print_events_are_ignored() {
        let mut hook = hook(&MediaConfig::new().print_with("md"));
        let mut target = Target::default();

        let mut intercept = hook.intercept_events(&mut target);
        intercept(&MediaChange::activated(PRINT));
        intercept(&MediaChange::activated(PRINT));
        intercept(&MediaChange::deactivated(PRINT));
        intercept(&MediaChange::deactivated(PRINT));
        drop(intercept);

        assert_eq!(target.updates, 2);
        assert!(target.activated.is_empty());
    }

    #[test]
    fn active_print_breakpoint_is_moved_not_duplicated() {
        let mut hook = hook(&MediaConfig::new().print_with("gt-xs"));
        let mut target = Target::default();
        activate(&hook, &mut target, "md");
        activate(&hook, &mut target, "gt-sm");
        activate(&hook, &mut target, "gt-xs");

        let mut intercept = hook.intercept_events(&mut target);
        intercept(&MediaChange::activated(PRINT));
        drop(intercept);
        assert_eq!(aliases(&target), ["gt-xs", "md", "gt-sm"]);

        let mut intercept = hook.intercept_events(&mut target);
        intercept(&MediaChange::deactivated(PRINT));
        drop(intercept);
        assert_eq!(aliases(&target), ["md", "gt-sm", "gt-xs"]);
    }

    #[test]
    fn events_are_held_back_while_printing() {
        let mut hook = hook(&MediaConfig::new().print_with("sm"));
        let mut target = Target::default();
        let md = hook.registry.find_by_alias("md").unwrap().media_query.clone();

        let mut intercept = hook.intercept_events(&mut target);
        assert!(intercept(&MediaChange::activated(md.clone())));
        assert!(!intercept(&MediaChange::activated(PRINT)));
        assert!(!intercept(&MediaChange::deactivated(md.clone())));
        assert!(intercept(&MediaChange::deactivated(PRINT)));
        drop(intercept);

        assert_eq!(hook.take_deferred(), [MediaChange::deactivated(md)]);
        assert!(hook.take_deferred().is_empty());
    }

    #[test]
    fn unknown_print_alias_degrades_to_base() {
        let mut hook = hook(&MediaConfig::new().print_with("poster"));
        let mut target = Target::default();
        activate(&hook, &mut target, "xs");

        let with_print = hook.with_print_query(Vec::new());
        assert_eq!(with_print, [PRINT]);

        let mut intercept = hook.intercept_events(&mut target);
        assert!(!intercept(&MediaChange::activated(PRINT)));
        drop(intercept);
        assert_eq!(aliases(&target), ["xs"]);
        assert_eq!(target.updates, 1);

        let event = hook.update_event(MediaChange::activated(PRINT));
        assert_eq!(event.media_query, "");
        assert_eq!(event.mq_alias, "");

        let mut intercept = hook.intercept_events(&mut target);
        assert!(intercept(&MediaChange::deactivated(PRINT)));
        drop(intercept);
        assert_eq!(aliases(&target), ["xs"]);
    }

    #[test]
    fn update_event_substitutes_print_alias() {
        let hook = hook(&MediaConfig::new().print_with("lt-md"));

        let event = hook.update_event(MediaChange::activated(PRINT));
        assert_eq!(event.mq_alias, "lt-md");
        assert_eq!(event.suffix, "LtMd");
        assert_eq!(event.media_query, "screen and (max-width: 959.98px)");
        assert_eq!(event.priority, 850);
        assert!(event.matches);

        let event = hook.update_event(MediaChange::deactivated("screen and (min-width: 1280px)"));
        assert_eq!(event.mq_alias, "gt-md");
        assert!(!event.matches);

        let event = hook.update_event(MediaChange::activated("(unknown)"));
        assert_eq!(event.mq_alias, "");
        assert_eq!(event.media_query, "(unknown)");
    }
}
