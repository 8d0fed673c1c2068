use crate::breakpoint::Breakpoint;

/// A media query started or stopped matching.
///
/// Events arrive from a [`MatchMedia`](crate::MatchMedia) source with only `matches` and
/// `media_query` filled in; the alias fields are merged in once the query has been
/// resolved against the registry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaChange {
    pub matches: bool,
    pub media_query: String,
    pub mq_alias: String,
    pub suffix: String,
    pub priority: i32,
}

impl MediaChange {
    pub fn new(matches: bool, media_query: impl Into<String>) -> Self {
        Self {
            matches,
            media_query: media_query.into(),
            ..Default::default()
        }
    }

    pub fn activated(media_query: impl Into<String>) -> Self {
        Self::new(true, media_query)
    }

    pub fn deactivated(media_query: impl Into<String>) -> Self {
        Self::new(false, media_query)
    }

    /// Copies the identity of `breakpoint` onto this event.
    pub fn merge_breakpoint(&mut self, breakpoint: &Breakpoint) {
        self.media_query.clone_from(&breakpoint.media_query);
        self.mq_alias.clone_from(&breakpoint.alias);
        self.suffix.clone_from(&breakpoint.suffix);
        self.priority = breakpoint.priority;
    }
}
