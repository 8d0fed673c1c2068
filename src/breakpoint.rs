//! Named breakpoints and the built-in breakpoint catalogs.
//!
//! A [`Breakpoint`] pairs an alias (`sm`, `gt-md`, `handset.portrait`, ...) with the
//! media query that activates it. The priority decides which breakpoint wins when several
//! are active at once: higher priorities are consulted first.
//!
//! The catalogs mirror the usual Material-style width ranges:
//!
//! | alias | width | priority |
//! |-------|-------|----------|
//! | `xs`  | `0 - 599.98px` | 1000 |
//! | `sm`  | `600 - 959.98px` | 900 |
//! | `md`  | `960 - 1279.98px` | 800 |
//! | `lg`  | `1280 - 1919.98px` | 700 |
//! | `xl`  | `1920 - 4999.98px` | 600 |
//!
//! plus the overlapping `lt-*` and `gt-*` ranges.

/// Alias of the base breakpoint, used for values that apply when nothing more specific does.
pub const BASE_ALIAS: &str = "";

/// A named media query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct Breakpoint {
    /// Unique name of the breakpoint, e.g. `gt-sm`.
    pub alias: String,
    /// The media query string handed to the platform matcher.
    pub media_query: String,
    /// Override order. Higher priorities are consulted first.
    pub priority: i32,
    /// Camel-cased alias used to build suffixed keys (`LtSm`).
    pub suffix: String,
    /// Whether this breakpoint's range overlaps the plain width ranges.
    pub overlapping: bool,
}

impl Breakpoint {
    pub fn new(alias: impl Into<String>, media_query: impl Into<String>, priority: i32) -> Self {
        let alias = alias.into();
        let suffix = suffix_for(&alias);
        Self {
            alias,
            media_query: media_query.into(),
            priority,
            suffix,
            overlapping: false,
        }
    }

    /// The synthetic breakpoint that stands for "no breakpoint".
    pub fn base() -> Self {
        Self {
            alias: BASE_ALIAS.to_string(),
            media_query: String::new(),
            priority: i32::MIN,
            suffix: String::new(),
            overlapping: false,
        }
    }

    /// Marks the breakpoint as overlapping.
    pub fn overlapping(mut self) -> Self {
        self.overlapping = true;
        self
    }

    /// Overrides the derived suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn is_base(&self) -> bool {
        self.alias == BASE_ALIAS
    }
}

/// Derives the suffix for an alias: `lt-sm` becomes `LtSm`, `handset.portrait` becomes
/// `HandsetPortrait`.
pub fn suffix_for(alias: &str) -> String {
    alias
        .split(['.', '-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// The standard width breakpoints.
pub fn default_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new(
            "xs",
            "screen and (min-width: 0px) and (max-width: 599.98px)",
            1000,
        ),
        Breakpoint::new(
            "sm",
            "screen and (min-width: 600px) and (max-width: 959.98px)",
            900,
        ),
        Breakpoint::new(
            "md",
            "screen and (min-width: 960px) and (max-width: 1279.98px)",
            800,
        ),
        Breakpoint::new(
            "lg",
            "screen and (min-width: 1280px) and (max-width: 1919.98px)",
            700,
        ),
        Breakpoint::new(
            "xl",
            "screen and (min-width: 1920px) and (max-width: 4999.98px)",
            600,
        ),
        Breakpoint::new("lt-sm", "screen and (max-width: 599.98px)", 950).overlapping(),
        Breakpoint::new("lt-md", "screen and (max-width: 959.98px)", 850).overlapping(),
        Breakpoint::new("lt-lg", "screen and (max-width: 1279.98px)", 750).overlapping(),
        Breakpoint::new("lt-xl", "screen and (max-width: 1919.98px)", 650).overlapping(),
        Breakpoint::new("gt-xs", "screen and (min-width: 600px)", -950).overlapping(),
        Breakpoint::new("gt-sm", "screen and (min-width: 960px)", -850).overlapping(),
        Breakpoint::new("gt-md", "screen and (min-width: 1280px)", -750).overlapping(),
        Breakpoint::new("gt-lg", "screen and (min-width: 1920px)", -650).overlapping(),
    ]
}

const HANDSET_PORTRAIT: &str = "(orientation: portrait) and (max-width: 599.98px)";
const HANDSET_LANDSCAPE: &str = "(orientation: landscape) and (max-width: 959.98px)";
const TABLET_PORTRAIT: &str =
    "(orientation: portrait) and (min-width: 600px) and (max-width: 839.98px)";
const TABLET_LANDSCAPE: &str =
    "(orientation: landscape) and (min-width: 960px) and (max-width: 1279.98px)";
const WEB_PORTRAIT: &str = "(orientation: portrait) and (min-width: 840px)";
const WEB_LANDSCAPE: &str = "(orientation: landscape) and (min-width: 1280px)";

/// Device-class breakpoints keyed on orientation. Only registered when enabled in
/// [`MediaConfig`](crate::MediaConfig).
pub fn orientation_breakpoints() -> Vec<Breakpoint> {
    vec![
        Breakpoint::new(
            "handset",
            format!("{HANDSET_PORTRAIT}, {HANDSET_LANDSCAPE}"),
            2000,
        ),
        Breakpoint::new("handset.landscape", HANDSET_LANDSCAPE, 2000),
        Breakpoint::new("handset.portrait", HANDSET_PORTRAIT, 2000),
        Breakpoint::new(
            "tablet",
            format!("{TABLET_PORTRAIT}, {TABLET_LANDSCAPE}"),
            2100,
        ),
        Breakpoint::new("tablet.landscape", TABLET_LANDSCAPE, 2100),
        Breakpoint::new("tablet.portrait", TABLET_PORTRAIT, 2100),
        Breakpoint::new("web", format!("{WEB_PORTRAIT}, {WEB_LANDSCAPE}"), 2200).overlapping(),
        Breakpoint::new("web.landscape", WEB_LANDSCAPE, 2200).overlapping(),
        Breakpoint::new("web.portrait", WEB_PORTRAIT, 2200).overlapping(),
    ]
}

/// Merges `custom` over `defaults` by alias.
///
/// A custom breakpoint replaces the default with the same alias, keeping the default's
/// media query when it leaves it empty. Unknown aliases are appended and an empty suffix is
/// derived from the alias.
/// The result is sorted by descending priority; equal priorities keep their order.
pub fn merge_by_alias(
    defaults: Vec<Breakpoint>,
    custom: impl IntoIterator<Item = Breakpoint>,
) -> Vec<Breakpoint> {
    let mut merged = defaults;
    for mut bp in custom {
        if bp.suffix.is_empty() {
            bp.suffix = suffix_for(&bp.alias);
        }
        match merged.iter_mut().find(|existing| existing.alias == bp.alias) {
            Some(existing) => {
                if bp.media_query.is_empty() {
                    bp.media_query = std::mem::take(&mut existing.media_query);
                }
                *existing = bp;
            }
            None => merged.push(bp),
        }
    }
    merged.sort_by(|a, b| b.priority.cmp(&a.priority));
    merged
}
