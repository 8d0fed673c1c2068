use crate::breakpoint::Breakpoint;

/// Options for the breakpoint registry and the print hook.
///
/// ```rust
/// use floem_media::{Breakpoint, MediaConfig};
///
/// let config = MediaConfig::new()
///     .print_with("sm")
///     .breakpoint(Breakpoint::new("kiosk", "(min-width: 3000px)", 300));
/// assert_eq!(config.print_alias(), "sm");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct MediaConfig {
    /// Alias of the breakpoint that stands in while printing. `None` or an empty alias
    /// disables print handling.
    pub print_with_breakpoint: Option<String>,
    /// Skip the built-in width breakpoints.
    pub disable_default_breakpoints: bool,
    /// Register the orientation breakpoints (`handset`, `tablet`, `web`, ...).
    pub add_orientation_breakpoints: bool,
    /// Custom breakpoints, merged over the built-in ones by alias.
    pub breakpoints: Vec<Breakpoint>,
}

impl MediaConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn print_with(mut self, alias: impl Into<String>) -> Self {
        self.print_with_breakpoint = Some(alias.into());
        self
    }

    pub fn without_default_breakpoints(mut self) -> Self {
        self.disable_default_breakpoints = true;
        self
    }

    pub fn with_orientation_breakpoints(mut self) -> Self {
        self.add_orientation_breakpoints = true;
        self
    }

    pub fn breakpoint(mut self, breakpoint: Breakpoint) -> Self {
        self.breakpoints.push(breakpoint);
        self
    }

    /// The configured print alias, or `""` when printing is not configured.
    pub fn print_alias(&self) -> &str {
        self.print_with_breakpoint.as_deref().unwrap_or_default()
    }
}
