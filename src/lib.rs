//! # Floem Media
//! Breakpoint activation and responsive values for Floem.
//!
//! A breakpoint is a named media query such as `gt-sm` or `lt-lg`. Elements register
//! values for their style keys per breakpoint, and the [`MediaMarshaller`] keeps the
//! stack of breakpoints whose queries currently match, re-applying every key whose
//! effective value changes as queries start or stop matching.
//!
//! ## Example
//! ```rust
//! use floem_media::{Binding, MediaChange, MediaConfig, MediaMarshaller};
//!
//! let marshaller = MediaMarshaller::new(&MediaConfig::new().print_with("md"));
//! let layout = marshaller.create_element();
//! marshaller
//!     .init(layout, "flex-direction", Binding::new(|dir: &&str| println!("{dir}")))
//!     .unwrap();
//! marshaller.set_value(layout, "flex-direction", "column", "").unwrap();
//! marshaller.set_value(layout, "flex-direction", "row", "gt-xs").unwrap();
//!
//! let gt_xs = marshaller.registry().find_by_alias("gt-xs").unwrap().media_query.clone();
//! marshaller.dispatch(MediaChange::activated(gt_xs));
//! assert_eq!(marshaller.get_value(layout, "flex-direction"), Some("row"));
//! assert_eq!(marshaller.activated_alias(), "gt-xs");
//! ```
//!
//! ## Breakpoints
//! The [registry](BreakpointRegistry) is built once from a [`MediaConfig`]: the default
//! catalog (`xs` through `xl`, plus the overlapping `lt-*` and `gt-*` ranges), optionally
//! the orientation breakpoints, and any custom breakpoints merged by alias. Priorities
//! decide which active breakpoint wins when several of them carry a value.
//!
//! ## Printing
//! With [`MediaConfig::print_with`], the `print` media query lays the page out as if the
//! given breakpoint matched. See [`print_hook`].
//!
//! ## Observing
//! [`MediaMarshaller::track_value`] and [`MediaMarshaller::media_changes`] hand out
//! [`futures::Stream`]s; [`Trigger`]s bound to a key force it to be re-applied.

mod activated;
pub mod breakpoint;
mod config;
mod error;
mod marshaller;
mod match_media;
mod media_change;
pub mod print_hook;
mod registry;
mod trigger;

pub use activated::ActivatedBreakpoints;
pub use breakpoint::{BASE_ALIAS, Breakpoint};
pub use config::MediaConfig;
pub use error::MediaError;
pub use marshaller::{
    Binding, ElementId, MarshallerStats, MediaChangeStream, MediaMarshaller, ResponsiveValue,
    ValueStream,
};
pub use match_media::MatchMedia;
pub use media_change::MediaChange;
pub use print_hook::{PRINT, PrintHook};
pub use registry::BreakpointRegistry;
pub use trigger::Trigger;
