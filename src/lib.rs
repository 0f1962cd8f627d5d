//! # xininfo
//!
//! Query the X11 monitor layout and the active monitor from shell scripts.
//!
//! One invocation opens a single connection to the display server, builds
//! an immutable snapshot of the monitor topology (RandR where available,
//! Xinerama as the legacy fallback, the whole screen as the last resort),
//! resolves where focus currently is, and then answers chainable read-only
//! CLI queries from that snapshot:
//!
//! ```sh
//! xininfo -active-mon
//! xininfo -monitor 1 -mon-size -name
//! xininfo -print
//! ```
//!
//! ## Architecture
//!
//! Discovery and focus resolution are layered fallback chains declared as
//! ordered strategy lists (see [`x11::topology`] and [`x11::focus`]), so
//! the priority order is data, not control flow. The resulting [`Screen`]
//! is read-only for the rest of the process; the [`cli`] dispatcher only
//! carries the selected-monitor index as state.

pub mod cli;
pub mod error;
pub mod geometry;
pub mod screen;
pub mod x11;

// Re-exports
pub use error::{Error, Result};
pub use geometry::{Point, Rect};
pub use screen::{DisplayMode, Monitor, Screen};
pub use crate::x11::Snapshot;
