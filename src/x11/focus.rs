//! Focus point resolution.
//!
//! Strategies run in order, first answer wins: the window manager's
//! current-desktop viewport is authoritative, the raw pointer position is
//! the fallback. When neither yields anything the focus point stays at
//! the origin.

use std::os::raw::{c_int, c_uint};

use x11::xlib;

use crate::geometry::Point;

use super::XDisplay;

const STRATEGIES: &[fn(&XDisplay) -> Option<Point>] = &[desktop_viewport, pointer_position];

/// Resolve the focus point for this invocation.
pub fn resolve(display: &XDisplay) -> Point {
    STRATEGIES
        .iter()
        .find_map(|strategy| strategy(display))
        .unwrap_or_default()
}

/// EWMH signal: `_NET_CURRENT_DESKTOP` indexes into the
/// `_NET_DESKTOP_VIEWPORT` (x, y) pair list. An out-of-bounds index means
/// the window manager left the lists inconsistent; fall through.
fn desktop_viewport(display: &XDisplay) -> Option<Point> {
    let root = display.root();
    let current = display.cardinal_property(root, "_NET_CURRENT_DESKTOP", 1)?;
    let desktop = *current.first()? as usize;
    let viewports = display.cardinal_property(root, "_NET_DESKTOP_VIEWPORT", 1024)?;
    let x = *viewports.get(2 * desktop)? as i32;
    let y = *viewports.get(2 * desktop + 1)? as i32;
    log::debug!("focus from desktop {desktop} viewport: ({x}, {y})");
    Some(Point::new(x, y))
}

/// Root-relative pointer position.
fn pointer_position(display: &XDisplay) -> Option<Point> {
    let mut root_return: xlib::Window = 0;
    let mut child_return: xlib::Window = 0;
    let mut root_x: c_int = 0;
    let mut root_y: c_int = 0;
    let mut win_x: c_int = 0;
    let mut win_y: c_int = 0;
    let mut mask: c_uint = 0;
    let found = unsafe {
        xlib::XQueryPointer(
            display.raw(),
            display.root(),
            &mut root_return,
            &mut child_return,
            &mut root_x,
            &mut root_y,
            &mut win_x,
            &mut win_y,
            &mut mask,
        )
    };
    if found == 0 {
        return None;
    }
    log::debug!("focus from pointer: ({root_x}, {root_y})");
    Some(Point::new(root_x, root_y))
}
