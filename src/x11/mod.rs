//! X11 backend: connection handling and snapshot queries.
//!
//! Everything the CLI can print is copied out of the server in one fixed
//! sequence of synchronous round-trips at startup; the connection is closed
//! before any query output is produced.

pub mod focus;
pub mod power;
pub mod topology;

use std::ffi::CString;
use std::os::raw::{c_int, c_long, c_uchar, c_ulong, c_void};
use std::ptr::{null, null_mut};

use x11::xlib;

use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::screen::Screen;

use power::{DpmsState, ScreenSaver};

/// Everything one invocation can be asked about, captured at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub screen: Screen,
    pub dpms: DpmsState,
    pub saver: ScreenSaver,
}

/// Open the display, run every query and close the connection again.
pub fn snapshot() -> Result<Snapshot> {
    let display = XDisplay::open()?;
    let (base, monitors) = topology::discover(&display);
    let focus = focus::resolve(&display);
    let screen = Screen::new(base, monitors, focus);
    if screen.monitors.is_empty() {
        // Unreachable after the whole-screen fallback, kept as a guard so
        // index-based accessors never see an empty list.
        return Err(Error::EmptyTopology);
    }
    Ok(Snapshot {
        screen,
        dpms: DpmsState::query(&display),
        saver: ScreenSaver::query(&display),
    })
}

/// Owned connection to the X server, closed on drop.
pub struct XDisplay {
    ptr: *mut xlib::Display,
}

impl XDisplay {
    /// Connect to the server named by `DISPLAY` (xlib reads the variable
    /// itself when given a null display name).
    pub fn open() -> Result<Self> {
        let ptr = unsafe { xlib::XOpenDisplay(null()) };
        if ptr.is_null() {
            return Err(Error::ConnectionFailed);
        }
        unsafe {
            xlib::XSync(ptr, xlib::False);
            xlib::XSetErrorHandler(Some(handle_x_error));
            xlib::XSync(ptr, xlib::False);
        }
        Ok(XDisplay { ptr })
    }

    pub fn raw(&self) -> *mut xlib::Display {
        self.ptr
    }

    pub fn root(&self) -> xlib::Window {
        unsafe { xlib::XDefaultRootWindow(self.ptr) }
    }

    /// Total virtual desktop extent of the default screen.
    pub fn base_rect(&self) -> Rect {
        unsafe {
            let screen = xlib::XDefaultScreen(self.ptr);
            Rect::new(
                0,
                0,
                xlib::XDisplayWidth(self.ptr, screen),
                xlib::XDisplayHeight(self.ptr, screen),
            )
        }
    }

    /// Read a CARDINAL array property from a window.
    ///
    /// Returns `None` when the property is missing, of the wrong type or
    /// empty. Format-32 property data arrives as C longs regardless of
    /// platform word size.
    pub fn cardinal_property(
        &self,
        window: xlib::Window,
        name: &str,
        max_items: c_long,
    ) -> Option<Vec<u32>> {
        let c_name = CString::new(name).ok()?;
        unsafe {
            let atom = xlib::XInternAtom(self.ptr, c_name.as_ptr(), xlib::False);
            if atom == 0 {
                return None;
            }
            let mut actual_type: xlib::Atom = 0;
            let mut actual_format: c_int = 0;
            let mut nitems: c_ulong = 0;
            let mut bytes_after: c_ulong = 0;
            let mut data: *mut c_uchar = null_mut();
            let status = xlib::XGetWindowProperty(
                self.ptr,
                window,
                atom,
                0,
                max_items,
                xlib::False,
                xlib::XA_CARDINAL,
                &mut actual_type,
                &mut actual_format,
                &mut nitems,
                &mut bytes_after,
                &mut data,
            );
            if status != 0 || data.is_null() {
                return None;
            }
            let values = if actual_type == xlib::XA_CARDINAL && actual_format == 32 && nitems > 0 {
                let longs = std::slice::from_raw_parts(data as *const c_long, nitems as usize);
                Some(longs.iter().map(|&v| v as u32).collect())
            } else {
                None
            };
            xlib::XFree(data as *mut c_void);
            values
        }
    }
}

impl Drop for XDisplay {
    fn drop(&mut self) {
        unsafe {
            xlib::XCloseDisplay(self.ptr);
        }
    }
}

/// Tolerate BadWindow (a window can vanish between the property read and
/// any follow-up request); log everything else instead of aborting, the
/// default xlib handler calls exit().
unsafe extern "C" fn handle_x_error(
    _display: *mut xlib::Display,
    event: *mut xlib::XErrorEvent,
) -> c_int {
    let event = unsafe { &*event };
    if event.error_code != xlib::BadWindow {
        log::warn!(
            "X error: request code={}, error code={}",
            event.request_code,
            event.error_code
        );
    }
    0
}
