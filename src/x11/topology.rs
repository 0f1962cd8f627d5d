//! Monitor discovery adapters.
//!
//! Adapters are tried in order; `None` means the underlying extension is
//! not present on this server, so the next adapter gets a chance. A `Some`
//! with an empty list is a valid answer (the caller substitutes the
//! whole-screen fallback).

use std::os::raw::{c_int, c_void};

use x11::{xinerama, xlib, xrandr};

use crate::geometry::Rect;
use crate::screen::{DisplayMode, Monitor};

use super::XDisplay;

/// Discovery order: RandR, then Xinerama. Declared as data so the priority
/// is visible in one place.
const ADAPTERS: &[fn(&XDisplay) -> Option<Vec<Monitor>>] = &[randr_monitors, xinerama_monitors];

/// Produce the total desktop rectangle and the monitor list.
pub fn discover(display: &XDisplay) -> (Rect, Vec<Monitor>) {
    let base = display.base_rect();
    let monitors = ADAPTERS
        .iter()
        .find_map(|adapter| adapter(display))
        .unwrap_or_default();
    (base, monitors)
}

/// RandR adapter: per-output geometry, name, mode list and primary flag.
///
/// Monitor list order equals the server's output order; `-monitor N`
/// indices depend on it staying that way.
fn randr_monitors(display: &XDisplay) -> Option<Vec<Monitor>> {
    let mut event_base: c_int = 0;
    let mut error_base: c_int = 0;
    let present = unsafe {
        xrandr::XRRQueryExtension(display.raw(), &mut event_base, &mut error_base) != 0
    };
    if !present {
        log::debug!("RandR extension not present");
        return None;
    }

    let mut monitors = Vec::new();
    unsafe {
        let resources = xrandr::XRRGetScreenResources(display.raw(), display.root());
        if resources.is_null() {
            log::warn!("RandR screen resources query failed");
            return Some(monitors);
        }
        let primary = xrandr::XRRGetOutputPrimary(display.raw(), display.root());

        // The global mode table is fetched once; per-output mode ids are
        // resolved against it.
        let res = &*resources;
        let mode_table = std::slice::from_raw_parts(res.modes, res.nmode.max(0) as usize);
        let outputs = std::slice::from_raw_parts(res.outputs, res.noutput.max(0) as usize);

        for &output in outputs {
            let info_ptr = xrandr::XRRGetOutputInfo(display.raw(), resources, output);
            if info_ptr.is_null() {
                log::warn!("output info query failed, skipping output {output}");
                continue;
            }
            let info = &*info_ptr;
            if info.nmode <= 0 {
                // No supported modes: nothing is physically there.
                log::debug!("skipping mode-less output {output}");
                xrandr::XRRFreeOutputInfo(info_ptr);
                continue;
            }

            let name_bytes =
                std::slice::from_raw_parts(info.name as *const u8, info.nameLen.max(0) as usize);
            let name = String::from_utf8_lossy(name_bytes).into_owned();

            let enabled = info.crtc != 0;
            let rect = if enabled {
                crtc_rect(display, resources, info.crtc)
            } else {
                Rect::default()
            };

            let mode_ids = std::slice::from_raw_parts(info.modes, info.nmode as usize);
            let modes = mode_ids
                .iter()
                .filter_map(|id| mode_table.iter().find(|m| m.id == *id))
                .map(|m| {
                    DisplayMode::from_timings(m.width, m.height, m.dotClock as u64, m.hTotal, m.vTotal)
                })
                .collect();

            monitors.push(Monitor {
                rect,
                name: Some(name),
                enabled,
                primary: output == primary,
                modes,
            });
            xrandr::XRRFreeOutputInfo(info_ptr);
        }
        xrandr::XRRFreeScreenResources(resources);
    }
    Some(monitors)
}

fn crtc_rect(
    display: &XDisplay,
    resources: *mut xrandr::XRRScreenResources,
    crtc: xrandr::RRCrtc,
) -> Rect {
    unsafe {
        let info = xrandr::XRRGetCrtcInfo(display.raw(), resources, crtc);
        if info.is_null() {
            log::warn!("crtc info query failed for crtc {crtc}");
            return Rect::default();
        }
        let rect = Rect::new(
            (*info).x,
            (*info).y,
            (*info).width as i32,
            (*info).height as i32,
        );
        xrandr::XRRFreeCrtcInfo(info);
        rect
    }
}

/// Xinerama adapter: a flat rectangle list with no names, modes or flags.
fn xinerama_monitors(display: &XDisplay) -> Option<Vec<Monitor>> {
    let mut event_base: c_int = 0;
    let mut error_base: c_int = 0;
    unsafe {
        if xinerama::XineramaQueryExtension(display.raw(), &mut event_base, &mut error_base) == 0 {
            log::debug!("Xinerama extension not present");
            return None;
        }
        if xinerama::XineramaIsActive(display.raw()) == 0 {
            return None;
        }
        let mut count: c_int = 0;
        let info = xinerama::XineramaQueryScreens(display.raw(), &mut count);
        if info.is_null() {
            return Some(Vec::new());
        }
        let screens = std::slice::from_raw_parts(info, count.max(0) as usize);
        let monitors = screens
            .iter()
            .map(|s| {
                Monitor::from_rect(Rect::new(
                    s.x_org as i32,
                    s.y_org as i32,
                    s.width as i32,
                    s.height as i32,
                ))
            })
            .collect();
        xlib::XFree(info as *mut c_void);
        Some(monitors)
    }
}
