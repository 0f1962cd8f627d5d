//! Monitor topology model.
//!
//! A [`Screen`] is an immutable snapshot of the display server's monitor
//! layout plus the resolved focus point. It is built once at startup by the
//! topology adapters (see [`crate::x11::topology`]) and only read afterwards.

use std::fmt;

use crate::geometry::{Point, Rect};

/// A supported timing configuration of one output.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayMode {
    /// Horizontal resolution in pixels.
    pub width: u32,
    /// Vertical resolution in pixels.
    pub height: u32,
    /// Refresh rate in Hz, `dot_clock / (h_total * v_total)`.
    pub refresh: f64,
}

impl DisplayMode {
    /// Derive a mode from raw timing values. The refresh rate is 0.0 when
    /// the totals are zero (some drivers report such placeholder modes).
    pub fn from_timings(width: u32, height: u32, dot_clock: u64, h_total: u32, v_total: u32) -> Self {
        let refresh = if h_total != 0 && v_total != 0 {
            dot_clock as f64 / (h_total as f64 * v_total as f64)
        } else {
            0.0
        };
        DisplayMode {
            width,
            height,
            refresh,
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} @ {:.2}", self.width, self.height, self.refresh)
    }
}

/// One physical or virtual display rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Monitor {
    pub rect: Rect,
    /// Output name as reported by the server, when the source knows it.
    pub name: Option<String>,
    /// True iff the output currently drives an active CRTC.
    pub enabled: bool,
    /// True iff the server designates this output as primary.
    pub primary: bool,
    /// Supported modes, empty for sources that do not report them.
    pub modes: Vec<DisplayMode>,
}

impl Monitor {
    /// A plain rectangle monitor with no name, modes or flags. Used by the
    /// Xinerama adapter and the whole-screen fallback.
    pub fn from_rect(rect: Rect) -> Self {
        Monitor {
            rect,
            name: None,
            enabled: true,
            primary: false,
            modes: Vec::new(),
        }
    }
}

/// Immutable snapshot of the monitor layout and the focus point.
#[derive(Debug, Clone, PartialEq)]
pub struct Screen {
    /// Total virtual desktop extent.
    pub base: Rect,
    /// Monitors in discovery order. Never empty.
    pub monitors: Vec<Monitor>,
    /// Resolved focus point, `(0, 0)` when no source yielded one.
    pub focus: Point,
}

impl Screen {
    /// Assemble a screen from adapter output, substituting a single
    /// whole-screen monitor when the source yielded nothing.
    pub fn new(base: Rect, monitors: Vec<Monitor>, focus: Point) -> Self {
        let monitors = if monitors.is_empty() {
            log::debug!("no monitors discovered, falling back to whole screen");
            vec![Monitor::from_rect(base)]
        } else {
            monitors
        };
        Screen {
            base,
            monitors,
            focus,
        }
    }

    /// Index of the first monitor containing the focus point, 0 when none
    /// does. First match in stored order is the tie-break for overlapping
    /// layouts; callers depend on it being stable.
    pub fn active_monitor_index(&self) -> usize {
        self.monitors
            .iter()
            .position(|m| m.rect.contains(self.focus))
            .unwrap_or(0)
    }

    /// Largest monitor width.
    pub fn max_width(&self) -> i32 {
        self.monitors.iter().map(|m| m.rect.w).max().unwrap_or(0)
    }

    /// Largest monitor height.
    pub fn max_height(&self) -> i32 {
        self.monitors.iter().map(|m| m.rect.h).max().unwrap_or(0)
    }
}

impl fmt::Display for Screen {
    /// The `-print` layout dump.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total size:    {} {}", self.base.w, self.base.h)?;
        writeln!(f, "Num. monitors: {}", self.monitors.len())?;
        for (i, mon) in self.monitors.iter().enumerate() {
            write!(
                f,
                "               {}: {} {} -> {} {}",
                i, mon.rect.x, mon.rect.y, mon.rect.w, mon.rect.h
            )?;
            if let Some(name) = &mon.name {
                write!(f, " ({name})")?;
            }
            if mon.primary {
                write!(f, " primary")?;
            }
            if !mon.enabled {
                write!(f, " off")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Active mon:    {}", self.active_monitor_index())?;
        writeln!(f, "               {}-{}", self.focus.x, self.focus.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_monitor_screen(focus: Point) -> Screen {
        Screen::new(
            Rect::new(0, 0, 3200, 2160),
            vec![
                Monitor::from_rect(Rect::new(0, 0, 1920, 1080)),
                Monitor::from_rect(Rect::new(1920, 0, 1280, 1024)),
                Monitor::from_rect(Rect::new(0, 1080, 1920, 1080)),
            ],
            focus,
        )
    }

    #[test]
    fn test_active_monitor_from_focus_point() {
        let screen = three_monitor_screen(Point::new(2000, 10));
        assert_eq!(screen.active_monitor_index(), 1);
    }

    #[test]
    fn test_active_monitor_defaults_to_first() {
        // Focus point in a gap between monitors.
        let screen = three_monitor_screen(Point::new(3200, 5000));
        assert_eq!(screen.active_monitor_index(), 0);
    }

    #[test]
    fn test_active_monitor_is_deterministic() {
        let screen = three_monitor_screen(Point::new(100, 1100));
        assert_eq!(screen.active_monitor_index(), 2);
        assert_eq!(screen.active_monitor_index(), 2);
    }

    #[test]
    fn test_overlapping_monitors_lower_index_wins() {
        let screen = Screen::new(
            Rect::new(0, 0, 1920, 1080),
            vec![
                Monitor::from_rect(Rect::new(0, 0, 1920, 1080)),
                Monitor::from_rect(Rect::new(0, 0, 1920, 1080)),
            ],
            Point::new(500, 500),
        );
        assert_eq!(screen.active_monitor_index(), 0);
    }

    #[test]
    fn test_disabled_monitor_zero_rect_never_matches() {
        let screen = Screen::new(
            Rect::new(0, 0, 1920, 1080),
            vec![
                Monitor {
                    rect: Rect::new(0, 0, 0, 0),
                    name: Some("DP-1".into()),
                    enabled: false,
                    primary: false,
                    modes: Vec::new(),
                },
                Monitor::from_rect(Rect::new(0, 0, 1920, 1080)),
            ],
            Point::new(0, 0),
        );
        assert_eq!(screen.active_monitor_index(), 1);
    }

    #[test]
    fn test_empty_topology_falls_back_to_base() {
        let base = Rect::new(0, 0, 1600, 900);
        let screen = Screen::new(base, Vec::new(), Point::default());
        assert_eq!(screen.monitors.len(), 1);
        assert_eq!(screen.monitors[0].rect, base);
        assert_eq!(screen.active_monitor_index(), 0);
        assert_eq!(screen.max_width(), 1600);
    }

    #[test]
    fn test_max_dimensions() {
        let screen = three_monitor_screen(Point::default());
        assert_eq!(screen.max_width(), 1920);
        assert_eq!(screen.max_height(), 1080);
    }

    #[test]
    fn test_refresh_rate_from_timings() {
        let mode = DisplayMode::from_timings(1920, 1080, 148_500_000, 2200, 1125);
        assert!((mode.refresh - 60.0).abs() < 0.005);
        assert_eq!(mode.to_string(), "1920 1080 @ 60.00");
    }

    #[test]
    fn test_refresh_rate_zero_totals() {
        let mode = DisplayMode::from_timings(1024, 768, 65_000_000, 0, 806);
        assert_eq!(mode.refresh, 0.0);
    }

    #[test]
    fn test_print_layout() {
        let mut screen = three_monitor_screen(Point::new(2000, 10));
        screen.monitors[0].name = Some("eDP-1".into());
        screen.monitors[0].primary = true;
        let dump = screen.to_string();
        assert!(dump.contains("Total size:    3200 2160"));
        assert!(dump.contains("Num. monitors: 3"));
        assert!(dump.contains("0: 0 0 -> 1920 1080 (eDP-1) primary"));
        assert!(dump.contains("1: 1920 0 -> 1280 1024"));
        assert!(dump.contains("Active mon:    1"));
        assert!(dump.contains("2000-10"));
    }
}
