//! DPMS and screensaver state snapshots.
//!
//! Both extensions are optional; an absent extension is reported as a
//! sentinel, never an error.

use std::os::raw::{c_int, c_void};

use x11::xmd::{BOOL, CARD16};
use x11::{dpms, xlib, xss};

use super::XDisplay;

// From X11/extensions/saver.h.
const SCREEN_SAVER_OFF: c_int = 0;
const SCREEN_SAVER_ON: c_int = 1;
const SCREEN_SAVER_DISABLED: c_int = 3;

// From X11/extensions/dpmsconst.h.
const DPMS_MODE_ON: CARD16 = 0;
const DPMS_MODE_STANDBY: CARD16 = 1;
const DPMS_MODE_SUSPEND: CARD16 = 2;
const DPMS_MODE_OFF: CARD16 = 3;

/// Power management state of the display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DpmsState {
    /// The DPMS extension is not present.
    Absent,
    /// DPMS is present but switched off.
    Disabled,
    On,
    Standby,
    Suspend,
    Off,
}

impl DpmsState {
    pub fn query(display: &XDisplay) -> Self {
        let mut event_base: c_int = 0;
        let mut error_base: c_int = 0;
        unsafe {
            if dpms::DPMSQueryExtension(display.raw(), &mut event_base, &mut error_base) == 0 {
                return DpmsState::Absent;
            }
            let mut level: CARD16 = 0;
            let mut state: BOOL = 0;
            if dpms::DPMSInfo(display.raw(), &mut level, &mut state) == 0 {
                return DpmsState::Absent;
            }
            if state == 0 {
                return DpmsState::Disabled;
            }
            match level {
                DPMS_MODE_ON => DpmsState::On,
                DPMS_MODE_STANDBY => DpmsState::Standby,
                DPMS_MODE_SUSPEND => DpmsState::Suspend,
                DPMS_MODE_OFF => DpmsState::Off,
                other => {
                    log::debug!("unknown DPMS power level {other}");
                    DpmsState::Disabled
                }
            }
        }
    }

    /// Machine-parsable token for `-dpms-state`.
    pub fn token(&self) -> &'static str {
        match self {
            DpmsState::Absent | DpmsState::Disabled => "n/a",
            DpmsState::On => "on",
            DpmsState::Standby => "standby",
            DpmsState::Suspend => "suspend",
            DpmsState::Off => "off",
        }
    }

    /// Human-readable capability and state for `-dpms`.
    pub fn describe(&self) -> String {
        match self {
            DpmsState::Absent => "dpms: n/a".into(),
            DpmsState::Disabled => "dpms: disabled".into(),
            state => format!("dpms: enabled\ndpms state: {}", state.token()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaverState {
    Off,
    On,
    Disabled,
}

impl SaverState {
    pub fn token(&self) -> &'static str {
        match self {
            SaverState::Off => "off",
            SaverState::On => "on",
            SaverState::Disabled => "disabled",
        }
    }
}

/// Screensaver capability and state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenSaver {
    /// The MIT screensaver extension is not present.
    Absent,
    Present {
        state: SaverState,
        /// Milliseconds since the last user input.
        idle_ms: u64,
    },
}

impl ScreenSaver {
    pub fn query(display: &XDisplay) -> Self {
        let mut event_base: c_int = 0;
        let mut error_base: c_int = 0;
        unsafe {
            if xss::XScreenSaverQueryExtension(display.raw(), &mut event_base, &mut error_base) == 0
            {
                return ScreenSaver::Absent;
            }
            let info = xss::XScreenSaverAllocInfo();
            if info.is_null() {
                return ScreenSaver::Absent;
            }
            let status = xss::XScreenSaverQueryInfo(display.raw(), display.root(), info);
            let result = if status == 0 {
                ScreenSaver::Absent
            } else {
                let state = match (*info).state {
                    SCREEN_SAVER_ON => SaverState::On,
                    SCREEN_SAVER_DISABLED => SaverState::Disabled,
                    SCREEN_SAVER_OFF => SaverState::Off,
                    other => {
                        log::debug!("unknown screensaver state {other}");
                        SaverState::Off
                    }
                };
                ScreenSaver::Present {
                    state,
                    idle_ms: (*info).idle as u64,
                }
            };
            xlib::XFree(info as *mut c_void);
            result
        }
    }

    /// Machine-parsable token for `-screensaver-state`.
    pub fn token(&self) -> &'static str {
        match self {
            ScreenSaver::Absent => "n/a",
            ScreenSaver::Present { state, .. } => state.token(),
        }
    }

    /// Human-readable capability and state for `-screensaver`.
    pub fn describe(&self) -> String {
        match self {
            ScreenSaver::Absent => "screensaver: n/a".into(),
            ScreenSaver::Present {
                state: SaverState::Disabled,
                ..
            } => "screensaver: disabled".into(),
            ScreenSaver::Present { state, idle_ms } => format!(
                "screensaver: enabled\nscreensaver state: {}\nidle: {} ms",
                state.token(),
                idle_ms
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dpms_tokens() {
        assert_eq!(DpmsState::Absent.token(), "n/a");
        assert_eq!(DpmsState::Disabled.token(), "n/a");
        assert_eq!(DpmsState::On.token(), "on");
        assert_eq!(DpmsState::Off.token(), "off");
    }

    #[test]
    fn test_dpms_describe() {
        assert_eq!(DpmsState::Absent.describe(), "dpms: n/a");
        assert_eq!(DpmsState::Disabled.describe(), "dpms: disabled");
        assert_eq!(
            DpmsState::Standby.describe(),
            "dpms: enabled\ndpms state: standby"
        );
    }

    #[test]
    fn test_screensaver_tokens() {
        assert_eq!(ScreenSaver::Absent.token(), "n/a");
        let on = ScreenSaver::Present {
            state: SaverState::On,
            idle_ms: 5000,
        };
        assert_eq!(on.token(), "on");
        assert_eq!(
            on.describe(),
            "screensaver: enabled\nscreensaver state: on\nidle: 5000 ms"
        );
    }
}
