//! Table-driven CLI dispatcher.
//!
//! Flags chain left-to-right in one invocation and are matched against a
//! static command table. All query output goes through an injected writer
//! so dispatch is testable without a terminal; diagnostics go to stderr.
//! Unknown flags are diagnosed and skipped, they do not abort the run.

use std::io::Write;

use crate::error::{Error, Result};
use crate::x11::Snapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Monitor,
    ActiveMon,
    MonSize,
    MonWidth,
    MonHeight,
    MonX,
    MonY,
    MonPos,
    MaxMonWidth,
    MaxMonHeight,
    NumMon,
    Name,
    Modes,
    Print,
    Dpms,
    DpmsState,
    ScreenSaver,
    ScreenSaverState,
    Help,
}

struct CommandSpec {
    flag: &'static str,
    /// Number of required trailing arguments.
    args: usize,
    command: Command,
    help: &'static str,
}

static COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        flag: "-monitor",
        args: 1,
        command: Command::Monitor,
        help: "select monitor N for the queries that follow",
    },
    CommandSpec {
        flag: "-active-mon",
        args: 0,
        command: Command::ActiveMon,
        help: "print the index of the monitor holding focus",
    },
    CommandSpec {
        flag: "-mon-size",
        args: 0,
        command: Command::MonSize,
        help: "print width and height of the selected monitor",
    },
    CommandSpec {
        flag: "-mon-width",
        args: 0,
        command: Command::MonWidth,
        help: "print width of the selected monitor",
    },
    CommandSpec {
        flag: "-mon-height",
        args: 0,
        command: Command::MonHeight,
        help: "print height of the selected monitor",
    },
    CommandSpec {
        flag: "-mon-x",
        args: 0,
        command: Command::MonX,
        help: "print x position of the selected monitor",
    },
    CommandSpec {
        flag: "-mon-y",
        args: 0,
        command: Command::MonY,
        help: "print y position of the selected monitor",
    },
    CommandSpec {
        flag: "-mon-pos",
        args: 0,
        command: Command::MonPos,
        help: "print x and y position of the selected monitor",
    },
    CommandSpec {
        flag: "-max-mon-width",
        args: 0,
        command: Command::MaxMonWidth,
        help: "print the largest monitor width",
    },
    CommandSpec {
        flag: "-max-mon-height",
        args: 0,
        command: Command::MaxMonHeight,
        help: "print the largest monitor height",
    },
    CommandSpec {
        flag: "-num-mon",
        args: 0,
        command: Command::NumMon,
        help: "print the number of monitors",
    },
    CommandSpec {
        flag: "-name",
        args: 0,
        command: Command::Name,
        help: "print the selected monitor's name, or 'unknown'",
    },
    CommandSpec {
        flag: "-modes",
        args: 0,
        command: Command::Modes,
        help: "print the selected monitor's modes as '<w> <h> @ <rate>'",
    },
    CommandSpec {
        flag: "-print",
        args: 0,
        command: Command::Print,
        help: "print the full monitor layout",
    },
    CommandSpec {
        flag: "-dpms",
        args: 0,
        command: Command::Dpms,
        help: "print DPMS capability and state",
    },
    CommandSpec {
        flag: "-dpms-state",
        args: 0,
        command: Command::DpmsState,
        help: "print the DPMS state alone (n/a when unavailable)",
    },
    CommandSpec {
        flag: "-dpms-monitor-state",
        args: 0,
        command: Command::DpmsState,
        help: "historical alias for -dpms-state",
    },
    CommandSpec {
        flag: "-screensaver",
        args: 0,
        command: Command::ScreenSaver,
        help: "print screensaver capability and state",
    },
    CommandSpec {
        flag: "-screensaver-state",
        args: 0,
        command: Command::ScreenSaverState,
        help: "print the screensaver state alone (n/a when unavailable)",
    },
    CommandSpec {
        flag: "-h",
        args: 0,
        command: Command::Help,
        help: "print this help",
    },
    CommandSpec {
        flag: "-help",
        args: 0,
        command: Command::Help,
        help: "alias for -h",
    },
];

/// Look a token up in the command table. A doubled leading dash is
/// tolerated for the historical `--max-mon-width` spellings.
fn lookup(token: &str) -> Option<&'static CommandSpec> {
    COMMANDS.iter().find(|spec| spec.flag == token).or_else(|| {
        token
            .strip_prefix('-')
            .filter(|rest| rest.starts_with('-'))
            .and_then(|rest| COMMANDS.iter().find(|spec| spec.flag == rest))
    })
}

/// True when the invocation only wants usage text; checked before any
/// display connection is opened.
pub fn wants_help(args: &[String]) -> bool {
    args.iter()
        .any(|arg| matches!(lookup(arg), Some(spec) if spec.command == Command::Help))
}

pub fn print_usage(out: &mut impl Write) -> std::io::Result<()> {
    writeln!(out, "usage: xininfo [flags]")?;
    writeln!(out)?;
    for spec in COMMANDS {
        let args = if spec.args > 0 { " N" } else { "" };
        writeln!(out, "  {:<24} {}", format!("{}{}", spec.flag, args), spec.help)?;
    }
    Ok(())
}

/// Run every flag in order against the snapshot.
///
/// The selected monitor starts at the active one and is only changed by
/// `-monitor`; the snapshot itself is never mutated.
pub fn run<W: Write>(args: &[String], snapshot: &Snapshot, out: &mut W) -> Result<()> {
    let screen = &snapshot.screen;
    let mut selected = screen.active_monitor_index();

    let mut iter = args.iter();
    while let Some(token) = iter.next() {
        let Some(spec) = lookup(token) else {
            eprintln!("unknown flag: {token}");
            continue;
        };
        match spec.command {
            Command::Monitor => {
                let value = iter.next().ok_or(Error::MissingArgument(spec.flag))?;
                let index: i64 = value.parse().map_err(|_| Error::InvalidArgument {
                    flag: spec.flag,
                    value: value.clone(),
                })?;
                if index < 0 || index as usize >= screen.monitors.len() {
                    return Err(Error::InvalidMonitor {
                        index,
                        count: screen.monitors.len(),
                    });
                }
                selected = index as usize;
            }
            Command::ActiveMon => writeln!(out, "{}", screen.active_monitor_index())?,
            Command::MonSize => {
                let r = screen.monitors[selected].rect;
                writeln!(out, "{} {}", r.w, r.h)?;
            }
            Command::MonWidth => writeln!(out, "{}", screen.monitors[selected].rect.w)?,
            Command::MonHeight => writeln!(out, "{}", screen.monitors[selected].rect.h)?,
            Command::MonX => writeln!(out, "{}", screen.monitors[selected].rect.x)?,
            Command::MonY => writeln!(out, "{}", screen.monitors[selected].rect.y)?,
            Command::MonPos => {
                let r = screen.monitors[selected].rect;
                writeln!(out, "{} {}", r.x, r.y)?;
            }
            Command::MaxMonWidth => writeln!(out, "{}", screen.max_width())?,
            Command::MaxMonHeight => writeln!(out, "{}", screen.max_height())?,
            Command::NumMon => writeln!(out, "{}", screen.monitors.len())?,
            Command::Name => match &screen.monitors[selected].name {
                Some(name) => writeln!(out, "{name}")?,
                None => writeln!(out, "unknown")?,
            },
            Command::Modes => {
                for mode in &screen.monitors[selected].modes {
                    writeln!(out, "{mode}")?;
                }
            }
            Command::Print => write!(out, "{screen}")?,
            Command::Dpms => writeln!(out, "{}", snapshot.dpms.describe())?,
            Command::DpmsState => writeln!(out, "{}", snapshot.dpms.token())?,
            Command::ScreenSaver => writeln!(out, "{}", snapshot.saver.describe())?,
            Command::ScreenSaverState => writeln!(out, "{}", snapshot.saver.token())?,
            Command::Help => {
                print_usage(out)?;
                return Ok(());
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Point, Rect};
    use crate::screen::{DisplayMode, Monitor, Screen};
    use crate::x11::power::{DpmsState, ScreenSaver};

    fn snapshot() -> Snapshot {
        let mut first = Monitor::from_rect(Rect::new(0, 0, 1920, 1080));
        first.name = Some("eDP-1".into());
        first.primary = true;
        first.modes = vec![DisplayMode::from_timings(1920, 1080, 148_500_000, 2200, 1125)];
        let screen = Screen::new(
            Rect::new(0, 0, 3200, 2160),
            vec![
                first,
                Monitor::from_rect(Rect::new(1920, 0, 1280, 1024)),
                Monitor::from_rect(Rect::new(0, 1080, 1920, 1080)),
            ],
            Point::new(2000, 10),
        );
        Snapshot {
            screen,
            dpms: DpmsState::On,
            saver: ScreenSaver::Absent,
        }
    }

    fn run_to_string(args: &[&str]) -> Result<String> {
        let args: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        let mut out = Vec::new();
        run(&args, &snapshot(), &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_active_mon() {
        assert_eq!(run_to_string(&["-active-mon"]).unwrap(), "1\n");
    }

    #[test]
    fn test_selection_defaults_to_active_monitor() {
        // Focus is on monitor 1, so geometry queries read it without an
        // explicit -monitor.
        assert_eq!(run_to_string(&["-mon-size"]).unwrap(), "1280 1024\n");
    }

    #[test]
    fn test_monitor_selection_chains() {
        let out = run_to_string(&["-monitor", "0", "-mon-pos", "-mon-width"]).unwrap();
        assert_eq!(out, "0 0\n1920\n");
    }

    #[test]
    fn test_invalid_monitor_index() {
        let err = run_to_string(&["-monitor", "5", "-mon-width"]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains('5'));
        assert!(message.contains('0'));
        assert!(message.contains('3'));
    }

    #[test]
    fn test_negative_monitor_index() {
        assert!(matches!(
            run_to_string(&["-monitor", "-1"]),
            Err(Error::InvalidMonitor { index: -1, count: 3 })
        ));
    }

    #[test]
    fn test_monitor_missing_argument() {
        assert!(matches!(
            run_to_string(&["-monitor"]),
            Err(Error::MissingArgument("-monitor"))
        ));
    }

    #[test]
    fn test_monitor_non_numeric_argument() {
        assert!(matches!(
            run_to_string(&["-monitor", "left"]),
            Err(Error::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_max_dimensions() {
        assert_eq!(run_to_string(&["-max-mon-width"]).unwrap(), "1920\n");
        assert_eq!(run_to_string(&["-max-mon-height"]).unwrap(), "1080\n");
        // Historical double-dash spelling.
        assert_eq!(run_to_string(&["--max-mon-width"]).unwrap(), "1920\n");
    }

    #[test]
    fn test_num_mon() {
        assert_eq!(run_to_string(&["-num-mon"]).unwrap(), "3\n");
    }

    #[test]
    fn test_name_known_and_unknown() {
        assert_eq!(run_to_string(&["-monitor", "0", "-name"]).unwrap(), "eDP-1\n");
        assert_eq!(run_to_string(&["-monitor", "1", "-name"]).unwrap(), "unknown\n");
    }

    #[test]
    fn test_modes_output() {
        let out = run_to_string(&["-monitor", "0", "-modes"]).unwrap();
        assert_eq!(out, "1920 1080 @ 60.00\n");
    }

    #[test]
    fn test_unknown_flag_is_skipped() {
        let out = run_to_string(&["-bogus", "-num-mon"]).unwrap();
        assert_eq!(out, "3\n");
    }

    #[test]
    fn test_dpms_and_screensaver_state() {
        assert_eq!(run_to_string(&["-dpms-state"]).unwrap(), "on\n");
        assert_eq!(run_to_string(&["-dpms-monitor-state"]).unwrap(), "on\n");
        assert_eq!(run_to_string(&["-screensaver-state"]).unwrap(), "n/a\n");
        assert_eq!(run_to_string(&["-screensaver"]).unwrap(), "screensaver: n/a\n");
    }

    #[test]
    fn test_print_layout() {
        let out = run_to_string(&["-print"]).unwrap();
        assert!(out.contains("Total size:    3200 2160"));
        assert!(out.contains("Active mon:    1"));
    }

    #[test]
    fn test_wants_help() {
        let args = vec!["-num-mon".to_string(), "-h".to_string()];
        assert!(wants_help(&args));
        assert!(!wants_help(&["-num-mon".to_string()]));
    }

    #[test]
    fn test_usage_lists_every_flag() {
        let mut out = Vec::new();
        print_usage(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        for spec in COMMANDS {
            assert!(text.contains(spec.flag), "missing {}", spec.flag);
        }
    }
}
