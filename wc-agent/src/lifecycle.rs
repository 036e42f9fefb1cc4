//! Launch flags and two-phase startup
//!
//! A plain launch (no flags) is the foreground phase: it starts a detached
//! copy of the agent marked with `-d` and exits at once. The copy, or any
//! launch with `-s`, `-l` or `-lf`, runs the board monitor in-process.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::info;

use crate::error::AgentError;

/// Flag marking the already-spawned background instance
pub const SPAWNED_FLAG: &str = "-d";

/// Recognised command-line flags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LaunchFlags {
    /// `-lf`: log to `log.txt` in the data directory
    pub log_to_file: bool,
    /// `-l`: logging enabled, output discarded
    pub log: bool,
    /// `-s`: run as a background service
    pub service: bool,
    /// `-d`: this is the spawned background instance
    pub spawned: bool,
    /// `-r`: wait before starting
    pub delay_start: bool,
    /// `-v`: print the version and exit
    pub version: bool,
}

impl LaunchFlags {
    /// Parse flags, ignoring anything unrecognised
    pub fn parse<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut flags = Self::default();
        for arg in args {
            match arg.as_ref() {
                "-lf" => flags.log_to_file = true,
                "-l" => flags.log = true,
                "-s" => flags.service = true,
                SPAWNED_FLAG => flags.spawned = true,
                "-r" => flags.delay_start = true,
                "-v" => flags.version = true,
                _ => {}
            }
        }
        flags
    }

    /// Decide how this process runs
    pub fn mode(&self) -> RunMode {
        if self.version {
            RunMode::PrintVersion
        } else if self.log || self.log_to_file {
            RunMode::Logged {
                to_file: self.log_to_file,
            }
        } else if self.service {
            RunMode::Service
        } else if self.spawned {
            RunMode::Background
        } else {
            RunMode::Respawn
        }
    }
}

/// How the process runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// Print the version and exit
    PrintVersion,
    /// Foreground with logging to a file or discarded
    Logged { to_file: bool },
    /// Background service started with `-s`
    Service,
    /// Background instance spawned by a foreground launch
    Background,
    /// Foreground launch that spawns the background instance and exits
    Respawn,
}

impl RunMode {
    /// Whether the tray presence belongs to this mode
    pub fn wants_tray(&self) -> bool {
        matches!(self, RunMode::Service | RunMode::Background)
    }
}

/// Start a detached background instance of `exe`.
///
/// The child gets no stdio and is not waited on, so it outlives this process.
pub fn respawn(exe: &Path) -> Result<(), AgentError> {
    let mut command = Command::new(exe);
    command
        .arg(SPAWNED_FLAG)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null());

    #[cfg(unix)]
    {
        use std::os::unix::process::CommandExt;
        // New process group so terminal signals aimed at us skip the child
        command.process_group(0);
    }

    #[cfg(windows)]
    {
        use std::os::windows::process::CommandExt;
        use windows_sys::Win32::System::Threading::{CREATE_NEW_PROCESS_GROUP, DETACHED_PROCESS};
        command.creation_flags(DETACHED_PROCESS | CREATE_NEW_PROCESS_GROUP);
    }

    let child = command.spawn().map_err(AgentError::Respawn)?;
    info!("Spawned background agent (pid {})", child.id());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_flags() {
        let flags = LaunchFlags::parse(["-lf", "-r", "--unknown"]);
        assert!(flags.log_to_file);
        assert!(flags.delay_start);
        assert!(!flags.log);
        assert!(!flags.spawned);
    }

    #[test]
    fn test_no_flags_respawns() {
        assert_eq!(LaunchFlags::parse(Vec::<String>::new()).mode(), RunMode::Respawn);
        assert_eq!(LaunchFlags::parse(["-r"]).mode(), RunMode::Respawn);
    }

    #[test]
    fn test_modes() {
        assert_eq!(LaunchFlags::parse(["-v", "-l"]).mode(), RunMode::PrintVersion);
        assert_eq!(LaunchFlags::parse(["-l"]).mode(), RunMode::Logged { to_file: false });
        assert_eq!(LaunchFlags::parse(["-l", "-lf"]).mode(), RunMode::Logged { to_file: true });
        assert_eq!(LaunchFlags::parse(["-d", "-lf"]).mode(), RunMode::Logged { to_file: true });
        assert_eq!(LaunchFlags::parse(["-s"]).mode(), RunMode::Service);
        assert_eq!(LaunchFlags::parse(["-d"]).mode(), RunMode::Background);
    }

    #[test]
    fn test_tray_only_in_background_modes() {
        assert!(RunMode::Service.wants_tray());
        assert!(RunMode::Background.wants_tray());
        assert!(!RunMode::Logged { to_file: true }.wants_tray());
        assert!(!RunMode::Respawn.wants_tray());
    }

    fn flag() -> impl Strategy<Value = &'static str> {
        prop_oneof![
            Just("-lf"),
            Just("-l"),
            Just("-s"),
            Just("-d"),
            Just("-r"),
            Just("-v"),
            Just("-x"),
        ]
    }

    proptest! {
        #[test]
        fn mode_ignores_flag_order(mut args in prop::collection::vec(flag(), 0..8)) {
            let forward = LaunchFlags::parse(&args).mode();
            args.reverse();
            prop_assert_eq!(LaunchFlags::parse(&args).mode(), forward);
        }
    }
}
