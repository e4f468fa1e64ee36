//! Decide which operation this run performs.
//!
//! One binary serves every operation. The classic `lla_*` names (installed as
//! symlinks to `lla-client`) select the operation by program name; otherwise
//! the first argument may name it as a subcommand. Anything else falls back to
//! listing devices.

use std::ffi::{OsStr, OsString};
use std::path::Path;

/// The operation requested for this run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DeviceInfo,
    DevicePatch,
    PluginInfo,
    UniverseInfo,
    UniverseName,
    UniverseMerge,
    SetDmx,
}

/// Program-name suffixes of the legacy symlinked tools.
const LEGACY_SUFFIXES: [(&str, Mode); 6] = [
    ("_plugin_info", Mode::PluginInfo),
    ("_patch", Mode::DevicePatch),
    ("_uni_info", Mode::UniverseInfo),
    ("_uni_name", Mode::UniverseName),
    ("_uni_merge", Mode::UniverseMerge),
    ("_set_dmx", Mode::SetDmx),
];

const SUBCOMMANDS: [(&str, Mode); 7] = [
    ("device-info", Mode::DeviceInfo),
    ("patch", Mode::DevicePatch),
    ("plugin-info", Mode::PluginInfo),
    ("uni-info", Mode::UniverseInfo),
    ("uni-name", Mode::UniverseName),
    ("uni-merge", Mode::UniverseMerge),
    ("set-dmx", Mode::SetDmx),
];

impl Mode {
    /// Match a program base name against the legacy tool names.
    pub fn from_program_name(name: &str) -> Option<Self> {
        LEGACY_SUFFIXES
            .iter()
            .find(|(suffix, _)| name.ends_with(suffix))
            .map(|(_, mode)| *mode)
    }

    /// Match an explicit subcommand name.
    pub fn from_subcommand(name: &str) -> Option<Self> {
        SUBCOMMANDS
            .iter()
            .find(|(sub, _)| *sub == name)
            .map(|(_, mode)| *mode)
    }

    /// The subcommand spelling of this mode.
    pub fn subcommand(self) -> &'static str {
        SUBCOMMANDS
            .iter()
            .find(|(_, mode)| *mode == self)
            .map(|(sub, _)| *sub)
            .unwrap_or("device-info")
    }

    /// Whether this mode takes the patch flag set instead of the general one.
    pub fn uses_patch_flags(self) -> bool {
        self == Mode::DevicePatch
    }
}

/// The resolved mode plus the arguments left for the option parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub mode: Mode,
    /// Name shown in usage text: the program base name, plus the subcommand
    /// when one was given.
    pub command_name: String,
    /// Arguments for the option parser, program name first.
    pub args: Vec<OsString>,
}

impl Invocation {
    /// Resolve the mode from the raw process arguments.
    pub fn resolve<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args: Vec<OsString> = args.into_iter().map(Into::into).collect();
        if args.is_empty() {
            args.push(OsString::from("lla-client"));
        }

        let program = base_name(&args[0]);

        if let Some(mode) = Mode::from_program_name(&program) {
            return Self {
                mode,
                command_name: program,
                args,
            };
        }

        let subcommand = args
            .get(1)
            .and_then(|arg| arg.to_str())
            .and_then(|name| Mode::from_subcommand(name).map(|mode| (name.to_string(), mode)));

        match subcommand {
            Some((name, mode)) => {
                args.remove(1);
                Self {
                    mode,
                    command_name: format!("{program} {name}"),
                    args,
                }
            }
            None => Self {
                mode: Mode::DeviceInfo,
                command_name: program,
                args,
            },
        }
    }
}

/// The last path component of `argv[0]`.
fn base_name(program: &OsStr) -> String {
    Path::new(program)
        .file_name()
        .unwrap_or(program)
        .to_string_lossy()
        .into_owned()
}
