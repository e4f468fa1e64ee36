//! Mode-specific option parsing.
//!
//! Two flag sets exist: the patch tool's and everyone else's. Both keep the
//! permissive habits of the classic `lla_*` tools: unknown flags are dropped,
//! stray operands are ignored, a flag given twice keeps its last value, and
//! numbers are read like C `atoi` (`-u abc` is universe 0).

use std::convert::Infallible;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::{ArgAction, Args, Parser};
use lla_core::parse::{is_exact_int, lenient_int};
use lla_core::{MergeMode, PatchAction};
use tracing::warn;

use crate::invocation::{Invocation, Mode};

/// A number as typed on the command line and as interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LenientInt {
    pub value: i32,
    pub raw: String,
}

fn lenient(s: &str) -> Result<LenientInt, Infallible> {
    Ok(LenientInt {
        value: lenient_int(s),
        raw: s.to_string(),
    })
}

/// Flags shared by both flag sets.
#[derive(Debug, Args)]
struct CommonArgs {
    /// Path to configuration file.
    #[arg(long, default_value = lla_config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Increase log verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[arg(hide = true)]
    operands: Vec<OsString>,
}

/// Flags for every mode except patching.
#[derive(Debug, Parser)]
#[command(
    name = "lla-client",
    version = lla_core::build_info::VERSION,
    disable_help_flag = true,
    args_override_self = true,
    infer_long_args = true
)]
struct GeneralArgs {
    #[arg(short = 'p', long = "plugin_id", value_parser = lenient, allow_hyphen_values = true)]
    plugin_id: Option<LenientInt>,

    #[arg(short, long, value_parser = lenient, allow_hyphen_values = true)]
    universe: Option<LenientInt>,

    #[arg(short, long, allow_hyphen_values = true)]
    name: Option<String>,

    #[arg(short, long, allow_hyphen_values = true)]
    dmx: Option<String>,

    #[arg(short, long)]
    ltp: bool,

    #[arg(short, long)]
    help: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// Flags for the patch tool.
#[derive(Debug, Parser)]
#[command(
    name = "lla_patch",
    version = lla_core::build_info::VERSION,
    disable_help_flag = true,
    args_override_self = true,
    infer_long_args = true
)]
struct PatchArgs {
    #[arg(short = 'a', long, overrides_with = "unpatch")]
    patch: bool,

    #[arg(short = 'r', long, overrides_with = "patch")]
    unpatch: bool,

    #[arg(short, long, value_parser = lenient, allow_hyphen_values = true)]
    device: Option<LenientInt>,

    #[arg(short, long, value_parser = lenient, allow_hyphen_values = true)]
    port: Option<LenientInt>,

    #[arg(short, long, value_parser = lenient, allow_hyphen_values = true)]
    universe: Option<LenientInt>,

    #[arg(short, long)]
    help: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// Something the parser tolerated that is worth a log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNote {
    UnknownFlag(String),
    MissingValue(String),
    /// `--flag=value` given for a flag that takes no value.
    UnexpectedValue(String),
    Coerced {
        flag: &'static str,
        raw: String,
        value: i32,
    },
}

impl ParseNote {
    pub fn log(&self) {
        match self {
            ParseNote::UnknownFlag(flag) => warn!(flag = %flag, "ignoring unrecognised option"),
            ParseNote::MissingValue(flag) => warn!(flag = %flag, "option requires an argument"),
            ParseNote::UnexpectedValue(flag) => {
                warn!(flag = %flag, "option doesn't allow an argument, ignoring it")
            }
            ParseNote::Coerced { flag, raw, value } => {
                warn!(flag, raw = %raw, value, "not a number, using leading digits")
            }
        }
    }
}

/// Everything the command line said, for whichever mode was resolved.
///
/// Fields that do not apply to the mode stay at their defaults and are
/// never looked at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub mode: Mode,
    pub command_name: String,
    pub universe: Option<i32>,
    pub plugin_id: Option<i32>,
    pub device_id: Option<i32>,
    pub port_id: Option<i32>,
    pub patch_action: PatchAction,
    pub merge_mode: MergeMode,
    pub help: bool,
    pub universe_name: String,
    pub dmx: String,
    pub config: PathBuf,
    pub verbose: u8,
    pub notes: Vec<ParseNote>,
}

impl Options {
    fn defaults(invocation: &Invocation) -> Self {
        Self {
            mode: invocation.mode,
            command_name: invocation.command_name.clone(),
            universe: None,
            plugin_id: None,
            device_id: None,
            port_id: None,
            patch_action: PatchAction::Patch,
            merge_mode: MergeMode::Htp,
            help: false,
            universe_name: String::new(),
            dmx: String::new(),
            config: PathBuf::from(lla_config::DEFAULT_CONFIG_FILE),
            verbose: 0,
            notes: Vec::new(),
        }
    }

    /// Parse the invocation's arguments with the flag set its mode uses.
    pub fn parse(invocation: &Invocation) -> Result<Self, clap::Error> {
        let mut options = Self::defaults(invocation);
        let mut notes = Vec::new();

        if invocation.mode.uses_patch_flags() {
            let args: PatchArgs = parse_permissive(invocation.args.clone(), &mut notes)?;
            options.device_id = number("--device", args.device, &mut notes);
            options.port_id = number("--port", args.port, &mut notes);
            options.universe = number("--universe", args.universe, &mut notes);
            options.patch_action = if args.unpatch {
                PatchAction::Unpatch
            } else {
                PatchAction::Patch
            };
            options.help = args.help;
            options.config = args.common.config;
            options.verbose = args.common.verbose;
        } else {
            let args: GeneralArgs = parse_permissive(invocation.args.clone(), &mut notes)?;
            options.plugin_id = number("--plugin_id", args.plugin_id, &mut notes);
            options.universe = number("--universe", args.universe, &mut notes);
            options.universe_name = args.name.unwrap_or_default();
            options.dmx = args.dmx.unwrap_or_default();
            options.merge_mode = if args.ltp {
                MergeMode::Ltp
            } else {
                MergeMode::Htp
            };
            options.help = args.help;
            options.config = args.common.config;
            options.verbose = args.common.verbose;
        }

        options.notes = notes;
        Ok(options)
    }
}

fn number(
    flag: &'static str,
    value: Option<LenientInt>,
    notes: &mut Vec<ParseNote>,
) -> Option<i32> {
    let value = value?;
    if !is_exact_int(&value.raw) {
        notes.push(ParseNote::Coerced {
            flag,
            raw: value.raw,
            value: value.value,
        });
    }
    Some(value.value)
}

/// Drop what `P` does not understand, then let clap parse the rest.
fn parse_permissive<P: Parser>(
    args: Vec<OsString>,
    notes: &mut Vec<ParseNote>,
) -> Result<P, clap::Error> {
    let mut cmd = P::command();
    cmd.build();
    let args = retain_known_flags(&cmd, args, notes);
    P::try_parse_from(args)
}

/// Filter `args` (program name first) down to flags `cmd` defines.
///
/// Unknown long flags and unknown letters inside a short cluster are
/// removed. The token after a value-taking flag is always its value, even if
/// it starts with `-`. A value-taking flag with nothing after it is removed.
/// Everything after `--` is kept as operands.
fn retain_known_flags(
    cmd: &clap::Command,
    args: Vec<OsString>,
    notes: &mut Vec<ParseNote>,
) -> Vec<OsString> {
    let mut iter = args.into_iter();
    let mut kept: Vec<OsString> = iter.next().into_iter().collect();

    while let Some(arg) = iter.next() {
        let Some(text) = arg.to_str().map(str::to_owned) else {
            kept.push(arg);
            continue;
        };

        if text == "--" {
            kept.push(arg);
            kept.extend(iter);
            break;
        }

        if let Some(long) = text.strip_prefix("--") {
            let (name, attached) = match long.split_once('=') {
                Some((name, _)) => (name, true),
                None => (long, false),
            };
            match find_long(cmd, name) {
                None => notes.push(ParseNote::UnknownFlag(text.clone())),
                Some(flag) if attached && !takes_value(flag) => {
                    notes.push(ParseNote::UnexpectedValue(text.clone()))
                }
                Some(flag) if takes_value(flag) && !attached => match iter.next() {
                    Some(value) => {
                        kept.push(arg);
                        kept.push(value);
                    }
                    None => notes.push(ParseNote::MissingValue(text.clone())),
                },
                Some(_) => kept.push(arg),
            }
            continue;
        }

        let Some(cluster) = text.strip_prefix('-').filter(|s| !s.is_empty()) else {
            kept.push(arg);
            continue;
        };

        let mut flags = String::from("-");
        let mut wants_value = false;
        for (i, c) in cluster.char_indices() {
            match find_short(cmd, c) {
                None => notes.push(ParseNote::UnknownFlag(format!("-{c}"))),
                Some(flag) if takes_value(flag) => {
                    flags.push(c);
                    let rest = &cluster[i + c.len_utf8()..];
                    if rest.is_empty() {
                        wants_value = true;
                    } else {
                        flags.push_str(rest);
                    }
                    break;
                }
                Some(_) => flags.push(c),
            }
        }

        let mut value = None;
        if wants_value {
            value = iter.next();
            if value.is_none() {
                if let Some(c) = flags.pop() {
                    notes.push(ParseNote::MissingValue(format!("-{c}")));
                }
            }
        }
        if flags.len() > 1 {
            kept.push(OsString::from(flags));
            kept.extend(value);
        }
    }

    kept
}

/// Exact long name, or an unambiguous prefix of one.
fn find_long<'c>(cmd: &'c clap::Command, name: &str) -> Option<&'c clap::Arg> {
    if name.is_empty() {
        return None;
    }
    if let Some(exact) = cmd.get_arguments().find(|a| a.get_long() == Some(name)) {
        return Some(exact);
    }
    let mut prefixed = cmd
        .get_arguments()
        .filter(|a| a.get_long().is_some_and(|long| long.starts_with(name)));
    match (prefixed.next(), prefixed.next()) {
        (Some(flag), None) => Some(flag),
        _ => None,
    }
}

fn find_short(cmd: &clap::Command, c: char) -> Option<&clap::Arg> {
    cmd.get_arguments().find(|a| a.get_short() == Some(c))
}

fn takes_value(flag: &clap::Arg) -> bool {
    flag.get_action().takes_values()
}
