#![deny(unsafe_code)]

//! `lla-client`: command-line control of the lla lighting daemon.
//!
//! Installed under the classic tool names (`lla_plugin_info`, `lla_patch`,
//! `lla_uni_info`, `lla_uni_name`, `lla_uni_merge`, `lla_set_dmx`) it behaves
//! like that tool; otherwise the operation is chosen by subcommand and
//! defaults to listing devices.

mod command;
mod dispatch;
mod invocation;
mod observer;
mod options;
mod render;
mod session;
mod usage;

use std::io;
use std::process::ExitCode;

use lla_config::ClientConfig;
use lla_core::LlaClient;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::invocation::{Invocation, Mode};
use crate::observer::Outcome;
use crate::options::Options;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let invocation = Invocation::resolve(std::env::args_os());

    let options = match Options::parse(&invocation) {
        Ok(options) => options,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{e}");
            print_usage(invocation.mode, &invocation.command_name);
            return ExitCode::FAILURE;
        }
    };

    if options.help {
        print_usage(options.mode, &options.command_name);
        return ExitCode::SUCCESS;
    }

    let config = match ClientConfig::load_or_default(&options.config).await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_tracing(options.verbose, &config.logging.level);
    debug!(
        version = %lla_core::build_info::version_string(),
        mode = options.mode.subcommand(),
        command = %options.command_name,
        "resolved invocation"
    );
    for note in &options.notes {
        note.log();
    }

    let command = match Command::try_from(&options) {
        Ok(command) => command,
        Err(missing) => {
            debug!(%missing, "not contacting daemon");
            print_usage(options.mode, &options.command_name);
            return ExitCode::FAILURE;
        }
    };

    let client = match LlaClient::connect(&config.daemon.socket_path).await {
        Ok(client) => client,
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };

    match session::run(&client, &command, config.daemon.timeout(), io::stdout()).await {
        Ok(Outcome::ReplyError) if config.client.strict_exit => ExitCode::FAILURE,
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn print_usage(mode: Mode, command_name: &str) {
    print!("{}", usage::text(mode, command_name));
}

/// Log to stderr. `RUST_LOG` wins over `-v`, which wins over the config file.
fn init_tracing(verbose: u8, configured: &str) {
    let level = match verbose {
        0 => configured,
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .init();
}
