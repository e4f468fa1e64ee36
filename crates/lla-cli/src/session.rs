//! One run: dispatch, await the reply, hand it to the observer.

use std::io::Write;
use std::time::Duration;

use anyhow::Result;
use lla_core::{ClientError, DaemonApi};
use tracing::{debug, info};

use crate::command::Command;
use crate::dispatch::dispatch;
use crate::observer::{Observer, Outcome};

/// Send `command` and render its reply to `out`.
///
/// `timeout` bounds the wait for the reply; `None` waits forever. A daemon
/// error is printed and reported as [`Outcome::ReplyError`]. Transport
/// failures and timeouts are returned as errors.
pub async fn run<W: Write>(
    api: &dyn DaemonApi,
    command: &Command,
    timeout: Option<Duration>,
    out: W,
) -> Result<Outcome> {
    let mut observer = Observer::new(out);

    let Some(pending) = dispatch(api, command) else {
        info!("no DMX values given, nothing to send");
        return observer.complete_without_request();
    };
    observer.request_sent()?;
    debug!(phase = ?observer.phase(), ?timeout, "request sent");

    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, pending)
            .await
            .map_err(|_| ClientError::Timeout(limit))
            .and_then(|reply| reply),
        None => pending.await,
    };

    match result {
        Ok(reply) => observer.complete(Ok(reply)),
        Err(ClientError::Daemon(message)) => {
            debug!(%message, "daemon reported an error");
            observer.complete(Err(message))
        }
        Err(e) => Err(e.into()),
    }
}
