//! End-to-end runs of the `lla-client` binary, invoked through its classic
//! tool names, against a mock daemon.

use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::assert::{Assert, OutputAssertExt};
use lla_core::MergeMode;
use lla_core::ipc::{DmxRequest, MergeModeRequest, PluginQuery, UniverseNameRequest, routes};
use lla_test_utils::tracing_setup::init_test_tracing;
use lla_test_utils::{MockDaemon, RecordedRequest, TestConfigBuilder};
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// A scratch directory holding the config file and the tool symlinks.
struct Workspace {
    dir: TempDir,
    config: PathBuf,
}

impl Workspace {
    fn new(socket: &Path, configure: impl FnOnce(TestConfigBuilder) -> TestConfigBuilder) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = configure(TestConfigBuilder::new().socket_path(socket)).write_to(dir.path());
        Self { dir, config }
    }

    fn for_daemon(daemon: &MockDaemon) -> Self {
        Self::new(daemon.socket_path(), |b| b.timeout_secs(5))
    }

    /// A workspace whose configured socket has nobody listening.
    fn without_daemon() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let socket = dir.path().join("llad.sock");
        let config = TestConfigBuilder::new().socket_path(&socket).write_to(dir.path());
        Self { dir, config }
    }

    /// The binary installed as `name`, with `--config` already given.
    fn tool(&self, name: &str) -> Command {
        let mut cmd = Command::new(self.link(name));
        cmd.arg("--config").arg(&self.config).env_remove("RUST_LOG");
        cmd
    }

    fn link(&self, name: &str) -> PathBuf {
        let link = self.dir.path().join(name);
        if !link.exists() {
            std::os::unix::fs::symlink(env!("CARGO_BIN_EXE_lla-client"), &link).unwrap();
        }
        link
    }
}

/// Run off the runtime so the mock daemon keeps serving meanwhile.
async fn run(mut cmd: Command) -> Assert {
    init_test_tracing();
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
        .assert()
}

#[tokio::test(flavor = "multi_thread")]
async fn test_uni_info_lists_universes() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let assert = run(ws.tool("lla_uni_info")).await.success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
    let rule = "-".repeat(58);
    assert_eq!(
        stdout,
        format!(
            "   ID\t{:>30}\t\tMerge Mode\n{rule}\n    1\t{:>30}\t\tHTP\n    7\t{:>30}\t\tLTP\n{rule}\n",
            "Name", "Front Wash", "Movers"
        )
    );
    assert_eq!(daemon.requests(), vec![RecordedRequest::FetchUniverses]);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plugin_info_summary() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    run(ws.tool("lla_plugin_info"))
        .await
        .success()
        .stdout(predicate::str::starts_with("   ID\tDevice Name\n"))
        .stdout(predicate::str::contains("    2\tArtNet Plugin\n"))
        .stdout(predicate::str::contains("Sends and receives").not());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plugin_info_description() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let mut cmd = ws.tool("lla_plugin_info");
    cmd.args(["-p", "2"]);
    run(cmd)
        .await
        .success()
        .stdout("Sends and receives ArtNet packets.\n");

    assert_eq!(
        daemon.requests(),
        vec![RecordedRequest::FetchPlugins(PluginQuery {
            plugin_id: Some(2),
            include_description: true,
        })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_plugin_info_out_of_range_id_lists_all() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let mut cmd = ws.tool("lla_plugin_info");
    cmd.args(["--plugin_id", "42"]);
    run(cmd)
        .await
        .success()
        .stdout(predicate::str::contains("Enttec Usb Pro Plugin"));

    assert_eq!(
        daemon.requests(),
        vec![RecordedRequest::FetchPlugins(PluginQuery::default())]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_device_info_is_the_default() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    run(ws.tool("lla-client"))
        .await
        .success()
        .stdout(predicate::str::contains("Device 2: ArtNet Node\n"))
        .stdout(predicate::str::contains("  port 1, cap OUT, universe 7\n"));
}

const PATCH_USAGE: &str = concat!(
    "Usage: lla_patch [--patch | --unpatch] --device <dev> --port <port> [--universe <uni>]\n",
    "\n",
    "Control lla port <-> universe mappings.\n",
    "\n",
    "  -a, --patch              Patch this port (default).\n",
    "  -d, --device <device>    Id of device to patch.\n",
    "  -h, --help               Display this help message and exit.\n",
    "  -p, --port <port>        Id of the port to patch.\n",
    "  -r, --unpatch            Unpatch this port.\n",
    "  -u, --universe <uni>     Id of the universe to patch to (default 0).\n",
    "\n",
);

const UNI_NAME_USAGE: &str = concat!(
    "Usage: lla_uni_name --name <name> --universe <uni>\n",
    "\n",
    "Set a name for the specified universe\n",
    "\n",
    "  -h, --help               Display this help message and exit.\n",
    "  -n, --name <name>        Name for the universe.\n",
    "  -u, --universe <uni>     Id of the universe to name (default 0).\n",
    "\n",
);

const UNI_MERGE_USAGE: &str = concat!(
    "Usage: lla_uni_merge --universe <uni> [ --ltp]\n",
    "\n",
    "Change the merge mode for the specified universe. Without --ltp it will\n",
    "revert to HTP mode.\n",
    "\n",
    "  -h, --help               Display this help message and exit.\n",
    "  -l, --ltp                Change to ltp mode.\n",
    "  -u, --universe <uni>     Id of the universe to change.\n",
    "\n",
);

const SET_DMX_USAGE: &str = concat!(
    "Usage: lla_set_dmx --universe <universe> --dmx 0,255,0,255\n",
    "\n",
    "Sets the DMX values for a universe.\n",
    "\n",
    "  -h, --help                      Display this help message and exit.\n",
    "  -u, --universe <universe>       Universe number.\n",
    "  -d, --dmx <values>              Comma separated DMX values.\n",
    "\n",
);

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_required_arguments_print_usage() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let cases: [(&str, &[&str], &str); 4] = [
        ("lla_patch", &["-d", "1"], PATCH_USAGE),
        ("lla_uni_name", &["-n", "Wash"], UNI_NAME_USAGE),
        ("lla_uni_merge", &["-l"], UNI_MERGE_USAGE),
        ("lla_set_dmx", &["-d", "1,2,3"], SET_DMX_USAGE),
    ];
    for (name, args, usage) in cases {
        let mut cmd = ws.tool(name);
        cmd.args(args);
        let assert = run(cmd).await.code(1);
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        assert_eq!(stdout, usage, "{name}");
    }

    assert_eq!(daemon.requests(), Vec::<RecordedRequest>::new());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_help_prints_full_usage() {
    let ws = Workspace::without_daemon();

    for (name, usage) in [("lla_patch", PATCH_USAGE), ("lla_set_dmx", SET_DMX_USAGE)] {
        let mut cmd = ws.tool(name);
        cmd.arg("-h");
        let assert = run(cmd).await.success();
        let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();
        assert_eq!(stdout, usage, "{name}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_attached_value_on_plain_flag_is_not_fatal() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let mut cmd = ws.tool("lla_uni_merge");
    cmd.args(["-u", "1", "--ltp=yes"]);
    run(cmd).await.success().stdout("");

    assert_eq!(
        daemon.requests(),
        vec![RecordedRequest::UniverseMergeMode(MergeModeRequest {
            universe: 1,
            merge_mode: MergeMode::Htp,
        })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_uni_info_with_no_universes() {
    let daemon = MockDaemon::builder()
        .with_fixtures()
        .universes(Vec::new())
        .spawn()
        .await;
    let ws = Workspace::for_daemon(&daemon);

    let rule = "-".repeat(58);
    run(ws.tool("lla_uni_info"))
        .await
        .success()
        .stdout(format!("   ID\t{:>30}\t\tMerge Mode\n{rule}\n{rule}\n", "Name"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_set_dmx_values() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    for values in ["0,255,0,255", "300", ""] {
        let mut cmd = ws.tool("lla_set_dmx");
        cmd.args(["-u", "1", "-d", values]);
        run(cmd).await.success().stdout("");
    }

    assert_eq!(
        daemon.requests(),
        vec![
            RecordedRequest::Dmx(DmxRequest {
                universe: 1,
                data: vec![0, 255, 0, 255],
            }),
            RecordedRequest::Dmx(DmxRequest {
                universe: 1,
                data: vec![255],
            }),
        ]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_help_exits_before_connecting() {
    let ws = Workspace::without_daemon();

    for name in ["lla_patch", "lla_uni_info", "lla_set_dmx", "lla-client"] {
        let mut cmd = ws.tool(name);
        cmd.arg("--help");
        run(cmd)
            .await
            .success()
            .stdout(predicate::str::starts_with(format!("Usage: {name}")));
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn test_connection_failure() {
    let ws = Workspace::without_daemon();

    run(ws.tool("lla_uni_info"))
        .await
        .code(1)
        .stdout("")
        .stderr(predicate::str::contains("error: failed to connect to daemon socket"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reply_error_printed_and_exit_zero() {
    let daemon = MockDaemon::builder()
        .fail(routes::UNIVERSE_NAME, "Universe 3 doesn't exist")
        .spawn()
        .await;
    let ws = Workspace::for_daemon(&daemon);

    let mut cmd = ws.tool("lla_uni_name");
    cmd.args(["-u", "3", "-n", "Stage"]);
    run(cmd)
        .await
        .success()
        .stdout("Universe 3 doesn't exist\n");

    assert_eq!(
        daemon.requests(),
        vec![RecordedRequest::UniverseName(UniverseNameRequest {
            universe: 3,
            name: "Stage".to_string(),
        })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_reply_error_with_strict_exit() {
    let daemon = MockDaemon::builder()
        .fail(routes::UNIVERSE_NAME, "Universe 3 doesn't exist")
        .spawn()
        .await;
    let ws = Workspace::new(daemon.socket_path(), |b| b.strict_exit(true));

    let mut cmd = ws.tool("lla_uni_name");
    cmd.args(["-u", "3", "-n", "Stage"]);
    run(cmd)
        .await
        .code(1)
        .stdout("Universe 3 doesn't exist\n");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_subcommand_form() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let mut cmd = Command::new(ws.link("lla-client"));
    cmd.args(["uni-merge", "-u", "7", "-l", "--config"])
        .arg(&ws.config)
        .env_remove("RUST_LOG");
    run(cmd).await.success();

    assert_eq!(
        daemon.requests(),
        vec![RecordedRequest::UniverseMergeMode(MergeModeRequest {
            universe: 7,
            merge_mode: MergeMode::Ltp,
        })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_subcommand_usage_names_subcommand() {
    let ws = Workspace::without_daemon();

    let mut cmd = Command::new(ws.link("lla-client"));
    cmd.args(["uni-name", "--config"]).arg(&ws.config);
    run(cmd)
        .await
        .code(1)
        .stdout(predicate::str::starts_with("Usage: lla-client uni-name "));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unresponsive_daemon_times_out() {
    let daemon = MockDaemon::builder().unresponsive().spawn().await;
    let ws = Workspace::new(daemon.socket_path(), |b| b.timeout_secs(1));

    run(ws.tool("lla_uni_info"))
        .await
        .code(1)
        .stderr(predicate::str::contains("error: no reply from daemon after 1s"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_flags_are_ignored() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::for_daemon(&daemon);

    let mut cmd = ws.tool("lla_uni_merge");
    cmd.args(["-x", "-u", "7", "--bogus", "stray"]);
    run(cmd).await.success();

    assert_eq!(
        daemon.requests(),
        vec![RecordedRequest::UniverseMergeMode(MergeModeRequest {
            universe: 7,
            merge_mode: MergeMode::Htp,
        })]
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_configured_log_level_reaches_stderr() {
    let daemon = MockDaemon::with_fixtures().await;
    let ws = Workspace::new(daemon.socket_path(), |b| b.log_level("debug"));

    run(ws.tool("lla_uni_info"))
        .await
        .success()
        .stdout(predicate::str::contains("Front Wash"))
        .stderr(predicate::str::contains("resolved invocation"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_invalid_config_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("lla.toml");
    std::fs::write(&config, "[logging]\nlevel = \"loud\"\n").unwrap();
    let link = dir.path().join("lla_uni_info");
    std::os::unix::fs::symlink(env!("CARGO_BIN_EXE_lla-client"), &link).unwrap();

    let mut cmd = Command::new(link);
    cmd.arg("--config").arg(&config);
    run(cmd)
        .await
        .code(1)
        .stderr(predicate::str::starts_with("error: "));
}
