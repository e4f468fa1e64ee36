//! Per-mode usage text, printed for `--help` and for missing arguments.

use crate::invocation::Mode;

/// Usage text for `mode`, naming the program as `cmd`.
pub fn text(mode: Mode, cmd: &str) -> String {
    match mode {
        Mode::DeviceInfo => format!(
            "Usage: {cmd} [--plugin_id <plugin_id>]\n\
             \n\
             Show information on the devices loaded by llad.\n\
             \n\
             \x20 -h, --help          Display this help message and exit.\n\
             \x20 -p, --plugin_id <plugin_id> Show only devices owned by this plugin.\n\
             \n"
        ),
        Mode::DevicePatch => format!(
            "Usage: {cmd} [--patch | --unpatch] --device <dev> --port <port> [--universe <uni>]\n\
             \n\
             Control lla port <-> universe mappings.\n\
             \n\
             \x20 -a, --patch              Patch this port (default).\n\
             \x20 -d, --device <device>    Id of device to patch.\n\
             \x20 -h, --help               Display this help message and exit.\n\
             \x20 -p, --port <port>        Id of the port to patch.\n\
             \x20 -r, --unpatch            Unpatch this port.\n\
             \x20 -u, --universe <uni>     Id of the universe to patch to (default 0).\n\
             \n"
        ),
        Mode::PluginInfo => format!(
            "Usage: {cmd} [--plugin_id <plugin_id>]\n\
             \n\
             Get info on the plugins loaded by llad. Called without arguments this will\n\
             display the plugins loaded by llad. When used with --plugin_id this will display\n\
             the specified plugin's description\n\
             \n\
             \x20 -h, --help          Display this help message and exit.\n\
             \x20 -p, --plugin_id <plugin_id>     Id of the plugin to fetch the description of.\n\
             \n"
        ),
        Mode::UniverseInfo => format!(
            "Usage: {cmd}\n\
             \n\
             Shows info on the active universes in use.\n\
             \n\
             \x20 -h, --help          Display this help message and exit.\n\
             \n"
        ),
        Mode::UniverseName => format!(
            "Usage: {cmd} --name <name> --universe <uni>\n\
             \n\
             Set a name for the specified universe\n\
             \n\
             \x20 -h, --help               Display this help message and exit.\n\
             \x20 -n, --name <name>        Name for the universe.\n\
             \x20 -u, --universe <uni>     Id of the universe to name (default 0).\n\
             \n"
        ),
        Mode::UniverseMerge => format!(
            "Usage: {cmd} --universe <uni> [ --ltp]\n\
             \n\
             Change the merge mode for the specified universe. Without --ltp it will\n\
             revert to HTP mode.\n\
             \n\
             \x20 -h, --help               Display this help message and exit.\n\
             \x20 -l, --ltp                Change to ltp mode.\n\
             \x20 -u, --universe <uni>     Id of the universe to change.\n\
             \n"
        ),
        Mode::SetDmx => format!(
            "Usage: {cmd} --universe <universe> --dmx 0,255,0,255\n\
             \n\
             Sets the DMX values for a universe.\n\
             \n\
             \x20 -h, --help                      Display this help message and exit.\n\
             \x20 -u, --universe <universe>       Universe number.\n\
             \x20 -d, --dmx <values>              Comma separated DMX values.\n\
             \n"
        ),
    }
}
