//! Which build of the lla tools is running.

/// Package version of the tools.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// `git describe` of the source tree, or the packager-supplied revision.
pub const SOURCE_REVISION: &str = env!("LLA_SOURCE_REVISION");

pub const BUILD_PROFILE: &str = env!("LLA_BUILD_PROFILE");

/// The `User-Agent` the client sends to the daemon.
pub fn user_agent() -> String {
    format!("lla-client/{VERSION}")
}

/// Version plus revision and profile, e.g. `0.1.0 (rev 1a2b3c4d, release)`.
pub fn version_string() -> String {
    format!("{VERSION} (rev {SOURCE_REVISION}, {BUILD_PROFILE})")
}
