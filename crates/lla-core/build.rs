use std::env;
use std::process::Command;

fn git_describe() -> Option<String> {
    let out = Command::new("git")
        .args(["describe", "--always", "--dirty", "--abbrev=8"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let text = String::from_utf8(out.stdout).ok()?;
    Some(text.trim().to_owned()).filter(|rev| !rev.is_empty())
}

fn main() {
    // Tarball builds have no .git; packagers pass the revision in.
    println!("cargo:rerun-if-env-changed=LLA_SOURCE_REVISION");
    let revision = env::var("LLA_SOURCE_REVISION")
        .ok()
        .filter(|rev| !rev.is_empty())
        .or_else(git_describe)
        .unwrap_or_else(|| "unknown".to_owned());
    println!("cargo:rustc-env=LLA_SOURCE_REVISION={revision}");

    let profile = env::var("PROFILE").unwrap_or_else(|_| "unknown".to_owned());
    println!("cargo:rustc-env=LLA_BUILD_PROFILE={profile}");

    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/refs");
}
