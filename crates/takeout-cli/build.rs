use chrono::Local;
use std::process::Command;

fn main() {
    let short_hash = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .map(|out| String::from_utf8_lossy(&out.stdout).trim().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    // Uncommitted changes to tracked files; untracked files don't count
    let dirty = short_hash != "unknown"
        && Command::new("git")
            .args(["diff", "--quiet", "HEAD"])
            .status()
            .map(|s| !s.success())
            .unwrap_or(false);

    let build_hash = if dirty {
        format!("{short_hash}-dirty-{}", Local::now().format("%Y%m%d-%H%M%S"))
    } else {
        short_hash
    };

    println!("cargo:rustc-env=BUILD_HASH={build_hash}");

    // Workspace root is two levels up
    println!("cargo:rerun-if-changed=../../.git/HEAD");
    println!("cargo:rerun-if-changed=../../.git/index");
}
