use std::{env, fs, io, path::Path, process::Command};

fn main() -> io::Result<()> {
    let version = env::var("CARGO_PKG_VERSION").expect("CARGO_PKG_VERSION");
    let target = env::var("TARGET").expect("TARGET");
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR");
    let out_dir = Path::new(&out_dir);

    let rev = git_rev().unwrap_or_else(|| String::from("unknown"));

    fs::write(
        out_dir.join("simple_version_string"),
        format!("\"{}\"", version),
    )?;
    fs::write(
        out_dir.join("version_string"),
        format!("r#\"{} ({})\nrev {}\"#", version, target, rev),
    )?;

    println!("cargo:rerun-if-env-changed=APKFP_GIT_REVISION");
    println!("cargo:rerun-if-changed=build.rs");
    Ok(())
}

/// Revision from the env when building outside of a checkout, else git
fn git_rev() -> Option<String> {
    if let Ok(rev) = env::var("APKFP_GIT_REVISION") {
        return Some(rev.trim().into());
    }
    let out = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    String::from_utf8(out.stdout)
        .ok()
        .map(|it| it.trim().to_string())
}
