use std::process::Command;

/// Run `git rev-parse` with the given extra arguments, falling back to
/// "unknown" outside a git checkout.
fn git_rev(args: &[&str]) -> String {
    let output = Command::new("git").arg("rev-parse").args(args).arg("HEAD").output();

    match output {
        Ok(output) if output.status.success() => String::from_utf8(output.stdout)
            .map(|s| s.trim().to_string())
            .unwrap_or_else(|_| "unknown".to_string()),
        _ => "unknown".to_string(),
    }
}

fn main() {
    // Capture git commit hash at build time for `swe --version`
    println!("cargo:rustc-env=GIT_HASH={}", git_rev(&["--short"]));

    // rerun build script if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
}
