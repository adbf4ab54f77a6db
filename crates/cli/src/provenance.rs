use serde_json::{json, Value};
use std::process::Command;

/// Provenance block attached to JSON output: code revision, library version,
/// the resolved parameters and run counters.
pub fn block(params: Value, counts: Value) -> Value {
    json!({
        "code_rev": current_git_rev(),
        "endcap_version": endcap::VERSION,
        "params": params,
        "counts": counts,
    })
}

/// `GIT_COMMIT` (build time, then run time), else `git rev-parse HEAD`, else "unknown".
pub fn current_git_rev() -> String {
    let from_env = option_env!("GIT_COMMIT")
        .map(str::to_string)
        .or_else(|| std::env::var("GIT_COMMIT").ok())
        .filter(|rev| !rev.is_empty());
    if let Some(rev) = from_env {
        return rev;
    }
    Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string())
}
