//! Pre-run helper checks shared by concrete steps.
//!
//! Steps use these during their pre-run phase to fail fast, before any step
//! has started real work.

use crate::error::{CairnError, Result};
use crate::version::Version;
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Fail with a validation error unless `binary` can be located on `PATH`.
pub fn assert_binary_present_in_path(step: &str, binary: &str) -> Result<()> {
    match find_binary_in_path(binary) {
        Some(path) => {
            debug!("Found binary '{}' at {}", binary, path.display());
            Ok(())
        }
        None => Err(CairnError::validation(
            step,
            format!("required binary '{binary}' was not found in PATH"),
        )),
    }
}

/// Locate an executable on the `PATH` environment variable.
pub fn find_binary_in_path(binary: &str) -> Option<PathBuf> {
    let path = env::var_os("PATH")?;
    find_in_dirs(binary, env::split_paths(&path))
}

fn find_in_dirs(binary: &str, dirs: impl IntoIterator<Item = PathBuf>) -> Option<PathBuf> {
    for dir in dirs {
        let candidate = dir.join(binary);
        if candidate.is_file() && is_executable(&candidate) {
            return Some(candidate);
        }
    }
    None
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    std::fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(_path: &Path) -> bool {
    true
}

/// Fail with a validation error unless `min <= got < max`.
///
/// All three versions tolerate a leading non-numeric prefix, so values
/// reported as `v1.2.3` work unchanged. The lower bound is inclusive, the
/// upper bound exclusive.
pub fn assert_version_in_range(
    step: &str,
    app: &str,
    got: &str,
    min: &str,
    max: &str,
) -> Result<()> {
    let parse = |raw: &str| {
        Version::parse(raw).map_err(|e| {
            CairnError::validation(step, format!("cannot parse version '{raw}' of '{app}': {e}"))
        })
    };
    let got = parse(got)?;
    let min = parse(min)?;
    let max = parse(max)?;

    if got < min || got >= max {
        return Err(CairnError::validation(
            step,
            format!("'{app}' version {got} is outside the required range [{min}, {max})"),
        ));
    }
    debug!("'{}' version {} is within [{}, {})", app, got, min, max);
    Ok(())
}
