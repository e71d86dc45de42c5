use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "pokedex";

/// Get the log directory, creating it if needed
///
/// Resolution order:
/// 1. Custom directory from parameter (if provided)
/// 2. Platform log location for the current user
/// 3. Temp directory as last resort
pub fn get_log_directory(custom_dir: Option<&str>) -> Result<PathBuf, std::io::Error> {
    if let Some(dir) = custom_dir {
        return ensure_directory_exists(PathBuf::from(dir));
    }

    let candidate = platform_log_dir();
    match ensure_directory_exists(candidate.clone()) {
        Ok(path) => Ok(path),
        Err(e) => {
            let fallback = env::temp_dir().join(format!("{}_logs", APP_DIR));
            eprintln!(
                "Cannot use log directory {}: {}; falling back to {}",
                candidate.display(),
                e,
                fallback.display()
            );
            ensure_directory_exists(fallback)
        }
    }
}

#[cfg(target_os = "macos")]
fn platform_log_dir() -> PathBuf {
    // ~/Library/Logs/Pokedex
    dirs::home_dir()
        .map(|home| home.join("Library").join("Logs").join("Pokedex"))
        .unwrap_or_else(|| env::temp_dir().join(format!("{}_logs", APP_DIR)))
}

#[cfg(not(target_os = "macos"))]
fn platform_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".local").join("share")))
        .map(|data| data.join(APP_DIR).join("logs"))
        .unwrap_or_else(|| env::temp_dir().join(format!("{}_logs", APP_DIR)))
}

fn ensure_directory_exists(path: PathBuf) -> Result<PathBuf, std::io::Error> {
    if !path.exists() {
        fs::create_dir_all(&path)?;
    }
    if !is_writable(&path) {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            format!("{} is not writable", path.display()),
        ));
    }
    Ok(path)
}

fn is_writable(path: &Path) -> bool {
    let probe = path.join(".write_test");
    let ok = fs::write(&probe, b"test").is_ok();
    let _ = fs::remove_file(&probe);
    ok
}
