//! Runtime configuration
//!
//! Read from the environment:
//! - `SLFIT_DATABASE_PATH`: SQLite file (default `<project>/data/slfit.db`)
//! - `RUST_LOG`: tracing filter, on top of [`DEFAULT_LOG_DIRECTIVE`]

use std::path::{Path, PathBuf};

pub const DATABASE_PATH_ENV: &str = "SLFIT_DATABASE_PATH";
pub const DEFAULT_LOG_DIRECTIVE: &str = "slfit=info";

#[derive(Debug, Clone)]
pub struct Config {
    pub database_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_path: database_path_from(std::env::var(DATABASE_PATH_ENV).ok()),
        }
    }
}

fn database_path_from(env_value: Option<String>) -> PathBuf {
    match env_value.filter(|v| !v.trim().is_empty()) {
        Some(path) => PathBuf::from(path),
        None => {
            let exe_dir = std::env::current_exe()
                .ok()
                .and_then(|p| p.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            default_database_path(&exe_dir)
        }
    }
}

/// `data/slfit.db` under the project root, stepping out of `target/{debug,release}`
fn default_database_path(exe_dir: &Path) -> PathBuf {
    let mut path = exe_dir.to_path_buf();

    if path.ends_with("release") || path.ends_with("debug") {
        if let Some(project_root) = path.parent().and_then(Path::parent) {
            path = project_root.to_path_buf();
        }
    }

    path.push("data");
    path.push("slfit.db");
    path
}

/// Install the stderr tracing subscriber
pub fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(DEFAULT_LOG_DIRECTIVE.parse()?))
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_override_wins() {
        let path = database_path_from(Some("/tmp/custom.db".to_string()));
        assert_eq!(path, PathBuf::from("/tmp/custom.db"));
    }

    #[test]
    fn test_default_steps_out_of_target_dir() {
        let path = default_database_path(Path::new("/home/me/slfit/target/release"));
        assert_eq!(path, PathBuf::from("/home/me/slfit/data/slfit.db"));

        let path = default_database_path(Path::new("/opt/slfit/bin"));
        assert_eq!(path, PathBuf::from("/opt/slfit/bin/data/slfit.db"));
    }
}
