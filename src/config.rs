//! Startup configuration: listening port and the directories probed for assets and data.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::assets;

pub const DEFAULT_PORT: u16 = 8080;

/// Parse a port argument, falling back to [`DEFAULT_PORT`] with a warning.
pub fn parse_port(raw: Option<&str>) -> u16 {
    let Some(raw) = raw else {
        return DEFAULT_PORT;
    };
    match raw.trim().parse::<u16>() {
        Ok(port) => port,
        Err(_) => {
            warn!("Invalid port number {:?}. Using default port {}.", raw, DEFAULT_PORT);
            DEFAULT_PORT
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    /// Roots probed in order for `web/...` assets.
    pub asset_roots: Vec<PathBuf>,
    /// Directories probed in order for `*.txt` files to auto-index.
    pub data_dirs: Vec<PathBuf>,
}

impl ServerConfig {
    /// Default layout for a process started in `cwd`.
    pub fn new(port: u16, cwd: &Path) -> Self {
        let asset_roots = assets::candidate_roots(cwd);
        let data_dirs = asset_roots.iter().map(|root| root.join("data")).collect();
        Self {
            port,
            asset_roots,
            data_dirs,
        }
    }

    pub fn with_asset_roots(mut self, roots: Vec<PathBuf>) -> Self {
        if !roots.is_empty() {
            self.asset_roots = roots;
        }
        self
    }

    pub fn with_data_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        if !dirs.is_empty() {
            self.data_dirs = dirs;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_parsing() {
        assert_eq!(parse_port(None), 8080);
        assert_eq!(parse_port(Some("9000")), 9000);
        assert_eq!(parse_port(Some(" 3000 ")), 3000);
        assert_eq!(parse_port(Some("abc")), 8080);
        assert_eq!(parse_port(Some("70000")), 8080);
        assert_eq!(parse_port(Some("-1")), 8080);
    }

    #[test]
    fn default_layout() {
        let config = ServerConfig::new(8080, Path::new("/srv/app/build"));
        assert_eq!(
            config.asset_roots,
            vec![
                PathBuf::from("/srv/app/build"),
                PathBuf::from("/srv"),
                PathBuf::from("/srv/app"),
            ]
        );
        assert_eq!(
            config.data_dirs,
            vec![
                PathBuf::from("/srv/app/build/data"),
                PathBuf::from("/srv/data"),
                PathBuf::from("/srv/app/data"),
            ]
        );
    }

    #[test]
    fn overrides_replace_defaults_only_when_given() {
        let config = ServerConfig::new(1, Path::new("/a/b"))
            .with_asset_roots(vec![PathBuf::from("/web")])
            .with_data_dirs(Vec::new());
        assert_eq!(config.asset_roots, vec![PathBuf::from("/web")]);
        assert_eq!(config.data_dirs[0], PathBuf::from("/a/b/data"));
    }
}
