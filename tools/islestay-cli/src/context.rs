//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use islestay_auth::{AnonymousSession, SessionContext, TokenSession};

use crate::config::CliConfig;
use crate::output::Output;

/// Config file names searched for, in order.
pub const CONFIG_NAMES: [&str; 3] = ["islestay.toml", ".islestay.toml", "islestay.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: CliConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CliConfig::load(path)?
        } else {
            // Try to find config in current directory or parent directories
            Self::find_config(&cwd).unwrap_or_default()
        };

        Ok(Self { config, output, cwd })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<CliConfig> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = CliConfig::load(config_path.to_str()?) {
                        return Some(config);
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if PathBuf::from(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.cwd.join(path)
        }
    }

    /// Listings file from the command line, falling back to `[source] path`.
    pub fn stays_path(&self, arg: Option<&str>) -> Result<PathBuf> {
        arg.or(self.config.source.path.as_deref())
            .map(|p| self.resolve_path(p))
            .context("No listings file given; pass --stays or set [source] path")
    }

    /// The caller's session, from the configured token variable.
    pub fn session(&self) -> Box<dyn SessionContext> {
        match TokenSession::from_env(&self.config.session.token_env) {
            Ok(session) => Box::new(session),
            Err(e) => {
                self.output.debug(&format!("Using anonymous session ({})", e));
                Box::new(AnonymousSession)
            }
        }
    }
}
