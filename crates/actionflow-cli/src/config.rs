use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

const LOCAL_FILES: [&str; 2] = [".actionflowrc", ".actionflowrc.toml"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_true")]
    pub colored: bool,

    /// Lines shown above and below a reported line.
    #[serde(default = "default_context_lines")]
    pub context_lines: usize,

    #[serde(default)]
    pub warnings_as_errors: bool,

    #[serde(default = "default_indent_width")]
    pub indent_width: usize,

    #[serde(default)]
    pub use_tabs: bool,
}

fn default_true() -> bool {
    true
}

fn default_context_lines() -> usize {
    2
}

fn default_indent_width() -> usize {
    2
}

impl Default for Config {
    fn default() -> Self {
        Self {
            colored: true,
            context_lines: default_context_lines(),
            warnings_as_errors: false,
            indent_width: default_indent_width(),
            use_tabs: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Write { path: PathBuf, source: io::Error },
    AlreadyExists(PathBuf),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, .. } => write!(f, "Failed to read config file {}", path.display()),
            ConfigError::Parse { path, source } => {
                write!(f, "Failed to parse config file {}: {}", path.display(), source.message())
            }
            ConfigError::Write { path, .. } => write!(f, "Failed to write config file {}", path.display()),
            ConfigError::AlreadyExists(path) => write!(f, "Config file {} already exists", path.display()),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } | ConfigError::Write { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            ConfigError::AlreadyExists(_) => None,
        }
    }
}

impl Config {
    /// `~/.config/actionflow/config.toml` or the platform equivalent.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("actionflow").join("config.toml"))
    }

    /// Finds the config file that applies to `dir`: a local
    /// `.actionflowrc`/`.actionflowrc.toml`, then the global file.
    pub fn locate(dir: &Path) -> Option<PathBuf> {
        LOCAL_FILES
            .iter()
            .map(|name| dir.join(name))
            .chain(Self::global_path())
            .find(|path| path.is_file())
    }

    /// Loads the config for `dir`, or the defaults when there is none.
    pub fn load(dir: &Path) -> Result<Self, ConfigError> {
        match Self::locate(dir) {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Config::default()),
        }
    }

    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Writes a commented default config file. Never overwrites.
    pub fn create_default(path: &Path) -> Result<(), ConfigError> {
        if path.exists() {
            return Err(ConfigError::AlreadyExists(path.to_path_buf()));
        }

        let default_config = r#"# actionflow configuration file

# Enable colored output in terminal
colored = true

# Lines of source shown around each diagnostic
context_lines = 2

# Fail `actionflow check` on warnings too
warnings_as_errors = false

# Indentation used by `actionflow fmt`
indent_width = 2
use_tabs = false
"#;

        let write_error = |source: io::Error| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(path, default_config).map_err(write_error)
    }

    /// Merge CLI arguments into config
    pub fn merge_cli_args(&mut self, no_color: bool, warnings_as_errors: bool, context_lines: Option<usize>) {
        if no_color {
            self.colored = false;
        }

        if warnings_as_errors {
            self.warnings_as_errors = true;
        }

        if let Some(lines) = context_lines {
            self.context_lines = lines;
        }
    }

    /// One level of indentation for the formatter.
    pub fn indent(&self) -> String {
        if self.use_tabs {
            "\t".to_string()
        } else {
            " ".repeat(self.indent_width)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_for_missing_keys() {
        let config: Config = toml::from_str("use_tabs = true").unwrap();

        assert!(config.colored);
        assert_eq!(config.context_lines, 2);
        assert_eq!(config.indent_width, 2);
        assert!(config.use_tabs);
        assert_eq!(config.indent(), "\t");
    }

    #[test]
    fn test_default_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".actionflowrc");

        Config::create_default(&path).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
        assert!(matches!(
            Config::create_default(&path),
            Err(ConfigError::AlreadyExists(_))
        ));
    }

    #[test]
    fn test_local_file_is_found() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(".actionflowrc.toml"), "indent_width = 4\n").unwrap();

        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.indent(), "    ");
    }

    #[test]
    fn test_parse_error_names_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".actionflowrc");
        fs::write(&path, "colored = \"yes\"\n").unwrap();

        let error = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains(".actionflowrc"));
    }

    #[test]
    fn test_merge_cli_args() {
        let mut config = Config::default();
        config.merge_cli_args(true, false, Some(0));

        assert!(!config.colored);
        assert!(!config.warnings_as_errors);
        assert_eq!(config.context_lines, 0);
    }
}
