//! Finding and reading [`GameConfig`] files, and applying command-line overrides.

use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use multicube::game::GameConfig;

/// Name of the configuration file which is read from the current directory if present
/// and no other file is specified.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "multicube.json";

// -------------------------------------------------------------------------------------------------

/// Reads a [`GameConfig`] from the JSON file at `path`.
///
/// Fields missing from the file take their default values.
pub fn load_config_file(path: &Path) -> Result<GameConfig, anyhow::Error> {
    let file = File::open(path)
        .with_context(|| format!("failed to open configuration file {}", path.display()))?;
    let config = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse configuration file {}", path.display()))?;
    log::trace!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Reads [`DEFAULT_CONFIG_FILE_NAME`] from `dir` if it exists.
///
/// Unlike an explicitly requested file, a broken default file only produces a warning.
fn load_default_config_file(dir: &Path) -> Result<GameConfig, anyhow::Error> {
    let path = dir.join(DEFAULT_CONFIG_FILE_NAME);
    match File::open(&path) {
        Ok(file) => match serde_json::from_reader(BufReader::new(file)) {
            Ok(config) => {
                log::info!("Loaded configuration from {}", path.display());
                Ok(config)
            }
            Err(e) => {
                log::warn!(
                    "Syntax error in configuration loaded from {path}; \
                    using default values. Error: {e}",
                    path = path.display(),
                );
                Ok(GameConfig::default())
            }
        },
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            log::trace!("No configuration file at {}", path.display());
            Ok(GameConfig::default())
        }
        Err(e) => Err(anyhow::Error::new(e).context(format!(
            "failed to open configuration file {}",
            path.display()
        ))),
    }
}

// -------------------------------------------------------------------------------------------------

/// [`clap::Args`] argument group struct for args that affect which [`GameConfig`] is used.
#[derive(Clone, Debug, Default, clap::Args)]
pub struct ConfigArgs {
    /// Read the game configuration from this JSON file instead of
    /// `multicube.json` in the current directory.
    #[arg(long = "config", value_name = "FILE", conflicts_with = "no_config_files")]
    pub(crate) config_file: Option<PathBuf>,

    /// Ignore all configuration files, using only defaults and command-line options.
    #[arg(long = "no-config-files")]
    pub(crate) no_config_files: bool,

    #[expect(clippy::doc_markdown, reason = "will be displayed in --help")]
    /// Override the value of a configuration field for this session, instead of taking
    /// it from files or defaults.
    ///
    /// The value is specified as a key-value pair where the key is an unquoted string, the
    /// separator is “=”, and the value is a JSON value; for example: -Scell_count=7
    #[arg(long = "set", short = 'S', value_parser = parse_configure, value_name="NAME=JSON")]
    pub(crate) set: Vec<(String, serde_json::Value)>,
}

impl ConfigArgs {
    /// Constructs and validates the [`GameConfig`] a session with these args should use,
    /// looking for the default file in the current directory.
    pub fn build_config(self) -> Result<GameConfig, anyhow::Error> {
        let dir = std::env::current_dir().context("failed to find current directory")?;
        self.build_config_in(&dir)
    }

    /// As [`ConfigArgs::build_config()`], but looks for the default file in `dir`.
    pub fn build_config_in(self, dir: &Path) -> Result<GameConfig, anyhow::Error> {
        let Self {
            config_file,
            no_config_files,
            set: to_override,
        } = self;

        let mut config = match (no_config_files, config_file) {
            (true, _) => GameConfig::default(),
            (false, Some(path)) => load_config_file(&path)?,
            (false, None) => load_default_config_file(dir)?,
        };

        if !to_override.is_empty() {
            let Ok(serde_json::Value::Object(mut fields)) = serde_json::to_value(&config) else {
                unreachable!("game configuration should appear as a json object");
            };
            for (key, value) in to_override {
                fields.insert(key, value);
            }
            config = serde_json::from_value(serde_json::Value::Object(fields))
                .context("--set did not produce a valid configuration")?;
        }

        config.validate().context("invalid configuration")?;
        Ok(config)
    }
}

fn parse_configure(arg: &str) -> Result<(String, serde_json::Value), anyhow::Error> {
    let (key, value) = arg.split_once('=').ok_or_else(|| anyhow::anyhow!("missing '='"))?;
    let value = serde_json::from_str(value)?;
    Ok((key.to_owned(), value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn parse_configure_splits_on_first_equals() {
        assert_eq!(
            parse_configure("seed=12").unwrap(),
            ("seed".to_owned(), serde_json::json!(12))
        );
        assert_eq!(
            parse_configure("a=\"b=c\"").unwrap(),
            ("a".to_owned(), serde_json::json!("b=c"))
        );
        assert!(parse_configure("seed").is_err());
        assert!(parse_configure("seed=twelve").is_err());
    }

    #[test]
    fn no_files_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), DEFAULT_CONFIG_FILE_NAME, r#"{"cell_count": 7}"#);
        let config = ConfigArgs {
            no_config_files: true,
            ..ConfigArgs::default()
        }
        .build_config_in(dir.path())
        .unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn missing_default_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = ConfigArgs::default().build_config_in(dir.path()).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn default_file_is_read() {
        let dir = tempfile::tempdir().unwrap();
        write_file(
            dir.path(),
            DEFAULT_CONFIG_FILE_NAME,
            r#"{"cell_count": 7, "seed": 3}"#,
        );
        let config = ConfigArgs::default().build_config_in(dir.path()).unwrap();
        assert_eq!(
            config,
            GameConfig {
                cell_count: 7,
                seed: Some(3),
                ..GameConfig::default()
            }
        );
    }

    #[test]
    fn broken_default_file_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        write_file(dir.path(), DEFAULT_CONFIG_FILE_NAME, "{ not json");
        let config = ConfigArgs::default().build_config_in(dir.path()).unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn broken_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(dir.path(), "other.json", "{ not json");
        let error = ConfigArgs {
            config_file: Some(path),
            ..ConfigArgs::default()
        }
        .build_config_in(dir.path())
        .unwrap_err();
        assert!(
            error.to_string().starts_with("failed to parse configuration file"),
            "{error:#}"
        );
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = ConfigArgs {
            config_file: Some(dir.path().join("nonexistent.json")),
            ..ConfigArgs::default()
        }
        .build_config_in(dir.path());
        assert!(result.is_err());
    }

    #[test]
    fn overrides_apply_on_top_of_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_file(
            dir.path(),
            "game.json",
            r#"{"cell_count": 7, "keep_probability": 0.5}"#,
        );
        let config = ConfigArgs {
            config_file: Some(path),
            set: vec![
                ("keep_probability".to_owned(), serde_json::json!(0.0)),
                ("seed".to_owned(), serde_json::json!(42)),
            ],
            ..ConfigArgs::default()
        }
        .build_config_in(dir.path())
        .unwrap();
        assert_eq!(
            config,
            GameConfig {
                cell_count: 7,
                keep_probability: 0.0,
                seed: Some(42),
                ..GameConfig::default()
            }
        );
    }

    #[test]
    fn unknown_override_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigArgs {
            no_config_files: true,
            set: vec![("colour".to_owned(), serde_json::json!("red"))],
            ..ConfigArgs::default()
        }
        .build_config_in(dir.path())
        .unwrap_err();
        assert_eq!(
            error.to_string(),
            "--set did not produce a valid configuration"
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let error = ConfigArgs {
            no_config_files: true,
            set: vec![("cell_count".to_owned(), serde_json::json!(4))],
            ..ConfigArgs::default()
        }
        .build_config_in(dir.path())
        .unwrap_err();
        assert_eq!(error.to_string(), "invalid configuration");
        assert_eq!(
            error.root_cause().to_string(),
            "cell count must be odd, but was 4"
        );
    }
}
