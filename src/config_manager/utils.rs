use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use config::{Config, Environment, File, FileFormat};
use regex::Regex;
use tracing::debug;

use crate::config_manager::settings::AppConfig;
use crate::error::ConfigError;

const DEFAULT_CONFIG_TOML: &str = include_str!("../../config/default.toml");

/// Prefix for environment overrides, e.g. `DIGEST__SERVER__PORT=8080`
pub const ENV_PREFIX: &str = "DIGEST";

/// Files probed in the working directory when `CONFIG_PATH` is not set
const CANDIDATE_FILES: [&str; 3] = ["conf.toml", "conf.yaml", "conf.json"];

fn env_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{(\w+)\}").expect("static regex"))
}

/// Replace `${VAR_NAME}` with the value of the environment variable.
/// Unset variables become empty strings.
pub fn substitute_env_vars(content: &str) -> String {
    env_pattern()
        .replace_all(content, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_default()
        })
        .into_owned()
}

/// Guess the file format from the extension
pub fn format_for_path(path: &Path) -> Result<FileFormat, ConfigError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "toml" => Ok(FileFormat::Toml),
        "yaml" | "yml" => Ok(FileFormat::Yaml),
        "json" => Ok(FileFormat::Json),
        _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
    }
}

/// Read a configuration file with environment variable substitution
pub fn read_config_file(path: &Path) -> Result<(String, FileFormat), ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.display().to_string()));
    }
    let format = format_for_path(path)?;
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok((substitute_env_vars(&content), format))
}

/// Resolve which user config file to use, if any
pub fn locate_config_file() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }
    CANDIDATE_FILES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.exists())
}

/// Load configuration: embedded defaults, then the optional file, then environment.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder =
        Config::builder().add_source(File::from_str(DEFAULT_CONFIG_TOML, FileFormat::Toml));

    if let Some(path) = path {
        let (content, format) = read_config_file(path)?;
        debug!("Layering configuration from {}", path.display());
        builder = builder.add_source(File::from_str(&content, format));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .separator("__")
            .try_parsing(true),
    );

    let config: AppConfig = builder.build()?.try_deserialize()?;
    config.validate()?;
    Ok(config)
}

/// Load only the embedded defaults
pub fn load_defaults() -> Result<AppConfig, ConfigError> {
    let config: AppConfig = Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG_TOML, FileFormat::Toml))
        .build()?
        .try_deserialize()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_the_reference_service() {
        let config = load_defaults().unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.translation.default_target_language, "en");
        assert_eq!(config.summarization.model, "google/pegasus-xsum");
        assert_eq!(
            config.translation.model_id("fr", "en"),
            "Helsinki-NLP/opus-mt-fr-en"
        );
        assert!(!config.models.cache_models);
        assert!(config.inference.bearer_token().is_none());
    }

    #[test]
    fn substitutes_known_and_blanks_unknown_variables() {
        std::env::set_var("DIGEST_TEST_TOKEN_VALUE", "hf_abc");
        let out = substitute_env_vars(
            "token = \"${DIGEST_TEST_TOKEN_VALUE}\"\nother = \"${DIGEST_TEST_SURELY_UNSET}\"",
        );
        assert_eq!(out, "token = \"hf_abc\"\nother = \"\"");
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 8088\n\n[models]\ncache_models = true\n\n[inference]\napi_token = \"\""
        )
        .unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.server.port, 8088);
        assert_eq!(config.server.host, "127.0.0.1");
        assert!(config.models.cache_models);
        assert!(config.inference.bearer_token().is_none());
    }

    #[test]
    fn yaml_files_are_supported() {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        writeln!(file, "summarization:\n  model: facebook/bart-large-cnn").unwrap();

        let config = load_config(Some(file.path())).unwrap();
        assert_eq!(config.summarization.model, "facebook/bart-large-cnn");
    }

    #[test]
    fn rejects_template_without_placeholders() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(file, "[translation]\nmodel_template = \"my-org/one-model\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_config(Some(Path::new("/nonexistent/conf.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn unknown_extension_is_rejected() {
        assert!(matches!(
            format_for_path(Path::new("conf.ini")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }
}
