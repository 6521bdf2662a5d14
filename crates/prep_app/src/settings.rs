use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::{engine_info, LogDestination};
use log::LevelFilter;
use prep_core::Palette;
use prep_engine::{ApiSettings, SessionToken};
use serde::Deserialize;
use thiserror::Error;

pub const DEFAULT_SETTINGS_FILE: &str = "prep_settings.ron";
pub const TOKEN_ENV_VAR: &str = "PREP_SESSION_TOKEN";

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid log level {0:?}")]
    LogLevel(String),
    #[error("no session token: set PREP_SESSION_TOKEN or token_file")]
    MissingToken,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PaletteSettings {
    pub background: String,
    pub card: String,
    pub text: String,
    pub text_secondary: String,
    pub primary: String,
    pub border: String,
}

impl Default for PaletteSettings {
    fn default() -> Self {
        let palette = Palette::default();
        Self {
            background: palette.background,
            card: palette.card,
            text: palette.text,
            text_secondary: palette.text_secondary,
            primary: palette.primary,
            border: palette.border,
        }
    }
}

impl From<PaletteSettings> for Palette {
    fn from(settings: PaletteSettings) -> Self {
        Palette {
            background: settings.background,
            card: settings.card,
            text: settings.text,
            text_secondary: settings.text_secondary,
            primary: settings.primary,
            border: settings.border,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub base_url: String,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_checklist_items: Option<usize>,
    pub token_file: Option<PathBuf>,
    pub log_destination: LogDestination,
    pub log_level: String,
    pub palette: PaletteSettings,
}

impl Default for AppSettings {
    fn default() -> Self {
        let api = ApiSettings::default();
        Self {
            base_url: api.base_url,
            connect_timeout_secs: api.connect_timeout.as_secs(),
            request_timeout_secs: api.request_timeout.as_secs(),
            max_checklist_items: api.max_checklist_items,
            token_file: None,
            log_destination: LogDestination::File,
            log_level: "info".to_string(),
            palette: PaletteSettings::default(),
        }
    }
}

impl AppSettings {
    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_checklist_items: self.max_checklist_items,
        }
    }

    pub fn palette(&self) -> Palette {
        self.palette.clone().into()
    }

    pub fn log_level(&self) -> Result<LevelFilter, SettingsError> {
        self.log_level
            .trim()
            .parse()
            .map_err(|_| SettingsError::LogLevel(self.log_level.clone()))
    }
}

/// Reads settings from `path`; a missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<AppSettings, SettingsError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppSettings::default());
        }
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let settings = ron::from_str(&content).map_err(|err| SettingsError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    engine_info!("Loaded settings from {:?}", path);
    Ok(settings)
}

/// Env token wins over `token_file`; blank values count as missing.
pub fn read_session_token(
    settings: &AppSettings,
    env_token: Option<String>,
) -> Result<SessionToken, SettingsError> {
    if let Some(token) = env_token.map(|t| t.trim().to_string()) {
        if !token.is_empty() {
            return Ok(SessionToken::new(token));
        }
    }

    let Some(path) = settings.token_file.as_deref() else {
        return Err(SettingsError::MissingToken);
    };
    let token = fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let token = token.trim();
    if token.is_empty() {
        return Err(SettingsError::MissingToken);
    }
    Ok(SessionToken::new(token))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let settings = load_settings(&temp.path().join("absent.ron")).unwrap();
        assert_eq!(settings, AppSettings::default());
        assert_eq!(settings.api_settings().max_checklist_items, Some(5));
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(
            &path,
            r##"(
                base_url: "https://tracker.example.com",
                request_timeout_secs: 5,
                max_checklist_items: None,
                log_destination: Terminal,
                palette: (primary: "#00FF00"),
            )"##,
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        let api = settings.api_settings();
        assert_eq!(api.base_url, "https://tracker.example.com");
        assert_eq!(api.request_timeout, Duration::from_secs(5));
        assert_eq!(api.connect_timeout, Duration::from_secs(10));
        assert_eq!(api.max_checklist_items, None);
        assert_eq!(settings.log_destination, LogDestination::Terminal);
        assert_eq!(settings.palette().primary, "#00FF00");
        assert_eq!(settings.palette().card, Palette::default().card);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(DEFAULT_SETTINGS_FILE);
        fs::write(&path, "(base_url: 42").unwrap();

        let err = load_settings(&path).unwrap_err();
        assert!(matches!(err, SettingsError::Parse { .. }));
    }

    #[test]
    fn log_level_is_validated() {
        let mut settings = AppSettings::default();
        assert_eq!(settings.log_level().unwrap(), LevelFilter::Info);
        settings.log_level = "chatty".to_string();
        assert!(matches!(settings.log_level(), Err(SettingsError::LogLevel(_))));
    }

    #[test]
    fn env_token_wins_over_file() {
        let temp = TempDir::new().unwrap();
        let token_path = temp.path().join("token");
        fs::write(&token_path, "from-file\n").unwrap();
        let settings = AppSettings {
            token_file: Some(token_path),
            ..AppSettings::default()
        };

        let token = read_session_token(&settings, Some("from-env".to_string())).unwrap();
        assert_eq!(token.expose(), "from-env");

        let token = read_session_token(&settings, Some("   ".to_string())).unwrap();
        assert_eq!(token.expose(), "from-file");
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = read_session_token(&AppSettings::default(), None).unwrap_err();
        assert!(matches!(err, SettingsError::MissingToken));

        let temp = TempDir::new().unwrap();
        let token_path = temp.path().join("token");
        fs::write(&token_path, "\n").unwrap();
        let settings = AppSettings {
            token_file: Some(token_path),
            ..AppSettings::default()
        };
        assert!(matches!(
            read_session_token(&settings, None),
            Err(SettingsError::MissingToken)
        ));
    }
}
