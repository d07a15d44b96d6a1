use serde::{Deserialize, Serialize};
use config::{Config, ConfigError, File};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub site: SiteSettings,
    pub qualification: Qualification,
    pub parser: ParserSettings,
    pub report: ReportSettings,
    pub http: HttpSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub log_level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteSettings {
    pub origin: String,
    pub streaks_path: String,
    pub table_id: String,
    pub breadcrumbs_id: String,
}

/// Thresholds a streak must meet to get a weighted or filtered average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub min_length: u32,
    pub min_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserSettings {
    pub row_policy: RowPolicy,
}

/// What to do with a table row whose cells don't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    Skip,
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportSettings {
    pub num_to_display: usize,
    pub output_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpSettings {
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for Qualification {
    fn default() -> Self {
        Self {
            min_length: 30,
            min_count: 60,
        }
    }
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            origin: "https://www.trueachievements.com".to_string(),
            streaks_path: "/winstreaks.aspx".to_string(),
            table_id: "oWinStreaks".to_string(),
            breadcrumbs_id: "breadcrumbs".to_string(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Streak Analyzer".to_string(),
                log_level: "info".to_string(),
            },
            site: SiteSettings::default(),
            qualification: Qualification::default(),
            parser: ParserSettings {
                row_policy: RowPolicy::Skip,
            },
            report: ReportSettings {
                num_to_display: 5,
                output_path: "rendered.html".to_string(),
            },
            http: HttpSettings {
                timeout_seconds: 30,
                user_agent: concat!("streak-analyzer/", env!("CARGO_PKG_VERSION")).to_string(),
            },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("STREAK_ANALYZER").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    /// Streaks page without the query; the gamer id is added by the client.
    pub fn streaks_base_url(&self) -> String {
        format!("{}{}", self.site.origin.trim_end_matches('/'), self.site.streaks_path)
    }

    /// Whether any config file or `STREAK_ANALYZER__*` variable is there to
    /// override the defaults.
    pub fn sources_present() -> bool {
        ["config/default", "config/local"].iter().any(|base| {
            ["toml", "json", "yaml", "yml", "ini", "ron", "json5"]
                .iter()
                .any(|ext| Path::new(&format!("{}.{}", base, ext)).exists())
        }) || std::env::vars().any(|(key, _)| key.starts_with("STREAK_ANALYZER"))
    }

    pub fn validate(&self) -> Result<(), String> {
        let origin = self.site.origin.trim();
        if origin.is_empty() {
            return Err("Site origin must not be empty".to_string());
        }
        if !origin.starts_with("http://") && !origin.starts_with("https://") {
            return Err(format!("Site origin must be an http(s) URL, got {}", origin));
        }

        if self.site.table_id.trim().is_empty() || self.site.breadcrumbs_id.trim().is_empty() {
            return Err("Table and breadcrumbs ids must not be empty".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();

        assert!(settings.validate().is_ok());
        assert_eq!(settings.qualification, Qualification { min_length: 30, min_count: 60 });
        assert_eq!(settings.report.num_to_display, 5);
        assert_eq!(settings.parser.row_policy, RowPolicy::Skip);
    }

    #[test]
    fn test_streaks_base_url() {
        let mut settings = Settings::default();
        assert_eq!(settings.streaks_base_url(), "https://www.trueachievements.com/winstreaks.aspx");

        settings.site.origin = "https://example.com/".to_string();
        assert_eq!(settings.streaks_base_url(), "https://example.com/winstreaks.aspx");
    }

    #[test]
    fn test_bad_env_override_is_an_error() {
        std::env::set_var("STREAK_ANALYZER__QUALIFICATION__MIN_LENGTH", "thirty");
        let result = Settings::new();
        let present = Settings::sources_present();
        std::env::remove_var("STREAK_ANALYZER__QUALIFICATION__MIN_LENGTH");

        let err = result.unwrap_err();
        assert!(err.to_string().contains("min_length"));
        assert!(present);
    }

    #[test]
    fn test_rejects_bad_origin() {
        let mut settings = Settings::default();
        settings.site.origin = "ftp://example.com".to_string();
        assert!(settings.validate().is_err());

        settings.site.origin = "  ".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validation_failure_is_a_config_error() {
        let mut settings = Settings::default();
        settings.site.table_id = String::new();

        let err = settings.validate().map_err(crate::models::StreakError::Config).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: "));
    }

    #[test]
    fn test_from_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analyzer.toml");
        std::fs::write(
            &path,
            "[qualification]\nmin_length = 10\nmin_count = 20\n\n[parser]\nrow_policy = \"abort\"\n",
        )
        .unwrap();

        let settings = Settings::from_file(&path).unwrap();

        assert_eq!(settings.qualification.min_length, 10);
        assert_eq!(settings.qualification.min_count, 20);
        assert_eq!(settings.parser.row_policy, RowPolicy::Abort);
        assert_eq!(settings.report.output_path, "rendered.html");
    }
}
