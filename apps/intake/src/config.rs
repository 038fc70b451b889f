use std::{collections::HashMap, env, fs, path::PathBuf};

use chrono::{Local, NaiveDate};
pub const SETTINGS_FILE: &str = "intake.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub log_filter: String,
    /// Reference date for date rules. `None` means the local calendar date.
    pub today: Option<NaiveDate>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            log_filter: "info".into(),
            today: None,
        }
    }
}

impl Settings {
    pub fn today(&self) -> NaiveDate {
        self.today.unwrap_or_else(|| Local::now().date_naive())
    }

    fn apply_file(&mut self, raw: &str, warnings: &mut Vec<String>) {
        let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
            Ok(file_cfg) => file_cfg,
            Err(err) => {
                warnings.push(format!("ignoring unreadable {SETTINGS_FILE}: {err}"));
                return;
            }
        };
        if let Some(v) = file_cfg.get("data_dir") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = file_cfg.get("log_filter") {
            self.log_filter = v.clone();
        }
        if let Some(v) = file_cfg.get("today") {
            self.set_today(v, warnings);
        }
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>, warnings: &mut Vec<String>) {
        if let Some(v) = var("INTAKE_DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }
        if let Some(v) = var("APP__DATA_DIR") {
            self.data_dir = PathBuf::from(v);
        }

        if let Some(v) = var("INTAKE_LOG") {
            self.log_filter = v;
        }
        if let Some(v) = var("APP__LOG_FILTER") {
            self.log_filter = v;
        }

        if let Some(v) = var("APP__TODAY") {
            self.set_today(&v, warnings);
        }
    }

    fn set_today(&mut self, raw: &str, warnings: &mut Vec<String>) {
        match NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d") {
            Ok(date) => self.today = Some(date),
            Err(_) => warnings.push(format!("ignoring reference date '{raw}', expected YYYY-MM-DD")),
        }
    }
}

/// Returns the settings and the warnings to log once tracing is installed.
pub fn load_settings() -> (Settings, Vec<String>) {
    let mut settings = Settings::default();
    let mut warnings = Vec::new();

    if let Ok(raw) = fs::read_to_string(SETTINGS_FILE) {
        settings.apply_file(&raw, &mut warnings);
    }
    settings.apply_env(|name| env::var(name).ok(), &mut warnings);

    (settings, warnings)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn file_values_override_defaults() {
        let mut settings = Settings::default();
        let mut warnings = Vec::new();
        settings.apply_file(
            "data_dir = \"/var/lib/intake\"\ntoday = \"2024-01-31\"\n",
            &mut warnings,
        );
        assert!(warnings.is_empty());

        assert_eq!(settings.data_dir, PathBuf::from("/var/lib/intake"));
        assert_eq!(settings.log_filter, "info");
        assert_eq!(settings.today, NaiveDate::from_ymd_opt(2024, 1, 31));
    }

    #[test]
    fn app_prefixed_env_wins_over_short_name() {
        let mut settings = Settings::default();
        settings.apply_env(
            vars(&[
                ("INTAKE_DATA_DIR", "/tmp/a"),
                ("APP__DATA_DIR", "/tmp/b"),
                ("INTAKE_LOG", "debug"),
            ]),
            &mut Vec::new(),
        );

        assert_eq!(settings.data_dir, PathBuf::from("/tmp/b"));
        assert_eq!(settings.log_filter, "debug");
    }

    #[test]
    fn bad_reference_date_is_ignored() {
        let mut settings = Settings::default();
        let mut warnings = Vec::new();
        settings.apply_env(vars(&[("APP__TODAY", "15/06/2024")]), &mut warnings);
        assert_eq!(settings.today, None);
        assert_eq!(
            warnings,
            vec!["ignoring reference date '15/06/2024', expected YYYY-MM-DD".to_string()]
        );

        settings.apply_env(vars(&[("APP__TODAY", "2024-06-15")]), &mut warnings);
        assert_eq!(warnings.len(), 1);
        assert_eq!(settings.today(), NaiveDate::from_ymd_opt(2024, 6, 15).expect("date"));
    }

    #[test]
    fn unparseable_file_keeps_defaults() {
        let mut settings = Settings::default();
        let mut warnings = Vec::new();
        settings.apply_file("data_dir = [1, 2]", &mut warnings);
        assert_eq!(settings, Settings::default());
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("ignoring unreadable intake.toml"));
    }
}
