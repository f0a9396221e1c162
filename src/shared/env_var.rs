//! Centralized reader for the environment variables review-corpus consults.
//!
//! Environment variable names are defined as private constants here;
//! external code accesses values through the `EnvVars` struct.

use std::path::PathBuf;

use super::config::Config;

const HOME: &str = "HOME";
const XDG_CONFIG_HOME: &str = "XDG_CONFIG_HOME";
const OPENREVIEW_TOKEN: &str = "OPENREVIEW_TOKEN";
const DATA_DIR: &str = "REVIEW_CORPUS_DATA_DIR";

/// Snapshot of the relevant environment variables at load time.
/// Empty values are treated as unset.
#[derive(Debug, Default)]
pub struct EnvVars {
    pub home: Option<PathBuf>,
    pub xdg_config_home: Option<PathBuf>,

    /// Bearer token for the OpenReview API; overrides `api.token`.
    pub openreview_token: Option<String>,

    /// Output directory; overrides `storage.data_dir`.
    pub data_dir: Option<PathBuf>,
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

impl EnvVars {
    pub fn load() -> Self {
        Self {
            home: non_empty_var(HOME).map(PathBuf::from),
            xdg_config_home: non_empty_var(XDG_CONFIG_HOME).map(PathBuf::from),
            openreview_token: non_empty_var(OPENREVIEW_TOKEN),
            data_dir: non_empty_var(DATA_DIR).map(PathBuf::from),
        }
    }

    /// XDG config directory ($XDG_CONFIG_HOME or ~/.config).
    pub fn config_dir(&self) -> Option<PathBuf> {
        self.xdg_config_home
            .clone()
            .or_else(|| self.home.as_ref().map(|home| home.join(".config")))
    }

    /// Override config values that are set in the environment.
    pub fn apply(&self, config: &mut Config) {
        if let Some(token) = &self.openreview_token {
            config.api.token = Some(token.clone());
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::xdg_wins(Some("/xdg"), Some("/home/u"), Some("/xdg"))]
    #[case::home_fallback(None, Some("/home/u"), Some("/home/u/.config"))]
    #[case::nothing(None, None, None)]
    fn test_config_dir(
        #[case] xdg: Option<&str>,
        #[case] home: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        let env = EnvVars {
            xdg_config_home: xdg.map(PathBuf::from),
            home: home.map(PathBuf::from),
            ..Default::default()
        };
        assert_eq!(env.config_dir(), expected.map(PathBuf::from));
    }

    #[test]
    fn test_load_treats_empty_as_unset() {
        temp_env::with_vars(
            [
                (XDG_CONFIG_HOME, Some("")),
                (HOME, Some("/test/home")),
                (OPENREVIEW_TOKEN, Some("")),
                (DATA_DIR, None),
            ],
            || {
                let env = EnvVars::load();
                assert_eq!(env.xdg_config_home, None);
                assert_eq!(env.config_dir(), Some(PathBuf::from("/test/home/.config")));
                assert_eq!(env.openreview_token, None);
                assert_eq!(env.data_dir, None);
            },
        );
    }

    #[test]
    fn test_apply_overrides_only_set_values() {
        let mut config = Config::default();
        config.api.token = Some("from-file".to_string());

        EnvVars::default().apply(&mut config);
        assert_eq!(config.api.token.as_deref(), Some("from-file"));
        assert_eq!(config.storage.data_dir, PathBuf::from("data"));

        let env = EnvVars {
            openreview_token: Some("from-env".to_string()),
            data_dir: Some(PathBuf::from("/out")),
            ..Default::default()
        };
        env.apply(&mut config);
        assert_eq!(config.api.token.as_deref(), Some("from-env"));
        assert_eq!(config.storage.data_dir, PathBuf::from("/out"));
    }
}
