use semimap_core::{Error, Result};
use serde::Deserialize;

/// Mapping layer settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Allows cursor pagination over more than one sort field.
    #[serde(alias = "semimap.pagination.cursor.multiple_sorts")]
    pub cursor_multiple_sorts: bool,
}

impl Config {
    /// Configuration key of [`Config::cursor_multiple_sorts`].
    pub const CURSOR_MULTIPLE_SORTS: &'static str = "semimap.pagination.cursor.multiple_sorts";

    /// Environment variable read by [`Config::from_env`].
    pub const CURSOR_MULTIPLE_SORTS_ENV: &'static str = "SEMIMAP_PAGINATION_CURSOR_MULTIPLE_SORTS";

    pub fn cursor_multiple_sorts(mut self, enabled: bool) -> Self {
        self.cursor_multiple_sorts = enabled;
        self
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads the configuration from the process environment. Unset
    /// variables keep their default.
    pub fn from_env() -> Result<Self> {
        let mut config = Config::default();

        if let Ok(value) = std::env::var(Self::CURSOR_MULTIPLE_SORTS_ENV) {
            config.cursor_multiple_sorts = parse_flag(Self::CURSOR_MULTIPLE_SORTS_ENV, &value)?;
        }

        Ok(config)
    }
}

fn parse_flag(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        other => Err(Error::illegal_argument(format!(
            "`{name}` expects true, false, 1 or 0; got `{other}`"
        ))),
    }
}
