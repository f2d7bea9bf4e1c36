//! Dealhub configuration.
//!
//! Loaded from `~/.dealhub/config.toml`. Every key is optional and a missing
//! file means defaults:
//!
//! ```toml
//! persona = "leisure-king"
//! gemini-command = "gemini"
//! gemini-model = "gemini-2.5-flash"
//! site-url = "https://retailnihilist.com"
//! log-level = "info"
//! data-dir = "/var/lib/dealhub"
//! ```
//!
//! The persona for a campaign is resolved through a chain:
//!
//! 1. `--persona` on the command line
//! 2. `DEALHUB_PERSONA` env var
//! 3. `persona` in the config file
//! 4. Girl Math

use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;

use crate::campaign::DEFAULT_SITE_URL;
use crate::model::Persona;

pub const PERSONA_ENV: &str = "DEALHUB_PERSONA";

const DEFAULT_GEMINI_COMMAND: &str = "gemini";
const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
    /// Default persona, as `girl-math` or `leisure-king`.
    pub persona: Option<String>,

    /// Program used to generate taglines.
    pub gemini_command: Option<String>,

    pub gemini_model: Option<String>,

    /// Linked from long-form descriptions.
    pub site_url: Option<String>,

    /// Default log filter when `DEALHUB_LOG` is unset.
    pub log_level: Option<String>,

    /// Where the database lives. Defaults to `~/.dealhub`.
    pub data_dir: Option<PathBuf>,
}

impl Config {
    /// Load config from `~/.dealhub/config.toml`, or defaults if there is none.
    pub fn load() -> Result<Self, String> {
        match Self::path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, String> {
        let contents = match fs::read_to_string(path) {
            Ok(s) => s,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(format!("failed to read {}: {e}", path.display())),
        };
        toml::from_str(&contents)
            .map_err(|e| format!("invalid config at {}: {e}", path.display()))
    }

    /// The config file path: `~/.dealhub/config.toml`.
    pub fn path() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".dealhub").join("config.toml"))
    }

    pub fn gemini_command(&self) -> &str {
        self.gemini_command.as_deref().unwrap_or(DEFAULT_GEMINI_COMMAND)
    }

    pub fn gemini_model(&self) -> &str {
        self.gemini_model.as_deref().unwrap_or(DEFAULT_GEMINI_MODEL)
    }

    pub fn site_url(&self) -> &str {
        self.site_url.as_deref().unwrap_or(DEFAULT_SITE_URL)
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Resolve the persona from the tiered chain.
pub fn resolve_persona(explicit: Option<Persona>, config: &Config) -> Result<Persona, String> {
    let from_env = env::var(PERSONA_ENV).ok();
    resolve_persona_from(explicit, from_env.as_deref(), config.persona.as_deref())
}

fn resolve_persona_from(
    explicit: Option<Persona>,
    from_env: Option<&str>,
    from_config: Option<&str>,
) -> Result<Persona, String> {
    // 1. Explicit --persona flag.
    if let Some(persona) = explicit {
        return Ok(persona);
    }

    // 2. DEALHUB_PERSONA environment variable.
    if let Some(value) = from_env.filter(|v| !v.trim().is_empty()) {
        return value.parse().map_err(|e| format!("{PERSONA_ENV}: {e}"));
    }

    // 3. ~/.dealhub/config.toml.
    if let Some(value) = from_config.filter(|v| !v.trim().is_empty()) {
        return value.parse().map_err(|e| format!("config persona: {e}"));
    }

    Ok(Persona::default())
}
