use color_eyre::{eyre::eyre, Result};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::schedule::RunTable;
use crate::store::cache::CacheKey;

/// Dropbox direct-download link for a shared YAML file.
pub const DEFAULT_URL_TEMPLATE: &str = "https://www.dropbox.com/s/{stub}.yaml?dl=1";

/// Nicknames sent per batch when not configured.
pub const DEFAULT_NICKNAMES_PER_BATCH: usize = 5;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
  /// Stub of the shared animal list (e.g. "s8d7f6g/animals")
  pub animals: String,
  #[serde(default = "default_url_template")]
  pub url_template: String,
  /// Root for the resource cache and the activity log
  #[serde(default = "default_data_dir")]
  pub data_dir: PathBuf,
  #[serde(default = "default_nicknames_per_batch")]
  pub nicknames_per_batch: usize,
  /// Iterations per weekday, Monday first
  #[serde(default)]
  pub schedule: RunTable,
  pub players: Vec<PlayerConfig>,
  pub smtp: SmtpConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PlayerConfig {
  pub name: String,
  /// Stub of the player's personal word book
  pub words: String,
  /// Carrier SMS gateway address (e.g. "5551234567@vtext.com")
  pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SmtpConfig {
  #[serde(default = "default_smtp_host")]
  pub host: String,
  #[serde(default = "default_smtp_port")]
  pub port: u16,
  /// Sender address
  pub from: String,
  /// Login name (defaults to the sender address)
  pub username: Option<String>,
}

impl SmtpConfig {
  pub fn username(&self) -> &str {
    self.username.as_deref().unwrap_or(&self.from)
  }
}

fn default_url_template() -> String {
  DEFAULT_URL_TEMPLATE.to_string()
}

fn default_data_dir() -> PathBuf {
  dirs::data_dir()
    .or_else(|| dirs::home_dir().map(|p| p.join(".local/share")))
    .unwrap_or_else(|| PathBuf::from("."))
    .join("animale")
}

fn default_nicknames_per_batch() -> usize {
  DEFAULT_NICKNAMES_PER_BATCH
}

fn default_smtp_host() -> String {
  "smtp.gmail.com".to_string()
}

fn default_smtp_port() -> u16 {
  587
}

impl Config {
  /// Load configuration from file.
  ///
  /// Search order:
  /// 1. Explicit path if provided
  /// 2. ./animale.yaml (current directory)
  /// 3. $XDG_CONFIG_HOME/animale/config.yaml
  pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
    let path = if let Some(p) = explicit_path {
      if p.exists() {
        Some(p.to_path_buf())
      } else {
        return Err(eyre!("Config file not found: {}", p.display()));
      }
    } else {
      Self::find_config_file()
    };

    match path {
      Some(p) => Self::load_from_path(&p),
      None => Err(eyre!(
        "No configuration file found. Create one at ~/.config/animale/config.yaml\n\
                 See animale.example.yaml for the format."
      )),
    }
  }

  fn find_config_file() -> Option<PathBuf> {
    // Check current directory
    let local = PathBuf::from("animale.yaml");
    if local.exists() {
      return Some(local);
    }

    // Check XDG config directory
    if let Some(config_dir) = dirs::config_dir() {
      let xdg_path = config_dir.join("animale").join("config.yaml");
      if xdg_path.exists() {
        return Some(xdg_path);
      }
    }

    None
  }

  fn load_from_path(path: &Path) -> Result<Self> {
    let contents = std::fs::read_to_string(path)
      .map_err(|e| eyre!("Failed to read config file {}: {}", path.display(), e))?;

    let config = Self::from_yaml(&contents)
      .map_err(|e| eyre!("Invalid config file {}: {}", path.display(), e))?;

    Ok(config)
  }

  /// Parse and validate configuration from a YAML string.
  pub fn from_yaml(contents: &str) -> Result<Self> {
    let config: Config =
      serde_yaml::from_str(contents).map_err(|e| eyre!("Failed to parse config: {}", e))?;
    config.validate()?;
    Ok(config)
  }

  fn validate(&self) -> Result<()> {
    if self.nicknames_per_batch == 0 {
      return Err(eyre!("nicknames_per_batch must be at least 1"));
    }

    // Each cache file holds exactly one stub's document
    let animals_key = CacheKey::from_stub(&self.animals)?;
    let mut keys = BTreeMap::new();

    let mut names = BTreeSet::new();
    for player in &self.players {
      let key = CacheKey::from_stub(&player.words)
        .map_err(|e| eyre!("player '{}': {}", player.name, e))?;
      if !names.insert(player.name.as_str()) {
        return Err(eyre!("duplicate player name '{}'", player.name));
      }
      if key == animals_key {
        return Err(eyre!(
          "stubs '{}' and '{}' share the cache key '{}'",
          self.animals,
          player.words,
          key
        ));
      }
      if let Some(other) = keys.insert(key.to_string(), player.words.as_str()) {
        if other != player.words {
          return Err(eyre!(
            "stubs '{}' and '{}' share the cache key '{}'",
            other,
            player.words,
            key
          ));
        }
      }
    }

    Ok(())
  }

  /// Directory holding cached copies of remote resources.
  pub fn cache_dir(&self) -> PathBuf {
    self.data_dir.join("cache")
  }

  /// Directory holding the activity log and diagnostic logs.
  pub fn log_dir(&self) -> PathBuf {
    self.data_dir.join("log")
  }

  pub fn player(&self, name: &str) -> Option<&PlayerConfig> {
    self.players.iter().find(|p| p.name == name)
  }

  /// Get the SMTP password from environment variables.
  ///
  /// Checks ANIMALE_SMTP_PASSWORD.
  pub fn get_smtp_password() -> Result<String> {
    std::env::var("ANIMALE_SMTP_PASSWORD").map_err(|_| {
      eyre!("SMTP password not found. Set ANIMALE_SMTP_PASSWORD environment variable.")
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use chrono::Weekday;

  const MINIMAL: &str = r#"
animals: s8d7f6g/animals
players:
  - name: alice
    words: a1b2c3/alice
    address: 5551234567@vtext.com
  - name: bob
    words: d4e5f6/bob
    address: 5559876543@txt.att.net
smtp:
  from: game@example.com
"#;

  #[test]
  fn test_defaults_applied() {
    let config = Config::from_yaml(MINIMAL).unwrap();

    assert_eq!(config.url_template, DEFAULT_URL_TEMPLATE);
    assert_eq!(config.nicknames_per_batch, 5);
    assert_eq!(config.schedule.runs_on(Weekday::Fri), 2);
    assert_eq!(config.smtp.host, "smtp.gmail.com");
    assert_eq!(config.smtp.port, 587);
    assert_eq!(config.smtp.username(), "game@example.com");
    assert_eq!(config.players.len(), 2);
  }

  #[test]
  fn test_custom_schedule() {
    let yaml = format!("{}schedule: [0, 0, 0, 0, 0, 3, 0]\n", MINIMAL);
    let config = Config::from_yaml(&yaml).unwrap();
    assert_eq!(config.schedule.runs_on(Weekday::Sat), 3);
    assert_eq!(config.schedule.runs_on(Weekday::Fri), 0);
  }

  #[test]
  fn test_schedule_must_have_seven_days() {
    let yaml = format!("{}schedule: [1, 1, 1]\n", MINIMAL);
    assert!(Config::from_yaml(&yaml).is_err());
  }

  #[test]
  fn test_bad_stub_rejected() {
    let yaml = MINIMAL.replace("a1b2c3/alice", "alice");
    let err = Config::from_yaml(&yaml).unwrap_err();
    assert!(err.to_string().contains("alice"));
  }

  #[test]
  fn test_duplicate_player_rejected() {
    let yaml = MINIMAL.replace("name: bob", "name: alice");
    let err = Config::from_yaml(&yaml).unwrap_err();
    assert!(err.to_string().contains("duplicate"));
  }

  #[test]
  fn test_colliding_word_stubs_rejected() {
    let yaml = MINIMAL
      .replace("a1b2c3/alice", "aaa/words")
      .replace("d4e5f6/bob", "bbb/words");
    let err = Config::from_yaml(&yaml).unwrap_err().to_string();
    assert!(err.contains("aaa/words"));
    assert!(err.contains("bbb/words"));
  }

  #[test]
  fn test_word_stub_colliding_with_animals_rejected() {
    let yaml = MINIMAL.replace("d4e5f6/bob", "s8d7f6g/animals");
    let err = Config::from_yaml(&yaml).unwrap_err().to_string();
    assert!(err.contains("s8d7f6g/animals"));

    let yaml = MINIMAL.replace("d4e5f6/bob", "d4e5f6/animals");
    let err = Config::from_yaml(&yaml).unwrap_err().to_string();
    assert!(err.contains("d4e5f6/animals"));
  }

  #[test]
  fn test_players_may_share_one_stub() {
    let yaml = MINIMAL.replace("d4e5f6/bob", "a1b2c3/alice");
    assert!(Config::from_yaml(&yaml).is_ok());
  }

  #[test]
  fn test_zero_batch_rejected() {
    let yaml = format!("{}nicknames_per_batch: 0\n", MINIMAL);
    assert!(Config::from_yaml(&yaml).is_err());
  }

  #[test]
  fn test_player_lookup() {
    let config = Config::from_yaml(MINIMAL).unwrap();
    assert_eq!(config.player("bob").unwrap().words, "d4e5f6/bob");
    assert!(config.player("carol").is_none());
  }
}
