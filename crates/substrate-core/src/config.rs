//! Configuration loading and typed config structures for the Substrate
//! simulation.
//!
//! The configuration is a single YAML document. Every section and field is
//! optional; an empty document yields a valid world with no container
//! types. A typical file:
//!
//! ```yaml
//! world:
//!   seed: 7
//! calendar:
//!   hours_per_day: 24
//!   hours_per_tick: 0.25
//! growers:
//!   substrate:fruitingbag:
//!     acceptable_spores: [chanterelle]
//!     fertility_drain: { avg: 50, var: 10 }
//! spore_papers:
//!   substrate:sporepaper:
//!     collect_days: 2
//! collectibles:
//!   - code: game:mushroom-chanterelle-normal
//!     kind: block
//!     spore_harvestable: true
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use substrate_collection::{CollectionError, SporePaperConfig};
use substrate_growth::{DropItems, GrowerConfig, GrowthError};
use substrate_types::{AssetCode, CollectibleType};

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A grower type has an invalid setting.
    #[error("grower `{container}`: {source}")]
    Grower {
        /// The container type.
        container: AssetCode,
        /// What is wrong.
        source: GrowthError,
    },

    /// A spore paper type has an invalid setting.
    #[error("spore paper `{container}`: {source}")]
    SporePaper {
        /// The paper type.
        container: AssetCode,
        /// What is wrong.
        source: CollectionError,
    },

    /// The calendar settings are unusable.
    #[error("invalid calendar configuration: {reason}")]
    Calendar {
        /// Explanation of what is wrong.
        reason: String,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level simulation configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SubstrateConfig {
    /// World-level settings (name, seed, tick interval).
    #[serde(default)]
    pub world: WorldConfig,

    /// Game calendar settings.
    #[serde(default)]
    pub calendar: CalendarConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Compost and rot item codes used for decay drops.
    #[serde(default)]
    pub items: DropItems,

    /// Growth container types, keyed by block code.
    #[serde(default)]
    pub growers: BTreeMap<AssetCode, GrowerConfig>,

    /// Spore paper types, keyed by block code.
    #[serde(default)]
    pub spore_papers: BTreeMap<AssetCode, SporePaperConfig>,

    /// Registered collectibles.
    #[serde(default)]
    pub collectibles: Vec<CollectibleType>,
}

impl SubstrateConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yml::from_str(yaml)?)
    }

    /// Check every section for out-of-range values.
    ///
    /// # Errors
    ///
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.calendar.validate()?;
        for (container, grower) in &self.growers {
            grower.validate().map_err(|source| ConfigError::Grower {
                container: container.clone(),
                source,
            })?;
        }
        for (container, paper) in &self.spore_papers {
            paper.validate().map_err(|source| ConfigError::SporePaper {
                container: container.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Random seed for reproducibility.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds between ticks.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
        }
    }
}

/// Game calendar configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CalendarConfig {
    /// Game hours in one game day (default: 24).
    #[serde(default = "default_hours_per_day")]
    pub hours_per_day: f64,

    /// Game hours that pass per tick (default: one game minute).
    #[serde(default = "default_hours_per_tick")]
    pub hours_per_tick: f64,

    /// Game hour the calendar starts at.
    #[serde(default)]
    pub start_hours: f64,
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            hours_per_day: default_hours_per_day(),
            hours_per_tick: default_hours_per_tick(),
            start_hours: 0.0,
        }
    }
}

impl CalendarConfig {
    /// Check the calendar settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Calendar`] if the day length is not positive,
    /// the tick length is negative, or any value is not finite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hours_per_day.is_finite() || self.hours_per_day <= 0.0 {
            return Err(ConfigError::Calendar {
                reason: "hours_per_day must be positive".to_owned(),
            });
        }
        if !self.hours_per_tick.is_finite() || self.hours_per_tick < 0.0 {
            return Err(ConfigError::Calendar {
                reason: "hours_per_tick must be non-negative".to_owned(),
            });
        }
        if !self.start_hours.is_finite() {
            return Err(ConfigError::Calendar {
                reason: "start_hours must be finite".to_owned(),
            });
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG`
    /// is not set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_world_name() -> String {
    "Substrate".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    1000
}

const fn default_hours_per_day() -> f64 {
    24.0
}

const fn default_hours_per_tick() -> f64 {
    1.0 / 60.0
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use substrate_growth::ContainerShape;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = SubstrateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.world.seed, 42);
        assert_eq!(config.calendar.hours_per_day, 24.0);
        assert_eq!(config.logging.level, "info");
        assert!(config.growers.is_empty());
    }

    #[test]
    fn parse_empty_yaml() {
        let config = SubstrateConfig::parse("").unwrap();
        assert_eq!(config, SubstrateConfig::default());
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
world:
  name: Cellar
  seed: 7
calendar:
  hours_per_day: 20
  hours_per_tick: 0.5
logging:
  level: debug
  json: true
items:
  compost: game:compost
  rot: game:rot
growers:
  substrate:growbed:
    shape: grow_bed
    acceptable_spores: [bolete]
  fruitingbag:
    acceptable_spores: [chanterelle]
spore_papers:
  substrate:sporepaper:
    collect_days: 2
collectibles:
  - code: game:mushroom-bolete-normal
    kind: block
    spore_harvestable: true
  - code: substrate:sporeprint-bolete
    variants: { mushroom: bolete }
";
        let config = SubstrateConfig::parse(yaml).unwrap();
        assert_eq!(config.world.name, "Cellar");
        assert_eq!(config.calendar.hours_per_tick, 0.5);
        assert!(config.logging.json);

        let bed = config.growers.get(&AssetCode::parse("substrate:growbed")).unwrap();
        assert_eq!(bed.shape, ContainerShape::GrowBed);
        assert!(bed.accepts("bolete"));
        // Keys without a domain land in `game`.
        assert!(config.growers.contains_key(&AssetCode::parse("game:fruitingbag")));

        let paper = config.spore_papers.values().next().unwrap();
        assert_eq!(paper.collect_days, 2.0);

        assert_eq!(config.collectibles.len(), 2);
        assert!(config.collectibles[0].spore_harvestable);
        assert_eq!(config.collectibles[1].variant("mushroom"), Some("bolete"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_reports_the_offending_container() {
        let yaml = r"
growers:
  substrate:fruitingbag:
    grow_chance: 2.0
";
        let config = SubstrateConfig::parse(yaml).unwrap();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Grower { .. }));
        assert!(err.to_string().contains("substrate:fruitingbag"));
    }

    #[test]
    fn validate_rejects_bad_calendar() {
        let config = SubstrateConfig {
            calendar: CalendarConfig {
                hours_per_day: 0.0,
                ..CalendarConfig::default()
            },
            ..SubstrateConfig::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Calendar { .. })));
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            SubstrateConfig::parse("growers: [unterminated"),
            Err(ConfigError::Yaml { .. })
        ));
    }
}
