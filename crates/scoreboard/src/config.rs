//! Configuration system for the scoreboard simulator.
//!
//! This module defines the configuration structures used to parameterize a run.
//! It provides:
//! 1. **Defaults:** Baseline unit capacities and latencies (the classic textbook machine).
//! 2. **Structures:** General run settings and the per-class functional-unit table.
//! 3. **Formats:** JSON via serde, and the plain `<class> <capacity> <latency>` table.
//!
//! Validation happens before any cycle runs: `Config::validate` rejects
//! non-positive values, and `ScoreboardEngine::load` rejects a configuration that
//! does not cover every class the program needs. JSON input is strict: unknown keys,
//! a missing `units` table and a class named twice are all errors, so a typo never
//! falls back to the default machine.

use std::collections::BTreeMap;
use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::common::error::ConfigError;
use crate::core::units::UnitClass;

/// Default configuration constants for the simulator.
///
/// One unit of each class, with the latencies of the Hennessy-Patterson
/// scoreboard example.
mod defaults {
    /// Units per class.
    pub const CAPACITY: usize = 1;

    /// Address unit latency in cycles.
    pub const ADDRESS_LATENCY: u64 = 1;

    /// Adder latency in cycles.
    pub const ADDER_LATENCY: u64 = 2;

    /// Multiplier latency in cycles.
    pub const MULTIPLIER_LATENCY: u64 = 10;

    /// Divider latency in cycles.
    pub const DIVIDER_LATENCY: u64 = 20;
}

/// Root configuration structure.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use sbsim_core::config::Config;
/// use sbsim_core::core::units::UnitClass;
///
/// let config = Config::default();
/// assert!(!config.general.trace_cycles);
/// assert_eq!(config.units.get(UnitClass::Multiplier).map(|u| u.latency), Some(10));
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use sbsim_core::config::Config;
/// use sbsim_core::core::units::UnitClass;
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "units": {
///         "int":  { "capacity": 2, "latency": 1 },
///         "add":  { "capacity": 1, "latency": 2 },
///         "mult": { "capacity": 2, "latency": 10 }
///     }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, Some(500));
/// assert_eq!(config.units.get(UnitClass::Address).map(|u| u.capacity), Some(2));
/// assert!(config.units.get(UnitClass::Divider).is_none());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// General simulation settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Functional-unit table. Required in JSON.
    pub units: UnitsConfig,
}

/// JSON form of [`Config`] keeping every `units` key with its spelling.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigFile {
    #[serde(default)]
    general: GeneralConfig,
    units: UnitEntries,
}

impl Config {
    /// Builds a configuration with default general settings and the given unit table.
    pub fn with_units(units: UnitsConfig) -> Self {
        Self {
            general: GeneralConfig::default(),
            units,
        }
    }

    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// `ConfigError::Json` for malformed JSON, unknown keys or class names and a
    /// missing `units` table, `ConfigError::DuplicateClassName` when two keys name
    /// the same class, and the errors of [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        let config = Self {
            general: file.general,
            units: UnitsConfig::from_entries(file.units)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates a plain configuration table.
    ///
    /// # Errors
    ///
    /// See [`UnitsConfig::parse_table`] and [`Config::validate`].
    pub fn from_table(text: &str) -> Result<Self, ConfigError> {
        let config = Self::with_units(UnitsConfig::parse_table(text)?);
        config.validate()?;
        Ok(config)
    }

    /// Checks that every configured class has a positive capacity and latency.
    ///
    /// # Errors
    ///
    /// `ConfigError::ZeroCapacity` or `ConfigError::ZeroLatency` for the first
    /// offending class in class order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.units.validate()
    }
}

/// General simulation settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneralConfig {
    /// Record a snapshot of the stage table after every cycle.
    #[serde(default)]
    pub trace_cycles: bool,

    /// Hard ceiling on simulated cycles, independent of the deadlock bound.
    #[serde(default)]
    pub max_cycles: Option<u64>,
}

/// Capacity and latency of one functional-unit class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitClassConfig {
    /// Number of identical units of this class.
    pub capacity: usize,
    /// Cycles from Read-Operands to Execute-Complete.
    pub latency: u64,
}

impl UnitClassConfig {
    /// Creates a class entry.
    pub const fn new(capacity: usize, latency: u64) -> Self {
        Self { capacity, latency }
    }
}

/// Functional-unit table keyed by class.
///
/// Iteration is in class order (address, adder, multiplier, divider), which is
/// also the order unit ids are assigned in. Serializes as a map keyed by canonical
/// class name; deserializing accepts aliases and rejects a class given twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitsConfig {
    classes: BTreeMap<UnitClass, UnitClassConfig>,
}

/// One `units` key as written, with the class it resolved to.
struct UnitEntry {
    class: UnitClass,
    name: String,
    unit: UnitClassConfig,
}

/// Every entry of a `units` map in document order, duplicates included.
struct UnitEntries(Vec<UnitEntry>);

impl<'de> Deserialize<'de> for UnitEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = UnitEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from unit class to { capacity, latency }")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::new();
                while let Some((name, unit)) = map.next_entry::<String, UnitClassConfig>()? {
                    let class: UnitClass = name.parse().map_err(de::Error::custom)?;
                    entries.push(UnitEntry { class, name, unit });
                }
                Ok(UnitEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Serialize for UnitsConfig {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.classes)
    }
}

impl<'de> Deserialize<'de> for UnitsConfig {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = UnitEntries::deserialize(deserializer)?;
        Self::from_entries(entries).map_err(de::Error::custom)
    }
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self::empty()
            .with(
                UnitClass::Address,
                defaults::CAPACITY,
                defaults::ADDRESS_LATENCY,
            )
            .with(UnitClass::Adder, defaults::CAPACITY, defaults::ADDER_LATENCY)
            .with(
                UnitClass::Multiplier,
                defaults::CAPACITY,
                defaults::MULTIPLIER_LATENCY,
            )
            .with(
                UnitClass::Divider,
                defaults::CAPACITY,
                defaults::DIVIDER_LATENCY,
            )
    }
}

impl UnitsConfig {
    /// A table with no classes configured.
    pub const fn empty() -> Self {
        Self {
            classes: BTreeMap::new(),
        }
    }

    /// Builder-style insert, replacing any previous entry for `class`.
    #[must_use]
    pub fn with(mut self, class: UnitClass, capacity: usize, latency: u64) -> Self {
        let _ = self.set(class, UnitClassConfig::new(capacity, latency));
        self
    }

    /// Builder-style removal of a class.
    #[must_use]
    pub fn without(mut self, class: UnitClass) -> Self {
        let _ = self.classes.remove(&class);
        self
    }

    /// Sets the entry for `class`, returning the previous one.
    pub fn set(&mut self, class: UnitClass, unit: UnitClassConfig) -> Option<UnitClassConfig> {
        self.classes.insert(class, unit)
    }

    /// Entry for `class`, if configured.
    pub fn get(&self, class: UnitClass) -> Option<UnitClassConfig> {
        self.classes.get(&class).copied()
    }

    /// Configured classes in class order.
    pub fn iter(&self) -> impl Iterator<Item = (UnitClass, UnitClassConfig)> + '_ {
        self.classes.iter().map(|(&c, &u)| (c, u))
    }

    /// Checks that every configured class has a positive capacity and latency.
    ///
    /// # Errors
    ///
    /// `ConfigError::ZeroCapacity` or `ConfigError::ZeroLatency` for the first
    /// offending class in class order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (class, unit) in self.iter() {
            if unit.capacity == 0 {
                return Err(ConfigError::ZeroCapacity(class));
            }
            if unit.latency == 0 {
                return Err(ConfigError::ZeroLatency(class));
            }
        }
        Ok(())
    }

    fn from_entries(entries: UnitEntries) -> Result<Self, ConfigError> {
        let mut units = Self::empty();
        let mut names: BTreeMap<UnitClass, String> = BTreeMap::new();
        for UnitEntry { class, name, unit } in entries.0 {
            if let Some(first) = names.insert(class, name.clone()) {
                return Err(ConfigError::DuplicateClassName {
                    class,
                    first,
                    second: name,
                });
            }
            let _ = units.set(class, unit);
        }
        Ok(units)
    }

    /// Total number of units across all classes.
    pub fn total_units(&self) -> usize {
        self.classes.values().map(|u| u.capacity).sum()
    }

    /// Parses the plain table format: one `<class> <capacity> <latency>` per line.
    ///
    /// Blank lines and `#` comments are ignored; class names accept the aliases of
    /// [`UnitClass`].
    ///
    /// # Errors
    ///
    /// `Malformed` for lines without exactly three fields or with non-numeric
    /// values, `UnknownClass` and `DuplicateClass` as named.
    pub fn parse_table(text: &str) -> Result<Self, ConfigError> {
        let mut units = Self::empty();
        for (idx, raw) in text.lines().enumerate() {
            let line = idx + 1;
            let code = raw.split('#').next().unwrap_or_default().trim();
            if code.is_empty() {
                continue;
            }
            let malformed = || ConfigError::Malformed {
                line,
                text: code.to_string(),
            };
            let fields: Vec<&str> = code.split_whitespace().collect();
            let [name, capacity, latency] = fields[..] else {
                return Err(malformed());
            };
            let class: UnitClass = name.parse().map_err(|_| ConfigError::UnknownClass {
                line,
                name: name.to_string(),
            })?;
            let capacity: usize = capacity.parse().map_err(|_| malformed())?;
            let latency: u64 = latency.parse().map_err(|_| malformed())?;
            if units
                .set(class, UnitClassConfig::new(capacity, latency))
                .is_some()
            {
                return Err(ConfigError::DuplicateClass { line, class });
            }
        }
        Ok(units)
    }
}
