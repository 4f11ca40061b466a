//! Configuration file support (`.classcal.toml`)
//!
//! Configuration files can be placed in:
//! - User home directory: `~/.classcal.toml` (user defaults)
//! - Project directory: `./.classcal.toml` (project defaults)
//! - Custom location via `--config` (replaces both)
//!
//! Precedence order (highest to lowest):
//! 1. Command-line arguments
//! 2. Project config (`./.classcal.toml`)
//! 3. User config (`~/.classcal.toml`)
//! 4. Built-in defaults

use anyhow::{Context, Result};
use classcal_calendar::{CalendarMeta, DEFAULT_PRODID, DEFAULT_VERSION};
use classcal_core::{ClockSlot, PeriodTable, PeriodTables, DEFAULT_REMINDER_MINUTES};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Config file name looked up in the home and working directories
pub const CONFIG_FILE_NAME: &str = ".classcal.toml";

/// Schedule export read when nothing else is configured
pub const DEFAULT_INPUT: &str = "Spring 2024 M-T Day Calendar.CSV";

/// Calendar written when nothing else is configured
pub const DEFAULT_OUTPUT: &str = "calendar_with_event.ics";

/// Configuration file structure for `.classcal.toml`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Default file locations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paths: Option<PathsConfig>,

    /// Calendar-level settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub calendar: Option<CalendarConfig>,

    /// Bell schedule overrides
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedules: Option<SchedulesConfig>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Schedule CSV export
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<PathBuf>,

    /// Calendar file to write
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,

    /// Period plan (TOML); when absent the interactive form is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalendarConfig {
    /// Product identifier (PRODID)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prodid: Option<String>,

    /// Calendar version (VERSION)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Reminder lead time in minutes
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulesConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regular: Option<TableConfig>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<TableConfig>,
}

/// A bell schedule written out as seven `{ start, end }` slots
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub slots: Vec<ClockSlot>,
}

impl PathsConfig {
    fn overlay(self, top: Self) -> Self {
        Self {
            input: top.input.or(self.input),
            output: top.output.or(self.output),
            plan: top.plan.or(self.plan),
        }
    }
}

impl CalendarConfig {
    fn overlay(self, top: Self) -> Self {
        Self {
            prodid: top.prodid.or(self.prodid),
            version: top.version.or(self.version),
            reminder_minutes: top.reminder_minutes.or(self.reminder_minutes),
        }
    }
}

impl SchedulesConfig {
    fn overlay(self, top: Self) -> Self {
        Self {
            regular: top.regular.or(self.regular),
            special: top.special.or(self.special),
        }
    }
}

fn overlay_section<T>(
    base: Option<T>,
    top: Option<T>,
    merge: impl FnOnce(T, T) -> T,
) -> Option<T> {
    match (base, top) {
        (Some(base), Some(top)) => Some(merge(base, top)),
        (base, top) => top.or(base),
    }
}

impl Config {
    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML for
    /// this structure.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            // TOML errors include line/column information, preserve it
            eprintln!(
                "{} Failed to parse config file: {}",
                "Error:".red().bold(),
                path.display()
            );
            eprintln!("{} {}", "Parse error:".yellow().bold(), e);
            eprintln!();
            eprintln!("{} Configuration file syntax:", "Help:".cyan().bold());
            eprintln!("  [paths]");
            eprintln!("  input = \"schedule.csv\"");
            eprintln!("  output = \"classes.ics\"");
            eprintln!("  [calendar]");
            eprintln!("  reminder_minutes = 15");
            eprintln!("  [schedules.regular]");
            eprintln!("  slots = [{{ start = \"7:30 AM\", end = \"8:30 AM\" }}, ...]");
            anyhow::anyhow!("Failed to parse config file: {e}")
        })?;

        Ok(config)
    }

    /// Load the effective configuration
    ///
    /// With an explicit path only that file is read, and failures are errors.
    /// Otherwise user and project configs are discovered and merged; a
    /// broken discovered file is reported and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error only when `explicit` is given and cannot be loaded.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }
        let user = Self::load_optional(dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME)));
        let project = Self::load_optional(Some(PathBuf::from(CONFIG_FILE_NAME)));
        Ok(Self::merge(user, project))
    }

    fn load_optional(path: Option<PathBuf>) -> Option<Self> {
        let path = path.filter(|p| p.exists())?;
        match Self::load_from_file(&path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                Some(config)
            }
            Err(e) => {
                eprintln!(
                    "{} Failed to load config from {}: {}",
                    "Warning:".yellow().bold(),
                    path.display(),
                    e
                );
                None
            }
        }
    }

    /// Merge configs: the project config overrides the user config field by field
    #[must_use]
    pub fn merge(user_config: Option<Self>, project_config: Option<Self>) -> Self {
        let user = user_config.unwrap_or_default();
        let project = project_config.unwrap_or_default();
        Self {
            paths: overlay_section(user.paths, project.paths, PathsConfig::overlay),
            calendar: overlay_section(user.calendar, project.calendar, CalendarConfig::overlay),
            schedules: overlay_section(
                user.schedules,
                project.schedules,
                SchedulesConfig::overlay,
            ),
        }
    }

    fn paths(&self) -> PathsConfig {
        self.paths.clone().unwrap_or_default()
    }

    fn calendar(&self) -> CalendarConfig {
        self.calendar.clone().unwrap_or_default()
    }

    /// Resolve the schedule export path from CLI, config, or default
    #[must_use]
    pub fn resolve_input(&self, cli_value: Option<PathBuf>) -> PathBuf {
        cli_value
            .or_else(|| self.paths().input)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT))
    }

    /// Resolve the calendar output path from CLI, config, or default
    #[must_use]
    pub fn resolve_output(&self, cli_value: Option<PathBuf>) -> PathBuf {
        cli_value
            .or_else(|| self.paths().output)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT))
    }

    /// Resolve the period plan file, if any
    #[must_use]
    pub fn resolve_plan(&self, cli_value: Option<PathBuf>) -> Option<PathBuf> {
        cli_value.or_else(|| self.paths().plan)
    }

    /// Calendar metadata with defaults filled in
    #[must_use]
    pub fn calendar_meta(&self) -> CalendarMeta {
        let calendar = self.calendar();
        CalendarMeta {
            prodid: calendar
                .prodid
                .unwrap_or_else(|| DEFAULT_PRODID.to_string()),
            version: calendar
                .version
                .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
        }
    }

    /// Reminder lead time in minutes
    #[must_use]
    pub fn reminder_minutes(&self) -> u32 {
        self.calendar()
            .reminder_minutes
            .unwrap_or(DEFAULT_REMINDER_MINUTES)
    }

    /// Bell schedules, with configured overrides applied
    ///
    /// # Errors
    ///
    /// Returns an error if a configured table is malformed.
    pub fn period_tables(&self) -> Result<PeriodTables> {
        let mut tables = PeriodTables::default();
        let Some(schedules) = &self.schedules else {
            return Ok(tables);
        };
        if let Some(regular) = &schedules.regular {
            tables.regular = PeriodTable::from_clock_slots(&regular.slots)
                .context("Invalid [schedules.regular] in config")?;
        }
        if let Some(special) = &schedules.special {
            tables.special = PeriodTable::from_clock_slots(&special.slots)
                .context("Invalid [schedules.special] in config")?;
        }
        Ok(tables)
    }
}
