//! Configuration file support for FuzzyHealth
//!
//! Loads user preferences from JSON files.
//!
//! Search order:
//! 1. Explicit path (--config CLI flag)
//! 2. `.fuzzyhealthrc.json` in the working directory
//! 3. `fuzzyhealth.config.json` in the working directory
//!
//! All fields are optional. CLI flags take precedence over config file values.

use crate::catalog::{HealthInputs, Variable};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAMES: &[&str] = &[".fuzzyhealthrc.json", "fuzzyhealth.config.json"];

/// FuzzyHealth configuration loaded from a JSON config file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FuzzyHealthConfig {
    /// Inputs used when a value is not given on the command line
    #[serde(default)]
    pub defaults: Option<InputDefaults>,

    /// Output format (default: text)
    #[serde(default)]
    pub format: Option<OutputFormat>,

    /// Include the explanation trace in text output (default: true)
    #[serde(default)]
    pub show_trace: Option<bool>,

    /// Include advisory tips in text output (default: true)
    #[serde(default)]
    pub show_tips: Option<bool>,

    /// Reject inputs outside each variable's display domain (default: false)
    #[serde(default)]
    pub strict_domain: Option<bool>,
}

/// Default patient inputs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InputDefaults {
    /// Blood pressure in mmHg (default: 120)
    pub blood_pressure: Option<f64>,
    /// Blood sugar in mg/dL (default: 100)
    pub blood_sugar: Option<f64>,
    /// Body mass index (default: 22)
    pub bmi: Option<f64>,
    /// Age in years (default: 30)
    pub age: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
        }
    }
}

/// Resolved configuration with every default filled in
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub defaults: HealthInputs,
    pub format: OutputFormat,
    pub show_trace: bool,
    pub show_tips: bool,
    pub strict_domain: bool,
    /// Path the config was loaded from (None if defaults)
    pub config_path: Option<PathBuf>,
}

impl FuzzyHealthConfig {
    /// Validate the configuration for logical errors
    pub fn validate(&self) -> Result<()> {
        if let Some(ref d) = self.defaults {
            for (name, val) in [
                ("blood_pressure", d.blood_pressure),
                ("blood_sugar", d.blood_sugar),
                ("bmi", d.bmi),
            ] {
                if let Some(v) = val {
                    if !v.is_finite() {
                        anyhow::bail!("defaults.{} must be a finite number (got {})", name, v);
                    }
                    if v <= 0.0 {
                        anyhow::bail!("defaults.{} must be positive (got {})", name, v);
                    }
                }
            }
        }

        Ok(())
    }

    /// Resolve config into its final form
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        self.validate()?;

        let fallback = HealthInputs::default();
        let defaults = match &self.defaults {
            Some(d) => HealthInputs {
                blood_pressure: d.blood_pressure.unwrap_or(fallback.blood_pressure),
                blood_sugar: d.blood_sugar.unwrap_or(fallback.blood_sugar),
                bmi: d.bmi.unwrap_or(fallback.bmi),
                age: d.age.unwrap_or(fallback.age),
            },
            None => fallback,
        };

        Ok(ResolvedConfig {
            defaults,
            format: self.format.unwrap_or_default(),
            show_trace: self.show_trace.unwrap_or(true),
            show_tips: self.show_tips.unwrap_or(true),
            strict_domain: self.strict_domain.unwrap_or(false),
            config_path: None,
        })
    }
}

impl ResolvedConfig {
    /// Build a ResolvedConfig with all defaults (no config file)
    pub fn defaults() -> Result<Self> {
        FuzzyHealthConfig::default().resolve()
    }

    /// Check inputs against the display domains
    ///
    /// Returns the variables that fall outside their domain. With
    /// `strict_domain` set, any such variable is an error instead.
    /// Non-finite values are always an error.
    pub fn check_domains(&self, inputs: &HealthInputs) -> Result<Vec<Variable>> {
        for variable in Variable::ALL {
            let value = inputs.value(variable);
            if !value.is_finite() {
                anyhow::bail!("{} must be a finite number (got {})", variable, value);
            }
        }

        let outside: Vec<Variable> = Variable::ALL
            .into_iter()
            .filter(|v| !v.in_domain(inputs.value(*v)))
            .collect();

        if self.strict_domain {
            if let Some(v) = outside.first() {
                let (min, max) = v.domain();
                anyhow::bail!(
                    "{} = {} is outside its domain [{}, {}]",
                    v,
                    inputs.value(*v),
                    min,
                    max
                );
            }
        }

        Ok(outside)
    }
}

/// Discover and load a config file from a directory
///
/// Returns `None` if no config file is found (use defaults).
pub fn discover_config(dir: &Path) -> Result<Option<(FuzzyHealthConfig, PathBuf)>> {
    for name in CONFIG_FILE_NAMES {
        let path = dir.join(name);
        if path.exists() {
            let config = load_config_file(&path)?;
            return Ok(Some((config, path)));
        }
    }

    Ok(None)
}

/// Load config from an explicit file path
pub fn load_config_file(path: &Path) -> Result<FuzzyHealthConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file: {}", path.display()))?;

    let config: FuzzyHealthConfig = serde_json::from_str(&content)
        .with_context(|| format!("failed to parse config file: {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("invalid config in: {}", path.display()))?;

    Ok(config)
}

/// Load and resolve config
///
/// If `config_path` is provided, loads from that file.
/// Otherwise, discovers config in `dir`.
/// Returns default config if nothing is found.
pub fn load_and_resolve(dir: &Path, config_path: Option<&Path>) -> Result<ResolvedConfig> {
    let (config, source_path) = if let Some(path) = config_path {
        let config = load_config_file(path)?;
        (config, Some(path.to_path_buf()))
    } else {
        match discover_config(dir)? {
            Some((config, path)) => (config, Some(path)),
            None => (FuzzyHealthConfig::default(), None),
        }
    };

    let mut resolved = config.resolve()?;
    resolved.config_path = source_path;
    Ok(resolved)
}
