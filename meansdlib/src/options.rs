//! Input options for building a summary table.
//!
//! This module contains all configuration types that control which sheets
//! are read and how categories and numbers are matched and rendered.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::MeansdError;
use crate::Result;

/// Minimum similarity (0..=1) for a fuzzy category match.
pub const FUZZY_THRESHOLD: f64 = 0.5;

/// Largest supported number of decimal places.
pub const MAX_DECIMAL_PLACES: u8 = 2;

/// The role a sheet plays in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Center values (means)
    Mean,
    /// Spread values (standard deviations)
    Sd,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Mean => write!(f, "mean"),
            Role::Sd => write!(f, "SD"),
        }
    }
}

/// How row labels are matched against the canonical categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Row label must equal the category name
    #[default]
    Exact,
    /// Best similarity at or above [`FUZZY_THRESHOLD`]
    Fuzzy,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exact" => Ok(MatchMode::Exact),
            "fuzzy" | "approximate" => Ok(MatchMode::Fuzzy),
            _ => Err(format!("Unknown match mode: {}", s)),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Exact => write!(f, "exact"),
            MatchMode::Fuzzy => write!(f, "fuzzy"),
        }
    }
}

/// How numbers are turned into text.
///
/// A single-source cell historically collapsed integral values (`5.0` → `5`)
/// while a multi-source cell always used fixed-point (`5.0` → `5.0` at one
/// decimal place). `Auto` keeps that split; the other variants force one
/// rendering everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberStyle {
    /// Collapse integers for one source, fixed-point for several
    #[default]
    Auto,
    /// Integral values render without a decimal point
    CollapseIntegers,
    /// Always render at the configured number of decimal places
    FixedPoint,
}

impl NumberStyle {
    /// Resolve `Auto` for a series backed by `source_count` sheets.
    pub fn resolve(self, source_count: usize) -> NumberStyle {
        match self {
            NumberStyle::Auto if source_count > 1 => NumberStyle::FixedPoint,
            NumberStyle::Auto => NumberStyle::CollapseIntegers,
            other => other,
        }
    }
}

impl FromStr for NumberStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(NumberStyle::Auto),
            "collapse-integers" | "collapse" | "integer" => Ok(NumberStyle::CollapseIntegers),
            "fixed-point" | "fixed" => Ok(NumberStyle::FixedPoint),
            _ => Err(format!("Unknown number style: {}", s)),
        }
    }
}

impl fmt::Display for NumberStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberStyle::Auto => write!(f, "auto"),
            NumberStyle::CollapseIntegers => write!(f, "collapse-integers"),
            NumberStyle::FixedPoint => write!(f, "fixed-point"),
        }
    }
}

/// Options for building a summary table.
///
/// Can be loaded from JSON; missing fields take their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Sheets supplying center values, in selection order
    pub mean_sources: Vec<String>,
    /// Sheets supplying spread values, in selection order
    pub sd_sources: Vec<String>,
    /// Decimal places for rendered numbers (0..=2)
    pub decimal_places: u8,
    /// Category matching policy
    pub match_mode: MatchMode,
    /// Integer collapsing policy
    pub number_style: NumberStyle,
}

impl BuildOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mean sheets.
    pub fn mean_sources(mut self, sheets: Vec<String>) -> Self {
        self.mean_sources = sheets;
        self
    }

    /// Append one mean sheet.
    pub fn mean_source(mut self, sheet: impl Into<String>) -> Self {
        self.mean_sources.push(sheet.into());
        self
    }

    /// Set the SD sheets.
    pub fn sd_sources(mut self, sheets: Vec<String>) -> Self {
        self.sd_sources = sheets;
        self
    }

    /// Append one SD sheet.
    pub fn sd_source(mut self, sheet: impl Into<String>) -> Self {
        self.sd_sources.push(sheet.into());
        self
    }

    /// Set the number of decimal places.
    pub fn decimal_places(mut self, places: u8) -> Self {
        self.decimal_places = places;
        self
    }

    /// Set the category matching policy.
    pub fn match_mode(mut self, mode: MatchMode) -> Self {
        self.match_mode = mode;
        self
    }

    /// Set the number rendering policy.
    pub fn number_style(mut self, style: NumberStyle) -> Self {
        self.number_style = style;
        self
    }

    /// Sheets selected for a role.
    pub fn sources(&self, role: Role) -> &[String] {
        match role {
            Role::Mean => &self.mean_sources,
            Role::Sd => &self.sd_sources,
        }
    }

    /// Fill empty roles with the conventional defaults: the first sheet for
    /// means and the second (or the only) sheet for SDs.
    pub fn with_default_sources(mut self, sheet_names: &[String]) -> Self {
        if sheet_names.is_empty() {
            return self;
        }
        if self.mean_sources.is_empty() {
            self.mean_sources.push(sheet_names[0].clone());
        }
        if self.sd_sources.is_empty() {
            let idx = 1.min(sheet_names.len() - 1);
            self.sd_sources.push(sheet_names[idx].clone());
        }
        self
    }

    /// Check the options before any sheet is read.
    pub fn validate(&self) -> Result<()> {
        if self.decimal_places > MAX_DECIMAL_PLACES {
            return Err(MeansdError::InvalidPrecision {
                value: self.decimal_places,
                max: MAX_DECIMAL_PLACES,
            });
        }
        for role in [Role::Mean, Role::Sd] {
            if self.sources(role).is_empty() {
                return Err(MeansdError::NoSources { role });
            }
        }
        Ok(())
    }
}
