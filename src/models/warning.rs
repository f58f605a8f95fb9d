//! Warning accumulation
//!
//! Engine stages report data-quality findings instead of failing. A finding
//! is either non-fatal (the result is usable but shaky) or fatal (no result).
//! Severity only ever escalates within one accumulator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of the worst finding so far
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WarningLevel {
    #[default]
    None,
    NonFatal,
    Fatal,
}

impl From<WarningLevel> for u8 {
    fn from(level: WarningLevel) -> Self {
        match level {
            WarningLevel::None => 0,
            WarningLevel::NonFatal => 1,
            WarningLevel::Fatal => 2,
        }
    }
}

impl TryFrom<u8> for WarningLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::NonFatal),
            2 => Ok(Self::Fatal),
            other => Err(format!("invalid warning level {}", other)),
        }
    }
}

impl fmt::Display for WarningLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::NonFatal => write!(f, "non-fatal"),
            Self::Fatal => write!(f, "fatal"),
        }
    }
}

/// Ordered warning messages plus their escalated severity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warnings {
    level: WarningLevel,
    messages: Vec<String>,
}

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finding; the level never decreases
    pub fn push(&mut self, level: WarningLevel, message: impl Into<String>) {
        self.level = self.level.max(level);
        self.messages.push(message.into());
    }

    pub fn non_fatal(&mut self, message: impl Into<String>) {
        self.push(WarningLevel::NonFatal, message);
    }

    pub fn fatal(&mut self, message: impl Into<String>) {
        self.push(WarningLevel::Fatal, message);
    }

    /// Append another accumulator's messages after ours
    pub fn merge(&mut self, other: Warnings) {
        self.level = self.level.max(other.level);
        self.messages.extend(other.messages);
    }

    pub fn level(&self) -> WarningLevel {
        self.level
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn is_fatal(&self) -> bool {
        self.level == WarningLevel::Fatal
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// A stage result: a value unless a fatal finding stopped it, plus warnings
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    pub value: Option<T>,
    pub warnings: Warnings,
}

impl<T> Outcome<T> {
    /// A successful outcome, possibly carrying non-fatal warnings
    pub fn ok(value: T, warnings: Warnings) -> Self {
        Self {
            value: Some(value),
            warnings,
        }
    }

    /// A fatal outcome: no value, only warnings
    pub fn fatal(warnings: Warnings) -> Self {
        debug_assert!(warnings.is_fatal());
        Self {
            value: None,
            warnings,
        }
    }

    pub fn is_fatal(&self) -> bool {
        self.value.is_none()
    }

    pub fn level(&self) -> WarningLevel {
        self.warnings.level()
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            value: self.value.map(f),
            warnings: self.warnings,
        }
    }
}
