//! Category hierarchy
//!
//! Every transaction carries its category at three levels, from the broad
//! top-level bucket down to the specific merchant category. Budgets aggregate
//! on one chosen level.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BudgetError;

/// Which level of the category hierarchy to aggregate on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryLevel {
    /// The most specific category (e.g. "Coffee Shops")
    Specific,
    /// The parent category (e.g. "Restaurants")
    Parent,
    /// The top-level category (e.g. "Food")
    #[default]
    Top,
}

impl CategoryLevel {
    /// All levels, most specific first
    pub const ALL: [CategoryLevel; 3] = [Self::Specific, Self::Parent, Self::Top];

    /// Name as accepted on the command line and in settings
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Specific => "specific",
            Self::Parent => "parent",
            Self::Top => "top",
        }
    }
}

impl fmt::Display for CategoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CategoryLevel {
    type Err = BudgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "specific" | "category" | "category_name" => Ok(Self::Specific),
            "parent" | "parent_category_name" => Ok(Self::Parent),
            "top" | "grandparent" | "grandparent_category_name" => Ok(Self::Top),
            other => Err(BudgetError::invalid_argument(format!(
                "unknown category level '{}' (expected specific, parent or top)",
                other
            ))),
        }
    }
}

/// A transaction's category at every hierarchy level
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CategoryPath {
    pub specific: String,
    pub parent: String,
    pub top: String,
}

impl CategoryPath {
    /// Create a path from the three level names
    pub fn new(
        specific: impl Into<String>,
        parent: impl Into<String>,
        top: impl Into<String>,
    ) -> Self {
        Self {
            specific: specific.into(),
            parent: parent.into(),
            top: top.into(),
        }
    }

    /// A path where every level carries the same name
    pub fn flat(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            specific: name.clone(),
            parent: name.clone(),
            top: name,
        }
    }

    /// Look up the name at a level
    pub fn at(&self, level: CategoryLevel) -> &str {
        match level {
            CategoryLevel::Specific => &self.specific,
            CategoryLevel::Parent => &self.parent,
            CategoryLevel::Top => &self.top,
        }
    }
}

impl fmt::Display for CategoryPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} > {} > {}", self.top, self.parent, self.specific)
    }
}
