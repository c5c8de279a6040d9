//! Drug filter selection.

use std::{convert::Infallible, fmt, str::FromStr};

/// Value of the drug filter select.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FilterSelection {
    /// The `all` sentinel: no filtering.
    #[default]
    All,
    Drug(String),
}

impl FilterSelection {
    pub const ALL: &'static str = "all";

    pub fn matches(&self, drug: &str) -> bool {
        match self {
            Self::All => true,
            Self::Drug(selected) => selected == drug,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => Self::ALL,
            Self::Drug(drug) => drug,
        }
    }
}

impl FromStr for FilterSelection {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == Self::ALL {
            Self::All
        } else {
            Self::Drug(s.to_string())
        })
    }
}

impl From<&str> for FilterSelection {
    fn from(value: &str) -> Self {
        match value.parse() {
            Ok(selection) => selection,
            Err(never) => match never {},
        }
    }
}

impl fmt::Display for FilterSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
