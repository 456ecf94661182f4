use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConversionMode {
    /// Reproduce the pacing and emotion of the source clip.
    Mimic,
    /// Clear, natural delivery; source timing is ignored.
    #[default]
    Clean,
}

impl ConversionMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConversionMode::Mimic => "mimic",
            ConversionMode::Clean => "clean",
        }
    }
}

impl FromStr for ConversionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mimic" => Ok(ConversionMode::Mimic),
            "clean" => Ok(ConversionMode::Clean),
            other => Err(format!(
                "Invalid conversion mode: {}. Expected: mimic or clean",
                other
            )),
        }
    }
}

impl fmt::Display for ConversionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
