//! Animal species.
//!
//! A closed set of five kinds. Each level spawns one animal per configured
//! species, owners ask for one, and calls target one.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Cat,
    Cow,
    Dog,
    Pig,
    Sheep,
}

impl Species {
    pub const ALL: [Species; 5] = [
        Species::Cat,
        Species::Cow,
        Species::Dog,
        Species::Pig,
        Species::Sheep,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Cat => "cat",
            Species::Cow => "cow",
            Species::Dog => "dog",
            Species::Pig => "pig",
            Species::Sheep => "sheep",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        Species::ALL
            .into_iter()
            .find(|species| species.as_str() == name)
            .ok_or_else(|| format!("Unknown species '{}'", name))
    }
}
