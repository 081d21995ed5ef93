use std::time::{SystemTime, UNIX_EPOCH};
use serde::{Serialize, Deserialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum SeededOrNot {
    Seeded(u64),
    Unseeded,
}

impl SeededOrNot {
    /// The configured seed, or a fresh one taken from the system clock.
    pub fn resolve(&self) -> u64 {
        match self {
            SeededOrNot::Seeded(seed) => *seed,
            SeededOrNot::Unseeded => {
                let now = SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default();
                now.as_nanos() as u64
            }
        }
    }
}
