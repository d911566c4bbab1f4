//! Composite character addressing.
//!
//! A character is addressed by (civilization, token number). The pair is
//! minted once and never changes; every per-character table in the engine is
//! keyed by it. Kept as a plain value type with derived ordering; there is
//! no wire format that would call for bit-packing.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric id of a registered character collection. Assigned sequentially
/// starting at 1; id 0 is never valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CivilizationId(pub u32);

impl fmt::Display for CivilizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "civ:{}", self.0)
    }
}

/// Token number within a civilization, sequential starting at 1.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TokenNumber(pub u64);

impl fmt::Display for TokenNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Globally unique character key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId {
    pub civilization: CivilizationId,
    pub token: TokenNumber,
}

impl CharacterId {
    pub const fn new(civilization: CivilizationId, token: TokenNumber) -> Self {
        Self {
            civilization,
            token,
        }
    }
}

impl fmt::Display for CharacterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.civilization, self.token)
    }
}
