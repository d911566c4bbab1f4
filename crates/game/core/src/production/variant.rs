//! The three production lines.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// A production variant. All three share the same slot/recipe machinery and
/// differ only in catalog content and whether partial effort is allowed
/// (quests scale rewards by committed effort, craft and forge do not).
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    Craft,
    Forge,
    Quest,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::Craft, Variant::Forge, Variant::Quest];

    pub fn name(self) -> &'static str {
        match self {
            Variant::Craft => "craft",
            Variant::Forge => "forge",
            Variant::Quest => "quest",
        }
    }

    /// Only quests accept partial stat effort.
    pub fn scales_by_effort(self) -> bool {
        matches!(self, Variant::Quest)
    }
}
