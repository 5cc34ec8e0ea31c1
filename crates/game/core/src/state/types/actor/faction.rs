//! Faction tags and the interaction policy derived from them.
use std::borrow::Cow;
use std::collections::BTreeSet;
use std::fmt;

/// Allegiance tag attached to every actor.
///
/// Factions are open-ended string tags; the two used by the default roster are
/// provided as constants.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Faction(Cow<'static, str>);

impl Faction {
    /// Player's faction.
    pub const PLAYER: Self = Self(Cow::Borrowed("player"));
    /// Default faction of hostile actors.
    pub const MONSTERS: Self = Self(Cow::Borrowed("monsters"));

    pub fn new(tag: impl Into<Cow<'static, str>>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// An empty tag means no faction was assigned.
    pub fn is_unassigned(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// How an actor treats the occupant of a cell it tries to enter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stance {
    Friendly,
    Neutral,
    Hostile,
}

/// Faction sets deciding whether contact with another actor is an attack.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relations {
    pub friendlies: BTreeSet<Faction>,
    pub hostiles: BTreeSet<Faction>,
}

impl Relations {
    pub fn new(
        friendlies: impl IntoIterator<Item = Faction>,
        hostiles: impl IntoIterator<Item = Faction>,
    ) -> Self {
        Self {
            friendlies: friendlies.into_iter().collect(),
            hostiles: hostiles.into_iter().collect(),
        }
    }

    /// Friendly listings take precedence over hostile ones.
    pub fn stance_toward(&self, faction: &Faction) -> Stance {
        if self.friendlies.contains(faction) {
            Stance::Friendly
        } else if self.hostiles.contains(faction) {
            Stance::Hostile
        } else {
            Stance::Neutral
        }
    }
}
