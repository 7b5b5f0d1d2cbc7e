//! Strongly typed identifier for placeable targets.

use std::fmt;

/// Identifier of a point of interest in the caller's object registry.
///
/// The engine never allocates ids; it only carries them through to observers
/// and trace output.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetId(pub u32);

impl TargetId {
    /// Sentinel meaning "no valid id".
    pub const INVALID: TargetId = TargetId(u32::MAX);
}

impl Default for TargetId {
    /// Returns the `INVALID` sentinel so unassigned ids are visibly invalid.
    #[inline(always)]
    fn default() -> Self {
        Self::INVALID
    }
}

impl fmt::Display for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

impl TryFrom<usize> for TargetId {
    type Error = std::num::TryFromIntError;
    fn try_from(n: usize) -> Result<TargetId, Self::Error> {
        u32::try_from(n).map(TargetId)
    }
}
