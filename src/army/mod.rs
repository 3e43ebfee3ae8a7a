//! Army presets.
//!
//! A preset is a named, ordered list of piece types a player brings
//! into setup. Storage of presets belongs to an external collaborator;
//! the engine only resolves a preset against the piece registry at
//! match-setup time.

use serde::{Deserialize, Serialize};

use crate::pieces::{PieceDefinition, PieceRegistry, PieceTypeId};

/// A named, ordered army list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmyPreset {
    pub name: String,
    pub pieces: Vec<PieceTypeId>,
}

/// A preset referenced a type the registry does not define.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UnknownPieceType(pub PieceTypeId);

impl std::fmt::Display for UnknownPieceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "piece type {} is not in the registry", self.0)
    }
}

impl std::error::Error for UnknownPieceType {}

impl ArmyPreset {
    /// Create a preset.
    #[must_use]
    pub fn new(name: impl Into<String>, pieces: impl Into<Vec<PieceTypeId>>) -> Self {
        Self {
            name: name.into(),
            pieces: pieces.into(),
        }
    }

    /// The starter army: a commander with a balanced line.
    #[must_use]
    pub fn starter() -> Self {
        Self::new(
            "Starter",
            [
                PieceTypeId::King,
                PieceTypeId::Knight,
                PieceTypeId::Guardian,
                PieceTypeId::Recruit,
                PieceTypeId::Recruit,
                PieceTypeId::Recruit,
            ],
        )
    }

    /// Resolve every entry against the registry, in order. Fails on the
    /// first type id the registry does not define.
    pub fn resolve<'r>(
        &self,
        registry: &'r PieceRegistry,
    ) -> Result<Vec<&'r PieceDefinition>, UnknownPieceType> {
        self.pieces
            .iter()
            .map(|&type_id| registry.get(type_id).ok_or(UnknownPieceType(type_id)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starter_resolves_in_order() {
        let registry = PieceRegistry::standard();
        let resolved = ArmyPreset::starter().resolve(&registry).unwrap();
        assert_eq!(resolved.len(), 6);
        assert_eq!(resolved[0].type_id, PieceTypeId::King);
        assert_eq!(resolved[3].type_id, PieceTypeId::Recruit);
    }

    #[test]
    fn test_missing_definition_is_rejected() {
        let registry = PieceRegistry::new();
        let err = ArmyPreset::starter().resolve(&registry).unwrap_err();
        assert_eq!(err, UnknownPieceType(PieceTypeId::King));
    }
}
