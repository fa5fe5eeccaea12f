//! Catalog records: the read-only payload referenced by tree nodes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier ordering every pokedex tree.
pub type RecordId = u32;

/// Elemental type tag of a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PokemonType {
    Grass,
    Fire,
    Water,
    Bug,
    Normal,
    Poison,
    Electric,
    Ground,
    Fairy,
    Fighting,
    Psychic,
    Rock,
    Ghost,
    Dragon,
    Ice,
}

impl PokemonType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PokemonType::Grass => "GRASS",
            PokemonType::Fire => "FIRE",
            PokemonType::Water => "WATER",
            PokemonType::Bug => "BUG",
            PokemonType::Normal => "NORMAL",
            PokemonType::Poison => "POISON",
            PokemonType::Electric => "ELECTRIC",
            PokemonType::Ground => "GROUND",
            PokemonType::Fairy => "FAIRY",
            PokemonType::Fighting => "FIGHTING",
            PokemonType::Psychic => "PSYCHIC",
            PokemonType::Rock => "ROCK",
            PokemonType::Ghost => "GHOST",
            PokemonType::Dragon => "DRAGON",
            PokemonType::Ice => "ICE",
        }
    }
}

impl fmt::Display for PokemonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable catalog entry.
///
/// Trees borrow records from the [`Catalog`](crate::domain::Catalog); a record
/// is never copied or mutated once the catalog is loaded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: PokemonType,
    pub hp: u32,
    pub attack: u32,
    /// Whether the record with `id + 1` is this record's evolution
    #[serde(default)]
    pub can_evolve: bool,
}

impl Record {
    pub fn new(
        id: RecordId,
        name: impl Into<String>,
        kind: PokemonType,
        hp: u32,
        attack: u32,
        can_evolve: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            kind,
            hp,
            attack,
            can_evolve,
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ID: {}, Name: {}, Type: {}, HP: {}, Attack: {}, Can Evolve: {}",
            self.id,
            self.name,
            self.kind,
            self.hp,
            self.attack,
            if self.can_evolve { "Yes" } else { "No" }
        )
    }
}
