//! Domain layer: records, trees and the owner ring
//!
//! This layer is independent of external concerns (no terminal I/O, no CLI, no config loading).

pub mod battle;
pub mod catalog;
pub mod collect;
pub mod error;
pub mod record;
pub mod render;
pub mod ring;
pub mod tree;

pub use battle::{fight, strength, FightReport, FightResult};
pub use catalog::{Catalog, DEFAULT_STARTERS};
pub use collect::{alphabetical, collect_all, compare_by_name, sort_by_name, NodeBuffer};
pub use error::{DomainError, DomainResult};
pub use record::{PokemonType, Record, RecordId};
pub use render::TreeRender;
pub use ring::{Direction, Owner, OwnerId, OwnerRing};
pub use tree::{destroy_subtree, InsertOutcome, Pokedex, Traversal, TreeNode};
