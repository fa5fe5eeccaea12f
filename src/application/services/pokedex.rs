//! Pokedex service: owner and collection use cases on top of the ring.

use termtree::Tree;
use tracing::{debug, info, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{
    alphabetical, fight, Catalog, Direction, DomainError, FightReport, InsertOutcome, Owner,
    OwnerId, OwnerRing, Pokedex, Record, RecordId, Traversal, TreeRender,
};

/// How a pokedex listing is ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayOrder {
    Traversal(Traversal),
    Alphabetical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    AlreadyPresent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvolveOutcome<'c> {
    /// Old record replaced by its evolution
    Evolved { from: &'c Record, to: &'c Record },
    /// Evolution already owned, so the old record was only released
    Released { from: &'c Record, to: &'c Record },
    CannotEvolve(&'c Record),
}

/// Session state: the owner ring plus the catalog every tree borrows from.
#[derive(Debug)]
pub struct PokedexService<'c> {
    catalog: &'c Catalog,
    ring: OwnerRing<'c>,
}

impl<'c> PokedexService<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            catalog,
            ring: OwnerRing::new(),
        }
    }

    pub fn catalog(&self) -> &'c Catalog {
        self.catalog
    }

    pub fn ring(&self) -> &OwnerRing<'c> {
        &self.ring
    }

    /// Create an owner holding the chosen starter and link it at the tail.
    #[instrument(level = "debug", skip(self))]
    pub fn open_pokedex(&mut self, name: &str, starter_choice: usize) -> ApplicationResult<OwnerId> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApplicationError::InvalidOwnerName);
        }
        if self.ring.find_by_name(name).is_some() {
            return Err(ApplicationError::DuplicateOwner(name.to_string()));
        }
        let catalog = self.catalog;
        let starter = catalog
            .starter(starter_choice)
            .ok_or(ApplicationError::InvalidStarter(starter_choice))?;

        let id = self.ring.add_owner(name, Pokedex::with_record(starter))?;
        info!("New pokedex for {} with starter {}", name, starter.name);
        Ok(id)
    }

    pub fn owner(&self, owner: OwnerId) -> ApplicationResult<&Owner<'c>> {
        Ok(self.ring.owner(owner)?)
    }

    pub fn owner_count(&self) -> usize {
        self.ring.count()
    }

    pub fn owner_names(&self) -> Vec<&str> {
        self.ring.iter().map(|(_, owner)| owner.name()).collect()
    }

    pub fn owner_at(&self, position: usize) -> ApplicationResult<OwnerId> {
        self.ring
            .find_by_position(position)
            .ok_or(ApplicationError::InvalidPosition(position))
    }

    pub fn find_owner(&self, name: &str) -> ApplicationResult<OwnerId> {
        self.ring
            .find_by_name(name)
            .ok_or_else(|| ApplicationError::OwnerNotFound(name.to_string()))
    }

    fn pokedex_mut(&mut self, owner: OwnerId) -> ApplicationResult<&mut Pokedex<'c>> {
        Ok(self.ring.owner_mut(owner)?.pokedex_mut())
    }

    fn owned_record(&self, owner: OwnerId, id: RecordId) -> ApplicationResult<&'c Record> {
        self.ring
            .owner(owner)?
            .pokedex()
            .search(id)
            .map(|node| node.record())
            .ok_or(ApplicationError::RecordNotOwned(id))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_pokemon(&mut self, owner: OwnerId, id: RecordId) -> ApplicationResult<AddOutcome> {
        let catalog = self.catalog;
        let record = catalog.get(id).ok_or(DomainError::UnknownRecord(id))?;
        let pokedex = self.pokedex_mut(owner)?;
        if pokedex.contains(id) {
            debug!("Pokemon {} already present", id);
            return Ok(AddOutcome::AlreadyPresent);
        }
        match pokedex.insert_record(record) {
            InsertOutcome::Inserted => Ok(AddOutcome::Added),
            InsertOutcome::Duplicate(_) => Ok(AddOutcome::AlreadyPresent),
        }
    }

    #[instrument(level = "debug", skip(self))]
    pub fn release_pokemon(&mut self, owner: OwnerId, id: RecordId) -> ApplicationResult<bool> {
        Ok(self.pokedex_mut(owner)?.remove(id))
    }

    #[instrument(level = "debug", skip(self))]
    pub fn fight(
        &self,
        owner: OwnerId,
        first: RecordId,
        second: RecordId,
    ) -> ApplicationResult<FightReport<'c>> {
        let first = self.owned_record(owner, first)?;
        let second = self.owned_record(owner, second)?;
        Ok(fight(first, second))
    }

    /// Replace `id` with the catalog record that follows it, if it can evolve.
    #[instrument(level = "debug", skip(self))]
    pub fn evolve(&mut self, owner: OwnerId, id: RecordId) -> ApplicationResult<EvolveOutcome<'c>> {
        let from = self.owned_record(owner, id)?;
        let catalog = self.catalog;
        let Some(to) = catalog.evolution_of(from) else {
            return Ok(EvolveOutcome::CannotEvolve(from));
        };

        let pokedex = self.pokedex_mut(owner)?;
        let already_owned = pokedex.contains(to.id);
        pokedex.remove(id);
        if already_owned {
            info!("{} already owned, released {}", to.name, from.name);
            return Ok(EvolveOutcome::Released { from, to });
        }
        pokedex.insert_record(to);
        info!("{} evolved into {}", from.name, to.name);
        Ok(EvolveOutcome::Evolved { from, to })
    }

    /// Unlink the owner and destroy it together with its tree.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_pokedex(&mut self, owner: OwnerId) -> ApplicationResult<String> {
        let name = self.ring.owner(owner)?.name().to_string();
        self.ring.destroy_owner(owner)?;
        info!("Deleted pokedex of {}", name);
        Ok(name)
    }

    /// Move every record of `second` into `first` (level order), then drop `second`.
    ///
    /// New nodes are allocated in `first`; nothing is shared between the trees.
    /// Returns the number of records that were not already in `first`.
    #[instrument(level = "debug", skip(self))]
    pub fn merge(&mut self, first: OwnerId, second: OwnerId) -> ApplicationResult<usize> {
        if first == second {
            return Err(ApplicationError::SameOwner);
        }
        self.ring.owner(first)?;
        let mut records: Vec<&'c Record> = Vec::new();
        self.ring
            .owner(second)?
            .pokedex()
            .traverse(Traversal::Bfs, |node| records.push(node.record()));

        let target = self.pokedex_mut(first)?;
        let mut added = 0;
        for record in records {
            if target.insert_record(record).is_inserted() {
                added += 1;
            }
        }
        self.ring.destroy_owner(second)?;
        info!("Merged {} new records", added);
        Ok(added)
    }

    pub fn sort_owners(&mut self) {
        self.ring.sort_by_name();
    }

    /// Names met on a `count`-step walk from the first owner, numbered from 1.
    ///
    /// Lazy: nothing is buffered, so `count` may be arbitrarily large.
    pub fn walk_owners<'s>(
        &'s self,
        direction: Direction,
        count: usize,
    ) -> impl Iterator<Item = (usize, &'s str)> + 's {
        // shorten the catalog lifetime so the iterator only borrows `self`
        let ring: &'s OwnerRing<'s> = &self.ring;
        ring.head()
            .into_iter()
            .flat_map(move |head| ring.walk(head, direction, count))
            .filter_map(move |id| ring.get(id))
            .enumerate()
            .map(|(step, owner)| (step + 1, owner.name()))
    }

    /// Records of one pokedex in the requested order.
    pub fn display(&self, owner: OwnerId, order: DisplayOrder) -> ApplicationResult<Vec<&'c Record>> {
        let pokedex = self.ring.owner(owner)?.pokedex();
        let records = match order {
            DisplayOrder::Traversal(traversal) => {
                let mut records = Vec::new();
                pokedex.traverse(traversal, |node| records.push(node.record()));
                records
            }
            DisplayOrder::Alphabetical => alphabetical(pokedex.root())
                .into_iter()
                .map(|node| node.record())
                .collect(),
        };
        Ok(records)
    }

    pub fn render_tree(&self, owner: OwnerId) -> ApplicationResult<Tree<String>> {
        Ok(self.ring.owner(owner)?.pokedex().to_tree_string())
    }

    /// Destroy every owner; the service stays usable with an empty ring.
    pub fn shutdown(&mut self) -> usize {
        self.ring.destroy_all()
    }
}
