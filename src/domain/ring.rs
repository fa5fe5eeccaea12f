//! Circular doubly-linked ring of owners, stored in a generational arena.
//!
//! Links are arena indices, so the cycle needs no shared ownership. A linked
//! owner always has both `next` and `prev` set; a single member points at
//! itself in both directions. Unlinked owners have no links.

use std::mem;

use generational_arena::{Arena, Index};
use tracing::{debug, instrument, trace};

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::Pokedex;

/// Handle to a ring position.
///
/// Sorting swaps payloads between positions, so after [`OwnerRing::sort_by_name`]
/// a handle may refer to a different name than before.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OwnerId(Index);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

/// An owner: a name and the pokedex tree it exclusively owns.
#[derive(Debug)]
pub struct Owner<'c> {
    name: String,
    pokedex: Pokedex<'c>,
    next: Option<Index>,
    prev: Option<Index>,
}

impl<'c> Owner<'c> {
    fn new(name: String, pokedex: Pokedex<'c>) -> Self {
        Self {
            name,
            pokedex,
            next: None,
            prev: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pokedex(&self) -> &Pokedex<'c> {
        &self.pokedex
    }

    pub fn pokedex_mut(&mut self) -> &mut Pokedex<'c> {
        &mut self.pokedex
    }

    pub fn is_linked(&self) -> bool {
        self.next.is_some()
    }

    /// Free the name, then tear down the tree.
    fn destroy(self) {
        trace!("Destroying owner {}", self.name);
        let Owner { name, mut pokedex, .. } = self;
        drop(name);
        pokedex.clear();
    }
}

/// The ring plus the handle to its first member.
#[derive(Debug, Default)]
pub struct OwnerRing<'c> {
    arena: Arena<Owner<'c>>,
    head: Option<Index>,
}

impl<'c> OwnerRing<'c> {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            head: None,
        }
    }

    /// Allocate an unlinked owner.
    pub fn create_owner(&mut self, name: impl Into<String>, pokedex: Pokedex<'c>) -> OwnerId {
        OwnerId(self.arena.insert(Owner::new(name.into(), pokedex)))
    }

    /// Allocate an owner and link it at the tail.
    pub fn add_owner(
        &mut self,
        name: impl Into<String>,
        pokedex: Pokedex<'c>,
    ) -> DomainResult<OwnerId> {
        let id = self.create_owner(name, pokedex);
        self.link(id)?;
        Ok(id)
    }

    pub fn head(&self) -> Option<OwnerId> {
        self.head.map(OwnerId)
    }

    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    pub fn get(&self, id: OwnerId) -> Option<&Owner<'c>> {
        self.arena.get(id.0)
    }

    pub fn get_mut(&mut self, id: OwnerId) -> Option<&mut Owner<'c>> {
        self.arena.get_mut(id.0)
    }

    pub fn owner(&self, id: OwnerId) -> DomainResult<&Owner<'c>> {
        self.get(id).ok_or(DomainError::UnknownOwner)
    }

    pub fn owner_mut(&mut self, id: OwnerId) -> DomainResult<&mut Owner<'c>> {
        self.get_mut(id).ok_or(DomainError::UnknownOwner)
    }

    pub fn next(&self, id: OwnerId) -> Option<OwnerId> {
        self.next_index(id.0).map(OwnerId)
    }

    pub fn prev(&self, id: OwnerId) -> Option<OwnerId> {
        self.prev_index(id.0).map(OwnerId)
    }

    fn next_index(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|owner| owner.next)
    }

    fn prev_index(&self, idx: Index) -> Option<Index> {
        self.arena.get(idx).and_then(|owner| owner.prev)
    }

    fn set_links(&mut self, idx: Index, next: Option<Index>, prev: Option<Index>) {
        if let Some(owner) = self.arena.get_mut(idx) {
            owner.next = next;
            owner.prev = prev;
        }
    }

    fn set_next(&mut self, idx: Index, next: Index) {
        if let Some(owner) = self.arena.get_mut(idx) {
            owner.next = Some(next);
        }
    }

    fn set_prev(&mut self, idx: Index, prev: Index) {
        if let Some(owner) = self.arena.get_mut(idx) {
            owner.prev = Some(prev);
        }
    }

    /// Insert `id` just before the first member, i.e. at the tail.
    ///
    /// Linking an owner that is already a member is a no-op.
    #[instrument(level = "trace", skip(self))]
    pub fn link(&mut self, id: OwnerId) -> DomainResult<()> {
        let idx = id.0;
        if self.owner(id)?.is_linked() {
            debug!("Owner already linked, ignoring");
            return Ok(());
        }
        match self.head {
            None => {
                self.set_links(idx, Some(idx), Some(idx));
                self.head = Some(idx);
            }
            Some(head) => {
                let last = self.prev_index(head).unwrap_or(head);
                self.set_links(idx, Some(head), Some(last));
                self.set_next(last, idx);
                self.set_prev(head, idx);
            }
        }
        Ok(())
    }

    /// Detach `id`, reconnecting its neighbours and advancing the head if needed.
    #[instrument(level = "trace", skip(self))]
    pub fn unlink(&mut self, id: OwnerId) -> DomainResult<()> {
        let idx = id.0;
        let owner = self.owner(id)?;
        let (Some(next), Some(prev)) = (owner.next, owner.prev) else {
            return Ok(());
        };

        if next == idx {
            self.head = None;
        } else {
            self.set_next(prev, next);
            self.set_prev(next, prev);
            if self.head == Some(idx) {
                debug!("Unlinked first owner, head advances");
                self.head = Some(next);
            }
        }
        self.set_links(idx, None, None);
        Ok(())
    }

    /// Members once around, starting from the head.
    pub fn iter(&self) -> Owners<'_, 'c> {
        Owners {
            ring: self,
            current: self.head,
        }
    }

    pub fn count(&self) -> usize {
        self.iter().count()
    }

    pub fn find_by_name(&self, name: &str) -> Option<OwnerId> {
        self.iter()
            .find(|(_, owner)| owner.name == name)
            .map(|(id, _)| id)
    }

    /// 1-based position lookup; `None` outside `1..=count`.
    pub fn find_by_position(&self, position: usize) -> Option<OwnerId> {
        if position == 0 || position > self.count() {
            return None;
        }
        self.iter().nth(position - 1).map(|(id, _)| id)
    }

    /// `steps` members starting at `start`, wrapping as often as needed.
    pub fn walk(&self, start: OwnerId, direction: Direction, steps: usize) -> Walk<'_, 'c> {
        Walk {
            ring: self,
            current: self.arena.contains(start.0).then_some(start.0),
            direction,
            remaining: steps,
        }
    }

    fn name_greater(&self, a: Index, b: Index) -> bool {
        match (self.arena.get(a), self.arena.get(b)) {
            (Some(first), Some(second)) => first.name > second.name,
            _ => false,
        }
    }

    /// Exchange name and pokedex between two positions; links stay put.
    fn swap_payload(&mut self, a: Index, b: Index) {
        if let (Some(first), Some(second)) = self.arena.get2_mut(a, b) {
            mem::swap(&mut first.name, &mut second.name);
            mem::swap(&mut first.pokedex, &mut second.pokedex);
        }
    }

    /// Bubble sort by name with payload swaps.
    ///
    /// Each pass runs from the head up to `last`, which moves one step back
    /// per pass. Only strictly greater neighbours swap, so equal names keep
    /// their relative order.
    #[instrument(level = "debug", skip(self))]
    pub fn sort_by_name(&mut self) {
        let Some(head) = self.head else {
            return;
        };
        if self.next_index(head) == Some(head) {
            return;
        }
        let Some(mut last) = self.prev_index(head) else {
            return;
        };

        loop {
            let mut swapped = false;
            let mut current = head;
            while current != last {
                let Some(next) = self.next_index(current) else {
                    break;
                };
                if self.name_greater(current, next) {
                    self.swap_payload(current, next);
                    swapped = true;
                }
                current = next;
            }
            if !swapped || last == head {
                break;
            }
            match self.prev_index(last) {
                Some(prev) => last = prev,
                None => break,
            }
        }
    }

    /// Unlink (if still linked) and destroy one owner with its tree.
    #[instrument(level = "debug", skip(self))]
    pub fn destroy_owner(&mut self, id: OwnerId) -> DomainResult<()> {
        self.unlink(id)?;
        let owner = self.arena.remove(id.0).ok_or(DomainError::UnknownOwner)?;
        owner.destroy();
        Ok(())
    }

    /// Destroy every member once around the ring and empty it.
    ///
    /// Returns the number of members destroyed.
    #[instrument(level = "debug", skip(self))]
    pub fn destroy_all(&mut self) -> usize {
        let Some(head) = self.head.take() else {
            return 0;
        };
        let mut destroyed = 0;
        let mut current = head;
        loop {
            let next = self.next_index(current);
            if let Some(owner) = self.arena.remove(current) {
                owner.destroy();
                destroyed += 1;
            }
            match next {
                Some(next) if next != head => current = next,
                _ => break,
            }
        }
        // owners created but never linked
        for (_, owner) in self.arena.drain() {
            owner.destroy();
        }
        debug!("Destroyed {} owners", destroyed);
        destroyed
    }
}

/// Iterator over ring members once around from the head.
pub struct Owners<'r, 'c> {
    ring: &'r OwnerRing<'c>,
    current: Option<Index>,
}

impl<'r, 'c> Iterator for Owners<'r, 'c> {
    type Item = (OwnerId, &'r Owner<'c>);

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.current?;
        let owner = self.ring.arena.get(idx)?;
        self.current = owner.next.filter(|next| Some(*next) != self.ring.head);
        Some((OwnerId(idx), owner))
    }
}

/// Bounded cyclic walk along `next` or `prev` links.
pub struct Walk<'r, 'c> {
    ring: &'r OwnerRing<'c>,
    current: Option<Index>,
    direction: Direction,
    remaining: usize,
}

impl Iterator for Walk<'_, '_> {
    type Item = OwnerId;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let idx = self.current?;
        self.remaining -= 1;
        self.current = match self.direction {
            Direction::Forward => self.ring.next_index(idx),
            Direction::Backward => self.ring.prev_index(idx),
        };
        Some(OwnerId(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlinked_owner_has_no_links() {
        let mut ring = OwnerRing::new();
        let id = ring.create_owner("Ash", Pokedex::new());
        assert!(!ring.get(id).unwrap().is_linked());
        assert!(ring.is_empty());
        ring.link(id).unwrap();
        assert_eq!(ring.next(id), Some(id));
        assert_eq!(ring.prev(id), Some(id));
    }

    #[test]
    fn destroying_populated_owner_leaves_neighbour_tree_intact() {
        let records: Vec<_> = (1..=5).map(crate::util::testing::record).collect();
        let mut ring = OwnerRing::new();
        let mut full = Pokedex::new();
        for record in &records[..4] {
            full.insert_record(record);
        }
        let gone = ring.add_owner("Ash", full).unwrap();
        let kept = ring.add_owner("Misty", Pokedex::with_record(&records[4])).unwrap();

        ring.destroy_owner(gone).unwrap();

        assert!(ring.get(gone).is_none());
        let misty = ring.get(kept).unwrap();
        assert_eq!(misty.name(), "Misty");
        assert_eq!(misty.pokedex().len(), 1);
        assert_eq!(ring.head(), Some(kept));
    }
}
