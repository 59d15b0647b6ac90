//! Exclusive claims on furniture and on other humans.
//!
//! A state that needs a resource claims it when it starts and releases it
//! when it finishes or aborts.  A resource is *free* when nobody holds a
//! claim on it and, for objects, no human stands on its cell.
//!
//! Claims are tokens: [`ClaimHandle`] is neither `Clone` nor `Copy`, so a
//! claim can be released exactly once, by whoever owns the handle.

use rustc_hash::FxHashMap;

use dw_core::{AgentId, AgentRng, Cell, ObjectId};

use crate::object::ObjectKind;
use crate::world::GridWorld;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum ResourceRef {
    Object(ObjectId),
    Agent(AgentId),
}

/// Proof of an exclusive claim.  Give it back with
/// [`ResourceRepository::release`].
#[must_use = "a dropped claim handle leaks the claim"]
#[derive(Debug, PartialEq, Eq)]
pub struct ClaimHandle {
    resource: ResourceRef,
    holder:   AgentId,
}

impl ClaimHandle {
    pub fn resource(&self) -> ResourceRef {
        self.resource
    }

    pub fn holder(&self) -> AgentId {
        self.holder
    }
}

#[derive(Default, Debug)]
pub struct ResourceRepository {
    claims: FxHashMap<ResourceRef, AgentId>,
}

impl ResourceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    // ── Claims ────────────────────────────────────────────────────────────

    /// Claim `resource` for `holder`; `None` if someone already holds it.
    pub fn try_claim(&mut self, resource: ResourceRef, holder: AgentId) -> Option<ClaimHandle> {
        if self.claims.contains_key(&resource) {
            return None;
        }
        self.claims.insert(resource, holder);
        Some(ClaimHandle { resource, holder })
    }

    pub fn release(&mut self, handle: ClaimHandle) {
        if self.claims.get(&handle.resource) == Some(&handle.holder) {
            self.claims.remove(&handle.resource);
        }
    }

    pub fn holder(&self, resource: ResourceRef) -> Option<AgentId> {
        self.claims.get(&resource).copied()
    }

    #[inline]
    pub fn is_claimed(&self, resource: ResourceRef) -> bool {
        self.claims.contains_key(&resource)
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    // ── Availability ──────────────────────────────────────────────────────

    /// `true` if any human in `agent_cells` stands on the object's cell.
    pub fn is_object_used(world: &GridWorld, object: ObjectId, agent_cells: &[Cell]) -> bool {
        world
            .object(object)
            .map(|o| agent_cells.contains(&o.cell))
            .unwrap_or(false)
    }

    /// Unclaimed and, for objects, not co-located with a human.
    pub fn is_free(&self, world: &GridWorld, resource: ResourceRef, agent_cells: &[Cell]) -> bool {
        if self.is_claimed(resource) {
            return false;
        }
        match resource {
            ResourceRef::Object(id) => !Self::is_object_used(world, id, agent_cells),
            ResourceRef::Agent(_) => true,
        }
    }

    /// Every free object of `kind`, in placement order.
    pub fn free_objects(&self, world: &GridWorld, kind: ObjectKind, agent_cells: &[Cell]) -> Vec<ObjectId> {
        world
            .objects_of(kind)
            .filter(|o| !self.is_claimed(ResourceRef::Object(o.id)) && !agent_cells.contains(&o.cell))
            .map(|o| o.id)
            .collect()
    }

    pub fn has_free(&self, world: &GridWorld, kind: ObjectKind, agent_cells: &[Cell]) -> bool {
        world
            .objects_of(kind)
            .any(|o| !self.is_claimed(ResourceRef::Object(o.id)) && !agent_cells.contains(&o.cell))
    }

    pub fn random_free(
        &self,
        world: &GridWorld,
        kind: ObjectKind,
        agent_cells: &[Cell],
        rng: &mut AgentRng,
    ) -> Option<ObjectId> {
        rng.choose(&self.free_objects(world, kind, agent_cells)).copied()
    }
}
