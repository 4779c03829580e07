use models::{Entity, EntityId};

/// How a store numbers newly created records.
///
/// `Monotonic` keeps a counter seeded from the highest fixture id, so ids
/// freed by deletes are never handed out again. `MaxPlusOne` recomputes
/// `max(existing) + 1` on every insert (or `1` for an empty collection), which
/// reuses the id of a deleted tail record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IdPolicy {
    #[default]
    Monotonic,
    MaxPlusOne,
}

impl IdPolicy {
    /// Initial counter value for a seeded collection.
    pub fn seed_counter<T: Entity>(items: &[T]) -> EntityId {
        max_plus_one(items)
    }

    /// Id for the next insert, without consuming it.
    pub fn peek<T: Entity>(self, items: &[T], counter: EntityId) -> EntityId {
        match self {
            IdPolicy::Monotonic => counter,
            IdPolicy::MaxPlusOne => max_plus_one(items),
        }
    }
}

fn max_plus_one<T: Entity>(items: &[T]) -> EntityId {
    items.iter().map(Entity::id).max().map_or(1, |max| max + 1)
}
