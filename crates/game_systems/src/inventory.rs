//! Picking up loose resources.

use engine_ecs::{Entity, QueryDescriptor, System, SystemContext, World};
use engine_math::Transform3D;
use game_components::{Inventory, Item, Resource};
use tracing::{debug, trace};

use crate::config::InventoryConfig;
use crate::events::ItemPickedUp;

/// Moves resources lying within reach of an inventory holder into it.
///
/// A resource stays in the world if the inventory has no room for it.
#[derive(Debug)]
pub struct InventorySystem {
    config: InventoryConfig,
    holders: QueryDescriptor,
    loose: QueryDescriptor,
}

impl InventorySystem {
    #[must_use]
    pub fn new(config: InventoryConfig) -> Self {
        Self {
            config,
            holders: QueryDescriptor::new()
                .with::<Inventory>()
                .with::<Transform3D>(),
            loose: QueryDescriptor::new()
                .with::<Resource>()
                .with::<Transform3D>(),
        }
    }

    fn try_pick_up(&self, world: &mut World, holder: Entity, resource: Entity) -> bool {
        let Some(loose) = world.get_component::<Resource>(resource).copied() else {
            return false;
        };
        let stored = world
            .get_component_mut::<Inventory>(holder)
            .is_some_and(|inventory| inventory.add_item(Item::of_kind(loose.kind, loose.amount)));
        if !stored {
            trace!(%holder, %resource, "inventory full");
            return false;
        }
        world.destroy_entity(resource);
        debug!(%holder, %resource, kind = ?loose.kind, count = loose.amount, "picked up");
        world.emit(ItemPickedUp {
            holder,
            resource,
            kind: loose.kind,
            count: loose.amount,
        });
        true
    }
}

impl System for InventorySystem {
    fn name(&self) -> &'static str {
        "inventory"
    }

    fn update(&mut self, world: &mut World, _ctx: &SystemContext) {
        for holder in world.query(&self.holders) {
            let Some(origin) = world
                .get_component::<Transform3D>(holder)
                .map(|t| t.position)
            else {
                continue;
            };
            for resource in world.query(&self.loose) {
                if resource == holder {
                    continue;
                }
                let in_reach = world
                    .get_component::<Transform3D>(resource)
                    .is_some_and(|t| t.position.distance(origin) <= self.config.pickup_radius);
                if in_reach {
                    self.try_pick_up(world, holder, resource);
                }
            }
        }
    }
}
