use bevy::ecs::system::SystemParam;
use bevy::prelude::*;

use crate::anim::InstanceAnimation;
use crate::data::Resource;
use crate::scene::Catalog;

/// Read-only view for host systems: which resource sits at an index and
/// how visible it is right now.
#[derive(SystemParam)]
pub struct UniverseAccess<'w> {
    catalog: Res<'w, Catalog>,
    anim: Res<'w, InstanceAnimation>,
}

impl UniverseAccess<'_> {
    pub fn resource_at(&self, index: usize) -> Option<&Resource> {
        self.catalog.resource_at(index)
    }

    pub fn opacity_at(&self, index: usize) -> f32 {
        self.anim.opacity_at(index)
    }

    pub fn visible_count(&self) -> usize {
        self.anim.visible_count()
    }

    pub fn len(&self) -> usize {
        self.catalog.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }
}
