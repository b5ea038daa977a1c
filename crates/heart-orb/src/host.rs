//! What an orb needs to know about the scene it lives in.

use glam::Vec2;
use std::collections::HashMap;

/// Opaque handle to a host entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u64);

/// A host entity as seen this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityView {
    pub center: Vec2,
    /// False once the entity has been removed from the scene.
    pub in_scene: bool,
    pub is_player: bool,
    /// Only meaningful for the player.
    pub dead: bool,
}

impl EntityView {
    pub fn alive(center: Vec2) -> Self {
        Self { center, in_scene: true, is_player: false, dead: false }
    }

    pub fn player(center: Vec2) -> Self {
        Self { center, in_scene: true, is_player: true, dead: false }
    }
}

/// Read-only scene queries, answered by the host each frame.
pub trait Scene {
    fn entity(&self, id: EntityId) -> Option<EntityView>;
    fn player(&self) -> Option<EntityView>;
}

/// A plain scene built from values, for hosts that snapshot per frame.
#[derive(Debug, Clone, Default)]
pub struct SceneSnapshot {
    pub player: Option<EntityView>,
    pub entities: HashMap<EntityId, EntityView>,
}

impl SceneSnapshot {
    pub fn with_player(center: Vec2) -> Self {
        Self { player: Some(EntityView::player(center)), entities: HashMap::new() }
    }
}

impl Scene for SceneSnapshot {
    fn entity(&self, id: EntityId) -> Option<EntityView> {
        self.entities.get(&id).copied()
    }

    fn player(&self) -> Option<EntityView> {
        self.player
    }
}

/// The host's default orb construction record: where it spawns and what
/// it flies into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbSeed {
    pub position: Vec2,
    pub absorb_into: Option<EntityId>,
    pub absorb_target: Option<Vec2>,
}

impl OrbSeed {
    /// Host type name of the stock orb this seed is read from. The
    /// replacement reports [`crate::AbsorbOrb::TYPE_NAME`].
    pub const TYPE_NAME: &'static str = "AbsorbOrb";

    pub fn new(position: Vec2, absorb_into: Option<EntityId>, absorb_target: Option<Vec2>) -> Self {
        Self { position, absorb_into, absorb_target }
    }

    /// Where the orb should head this frame, and whether that target is gone.
    ///
    /// An explicit entity wins, then a fixed point (which never dies), then
    /// the scene's player.
    pub fn resolve_target(&self, scene: &dyn Scene) -> Target {
        if let Some(id) = self.absorb_into {
            return match scene.entity(id) {
                Some(e) => Target { position: e.center, dead: !e.in_scene || (e.is_player && e.dead) },
                None => Target::GONE,
            };
        }
        if let Some(point) = self.absorb_target {
            return Target { position: point, dead: false };
        }
        match scene.player() {
            Some(p) => Target { position: p.center, dead: !p.in_scene || p.dead },
            None => Target::GONE,
        }
    }
}

/// A resolved absorb destination.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Target {
    pub position: Vec2,
    pub dead: bool,
}

impl Target {
    const GONE: Target = Target { position: Vec2::ZERO, dead: true };
}
