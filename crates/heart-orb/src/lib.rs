pub mod host;
pub mod orb;

pub use host::{EntityId, EntityView, OrbSeed, Scene, SceneSnapshot, Target};
pub use orb::{AbsorbOrb, OrbOverrides, OrbStatus, Phase, Sprite};
