//! The two values the patched collect routine asks for.

use heart_hook::{ExecError, Object, Value};
use heart_orb::{AbsorbOrb, OrbOverrides, OrbSeed};
use heart_variants::Variants;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

/// Swap the host's default orb for a configurable one with the same spawn
/// point and target, stamped with the current variant settings.
pub fn transform_orb(variants: &Arc<Variants>, seed: OrbSeed, mut rng: StdRng) -> AbsorbOrb {
    let overrides = OrbOverrides::sample(variants, &mut rng);
    AbsorbOrb::with_rng(seed, variants.clone(), rng).with_overrides(overrides)
}

/// [`transform_orb`] over stack values.
pub fn transform_value(variants: &Arc<Variants>, value: Value) -> Result<Value, ExecError> {
    let found = value.kind();
    let Some(object) = value.into_object() else {
        return Err(ExecError::host(
            "ModifyAbsorbOrb",
            format!("expected {}, found {found}", OrbSeed::TYPE_NAME),
        ));
    };
    match object.downcast::<OrbSeed>() {
        Ok(seed) => {
            let orb = transform_orb(variants, seed, StdRng::from_entropy());
            Ok(Value::Object(Object::new(AbsorbOrb::TYPE_NAME, orb)))
        }
        Err(other) => Err(ExecError::host(
            "ModifyAbsorbOrb",
            format!("expected {}, found {}", OrbSeed::TYPE_NAME, other.type_name()),
        )),
    }
}

/// How many orbs the routine spawns.
pub fn orb_count(variants: &Variants) -> i32 {
    variants.orb_count.value()
}
