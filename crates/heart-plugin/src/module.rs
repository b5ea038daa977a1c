use heart_hook::{HookError, ILCursor, ILHook, MethodSlot, MoveType, Pattern, Value};
use heart_orb::OrbSeed;
use heart_variants::{TextMenu, Variants};
use std::sync::Arc;

use crate::callbacks::{orb_count, transform_value};
use crate::menu::create_menu_section;

/// Name of the host routine this module patches.
pub const COLLECT_ROUTINE: &str = "HeartGem::CollectRoutine";

/// Loop bound the stock routine uses for its orb count.
const STOCK_ORB_COUNT: i32 = 10;

/// The loadable module: owns the variant registry and the collect-routine
/// hook.
pub struct HeartVariantsModule {
    variants: Arc<Variants>,
    hook: Option<ILHook>,
}

impl HeartVariantsModule {
    pub fn new() -> Self {
        Self::with_variants(Arc::new(Variants::new()))
    }

    pub fn with_variants(variants: Arc<Variants>) -> Self {
        Self { variants, hook: None }
    }

    pub fn variants(&self) -> &Arc<Variants> {
        &self.variants
    }

    pub fn is_loaded(&self) -> bool {
        self.hook.as_ref().is_some_and(ILHook::is_applied)
    }

    /// Patch the collect routine. Fails without touching it if either patch
    /// point is missing.
    pub fn load(&mut self, collect_routine: &Arc<MethodSlot>) -> Result<(), HookError> {
        if self.is_loaded() {
            return Err(HookError::AlreadyHooked { method: collect_routine.name().to_string() });
        }
        let variants = self.variants.clone();
        let hook = ILHook::new(collect_routine, "HeartVariants", move |cursor| {
            patch_collect_routine(cursor, variants)
        })?;
        self.hook = Some(hook);
        Ok(())
    }

    /// Restore the stock routine. Safe to call when not loaded.
    pub fn unload(&mut self) {
        match self.hook.take() {
            Some(mut hook) => hook.dispose(),
            None => log::debug!("HeartVariants: unload without a hook in place"),
        }
    }

    pub fn create_menu_section(&self, menu: &mut TextMenu) {
        create_menu_section(&self.variants, menu);
    }
}

impl Default for HeartVariantsModule {
    fn default() -> Self {
        Self::new()
    }
}

fn patch_collect_routine(cursor: &mut ILCursor<'_>, variants: Arc<Variants>) -> Result<(), HookError> {
    let transform_with = variants.clone();
    cursor.goto_next(MoveType::After, &Pattern::new_obj(OrbSeed::TYPE_NAME))?;
    cursor.emit_delegate_map("ModifyAbsorbOrb", move |orb| transform_value(&transform_with, orb));

    cursor.goto_next(MoveType::Before, &Pattern::ldc_i4(STOCK_ORB_COUNT))?;
    cursor.remove()?;
    cursor.emit_delegate_push("GetOrbCount", move || Value::Int(orb_count(&variants)));
    Ok(())
}
