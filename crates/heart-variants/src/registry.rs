use heart_core::{Color, EaseCatalog, Easer};
use std::f32::consts::TAU;
use std::sync::Arc;

use crate::color::ColorVariant;
use crate::easer::EaserVariant;
use crate::menu::TextMenu;
use crate::range::{FloatVariant, IntVariant};
use crate::toggle::BoolVariant;
use crate::variant::{Variant, VariantSettings, VariantValue};

pub const ORB_COUNT: &str = "Orb Count";
pub const ORB_COLOR_BEGIN: &str = "Orb Color (Begin)";
pub const ORB_COLOR_END: &str = "Orb Color (End)";
pub const CONSUME_DELAY: &str = "Consume Delay";
pub const BURST_SPEED: &str = "Burst Speed";
pub const BURST_DIRECTION: &str = "Burst Direction";
pub const BURST_DIRECTION_LENGTH: &str = "Burst Direction Length";
pub const BURST_X_OFFSET: &str = "Burst X Offset";
pub const BURST_Y_OFFSET: &str = "Burst Y Offset";
pub const CONSUME_DURATION: &str = "Consume Duration";
pub const ABSORB_EASE: &str = "Custom Absorb Ease";
pub const NON_CURVED_ABSORB: &str = "Non-Curved Absorb";
pub const CURVE_MIDPOINT_MULTIPLIER: &str = "Absorb Curve Midpoint Multiplier";

/// Every heart-collection tunable, in menu order.
///
/// Typed fields are for the orb and the hook; `list()` is for anything that
/// walks all of them (the menu, reset-all, settings persistence).
pub struct Variants {
    pub orb_count: Arc<IntVariant>,
    pub orb_color_begin: Arc<ColorVariant>,
    pub orb_color_end: Arc<ColorVariant>,
    pub consume_delay: Arc<FloatVariant>,
    pub burst_speed: Arc<FloatVariant>,
    pub burst_direction: Arc<FloatVariant>,
    pub burst_direction_length: Arc<FloatVariant>,
    pub burst_x_offset: Arc<FloatVariant>,
    pub burst_y_offset: Arc<FloatVariant>,
    pub consume_duration: Arc<FloatVariant>,
    pub absorb_ease: Arc<EaserVariant>,
    pub non_curved_absorb: Arc<BoolVariant>,
    pub curve_midpoint_multiplier: Arc<FloatVariant>,
    entries: Vec<Arc<dyn Variant>>,
}

impl Variants {
    pub fn new() -> Self {
        Self::with_catalog(EaseCatalog::standard())
    }

    /// Build the registry with a custom easing catalog for the ease slider.
    pub fn with_catalog(catalog: Arc<EaseCatalog>) -> Self {
        let orb_count = Arc::new(IntVariant::new(ORB_COUNT, 10, 0));
        let orb_color_begin = Arc::new(ColorVariant::new(ORB_COLOR_BEGIN, Color::WHITE));
        let orb_color_end = Arc::new(ColorVariant::new(ORB_COLOR_END, Color::WHITE));
        let consume_delay = Arc::new(FloatVariant::new(CONSUME_DELAY, 0.7, 0.3));
        let burst_speed = Arc::new(FloatVariant::new(BURST_SPEED, 80.0, 40.0));
        let burst_direction = Arc::new(FloatVariant::new(BURST_DIRECTION, 0.0, TAU));
        let burst_direction_length = Arc::new(FloatVariant::new(BURST_DIRECTION_LENGTH, 1.0, 0.0));
        let burst_x_offset = Arc::new(FloatVariant::new(BURST_X_OFFSET, 0.0, 0.0));
        let burst_y_offset = Arc::new(FloatVariant::new(BURST_Y_OFFSET, 0.0, 0.0));
        let consume_duration = Arc::new(FloatVariant::new(CONSUME_DURATION, 0.3, 0.25));
        let absorb_ease = Arc::new(EaserVariant::with_catalog(ABSORB_EASE, Easer::CubeIn, catalog));
        let non_curved_absorb = Arc::new(BoolVariant::new(NON_CURVED_ABSORB, false));
        let curve_midpoint_multiplier = Arc::new(FloatVariant::new(CURVE_MIDPOINT_MULTIPLIER, 1.0, 0.0));

        let entries: Vec<Arc<dyn Variant>> = vec![
            orb_count.clone(),
            orb_color_begin.clone(),
            orb_color_end.clone(),
            consume_delay.clone(),
            burst_speed.clone(),
            burst_direction.clone(),
            burst_direction_length.clone(),
            burst_x_offset.clone(),
            burst_y_offset.clone(),
            consume_duration.clone(),
            absorb_ease.clone(),
            non_curved_absorb.clone(),
            curve_midpoint_multiplier.clone(),
        ];

        Self {
            orb_count,
            orb_color_begin,
            orb_color_end,
            consume_delay,
            burst_speed,
            burst_direction,
            burst_direction_length,
            burst_x_offset,
            burst_y_offset,
            consume_duration,
            absorb_ease,
            non_curved_absorb,
            curve_midpoint_multiplier,
            entries,
        }
    }

    /// All variants in declaration order.
    pub fn list(&self) -> &[Arc<dyn Variant>] {
        &self.entries
    }

    /// Look up a variant by label.
    ///
    /// # Panics
    /// If no variant has that label. Labels are fixed at build time.
    pub fn variant(&self, label: &str) -> &Arc<dyn Variant> {
        self.entries
            .iter()
            .find(|v| v.label() == label)
            .unwrap_or_else(|| panic!("unknown heart variant {label:?}"))
    }

    /// Read a variant's current value. Ranged kinds are sampled.
    pub fn get(&self, label: &str) -> VariantValue {
        self.variant(label).sample()
    }

    pub fn reset(&self, label: &str) {
        self.variant(label).reset_to_default();
    }

    pub fn reset_all(&self) {
        for v in &self.entries {
            v.reset_to_default();
        }
    }

    /// Append every variant's widgets in order.
    pub fn add_all_to_menu(&self, menu: &mut TextMenu) {
        for v in &self.entries {
            v.clone().add_to_menu(menu);
        }
    }

    /// Snapshot of every editable value, keyed by label.
    pub fn settings(&self) -> VariantSettings {
        VariantSettings {
            entries: self
                .entries
                .iter()
                .map(|v| (v.label().to_string(), v.setting()))
                .collect(),
        }
    }

    /// Apply a saved snapshot. Unknown labels and kind mismatches are
    /// skipped; returns how many entries were applied.
    pub fn apply_settings(&self, settings: &VariantSettings) -> usize {
        let mut applied = 0;
        for (label, setting) in &settings.entries {
            match self.entries.iter().find(|v| v.label() == label) {
                Some(v) if v.apply_setting(setting) => applied += 1,
                Some(_) => log::warn!("setting for {label:?} has the wrong kind, skipped"),
                None => log::warn!("no heart variant named {label:?}, skipped"),
            }
        }
        applied
    }
}

impl Default for Variants {
    fn default() -> Self {
        Self::new()
    }
}
