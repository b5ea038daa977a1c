use heart_core::{Color, Easer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::menu::TextMenu;

/// One sampled variant value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VariantValue {
    Int(i32),
    Float(f32),
    Color(Color),
    Bool(bool),
    Easer(Easer),
}

impl VariantValue {
    pub fn as_int(&self) -> Option<i32> {
        match self {
            VariantValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self {
            VariantValue::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            VariantValue::Color(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            VariantValue::Bool(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_easer(&self) -> Option<Easer> {
        match self {
            VariantValue::Easer(v) => Some(*v),
            _ => None,
        }
    }
}

/// The persisted, user-editable state of one variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SettingValue {
    Int { base: i32, rand: i32 },
    Float { base: f32, rand: f32 },
    Color { value: Color },
    Bool { value: bool },
    Easer { value: Easer },
}

/// Every variant's setting keyed by label, for the host's settings file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariantSettings {
    pub entries: BTreeMap<String, SettingValue>,
}

/// A named, resettable tunable that can place itself in the options menu.
pub trait Variant: Send + Sync {
    fn label(&self) -> &str;

    /// Read the current value. Ranged kinds draw a fresh sample per call.
    fn sample(&self) -> VariantValue;

    /// Restore the default and refresh any live widget showing it.
    fn reset_to_default(&self);

    /// Append this variant's widgets to `menu`.
    fn add_to_menu(self: Arc<Self>, menu: &mut TextMenu);

    fn setting(&self) -> SettingValue;

    /// Apply a persisted setting. Returns `false` when the kind does not match.
    fn apply_setting(&self, setting: &SettingValue) -> bool;
}
