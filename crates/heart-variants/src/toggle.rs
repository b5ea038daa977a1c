use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::menu::{OnOff, TextMenu};
use crate::variant::{SettingValue, Variant, VariantValue};

/// An on/off switch.
pub struct BoolVariant {
    label: String,
    value: AtomicBool,
    default: bool,
    toggle: Mutex<Weak<OnOff>>,
}

impl BoolVariant {
    pub fn new(label: impl Into<String>, default: bool) -> Self {
        Self {
            label: label.into(),
            value: AtomicBool::new(default),
            default,
            toggle: Mutex::new(Weak::new()),
        }
    }

    pub fn value(&self) -> bool {
        self.value.load(Ordering::Relaxed)
    }

    pub fn default_value(&self) -> bool {
        self.default
    }

    pub fn set_value(&self, on: bool) {
        self.value.store(on, Ordering::Relaxed);
        let toggle = self.toggle.lock().ok().and_then(|w| w.upgrade());
        if let Some(toggle) = toggle {
            toggle.set_index(on as usize);
        }
    }
}

impl Variant for BoolVariant {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample(&self) -> VariantValue {
        VariantValue::Bool(self.value())
    }

    fn reset_to_default(&self) {
        self.set_value(self.default);
    }

    fn add_to_menu(self: Arc<Self>, menu: &mut TextMenu) {
        let this = self.clone();
        // Starts from the default, not the current value.
        let toggle = menu.add_on_off(
            OnOff::new(self.label.clone(), self.default)
                .change(move |on| this.value.store(on, Ordering::Relaxed)),
        );
        if let Ok(mut slot) = self.toggle.lock() {
            *slot = Arc::downgrade(&toggle);
        }
    }

    fn setting(&self) -> SettingValue {
        SettingValue::Bool { value: self.value() }
    }

    fn apply_setting(&self, setting: &SettingValue) -> bool {
        match *setting {
            SettingValue::Bool { value } => {
                self.set_value(value);
                true
            }
            _ => false,
        }
    }
}
