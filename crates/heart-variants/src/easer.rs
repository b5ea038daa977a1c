use heart_core::{EaseCatalog, Easer};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::menu::{Slider, TextMenu};
use crate::variant::{SettingValue, Variant, VariantValue};

/// An easing function picked from a catalog by index.
pub struct EaserVariant {
    label: String,
    catalog: Arc<EaseCatalog>,
    value: AtomicU8,
    default: Easer,
    slider: Mutex<Weak<Slider>>,
}

impl EaserVariant {
    pub fn new(label: impl Into<String>, default: Easer) -> Self {
        Self::with_catalog(label, default, EaseCatalog::standard())
    }

    pub fn with_catalog(label: impl Into<String>, default: Easer, catalog: Arc<EaseCatalog>) -> Self {
        Self {
            label: label.into(),
            catalog,
            value: AtomicU8::new(default as u8),
            default,
            slider: Mutex::new(Weak::new()),
        }
    }

    pub fn value(&self) -> Easer {
        Easer::from_u8(self.value.load(Ordering::Relaxed))
    }

    pub fn default_value(&self) -> Easer {
        self.default
    }

    pub fn catalog(&self) -> &EaseCatalog {
        &self.catalog
    }

    pub fn set_value(&self, easer: Easer) {
        self.value.store(easer as u8, Ordering::Relaxed);
        let slider = self.slider.lock().ok().and_then(|w| w.upgrade());
        if let Some(slider) = slider {
            slider.set_index(self.index_of(easer));
        }
    }

    /// Catalog index of the default easer, first match wins.
    pub fn default_index(&self) -> usize {
        self.index_of(self.default)
    }

    fn index_of(&self, easer: Easer) -> usize {
        self.catalog.index_of(easer).unwrap_or_else(|| {
            log::warn!("{}: {} is not in the ease catalog", self.label, easer.name());
            0
        })
    }
}

impl Variant for EaserVariant {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample(&self) -> VariantValue {
        VariantValue::Easer(self.value())
    }

    fn reset_to_default(&self) {
        self.set_value(self.default);
    }

    fn add_to_menu(self: Arc<Self>, menu: &mut TextMenu) {
        let names = self.catalog.entries().iter().map(|e| e.name.to_string()).collect();
        let this = self.clone();
        let slider = menu.add_slider(
            Slider::new(self.label.clone(), names, self.default_index()).change(move |index| {
                if let Some(info) = this.catalog.get(index) {
                    this.value.store(info.easer as u8, Ordering::Relaxed);
                }
            }),
        );
        if let Ok(mut slot) = self.slider.lock() {
            *slot = Arc::downgrade(&slider);
        }
    }

    fn setting(&self) -> SettingValue {
        SettingValue::Easer { value: self.value() }
    }

    fn apply_setting(&self, setting: &SettingValue) -> bool {
        match *setting {
            SettingValue::Easer { value } => {
                self.set_value(value);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heart_core::EaserInfo;

    fn doubled_catalog() -> Arc<EaseCatalog> {
        Arc::new(EaseCatalog::new(vec![
            EaserInfo { easer: Easer::Linear, name: "Linear" },
            EaserInfo { easer: Easer::CubeIn, name: "CubeIn" },
            EaserInfo { easer: Easer::QuadOut, name: "QuadOut" },
            EaserInfo { easer: Easer::CubeIn, name: "Cubic" },
        ]))
    }

    #[test]
    fn test_default_index_first_occurrence() {
        let v = EaserVariant::with_catalog("Ease", Easer::CubeIn, doubled_catalog());
        assert_eq!(v.default_index(), 1);
    }

    #[test]
    fn test_missing_default_resolves_to_zero() {
        let v = EaserVariant::with_catalog("Ease", Easer::BounceOut, doubled_catalog());
        assert_eq!(v.default_index(), 0);
    }

    #[test]
    fn test_slider_select_and_reset() {
        let v = Arc::new(EaserVariant::with_catalog("Ease", Easer::CubeIn, doubled_catalog()));
        let mut menu = TextMenu::new();
        v.clone().add_to_menu(&mut menu);
        let slider = menu.find_slider("Ease").unwrap();
        assert_eq!(slider.value_name(), "CubeIn");

        slider.select(2);
        assert_eq!(v.value(), Easer::QuadOut);

        v.reset_to_default();
        assert_eq!(v.value(), Easer::CubeIn);
        assert_eq!(slider.index(), 1);
        assert_eq!(slider.previous_index(), 2);
    }
}
