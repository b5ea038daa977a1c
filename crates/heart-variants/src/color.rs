use heart_core::audio::SFX_RENAME_START;
use heart_core::Color;
use std::sync::{Arc, Mutex, Weak};

use crate::atomic::AtomicCell;
use crate::menu::{Button, TextEntry, TextMenu};
use crate::variant::{SettingValue, Variant, VariantValue};

/// An RGBA color edited as an `RRGGBBAA` string.
pub struct ColorVariant {
    label: String,
    value: AtomicCell<Color>,
    default: Color,
    button: Mutex<Weak<Button>>,
}

impl ColorVariant {
    pub fn new(label: impl Into<String>, default: Color) -> Self {
        Self {
            label: label.into(),
            value: AtomicCell::new(default),
            default,
            button: Mutex::new(Weak::new()),
        }
    }

    pub fn value(&self) -> Color {
        self.value.load()
    }

    pub fn default_value(&self) -> Color {
        self.default
    }

    pub fn set_value(&self, color: Color) {
        self.value.store(color);
        self.refresh();
    }

    /// Current value as uppercase `RRGGBBAA`.
    pub fn value_string(&self) -> String {
        self.value().to_hex_string()
    }

    /// Parse player input, falling back to this variant's default when the
    /// text is too short or not hex.
    pub fn color_from_string(&self, s: &str) -> Color {
        Color::from_hex(s).unwrap_or_else(|| {
            log::warn!("{}: ignoring malformed color {s:?}, using default", self.label);
            self.default
        })
    }

    fn button_label(&self) -> String {
        format!("{}: {}", self.label, self.value_string())
    }

    fn refresh(&self) {
        let button = self.button.lock().ok().and_then(|w| w.upgrade());
        if let Some(button) = button {
            button.set_label(self.button_label());
        }
    }
}

impl Variant for ColorVariant {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample(&self) -> VariantValue {
        VariantValue::Color(self.value())
    }

    fn reset_to_default(&self) {
        self.set_value(self.default);
    }

    fn add_to_menu(self: Arc<Self>, menu: &mut TextMenu) {
        let this = self.clone();
        let button = menu.add_button(Button::new(self.button_label()).pressed(move |host| {
            host.play(SFX_RENAME_START);
            let target = this.clone();
            host.text_entry(TextEntry {
                initial: this.value_string(),
                on_commit: Box::new(move |s| target.set_value(target.color_from_string(&s))),
            });
        }));
        if let Ok(mut slot) = self.button.lock() {
            *slot = Arc::downgrade(&button);
        }
    }

    fn setting(&self) -> SettingValue {
        SettingValue::Color { value: self.value() }
    }

    fn apply_setting(&self, setting: &SettingValue) -> bool {
        match *setting {
            SettingValue::Color { value } => {
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

    #[test]
    fn test_short_string_yields_default() {
        let v = ColorVariant::new("Orb Color (Begin)", Color::rgba(10, 20, 30, 40));
        v.set_value(Color::BLACK);
        assert_eq!(v.color_from_string("FFF"), Color::rgba(10, 20, 30, 40));
        assert_eq!(v.color_from_string(""), Color::rgba(10, 20, 30, 40));
        assert_eq!(v.value(), Color::BLACK);
    }

    #[test]
    fn test_value_string_roundtrip() {
        let v = ColorVariant::new("c", Color::WHITE);
        v.set_value(Color::rgba(0xAB, 0x01, 0x7F, 0x80));
        assert_eq!(v.value_string(), "AB017F80");
        assert_eq!(v.color_from_string(&v.value_string()), v.value());
    }

    #[test]
    fn test_reset_relabels_button() {
        let v = Arc::new(ColorVariant::new("Tint", Color::WHITE));
        let mut menu = TextMenu::new();
        v.clone().add_to_menu(&mut menu);
        v.set_value(Color::BLACK);
        assert_eq!(menu.items()[0].display(), "Tint: 000000FF");
        v.reset_to_default();
        assert_eq!(menu.items()[0].display(), "Tint: FFFFFFFF");
    }
}
