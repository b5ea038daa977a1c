use heart_core::audio::SFX_RENAME_START;
use rand::Rng;
use std::fmt::Display;
use std::sync::{Arc, Mutex, Weak};

use crate::atomic::{AtomicCell, Bits};
use crate::menu::{Button, MenuHost, NumberEntry, TextMenu};
use crate::variant::{SettingValue, Variant, VariantValue};

/// Digits the numeric-entry dialog accepts for a base or spread.
const ENTRY_MAX_DIGITS: usize = 12;

/// A numeric kind that can be sampled as `base + U(spread)`.
pub trait Spread: Bits + Display + PartialEq + Send + Sync + 'static {
    const ALLOW_DECIMAL: bool;

    fn sample<R: Rng + ?Sized>(base: Self, spread: Self, rng: &mut R) -> Self;
    fn from_entry(v: f64) -> Self;
    fn to_entry(self) -> f64;
    fn wrap(self) -> VariantValue;
    fn setting(base: Self, rand: Self) -> SettingValue;
    fn from_setting(setting: &SettingValue) -> Option<(Self, Self)>;
}

impl Spread for i32 {
    const ALLOW_DECIMAL: bool = false;

    /// Uniform over `[base, base + spread]`, inclusive. A non-positive
    /// spread always yields `base`.
    fn sample<R: Rng + ?Sized>(base: i32, spread: i32, rng: &mut R) -> i32 {
        if spread <= 0 {
            return base;
        }
        base.wrapping_add(rng.gen_range(0..=spread))
    }

    fn from_entry(v: f64) -> i32 {
        v as i32
    }

    fn to_entry(self) -> f64 {
        self as f64
    }

    fn wrap(self) -> VariantValue {
        VariantValue::Int(self)
    }

    fn setting(base: i32, rand: i32) -> SettingValue {
        SettingValue::Int { base, rand }
    }

    fn from_setting(setting: &SettingValue) -> Option<(i32, i32)> {
        match *setting {
            SettingValue::Int { base, rand } => Some((base, rand)),
            _ => None,
        }
    }
}

impl Spread for f32 {
    const ALLOW_DECIMAL: bool = true;

    /// `base + U[0, 1) * spread`.
    fn sample<R: Rng + ?Sized>(base: f32, spread: f32, rng: &mut R) -> f32 {
        base + rng.gen::<f32>() * spread
    }

    fn from_entry(v: f64) -> f32 {
        v as f32
    }

    fn to_entry(self) -> f64 {
        self as f64
    }

    fn wrap(self) -> VariantValue {
        VariantValue::Float(self)
    }

    fn setting(base: f32, rand: f32) -> SettingValue {
        SettingValue::Float { base, rand }
    }

    fn from_setting(setting: &SettingValue) -> Option<(f32, f32)> {
        match *setting {
            SettingValue::Float { base, rand } => Some((base, rand)),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Base,
    Rand,
}

impl Field {
    fn suffix(self) -> &'static str {
        match self {
            Field::Base => "Base",
            Field::Rand => "Rand",
        }
    }
}

/// A number drawn from `[base, base + rand)` on every read.
///
/// Both `base` and `rand` are independently editable from the menu, and
/// both have their own default.
pub struct RangeVariant<T: Spread> {
    label: String,
    base: AtomicCell<T>,
    rand: AtomicCell<T>,
    base_default: T,
    rand_default: T,
    base_button: Mutex<Weak<Button>>,
    rand_button: Mutex<Weak<Button>>,
}

pub type IntVariant = RangeVariant<i32>;
pub type FloatVariant = RangeVariant<f32>;

impl<T: Spread> RangeVariant<T> {
    pub fn new(label: impl Into<String>, base: T, rand: T) -> Self {
        Self {
            label: label.into(),
            base: AtomicCell::new(base),
            rand: AtomicCell::new(rand),
            base_default: base,
            rand_default: rand,
            base_button: Mutex::new(Weak::new()),
            rand_button: Mutex::new(Weak::new()),
        }
    }

    /// Draw a value with the thread-local generator.
    pub fn value(&self) -> T {
        self.sample_with(&mut rand::thread_rng())
    }

    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> T {
        T::sample(self.base.load(), self.rand.load(), rng)
    }

    pub fn base(&self) -> T {
        self.base.load()
    }

    pub fn rand(&self) -> T {
        self.rand.load()
    }

    pub fn base_default(&self) -> T {
        self.base_default
    }

    pub fn rand_default(&self) -> T {
        self.rand_default
    }

    pub fn set_base(&self, base: T) {
        self.base.store(base);
        self.refresh(Field::Base);
    }

    pub fn set_rand(&self, rand: T) {
        self.rand.store(rand);
        self.refresh(Field::Rand);
    }

    fn get(&self, field: Field) -> T {
        match field {
            Field::Base => self.base(),
            Field::Rand => self.rand(),
        }
    }

    fn set(&self, field: Field, v: T) {
        match field {
            Field::Base => self.set_base(v),
            Field::Rand => self.set_rand(v),
        }
    }

    fn button_label(&self, field: Field) -> String {
        format!("{} ({}): {}", self.label, field.suffix(), self.get(field))
    }

    fn button_slot(&self, field: Field) -> &Mutex<Weak<Button>> {
        match field {
            Field::Base => &self.base_button,
            Field::Rand => &self.rand_button,
        }
    }

    fn refresh(&self, field: Field) {
        let button = self.button_slot(field).lock().ok().and_then(|w| w.upgrade());
        if let Some(button) = button {
            button.set_label(self.button_label(field));
        }
    }

    fn open_entry(this: &Arc<Self>, host: &dyn MenuHost, field: Field) {
        host.play(SFX_RENAME_START);
        let target = this.clone();
        host.number_entry(NumberEntry {
            initial: this.get(field).to_entry(),
            max_digits: ENTRY_MAX_DIGITS,
            allow_decimal: T::ALLOW_DECIMAL,
            allow_negative: true,
            on_commit: Box::new(move |v| target.set(field, T::from_entry(v))),
        });
    }

    fn add_button(this: &Arc<Self>, menu: &mut TextMenu, field: Field) {
        let target = this.clone();
        let button = menu.add_button(
            Button::new(this.button_label(field))
                .pressed(move |host| Self::open_entry(&target, host, field)),
        );
        if let Ok(mut slot) = this.button_slot(field).lock() {
            *slot = Arc::downgrade(&button);
        }
    }
}

impl<T: Spread> Variant for RangeVariant<T> {
    fn label(&self) -> &str {
        &self.label
    }

    fn sample(&self) -> VariantValue {
        self.value().wrap()
    }

    fn reset_to_default(&self) {
        self.set_base(self.base_default);
        self.set_rand(self.rand_default);
    }

    fn add_to_menu(self: Arc<Self>, menu: &mut TextMenu) {
        Self::add_button(&self, menu, Field::Base);
        Self::add_button(&self, menu, Field::Rand);
    }

    fn setting(&self) -> SettingValue {
        T::setting(self.base(), self.rand())
    }

    fn apply_setting(&self, setting: &SettingValue) -> bool {
        match T::from_setting(setting) {
            Some((base, rand)) => {
                self.set_base(base);
                self.set_rand(rand);
                true
            }
            None => false,
        }
    }
}
