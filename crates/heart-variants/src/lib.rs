pub mod atomic;
pub mod color;
pub mod easer;
pub mod menu;
pub mod range;
pub mod registry;
pub mod toggle;
pub mod variant;

pub use color::ColorVariant;
pub use easer::EaserVariant;
pub use menu::{Button, MenuHost, MenuItem, NumberEntry, OnOff, Slider, TextEntry, TextMenu};
pub use range::{FloatVariant, IntVariant, RangeVariant};
pub use registry::Variants;
pub use toggle::BoolVariant;
pub use variant::{SettingValue, Variant, VariantSettings, VariantValue};
