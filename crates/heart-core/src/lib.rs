pub mod audio;
pub mod calc;
pub mod color;
pub mod curve;
pub mod ease;
pub mod frame;

pub use audio::{AudioSink, ChannelAudio, NullAudio};
pub use color::Color;
pub use curve::SimpleCurve;
pub use ease::{EaseCatalog, Easer, EaserInfo};
pub use frame::FrameTime;
pub use glam::Vec2;
