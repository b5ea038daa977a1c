/// Elapsed time for one update tick.
///
/// `delta` is logical game time (slowed or stopped by pause and slow-motion
/// effects); `raw_delta` is real time and keeps advancing through them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    pub delta: f32,
    pub raw_delta: f32,
}

impl FrameTime {
    pub fn new(delta: f32, raw_delta: f32) -> Self {
        Self { delta, raw_delta }
    }

    /// A tick where game time runs at real time.
    pub fn uniform(dt: f32) -> Self {
        Self { delta: dt, raw_delta: dt }
    }

    /// A tick where game time is frozen but real time advances.
    pub fn frozen(raw_delta: f32) -> Self {
        Self { delta: 0.0, raw_delta }
    }
}

impl Default for FrameTime {
    fn default() -> Self {
        Self::uniform(1.0 / 60.0)
    }
}
