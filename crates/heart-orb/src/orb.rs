use glam::Vec2;
use heart_core::audio::SFX_ORB_ABSORBED;
use heart_core::calc::{angle, angle_between, angle_to_vector, approach, perpendicular, safe_normalize, sign, yoyo};
use heart_core::{AudioSink, Color, FrameTime, SimpleCurve};
use heart_variants::Variants;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::f32::consts::TAU;
use std::sync::Arc;

use crate::host::{EntityId, OrbSeed, Scene, Target};

const BURST_MAX_SPEED: f32 = 800.0;
const BURST_ACCEL: f32 = 200.0;
const DELAY_DECEL: f32 = 120.0;
const LENGTH_RESOLUTION: u32 = 10;
const TANGENT_STEP: f32 = 0.01;

/// Per-frame behavior, chosen fresh every update from target liveness and
/// the remaining consume delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No live target: scatter outward and fade.
    Bursting,
    /// Target alive, still waiting: drift to a stop.
    Delaying,
    /// Following the curve into the target.
    Traveling,
}

/// Result of one update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrbStatus {
    Running(Phase),
    /// Travel completed this frame. The host should remove the orb.
    Finished,
    /// Already finished on an earlier frame; nothing was updated.
    Removed,
}

/// The drawable half of an orb, read by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sprite {
    pub position: Vec2,
    /// Radians.
    pub rotation: f32,
    pub scale: Vec2,
    pub color: Color,
}

/// Values the collect-routine hook stamps onto a fresh orb.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbOverrides {
    pub consume_delay: f32,
    pub burst_speed: f32,
    pub burst_direction: Vec2,
    pub duration: f32,
}

impl OrbOverrides {
    /// Sample every override from the current variant settings.
    pub fn sample<R: Rng + ?Sized>(variants: &Variants, rng: &mut R) -> Self {
        let dir = variants.burst_direction.sample_with(rng);
        let len = variants.burst_direction_length.sample_with(rng);
        let offset = Vec2::new(
            variants.burst_x_offset.sample_with(rng),
            variants.burst_y_offset.sample_with(rng),
        );
        Self {
            consume_delay: variants.consume_delay.sample_with(rng),
            burst_speed: variants.burst_speed.sample_with(rng),
            burst_direction: angle_to_vector(dir, len) + offset,
            duration: variants.consume_duration.sample_with(rng),
        }
    }
}

/// Squash and stretch tied to a speed.
fn squash(speed: f32) -> Vec2 {
    Vec2::new((0.5 + speed * 0.02).min(2.0), (0.5 - speed * 0.004).max(0.05))
}

/// A heart-collection orb that bursts out, waits, then curves into its target.
pub struct AbsorbOrb {
    pub position: Vec2,
    pub absorb_into: Option<EntityId>,
    pub absorb_target: Option<Vec2>,
    pub sprite: Sprite,

    // Burst
    burst_direction: Vec2,
    burst_speed: f32,
    alpha: f32,
    consume_delay: f32,

    // Travel
    curve: Option<SimpleCurve>,
    percent: f32,
    duration: f32,
    /// Sprite scale when travel began. Nothing here reads it; host
    /// renderers blend from it.
    burst_scale: Vec2,
    override_duration: Option<f32>,

    removed: bool,
    variants: Arc<Variants>,
    rng: StdRng,
}

impl AbsorbOrb {
    /// Host type name of the replacement orb. The stock orb it stands in for
    /// reports [`OrbSeed::TYPE_NAME`].
    pub const TYPE_NAME: &'static str = "CustomAbsorbOrb";

    pub fn new(seed: OrbSeed, variants: Arc<Variants>) -> Self {
        Self::with_rng(seed, variants, StdRng::from_entropy())
    }

    /// Build an orb with the host's stock timings, drawing randomness from `rng`.
    pub fn with_rng(seed: OrbSeed, variants: Arc<Variants>, mut rng: StdRng) -> Self {
        let burst_speed = 80.0 + rng.gen::<f32>() * 40.0;
        let burst_direction = angle_to_vector(rng.gen::<f32>() * TAU, 1.0);
        let consume_delay = 0.7 + rng.gen::<f32>() * 0.3;
        let sprite = Sprite {
            position: seed.position,
            rotation: angle(burst_direction),
            scale: squash(burst_speed),
            color: variants.orb_color_begin.value(),
        };
        Self {
            position: seed.position,
            absorb_into: seed.absorb_into,
            absorb_target: seed.absorb_target,
            sprite,
            burst_direction,
            burst_speed,
            alpha: 1.0,
            consume_delay,
            curve: None,
            percent: 0.0,
            duration: 0.0,
            burst_scale: Vec2::ONE,
            override_duration: None,
            removed: false,
            variants,
            rng,
        }
    }

    /// Replace the stock timings. The travel duration becomes fixed instead
    /// of being drawn when travel starts.
    pub fn with_overrides(mut self, overrides: OrbOverrides) -> Self {
        self.consume_delay = overrides.consume_delay;
        self.burst_speed = overrides.burst_speed;
        self.burst_direction = overrides.burst_direction;
        self.override_duration = Some(overrides.duration);
        self
    }

    pub fn seed(&self) -> OrbSeed {
        OrbSeed::new(self.position, self.absorb_into, self.absorb_target)
    }

    pub fn burst_direction(&self) -> Vec2 {
        self.burst_direction
    }

    pub fn burst_speed(&self) -> f32 {
        self.burst_speed
    }

    pub fn consume_delay(&self) -> f32 {
        self.consume_delay
    }

    pub fn override_duration(&self) -> Option<f32> {
        self.override_duration
    }

    pub fn curve(&self) -> Option<&SimpleCurve> {
        self.curve.as_ref()
    }

    /// Travel progress in [0, 1], before easing.
    pub fn percent(&self) -> f32 {
        self.percent
    }

    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Sprite scale when travel began, kept for host renderers.
    pub fn burst_scale(&self) -> Vec2 {
        self.burst_scale
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    /// The phase the next update would run in.
    pub fn phase(&self, scene: &dyn Scene) -> Phase {
        self.phase_for(&self.seed().resolve_target(scene))
    }

    fn phase_for(&self, target: &Target) -> Phase {
        if target.dead {
            Phase::Bursting
        } else if self.consume_delay > 0.0 {
            Phase::Delaying
        } else {
            Phase::Traveling
        }
    }

    /// Advance one frame.
    pub fn update(&mut self, scene: &dyn Scene, time: FrameTime, audio: &dyn AudioSink) -> OrbStatus {
        if self.removed {
            return OrbStatus::Removed;
        }

        let target = self.seed().resolve_target(scene);
        let phase = self.phase_for(&target);
        match phase {
            Phase::Bursting => self.burst(time),
            Phase::Delaying => self.delay(target.position, time),
            Phase::Traveling => self.travel(target.position, time),
        }
        self.sprite.position = self.position;

        if phase == Phase::Traveling && self.percent >= 1.0 {
            audio.play(SFX_ORB_ABSORBED);
            self.removed = true;
            log::trace!("orb absorbed at {:?}", self.position);
            return OrbStatus::Finished;
        }
        OrbStatus::Running(phase)
    }

    fn scatter(&mut self, target_speed: f32, rate: f32, raw: f32) {
        self.position += self.burst_direction * self.burst_speed * raw;
        self.burst_speed = approach(self.burst_speed, target_speed, raw * rate);
        self.sprite.rotation = angle(self.burst_direction);
        self.sprite.scale = squash(self.burst_speed);
    }

    fn burst(&mut self, time: FrameTime) {
        self.scatter(BURST_MAX_SPEED, BURST_ACCEL, time.raw_delta);
        self.alpha = approach(self.alpha, 0.0, time.delta);
        self.sprite.color = self.orb_color(self.percent) * self.alpha;
    }

    fn delay(&mut self, target: Vec2, time: FrameTime) {
        self.scatter(0.0, DELAY_DECEL, time.raw_delta);
        self.consume_delay -= time.raw_delta;
        if self.consume_delay <= 0.0 {
            self.begin_travel(target);
        }
    }

    /// Build the travel curve from the current position.
    fn begin_travel(&mut self, target: Vec2) -> SimpleCurve {
        let from = self.position;
        let delta = target - from;
        let midpoint = (from + target) / 2.0;
        let bend = 0.05 + self.rng.gen::<f32>() * 0.45;
        let mut offset = perpendicular(safe_normalize(delta)) * delta.length() * bend;
        // Keep the offset's dominant axis pointing the same way as the travel.
        if (delta.x.abs() > delta.y.abs() && sign(offset.x) != sign(delta.x))
            || (delta.y.abs() > delta.x.abs() && sign(offset.y) != sign(delta.y))
        {
            offset = -offset;
        }

        // The bend lives in the control point. The scaled end only lasts until
        // the first travel frame re-aims it at the live target.
        let multiplier = self.variants.curve_midpoint_multiplier.sample_with(&mut self.rng);
        let curve = SimpleCurve::new(from, target * multiplier, midpoint + offset);
        self.curve = Some(curve);
        self.duration = match self.override_duration {
            Some(d) => d,
            None => 0.3 + self.rng.gen::<f32>() * 0.25,
        };
        self.burst_scale = self.sprite.scale;
        curve
    }

    fn travel(&mut self, target: Vec2, time: FrameTime) {
        let mut curve = match self.curve {
            Some(c) => c,
            // Consume delay was zero or negative from the start.
            None => self.begin_travel(target),
        };
        curve.end = target;
        self.curve = Some(curve);

        let step = if self.duration > 0.0 { time.raw_delta / self.duration } else { 1.0 };
        self.percent = approach(self.percent, 1.0, step);

        let ease = self.variants.absorb_ease.value();
        let linear = self.variants.non_curved_absorb.value();
        let eased = ease.apply(self.percent);
        self.position = curve.point_with(eased, linear);

        let speed = yoyo(eased) * curve.length_parametric(LENGTH_RESOLUTION);
        self.sprite.scale = squash(speed);
        self.sprite.color = self.orb_color(self.percent) * (1.0 - eased);
        let ahead = curve.point_with(ease.apply(self.percent + TANGENT_STEP), linear);
        self.sprite.rotation = angle_between(self.position, ahead);
    }

    fn orb_color(&self, percent: f32) -> Color {
        Color::lerp(
            self.variants.orb_color_begin.value(),
            self.variants.orb_color_end.value(),
            percent,
        )
    }
}

impl std::fmt::Debug for AbsorbOrb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AbsorbOrb")
            .field("position", &self.position)
            .field("consume_delay", &self.consume_delay)
            .field("percent", &self.percent)
            .field("removed", &self.removed)
            .finish_non_exhaustive()
    }
}
