use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};
use std::sync::{Arc, OnceLock};

const B1: f32 = 1.0 / 2.75;
const B2: f32 = 2.0 / 2.75;
const B3: f32 = 1.5 / 2.75;
const B4: f32 = 2.5 / 2.75;
const B5: f32 = 2.25 / 2.75;
const B6: f32 = 2.625 / 2.75;

/// A named easing function: maps normalized progress to eased progress.
///
/// Back and elastic curves overshoot [0, 1] on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Easer {
    Linear = 0,
    SineIn,
    SineOut,
    SineInOut,
    QuadIn,
    QuadOut,
    QuadInOut,
    CubeIn,
    CubeOut,
    CubeInOut,
    QuintIn,
    QuintOut,
    QuintInOut,
    ExpoIn,
    ExpoOut,
    ExpoInOut,
    BackIn,
    BackOut,
    BackInOut,
    BigBackIn,
    BigBackOut,
    BigBackInOut,
    ElasticIn,
    ElasticOut,
    ElasticInOut,
    BounceIn,
    BounceOut,
    BounceInOut,
}

impl Easer {
    /// Every easer in catalog order.
    pub const ALL: [Easer; 28] = [
        Easer::Linear,
        Easer::SineIn,
        Easer::SineOut,
        Easer::SineInOut,
        Easer::QuadIn,
        Easer::QuadOut,
        Easer::QuadInOut,
        Easer::CubeIn,
        Easer::CubeOut,
        Easer::CubeInOut,
        Easer::QuintIn,
        Easer::QuintOut,
        Easer::QuintInOut,
        Easer::ExpoIn,
        Easer::ExpoOut,
        Easer::ExpoInOut,
        Easer::BackIn,
        Easer::BackOut,
        Easer::BackInOut,
        Easer::BigBackIn,
        Easer::BigBackOut,
        Easer::BigBackInOut,
        Easer::ElasticIn,
        Easer::ElasticOut,
        Easer::ElasticInOut,
        Easer::BounceIn,
        Easer::BounceOut,
        Easer::BounceInOut,
    ];

    pub fn from_u8(val: u8) -> Self {
        Self::ALL.get(val as usize).copied().unwrap_or(Easer::Linear)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Easer::Linear => "Linear",
            Easer::SineIn => "SineIn",
            Easer::SineOut => "SineOut",
            Easer::SineInOut => "SineInOut",
            Easer::QuadIn => "QuadIn",
            Easer::QuadOut => "QuadOut",
            Easer::QuadInOut => "QuadInOut",
            Easer::CubeIn => "CubeIn",
            Easer::CubeOut => "CubeOut",
            Easer::CubeInOut => "CubeInOut",
            Easer::QuintIn => "QuintIn",
            Easer::QuintOut => "QuintOut",
            Easer::QuintInOut => "QuintInOut",
            Easer::ExpoIn => "ExpoIn",
            Easer::ExpoOut => "ExpoOut",
            Easer::ExpoInOut => "ExpoInOut",
            Easer::BackIn => "BackIn",
            Easer::BackOut => "BackOut",
            Easer::BackInOut => "BackInOut",
            Easer::BigBackIn => "BigBackIn",
            Easer::BigBackOut => "BigBackOut",
            Easer::BigBackInOut => "BigBackInOut",
            Easer::ElasticIn => "ElasticIn",
            Easer::ElasticOut => "ElasticOut",
            Easer::ElasticInOut => "ElasticInOut",
            Easer::BounceIn => "BounceIn",
            Easer::BounceOut => "BounceOut",
            Easer::BounceInOut => "BounceInOut",
        }
    }

    /// Evaluate the curve at `t`. Input is not clamped.
    pub fn apply(&self, t: f32) -> f32 {
        match self {
            Easer::Linear => t,
            Easer::SineIn => 1.0 - (FRAC_PI_2 * t).cos(),
            Easer::SineOut => (FRAC_PI_2 * t).sin(),
            Easer::SineInOut => -(PI * t).cos() / 2.0 + 0.5,
            Easer::QuadIn => quad_in(t),
            Easer::QuadOut => invert(quad_in, t),
            Easer::QuadInOut => follow(quad_in, |t| invert(quad_in, t), t),
            Easer::CubeIn => cube_in(t),
            Easer::CubeOut => invert(cube_in, t),
            Easer::CubeInOut => follow(cube_in, |t| invert(cube_in, t), t),
            Easer::QuintIn => quint_in(t),
            Easer::QuintOut => invert(quint_in, t),
            Easer::QuintInOut => follow(quint_in, |t| invert(quint_in, t), t),
            Easer::ExpoIn => expo_in(t),
            Easer::ExpoOut => invert(expo_in, t),
            Easer::ExpoInOut => follow(expo_in, |t| invert(expo_in, t), t),
            Easer::BackIn => back_in(t),
            Easer::BackOut => invert(back_in, t),
            Easer::BackInOut => follow(back_in, |t| invert(back_in, t), t),
            Easer::BigBackIn => big_back_in(t),
            Easer::BigBackOut => invert(big_back_in, t),
            Easer::BigBackInOut => follow(big_back_in, |t| invert(big_back_in, t), t),
            Easer::ElasticIn => elastic_in(t),
            Easer::ElasticOut => elastic_out(t),
            Easer::ElasticInOut => follow(elastic_in, elastic_out, t),
            Easer::BounceIn => invert(bounce_out, t),
            Easer::BounceOut => bounce_out(t),
            Easer::BounceInOut => follow(|t| invert(bounce_out, t), bounce_out, t),
        }
    }
}

impl Default for Easer {
    fn default() -> Self {
        Easer::Linear
    }
}

fn quad_in(t: f32) -> f32 {
    t * t
}

fn cube_in(t: f32) -> f32 {
    t * t * t
}

fn quint_in(t: f32) -> f32 {
    t * t * t * t * t
}

fn expo_in(t: f32) -> f32 {
    2f32.powf(10.0 * (t - 1.0))
}

fn back_in(t: f32) -> f32 {
    t * t * (2.70158 * t - 1.70158)
}

fn big_back_in(t: f32) -> f32 {
    t * t * (4.0 * t - 3.0)
}

fn elastic_in(t: f32) -> f32 {
    let ts = t * t;
    let tc = ts * t;
    33.0 * tc * ts - 59.0 * ts * ts + 32.0 * tc - 5.0 * ts
}

fn elastic_out(t: f32) -> f32 {
    let ts = t * t;
    let tc = ts * t;
    33.0 * tc * ts - 106.0 * ts * ts + 126.0 * tc - 67.0 * ts + 15.0 * t
}

fn bounce_out(t: f32) -> f32 {
    if t < B1 {
        7.5625 * t * t
    } else if t < B2 {
        7.5625 * (t - B3) * (t - B3) + 0.75
    } else if t < B4 {
        7.5625 * (t - B5) * (t - B5) + 0.9375
    } else {
        7.5625 * (t - B6) * (t - B6) + 0.984375
    }
}

/// Mirror an ease-in into an ease-out.
fn invert(f: impl Fn(f32) -> f32, t: f32) -> f32 {
    1.0 - f(1.0 - t)
}

/// First half runs `first`, second half runs `second`, each squeezed into half the range.
fn follow(first: impl Fn(f32) -> f32, second: impl Fn(f32) -> f32, t: f32) -> f32 {
    if t <= 0.5 {
        first(t * 2.0) / 2.0
    } else {
        second(t * 2.0 - 1.0) / 2.0 + 0.5
    }
}

/// One selectable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EaserInfo {
    pub easer: Easer,
    pub name: &'static str,
}

/// Ordered, enumerable set of easing functions the menu slider walks over.
///
/// Entries may repeat an easer under another name; lookups resolve to the
/// first occurrence.
#[derive(Debug, Clone)]
pub struct EaseCatalog {
    entries: Vec<EaserInfo>,
}

impl EaseCatalog {
    pub fn new(entries: Vec<EaserInfo>) -> Self {
        Self { entries }
    }

    /// Every [`Easer`] in declaration order, built once and shared.
    pub fn standard() -> Arc<EaseCatalog> {
        static CATALOG: OnceLock<Arc<EaseCatalog>> = OnceLock::new();
        CATALOG
            .get_or_init(|| {
                Arc::new(EaseCatalog::new(
                    Easer::ALL
                        .iter()
                        .map(|&easer| EaserInfo { easer, name: easer.name() })
                        .collect(),
                ))
            })
            .clone()
    }

    /// Index of the first entry whose easer equals `easer`.
    pub fn index_of(&self, easer: Easer) -> Option<usize> {
        self.entries.iter().position(|e| e.easer == easer)
    }

    pub fn get(&self, index: usize) -> Option<&EaserInfo> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[EaserInfo] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
