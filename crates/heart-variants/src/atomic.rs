//! Lock-free cells for variant values.
//!
//! Orbs read the store every frame while menu callbacks write it. Values are
//! bit-packed into `AtomicU32` so reads never block.

use std::sync::atomic::{AtomicU32, Ordering};

/// A value that round-trips through 32 bits.
pub trait Bits: Copy {
    fn to_bits(self) -> u32;
    fn from_bits(bits: u32) -> Self;
}

impl Bits for f32 {
    fn to_bits(self) -> u32 {
        f32::to_bits(self)
    }

    fn from_bits(bits: u32) -> Self {
        f32::from_bits(bits)
    }
}

impl Bits for i32 {
    fn to_bits(self) -> u32 {
        self as u32
    }

    fn from_bits(bits: u32) -> Self {
        bits as i32
    }
}

impl Bits for heart_core::Color {
    fn to_bits(self) -> u32 {
        self.to_packed()
    }

    fn from_bits(bits: u32) -> Self {
        heart_core::Color::from_packed(bits)
    }
}

/// Atomic wrapper for any [`Bits`] value.
#[derive(Debug)]
pub struct AtomicCell<T: Bits> {
    bits: AtomicU32,
    _marker: std::marker::PhantomData<T>,
}

impl<T: Bits> AtomicCell<T> {
    pub fn new(val: T) -> Self {
        Self {
            bits: AtomicU32::new(val.to_bits()),
            _marker: std::marker::PhantomData,
        }
    }

    pub fn load(&self) -> T {
        T::from_bits(self.bits.load(Ordering::Relaxed))
    }

    pub fn store(&self, val: T) {
        self.bits.store(val.to_bits(), Ordering::Relaxed);
    }
}

impl<T: Bits> Clone for AtomicCell<T> {
    fn clone(&self) -> Self {
        Self::new(self.load())
    }
}

pub type AtomicF32 = AtomicCell<f32>;
