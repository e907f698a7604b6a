//! Tensor conventions shared across the bookkeeping layer.
//!
//! All tensors handled here are [`ArcTensor`]s: dynamic-rank `ndarray` arrays
//! over reference-counted storage. Cloning one is a cheap refcount bump, and
//! the metadata-only operations used by the slicer and the layout helpers
//! (axis slicing, axis collapsing, axis permutation) produce aliasing views of
//! the same storage — which is what lets per-degree views outlive the flat
//! tensor they were cut from inside a backward context.

use ndarray::{ArcArray, IxDyn};
use num_traits::Float;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shared, reference-counted, dynamic-rank tensor.
pub type ArcTensor<A> = ArcArray<A, IxDyn>;

/// Scalar element types a path may be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DType {
    F32,
    F64,
}

/// Compute location of a tensor. Only host memory is supported; the variant
/// exists so specs record where their tensors live.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Device {
    #[default]
    Cpu,
}

/// Element type and device a derived tensor (such as a spec's reciprocals)
/// must be created with, carried over from the input path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TensorOptions {
    pub dtype: DType,
    pub device: Device,
}

impl TensorOptions {
    /// Options for tensors holding elements of type `A` in host memory.
    pub fn of<A: Element>() -> Self {
        TensorOptions {
            dtype: A::DTYPE,
            device: Device::Cpu,
        }
    }
}

/// Trait describing the scalar behaviour required of path elements.
///
/// Mirrors the floating-point subset of what the compute kernels need:
/// ordinary field arithmetic via [`Float`], plus enough conversion support to
/// materialise small constant tensors like the per-degree reciprocals.
pub trait Element: Float + fmt::Debug + Send + Sync + 'static {
    /// The dtype tag tensors of this element carry.
    const DTYPE: DType;

    /// Converts an axis extent or degree into this element type.
    fn from_usize(value: usize) -> Self;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    fn from_usize(value: usize) -> Self {
        value as f32
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    fn from_usize(value: usize) -> Self {
        value as f64
    }
}
