//! Axis-order conversion between the external and internal tensor layouts.
//!
//! Callers see `(batch, stream, channel)`; the compute kernels iterate over
//! the stream and want `(stream, channel, batch)`. When the stream axis is
//! not retained the conventions collapse to `(batch, channel)` and
//! `(channel, batch)`. Both directions are pure axis permutations — metadata
//! only, never touching data — and exact inverses of each other.

use ndarray::IxDyn;

use crate::spec::SigSpec;
use crate::tensor::{ArcTensor, Element};

/// External layout to internal layout: `(batch, stream, channel)` →
/// `(stream, channel, batch)`, or `(batch, channel)` → `(channel, batch)`
/// when `spec.stream` is unset.
pub fn to_internal_layout<A: Element>(tensor: &ArcTensor<A>, spec: &SigSpec<A>) -> ArcTensor<A> {
    if spec.stream {
        tensor.clone().permuted_axes(IxDyn(&[1, 2, 0]))
    } else {
        tensor.clone().permuted_axes(IxDyn(&[1, 0]))
    }
}

/// Internal layout back to external layout; the exact inverse permutation of
/// [`to_internal_layout`].
pub fn to_external_layout<A: Element>(tensor: &ArcTensor<A>, spec: &SigSpec<A>) -> ArcTensor<A> {
    if spec.stream {
        tensor.clone().permuted_axes(IxDyn(&[2, 0, 1]))
    } else {
        tensor.clone().permuted_axes(IxDyn(&[1, 0]))
    }
}
