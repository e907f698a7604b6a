//! Degree-wise decomposition of flat tensor-algebra elements.

use ndarray::{Axis, Slice};

use crate::spec::SigSpec;
use crate::tensor::{ArcTensor, Element};

/// Splits a flat tensor-algebra element into its `depth` homogeneous-degree
/// components along `axis`.
///
/// The concatenated axis has length `Σ_{k=1..depth} input_channels^k`; the
/// k-th returned tensor is the degree-k term, of length `input_channels^k`,
/// taken at the running offset. No data is copied — every returned tensor
/// aliases the storage of `input`.
pub fn slice_by_term<A: Element>(
    input: &ArcTensor<A>,
    axis: usize,
    spec: &SigSpec<A>,
) -> Vec<ArcTensor<A>> {
    let mut terms = Vec::with_capacity(spec.depth);
    let mut offset = 0usize;
    let mut length = spec.input_channels;
    for _ in 0..spec.depth {
        let mut term = input.clone();
        term.slice_axis_inplace(Axis(axis), Slice::from(offset..offset + length));
        terms.push(term);
        offset += length;
        length *= spec.input_channels;
    }
    terms
}

/// Extracts the signature state at one stream position from a full per-degree
/// stream: fixes axis 0 of every term at `stream_index` and removes it.
///
/// Zero-copy, like [`slice_by_term`]: the returned tensors alias the inputs'
/// storage.
pub fn slice_at_stream<A: Element>(
    terms: &[ArcTensor<A>],
    stream_index: usize,
) -> Vec<ArcTensor<A>> {
    terms
        .iter()
        .map(|term| term.clone().index_axis_move(Axis(0), stream_index))
        .collect()
}
