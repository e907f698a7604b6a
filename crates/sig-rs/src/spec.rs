//! Fixed-shape specification for one signature computation.

use ndarray::Array1;

use crate::tensor::{ArcTensor, Element, TensorOptions};

/// Total channel width of a depth-`depth` signature over `input_channels`
/// path channels: `Σ_{k=1..depth} input_channels^k`.
///
/// Depends on nothing but those two quantities; in particular it is
/// independent of batch and stream extents.
pub fn signature_channels(input_channels: usize, depth: usize) -> usize {
    let mut total = 0usize;
    let mut term = 1usize;
    for _ in 0..depth {
        term *= input_channels;
        total += term;
    }
    total
}

/// Immutable layout specification, computed once per forward call from the
/// input path's shape and the requested options.
///
/// Everything downstream — slicing, layout permutation, backward-gradient
/// validation — reads its extents from here rather than re-deriving them.
/// Cheap to move and clone: all fields are scalars except `reciprocals`,
/// which is a shared tensor of `depth - 1` elements.
#[derive(Debug, Clone, PartialEq)]
pub struct SigSpec<A: Element> {
    /// Element type and device derived tensors must match, per the input path.
    pub options: TensorOptions,
    /// Number of samples along the path's stream axis.
    pub input_stream_size: usize,
    /// Number of channels of the path.
    pub input_channels: usize,
    /// Number of independent paths processed together.
    pub batch_size: usize,
    /// Signature extent along the stream axis: one entry per increment, so
    /// the input stream size minus one unless a basepoint supplies the
    /// missing starting sample.
    pub output_stream_size: usize,
    /// Total signature channel width, `signature_channels(input_channels, depth)`.
    pub output_channels: usize,
    /// Rank of the output: 3 when the full stream of signatures is retained,
    /// 2 when only the final signature is.
    pub n_output_dims: usize,
    /// Truncation degree of the tensor algebra, at least 1.
    pub depth: usize,
    /// `[1/2, 1/3, …, 1/depth]`, precomputed for the algebraic combination
    /// formulas in the compute kernels. Empty when `depth == 1`.
    pub reciprocals: ArcTensor<A>,
    /// Whether the output retains the full stream axis.
    pub stream: bool,
    /// Whether an explicit starting point is prepended to the path.
    pub basepoint: bool,
}

impl<A: Element> SigSpec<A> {
    /// Builds the spec from a path in the external `(batch, stream, channel)`
    /// layout. Pure function of its arguments; callers are expected to have
    /// run [`crate::validate::validate_forward`] first, so the path is known
    /// to be a well-formed rank-3 tensor and `depth >= 1`.
    pub fn new(path: &ArcTensor<A>, depth: usize, stream: bool, basepoint: bool) -> Self {
        let shape = path.shape();
        let (batch_size, input_stream_size, input_channels) = (shape[0], shape[1], shape[2]);

        let reciprocals = if depth > 1 {
            let divisors = Array1::linspace(
                A::from_usize(2),
                A::from_usize(depth),
                depth - 1,
            );
            (Array1::<A>::ones(depth - 1) / &divisors)
                .into_dyn()
                .into_shared()
        } else {
            Array1::<A>::ones(0).into_dyn().into_shared()
        };

        SigSpec {
            options: TensorOptions::of::<A>(),
            input_stream_size,
            input_channels,
            batch_size,
            output_stream_size: input_stream_size - usize::from(!basepoint),
            output_channels: signature_channels(input_channels, depth),
            n_output_dims: if stream { 3 } else { 2 },
            depth,
            reciprocals,
            stream,
            basepoint,
        }
    }
}
