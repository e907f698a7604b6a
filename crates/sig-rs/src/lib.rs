//! Layout and bookkeeping scaffolding for truncated path-signature computations.
//!
//! A path signature truncated at depth `d` is a graded tensor-algebra element:
//! `d` homogeneous tensors of degree 1 through `d`, stored concatenated along a
//! single channel axis. This crate owns the shape arithmetic around that
//! representation — the per-call [`SigSpec`], the degree-wise slicing of the
//! concatenated axis, the conversion between the external `(batch, stream,
//! channel)` layout and the internal `(stream, channel, batch)` layout used by
//! the compute kernels, the opaque [`BackwardsInfoCapsule`] that carries saved
//! forward-pass state into a later backward call, and the argument validation
//! for both entry points.
//!
//! The iterated-integral kernels themselves (signature, log-signature, their
//! gradients) live elsewhere; they consume this crate's types and the shared
//! [`ArcTensor`] views it hands out.

pub mod backward;
pub mod error;
pub mod layout;
pub mod slice;
pub mod spec;
pub mod tensor;
pub mod validate;

pub use backward::{
    attach_logsignature_data, get_backwards_info, make_backwards_info, BackwardsInfo,
    BackwardsInfoCapsule, LogSignatureData, LogSignatureMode, Transform,
};
pub use error::{SigError, SigResult};
pub use layout::{to_external_layout, to_internal_layout};
pub use slice::{slice_at_stream, slice_by_term};
pub use spec::{signature_channels, SigSpec};
pub use tensor::{ArcTensor, DType, Device, Element, TensorOptions};
pub use validate::{validate_backward, validate_forward};
