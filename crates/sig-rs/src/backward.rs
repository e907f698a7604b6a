//! Forward-to-backward state carried across the autograd boundary.
//!
//! The forward entry point returns its signature alongside an opaque capsule;
//! the backward entry point, possibly much later and possibly never, hands
//! the capsule back to recover the saved intermediates. The capsule is
//! type-erased so the boundary in between does not need to understand the
//! element type, cheap to clone, and destroys its context exactly once when
//! the last clone is dropped.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};

use crate::error::{SigError, SigResult};
use crate::spec::SigSpec;
use crate::tensor::{ArcTensor, Element};

/// Output shape a log-signature was requested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LogSignatureMode {
    /// Full tensor-algebra width, no basis projection.
    Expanded,
    /// Coefficients of the Lyndon-word basis.
    Words,
    /// Coefficients of the Lyndon-bracket basis.
    Brackets,
}

/// One step in assembling log-signature terms from signature terms: within
/// the degree-`degree` component, the coefficient at `source_index`
/// contributes to the coefficient at `dest_index`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub degree: usize,
    pub source_index: usize,
    pub dest_index: usize,
}

/// Extra state the log-signature backward pass needs on top of the plain
/// signature intermediates.
#[derive(Debug)]
pub struct LogSignatureData<A: Element> {
    /// Homogeneous-degree components of the signature.
    pub signature_vector: Vec<ArcTensor<A>>,
    /// Ordered assembly recipe for the chosen basis.
    pub transforms: Vec<Transform>,
    /// Requested output shape.
    pub mode: LogSignatureMode,
    /// Channel width of the log-signature in that mode.
    pub logsignature_channels: usize,
}

/// Everything the backward pass needs from the forward pass. Created once per
/// differentiable forward call, read-only afterwards except for the one-shot
/// log-signature extension.
#[derive(Debug)]
pub struct BackwardsInfo<A: Element> {
    sigspec: SigSpec<A>,
    out_vector: Vec<ArcTensor<A>>,
    out: ArcTensor<A>,
    path_increments: ArcTensor<A>,
    logsignature: OnceCell<LogSignatureData<A>>,
}

impl<A: Element> BackwardsInfo<A> {
    /// The layout spec the forward pass was computed under.
    pub fn sigspec(&self) -> &SigSpec<A> {
        &self.sigspec
    }

    /// Per-degree views of the signature produced during the forward pass.
    pub fn out_vector(&self) -> &[ArcTensor<A>] {
        &self.out_vector
    }

    /// The signature tensor returned to the caller.
    pub fn out(&self) -> &ArcTensor<A> {
        &self.out
    }

    /// Per-step differences of the (basepoint-adjusted) path.
    pub fn path_increments(&self) -> &ArcTensor<A> {
        &self.path_increments
    }

    /// Log-signature bookkeeping, present only after
    /// [`attach_logsignature_data`] has run.
    pub fn logsignature(&self) -> Option<&LogSignatureData<A>> {
        self.logsignature.get()
    }
}

/// Opaque handle to a [`BackwardsInfo`].
///
/// Carries no caller-inspectable structure; it exists to be threaded from the
/// forward call's output into the matching backward call's input. Clones
/// share the underlying context, which is freed exactly once when the last
/// clone is dropped — a context whose backward call never happens leaks
/// nothing. Capsules cannot be fabricated: the only constructor is
/// [`make_backwards_info`].
#[derive(Clone)]
pub struct BackwardsInfoCapsule {
    payload: Arc<dyn Any + Send + Sync>,
}

impl fmt::Debug for BackwardsInfoCapsule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackwardsInfoCapsule").finish_non_exhaustive()
    }
}

/// Packs freshly computed forward-pass state into a capsule, consuming the
/// spec and the intermediate tensors. Performs no validation; the forward
/// entry point has already vetted its arguments.
pub fn make_backwards_info<A: Element>(
    sigspec: SigSpec<A>,
    out_vector: Vec<ArcTensor<A>>,
    out: ArcTensor<A>,
    path_increments: ArcTensor<A>,
) -> BackwardsInfoCapsule {
    BackwardsInfoCapsule {
        payload: Arc::new(BackwardsInfo {
            sigspec,
            out_vector,
            out,
            path_increments,
            logsignature: OnceCell::new(),
        }),
    }
}

/// Resolves a capsule back into the context it was created around.
///
/// The downcast doubles as the tag check: a capsule holding a context of a
/// different element type resolves to [`SigError::InvalidHandle`].
pub fn get_backwards_info<A: Element>(
    capsule: &BackwardsInfoCapsule,
) -> SigResult<&BackwardsInfo<A>> {
    capsule
        .payload
        .downcast_ref::<BackwardsInfo<A>>()
        .ok_or_else(|| {
            SigError::invalid_handle(
                "capsule does not hold backwards info for the requested element type",
            )
        })
}

/// Extends a context with the log-signature state its backward pass needs.
///
/// Write-once: a second call on the same capsule is rejected with an
/// invalid-argument error and leaves the first attachment untouched.
pub fn attach_logsignature_data<A: Element>(
    capsule: &BackwardsInfoCapsule,
    signature_vector: Vec<ArcTensor<A>>,
    transforms: Vec<Transform>,
    mode: LogSignatureMode,
    logsignature_channels: usize,
) -> SigResult<()> {
    let info = get_backwards_info::<A>(capsule)?;
    info.logsignature
        .set(LogSignatureData {
            signature_vector,
            transforms,
            mode,
            logsignature_channels,
        })
        .map_err(|_| {
            SigError::invalid_argument(
                "log-signature data has already been attached to this capsule",
            )
        })
}
