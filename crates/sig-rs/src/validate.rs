//! Entry-point argument validation.
//!
//! Both checks either pass entirely or reject the call before any computation
//! or context mutation happens; nothing here is retried or recovered.

use crate::error::{SigError, SigResult};
use crate::spec::SigSpec;
use crate::tensor::{ArcTensor, Element};

/// Validates the forward entry point's arguments.
///
/// `path` must be rank 3 in the external `(batch, stream, channel)` layout
/// with no zero-size axis, `depth` at least 1, and — when no basepoint is
/// supplied — at least two stream samples, since a single point defines no
/// increment. A basepoint, when present, must be rank 2 `(batch, channel)`
/// with extents matching the path.
pub fn validate_forward<A: Element>(
    path: &ArcTensor<A>,
    depth: usize,
    basepoint: Option<&ArcTensor<A>>,
) -> SigResult<()> {
    if path.ndim() != 3 {
        return Err(SigError::invalid_argument(format!(
            "path must be a 3-dimensional tensor with axes (batch, stream, channel), \
             got {} axes",
            path.ndim()
        )));
    }
    let shape = path.shape();
    if shape.contains(&0) {
        return Err(SigError::invalid_argument(format!(
            "path cannot have axes of size zero, got shape {shape:?}"
        )));
    }
    if basepoint.is_none() && shape[1] == 1 {
        return Err(SigError::invalid_argument(
            "path must have a stream axis of size at least 2; at least this many \
             points are needed to define a path",
        ));
    }
    if depth < 1 {
        return Err(SigError::invalid_argument(
            "depth must be an integer greater than or equal to one",
        ));
    }
    if let Some(value) = basepoint {
        if value.ndim() != 2 {
            return Err(SigError::invalid_argument(format!(
                "basepoint must be a 2-dimensional tensor with axes (batch, channel), \
                 got {} axes",
                value.ndim()
            )));
        }
        // basepoint is (batch, channel); path is (batch, stream, channel).
        if value.shape()[0] != shape[0] || value.shape()[1] != shape[2] {
            return Err(SigError::invalid_argument(format!(
                "basepoint axes {:?} do not match the path's (batch, channel) = ({}, {})",
                value.shape(),
                shape[0],
                shape[2]
            )));
        }
    }
    Ok(())
}

/// Validates the gradient fed to the backward entry point against the spec
/// saved at forward time.
///
/// `expected_channels` overrides the channel width to check against; `None`
/// means the full signature width `spec.output_channels`. The override is
/// used when the gradient is taken with respect to the narrower
/// log-signature output.
pub fn validate_backward<A: Element>(
    grad_out: &ArcTensor<A>,
    spec: &SigSpec<A>,
    expected_channels: Option<usize>,
) -> SigResult<()> {
    let expected_channels = expected_channels.unwrap_or(spec.output_channels);

    if spec.stream {
        if grad_out.ndim() != 3 {
            return Err(SigError::invalid_argument(format!(
                "gradient must be a 3-dimensional tensor with axes (batch, stream, \
                 channel), got {} axes",
                grad_out.ndim()
            )));
        }
        let shape = grad_out.shape();
        if shape[0] != spec.batch_size
            || shape[1] != spec.output_stream_size
            || shape[2] != expected_channels
        {
            return Err(SigError::invalid_argument(format!(
                "gradient has the wrong size: expected ({}, {}, {}), got {shape:?}",
                spec.batch_size, spec.output_stream_size, expected_channels
            )));
        }
    } else {
        if grad_out.ndim() != 2 {
            return Err(SigError::invalid_argument(format!(
                "gradient must be a 2-dimensional tensor with axes (batch, channel), \
                 got {} axes",
                grad_out.ndim()
            )));
        }
        let shape = grad_out.shape();
        if shape[0] != spec.batch_size || shape[1] != expected_channels {
            return Err(SigError::invalid_argument(format!(
                "gradient has the wrong size: expected ({}, {}), got {shape:?}",
                spec.batch_size, expected_channels
            )));
        }
    }
    Ok(())
}
