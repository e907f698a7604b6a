use anyhow::Result;
use ndarray::{Array, IxDyn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sig_rs::{
    attach_logsignature_data, get_backwards_info, make_backwards_info, slice_by_term, ArcTensor,
    LogSignatureMode, SigError, SigSpec, Transform,
};

fn random_tensor(shape: &[usize], seed: u64) -> ArcTensor<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array::from_shape_fn(IxDyn(shape), |_| rng.gen::<f64>()).into_shared()
}

/// Spec plus plausible forward-pass intermediates, internal layout.
fn forward_state() -> (SigSpec<f64>, Vec<ArcTensor<f64>>, ArcTensor<f64>, ArcTensor<f64>) {
    let path = random_tensor(&[2, 4, 3], 0);
    let spec = SigSpec::new(&path, 2, false, false);
    let out = random_tensor(&[spec.output_channels, 2], 1);
    let out_vector = slice_by_term(&out, 0, &spec);
    let increments = random_tensor(&[3, 3, 2], 2);
    (spec, out_vector, out, increments)
}

#[test]
fn capsule_round_trips_the_saved_state() -> Result<()> {
    let (spec, out_vector, out, increments) = forward_state();

    let capsule = make_backwards_info(
        spec.clone(),
        out_vector.clone(),
        out.clone(),
        increments.clone(),
    );
    let info = get_backwards_info::<f64>(&capsule)?;

    assert_eq!(*info.sigspec(), spec);
    assert_eq!(info.out_vector().len(), out_vector.len());
    for (stored, original) in info.out_vector().iter().zip(&out_vector) {
        assert_eq!(stored, original);
    }
    // The stored output shares storage with the tensor handed to the caller.
    assert!(std::ptr::eq(info.out().as_ptr(), out.as_ptr()));
    assert_eq!(*info.path_increments(), increments);
    assert!(info.logsignature().is_none());
    Ok(())
}

#[test]
fn resolving_with_the_wrong_element_type_is_an_invalid_handle() {
    let (spec, out_vector, out, increments) = forward_state();
    let capsule = make_backwards_info(spec, out_vector, out, increments);

    let resolved = get_backwards_info::<f32>(&capsule);
    assert!(matches!(resolved, Err(SigError::InvalidHandle(_))));
}

#[test]
fn logsignature_data_attaches_exactly_once() -> Result<()> {
    let (spec, out_vector, out, increments) = forward_state();
    let signature_vector = out_vector.clone();
    let capsule = make_backwards_info(spec, out_vector, out, increments);

    let transforms = vec![Transform {
        degree: 2,
        source_index: 1,
        dest_index: 0,
    }];
    attach_logsignature_data(
        &capsule,
        signature_vector.clone(),
        transforms.clone(),
        LogSignatureMode::Words,
        5,
    )?;

    let info = get_backwards_info::<f64>(&capsule)?;
    let data = info.logsignature().expect("attachment should be visible");
    assert_eq!(data.mode, LogSignatureMode::Words);
    assert_eq!(data.logsignature_channels, 5);
    assert_eq!(data.transforms, transforms);
    assert_eq!(data.signature_vector.len(), signature_vector.len());

    // Second attachment is rejected and the first one survives.
    let second = attach_logsignature_data(
        &capsule,
        signature_vector,
        Vec::new(),
        LogSignatureMode::Brackets,
        7,
    );
    assert!(matches!(second, Err(SigError::InvalidArgument(_))));
    let data = get_backwards_info::<f64>(&capsule)?
        .logsignature()
        .expect("first attachment should survive");
    assert_eq!(data.mode, LogSignatureMode::Words);
    assert_eq!(data.logsignature_channels, 5);
    Ok(())
}

#[test]
fn capsule_clones_share_one_context() -> Result<()> {
    let (spec, out_vector, out, increments) = forward_state();
    let capsule = make_backwards_info(spec, out_vector, out, increments);
    let clone = capsule.clone();

    let through_original = get_backwards_info::<f64>(&capsule)?.out().as_ptr();
    let through_clone = get_backwards_info::<f64>(&clone)?.out().as_ptr();
    assert!(std::ptr::eq(through_original, through_clone));

    // The context stays live as long as any clone does.
    drop(capsule);
    assert!(get_backwards_info::<f64>(&clone).is_ok());
    Ok(())
}
