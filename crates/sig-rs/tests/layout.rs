use anyhow::Result;
use ndarray::{Array, IxDyn};
use rand::{rngs::StdRng, Rng, SeedableRng};
use sig_rs::{to_external_layout, to_internal_layout, ArcTensor, SigSpec};

fn random_tensor(shape: &[usize], seed: u64) -> ArcTensor<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    Array::from_shape_fn(IxDyn(shape), |_| rng.gen::<f64>()).into_shared()
}

#[test]
fn streamed_layouts_are_inverse_permutations() -> Result<()> {
    let external = random_tensor(&[2, 3, 5], 0);
    let spec = SigSpec::new(&external, 2, true, false);

    let internal = to_internal_layout(&external, &spec);
    assert_eq!(internal.shape(), &[3, 5, 2]);
    for b in 0..2 {
        for s in 0..3 {
            for c in 0..5 {
                assert_eq!(internal[[s, c, b]], external[[b, s, c]]);
            }
        }
    }

    assert_eq!(to_external_layout(&internal, &spec), external);
    assert_eq!(
        to_internal_layout(&to_external_layout(&internal, &spec), &spec),
        internal
    );
    Ok(())
}

#[test]
fn unstreamed_layouts_are_inverse_permutations() -> Result<()> {
    let path = random_tensor(&[2, 3, 5], 1);
    let spec = SigSpec::new(&path, 2, false, false);

    // A final signature, external layout: (batch, channel).
    let external = random_tensor(&[2, spec.output_channels], 2);
    let internal = to_internal_layout(&external, &spec);
    assert_eq!(internal.shape(), &[spec.output_channels, 2]);
    for b in 0..2 {
        for c in 0..spec.output_channels {
            assert_eq!(internal[[c, b]], external[[b, c]]);
        }
    }

    assert_eq!(to_external_layout(&internal, &spec), external);
    Ok(())
}

#[test]
fn layout_conversion_never_copies_data() {
    let external = random_tensor(&[2, 3, 5], 3);
    let spec = SigSpec::new(&external, 2, true, false);

    let internal = to_internal_layout(&external, &spec);
    assert!(std::ptr::eq(internal.as_ptr(), external.as_ptr()));

    let back = to_external_layout(&internal, &spec);
    assert!(std::ptr::eq(back.as_ptr(), external.as_ptr()));
}
