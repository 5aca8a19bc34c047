mod common;

use ndarray::{Array2, ArcArray2};

use speckle_core::error::SpeckleError;
use speckle_core::image::Image;
use speckle_core::io::region::Region;
use speckle_core::params::{DispatchOptions, ImageParams};

use common::{constant_image, ramp_array, ramp_image};

// ---------------------------------------------------------------------------
// Construction
// ---------------------------------------------------------------------------

#[test]
fn test_from_vec_is_row_major() {
    let data: Vec<f64> = (0..12).map(|v| v as f64).collect();
    let img = Image::from_vec(data, 4, 3, &ImageParams::default()).unwrap();

    assert_eq!(img.width(), 4);
    assert_eq!(img.height(), 3);
    assert_eq!(img.num_pixels(), 12);
    assert_eq!(img.offset_x(), 0);
    assert_eq!(img.offset_y(), 0);
    // x is the column, y the row
    assert_eq!(img.at(3, 0), 3.0);
    assert_eq!(img.at(0, 2), 8.0);
    assert_eq!(img.at(1, 1), 5.0);
}

#[test]
fn test_from_slice_copies() {
    let data = vec![1.0, 2.0, 3.0, 4.0];
    let img = Image::from_slice(&data, 2, 2, &ImageParams::default()).unwrap();
    assert_eq!(img.at(1, 1), 4.0);
    assert_eq!(data[3], 4.0);
}

#[test]
fn test_all_constructors_agree() {
    let arr = ramp_array(6, 5, 1.0, 10.0, 0.0);
    let flat: Vec<f64> = arr.iter().copied().collect();
    let params = ImageParams::default();

    let a = Image::from_array(arr.clone(), &params).unwrap();
    let b = Image::from_vec(flat.clone(), 6, 5, &params).unwrap();
    let c = Image::from_slice(&flat, 6, 5, &params).unwrap();
    let d = Image::from_shared(6, 5, arr.into_shared(), &params).unwrap();

    for img in [&b, &c, &d] {
        assert_eq!(img.intensities(), a.intensities());
    }
}

#[test]
fn test_zero_dimensions_rejected() {
    let params = ImageParams::default();
    let err = Image::from_vec(vec![], 0, 4, &params).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));
    let err = Image::from_vec(vec![], 4, 0, &params).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));
}

#[test]
fn test_length_mismatch_rejected() {
    let err = Image::from_vec(vec![0.0; 11], 4, 3, &ImageParams::default()).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));
}

#[test]
fn test_shared_shape_mismatch_rejected() {
    let shared = ArcArray2::from_elem((3, 4), 1.0);
    let err = Image::from_shared(3, 4, shared, &ImageParams::default()).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));
}

#[test]
fn test_invalid_mask_size_is_config_error() {
    for size in [0, 1, 4, 15] {
        let err = Image::from_vec(vec![0.0; 4], 2, 2, &ImageParams::with_gauss_mask_size(size))
            .unwrap_err();
        assert!(
            matches!(err, SpeckleError::Config(_)),
            "mask size {size} should be a config error, got {err:?}"
        );
    }
}

// ---------------------------------------------------------------------------
// Sub-images
// ---------------------------------------------------------------------------

#[test]
fn test_sub_image_within_parent() {
    let parent = ramp_image(50, 50, 1.0, 100.0, 0.0);
    let sub = parent.sub_image(&Region::new(5, 5, 20, 20)).unwrap();

    assert_eq!(sub.width(), 20);
    assert_eq!(sub.height(), 20);
    assert_eq!(sub.offset_x(), 5);
    assert_eq!(sub.offset_y(), 5);
    // Local access: (0,0) is the parent's (5,5)
    assert_eq!(sub.at(0, 0), parent.at(5, 5));
    assert_eq!(sub.at(19, 19), parent.at(24, 24));
    assert_eq!(sub.to_global(3, 4), (8, 9));
}

#[test]
fn test_sub_image_exceeding_parent_fails() {
    let parent = ramp_image(50, 50, 1.0, 1.0, 0.0);
    let err = parent.sub_image(&Region::new(5, 5, 50, 20)).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));

    let err = parent.sub_image(&Region::new(0, 31, 10, 20)).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));
}

#[test]
fn test_sub_image_exact_fit_and_empty() {
    let parent = ramp_image(50, 50, 1.0, 1.0, 0.0);
    assert!(parent.sub_image(&Region::new(30, 30, 20, 20)).is_ok());
    let err = parent.sub_image(&Region::new(1, 1, 0, 5)).unwrap_err();
    assert!(matches!(err, SpeckleError::Construction(_)));
}

#[test]
fn test_nested_sub_image_offsets_accumulate() {
    let parent = ramp_image(50, 50, 1.0, 1.0, 0.0);
    let child = parent.sub_image(&Region::new(5, 6, 30, 30)).unwrap();
    let grandchild = child.sub_image(&Region::new(2, 3, 10, 10)).unwrap();
    assert_eq!(grandchild.offset_x(), 7);
    assert_eq!(grandchild.offset_y(), 9);
    assert_eq!(grandchild.at(0, 0), parent.at(7, 9));
}

#[test]
fn test_sub_image_keeps_params() {
    let params = ImageParams::with_gauss_mask_size(11);
    let parent = constant_image(20, 20, 1.0, &params);
    let sub = parent.sub_image(&Region::new(0, 0, 5, 5)).unwrap();
    assert_eq!(sub.gauss_mask().size(), 11);
}

// ---------------------------------------------------------------------------
// Access
// ---------------------------------------------------------------------------

#[test]
fn test_try_at_out_of_range() {
    let img = ramp_image(4, 3, 1.0, 1.0, 0.0);
    assert!(img.try_at(3, 2).is_ok());
    let err = img.try_at(4, 0).unwrap_err();
    assert!(matches!(
        err,
        SpeckleError::Access {
            x: 4,
            y: 0,
            width: 4,
            height: 3
        }
    ));
    assert!(img.try_at(0, 3).is_err());
}

#[test]
#[should_panic]
fn test_at_out_of_range_panics() {
    let img = ramp_image(4, 3, 1.0, 1.0, 0.0);
    img.at(10, 10);
}

// ---------------------------------------------------------------------------
// Gradient lifecycle
// ---------------------------------------------------------------------------

#[test]
fn test_has_gradients_lifecycle() {
    let mut img = ramp_image(16, 16, 1.0, 2.0, 0.0);
    assert!(!img.has_gradients());

    img.compute_gradients(&DispatchOptions::flat()).unwrap();
    assert!(img.has_gradients());

    img.gauss_filter(&DispatchOptions::flat()).unwrap();
    assert!(!img.has_gradients());

    img.compute_gradients(&DispatchOptions::hierarchical(32)).unwrap();
    assert!(img.has_gradients());
}

#[test]
fn test_gradient_access_before_compute_fails() {
    let img = ramp_image(8, 8, 1.0, 1.0, 0.0);
    assert!(matches!(
        img.grad_x(1, 1),
        Err(SpeckleError::GradientsNotComputed)
    ));
    assert!(matches!(
        img.grad_y(1, 1),
        Err(SpeckleError::GradientsNotComputed)
    ));
    assert!(img.grad_x_view().is_err());
    assert!(img.grad_y_view().is_err());
}

#[test]
fn test_gradient_access_out_of_range() {
    let mut img = ramp_image(8, 8, 1.0, 1.0, 0.0);
    img.compute_gradients(&DispatchOptions::default()).unwrap();
    assert!(matches!(
        img.grad_x(8, 0),
        Err(SpeckleError::Access { .. })
    ));
}

#[test]
fn test_bad_team_size_leaves_no_gradients() {
    let mut img = ramp_image(8, 8, 1.0, 1.0, 0.0);
    img.compute_gradients(&DispatchOptions::flat()).unwrap();

    let err = img
        .compute_gradients(&DispatchOptions::hierarchical(0))
        .unwrap_err();
    assert!(matches!(err, SpeckleError::Config(_)));
    assert!(!img.has_gradients());
}

// ---------------------------------------------------------------------------
// Shared storage
// ---------------------------------------------------------------------------

#[test]
fn test_shared_storage_not_mutated_by_filter() {
    let mut arr = Array2::<f64>::zeros((9, 9));
    arr[[4, 4]] = 9.0;
    let shared = arr.into_shared();

    let mut img = Image::from_shared(9, 9, shared.clone(), &ImageParams::default()).unwrap();
    img.gauss_filter(&DispatchOptions::flat()).unwrap();

    assert_eq!(shared[[4, 4]], 9.0);
    assert_eq!(shared[[4, 5]], 0.0);
    assert!(img.at(4, 4) < 9.0);
    assert!(img.at(4, 5) > 0.0);
}

#[test]
fn test_shared_storage_outlives_caller_handle() {
    let shared = ArcArray2::from_elem((4, 4), 3.0);
    let img = Image::from_shared(4, 4, shared, &ImageParams::default()).unwrap();
    // The caller's handle was moved in and dropped with it; the image keeps it alive.
    assert_eq!(img.at(2, 2), 3.0);
}

#[test]
fn test_image_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Image>();
}
