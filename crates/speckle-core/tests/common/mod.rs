#![allow(dead_code)]

use ndarray::Array2;

use speckle_core::image::Image;
use speckle_core::params::ImageParams;

/// `(height, width)` array filled with `a*x + b*y + c`.
pub fn ramp_array(width: usize, height: usize, a: f64, b: f64, c: f64) -> Array2<f64> {
    Array2::from_shape_fn((height, width), |(y, x)| a * x as f64 + b * y as f64 + c)
}

pub fn ramp_image(width: usize, height: usize, a: f64, b: f64, c: f64) -> Image {
    Image::from_array(ramp_array(width, height, a, b, c), &ImageParams::default())
        .expect("ramp image")
}

pub fn constant_image(width: usize, height: usize, value: f64, params: &ImageParams) -> Image {
    Image::from_vec(vec![value; width * height], width, height, params).expect("constant image")
}

/// Zero image with a single non-zero pixel.
pub fn spike_image(width: usize, height: usize, x: usize, y: usize, value: f64) -> Image {
    let mut data = Array2::<f64>::zeros((height, width));
    data[[y, x]] = value;
    Image::from_array(data, &ImageParams::default()).expect("spike image")
}

/// Deterministic speckle-like texture with no symmetry, values in ~[0, 255].
pub fn speckle_array(width: usize, height: usize) -> Array2<f64> {
    Array2::from_shape_fn((height, width), |(y, x)| {
        let (xf, yf) = (x as f64, y as f64);
        127.5
            + 60.0 * (0.37 * xf + 0.11 * yf).sin()
            + 40.0 * (0.23 * yf - 0.05 * xf * xf / (1.0 + yf)).cos()
            + 20.0 * ((x * 7 + y * 13) % 11) as f64 / 11.0
    })
}

pub fn speckle_image(width: usize, height: usize) -> Image {
    Image::from_array(speckle_array(width, height), &ImageParams::default()).expect("speckle image")
}

/// True if `a` and `b` agree to `rel` relative tolerance (absolute near zero).
pub fn close(a: f64, b: f64, rel: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= rel * scale
}
