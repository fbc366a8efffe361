//! Gaussian blur
//!
//! Separable convolution (horizontal then vertical) on premultiplied alpha,
//! with samples outside the image clamped to the nearest edge pixel. The
//! output keeps the extent of the input. Rows are processed in parallel.

use rayon::prelude::*;

use crate::config;
use crate::error::{Result, Unavailable};
use crate::models::Bitmap;
use crate::render::alpha::{Premultiplied, premultiply, unpremultiply};

/// Normalised 1-D kernel for standard deviation `sigma`, half-width `ceil(3 sigma)`
///
/// A sigma too small for `2 sigma^2` to be a normal float yields the
/// single-tap identity kernel `[1.0]`.
pub fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let denom = 2.0 * sigma * sigma;
    if !denom.is_normal() {
        return vec![1.0];
    }
    let half = (3.0 * sigma).ceil().max(1.0) as usize;
    let mut kernel: Vec<f32> = (0..=2 * half)
        .map(|i| {
            let d = i as f32 - half as f32;
            (-(d * d) / denom).exp()
        })
        .collect();
    let sum: f32 = kernel.iter().sum();
    kernel.iter_mut().for_each(|w| *w /= sum);
    kernel
}

/// Blur `bitmap` with a Gaussian of standard deviation `radius` pixels
pub fn blur(bitmap: &Bitmap, radius: f32) -> Result<Bitmap> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(Unavailable::InvalidRadius(radius).into());
    }
    if radius == 0.0 {
        return Ok(bitmap.clone());
    }
    let max = config::max_blur_radius();
    if radius > max {
        return Err(Unavailable::FilterUnavailable { radius, max }.into());
    }
    if bitmap.is_empty() {
        return Err(Unavailable::EmptySource.into());
    }

    let kernel = gaussian_kernel(radius);
    if kernel.len() == 1 {
        return Ok(bitmap.clone());
    }
    tracing::debug!(radius, taps = kernel.len(), "blurring bitmap");

    let (width, height) = bitmap.dimensions();
    let (w, h) = (width as usize, height as usize);
    let src = premultiply(bitmap.as_image());

    let mut horizontal = vec![[0f32; 4]; w * h];
    horizontal
        .par_chunks_mut(w)
        .enumerate()
        .for_each(|(y, row)| {
            let src_row = &src[y * w..(y + 1) * w];
            for (x, out) in row.iter_mut().enumerate() {
                *out = convolve(&kernel, x, w, |i| src_row[i]);
            }
        });

    let mut vertical = vec![[0f32; 4]; w * h];
    vertical.par_chunks_mut(w).enumerate().for_each(|(y, row)| {
        for (x, out) in row.iter_mut().enumerate() {
            *out = convolve(&kernel, y, h, |i| horizontal[i * w + x]);
        }
    });

    Ok(Bitmap::from_image(unpremultiply(&vertical, width, height)))
}

/// Weighted sum around `center` along one axis of length `len`, edges clamped
fn convolve(
    kernel: &[f32],
    center: usize,
    len: usize,
    sample: impl Fn(usize) -> Premultiplied,
) -> Premultiplied {
    let half = kernel.len() / 2;
    let mut acc = [0f32; 4];
    for (k, &weight) in kernel.iter().enumerate() {
        let pos = (center + k).saturating_sub(half).min(len - 1);
        let px = sample(pos);
        for c in 0..4 {
            acc[c] += px[c] * weight;
        }
    }
    acc
}
