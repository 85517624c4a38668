//! Exact distances by comparing every pixel against every seed.
//! Takes `O(width * height * seeds)` time, so it is only
//! suitable for checking the approximation on small images.

use crate::distance_field::{magnitude, DistanceImage, FieldConfig};
use crate::error::{try_filled_vec, FieldError};
use crate::sampled_image::SampledImage;
use rayon::prelude::*;


/// The coordinates of all pixels brighter than the threshold.
pub fn seed_coordinates(image: &impl SampledImage, threshold: u8) -> Vec<(u16, u16)> {
    let mut seeds = Vec::new();

    for y in 0 .. image.height() {
        for x in 0 .. image.width() {
            if image.intensity(x, y) > threshold {
                seeds.push((x, y));
            }
        }
    }

    seeds
}

/// The exact squared distance of every pixel to its nearest seed,
/// row-major, or `None` for every pixel if there is no seed.
pub fn brute_force_costs(image: &impl SampledImage, threshold: u8) -> Result<Vec<Option<u64>>, FieldError> {
    let width = image.width() as usize;
    let seeds = seed_coordinates(image, threshold);
    log::trace!("brute force over {} seeds", seeds.len());

    let mut costs = try_filled_vec(width * image.height() as usize, None)?;
    if width == 0 {
        return Ok(costs);
    }

    costs.par_chunks_exact_mut(width)
        .enumerate()
        .for_each(|(y, row)| {
            for (x, cost) in row.iter_mut().enumerate() {
                let pixel = (x as u16, y as u16);
                *cost = seeds.iter()
                    .map(|&seed| squared_distance(seed, pixel))
                    .min();
            }
        });

    Ok(costs)
}

/// The exact counterpart of `compute_distance_image`,
/// using the same threshold, scale and byte mapping.
/// The connectivity is ignored. Without seeds, every pixel is 255.
pub fn brute_force_distance_image(image: &impl SampledImage, config: &FieldConfig) -> Result<DistanceImage, FieldError> {
    let costs = brute_force_costs(image, config.threshold)?;
    let scale = config.scale;

    let mut data = try_filled_vec(costs.len(), u8::MAX)?;
    data.par_iter_mut()
        .zip(costs.par_iter())
        .for_each(|(byte, cost)| {
            if let Some(cost) = cost {
                *byte = magnitude(*cost, scale);
            }
        });

    Ok(DistanceImage { width: image.width(), height: image.height(), data })
}

/// Squared distance between two pixels. Does not fit an `u32`
/// for opposite corners of the largest images.
#[inline]
pub fn squared_distance(a: (u16, u16), b: (u16, u16)) -> u64 {
    let dx = a.0 as i64 - b.0 as i64;
    let dy = a.1 as i64 - b.1 as i64;
    (dx * dx + dy * dy) as u64
}
