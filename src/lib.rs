//! This crate approximates the euclidean distance
//! of every pixel to the nearest seed pixel of an image,
//! in linear time, for building distance field textures
//! of glyphs, icons and sprites.
//! The algorithm propagates squared distances in two raster passes,
//! following `Euclidean distance mapping` by Per-Erik Danielsson (1980).
//! An exhaustive reference implementation is included for testing.

pub mod record;
pub mod grid;
pub mod scan;
pub mod sampled_image;
pub mod distance_field;
pub mod brute_force;
pub mod error;

pub mod prelude {
    pub use crate::{
        compute_distance_field,
        compute_f16_distances,
        compute_f32_distances,
    };

    pub use crate::sampled_image::{
        SampledImage, ByteImage
    };

    pub use crate::distance_field::{
        FieldConfig, DistanceImage, DistanceStorage,
        F16DistanceStorage, F32DistanceStorage,
        compute_distance_image, compute_distance_grid, compute_distances,
    };

    pub use crate::brute_force::brute_force_distance_image;
    pub use crate::error::FieldError;
    pub use crate::grid::DistanceGrid;
    pub use crate::record::DistanceRecord;
    pub use crate::scan::Connectivity;

    #[cfg(feature = "piston_image")]
    pub use crate::sampled_image::piston_image as sampled_piston_image;
}


use prelude::*;

/// Compute the 4-connected distance field of the image,
/// with seeds brighter than 128 and 8 magnitude steps per pixel.
pub fn compute_distance_field(image: &impl SampledImage) -> Result<DistanceImage, FieldError> {
    compute_distance_image(image, &FieldConfig::default())
}

/// Compute the unscaled distances of the image with an `f16` distance storage.
pub fn compute_f16_distances(image: &impl SampledImage, config: &FieldConfig) -> Result<F16DistanceStorage, FieldError> {
    compute_distances(image, config)
}

/// Compute the unscaled distances of the image with an `f32` distance storage.
pub fn compute_f32_distances(image: &impl SampledImage, config: &FieldConfig) -> Result<F32DistanceStorage, FieldError> {
    compute_distances(image, config)
}
