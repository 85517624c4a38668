use crate::error::FieldError;
use crate::grid::DistanceGrid;
use crate::record::DistanceRecord;
use crate::sampled_image::SampledImage;
use crate::scan::{self, Connectivity};


/// Settings for one distance field computation.
/// Each call takes its own configuration,
/// so concurrent calls may use different settings.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct FieldConfig {
    /// A pixel must be brighter than this value in order to be a seed.
    pub threshold: u8,

    /// Output magnitude per pixel of distance.
    /// With the default of 8, distances of 32 pixels and more saturate.
    pub scale: f32,

    pub connectivity: Connectivity,
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig { threshold: 128, scale: 8.0, connectivity: Connectivity::Four }
    }
}

impl FieldConfig {
    pub fn with_threshold(self, threshold: u8) -> Self {
        FieldConfig { threshold, ..self }
    }

    pub fn with_scale(self, scale: f32) -> Self {
        FieldConfig { scale, ..self }
    }

    pub fn with_connectivity(self, connectivity: Connectivity) -> Self {
        FieldConfig { connectivity, ..self }
    }
}


/// A single channel image with one distance magnitude per pixel.
/// Zero marks a seed, 255 marks saturated or unreachable pixels.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DistanceImage {
    pub width: u16,
    pub height: u16,

    /// Row-major, one byte per pixel.
    pub data: Vec<u8>,
}

impl DistanceImage {
    #[inline]
    pub fn get(&self, x: u16, y: u16) -> u8 {
        self.data[self.flatten_index(x, y)]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    #[inline]
    pub fn flatten_index(&self, x: u16, y: u16) -> usize {
        self.width as usize * y as usize + x as usize
    }

    /// Convert to a grey-scale piston image.
    /// Returns `None` if the buffer does not match the dimensions.
    #[cfg(feature = "piston_image")]
    pub fn to_gray_u8_image(&self) -> Option<image::GrayImage> {
        image::GrayImage::from_raw(self.width as u32, self.height as u32, self.data.clone())
    }
}


/// Stores the unscaled distance of each pixel,
/// with `f32::INFINITY` where no seed exists.
pub trait DistanceStorage: Sized {
    type Element: Clone + Send + Sync;

    fn encode(distance: f32) -> Self::Element;

    fn from_elements(elements: Vec<Self::Element>) -> Self;

    fn get(&self, index: usize) -> f32;
}

/// Needs less storage with sufficient precision for texture uploads.
pub type F16DistanceStorage = Vec<half::f16>;

/// Needs more storage but keeps the full precision.
pub type F32DistanceStorage = Vec<f32>;

impl DistanceStorage for F16DistanceStorage {
    type Element = half::f16;

    #[inline]
    fn encode(distance: f32) -> half::f16 {
        half::f16::from_f32(distance)
    }

    fn from_elements(elements: Vec<half::f16>) -> Self {
        elements
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index].to_f32()
    }
}

impl DistanceStorage for F32DistanceStorage {
    type Element = f32;

    #[inline]
    fn encode(distance: f32) -> f32 {
        distance
    }

    fn from_elements(elements: Vec<f32>) -> Self {
        elements
    }

    #[inline]
    fn get(&self, index: usize) -> f32 {
        self[index]
    }
}


/// Seed a grid from the image and propagate the seeds through it.
pub fn compute_distance_grid(image: &impl SampledImage, config: &FieldConfig) -> Result<DistanceGrid, FieldError> {
    log::debug!(
        "computing {}x{} distance grid, {:?} connectivity",
        image.width(), image.height(), config.connectivity
    );

    let mut grid = DistanceGrid::seeded(image, config.threshold)?;
    scan::propagate(&mut grid, config.connectivity);
    Ok(grid)
}

/// Approximates the distance of every pixel to the nearest seed pixel,
/// mapped to `round(sqrt(cost) * scale)` and clamped to a byte.
pub fn compute_distance_image(image: &impl SampledImage, config: &FieldConfig) -> Result<DistanceImage, FieldError> {
    let grid = compute_distance_grid(image, config)?;
    let scale = config.scale;

    let data = grid.map_interior(0_u8, |record| {
        magnitude(record.cost_squared as u64, scale)
    })?;

    Ok(DistanceImage { width: grid.width(), height: grid.height(), data })
}

/// Approximates the unscaled distance of every pixel to the nearest seed pixel.
pub fn compute_distances<D: DistanceStorage>(image: &impl SampledImage, config: &FieldConfig) -> Result<D, FieldError> {
    let grid = compute_distance_grid(image, config)?;

    let elements = grid.map_interior(D::encode(0.0), |record| {
        D::encode(distance(record))
    })?;

    Ok(D::from_elements(elements))
}

/// Map a squared distance to the output byte.
#[inline]
pub fn magnitude(cost_squared: u64, scale: f32) -> u8 {
    let scaled = (cost_squared as f32).sqrt() * scale;
    scaled.round().max(0.0).min(255.0) as u8
}

#[inline]
fn distance(record: &DistanceRecord) -> f32 {
    if record.is_far() { std::f32::INFINITY }
    else { (record.cost_squared as f32).sqrt() }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampled_image::ByteImage;

    #[test]
    fn magnitude_rounds_and_saturates() {
        assert_eq!(magnitude(0, 8.0), 0);
        assert_eq!(magnitude(1, 8.0), 8);
        assert_eq!(magnitude(2, 8.0), 11);
        assert_eq!(magnitude(5, 8.0), 18);
        assert_eq!(magnitude(31 * 31, 8.0), 248);
        assert_eq!(magnitude(32 * 32, 8.0), 255);
        assert_eq!(magnitude(2 * 65535 * 65535, 1.0 / 1024.0), 91);
        assert_eq!(magnitude(DistanceRecord::FAR.cost_squared as u64, 8.0), 255);
        assert_eq!(magnitude(DistanceRecord::FAR.cost_squared as u64, 1.0 / 128.0), 255);
    }

    #[test]
    fn config_builders() {
        let config = FieldConfig::default()
            .with_threshold(10)
            .with_scale(4.0)
            .with_connectivity(Connectivity::Eight);

        assert_eq!(config, FieldConfig { threshold: 10, scale: 4.0, connectivity: Connectivity::Eight });
        assert_eq!(FieldConfig::default().threshold, 128);
        assert_eq!(FieldConfig::default().scale, 8.0);
        assert_eq!(FieldConfig::default().connectivity, Connectivity::Four);
    }

    #[test]
    fn threshold_selects_seeds() {
        let buffer = [0, 100, 200];
        let image = ByteImage::from_slice(3, 1, &buffer);

        let strict = compute_distance_image(&image, &FieldConfig::default()).unwrap();
        assert_eq!(strict.as_slice(), &[16, 8, 0]);

        let loose = compute_distance_image(&image, &FieldConfig::default().with_threshold(50)).unwrap();
        assert_eq!(loose.as_slice(), &[8, 0, 0]);
    }

    #[test]
    fn unscaled_distances() {
        let buffer = [
            255, 0, 0,
            0, 0, 0,
        ];

        let image = ByteImage::from_slice(3, 2, &buffer);
        let distances: F32DistanceStorage = compute_distances(&image, &FieldConfig::default()).unwrap();
        assert_eq!(distances, vec![0.0, 1.0, 2.0, 1.0, 2_f32.sqrt(), 5_f32.sqrt()]);

        let half_distances: F16DistanceStorage = compute_distances(&image, &FieldConfig::default()).unwrap();
        for (index, expected) in distances.iter().enumerate() {
            assert!((half_distances.get(index) - expected).abs() < 0.01);
        }
    }

    #[test]
    fn unreached_distances_are_infinite() {
        let buffer = [0_u8; 6];
        let image = ByteImage::from_slice(2, 3, &buffer);

        let distances: F32DistanceStorage = compute_distances(&image, &FieldConfig::default()).unwrap();
        assert!(distances.iter().all(|distance| distance.is_infinite()));

        let half_distances: F16DistanceStorage = compute_distances(&image, &FieldConfig::default()).unwrap();
        assert!((0 .. 6).all(|index| half_distances.get(index).is_infinite()));
    }
}
