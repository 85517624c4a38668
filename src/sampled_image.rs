/// A rectangular image with one intensity sample per pixel.
/// Pixels brighter than the configured threshold are seeds.
/// SampledImages can be created from byte slices
/// or piston images if the feature `piston_image` is activated.
///
/// Implementations must be `Sync`, as rows are seeded in parallel.
pub trait SampledImage: Sync {
    fn width(&self) -> u16;

    fn height(&self) -> u16;

    /// The intensity of the pixel, `x < width` and `y < height`.
    fn intensity(&self, x: u16, y: u16) -> u8;
}

/// An image which is described by a slice of bytes.
/// Each pixel consists of `channels` consecutive bytes,
/// of which only the byte at index `channel` is sampled.
#[derive(Clone, Copy, Debug)]
pub struct ByteImage<'b> {
    width: u16,
    height: u16,

    /// A row-major image buffer with `channels` bytes per pixel.
    buffer: &'b [u8],

    channels: usize,
    channel: usize,
}


impl<'b> ByteImage<'b> {
    /// Create an image from a buffer with one byte per pixel.
    pub fn from_slice(width: u16, height: u16, buffer: &'b [u8]) -> Self {
        Self::from_interleaved(width, height, 1, 0, buffer)
    }

    /// Create an image from a buffer with `channels` bytes per pixel,
    /// sampling only the byte at index `channel` of each pixel.
    pub fn from_interleaved(width: u16, height: u16, channels: usize, channel: usize, buffer: &'b [u8]) -> Self {
        debug_assert!(channel < channels, "Channel index out of range");
        debug_assert_eq!(buffer.len(), width as usize * height as usize * channels, "Buffer dimension mismatch");
        ByteImage { width, height, buffer, channels, channel }
    }
}

impl SampledImage for ByteImage<'_> {
    #[inline]
    fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn intensity(&self, x: u16, y: u16) -> u8 {
        let pixel = self.width as usize * y as usize + x as usize;
        self.buffer[pixel * self.channels + self.channel]
    }
}

/// Sample piston images.
#[cfg(feature = "piston_image")]
pub mod piston_image {
    use image::{ImageBuffer, Pixel};
    use super::SampledImage;

    /// Sample the first channel of a piston image, which
    /// is the luminance of grey-scale images and the red channel of rgb images.
    pub fn of_u8_image<P, C>(image: &ImageBuffer<P, C>) -> Channel<'_, P, C>
        where P: Pixel<Subpixel = u8>, C: std::ops::Deref<Target = [u8]>
    {
        Channel::of(image, 0)
    }


    /// One channel of an 8-bit piston image.
    pub struct Channel<'i, P: Pixel, Container> {
        image: &'i ImageBuffer<P, Container>,
        channel: usize,
    }

    impl<'i, P, C> Channel<'i, P, C> where P: Pixel<Subpixel = u8> {
        /// Sample the specified channel of each pixel of a piston image.
        pub fn of(image: &'i ImageBuffer<P, C>, channel: usize) -> Self {
            debug_assert!(channel < P::CHANNEL_COUNT as usize, "Channel index out of range");
            Channel { image, channel }
        }
    }

    impl<'i, P, C> SampledImage for Channel<'i, P, C>
        where P: Pixel<Subpixel = u8> + Sync, C: std::ops::Deref<Target = [u8]> + Sync
    {
        fn width(&self) -> u16 {
            self.image.width() as u16
        }

        fn height(&self) -> u16 {
            self.image.height() as u16
        }

        fn intensity(&self, x: u16, y: u16) -> u8 {
            self.image.get_pixel(x as u32, y as u32).channels()[self.channel]
        }
    }

}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_single_channel_row_major() {
        let buffer = [0, 1, 2, 3, 4, 5];
        let image = ByteImage::from_slice(3, 2, &buffer);

        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.intensity(2, 0), 2);
        assert_eq!(image.intensity(0, 1), 3);
        assert_eq!(image.intensity(2, 1), 5);
    }

    #[test]
    fn samples_selected_channel_of_interleaved_pixels() {
        // two rgb pixels per row, green carries the shape
        let buffer = [
            0, 10, 0,   0, 20, 0,
            0, 30, 0,   0, 40, 0,
        ];

        let green = ByteImage::from_interleaved(2, 2, 3, 1, &buffer);
        assert_eq!(green.intensity(0, 0), 10);
        assert_eq!(green.intensity(1, 0), 20);
        assert_eq!(green.intensity(1, 1), 40);

        let red = ByteImage::from_interleaved(2, 2, 3, 0, &buffer);
        assert_eq!(red.intensity(1, 1), 0);
    }
}
