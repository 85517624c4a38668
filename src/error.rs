/// Errors that can occur while computing a distance field.
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FieldError {
    /// The padded grid or the output buffer could not be allocated.
    #[error("failed to allocate a buffer of {cells} cells")]
    Allocation {
        /// Number of elements requested.
        cells: usize,
    },

    /// A side is so long that real distances would reach the cost of `FAR`.
    #[error("image of {width}x{height} pixels exceeds the maximum side of {max_side}")]
    TooLarge {
        width: u16,
        height: u16,
        max_side: u16,
    },
}

/// Allocate a vector with exactly `length` copies of `value`,
/// reporting exhaustion instead of aborting.
pub(crate) fn try_filled_vec<T: Clone>(length: usize, value: T) -> Result<Vec<T>, FieldError> {
    let mut buffer = Vec::new();
    buffer.try_reserve_exact(length)
        .map_err(|_| FieldError::Allocation { cells: length })?;

    buffer.resize(length, value);
    Ok(buffer)
}
