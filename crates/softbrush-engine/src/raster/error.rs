use thiserror::Error;

/// Failure to allocate a surface.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Error)]
pub enum SurfaceError {
    /// One of the dimensions is zero.
    #[error("surface dimensions must be non-zero, got {width}x{height}")]
    ZeroSized { width: u32, height: u32 },
    /// The pixel count does not fit the address space or exceeds `MAX_DIMENSION`.
    #[error("surface of {width}x{height} is too large")]
    TooLarge { width: u32, height: u32 },
}
