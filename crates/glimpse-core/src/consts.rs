/// Minimum pixel count (h*w) to use row-level Rayon parallelism when
/// building displacement maps or remapping frames.
pub const PARALLEL_PIXEL_THRESHOLD: usize = 65_536;

/// Field of view (degrees) of the gnomonic (rectilinear) projection.
pub const GNOMONIC_FOV_DEG: f64 = 65.5;

/// Field of view (degrees) of the stereographic projection used for
/// glimpse views and path rendering.
pub const STEREOGRAPHIC_FOV_DEG: f64 = 104.3;

/// Frame rate assumed when the source carries no timestamp trailer and
/// the caller supplies none.
pub const DEFAULT_FPS: f64 = 30.0;

/// Number of frames decoded simultaneously when scoring a view clip.
pub const SCORING_BATCH_SIZE: usize = 8;

/// SER timestamp trailer tick length: 100 ns per tick.
pub const SER_TICKS_PER_SECOND: f64 = 10_000_000.0;
