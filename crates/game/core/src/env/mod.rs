//! Static world data and the random source.
//!
//! The [`Grid`] is the immutable terrain every other component reads, and
//! [`RandomSource`] is the only source of randomness in the crate. Both are
//! passed explicitly; nothing here is process-global.
mod map;
mod rng;

pub use map::{Grid, MapDimensions, TerrainKind};
pub use rng::{PcgRng, RandomSource, RngState};
