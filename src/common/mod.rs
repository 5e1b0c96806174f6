pub mod bits;
pub mod capacity;
pub mod cast;
pub mod error;
pub mod geometry;
pub mod iter;

pub use bits::*;
pub use capacity::*;
pub use cast::*;
pub use error::*;
pub use geometry::*;
pub use iter::*;
