//! # ringcode
//!
//! A Rust library for generating circular barcodes. Text is packed into bytes and laid
//! out on concentric rings of modules, then drawn as annular segments around a light
//! centre.
//!
//! ## Features
//!
//! - **Ring Generation**: Map UTF-8 text onto a grid of rings sized from a geometry
//! - **Rendering**: Draw the grid as smoothed wedges on a square canvas
//! - **Reading**: Recover the text from unrotated renders of a known geometry
//!
//! ## Quick Start
//!
//! ```rust
//! use ringcode::{GeometryParams, RingBuilder, RingReader};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Sizes are logical units, multiplied by the pixel gain
//! let geometry = GeometryParams::new(8, 80, 160, 3)?;
//!
//! let ring = RingBuilder::new("19292390").geometry(geometry).build()?;
//! let img = ring.render();
//!
//! let text = RingReader::new(geometry).read(&img)?;
//! assert_eq!(text, "19292390");
//! # Ok(())
//! # }
//! ```
//!
//! ## Layout
//!
//! Rows of the grid are rings from the outermost inward, columns are angular positions.
//!
//! - **Radial zebra**: outermost ring, alternating dark and light modules
//! - **Data rings**: one byte after another starting at column 3. Columns 0 to 2 hold the
//!   vertical sync stripes and the last column stays light
//! - **Finder ring**: dark with four light markers a quarter turn apart
//! - **Inner ring**: fully dark, closes the symbol around the light centre
//!
//! ## Capacity
//!
//! The number of modules per ring is fixed by the inner circumference, the number of rings
//! by the radial room between both radii. Check [`RingBuilder::exceeds_capacity`] before
//! building, [`RingBuilder::build`] fails with [`RingError::CapacityOverflow`] otherwise.

#![allow(clippy::items_after_test_module)]

pub mod builder;
pub(crate) mod common;
pub mod reader;
pub mod render;

pub use builder::{Ring, RingBuilder, DARK, LIGHT};
pub use common::{pack, BitSequence, CapacityModel, GeometryParams, RingError, RingResult};
pub use reader::RingReader;
pub use render::{RingRenderer, DEFAULT_INK};
