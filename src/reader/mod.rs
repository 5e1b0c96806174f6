mod locate;

pub use locate::{binarize, RingLocation, LUMA_THRESHOLD};

use image::GrayImage;
use tracing::{debug, trace};

use crate::builder::{Ring, DARK, LIGHT};
use crate::common::{
    BitSequence, CapacityModel, DataRegionIter, GeometryParams, RingError, RingResult,
    BYTE_SIZE, STRUCTURAL_RINGS,
};

// Ring reader
// Reads unrotated renders of a known geometry
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RingReader {
    geometry: GeometryParams,
}

impl RingReader {
    pub fn new(geometry: GeometryParams) -> Self {
        Self { geometry }
    }

    pub fn read(&self, img: &GrayImage) -> RingResult<String> {
        let ring = self.read_grid(img)?;

        debug!("Extracting payload...");
        ring.decode()
    }

    /// Samples the module grid out of an image. The returned ring compares equal to the
    /// one that was rendered when every module is recovered.
    pub fn read_grid(&self, img: &GrayImage) -> RingResult<Ring> {
        let capacity = CapacityModel::plan(&self.geometry, 0);
        let cols = capacity.module_per_circle();
        let module_sz = self.geometry.module_size_px() as f64;

        debug!("Binarizing image...");
        let bin = binarize(img);

        debug!("Locating ring...");
        let loc = RingLocation::locate(&bin, cols, module_sz).ok_or(RingError::SymbolNotFound)?;
        let rows = loc.ring_count(module_sz);
        trace!(?loc, rows, "Located ring");

        // Zebra, finder and inner rings plus at least one data ring
        if rows <= STRUCTURAL_RINGS {
            return Err(RingError::SymbolNotFound);
        }

        debug!("Sampling modules...");
        let angle_step = 360.0 / cols as f64;
        let mut grid = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                let deg = angle_step * (c as f64 + 0.5);
                let m = loc.sample(&bin, module_sz, r, deg).ok_or(RingError::SymbolNotFound)?;
                grid.push(if m == DARK { DARK } else { LIGHT });
            }
        }

        let capacity = capacity.with_number_of_circle(rows - STRUCTURAL_RINGS);
        let ring = Ring::from_modules(self.geometry, capacity, grid);

        debug!("Verifying sync patterns...");
        ring.verify_structure()?;

        Ok(ring)
    }
}

// Structure check
//------------------------------------------------------------------------------

impl Ring {
    fn verify_structure(&self) -> RingResult<()> {
        let last = self.cols() - 1;
        let finder = self.rows() - 2;
        let markers = self.finder_markers();

        let zebra = self.circle(0).iter().enumerate().all(|(c, &m)| m == alternate(c));
        let data = (1..finder).all(|r| {
            self.get(r, 0) == DARK
                && self.get(r, 1) == LIGHT
                && self.get(r, 2) == alternate(r)
                && self.get(r, last) == LIGHT
        });
        let finder_ring = self
            .circle(finder)
            .iter()
            .enumerate()
            .all(|(c, &m)| m == if markers.contains(&c) { LIGHT } else { DARK });
        let inner = self.circle(finder + 1).iter().all(|&m| m == DARK);

        if zebra && data && finder_ring && inner {
            Ok(())
        } else {
            Err(RingError::StructureMismatch)
        }
    }
}

fn alternate(i: usize) -> u8 {
    if i & 1 == 0 {
        DARK
    } else {
        LIGHT
    }
}

// Payload
// Light modules read as 1. Unused data modules are light, so the first all-ones
// group ends the payload, a byte UTF-8 never produces
//------------------------------------------------------------------------------

const TERMINATOR: &str = "11111111";

impl Ring {
    pub fn extract_payload(&self) -> BitSequence {
        let last_row = self.capacity().last_data_row();
        let mut coords = DataRegionIter::new(self.cols());
        let end_col = coords.end_col();

        let mut groups = Vec::new();
        loop {
            let byte = coords.by_ref().take(BYTE_SIZE).collect::<Vec<_>>();
            if byte.iter().any(|&(r, c)| c >= end_col || r > last_row) {
                break;
            }
            let group = byte
                .iter()
                .map(|&(r, c)| if self.get(r, c) == DARK { '0' } else { '1' })
                .collect::<String>();
            if group == TERMINATOR {
                break;
            }
            groups.push(group);
        }
        BitSequence::from_groups(groups)
    }

    pub fn decode(&self) -> RingResult<String> {
        let bytes = self.extract_payload().unpack()?;
        String::from_utf8(bytes).or(Err(RingError::InvalidUTF8Sequence))
    }
}
