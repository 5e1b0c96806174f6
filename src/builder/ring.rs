use crate::common::{
    BitSequence, CapacityModel, DataRegionIter, GeometryParams, RingError, RingResult,
};

pub const DARK: u8 = 0;
pub const LIGHT: u8 = 255;

// Ring grid
// Rows are rings from the outermost inward, columns are angular positions shared
// by every ring
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Ring {
    grid: Vec<u8>,
    rows: usize,
    cols: usize,
    geometry: GeometryParams,
    capacity: CapacityModel,
}

impl Ring {
    pub(crate) fn new(geometry: GeometryParams, capacity: CapacityModel) -> Self {
        let rows = capacity.number_of_circle();
        let cols = capacity.module_per_circle();
        Self { grid: vec![LIGHT; rows * cols], rows, cols, geometry, capacity }
    }

    pub(crate) fn from_modules(
        geometry: GeometryParams,
        capacity: CapacityModel,
        grid: Vec<u8>,
    ) -> Self {
        let cols = capacity.module_per_circle();
        debug_assert!(grid.len() % cols == 0, "Grid length {} not a multiple of {cols}", grid.len());
        Self { rows: grid.len() / cols, grid, cols, geometry, capacity }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn geometry(&self) -> GeometryParams {
        self.geometry
    }

    pub fn capacity(&self) -> CapacityModel {
        self.capacity
    }

    pub fn modules(&self) -> &[u8] {
        &self.grid
    }

    pub fn circle(&self, r: usize) -> &[u8] {
        &self.grid[r * self.cols..(r + 1) * self.cols]
    }

    pub fn count_dark_modules(&self) -> usize {
        self.grid.iter().filter(|&&m| m == DARK).count()
    }

    pub fn get(&self, r: usize, c: usize) -> u8 {
        self.grid[self.coord_to_index(r, c)]
    }

    pub fn set(&mut self, r: usize, c: usize, module: u8) {
        let index = self.coord_to_index(r, c);
        self.grid[index] = module;
    }

    fn coord_to_index(&self, r: usize, c: usize) -> usize {
        assert!(r < self.rows, "Row {r} out of bounds for {} rings", self.rows);
        assert!(c < self.cols, "Column {c} out of bounds for {} modules", self.cols);
        r * self.cols + c
    }

    #[cfg(test)]
    pub fn to_debug_str(&self) -> String {
        let mut res = String::with_capacity(self.rows * (self.cols + 1) + 1);
        res.push('\n');
        for r in 0..self.rows {
            for &m in self.circle(r) {
                res.push(if m == DARK { 'x' } else { '.' });
            }
            res.push('\n');
        }
        res
    }
}

#[cfg(test)]
mod ring_util_tests {
    use super::{Ring, DARK, LIGHT};
    use crate::common::{CapacityModel, GeometryParams};

    fn blank_ring(byte_count: usize) -> Ring {
        let geometry = GeometryParams::new(8, 20, 84, 1).unwrap();
        Ring::new(geometry, CapacityModel::plan(&geometry, byte_count))
    }

    #[test]
    fn test_new_is_light() {
        let ring = blank_ring(3);
        assert_eq!(ring.rows(), 4);
        assert_eq!(ring.cols(), 15);
        assert_eq!(ring.count_dark_modules(), 0);
        assert!(ring.modules().iter().all(|&m| m == LIGHT));
    }

    #[test]
    fn test_get_set() {
        let mut ring = blank_ring(1);
        ring.set(1, 14, DARK);
        assert_eq!(ring.get(1, 14), DARK);
        assert_eq!(ring.circle(1)[14], DARK);
        assert_eq!(ring.count_dark_modules(), 1);
    }

    #[test]
    #[should_panic]
    fn test_row_out_of_bound() {
        let ring = blank_ring(1);
        ring.get(ring.rows(), 0);
    }

    #[test]
    #[should_panic]
    fn test_col_out_of_bound() {
        let ring = blank_ring(1);
        ring.get(0, ring.cols());
    }
}

// Vertical zebras
// Column 0 dark, column 1 light, column 2 alternating by ring, last column light
//------------------------------------------------------------------------------

impl Ring {
    pub(crate) fn draw_vertical_zebras(&mut self) {
        let last = self.cols - 1;
        for r in 0..self.rows {
            self.set(r, 0, DARK);
            self.set(r, 1, LIGHT);
            self.set(r, 2, if r & 1 == 0 { LIGHT } else { DARK });
            self.set(r, last, LIGHT);
        }
    }
}

#[cfg(test)]
mod vertical_zebra_tests {
    use super::Ring;
    use crate::common::{CapacityModel, GeometryParams};

    #[test]
    fn test_vertical_zebras() {
        let geometry = GeometryParams::new(8, 20, 84, 1).unwrap();
        let mut ring = Ring::new(geometry, CapacityModel::plan(&geometry, 3));
        ring.draw_vertical_zebras();
        assert_eq!(
            ring.to_debug_str(),
            "\n\
             x..............\n\
             x.x............\n\
             x..............\n\
             x.x............\n"
        );
    }
}

// Radial zebra
// Prepended outermost ring alternating dark and light across all columns
//------------------------------------------------------------------------------

impl Ring {
    pub(crate) fn draw_radial_zebra(&mut self) {
        let zebra = (0..self.cols).map(|c| if c & 1 == 0 { DARK } else { LIGHT });
        self.grid.splice(0..0, zebra);
        self.rows += 1;
    }
}

#[cfg(test)]
mod radial_zebra_tests {
    use super::Ring;
    use crate::common::{CapacityModel, GeometryParams};

    #[test]
    fn test_radial_zebra() {
        let geometry = GeometryParams::new(8, 20, 84, 1).unwrap();
        let mut ring = Ring::new(geometry, CapacityModel::plan(&geometry, 1));
        ring.draw_vertical_zebras();
        ring.draw_radial_zebra();
        assert_eq!(
            ring.to_debug_str(),
            "\n\
             x.x.x.x.x.x.x.x\n\
             x..............\n\
             x.x............\n"
        );
    }
}

// Inner rings
// Finder ring with four light markers at quarter phase offsets, then a dark stop ring
//------------------------------------------------------------------------------

impl Ring {
    pub(crate) fn draw_inner_rings(&mut self) {
        let mut finder = vec![DARK; self.cols];
        for idx in self.finder_markers() {
            finder[idx] = LIGHT;
        }
        self.grid.extend(finder);
        self.grid.extend(std::iter::repeat(DARK).take(self.cols));
        self.rows += 2;
    }

    // Markers at 0.5, 1.5, 2.5 and 3.5 quarter circles
    pub fn finder_markers(&self) -> [usize; 4] {
        [1, 3, 5, 7].map(|k| self.cols * k / 8)
    }
}

#[cfg(test)]
mod inner_ring_tests {
    use super::{Ring, DARK};
    use crate::common::{CapacityModel, GeometryParams};

    #[test]
    fn test_inner_rings() {
        let geometry = GeometryParams::new(8, 20, 84, 1).unwrap();
        let mut ring = Ring::new(geometry, CapacityModel::plan(&geometry, 0));
        ring.draw_vertical_zebras();
        ring.draw_radial_zebra();
        ring.draw_inner_rings();
        assert_eq!(ring.finder_markers(), [1, 5, 9, 13]);
        assert_eq!(
            ring.to_debug_str(),
            "\n\
             x.x.x.x.x.x.x.x\n\
             x..............\n\
             x.xxx.xxx.xxx.x\n\
             xxxxxxxxxxxxxxx\n"
        );
    }

    #[test]
    fn test_finder_markers_stock_geometry() {
        let geometry = GeometryParams::default();
        let mut ring = Ring::new(geometry, CapacityModel::plan(&geometry, 0));
        ring.draw_inner_rings();
        let finder = ring.rows() - 2;
        assert_eq!(ring.finder_markers(), [7, 23, 38, 54]);
        let light = (0..ring.cols()).filter(|&c| ring.get(finder, c) != DARK).collect::<Vec<_>>();
        assert_eq!(light, vec![7, 23, 38, 54]);
    }
}

// Data region
//------------------------------------------------------------------------------

impl Ring {
    pub(crate) fn draw_payload(&mut self, bits: &BitSequence) -> RingResult<()> {
        let last_row = self.capacity.last_data_row();
        let coords = DataRegionIter::new(self.cols);
        let end_col = coords.end_col();
        for (bit, (r, c)) in bits.bits().zip(coords) {
            // Validated geometries only ever trip the row bound
            if c >= end_col || r > last_row {
                return Err(RingError::CapacityOverflow { row: r, col: c });
            }
            if bit == '0' {
                self.set(r, c, DARK);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod data_region_tests {
    use super::Ring;
    use crate::common::{pack, CapacityModel, GeometryParams, RingError};

    fn ring_for(text: &str, geometry: GeometryParams) -> Ring {
        let mut ring = Ring::new(geometry, CapacityModel::plan(&geometry, text.len()));
        ring.draw_vertical_zebras();
        ring.draw_radial_zebra();
        ring.draw_inner_rings();
        ring
    }

    #[test]
    fn test_draw_payload() {
        let geometry = GeometryParams::new(8, 20, 84, 1).unwrap();
        let mut ring = ring_for("AB", geometry);
        ring.draw_payload(&pack("AB")).unwrap();
        assert_eq!(
            ring.to_debug_str(),
            "\n\
             x.x.x.x.x.x.x.x\n\
             x..x.xxxxx.....\n\
             x.xx.xxxx.x....\n\
             x..............\n\
             x.xxx.xxx.xxx.x\n\
             xxxxxxxxxxxxxxx\n"
        );
    }

    #[test]
    fn test_draw_payload_row_overflow() {
        let geometry = GeometryParams::new(8, 20, 84, 1).unwrap();
        let mut ring = ring_for("ABCDEF", geometry);
        assert_eq!(
            ring.draw_payload(&pack("ABCDEF")),
            Err(RingError::CapacityOverflow { row: 6, col: 3 })
        );
    }

    #[test]
    fn test_draw_payload_lookahead_slack_overflow() {
        // 20 modules per ring hold two bytes by capacity, one after the lookahead wrap
        let geometry = GeometryParams::new(8, 26, 106, 1).unwrap();
        let mut ring = ring_for("ABC", geometry);
        assert_eq!(ring.capacity().number_of_circle(), 2);
        assert_eq!(
            ring.draw_payload(&pack("ABC")),
            Err(RingError::CapacityOverflow { row: 3, col: 3 })
        );
    }
}
