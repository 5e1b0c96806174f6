use super::bits::BYTE_SIZE;

pub const DATA_START_ROW: usize = 1;
pub const DATA_START_COL: usize = 3;

// Iterator over module positions for payload bits in the data region
// Walks row-major from (1, 3), one column per bit. After every byte it moves to the
// next ring when another byte would run past the end column. Bounds are left to the
// caller, the walk never ends on its own
//------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct DataRegionIter {
    r: usize,
    c: usize,
    end_col: usize,
    bit: usize,
}

impl DataRegionIter {
    pub fn new(module_per_circle: usize) -> Self {
        Self { r: DATA_START_ROW, c: DATA_START_COL, end_col: module_per_circle - 2, bit: 0 }
    }

    pub fn end_col(&self) -> usize {
        self.end_col
    }
}

impl Iterator for DataRegionIter {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let res = (self.r, self.c);
        self.c += 1;
        self.bit += 1;
        if self.bit == BYTE_SIZE {
            self.bit = 0;
            if self.end_col < self.c + BYTE_SIZE {
                self.r += 1;
                self.c = DATA_START_COL;
            }
        }
        Some(res)
    }
}
