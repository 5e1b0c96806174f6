use std::f64::consts::PI;

use super::{cast::f64_to_u32, geometry::GeometryParams};

// Columns taken by the vertical sync stripes and the right marker
const SYNC_MODULES: usize = 4;

// Rings taken by the radial zebra, finder ring and black inner ring
pub const STRUCTURAL_RINGS: usize = 3;

pub(crate) fn min_perimeter(min_radius_px: u32) -> Option<u32> {
    f64_to_u32(2.0 * PI * min_radius_px as f64)
}

pub(crate) fn module_per_circle(module_size_px: u32, min_radius_px: u32) -> Option<usize> {
    if module_size_px == 0 {
        return None;
    }
    let perimeter = min_perimeter(min_radius_px)?;
    Some((perimeter / module_size_px) as usize)
}

// Capacity model
// Derived from the scaled geometry and the payload byte count
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct CapacityModel {
    min_perimeter_pixels: u32,
    module_per_circle: usize,
    byte_per_circle: usize,
    number_of_circle: usize,
    max_number_of_circle: usize,
}

impl CapacityModel {
    pub fn plan(geometry: &GeometryParams, byte_count: usize) -> Self {
        let module_px = geometry.module_size_px();
        let min_px = geometry.min_radius_px();
        let max_px = geometry.max_radius_px();

        // Cannot fail for a validated geometry
        let min_perimeter_pixels = min_perimeter(min_px).unwrap_or(u32::MAX);
        let module_per_circle = (min_perimeter_pixels / module_px) as usize;
        debug_assert!(module_per_circle > SYNC_MODULES + 8, "Ring too small for one byte");

        let byte_per_circle = (module_per_circle - SYNC_MODULES) / 8;
        let number_of_circle = byte_count / byte_per_circle + 1;
        let max_number_of_circle = ((max_px - min_px) / module_px) as usize;

        Self {
            min_perimeter_pixels,
            module_per_circle,
            byte_per_circle,
            number_of_circle,
            max_number_of_circle,
        }
    }

    pub(crate) fn with_number_of_circle(mut self, number_of_circle: usize) -> Self {
        self.number_of_circle = number_of_circle;
        self
    }

    pub fn min_perimeter_pixels(&self) -> u32 {
        self.min_perimeter_pixels
    }

    pub fn module_per_circle(&self) -> usize {
        self.module_per_circle
    }

    pub fn byte_per_circle(&self) -> usize {
        self.byte_per_circle
    }

    pub fn number_of_circle(&self) -> usize {
        self.number_of_circle
    }

    pub fn max_number_of_circle(&self) -> usize {
        self.max_number_of_circle
    }

    // Rings of a built grid, structural rings included
    pub fn total_rings(&self) -> usize {
        self.number_of_circle + STRUCTURAL_RINGS
    }

    pub fn max_bytes(&self) -> usize {
        self.max_number_of_circle.saturating_sub(STRUCTURAL_RINGS) * self.byte_per_circle
    }

    pub fn exceeds_capacity(&self, byte_len: usize) -> bool {
        byte_len > self.max_bytes()
    }

    // Data rings start right after the radial zebra at row 1
    pub fn last_data_row(&self) -> usize {
        self.number_of_circle.min(self.max_number_of_circle.saturating_sub(STRUCTURAL_RINGS))
    }
}
