use std::f64::consts::PI;
use std::ops::RangeInclusive;

use image::{GrayImage, Luma};
use imageproc::region_labelling::{connected_components, Connectivity};

use crate::builder::{DARK, LIGHT};
use crate::common::f64_to_u32;

// Luma at or above which a pixel reads as light
pub const LUMA_THRESHOLD: u8 = 128;

// A disk covers π/4 of its bounding box
const DISK_FILL: RangeInclusive<f64> = 0.70..=0.86;

pub fn binarize(img: &GrayImage) -> GrayImage {
    GrayImage::from_fn(img.width(), img.height(), |x, y| {
        if img.get_pixel(x, y)[0] >= LUMA_THRESHOLD {
            Luma([LIGHT])
        } else {
            Luma([DARK])
        }
    })
}

// Region
// Area, centroid sums and bounding box of a labelled component
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Region {
    area: u64,
    sum_x: u64,
    sum_y: u64,
    left: u32,
    top: u32,
    right: u32,
    bottom: u32,
}

impl Region {
    fn new(x: u32, y: u32) -> Self {
        Self { area: 0, sum_x: 0, sum_y: 0, left: x, top: y, right: x, bottom: y }
    }

    fn accumulate(&mut self, x: u32, y: u32) {
        self.area += 1;
        self.sum_x += x as u64;
        self.sum_y += y as u64;
        self.left = self.left.min(x);
        self.top = self.top.min(y);
        self.right = self.right.max(x);
        self.bottom = self.bottom.max(y);
    }

    fn touches_border(&self, w: u32, h: u32) -> bool {
        self.left == 0 || self.top == 0 || self.right + 1 >= w || self.bottom + 1 >= h
    }

    fn is_disk_like(&self) -> bool {
        let bw = (self.right - self.left + 1) as u64;
        let bh = (self.bottom - self.top + 1) as u64;
        let (lo, hi) = (bw.min(bh), bw.max(bh));
        if hi - lo > hi / 10 + 2 {
            return false;
        }
        DISK_FILL.contains(&(self.area as f64 / (bw * bh) as f64))
    }

    fn centre(&self) -> (f64, f64) {
        (self.sum_x as f64 / self.area as f64, self.sum_y as f64 / self.area as f64)
    }

    fn radius(&self) -> f64 {
        (self.area as f64 / PI).sqrt()
    }
}

// Inner hole: the largest light component that is enclosed and round
fn find_hole(bin: &GrayImage) -> Option<Region> {
    let labels = connected_components(bin, Connectivity::Four, Luma([DARK]));

    let mut regions: Vec<Option<Region>> = Vec::new();
    for (x, y, l) in labels.enumerate_pixels() {
        let id = l[0] as usize;
        if id == 0 {
            continue;
        }
        if id >= regions.len() {
            regions.resize(id + 1, None);
        }
        regions[id].get_or_insert_with(|| Region::new(x, y)).accumulate(x, y);
    }

    let (w, h) = bin.dimensions();
    regions
        .into_iter()
        .flatten()
        .filter(|r| !r.touches_border(w, h) && r.is_disk_like())
        .max_by_key(|r| r.area)
}

#[cfg(test)]
mod region_tests {
    use image::{GrayImage, Luma};
    use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
    use imageproc::rect::Rect;

    use super::find_hole;
    use crate::builder::{DARK, LIGHT};

    #[test]
    fn test_find_hole() {
        let mut img = GrayImage::from_pixel(200, 200, Luma([LIGHT]));
        draw_filled_circle_mut(&mut img, (100, 100), 80, Luma([DARK]));
        draw_filled_circle_mut(&mut img, (100, 100), 50, Luma([LIGHT]));
        // Enclosed but not round
        draw_filled_rect_mut(&mut img, Rect::at(60, 155).of_size(80, 10), Luma([LIGHT]));

        let hole = find_hole(&img).unwrap();
        let (cx, cy) = hole.centre();
        assert!((cx - 100.0).abs() < 0.5, "{cx}");
        assert!((cy - 100.0).abs() < 0.5, "{cy}");
        assert!((hole.radius() - 50.0).abs() < 1.5, "{}", hole.radius());
    }

    #[test]
    fn test_no_hole() {
        let mut img = GrayImage::from_pixel(100, 100, Luma([LIGHT]));
        assert_eq!(find_hole(&img), None);
        // Open ring, hole leaks to the border
        draw_filled_circle_mut(&mut img, (50, 50), 40, Luma([DARK]));
        draw_filled_circle_mut(&mut img, (50, 50), 20, Luma([LIGHT]));
        draw_filled_rect_mut(&mut img, Rect::at(45, 0).of_size(10, 50), Luma([LIGHT]));
        assert_eq!(find_hole(&img), None);
    }
}

// Ring location
// Centre and radii of a ring symbol in a binarized image
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingLocation {
    pub centre: (f64, f64),
    pub hole_radius: f64,
    pub outer_radius: f64,
}

impl RingLocation {
    // Column 0 is dark in every ring, so a walk along its centre line crosses
    // the whole symbol without leaving dark pixels
    pub fn locate(bin: &GrayImage, module_per_circle: usize, module_size: f64) -> Option<Self> {
        let hole = find_hole(bin)?;
        let centre = hole.centre();
        let hole_radius = hole.radius();

        let angle = (180.0 / module_per_circle as f64).to_radians();
        let outer_radius = walk_outward(bin, centre, hole_radius, angle, module_size)?;

        Some(Self { centre, hole_radius, outer_radius })
    }

    pub fn ring_count(&self, module_size: f64) -> usize {
        ((self.outer_radius - self.hole_radius) / module_size).round().max(0.0) as usize
    }

    // Middle pixel of module (ring, angle in degrees), None when off the image
    pub fn sample(&self, bin: &GrayImage, module_size: f64, ring: usize, deg: f64) -> Option<u8> {
        let r = self.outer_radius - (ring as f64 + 0.5) * module_size;
        let (sin, cos) = deg.to_radians().sin_cos();
        let x = f64_to_u32(self.centre.0 + r * cos)?;
        let y = f64_to_u32(self.centre.1 + r * sin)?;
        bin.get_pixel_checked(x, y).map(|p| p[0])
    }
}

// First light radius after a run of dark pixels, starting from the hole edge
fn walk_outward(
    bin: &GrayImage,
    centre: (f64, f64),
    from: f64,
    angle: f64,
    slack: f64,
) -> Option<f64> {
    let (sin, cos) = angle.sin_cos();
    let mut seen_dark = false;
    let mut r = from.floor();
    loop {
        let x = f64_to_u32(centre.0 + r * cos)?;
        let y = f64_to_u32(centre.1 + r * sin)?;
        let px = bin.get_pixel_checked(x, y)?[0];
        if px == DARK {
            seen_dark = true;
        } else if seen_dark {
            return Some(r);
        } else if r > from + slack {
            return None;
        }
        r += 1.0;
    }
}
