use image::{GrayImage, Luma, Rgb, RgbImage};
use imageproc::{
    distance_transform::Norm,
    drawing::{draw_filled_circle_mut, draw_polygon_mut},
    morphology::open,
    point::Point,
};
use tracing::debug;

use crate::builder::{Ring, DARK, LIGHT};
use crate::common::{f64_to_i32, GeometryParams};

// Radius of the disk used to open the final image
pub const SMOOTHING_RADIUS: u8 = 5;

// Max arc length in pixels between two polygon vertices of a wedge
const ARC_RESOLUTION: f64 = 2.0;

pub const DEFAULT_INK: Rgb<u8> = Rgb([232, 51, 0]);

// Ring renderer
// Draws rings from the outermost inward. Each ring paints its dark modules as
// full sectors, then a light disk one module smaller erases everything inside,
// leaving only the annular segments of that ring
//------------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct RingRenderer {
    geometry: GeometryParams,
}

impl RingRenderer {
    pub fn new(geometry: GeometryParams) -> Self {
        Self { geometry }
    }

    pub fn render(&self, ring: &Ring) -> GrayImage {
        let g = &self.geometry;
        let size = g.canvas_size();
        let centre = ((size / 2) as i32, (size / 2) as i32);
        let module_sz = g.module_size_px() as i32;
        let min_radius = g.min_radius_px() as i32;

        debug!(size, rings = ring.rows(), "Rendering ring...");

        let mut canvas = GrayImage::from_pixel(size, size, Luma([LIGHT]));
        let mut radius = g.max_radius_px() as i32;
        draw_filled_circle_mut(&mut canvas, centre, radius, Luma([LIGHT]));

        let angle_step = 360.0 / ring.cols() as f64;
        let angles = (0..ring.cols()).map(|c| angle_step * c as f64).collect::<Vec<_>>();

        let mut circle = 0;
        while radius >= min_radius && circle < ring.rows() {
            for (&angle, &m) in angles.iter().zip(ring.circle(circle)) {
                if m == DARK {
                    draw_wedge(&mut canvas, centre, radius, angle, angle + angle_step);
                }
            }

            radius -= module_sz;
            circle += 1;

            if radius > 0 {
                draw_filled_circle_mut(&mut canvas, centre, radius, Luma([LIGHT]));
            }
        }

        if circle < ring.rows() {
            debug!(drawn = circle, rings = ring.rows(), "Ran out of radius before last ring");
        }

        debug!("Smoothing ring edges...");
        open(&canvas, Norm::L2, SMOOTHING_RADIUS)
    }
}

// Filled sector of a circle between two angles in degrees. Angles grow with y
// pointing down, i.e. clockwise on screen
fn draw_wedge(canvas: &mut GrayImage, centre: (i32, i32), radius: i32, start: f64, end: f64) {
    let (cx, cy) = centre;
    let r = radius as f64;
    let arc_len = (end - start).to_radians() * r;
    let segments = (arc_len / ARC_RESOLUTION).ceil().max(1.0) as usize;

    let mut poly = Vec::with_capacity(segments + 2);
    poly.push(Point::new(cx, cy));
    for i in 0..=segments {
        let theta = (start + (end - start) * i as f64 / segments as f64).to_radians();
        let (Some(dx), Some(dy)) = (f64_to_i32(r * theta.cos()), f64_to_i32(r * theta.sin()))
        else {
            continue;
        };
        let p = Point::new(cx + dx, cy + dy);
        if poly.last() != Some(&p) {
            poly.push(p);
        }
    }

    // Polygon fill rejects a closed vertex list and needs an area
    if poly.len() < 3 || poly.first() == poly.last() {
        return;
    }
    draw_polygon_mut(canvas, &poly, Luma([DARK]));
}

// Render
//------------------------------------------------------------------------------

impl Ring {
    pub fn render(&self) -> GrayImage {
        RingRenderer::new(self.geometry()).render(self)
    }

    pub fn to_image(&self) -> RgbImage {
        self.to_image_with_ink(DEFAULT_INK)
    }

    pub fn to_image_with_ink(&self, ink: Rgb<u8>) -> RgbImage {
        let gray = self.render();
        RgbImage::from_fn(gray.width(), gray.height(), |x, y| {
            if gray.get_pixel(x, y)[0] < 128 {
                ink
            } else {
                Rgb([LIGHT, LIGHT, LIGHT])
            }
        })
    }
}
