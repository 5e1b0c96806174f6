use super::{capacity::module_per_circle, RingError, RingResult};

// Minimum modules per ring: vertical sync (3) + one byte + end column + right marker
pub const MIN_MODULE_PER_CIRCLE: usize = 13;

pub const DEFAULT_MARGIN_PIXELS: u32 = 10;

// Geometry params
// Sizes are given in logical units and multiplied by the pixel gain
//------------------------------------------------------------------------------

#[derive(Debug, PartialEq, Eq, Copy, Clone)]
pub struct GeometryParams {
    module_size: u32,
    min_radius: u32,
    max_radius: u32,
    pixel_gain: u32,
    margin: u32,
}

impl GeometryParams {
    pub fn new(
        module_size: u32,
        min_radius: u32,
        max_radius: u32,
        pixel_gain: u32,
    ) -> RingResult<Self> {
        let params = Self {
            module_size,
            min_radius,
            max_radius,
            pixel_gain,
            margin: DEFAULT_MARGIN_PIXELS,
        };
        params.validate()?;
        Ok(params)
    }

    pub fn with_margin(mut self, margin: u32) -> RingResult<Self> {
        self.margin = margin;
        self.validate()?;
        Ok(self)
    }

    fn validate(&self) -> RingResult<()> {
        if self.module_size == 0 {
            return Err(RingError::InvalidGeometry("module size must be positive"));
        }
        if self.min_radius == 0 {
            return Err(RingError::InvalidGeometry("minimum radius must be positive"));
        }
        if self.pixel_gain == 0 {
            return Err(RingError::InvalidGeometry("pixel gain must be positive"));
        }
        if self.min_radius >= self.max_radius {
            return Err(RingError::InvalidGeometry(
                "minimum radius must be smaller than maximum radius",
            ));
        }

        // Canvas side and its centre are handed to the drawing routines as i32
        let canvas = self
            .max_radius
            .checked_mul(self.pixel_gain)
            .and_then(|r| r.checked_add(self.margin))
            .and_then(|r| r.checked_mul(2))
            .filter(|&side| side <= i32::MAX as u32);
        if canvas.is_none() || self.module_size.checked_mul(self.pixel_gain).is_none() {
            return Err(RingError::InvalidGeometry("scaled geometry overflows"));
        }

        let Some(m) = module_per_circle(self.module_size_px(), self.min_radius_px()) else {
            return Err(RingError::InvalidGeometry("scaled geometry overflows"));
        };
        if m < MIN_MODULE_PER_CIRCLE {
            return Err(RingError::InvalidGeometry("inner circumference too small for one byte"));
        }
        Ok(())
    }

    pub fn module_size(&self) -> u32 {
        self.module_size
    }

    pub fn min_radius(&self) -> u32 {
        self.min_radius
    }

    pub fn max_radius(&self) -> u32 {
        self.max_radius
    }

    pub fn pixel_gain(&self) -> u32 {
        self.pixel_gain
    }

    pub fn margin(&self) -> u32 {
        self.margin
    }

    // Scaled sizes in pixels, overflow is ruled out by validation
    pub fn module_size_px(&self) -> u32 {
        self.module_size * self.pixel_gain
    }

    pub fn min_radius_px(&self) -> u32 {
        self.min_radius * self.pixel_gain
    }

    pub fn max_radius_px(&self) -> u32 {
        self.max_radius * self.pixel_gain
    }

    pub fn canvas_size(&self) -> u32 {
        2 * (self.margin + self.max_radius_px())
    }
}

impl Default for GeometryParams {
    fn default() -> Self {
        Self {
            module_size: 8,
            min_radius: 80,
            max_radius: 160,
            pixel_gain: 10,
            margin: DEFAULT_MARGIN_PIXELS,
        }
    }
}

#[cfg(test)]
mod geometry_tests {
    use test_case::test_case;

    use super::GeometryParams;
    use crate::common::RingError;

    #[test]
    fn test_default_is_valid() {
        let params = GeometryParams::default();
        assert_eq!(GeometryParams::new(8, 80, 160, 10), Ok(params));
        assert_eq!(params.module_size_px(), 80);
        assert_eq!(params.min_radius_px(), 800);
        assert_eq!(params.max_radius_px(), 1600);
        assert_eq!(params.canvas_size(), 3220);
    }

    #[test]
    fn test_margin() {
        let params = GeometryParams::new(8, 80, 160, 1).unwrap().with_margin(0).unwrap();
        assert_eq!(params.margin(), 0);
        assert_eq!(params.canvas_size(), 320);
    }

    #[test_case(0, 80, 160, 10, "module size must be positive")]
    #[test_case(8, 0, 160, 10, "minimum radius must be positive")]
    #[test_case(8, 80, 160, 0, "pixel gain must be positive")]
    #[test_case(8, 160, 160, 10, "minimum radius must be smaller than maximum radius")]
    #[test_case(8, 161, 160, 10, "minimum radius must be smaller than maximum radius")]
    #[test_case(8, 80, 160, u32::MAX, "scaled geometry overflows")]
    #[test_case(8, 80, u32::MAX, 1, "scaled geometry overflows")]
    #[test_case(u32::MAX, 80, 160, 2, "scaled geometry overflows")]
    #[test_case(1, 700_000_000, 1_000_000_000, 1, "scaled geometry overflows")]
    #[test_case(8, 16, 160, 1, "inner circumference too small for one byte")]
    #[test_case(80, 81, 160, 1, "inner circumference too small for one byte")]
    fn test_invalid(module: u32, min: u32, max: u32, gain: u32, reason: &'static str) {
        assert_eq!(
            GeometryParams::new(module, min, max, gain),
            Err(RingError::InvalidGeometry(reason))
        );
    }

    #[test]
    fn test_margin_overflow() {
        let params = GeometryParams::new(8, 80, 160, 1).unwrap();
        assert_eq!(
            params.with_margin(u32::MAX),
            Err(RingError::InvalidGeometry("scaled geometry overflows"))
        );
    }
}
