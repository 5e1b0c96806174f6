mod ring;

pub use ring::{Ring, DARK, LIGHT};

use tracing::{debug, trace};

use crate::common::{pack, CapacityModel, GeometryParams, RingResult};

pub struct RingBuilder<'a> {
    data: &'a str,
    geometry: GeometryParams,
}

impl<'a> RingBuilder<'a> {
    pub fn new(data: &'a str) -> Self {
        Self { data, geometry: GeometryParams::default() }
    }

    pub fn data(&mut self, data: &'a str) -> &mut Self {
        self.data = data;
        self
    }

    pub fn geometry(&mut self, geometry: GeometryParams) -> &mut Self {
        self.geometry = geometry;
        self
    }

    /// Derived geometry constants for the current payload.
    pub fn capacity(&self) -> CapacityModel {
        CapacityModel::plan(&self.geometry, self.data.len())
    }

    /// Cheap pre-check against the geometry's byte budget. [`RingBuilder::build`] checks
    /// again while placing bits, so skipping this never yields a corrupt ring.
    pub fn exceeds_capacity(&self) -> bool {
        self.capacity().exceeds_capacity(self.data.len())
    }

    pub fn metadata(&self) -> String {
        let g = &self.geometry;
        format!(
            "{{ Module: {}px, Radius: {}px..{}px, Gain: {}, Bytes: {} }}",
            g.module_size(),
            g.min_radius(),
            g.max_radius(),
            g.pixel_gain(),
            self.data.len()
        )
    }
}


impl RingBuilder<'_> {
    pub fn build(&self) -> RingResult<Ring> {
        debug!("Generating ring {}...", self.metadata());

        let bits = pack(self.data);
        let capacity = CapacityModel::plan(&self.geometry, bits.len());
        trace!(?capacity, "Planned capacity");

        let mut ring = Ring::new(self.geometry, capacity);

        debug!("Drawing sync patterns...");
        ring.draw_vertical_zebras();
        ring.draw_radial_zebra();
        ring.draw_inner_rings();

        debug!("Drawing data region...");
        ring.draw_payload(&bits)?;

        debug!(
            rings = ring.rows(),
            modules = ring.cols(),
            dark = ring.count_dark_modules(),
            "Ring generated"
        );

        Ok(ring)
    }
}
