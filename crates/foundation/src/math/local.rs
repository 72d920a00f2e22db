use super::{Ecef, Geodetic, geodetic_to_ecef};

/// Local East-North-Up coordinates (meters).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Enu {
    pub east: f64,
    pub north: f64,
    pub up: f64,
}

impl Enu {
    pub fn new(east: f64, north: f64, up: f64) -> Self {
        Self { east, north, up }
    }

    /// Compass heading of this offset in degrees, clockwise from north in `[0, 360)`.
    pub fn heading_deg(&self) -> f64 {
        self.east.atan2(self.north).to_degrees().rem_euclid(360.0)
    }

    /// Elevation angle in degrees; negative when the offset points downwards.
    pub fn pitch_deg(&self) -> f64 {
        let horizontal = (self.east * self.east + self.north * self.north).sqrt();
        self.up.atan2(horizontal).to_degrees()
    }
}

pub fn ecef_to_enu(point: Ecef, origin: Geodetic) -> Enu {
    let origin_ecef = geodetic_to_ecef(origin);
    let dx = point.x - origin_ecef.x;
    let dy = point.y - origin_ecef.y;
    let dz = point.z - origin_ecef.z;

    let sin_lat = origin.lat_rad.sin();
    let cos_lat = origin.lat_rad.cos();
    let sin_lon = origin.lon_rad.sin();
    let cos_lon = origin.lon_rad.cos();

    let east = -sin_lon * dx + cos_lon * dy;
    let north = -sin_lat * cos_lon * dx - sin_lat * sin_lon * dy + cos_lat * dz;
    let up = cos_lat * cos_lon * dx + cos_lat * sin_lon * dy + sin_lat * dz;

    Enu::new(east, north, up)
}

/// Heading and pitch (degrees) of a camera at `eye` looking at `target`.
pub fn look_at_heading_pitch(eye: Geodetic, target: Geodetic) -> (f64, f64) {
    let offset = ecef_to_enu(geodetic_to_ecef(target), eye);
    (offset.heading_deg(), offset.pitch_deg())
}

#[cfg(test)]
mod tests {
    use super::{Enu, ecef_to_enu, look_at_heading_pitch};
    use crate::math::{Geodetic, geodetic_to_ecef};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    #[test]
    fn enu_zero_at_origin() {
        let origin = Geodetic::new(0.1, -0.2, 35.0);
        let enu = ecef_to_enu(geodetic_to_ecef(origin), origin);
        assert_close(enu.east, 0.0, 1e-9);
        assert_close(enu.north, 0.0, 1e-9);
        assert_close(enu.up, 0.0, 1e-9);
    }

    #[test]
    fn heading_follows_compass_convention() {
        assert_close(Enu::new(0.0, 1.0, 0.0).heading_deg(), 0.0, 1e-9);
        assert_close(Enu::new(1.0, 0.0, 0.0).heading_deg(), 90.0, 1e-9);
        assert_close(Enu::new(0.0, -1.0, 0.0).heading_deg(), 180.0, 1e-9);
        assert_close(Enu::new(-1.0, 0.0, 0.0).heading_deg(), 270.0, 1e-9);
    }

    #[test]
    fn pitch_is_negative_when_looking_down() {
        assert_close(Enu::new(0.0, 10.0, -10.0).pitch_deg(), -45.0, 1e-9);
        assert_close(Enu::new(0.0, 0.0, 5.0).pitch_deg(), 90.0, 1e-9);
    }

    #[test]
    fn look_at_north_east_and_below() {
        let eye = Geodetic::from_degrees(28.95925, 41.01345, 53.0);
        let target = Geodetic::from_degrees(28.95930, 41.01350, 51.0);
        let (heading, pitch) = look_at_heading_pitch(eye, target);
        assert!(heading > 0.0 && heading < 90.0, "heading {heading}");
        assert!(pitch < 0.0 && pitch > -30.0, "pitch {pitch}");
    }
}
