//! Interior zone model.
//!
//! A zone is a named camera viewpoint inside one building. Angles are in
//! degrees, heights in meters, positions in WGS84 longitude/latitude.

use std::fmt;
use std::str::FromStr;

use foundation::math::{Geodetic, is_valid_lon_lat, look_at_heading_pitch};
use serde::{Deserialize, Serialize};

/// Identifier of a heritage building.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildingId(pub i64);

impl fmt::Display for BuildingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BuildingId {
    fn from(v: i64) -> Self {
        BuildingId(v)
    }
}

/// Zone identifier, unique within a building. Backends use either integers or strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneId {
    Num(i64),
    Name(String),
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneId::Num(n) => write!(f, "{n}"),
            ZoneId::Name(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ZoneId {
    fn from(v: i64) -> Self {
        ZoneId::Num(v)
    }
}

impl From<&str> for ZoneId {
    fn from(v: &str) -> Self {
        ZoneId::Name(v.to_string())
    }
}

impl From<String> for ZoneId {
    fn from(v: String) -> Self {
        ZoneId::Name(v)
    }
}

impl FromStr for ZoneId {
    type Err = std::convert::Infallible;

    /// Numeric text becomes [`ZoneId::Num`], anything else a [`ZoneId::Name`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Ok(match s.parse::<i64>() {
            Ok(n) => ZoneId::Num(n),
            Err(_) => ZoneId::Name(s.to_string()),
        })
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ZoneType {
    Entrance,
    MainHall,
    Gallery,
    Corridor,
    Stair,
    DomeBase,
    #[default]
    Other,
}

impl ZoneType {
    /// Maps the backend's zone type codes; unknown codes become [`ZoneType::Other`].
    pub fn from_wire(code: &str) -> Self {
        match code.trim() {
            "giris" => ZoneType::Entrance,
            "ana_mekan" => ZoneType::MainHall,
            "galeri" => ZoneType::Gallery,
            "koridor" => ZoneType::Corridor,
            "merdiven" => ZoneType::Stair,
            "kubbe" => ZoneType::DomeBase,
            _ => ZoneType::Other,
        }
    }

    pub fn wire_code(self) -> &'static str {
        match self {
            ZoneType::Entrance => "giris",
            ZoneType::MainHall => "ana_mekan",
            ZoneType::Gallery => "galeri",
            ZoneType::Corridor => "koridor",
            ZoneType::Stair => "merdiven",
            ZoneType::DomeBase => "kubbe",
            ZoneType::Other => "diger",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ZoneType::Entrance => "Entrance",
            ZoneType::MainHall => "Main hall",
            ZoneType::Gallery => "Gallery",
            ZoneType::Corridor => "Corridor",
            ZoneType::Stair => "Stair",
            ZoneType::DomeBase => "Under the dome",
            ZoneType::Other => "Zone",
        }
    }
}

/// Full viewer placement.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
    pub heading: f64,
    pub pitch: f64,
    #[serde(default)]
    pub roll: f64,
}

impl CameraPose {
    pub fn position(&self) -> Geodetic {
        Geodetic::from_degrees(self.longitude, self.latitude, self.height)
    }

    /// Checks that every component is finite and the position is on the globe.
    pub fn check(&self) -> Result<(), &'static str> {
        if !is_valid_lon_lat(self.longitude, self.latitude, self.height) {
            return Err("position out of range");
        }
        if !(self.heading.is_finite() && self.pitch.is_finite() && self.roll.is_finite()) {
            return Err("orientation is not finite");
        }
        Ok(())
    }

    /// Same position, oriented towards `target`. Roll is kept.
    pub fn aimed_at(&self, target: &LookAt) -> CameraPose {
        let (heading, pitch) = look_at_heading_pitch(self.position(), target.position());
        CameraPose {
            heading,
            pitch,
            ..*self
        }
    }
}

/// A look-at point used for framing.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookAt {
    pub longitude: f64,
    pub latitude: f64,
    pub height: f64,
}

impl LookAt {
    pub fn position(&self) -> Geodetic {
        Geodetic::from_degrees(self.longitude, self.latitude, self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: ZoneId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(default)]
    pub short_description: String,
    #[serde(rename = "type", default)]
    pub zone_type: ZoneType,
    #[serde(default)]
    pub is_entrance: bool,
    pub order: i64,
    pub dwell_seconds: f64,
    pub camera_pose: CameraPose,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_pose: Option<LookAt>,
}

impl Zone {
    /// Display name, preferring the English name when present.
    pub fn display_name(&self) -> &str {
        self.name_en.as_deref().unwrap_or(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::{CameraPose, LookAt, Zone, ZoneId, ZoneType};

    fn pose() -> CameraPose {
        CameraPose {
            longitude: 28.95925,
            latitude: 41.01345,
            height: 53.0,
            heading: 0.0,
            pitch: -15.0,
            roll: 0.0,
        }
    }

    #[test]
    fn zone_id_parses_numbers_and_names() {
        assert_eq!("7".parse::<ZoneId>().unwrap(), ZoneId::Num(7));
        assert_eq!(" mihrab ".parse::<ZoneId>().unwrap(), ZoneId::from("mihrab"));
        assert_eq!(ZoneId::from(3).to_string(), "3");
    }

    #[test]
    fn zone_id_deserializes_untagged() {
        let ids: Vec<ZoneId> = serde_json::from_str(r#"[4, "dome"]"#).unwrap();
        assert_eq!(ids, vec![ZoneId::Num(4), ZoneId::Name("dome".into())]);
    }

    #[test]
    fn wire_codes_map_both_ways() {
        for ty in [
            ZoneType::Entrance,
            ZoneType::MainHall,
            ZoneType::Gallery,
            ZoneType::Corridor,
            ZoneType::Stair,
            ZoneType::DomeBase,
        ] {
            assert_eq!(ZoneType::from_wire(ty.wire_code()), ty);
        }
        assert_eq!(ZoneType::from_wire("avlu"), ZoneType::Other);
    }

    #[test]
    fn pose_check_rejects_bad_values() {
        assert!(pose().check().is_ok());
        let mut bad = pose();
        bad.latitude = 95.0;
        assert_eq!(bad.check(), Err("position out of range"));
        let mut bad = pose();
        bad.heading = f64::INFINITY;
        assert_eq!(bad.check(), Err("orientation is not finite"));
    }

    #[test]
    fn aimed_at_keeps_position_and_roll() {
        let mut p = pose();
        p.roll = 2.0;
        let target = LookAt {
            longitude: 28.95930,
            latitude: 41.01350,
            height: 51.0,
        };
        let aimed = p.aimed_at(&target);
        assert_eq!(aimed.longitude, p.longitude);
        assert_eq!(aimed.height, p.height);
        assert_eq!(aimed.roll, 2.0);
        assert!(aimed.pitch < 0.0);
        assert!(aimed.heading > 0.0 && aimed.heading < 90.0);
    }

    #[test]
    fn zone_json_uses_camel_case_and_defaults() {
        let zone: Zone = serde_json::from_str(
            r#"{
                "id": 1,
                "name": "Ana Giriş Kapısı",
                "type": "entrance",
                "isEntrance": true,
                "order": 1,
                "dwellSeconds": 5,
                "cameraPose": {"longitude": 28.95925, "latitude": 41.01345, "height": 53,
                               "heading": 0, "pitch": -15}
            }"#,
        )
        .unwrap();
        assert_eq!(zone.zone_type, ZoneType::Entrance);
        assert_eq!(zone.camera_pose.roll, 0.0);
        assert!(zone.target_pose.is_none());
        assert_eq!(zone.display_name(), "Ana Giriş Kapısı");
    }
}
