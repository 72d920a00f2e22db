//! Zone records as exchanged with the heritage backend.
//!
//! Field names follow the backend's database columns, so they are kept verbatim
//! and converted to [`Zone`] at the edge.

use serde::{Deserialize, Serialize};

use crate::zone::{CameraPose, LookAt, Zone, ZoneId, ZoneType};

/// Path of a building's zone list, relative to the API root.
pub fn zones_path(building: i64) -> String {
    format!("/api/v1/yapilar/{building}/ic-mekan-bolgeler")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub id: ZoneId,
    pub bolge_adi: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bolge_adi_en: Option<String>,
    #[serde(default)]
    pub bolge_turu: String,
    #[serde(default)]
    pub aciklama: Option<String>,
    #[serde(default)]
    pub giris_noktasi: bool,
    pub siralama: i64,
    pub gezinti_suresi: f64,
    pub kamera_lon: f64,
    pub kamera_lat: f64,
    pub kamera_height: f64,
    #[serde(default)]
    pub kamera_heading: f64,
    #[serde(default)]
    pub kamera_pitch: f64,
    #[serde(default)]
    pub kamera_roll: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hedef_lon: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hedef_lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hedef_height: Option<f64>,
}

impl From<ZoneRecord> for Zone {
    fn from(r: ZoneRecord) -> Self {
        // A target is only usable when all three coordinates are present.
        let target_pose = match (r.hedef_lon, r.hedef_lat, r.hedef_height) {
            (Some(longitude), Some(latitude), Some(height)) => Some(LookAt {
                longitude,
                latitude,
                height,
            }),
            _ => None,
        };

        Zone {
            id: r.id,
            name: r.bolge_adi,
            name_en: r.bolge_adi_en,
            short_description: r.aciklama.unwrap_or_default(),
            zone_type: ZoneType::from_wire(&r.bolge_turu),
            is_entrance: r.giris_noktasi,
            order: r.siralama,
            dwell_seconds: r.gezinti_suresi,
            camera_pose: CameraPose {
                longitude: r.kamera_lon,
                latitude: r.kamera_lat,
                height: r.kamera_height,
                heading: r.kamera_heading,
                pitch: r.kamera_pitch,
                roll: r.kamera_roll.unwrap_or(0.0),
            },
            target_pose,
        }
    }
}

impl From<&Zone> for ZoneRecord {
    fn from(z: &Zone) -> Self {
        ZoneRecord {
            id: z.id.clone(),
            bolge_adi: z.name.clone(),
            bolge_adi_en: z.name_en.clone(),
            bolge_turu: z.zone_type.wire_code().to_string(),
            aciklama: Some(z.short_description.clone()),
            giris_noktasi: z.is_entrance,
            siralama: z.order,
            gezinti_suresi: z.dwell_seconds,
            kamera_lon: z.camera_pose.longitude,
            kamera_lat: z.camera_pose.latitude,
            kamera_height: z.camera_pose.height,
            kamera_heading: z.camera_pose.heading,
            kamera_pitch: z.camera_pose.pitch,
            kamera_roll: Some(z.camera_pose.roll),
            hedef_lon: z.target_pose.map(|t| t.longitude),
            hedef_lat: z.target_pose.map(|t| t.latitude),
            hedef_height: z.target_pose.map(|t| t.height),
        }
    }
}
