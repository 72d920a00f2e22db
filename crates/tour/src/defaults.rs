//! Built-in zone list used when the backend cannot provide one.

use crate::zone::{BuildingId, CameraPose, LookAt, Zone, ZoneId, ZoneType};

/// Building the built-in zones belong to.
pub const MOLLA_HUSREV_MOSQUE: BuildingId = BuildingId(1);

#[allow(clippy::too_many_arguments)]
fn zone(
    id: i64,
    name: &str,
    name_en: &str,
    zone_type: ZoneType,
    order: i64,
    dwell_seconds: f64,
    camera: [f64; 5],
    target: [f64; 3],
    description: &str,
) -> Zone {
    let [longitude, latitude, height, heading, pitch] = camera;
    let [t_lon, t_lat, t_height] = target;
    Zone {
        id: ZoneId::Num(id),
        name: name.to_string(),
        name_en: Some(name_en.to_string()),
        short_description: description.to_string(),
        zone_type,
        is_entrance: zone_type == ZoneType::Entrance,
        order,
        dwell_seconds,
        camera_pose: CameraPose {
            longitude,
            latitude,
            height,
            heading,
            pitch,
            roll: 0.0,
        },
        target_pose: Some(LookAt {
            longitude: t_lon,
            latitude: t_lat,
            height: t_height,
        }),
    }
}

/// Interior zones of the Molla Hüsrev Mosque, in tour order.
pub fn molla_husrev_zones() -> Vec<Zone> {
    vec![
        zone(
            1,
            "Ana Giriş Kapısı",
            "Main Entrance",
            ZoneType::Entrance,
            1,
            5.0,
            [28.95925, 41.01345, 53.0, 0.0, -15.0],
            [28.95930, 41.01350, 51.0],
            "Main entrance of the mosque, starting point of the interior tour",
        ),
        zone(
            2,
            "Son Cemaat Yeri",
            "Last Congregation Area",
            ZoneType::Gallery,
            2,
            8.0,
            [28.95928, 41.01348, 54.0, 45.0, -20.0],
            [28.95933, 41.01353, 52.0],
            "Last congregation area after the entrance",
        ),
        zone(
            3,
            "İbadet Alanı",
            "Main Prayer Hall",
            ZoneType::MainHall,
            3,
            15.0,
            [28.95935, 41.01355, 55.0, 90.0, -30.0],
            [28.95940, 41.01360, 60.0],
            "Main prayer hall with dome and mihrab view",
        ),
        zone(
            4,
            "Mihrap",
            "Mihrab",
            ZoneType::MainHall,
            4,
            10.0,
            [28.95942, 41.01362, 53.0, 135.0, -10.0],
            [28.95945, 41.01365, 52.0],
            "Niche showing the qibla direction",
        ),
        zone(
            5,
            "Minber",
            "Minbar",
            ZoneType::MainHall,
            5,
            8.0,
            [28.95940, 41.01358, 54.0, 180.0, -25.0],
            [28.95945, 41.01363, 55.0],
            "Pulpit where the sermon is read",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::molla_husrev_zones;
    use crate::registry::ZoneRegistry;
    use crate::zone::ZoneId;

    #[test]
    fn defaults_form_a_valid_registry() {
        let mut reg = ZoneRegistry::new();
        reg.load(molla_husrev_zones()).unwrap();
        assert_eq!(reg.len(), 5);
        assert_eq!(reg.entrance_zone().unwrap().id, ZoneId::Num(1));
    }

    #[test]
    fn exactly_one_entrance() {
        let n = molla_husrev_zones().iter().filter(|z| z.is_entrance).count();
        assert_eq!(n, 1);
    }
}
