use std::collections::{HashMap, HashSet};

use crate::error::{TourError, ValidationError};
use crate::zone::{Zone, ZoneId};

/// Validated zone set of the building currently being toured.
///
/// Zones are kept in traversal order: ascending `order`, ties in the order they
/// were loaded. Positions handed out by the registry index that sequence.
#[derive(Debug, Default, Clone)]
pub struct ZoneRegistry {
    zones: Vec<Zone>,
    by_id: HashMap<ZoneId, usize>,
}

fn check_zone(zone: &Zone) -> Result<(), ValidationError> {
    if !zone.dwell_seconds.is_finite() || zone.dwell_seconds < 0.0 {
        return Err(ValidationError::InvalidDwell {
            id: zone.id.clone(),
            dwell_seconds: zone.dwell_seconds,
        });
    }
    zone.camera_pose.check().map_err(|reason| ValidationError::InvalidPose {
        id: zone.id.clone(),
        reason,
    })
}

impl ZoneRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the registry contents. On error the previous contents are kept.
    pub fn load(&mut self, zones: Vec<Zone>) -> Result<(), ValidationError> {
        let mut seen: HashSet<&ZoneId> = HashSet::with_capacity(zones.len());
        for zone in &zones {
            check_zone(zone)?;
            if !seen.insert(&zone.id) {
                return Err(ValidationError::DuplicateId(zone.id.clone()));
            }
        }

        let mut zones = zones;
        // `sort_by_key` is stable, which is what keeps equal orders in load order.
        zones.sort_by_key(|z| z.order);
        self.zones = zones;
        self.reindex();
        Ok(())
    }

    /// Adds one zone and returns its position. It goes after every zone that
    /// shares its `order`, so positions of earlier zones only shift when the
    /// new zone sorts before them.
    pub fn insert(&mut self, zone: Zone) -> Result<usize, ValidationError> {
        check_zone(&zone)?;
        if self.by_id.contains_key(&zone.id) {
            return Err(ValidationError::DuplicateId(zone.id));
        }
        let pos = self.zones.partition_point(|z| z.order <= zone.order);
        self.zones.insert(pos, zone);
        self.reindex();
        Ok(pos)
    }

    fn reindex(&mut self) {
        self.by_id = self
            .zones
            .iter()
            .enumerate()
            .map(|(pos, z)| (z.id.clone(), pos))
            .collect();
    }

    pub fn clear(&mut self) {
        self.zones.clear();
        self.by_id.clear();
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// Traversal sequence. Call again to restart.
    pub fn ordered(&self) -> std::slice::Iter<'_, Zone> {
        self.zones.iter()
    }

    pub fn at(&self, position: usize) -> Option<&Zone> {
        self.zones.get(position)
    }

    pub fn position_of(&self, id: &ZoneId) -> Result<usize, TourError> {
        self.by_id
            .get(id)
            .copied()
            .ok_or_else(|| TourError::NotFound(id.clone()))
    }

    pub fn by_id(&self, id: &ZoneId) -> Result<&Zone, TourError> {
        let pos = self.position_of(id)?;
        Ok(&self.zones[pos])
    }

    /// Position of the entrance zone.
    ///
    /// Several flagged zones: the one earliest in traversal order wins.
    /// No flagged zone: the first zone in traversal order.
    pub fn entrance_position(&self) -> Result<usize, TourError> {
        if self.zones.is_empty() {
            return Err(TourError::EmptyRegistry);
        }
        Ok(self.zones.iter().position(|z| z.is_entrance).unwrap_or(0))
    }

    pub fn entrance_zone(&self) -> Result<&Zone, TourError> {
        let pos = self.entrance_position()?;
        Ok(&self.zones[pos])
    }
}
