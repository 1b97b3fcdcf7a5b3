//! Sprite assets
//!
//! The renderer asks "is this image ready" before placing a sprite and
//! falls back to flat shapes when it is not. Loading itself belongs to the
//! host (an `HtmlImageElement` per asset on the web).

use serde::Serialize;

/// Every image the game can draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AssetId {
    Astronaut,
    Ship,
    CinematicShip,
    RescueShip,
    SpaceBackground,
    CabinBackground,
    RescueCabinBackground,
    HullBackground,
    Computer,
    Gate,
}

impl AssetId {
    pub const ALL: [AssetId; 10] = [
        AssetId::Astronaut,
        AssetId::Ship,
        AssetId::CinematicShip,
        AssetId::RescueShip,
        AssetId::SpaceBackground,
        AssetId::CabinBackground,
        AssetId::RescueCabinBackground,
        AssetId::HullBackground,
        AssetId::Computer,
        AssetId::Gate,
    ];

    /// Path relative to the page
    pub fn path(self) -> &'static str {
        match self {
            AssetId::Astronaut => "assets/astronaut.png",
            AssetId::Ship => "assets/ship.png",
            AssetId::CinematicShip => "assets/cinematic_ship.png",
            AssetId::RescueShip => "assets/rescue_ship.png",
            AssetId::SpaceBackground => "assets/space.png",
            AssetId::CabinBackground => "assets/cabin.png",
            AssetId::RescueCabinBackground => "assets/rescue_cabin.png",
            AssetId::HullBackground => "assets/hull.png",
            AssetId::Computer => "assets/computer.png",
            AssetId::Gate => "assets/gate.png",
        }
    }
}

/// Readiness query the renderer depends on
pub trait AssetProvider {
    fn is_ready(&self, id: AssetId) -> bool;
}

/// Nothing loaded; everything renders as shapes
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAssets;

impl AssetProvider for NoAssets {
    fn is_ready(&self, _id: AssetId) -> bool {
        false
    }
}

/// Fixed readiness set, used natively and in tests
#[derive(Debug, Clone, Default)]
pub struct ReadySet {
    ready: Vec<AssetId>,
}

impl ReadySet {
    pub fn all() -> Self {
        Self {
            ready: AssetId::ALL.to_vec(),
        }
    }

    pub fn mark_ready(&mut self, id: AssetId) {
        if !self.ready.contains(&id) {
            self.ready.push(id);
        }
    }
}

impl AssetProvider for ReadySet {
    fn is_ready(&self, id: AssetId) -> bool {
        self.ready.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_are_unique() {
        let mut paths: Vec<_> = AssetId::ALL.iter().map(|a| a.path()).collect();
        paths.sort();
        paths.dedup();
        assert_eq!(paths.len(), AssetId::ALL.len());
    }

    #[test]
    fn test_ready_set() {
        let mut set = ReadySet::default();
        assert!(!set.is_ready(AssetId::Ship));
        set.mark_ready(AssetId::Ship);
        set.mark_ready(AssetId::Ship);
        assert!(set.is_ready(AssetId::Ship));
        assert!(!NoAssets.is_ready(AssetId::Ship));
        assert!(ReadySet::all().is_ready(AssetId::Gate));
    }
}
