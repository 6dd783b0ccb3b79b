use glam::Vec3;
use islewalk_common::{EntityId, TileCoord};
use islewalk_motion::MovementController;

/// Read-only view of anything that walks. Renderers and debug overlays use it.
pub trait Agent {
    fn id(&self) -> EntityId;

    fn controller(&self) -> &MovementController;

    fn position(&self) -> Vec3 {
        self.controller().position()
    }

    fn is_moving(&self) -> bool {
        self.controller().is_moving()
    }

    /// Route being followed, for path visualisation.
    fn path(&self) -> &[TileCoord] {
        self.controller().path()
    }
}
