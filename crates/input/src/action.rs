use glam::Vec3;

/// A high-level action produced by whatever front end is driving the session.
///
/// Pointer picks arrive already resolved to a world position; ray casting
/// against the terrain happens in the front end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    /// Send the player towards the picked point.
    PointerPick(Vec3),
    /// Orbit the camera counter-clockwise around the player.
    OrbitLeft,
    /// Orbit the camera clockwise around the player.
    OrbitRight,
    RaiseCamera,
    LowerCamera,
    /// Raw scroll delta; positive moves the camera away.
    Zoom(f32),
    /// Rebuild the island from a fresh seed.
    Regenerate,
    AddNpc,
    RemoveNpc,
    /// No-op (used for input mapping that hasn't been bound yet).
    Noop,
}

impl Action {
    /// True for actions handled entirely by the camera.
    pub fn is_camera(&self) -> bool {
        matches!(
            self,
            Action::OrbitLeft
                | Action::OrbitRight
                | Action::RaiseCamera
                | Action::LowerCamera
                | Action::Zoom(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_pick_carries_position() {
        let a = Action::PointerPick(Vec3::new(1.0, 0.0, 2.0));
        assert!(matches!(a, Action::PointerPick(p) if p.z == 2.0));
        assert!(!a.is_camera());
    }

    #[test]
    fn camera_actions() {
        assert!(Action::OrbitLeft.is_camera());
        assert!(Action::Zoom(-3.0).is_camera());
        assert!(Action::LowerCamera.is_camera());
        assert!(!Action::Regenerate.is_camera());
        assert!(!Action::AddNpc.is_camera());
        assert!(!Action::Noop.is_camera());
    }
}
