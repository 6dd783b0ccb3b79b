use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial orbit angle in radians.
    pub angle: f32,
    pub height: f32,
    pub distance: f32,
    /// Radians per orbit action.
    pub rotation_speed: f32,
    pub height_change_speed: f32,
    pub zoom_speed: f32,
    pub min_height: f32,
    pub max_height: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            angle: 0.0,
            height: 2.0,
            distance: 5.0,
            rotation_speed: 0.02,
            height_change_speed: 0.05,
            zoom_speed: 0.1,
            min_height: 1.0,
            max_height: 10.0,
            min_zoom: 2.0,
            max_zoom: 10.0,
        }
    }
}

/// Third-person camera orbiting a target (the player).
/// Purely presentational; it never influences simulation state.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowCamera {
    pub angle: f32,
    pub height: f32,
    pub distance: f32,
    target: Vec3,
    config: CameraConfig,
}

impl Default for FollowCamera {
    fn default() -> Self {
        Self::new(CameraConfig::default())
    }
}

impl FollowCamera {
    pub fn new(config: CameraConfig) -> Self {
        Self {
            angle: config.angle,
            height: config.height.clamp(config.min_height, config.max_height),
            distance: config.distance.clamp(config.min_zoom, config.max_zoom),
            target: Vec3::ZERO,
            config,
        }
    }

    pub fn config(&self) -> &CameraConfig {
        &self.config
    }

    /// Apply a camera action. Returns false for actions the camera ignores.
    pub fn apply(&mut self, action: &Action) -> bool {
        let c = &self.config;
        match *action {
            Action::OrbitLeft => self.angle += c.rotation_speed,
            Action::OrbitRight => self.angle -= c.rotation_speed,
            Action::RaiseCamera => {
                self.height = (self.height + c.height_change_speed).clamp(c.min_height, c.max_height)
            }
            Action::LowerCamera => {
                self.height = (self.height - c.height_change_speed).clamp(c.min_height, c.max_height)
            }
            Action::Zoom(delta) => {
                self.distance =
                    (self.distance + delta * c.zoom_speed * 0.01).clamp(c.min_zoom, c.max_zoom)
            }
            _ => return false,
        }
        tracing::trace!(
            angle = self.angle,
            height = self.height,
            distance = self.distance,
            "camera moved"
        );
        true
    }

    /// Point the camera orbits; updated once per frame.
    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn track(&mut self, target: Vec3) {
        self.target = target;
    }

    pub fn eye(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.angle.sin() * self.distance,
                self.height,
                self.angle.cos() * self.distance,
            )
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye(), self.target, Vec3::Y)
    }
}
