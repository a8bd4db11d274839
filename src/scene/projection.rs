//! The first-person camera and the math that turns view-space geometry into screen polygons.

use bevy_ecs::resource::Resource;
use glam::{EulerRot, Mat4, Quat, Vec2, Vec3, Vec4Swizzles};
use sdl2::pixels::Color;
use smallvec::SmallVec;

use crate::constants::{lighting, view, PLAYER_START};
use crate::scene::shape::Ray;

/// Polygon storage sized for the largest face the renderer builds (a 12-gon disc,
/// which can gain one vertex per clipped edge).
pub type Polygon = SmallVec<[Vec3; 16]>;

/// First-person camera. Yaw turns around +Y, pitch tilts up and down; at zero yaw and
/// pitch the camera looks down -Z.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: PLAYER_START,
            yaw: 0.0,
            pitch: 0.0,
        }
    }
}

impl Camera {
    /// The direction the camera is looking.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Horizontal forward direction, independent of pitch.
    pub fn flat_forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(-sin_yaw, 0.0, -cos_yaw)
    }

    /// Horizontal right direction, independent of pitch.
    pub fn flat_right(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        Vec3::new(cos_yaw, 0.0, -sin_yaw)
    }

    /// Walks along the horizontal forward direction.
    pub fn move_forward(&mut self, distance: f32) {
        self.position += self.flat_forward() * distance;
    }

    /// Strafes along the horizontal right direction.
    pub fn move_right(&mut self, distance: f32) {
        self.position += self.flat_right() * distance;
    }

    /// Turns the camera by a relative pointer motion, keeping pitch within straight up and straight down.
    pub fn rotate(&mut self, delta: Vec2, sensitivity: f32) {
        self.yaw -= delta.x * sensitivity;
        self.pitch = (self.pitch - delta.y * sensitivity).clamp(-std::f32::consts::FRAC_PI_2, std::f32::consts::FRAC_PI_2);
    }

    /// World-to-view transform. Stays well defined when looking straight up or down.
    pub fn view_matrix(&self) -> Mat4 {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0);
        Mat4::from_rotation_translation(rotation, self.position).inverse()
    }

    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        Mat4::perspective_rh_gl(view::FOV_Y_DEGREES.to_radians(), aspect, view::NEAR, view::FAR)
    }

    /// The ray through the center of the screen.
    pub fn center_ray(&self) -> Ray {
        Ray {
            origin: self.position,
            direction: self.forward(),
        }
    }
}

/// Clips a view-space polygon against the near plane (`z = -NEAR`), keeping the part in front of the camera.
pub fn clip_near(polygon: &[Vec3]) -> Polygon {
    let mut clipped = Polygon::new();
    if polygon.is_empty() {
        return clipped;
    }

    let plane = -view::NEAR;
    let inside = |p: &Vec3| p.z <= plane;

    for (index, current) in polygon.iter().enumerate() {
        let next = &polygon[(index + 1) % polygon.len()];
        match (inside(current), inside(next)) {
            (true, true) => clipped.push(*next),
            (true, false) => clipped.push(intersect_near(*current, *next, plane)),
            (false, true) => {
                clipped.push(intersect_near(*current, *next, plane));
                clipped.push(*next);
            }
            (false, false) => {}
        }
    }

    clipped
}

fn intersect_near(from: Vec3, to: Vec3, plane: f32) -> Vec3 {
    let t = (plane - from.z) / (to.z - from.z);
    from.lerp(to, t)
}

/// Projects a view-space point onto a viewport of `viewport` pixels, with +Y pointing down.
pub fn project_point(view_position: Vec3, projection: &Mat4, viewport: Vec2) -> Vec2 {
    let clip = *projection * view_position.extend(1.0);
    let ndc = clip.xy() / clip.w;
    Vec2::new((ndc.x + 1.0) * 0.5 * viewport.x, (1.0 - ndc.y) * 0.5 * viewport.y)
}

/// How much of the surface color survives the fog at a given view depth: 1 is unfogged, 0 is fully fogged.
pub fn fog_factor(depth: f32) -> f32 {
    ((lighting::FOG_FAR - depth) / (lighting::FOG_FAR - lighting::FOG_NEAR)).clamp(0.0, 1.0)
}

/// Blends `color` toward the fog color for a surface at `depth`.
pub fn apply_fog(color: Color, depth: f32) -> Color {
    let factor = fog_factor(depth);
    let fog = lighting::FOG_COLOR;
    let blend = |surface: u8, fog: u8| (fog as f32 + (surface as f32 - fog as f32) * factor).round() as u8;
    Color::RGBA(blend(color.r, fog.r), blend(color.g, fog.g), blend(color.b, fog.b), color.a)
}

/// Lights a material color with the scene's ambient light.
pub fn shade(color: Color) -> Color {
    let scale = |channel: u8| (channel as f32 * lighting::AMBIENT_INTENSITY).round() as u8;
    Color::RGBA(scale(color.r), scale(color.g), scale(color.b), color.a)
}
