//! Primitive shapes and ray intersection tests used for picking.

use bevy_ecs::component::Component;
use glam::Vec3;

/// A ray with a normalized direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// The point `distance` units along the ray.
    pub fn at(&self, distance: f32) -> Vec3 {
        self.origin + self.direction * distance
    }
}

/// The geometry of a scene entity, centered on its [`Transform`](crate::systems::Transform).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// An axis-aligned box.
    Cuboid { half_extents: Vec3 },
    Sphere { radius: f32 },
    /// A horizontal square facing +Y, split into `tiles * tiles` quads for rendering.
    Plane { half_size: f32, tiles: u32 },
}

impl Shape {
    /// An axis-aligned box with the given full size.
    pub fn cuboid(size: Vec3) -> Self {
        Shape::Cuboid {
            half_extents: size * 0.5,
        }
    }

    /// Distance along `ray` to the first point where it meets this shape placed at `center`.
    ///
    /// Hits behind the ray origin are ignored. A ray starting inside a cuboid hits at
    /// distance zero; a ray starting inside a sphere hits where it leaves the sphere.
    pub fn intersect(&self, center: Vec3, ray: &Ray) -> Option<f32> {
        match *self {
            Shape::Cuboid { half_extents } => intersect_cuboid(center - half_extents, center + half_extents, ray),
            Shape::Sphere { radius } => intersect_sphere(center, radius, ray),
            Shape::Plane { half_size, .. } => intersect_plane(center, half_size, ray),
        }
    }
}

/// Slab test against an axis-aligned box.
fn intersect_cuboid(min: Vec3, max: Vec3, ray: &Ray) -> Option<f32> {
    let inverse = ray.direction.recip();
    let t0 = (min - ray.origin) * inverse;
    let t1 = (max - ray.origin) * inverse;

    let near = t0.min(t1).max_element();
    let far = t0.max(t1).min_element();

    // NaN appears when the ray runs parallel to an axis and lies exactly on a slab boundary
    if near.is_nan() || far.is_nan() || far < near || far < 0.0 {
        return None;
    }

    Some(near.max(0.0))
}

fn intersect_sphere(center: Vec3, radius: f32, ray: &Ray) -> Option<f32> {
    let offset = ray.origin - center;
    let b = offset.dot(ray.direction);
    let c = offset.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }

    let root = discriminant.sqrt();
    let near = -b - root;
    let far = -b + root;
    if near >= 0.0 {
        Some(near)
    } else if far >= 0.0 {
        Some(far)
    } else {
        None
    }
}

fn intersect_plane(center: Vec3, half_size: f32, ray: &Ray) -> Option<f32> {
    if ray.direction.y.abs() < f32::EPSILON {
        return None;
    }

    let distance = (center.y - ray.origin.y) / ray.direction.y;
    if distance < 0.0 {
        return None;
    }

    let point = ray.at(distance);
    let inside = (point.x - center.x).abs() <= half_size && (point.z - center.z).abs() <= half_size;
    inside.then_some(distance)
}
