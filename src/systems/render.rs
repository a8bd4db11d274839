//! Software perspective rendering of the scene with SDL2_gfx polygon primitives.
//!
//! Every visible shape is broken into flat faces in view space, clipped against the near plane,
//! painter-sorted and then filled back to front.

use std::borrow::Cow;
use std::cmp::Ordering;

use bevy_ecs::{
    event::EventWriter,
    system::{NonSendMut, Query, Res},
};
use glam::{Mat4, Vec2, Vec3};
use sdl2::{gfx::primitives::DrawRenderer, pixels::Color, render::Canvas, video::Window};
use tracing::trace;

use crate::{
    constants::{lighting, view, CANVAS_SIZE},
    error::GameError,
    scene::{
        projection::{apply_fog, clip_near, fog_factor, project_point, shade, Camera, Polygon},
        shape::Shape,
    },
    systems::{GameStage, Material, Renderable, Transform},
};

/// Segments used for the camera-facing disc that stands in for a sphere.
const SPHERE_SEGMENTS: usize = 12;

/// Screen coordinates are clamped to this magnitude before narrowing to `i16`.
const COORDINATE_LIMIT: f32 = 16_000.0;

/// A flat, colored polygon in view space.
#[derive(Debug, Clone, PartialEq)]
pub struct Face {
    pub layer: u8,
    /// Distance in front of the camera of the polygon's centroid.
    pub depth: f32,
    pub points: Polygon,
    pub color: Color,
}

/// What the renderer needs to know about one entity.
#[derive(Debug, Clone, Copy)]
pub struct RenderItem<'a> {
    pub center: Vec3,
    pub shape: &'a Shape,
    pub color: Color,
    pub layer: u8,
}

/// Breaks every item into view-space faces, culled, near-clipped, fogged and painter-sorted.
pub fn build_faces<'a>(camera: &Camera, items: impl IntoIterator<Item = RenderItem<'a>>) -> Vec<Face> {
    let view_matrix = camera.view_matrix();
    let mut faces = Vec::new();

    for item in items {
        let color = shade(item.color);
        let to_view = |world_points: &[Vec3]| -> Polygon {
            world_points.iter().map(|p| view_matrix.transform_point3(*p)).collect()
        };
        let mut push = |view_points: &[Vec3]| {
            if let Some(face) = finish_face(view_points, item.layer, color) {
                faces.push(face);
            }
        };

        match *item.shape {
            Shape::Cuboid { half_extents } => {
                for quad in cuboid_quads(item.center, half_extents) {
                    let face_center = quad.iter().copied().sum::<Vec3>() / 4.0;
                    let normal = (face_center - item.center).normalize_or_zero();
                    // Back faces point away from the eye
                    if normal.dot(camera.position - face_center) <= 0.0 {
                        continue;
                    }
                    push(&to_view(&quad));
                }
            }
            Shape::Plane { half_size, tiles } => {
                // The floor is single sided, seen from above only
                if camera.position.y <= item.center.y {
                    continue;
                }
                for tile in plane_tiles(item.center, half_size, tiles) {
                    push(&to_view(&tile));
                }
            }
            Shape::Sphere { radius } => {
                let center = view_matrix.transform_point3(item.center);
                let disc: Polygon = (0..SPHERE_SEGMENTS)
                    .map(|i| {
                        let angle = i as f32 / SPHERE_SEGMENTS as f32 * std::f32::consts::TAU;
                        center + Vec3::new(angle.cos(), angle.sin(), 0.0) * radius
                    })
                    .collect();
                push(&disc);
            }
        }
    }

    sort_faces(&mut faces);
    faces
}

/// Orders faces by layer, then far to near within a layer.
pub fn sort_faces(faces: &mut [Face]) {
    faces.sort_by(|a, b| match a.layer.cmp(&b.layer) {
        Ordering::Equal => b.depth.total_cmp(&a.depth),
        other => other,
    });
}

fn finish_face(view_points: &[Vec3], layer: u8, color: Color) -> Option<Face> {
    let points = clip_near(view_points);
    if points.len() < 3 {
        return None;
    }

    let centroid = points.iter().copied().sum::<Vec3>() / points.len() as f32;
    let depth = -centroid.z;
    if depth > view::FAR || fog_factor(depth) <= 0.0 {
        return None;
    }

    Some(Face {
        layer,
        depth,
        color: apply_fog(color, depth),
        points,
    })
}

/// The six faces of an axis-aligned box, each wound counter-clockwise seen from outside.
fn cuboid_quads(center: Vec3, half: Vec3) -> [[Vec3; 4]; 6] {
    let corner = |x: f32, y: f32, z: f32| center + Vec3::new(x * half.x, y * half.y, z * half.z);
    [
        // +X
        [corner(1., -1., 1.), corner(1., -1., -1.), corner(1., 1., -1.), corner(1., 1., 1.)],
        // -X
        [corner(-1., -1., -1.), corner(-1., -1., 1.), corner(-1., 1., 1.), corner(-1., 1., -1.)],
        // +Y
        [corner(-1., 1., 1.), corner(1., 1., 1.), corner(1., 1., -1.), corner(-1., 1., -1.)],
        // -Y
        [corner(-1., -1., -1.), corner(1., -1., -1.), corner(1., -1., 1.), corner(-1., -1., 1.)],
        // +Z
        [corner(-1., -1., 1.), corner(1., -1., 1.), corner(1., 1., 1.), corner(-1., 1., 1.)],
        // -Z
        [corner(1., -1., -1.), corner(-1., -1., -1.), corner(-1., 1., -1.), corner(1., 1., -1.)],
    ]
}

fn plane_tiles(center: Vec3, half_size: f32, tiles: u32) -> Vec<[Vec3; 4]> {
    let tiles = tiles.max(1);
    let step = half_size * 2.0 / tiles as f32;
    let origin = center - Vec3::new(half_size, 0.0, half_size);

    let mut quads = Vec::with_capacity((tiles * tiles) as usize);
    for row in 0..tiles {
        for column in 0..tiles {
            let x0 = origin.x + column as f32 * step;
            let z0 = origin.z + row as f32 * step;
            let (x1, z1) = (x0 + step, z0 + step);
            quads.push([
                Vec3::new(x0, center.y, z1),
                Vec3::new(x1, center.y, z1),
                Vec3::new(x1, center.y, z0),
                Vec3::new(x0, center.y, z0),
            ]);
        }
    }
    quads
}

/// Projects a view-space face to screen coordinates suitable for SDL2_gfx.
pub fn screen_polygon(face: &Face, projection: &Mat4, viewport: Vec2) -> (Vec<i16>, Vec<i16>) {
    face.points
        .iter()
        .map(|p| {
            let screen = project_point(*p, projection, viewport)
                .clamp(Vec2::splat(-COORDINATE_LIMIT), Vec2::splat(COORDINATE_LIMIT));
            (screen.x.round() as i16, screen.y.round() as i16)
        })
        .unzip()
}

/// Replaces typographic punctuation the built-in font lacks with ASCII equivalents.
pub fn ascii_fold(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }

    let mut folded = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\u{2018}' | '\u{2019}' => folded.push('\''),
            '\u{201C}' | '\u{201D}' => folded.push('"'),
            '\u{2026}' => folded.push_str("..."),
            '\u{2013}' | '\u{2014}' => folded.push('-'),
            c if c.is_ascii() => folded.push(c),
            _ => folded.push('?'),
        }
    }
    Cow::Owned(folded)
}

/// Clears the frame and draws the 3D scene during a run.
pub fn render_system(
    mut canvas: NonSendMut<Canvas<Window>>,
    stage: Res<GameStage>,
    camera: Res<Camera>,
    renderables: Query<(&Transform, &Shape, &Material, &Renderable)>,
    mut errors: EventWriter<GameError>,
) {
    canvas.set_draw_color(lighting::FOG_COLOR);
    canvas.clear();

    if !stage.is_playing() {
        return;
    }

    let items = renderables.iter().map(|(transform, shape, material, renderable)| RenderItem {
            center: transform.translation,
            shape,
            color: material.color,
            layer: renderable.layer,
        });
    let faces = build_faces(&camera, items);

    let viewport = CANVAS_SIZE.as_vec2();
    let projection = camera.projection_matrix(viewport.x / viewport.y);

    let mut failure = None;
    for face in &faces {
        let (xs, ys) = screen_polygon(face, &projection, viewport);
        let drawn = canvas
            .filled_polygon(&xs, &ys, face.color)
            .and_then(|_| canvas.aa_polygon(&xs, &ys, face.color));
        if let Err(e) = drawn {
            failure.get_or_insert(e);
        }
    }

    if let Some(e) = failure {
        errors.write(GameError::Render(format!("Failed to draw scene face: {e}")));
    }
    trace!(faces = faces.len(), "Scene drawn");
}

pub fn present_system(mut canvas: NonSendMut<Canvas<Window>>) {
    canvas.present();
}

