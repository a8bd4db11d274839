use std::borrow::Cow;

use dreamwalk::constants::{lighting, CANVAS_SIZE};
use dreamwalk::scene::{projection::Camera, shape::Shape, FLOOR_LAYER, OBJECT_LAYER};
use dreamwalk::systems::{
    ascii_fold, build_faces, leaderboard_lines, screen_polygon, sort_faces, text_width, Face, Leaderboard, RenderItem,
};
use glam::Vec3;
use sdl2::pixels::Color;
use smallvec::smallvec;
use speculoos::prelude::*;

const COLOR: Color = Color::RGB(100, 200, 0);

fn item(center: Vec3, shape: &Shape, layer: u8) -> RenderItem<'_> {
    RenderItem {
        center,
        shape,
        color: COLOR,
        layer,
    }
}

fn face(layer: u8, depth: f32) -> Face {
    Face {
        layer,
        depth,
        points: smallvec![Vec3::ZERO; 3],
        color: COLOR,
    }
}

#[test]
fn test_cuboid_shows_only_front_face() {
    let cube = Shape::cuboid(Vec3::ONE);
    let faces = build_faces(&Camera::default(), [item(Vec3::new(0.0, 1.6, -5.0), &cube, OBJECT_LAYER)]);

    assert_that(&faces.len()).is_equal_to(1);
    assert_that(&faces[0].points.len()).is_equal_to(4);
    assert!((faces[0].depth - 4.5).abs() < 1e-4, "unexpected depth {}", faces[0].depth);
    // Lit by the ambient light, close enough to escape the fog
    assert_that(&faces[0].color).is_equal_to(Color::RGB(60, 120, 0));
}

#[test]
fn test_cuboid_seen_from_corner_shows_three_faces() {
    let cube = Shape::cuboid(Vec3::ONE);
    let mut camera = Camera::default();
    camera.position = Vec3::new(3.0, 4.0, 3.0);
    camera.yaw = std::f32::consts::FRAC_PI_4;
    camera.pitch = -0.6;

    let faces = build_faces(&camera, [item(Vec3::ZERO, &cube, OBJECT_LAYER)]);
    assert_that(&faces.len()).is_equal_to(3);
}

#[test]
fn test_sphere_becomes_disc() {
    let sphere = Shape::Sphere { radius: 0.3 };
    let faces = build_faces(&Camera::default(), [item(Vec3::new(0.0, 1.6, -5.0), &sphere, OBJECT_LAYER)]);

    assert_that(&faces.len()).is_equal_to(1);
    assert_that(&faces[0].points.len()).is_equal_to(12);
    assert!((faces[0].depth - 5.0).abs() < 1e-4);
}

#[test]
fn test_hidden_geometry_produces_no_faces() {
    let sphere = Shape::Sphere { radius: 0.3 };
    let camera = Camera::default();

    let behind = build_faces(&camera, [item(Vec3::new(0.0, 1.6, 5.0), &sphere, OBJECT_LAYER)]);
    assert_that(&behind.is_empty()).is_true();

    let fogged = build_faces(&camera, [item(Vec3::new(0.0, 1.6, -40.0), &sphere, OBJECT_LAYER)]);
    assert_that(&fogged.is_empty()).is_true();
}

#[test]
fn test_floor_visible_only_from_above() {
    let floor = Shape::Plane {
        half_size: 25.0,
        tiles: 10,
    };
    let mut camera = Camera::default();

    let above = build_faces(&camera, [item(Vec3::ZERO, &floor, FLOOR_LAYER)]);
    assert_that(&above.is_empty()).is_false();
    assert_that(&(above.len() <= 100)).is_true();
    for tile in &above {
        assert_that(&(tile.depth < lighting::FOG_FAR)).is_true();
    }

    camera.position.y = -1.0;
    let below = build_faces(&camera, [item(Vec3::ZERO, &floor, FLOOR_LAYER)]);
    assert_that(&below.is_empty()).is_true();
}

#[test]
fn test_floor_always_drawn_first() {
    let floor = Shape::Plane {
        half_size: 25.0,
        tiles: 10,
    };
    let sphere = Shape::Sphere { radius: 0.3 };
    let faces = build_faces(
        &Camera::default(),
        [
            item(Vec3::new(0.0, 1.6, -20.0), &sphere, OBJECT_LAYER),
            item(Vec3::ZERO, &floor, FLOOR_LAYER),
        ],
    );

    let first_object = faces.iter().position(|face| face.layer == OBJECT_LAYER).unwrap();
    assert_that(&first_object).is_equal_to(faces.len() - 1);
    assert!(faces[..first_object].windows(2).all(|pair| pair[0].depth >= pair[1].depth));
}

#[test]
fn test_sort_faces_by_layer_then_depth() {
    let mut faces = vec![face(1, 2.0), face(0, 1.0), face(1, 8.0), face(0, 9.0)];
    sort_faces(&mut faces);

    let order: Vec<(u8, f32)> = faces.iter().map(|f| (f.layer, f.depth)).collect();
    assert_that(&order).is_equal_to(vec![(0, 9.0), (0, 1.0), (1, 8.0), (1, 2.0)]);
}

#[test]
fn test_screen_polygon_centers_straight_ahead() {
    let sphere = Shape::Sphere { radius: 0.3 };
    let camera = Camera::default();
    let faces = build_faces(&camera, [item(Vec3::new(0.0, 1.6, -5.0), &sphere, OBJECT_LAYER)]);

    let viewport = CANVAS_SIZE.as_vec2();
    let projection = camera.projection_matrix(viewport.x / viewport.y);
    let (xs, ys) = screen_polygon(&faces[0], &projection, viewport);

    assert_that(&xs.len()).is_equal_to(12);
    assert_that(&ys.len()).is_equal_to(12);
    let mean_x = xs.iter().map(|&x| x as i32).sum::<i32>() / 12;
    let mean_y = ys.iter().map(|&y| y as i32).sum::<i32>() / 12;
    assert_that(&(mean_x - 480).abs()).is_less_than_or_equal_to(1);
    assert_that(&(mean_y - 270).abs()).is_less_than_or_equal_to(1);
}

#[test]
fn test_ascii_fold() {
    assert!(matches!(ascii_fold("plain text"), Cow::Borrowed("plain text")));
    assert_that(&ascii_fold("You’re fast.").into_owned()).is_equal_to("You're fast.".to_string());
    assert_that(&ascii_fold("So… you finished.").into_owned()).is_equal_to("So... you finished.".to_string());
    assert_that(&ascii_fold("“quoted” – dash").into_owned()).is_equal_to("\"quoted\" - dash".to_string());
    assert_that(&ascii_fold("café").into_owned()).is_equal_to("caf?".to_string());
}

#[test]
fn test_text_width_counts_folded_glyphs() {
    assert_that(&text_width("abc")).is_equal_to(24);
    assert_that(&text_width("So…")).is_equal_to(40);
}

#[test]
fn test_leaderboard_lines() {
    let board = Leaderboard::from_times(vec![61_234, 5_000]);
    assert_that(&leaderboard_lines(&board)).is_equal_to(vec![" 1. 00:05.000".to_string(), " 2. 01:01.234".to_string()]);
    assert_that(&leaderboard_lines(&Leaderboard::default()).is_empty()).is_true();
}
