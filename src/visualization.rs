//! 3D visualization of a generated layout using kiss3d.

use kiss3d::camera::ArcBall;
use kiss3d::light::Light;
use kiss3d::nalgebra::{Point3, Translation3};
use kiss3d::window::Window;

use coastergen::geometry::Coord;
use coastergen::grid::Grid;

/// Returns a color for an elevation by spacing hues evenly over the volume
/// height.
fn elevation_color(z: i32, height: i32) -> (f32, f32, f32) {
    let hue = z as f32 / height as f32;

    // HSL to RGB with saturation=0.8, lightness=0.5
    let s: f32 = 0.8;
    let l: f32 = 0.5;
    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let h_prime = hue * 6.0;
    let x = c * (1.0 - (h_prime % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = match h_prime as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

/// Displays the occupancy grid of a layout in an interactive orbit-camera
/// window. Every occupied quadrant becomes one small cube, colored by
/// elevation.
pub fn display(grid: &Grid) {
    const QUAD_SIZE: f32 = 0.42;

    let bounds = grid.bounds();
    let mut window = Window::new("coastergen - generated layout");
    window.set_light(Light::StickToCamera);

    for z in 0..bounds.z {
        for y in 0..bounds.y {
            for x in 0..bounds.x {
                let cell = grid.read(Coord::new(y, x, z));
                if cell.is_empty() {
                    continue;
                }
                let (r, g, b) = elevation_color(z, bounds.z);
                let quadrants = [
                    (0, 0, cell.c00()),
                    (0, 1, cell.c01()),
                    (1, 0, cell.c10()),
                    (1, 1, cell.c11()),
                ];
                for (row, col, occupied) in quadrants {
                    if !occupied {
                        continue;
                    }
                    let mut node = window.add_cube(QUAD_SIZE, 0.9, QUAD_SIZE);
                    node.set_color(r, g, b);
                    // scene axes: x east, y up, z south
                    node.set_local_translation(Translation3::new(
                        x as f32 + col as f32 * 0.5,
                        z as f32,
                        y as f32 + row as f32 * 0.5,
                    ));
                }
            }
        }
    }

    let center = Point3::new(
        bounds.x as f32 / 2.0,
        bounds.z as f32 / 2.0,
        bounds.y as f32 / 2.0,
    );
    let eye = Point3::new(
        bounds.x as f32 * 1.6,
        bounds.z as f32 * 1.4,
        bounds.y as f32 * 1.8,
    );
    let mut camera = ArcBall::new(eye, center);

    while window.render_with_camera(&mut camera) {}
}
