use cgmath::{Matrix4, Vector3};
use glium::index::{NoIndices, PrimitiveType};
use glium::{Surface, VertexBuffer};
use lazy_static::lazy_static;
use send_wrapper::SendWrapper;

mod rotation;
mod shaders;

pub use rotation::BoxRotation;

use crate::gui::WindowLayout;

/// Fraction of the element that the box fills.
const BOX_SCALE: f32 = 0.65;
/// Depth range of the orthographic projection, in pixels.
const DEPTH_RANGE: f32 = 1000.0;

const BACKGROUND_COLOR: (f32, f32, f32, f32) = (0.16, 0.17, 0.2, 1.0);

#[derive(Debug, Copy, Clone)]
struct Vertex3D {
    pos: [f32; 3],
    color: [f32; 3],
}
glium::implement_vertex!(Vertex3D, pos, color);

/// Returns two triangles covering a quad, given its corners in winding order.
fn quad(corners: [[f32; 3]; 4], color: [f32; 3]) -> [Vertex3D; 6] {
    let [a, b, c, d] = corners;
    let v = |pos| Vertex3D { pos, color };
    [v(a), v(b), v(c), v(a), v(c), v(d)]
}

/// Returns the vertices of a unit cube centered on the origin, with one color
/// per face.
fn cube_vertices() -> Vec<Vertex3D> {
    const H: f32 = 0.5;
    let faces = [
        // Left: pink
        quad(
            [[-H, -H, -H], [-H, -H, H], [-H, H, H], [-H, H, -H]],
            [1.0, 0.75, 0.8],
        ),
        // Right: ivory
        quad(
            [[H, -H, -H], [H, H, -H], [H, H, H], [H, -H, H]],
            [1.0, 1.0, 0.94],
        ),
        // Top: spring green
        quad(
            [[-H, -H, -H], [H, -H, -H], [H, -H, H], [-H, -H, H]],
            [0.0, 1.0, 0.5],
        ),
        // Bottom: dark salmon
        quad(
            [[-H, H, -H], [-H, H, H], [H, H, H], [H, H, -H]],
            [0.91, 0.59, 0.48],
        ),
        // Front: cornflower blue
        quad(
            [[-H, -H, H], [H, -H, H], [H, H, H], [-H, H, H]],
            [0.39, 0.58, 0.93],
        ),
        // Back: blue
        quad(
            [[-H, -H, -H], [-H, H, -H], [H, H, -H], [H, -H, -H]],
            [0.0, 0.0, 1.0],
        ),
    ];
    faces.iter().flatten().copied().collect()
}

lazy_static! {
    static ref BOX_VBO: SendWrapper<VertexBuffer<Vertex3D>> = SendWrapper::new(
        VertexBuffer::immutable(&**crate::gui::DISPLAY, &cube_vertices())
            .expect("Failed to create vertex buffer")
    );
}

/// Returns the matrix that maps the unit cube onto the draggable element at
/// translation `(tx, ty)`, in clip space.
pub fn box_matrix(
    layout: &WindowLayout,
    translate: cgmath::Vector2<f64>,
    rotation: BoxRotation,
) -> Matrix4<f32> {
    let (w, h) = (layout.viewport.x as f32, layout.viewport.y as f32);
    // Pixel coordinates, with Y pointing down.
    let projection = cgmath::ortho(0.0, w, h, 0.0, -DEPTH_RANGE, DEPTH_RANGE);

    let center = layout.origin() + translate + layout.element_size / 2.0;
    let center = Vector3::new(center.x as f32, center.y as f32, 0.0);
    let size = layout.element_size.x.min(layout.element_size.y) as f32;

    projection
        * Matrix4::from_translation(center)
        * Matrix4::from_scale(size * BOX_SCALE)
        * rotation.matrix()
}

/// Draws the box.
pub fn draw_box(
    target: &mut glium::Frame,
    layout: &WindowLayout,
    translate: cgmath::Vector2<f64>,
    rotation: BoxRotation,
) {
    let transform: [[f32; 4]; 4] = box_matrix(layout, translate, rotation).into();

    let draw_params = glium::DrawParameters {
        depth: glium::Depth {
            test: glium::DepthTest::IfLess,
            write: true,
            ..glium::Depth::default()
        },
        ..glium::DrawParameters::default()
    };

    target.clear_color_and_depth(BACKGROUND_COLOR, 1.0);
    target
        .draw(
            &**BOX_VBO,
            &NoIndices(PrimitiveType::TrianglesList),
            &shaders::BOX_PROGRAM,
            &glium::uniform! {
                transform: transform,
            },
            &draw_params,
        )
        .expect("Failed to draw box");
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::{Point2, Vector2, Vector4};

    #[test]
    fn test_cube_has_six_faces() {
        assert_eq!(cube_vertices().len(), 36);
    }

    #[test]
    fn test_box_center_follows_translation() {
        let layout = WindowLayout::new(Vector2::new(800.0, 600.0), 200.0);
        assert_eq!(layout.origin(), Point2::new(300.0, 200.0));

        let m = box_matrix(&layout, Vector2::new(100.0, -100.0), BoxRotation::default());
        let center = m * Vector4::new(0.0, 0.0, 0.0, 1.0);
        // Pixel (500, 200) in clip space.
        assert!((center.x - 0.25).abs() < 1e-6);
        assert!((center.y - 0.333_333).abs() < 1e-5);
    }
}
