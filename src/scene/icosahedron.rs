use anyhow::Result;
use glow::HasContext;

use super::{angle, static_buffer, Program, Scene};
use crate::geometry::Size;
use crate::graphics::FormatHint;

const VERTEX_SHADER: &str = r#"
uniform mat4 rotation;
attribute vec4 pos;
attribute vec3 color;
const vec3 light_pos = vec3(0.0, 0.0, 1.0);
varying vec3 v_color;
void main() {
  gl_Position = rotation * pos;
  // farthest any vertex can get from the light
  float max_distance = length(vec3(-0.525731 - light_pos.x, light_pos.y, -0.850651 - light_pos.z));
  float distance_to_light = length(gl_Position.xyz - light_pos);
  // inverse cube instead of square, the falloff is too flat otherwise
  float luminance = pow(distance_to_light / max_distance, 3.0);
  v_color = color * luminance;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
varying vec3 v_color;
void main() {
  gl_FragColor = vec4(v_color, 1);
}
"#;

const SPEED_DIV: u32 = 5;

const X: f32 = 0.525_731_1;
const Z: f32 = 0.850_650_8;

#[rustfmt::skip]
const CORNERS: [[f32; 3]; 12] = [
    [-X, 0.0, Z], [X, 0.0, Z], [-X, 0.0, -Z], [X, 0.0, -Z],
    [0.0, Z, X], [0.0, Z, -X], [0.0, -Z, X], [0.0, -Z, -X],
    [Z, X, 0.0], [-Z, X, 0.0], [Z, -X, 0.0], [-Z, -X, 0.0],
];

#[rustfmt::skip]
const FACES: [[usize; 3]; 20] = [
    [0, 4, 1], [0, 9, 4], [9, 5, 4], [4, 5, 8], [4, 8, 1],
    [8, 10, 1], [8, 3, 10], [5, 3, 8], [5, 2, 3], [2, 7, 3],
    [7, 10, 3], [7, 6, 10], [7, 11, 6], [11, 0, 6], [0, 1, 6],
    [6, 1, 10], [9, 0, 11], [9, 11, 2], [9, 2, 5], [7, 2, 11],
];

// handed out to the faces in turn
const PALETTE: [[f32; 3]; 18] = [
    [0.0, 0.0, 0.0],
    [1.0, 1.0, 1.0],
    [1.0, 0.5, 0.5],
    [0.5, 1.0, 0.5],
    [0.5, 0.5, 1.0],
    [0.5, 0.5, 0.5],
    [0.0, 0.5, 0.0],
    [1.0, 0.25, 0.25],
    [0.875, 0.69, 0.996],
    [0.0, 1.0, 1.0],
    [0.25, 0.25, 0.25],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.75, 0.75, 0.75],
    [0.0, 0.0, 0.5],
    [0.5, 0.0, 0.0],
    [1.0, 1.0, 0.5],
];

const VERTEX_COUNT: usize = FACES.len() * 3;

struct State {
    program: Program,
    vertices: glow::Buffer,
    colors: glow::Buffer,
    pos: u32,
    color: u32,
    rotation: Option<glow::UniformLocation>,
}

#[derive(Default)]
pub struct Icosahedron {
    state: Option<State>,
}

fn vertices() -> Vec<f32> {
    FACES
        .iter()
        .flatten()
        .flat_map(|&corner| CORNERS[corner])
        .collect()
}

fn colors() -> Vec<f32> {
    FACES
        .iter()
        .zip(PALETTE.iter().cycle())
        .flat_map(|(_, color)| std::iter::repeat(color).take(3))
        .flatten()
        .copied()
        .collect()
}

fn rotation(angle: f32) -> [f32; 16] {
    let (sin, cos) = angle.sin_cos();
    #[rustfmt::skip]
    let rotation = [
        cos, 0.0, sin, 0.0,
        0.0, 1.0, 0.0, 0.0,
        -sin, 0.0, cos, 0.0,
        0.0, 0.0, 0.0, 1.0,
    ];
    rotation
}

impl Scene for Icosahedron {
    fn extra_format_hints(&self) -> Vec<FormatHint> {
        vec![(egl::DEPTH_SIZE, 4)]
    }

    fn setup(&mut self, gl: &glow::Context) -> Result<()> {
        let program = Program::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        self.state = Some(State {
            pos: program.attrib(gl, "pos")?,
            color: program.attrib(gl, "color")?,
            rotation: program.uniform(gl, "rotation"),
            vertices: static_buffer(gl, &vertices())?,
            colors: static_buffer(gl, &colors())?,
            program,
        });

        Ok(())
    }

    fn draw(&mut self, gl: &glow::Context, size: Size, time: u32) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        let rotation = rotation(angle(time, SPEED_DIV));
        let (width, height) = size.as_i32();
        unsafe {
            gl.viewport(0, 0, width, height);
            gl.uniform_matrix_4_f32_slice(state.rotation.as_ref(), false, &rotation);

            gl.clear_color(0.0, 0.0, 0.0, 0.5);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.enable(glow::DEPTH_TEST);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.vertices));
            gl.vertex_attrib_pointer_f32(state.pos, 3, glow::FLOAT, false, 0, 0);
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.colors));
            gl.vertex_attrib_pointer_f32(state.color, 3, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(state.pos);
            gl.enable_vertex_attrib_array(state.color);

            gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT as i32);

            gl.disable_vertex_attrib_array(state.pos);
            gl.disable_vertex_attrib_array(state.color);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.disable(glow::DEPTH_TEST);
        }
    }

    fn teardown(&mut self, gl: &glow::Context) {
        if let Some(state) = self.state.take() {
            unsafe {
                gl.delete_buffer(state.vertices);
                gl.delete_buffer(state.colors);
            }
            state.program.delete(gl);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_lie_on_unit_sphere() {
        for [x, y, z] in CORNERS {
            assert!(((x * x + y * y + z * z).sqrt() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn every_corner_is_shared_by_five_faces() {
        for corner in 0..CORNERS.len() {
            let faces = FACES.iter().filter(|f| f.contains(&corner)).count();
            assert_eq!(faces, 5, "corner {}", corner);
        }
    }

    #[test]
    fn one_color_per_vertex() {
        assert_eq!(vertices().len(), VERTEX_COUNT * 3);
        assert_eq!(colors().len(), VERTEX_COUNT * 3);
    }

    #[test]
    fn faces_are_flat_shaded_and_palette_wraps() {
        let colors = colors();
        let face = |i: usize| &colors[i * 9..i * 9 + 3];

        for i in 0..FACES.len() {
            assert_eq!(&colors[i * 9..i * 9 + 3], &colors[i * 9 + 3..i * 9 + 6]);
            assert_eq!(&colors[i * 9..i * 9 + 3], &colors[i * 9 + 6..i * 9 + 9]);
        }
        assert_eq!(face(1), &PALETTE[1]);
        assert_eq!(face(18), &PALETTE[0]);
        assert_eq!(face(19), &PALETTE[1]);
    }

    #[test]
    fn rotates_around_y() {
        let m = rotation(std::f32::consts::FRAC_PI_2);
        // column-major: the y column stays put
        assert_eq!(&m[4..8], &[0.0, 1.0, 0.0, 0.0]);
        assert!((m[2] - 1.0).abs() < 1e-6);
        assert!((m[8] + 1.0).abs() < 1e-6);
    }
}
