use anyhow::Result;
use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;

use super::{angle, static_buffer, Program, Scene};
use crate::geometry::Size;
use crate::graphics::FormatHint;

const VERTEX_SHADER: &str = r#"
uniform mat4 u_model;
uniform mat4 u_view;
uniform mat4 u_projection;
attribute vec4 a_pos;
attribute vec4 a_norm;
attribute vec3 a_color;
varying vec3 v_color;
varying vec4 v_norm;
varying vec4 v_pos;
void main() {
  gl_Position = u_projection * u_view * u_model * a_pos;
  v_pos = u_view * u_model * a_pos;
  v_norm = u_model * normalize(a_norm);
  v_color = a_color;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
uniform vec4 u_light_pos;
uniform float u_ambient;
varying vec3 v_color;
varying vec4 v_pos;
varying vec4 v_norm;
void main() {
  vec4 L = u_light_pos - v_pos;
  float lambert = dot(normalize(L.xyz), v_norm.xyz);
  gl_FragColor = vec4(v_color * (u_ambient + (1.0 - u_ambient) * lambert), 1);
}
"#;

const SPEED_DIV: u32 = 20;
const VERTEX_COUNT: i32 = 36;

#[rustfmt::skip]
const VERTICES: [f32; 108] = [
    // left (x == -1)
    -1., -1., -1.,  -1., -1., 1.,  -1., 1., 1.,
    -1., 1., 1.,  -1., -1., -1.,  -1., 1., -1.,
    // right (x == +1)
    1., -1., -1.,  1., -1., 1.,  1., 1., 1.,
    1., 1., 1.,  1., -1., -1.,  1., 1., -1.,
    // front (z == +1)
    -1., -1., 1.,  -1., 1., 1.,  1., 1., 1.,
    1., 1., 1.,  -1., -1., 1.,  1., -1., 1.,
    // back (z == -1)
    -1., -1., -1.,  -1., 1., -1.,  1., 1., -1.,
    1., 1., -1.,  -1., -1., -1.,  1., -1., -1.,
    // top (y == +1)
    -1., 1., -1.,  -1., 1., 1.,  1., 1., 1.,
    1., 1., 1.,  -1., 1., -1.,  1., 1., -1.,
    // bottom (y == -1)
    -1., -1., -1.,  -1., -1., 1.,  1., -1., 1.,
    1., -1., 1.,  -1., -1., -1.,  1., -1., -1.,
];

const FACE_COLORS: [[f32; 3]; 6] = [
    [1.0, 1.0, 0.5], // yellow
    [1.0, 0.3, 0.3], // red
    [0.5, 0.5, 1.0], // light blue
    [0.5, 0.5, 0.5], // grey
    [0.5, 0.0, 1.0], // purple
    [1.0, 1.0, 1.0], // white
];

struct Uniforms {
    model: Option<glow::UniformLocation>,
    view: Option<glow::UniformLocation>,
    projection: Option<glow::UniformLocation>,
    light_pos: Option<glow::UniformLocation>,
    ambient: Option<glow::UniformLocation>,
}

struct State {
    program: Program,
    uniforms: Uniforms,
    vertices: glow::Buffer,
    colors: glow::Buffer,
    pos: u32,
    norm: Option<u32>,
    color: u32,
}

#[derive(Default)]
pub struct Cube {
    state: Option<State>,
}

fn colors() -> Vec<f32> {
    FACE_COLORS
        .iter()
        .flat_map(|c| std::iter::repeat(c).take(6))
        .flatten()
        .copied()
        .collect()
}

fn frustum(left: f32, right: f32, bottom: f32, top: f32, near: f32, far: f32) -> Mat4 {
    Mat4::from_cols(
        Vec4::new(2.0 * near / (right - left), 0.0, 0.0, 0.0),
        Vec4::new(0.0, 2.0 * near / (top - bottom), 0.0, 0.0),
        Vec4::new(
            (right + left) / (right - left),
            (top + bottom) / (top - bottom),
            -(far + near) / (far - near),
            -1.0,
        ),
        Vec4::new(0.0, 0.0, -2.0 * far * near / (far - near), 0.0),
    )
}

fn model(angle: f32) -> Mat4 {
    // Different factors per axis avoid gimbal lock.
    Mat4::from_axis_angle(Vec3::Y, angle * 3.0 / 10.0)
        * Mat4::from_axis_angle(Vec3::X, angle)
        * Mat4::from_axis_angle(Vec3::Z, angle * 7.0 / 10.0)
}

impl Scene for Cube {
    fn extra_format_hints(&self) -> Vec<FormatHint> {
        vec![(egl::DEPTH_SIZE, 4)]
    }

    fn setup(&mut self, gl: &glow::Context) -> Result<()> {
        let program = Program::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        let uniforms = Uniforms {
            model: program.uniform(gl, "u_model"),
            view: program.uniform(gl, "u_view"),
            projection: program.uniform(gl, "u_projection"),
            light_pos: program.uniform(gl, "u_light_pos"),
            ambient: program.uniform(gl, "u_ambient"),
        };

        self.state = Some(State {
            uniforms,
            pos: program.attrib(gl, "a_pos")?,
            // optimized out by drivers that fold the normal into the position
            norm: program.attrib(gl, "a_norm").ok(),
            color: program.attrib(gl, "a_color")?,
            vertices: static_buffer(gl, &VERTICES)?,
            colors: static_buffer(gl, &colors())?,
            program,
        });

        Ok(())
    }

    fn draw(&mut self, gl: &glow::Context, size: Size, time: u32) {
        let Some(state) = self.state.as_ref() else {
            return;
        };
        let u = &state.uniforms;

        let model = model(angle(time, SPEED_DIV));
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -7.0));
        let aspect = size.aspect_ratio();
        let projection = frustum(-1.5 * aspect, 1.5 * aspect, 1.5, -1.5, 4.5, 10.0);

        let (width, height) = size.as_i32();
        unsafe {
            gl.viewport(0, 0, width, height);

            gl.uniform_matrix_4_f32_slice(u.model.as_ref(), false, &model.to_cols_array());
            gl.uniform_matrix_4_f32_slice(u.view.as_ref(), false, &view.to_cols_array());
            gl.uniform_matrix_4_f32_slice(
                u.projection.as_ref(),
                false,
                &projection.to_cols_array(),
            );
            gl.uniform_4_f32(u.light_pos.as_ref(), 10.0, 10.0, 10.0, 1.0);
            gl.uniform_1_f32(u.ambient.as_ref(), 0.5);

            gl.clear_color(0.0, 0.0, 0.0, 0.5);
            gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
            gl.enable(glow::DEPTH_TEST);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.vertices));
            gl.vertex_attrib_pointer_f32(state.pos, 3, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(state.pos);
            if let Some(norm) = state.norm {
                gl.vertex_attrib_pointer_f32(norm, 3, glow::FLOAT, false, 0, 0);
                gl.enable_vertex_attrib_array(norm);
            }

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.colors));
            gl.vertex_attrib_pointer_f32(state.color, 3, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(state.color);

            gl.draw_arrays(glow::TRIANGLES, 0, VERTEX_COUNT);

            gl.disable_vertex_attrib_array(state.pos);
            if let Some(norm) = state.norm {
                gl.disable_vertex_attrib_array(norm);
            }
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
