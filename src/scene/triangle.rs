use anyhow::Result;
use glow::HasContext;

use super::{angle, static_buffer, Program, Scene};
use crate::geometry::Size;

const VERTEX_SHADER: &str = r#"
uniform mat4 rotation;
attribute vec4 pos;
attribute vec4 color;
varying vec4 v_color;
void main() {
  gl_Position = rotation * pos;
  v_color = color;
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision mediump float;
varying vec4 v_color;
void main() {
  gl_FragColor = v_color;
}
"#;

#[rustfmt::skip]
const VERTICES: [f32; 6] = [
    -0.866, -0.5,
    0.866, -0.5,
    0.0, 1.0,
];

#[rustfmt::skip]
const COLORS: [f32; 9] = [
    1.0, 0.0, 0.0,
    0.0, 1.0, 0.0,
    0.0, 0.0, 1.0,
];

struct State {
    program: Program,
    vertices: glow::Buffer,
    colors: glow::Buffer,
    pos: u32,
    color: u32,
    rotation: Option<glow::UniformLocation>,
}

#[derive(Default)]
pub struct Triangle {
    state: Option<State>,
}

impl Scene for Triangle {
    fn setup(&mut self, gl: &glow::Context) -> Result<()> {
        let program = Program::new(gl, VERTEX_SHADER, FRAGMENT_SHADER)?;

        self.state = Some(State {
            pos: program.attrib(gl, "pos")?,
            color: program.attrib(gl, "color")?,
            rotation: program.uniform(gl, "rotation"),
            vertices: static_buffer(gl, &VERTICES)?,
            colors: static_buffer(gl, &COLORS)?,
            program,
        });

        Ok(())
    }

    fn draw(&mut self, gl: &glow::Context, size: Size, time: u32) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        let angle = angle(time, 10);
        let (sin, cos) = angle.sin_cos();
        #[rustfmt::skip]
        let rotation = [
            cos, sin, 0.0, 0.0,
            -sin, cos, 0.0, 0.0,
            0.0, 0.0, 1.0, 0.0,
            0.0, 0.0, 0.0, 1.0,
        ];

        let (width, height) = size.as_i32();
        unsafe {
            gl.viewport(0, 0, width, height);
            gl.clear_color(0.0, 0.0, 0.0, 0.5);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.uniform_matrix_4_f32_slice(state.rotation.as_ref(), false, &rotation);

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.vertices));
            gl.vertex_attrib_pointer_f32(state.pos, 2, glow::FLOAT, false, 0, 0);
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(state.colors));
            gl.vertex_attrib_pointer_f32(state.color, 3, glow::FLOAT, false, 0, 0);
            gl.enable_vertex_attrib_array(state.pos);
            gl.enable_vertex_attrib_array(state.color);

            gl.draw_arrays(glow::TRIANGLES, 0, 3);

            gl.disable_vertex_attrib_array(state.pos);
            gl.disable_vertex_attrib_array(state.color);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
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
