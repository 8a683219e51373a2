use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use glow::HasContext;
use serde::Deserialize;

use crate::geometry::Size;
use crate::graphics::FormatHint;

mod cube;
mod icosahedron;
mod triangle;

/// Drawing strategy the window invokes at its lifecycle points.
///
/// `setup` runs once with the context current, `draw` once per presented frame and
/// `teardown` right before the render target is destroyed. `teardown` is also called
/// when `setup` failed or never ran, so it must only release what was created.
pub trait Scene {
    fn extra_format_hints(&self) -> Vec<FormatHint> {
        Vec::new()
    }

    fn setup(&mut self, gl: &glow::Context) -> Result<()>;

    fn draw(&mut self, gl: &glow::Context, size: Size, time: u32);

    fn teardown(&mut self, gl: &glow::Context);
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneKind {
    #[default]
    Triangle,
    Cube,
    Icosahedron,
}

impl SceneKind {
    pub fn build(self) -> Box<dyn Scene> {
        match self {
            SceneKind::Triangle => Box::<triangle::Triangle>::default(),
            SceneKind::Cube => Box::<cube::Cube>::default(),
            SceneKind::Icosahedron => Box::<icosahedron::Icosahedron>::default(),
        }
    }
}

impl FromStr for SceneKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "triangle" => Ok(SceneKind::Triangle),
            "cube" => Ok(SceneKind::Cube),
            "icosahedron" => Ok(SceneKind::Icosahedron),
            _ => Err(format!(
                "unknown scene \"{}\" (triangle, cube, icosahedron)",
                s
            )),
        }
    }
}

struct Program {
    program: glow::Program,
    shaders: [glow::Shader; 2],
}

impl Program {
    fn new(gl: &glow::Context, vertex: &str, fragment: &str) -> Result<Self> {
        let fragment = compile_shader(gl, glow::FRAGMENT_SHADER, fragment)?;
        let vertex = compile_shader(gl, glow::VERTEX_SHADER, vertex)?;

        unsafe {
            let program = gl.create_program().map_err(|e| anyhow!(e))?;
            gl.attach_shader(program, fragment);
            gl.attach_shader(program, vertex);
            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                bail!("linking:\n{}", log);
            }

            gl.use_program(Some(program));

            Ok(Self {
                program,
                shaders: [fragment, vertex],
            })
        }
    }

    fn attrib(&self, gl: &glow::Context, name: &str) -> Result<u32> {
        unsafe { gl.get_attrib_location(self.program, name) }
            .ok_or_else(|| anyhow!("attribute {} is not active", name))
    }

    fn uniform(&self, gl: &glow::Context, name: &str) -> Option<glow::UniformLocation> {
        unsafe { gl.get_uniform_location(self.program, name) }
    }

    fn delete(self, gl: &glow::Context) {
        unsafe {
            gl.use_program(None);
            for shader in self.shaders {
                gl.delete_shader(shader);
            }
            gl.delete_program(self.program);
        }
    }
}

fn compile_shader(gl: &glow::Context, kind: u32, source: &str) -> Result<glow::Shader> {
    let stage = if kind == glow::VERTEX_SHADER {
        "vertex"
    } else {
        "fragment"
    };

    unsafe {
        let shader = gl.create_shader(kind).map_err(|e| anyhow!(e))?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            bail!("compiling {}: {}", stage, log);
        }

        Ok(shader)
    }
}

fn static_buffer(gl: &glow::Context, data: &[f32]) -> Result<glow::Buffer> {
    unsafe {
        let buffer = gl.create_buffer().map_err(|e| anyhow!(e))?;
        gl.bind_buffer(glow::ARRAY_BUFFER, Some(buffer));
        gl.buffer_data_u8_slice(
            glow::ARRAY_BUFFER,
            bytemuck::cast_slice(data),
            glow::STATIC_DRAW,
        );
        gl.bind_buffer(glow::ARRAY_BUFFER, None);
        Ok(buffer)
    }
}

fn angle(time: u32, period: u32) -> f32 {
    ((time / period) % 360) as f32 * std::f32::consts::PI / 180.0
}
