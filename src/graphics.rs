use anyhow::{anyhow, Context, Result};
use sctk::reexports::client::{protocol::wl_surface::WlSurface, Connection, Proxy};
use wayland_egl::WlEglSurface;

use crate::geometry::Size;
pub use format::FormatHint;

mod format;

type EglInstance = egl::DynamicInstance<egl::EGL1_4>;

const CONTEXT_ATTRIBS: &[egl::Int] = &[egl::CONTEXT_CLIENT_VERSION, 2, egl::NONE];

pub struct Backend {
    egl: EglInstance,
    display: egl::Display,
    config: egl::Config,
    context: egl::Context,
}

impl Backend {
    pub fn new(conn: &Connection, extra_hints: &[FormatHint]) -> Result<Self> {
        let egl = unsafe { EglInstance::load_required() }
            .map_err(|e| anyhow!("failed to load libEGL: {:?}", e))?;

        let display_ptr = conn.backend().display_ptr() as egl::NativeDisplayType;
        let display = unsafe { egl.get_display(display_ptr) }
            .context("no EGL display for the wayland connection")?;

        let (major, minor) = egl
            .initialize(display)
            .context("failed to initialize EGL")?;
        log::info!("EGL {}.{} initialized", major, minor);

        egl.bind_api(egl::OPENGL_ES_API)
            .context("failed to bind the OpenGL ES API")?;

        let config = choose_config(&egl, display, extra_hints)?;

        let context = egl
            .create_context(display, config, None, CONTEXT_ATTRIBS)
            .context("failed to create a GLES2 context")?;

        Ok(Self {
            egl,
            display,
            config,
            context,
        })
    }

    pub fn create_target(self, surface: &WlSurface, size: Size) -> Result<RenderTarget> {
        let (width, height) = size.as_i32();
        let window = WlEglSurface::new(surface.id(), width, height)
            .map_err(|e| anyhow!("failed to create wl_egl_window {}: {:?}", size, e))?;

        let surface = unsafe {
            self.egl.create_window_surface(
                self.display,
                self.config,
                window.ptr() as egl::NativeWindowType,
                None,
            )
        }
        .context("failed to create the EGL window surface")?;

        let gl = unsafe {
            glow::Context::from_loader_function(|name| {
                self.egl
                    .get_proc_address(name)
                    .map_or(std::ptr::null(), |f| f as *const std::ffi::c_void)
            })
        };

        Ok(RenderTarget {
            gl,
            surface,
            backend: self,
            window,
        })
    }
}

impl Drop for Backend {
    fn drop(&mut self) {
        if let Err(err) = self.egl.destroy_context(self.display, self.context) {
            log::warn!("failed to destroy EGL context: {}", err);
        }
        if let Err(err) = self.egl.terminate(self.display) {
            log::warn!("failed to terminate EGL display: {}", err);
        }
    }
}

fn choose_config(
    egl: &EglInstance,
    display: egl::Display,
    extra_hints: &[FormatHint],
) -> Result<egl::Config> {
    let count = egl
        .get_config_count(display)
        .context("failed to count EGL configs")?;
    if count < 1 {
        anyhow::bail!("EGL display offers no configs");
    }

    let attribs = format::config_attribs(extra_hints);
    let mut configs = Vec::with_capacity(count);
    egl.choose_config(display, &attribs, &mut configs)
        .context("eglChooseConfig failed")?;
    log::debug!("{} of {} EGL configs match the hints", configs.len(), count);

    format::select_by_buffer_size(configs, |&config| {
        egl.get_config_attrib(display, config, egl::BUFFER_SIZE)
            .context("failed to query EGL_BUFFER_SIZE")
    })
}

pub struct RenderTarget {
    gl: glow::Context,
    surface: egl::Surface,
    backend: Backend,
    window: WlEglSurface,
}

impl RenderTarget {
    pub fn gl(&self) -> &glow::Context {
        &self.gl
    }

    pub fn resize(&self, size: Size) {
        let (width, height) = size.as_i32();
        self.window.resize(width, height, 0, 0);
    }

    pub fn make_current(&self) -> Result<()> {
        let Backend {
            egl,
            display,
            context,
            ..
        } = &self.backend;

        egl.make_current(
            *display,
            Some(self.surface),
            Some(self.surface),
            Some(*context),
        )
        .context("failed to make the EGL context current")?;

        // Pacing comes from frame callbacks, swaps must not block on the compositor.
        if let Err(err) = egl.swap_interval(*display, 0) {
            log::warn!("failed to set swap interval: {}", err);
        }

        Ok(())
    }

    pub fn present(&self) -> Result<()> {
        self.backend
            .egl
            .swap_buffers(self.backend.display, self.surface)
            .context("eglSwapBuffers failed")
    }
}

impl Drop for RenderTarget {
    fn drop(&mut self) {
        let Backend { egl, display, .. } = &self.backend;

        // Detach the context first: releasing a current surface is backend-defined.
        if let Err(err) = egl.make_current(*display, None, None, None) {
            log::warn!("failed to release EGL context: {}", err);
        }
        if let Err(err) = egl.destroy_surface(*display, self.surface) {
            log::warn!("failed to destroy EGL surface: {}", err);
        }
    }
}
