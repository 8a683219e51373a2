use anyhow::Context;
use sctk::{
    compositor::CompositorState,
    delegate_compositor, delegate_keyboard, delegate_output, delegate_registry, delegate_seat,
    delegate_xdg_shell, delegate_xdg_window,
    output::OutputState,
    reexports::client::{
        globals,
        protocol::{wl_display::WlDisplay, wl_keyboard::WlKeyboard},
        *,
    },
    reexports::{calloop::EventLoop, calloop_wayland_source::WaylandSource},
    registry::RegistryState,
    seat::SeatState,
    shell::{
        xdg::{self, window as xdg_win},
        WaylandSurface,
    },
};

use crate::geometry::Size;
use crate::graphics::{self, RenderTarget};
use crate::render_loop::{Barrier, Canvas, FrameToken, RenderLoop, Shell};
use crate::scene::Scene;
use registry::Capabilities;

mod callback;
mod compositor;
mod keyboard;
mod output;
mod registry;
mod seat;
mod xdg_window;

pub struct Params {
    pub size: Size,
    pub fullscreen: bool,
    pub title: String,
}

pub struct Window {
    registry_state: RegistryState,
    output_state: OutputState,
    seat_state: SeatState,
    capabilities: Capabilities,
    keyboard: Option<WlKeyboard>,

    render_loop: RenderLoop,
    title: String,
    scene: Box<dyn Scene>,

    // Drop order matters: the render target releases the context and its EGL
    // surface before the toplevel destroys the wl_surface underneath.
    target: RenderTarget,
    toplevel: xdg_win::Window,
    _xdg_shell: xdg::XdgShell,
    _compositor: CompositorState,
    display: WlDisplay,
    _conn: Connection,

    exit: bool,
    error: Option<anyhow::Error>,
}

struct Requests<'a> {
    qh: &'a QueueHandle<Window>,
    display: &'a WlDisplay,
    toplevel: &'a xdg_win::Window,
    title: &'a str,
}

impl Shell for Requests<'_> {
    fn request_fullscreen(&mut self) {
        self.toplevel.set_fullscreen(None);
        self.toplevel.commit();
    }

    fn request_windowed(&mut self) {
        self.toplevel.set_title(self.title);
        self.toplevel.unset_fullscreen();
        self.toplevel.commit();
    }

    fn request_sync(&mut self, barrier: Barrier) {
        self.display.sync(self.qh, barrier);
    }

    fn request_frame(&mut self, token: FrameToken) {
        self.toplevel.wl_surface().frame(self.qh, token);
    }
}

struct Painter<'a> {
    target: &'a RenderTarget,
    scene: &'a mut Box<dyn Scene>,
}

impl Canvas for Painter<'_> {
    fn resize(&mut self, size: Size) {
        self.target.resize(size);
    }

    fn draw(&mut self, size: Size, time: u32) {
        self.scene.draw(self.target.gl(), size, time);
    }

    fn present(&mut self) -> anyhow::Result<()> {
        self.target.present()
    }
}

impl Window {
    pub fn new(
        params: Params,
        scene: Box<dyn Scene>,
    ) -> anyhow::Result<(Self, EventLoop<'static, Self>)> {
        let conn = Connection::connect_to_env().context("failed to connect to wayland")?;

        let (globals, event_queue) =
            globals::registry_queue_init(&conn).context("initial registry roundtrip failed")?;
        let qh = event_queue.handle();

        let capabilities = globals.contents().with_list(|list| {
            Capabilities::from_advertised(
                list.iter()
                    .map(|g| (g.name, g.interface.as_str(), g.version)),
            )
        })?;

        let event_loop: EventLoop<Window> =
            EventLoop::try_new().context("failed to initialize the event loop")?;
        WaylandSource::new(conn.clone(), event_queue).insert(event_loop.handle())?;

        let compositor =
            CompositorState::bind(&globals, &qh).context("wl_compositor is not available")?;
        let xdg_shell = xdg::XdgShell::bind(&globals, &qh).context("xdg shell is not available")?;

        let backend = graphics::Backend::new(&conn, &scene.extra_format_hints())?;

        let surface = compositor.create_surface(&qh);
        let toplevel = xdg_shell.create_window(surface, xdg_win::WindowDecorations::None, &qh);
        toplevel.set_app_id(crate::prog_name!());
        toplevel.set_title(params.title.as_str());

        let target = backend.create_target(toplevel.wl_surface(), params.size)?;
        log::info!("render target created at {}", params.size);

        let mut window = Self {
            registry_state: RegistryState::new(&globals),
            output_state: OutputState::new(&globals, &qh),
            seat_state: SeatState::new(&globals, &qh),
            capabilities,
            keyboard: None,
            render_loop: RenderLoop::new(params.size),
            title: params.title,
            scene,
            target,
            toplevel,
            _xdg_shell: xdg_shell,
            _compositor: compositor,
            display: conn.display(),
            _conn: conn,
            exit: false,
            error: None,
        };

        window.set_fullscreen(&qh, params.fullscreen);

        window.target.make_current()?;
        window
            .scene
            .setup(window.target.gl())
            .context("failed to set up the scene")?;

        Ok((window, event_loop))
    }

    fn parts<'a>(&'a mut self, qh: &'a QueueHandle<Self>) -> (&'a mut RenderLoop, Requests<'a>, Painter<'a>) {
        (
            &mut self.render_loop,
            Requests {
                qh,
                display: &self.display,
                toplevel: &self.toplevel,
                title: &self.title,
            },
            Painter {
                target: &self.target,
                scene: &mut self.scene,
            },
        )
    }

    pub fn set_fullscreen(&mut self, qh: &QueueHandle<Self>, fullscreen: bool) {
        let (render_loop, mut shell, mut canvas) = self.parts(qh);
        render_loop.set_fullscreen(fullscreen, &mut shell, &mut canvas);
    }

    pub fn toggle_fullscreen(&mut self, qh: &QueueHandle<Self>) {
        let (render_loop, mut shell, mut canvas) = self.parts(qh);
        render_loop.toggle_fullscreen(&mut shell, &mut canvas);
    }

    fn configure(&mut self, qh: &QueueHandle<Self>, size: Size) {
        let (render_loop, _, mut canvas) = self.parts(qh);
        render_loop.configure(size, &mut canvas);
    }

    fn barrier_done(&mut self, qh: &QueueHandle<Self>, barrier: Barrier) {
        let (render_loop, mut shell, mut canvas) = self.parts(qh);
        if let Err(err) = render_loop.barrier_done(barrier, &mut shell, &mut canvas) {
            self.error = Some(err);
        }
    }

    fn frame_done(&mut self, qh: &QueueHandle<Self>, token: FrameToken, time: u32) {
        let (render_loop, mut shell, mut canvas) = self.parts(qh);
        if let Err(err) = render_loop.frame_done(token, time, &mut shell, &mut canvas) {
            self.error = Some(err);
        }
    }

    pub fn run(mut self, mut event_loop: EventLoop<'static, Self>) -> anyhow::Result<()> {
        loop {
            if let Err(err) = event_loop.dispatch(None, &mut self) {
                log::info!("event dispatch stopped: {}", err);
                return Ok(());
            }

            if let Some(err) = self.error.take() {
                return Err(err);
            }

            if self.exit {
                log::info!("toplevel closed");
                return Ok(());
            }
        }
    }
}

impl Drop for Window {
    fn drop(&mut self) {
        self.scene.teardown(self.target.gl());
    }
}

delegate_compositor!(Window);
delegate_output!(Window);
delegate_seat!(Window);
delegate_keyboard!(Window);
delegate_xdg_shell!(Window);
delegate_xdg_window!(Window);
delegate_registry!(Window);
