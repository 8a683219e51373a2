use sctk::{
    reexports::client::*,
    shell::xdg::window::{self, WindowConfigure, WindowHandler},
};

use super::Window;
use crate::geometry::Size;

impl WindowHandler for Window {
    fn request_close(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _window: &window::Window,
    ) {
        self.exit = true;
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        _window: &window::Window,
        configure: WindowConfigure,
        _serial: u32,
    ) {
        // A configure for the mode we are leaving may still be in flight.
        let fullscreen = configure.is_fullscreen();
        if fullscreen != self.render_loop.is_fullscreen() {
            log::debug!("ignoring configure with fullscreen={}", fullscreen);
            return;
        }

        if let (Some(w), Some(h)) = configure.new_size {
            self.configure(qh, Size::new(w.get(), h.get()));
        }
    }
}
