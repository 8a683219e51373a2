use sctk::{
    compositor::CompositorHandler,
    reexports::client::{
        protocol::{wl_output, wl_surface::WlSurface},
        *,
    },
};

use super::Window;

// Frame callbacks are requested with their own token and dispatched in `callback.rs`,
// so `frame` is never reached through here.
impl CompositorHandler for Window {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &WlSurface,
        new_factor: i32,
    ) {
        log::debug!("ignoring scale factor {}", new_factor);
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &WlSurface,
        _new_transform: wl_output::Transform,
    ) {
        log::warn!("unexpected transform_changed")
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &WlSurface,
        _time: u32,
    ) {
    }
}
