use sctk::reexports::client::{
    protocol::wl_callback::{self, WlCallback},
    *,
};

use super::Window;
use crate::render_loop::{Barrier, FrameToken};

impl Dispatch<WlCallback, FrameToken> for Window {
    fn event(
        state: &mut Self,
        _proxy: &WlCallback,
        event: wl_callback::Event,
        token: &FrameToken,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_callback::Event::Done { callback_data } = event {
            state.frame_done(qh, *token, callback_data);
        }
    }
}

impl Dispatch<WlCallback, Barrier> for Window {
    fn event(
        state: &mut Self,
        _proxy: &WlCallback,
        event: wl_callback::Event,
        barrier: &Barrier,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
    ) {
        if let wl_callback::Event::Done { .. } = event {
            state.barrier_done(qh, *barrier);
        }
    }
}
