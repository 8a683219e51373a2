use sctk::{
    reexports::client::{protocol::wl_seat::WlSeat, *},
    seat::{Capability, SeatHandler, SeatState},
};

use super::registry;
use super::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyboardChange {
    Acquire,
    TooOld,
    Release,
    Keep,
}

fn keyboard_change(
    is_keyboard: bool,
    added: bool,
    tracked: bool,
    seat_version: u32,
) -> KeyboardChange {
    match (is_keyboard, added, tracked) {
        (true, true, false) if seat_version < registry::Capability::Seat.min_version() => {
            KeyboardChange::TooOld
        }
        (true, true, false) => KeyboardChange::Acquire,
        (true, false, true) => KeyboardChange::Release,
        _ => KeyboardChange::Keep,
    }
}

impl SeatHandler for Window {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }

    fn new_capability(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        seat: WlSeat,
        capability: Capability,
    ) {
        let is_keyboard = matches!(capability, Capability::Keyboard);
        match keyboard_change(is_keyboard, true, self.keyboard.is_some(), seat.version()) {
            KeyboardChange::Acquire => match self.seat_state.get_keyboard(qh, &seat, None) {
                Ok(keyboard) => {
                    log::debug!("keyboard acquired");
                    self.keyboard = Some(keyboard);
                }
                Err(err) => log::warn!("failed to get keyboard: {}", err),
            },
            KeyboardChange::TooOld => {
                log::warn!("wl_seat v{} is too old, keyboard ignored", seat.version())
            }
            KeyboardChange::Release | KeyboardChange::Keep => {}
        }
    }

    fn remove_capability(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        seat: WlSeat,
        capability: Capability,
    ) {
        let is_keyboard = matches!(capability, Capability::Keyboard);
        if keyboard_change(is_keyboard, false, self.keyboard.is_some(), seat.version())
            == KeyboardChange::Release
        {
            if let Some(k) = self.keyboard.take() {
                log::debug!("keyboard released");
                k.release();
            }
        }
    }

    fn new_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: WlSeat) {}

    fn remove_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: WlSeat) {}
}
