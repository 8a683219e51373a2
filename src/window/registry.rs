use anyhow::bail;
use sctk::{
    output::OutputState,
    reexports::client::{Connection, QueueHandle},
    registry::{ProvidesRegistryState, RegistryHandler, RegistryState},
    registry_handlers,
    seat::SeatState,
};

use super::Window;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    Compositor,
    Shell,
    Seat,
}

impl Capability {
    const ALL: [Capability; 3] = [Capability::Compositor, Capability::Shell, Capability::Seat];

    pub fn from_interface(interface: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.interface() == interface)
    }

    pub fn interface(self) -> &'static str {
        match self {
            Capability::Compositor => "wl_compositor",
            Capability::Shell => "xdg_wm_base",
            Capability::Seat => "wl_seat",
        }
    }

    pub fn min_version(self) -> u32 {
        match self {
            Capability::Compositor | Capability::Shell => 1,
            // wl_keyboard.release
            Capability::Seat => 3,
        }
    }

    pub fn is_required(self) -> bool {
        !matches!(self, Capability::Seat)
    }
}

#[derive(Debug, Default)]
pub struct Capabilities {
    bound: Vec<(u32, Capability)>,
}

impl Capabilities {
    pub fn from_advertised<'a>(
        globals: impl IntoIterator<Item = (u32, &'a str, u32)>,
    ) -> anyhow::Result<Self> {
        let mut bound: Vec<(u32, Capability)> = Vec::new();

        for (name, interface, version) in globals {
            let Some(cap) = Capability::from_interface(interface) else {
                log::trace!("ignoring global {} v{}", interface, version);
                continue;
            };
            if version < cap.min_version() {
                log::warn!("{} v{} is too old", interface, version);
                continue;
            }
            if bound.iter().any(|&(_, c)| c == cap) {
                continue;
            }
            log::debug!("found {} v{} (name {})", interface, version, name);
            bound.push((name, cap));
        }

        for cap in Capability::ALL.into_iter().filter(|c| c.is_required()) {
            if !bound.iter().any(|&(_, c)| c == cap) {
                bail!("compositor does not advertise {}", cap.interface());
            }
        }

        Ok(Self { bound })
    }

    pub fn contains(&self, cap: Capability) -> bool {
        self.bound.iter().any(|&(_, c)| c == cap)
    }

    pub fn remove(&mut self, name: u32) -> Option<Capability> {
        let pos = self.bound.iter().position(|&(n, _)| n == name)?;
        Some(self.bound.swap_remove(pos).1)
    }
}

impl RegistryHandler<Window> for Capabilities {
    fn new_global(
        data: &mut Window,
        _conn: &Connection,
        _qh: &QueueHandle<Window>,
        name: u32,
        interface: &str,
        version: u32,
    ) {
        match Capability::from_interface(interface) {
            // seats come and go, SeatState keeps track of them
            Some(Capability::Seat) | None => {}
            Some(cap) if data.capabilities.contains(cap) => {
                log::debug!("ignoring extra {} v{} (name {})", interface, version, name)
            }
            Some(_) => log::debug!("ignoring late {} v{} (name {})", interface, version, name),
        }
    }

    fn remove_global(
        data: &mut Window,
        _conn: &Connection,
        _qh: &QueueHandle<Window>,
        name: u32,
        interface: &str,
    ) {
        if let Some(cap) = data.capabilities.remove(name) {
            if cap.is_required() {
                log::warn!("compositor removed {} which is still in use", interface);
            }
        }
    }
}

impl ProvidesRegistryState for Window {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }

    registry_handlers![OutputState, SeatState, Capabilities];
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("wl_compositor", Some(Capability::Compositor))]
    #[test_case("xdg_wm_base", Some(Capability::Shell))]
    #[test_case("wl_seat", Some(Capability::Seat))]
    #[test_case("wl_shm", None)]
    #[test_case("zwlr_layer_shell_v1", None)]
    fn classify(interface: &str, expected: Option<Capability>) {
        assert_eq!(Capability::from_interface(interface), expected);
    }

    #[test]
    fn all_required_present() {
        let caps = Capabilities::from_advertised([
            (1, "wl_shm", 1),
            (2, "wl_compositor", 5),
            (3, "xdg_wm_base", 2),
        ])
        .unwrap();

        assert!(caps.contains(Capability::Compositor));
        assert!(caps.contains(Capability::Shell));
        assert!(!caps.contains(Capability::Seat));
    }

    #[test_case(&[(1, "xdg_wm_base", 1)], "wl_compositor" ; "no compositor")]
    #[test_case(&[(1, "wl_compositor", 1), (2, "wl_seat", 7)], "xdg_wm_base" ; "no shell")]
    #[test_case(&[(1, "wl_compositor", 0), (2, "xdg_wm_base", 1)], "wl_compositor" ; "too old")]
    fn missing_required(globals: &[(u32, &str, u32)], missing: &str) {
        let err = Capabilities::from_advertised(globals.iter().copied()).unwrap_err();
        assert!(err.to_string().contains(missing), "{}", err);
    }

    #[test_case("wl_compositor", 1)]
    #[test_case("xdg_wm_base", 1)]
    #[test_case("wl_seat", 3)]
    fn minimum_versions(interface: &str, version: u32) {
        let cap = Capability::from_interface(interface).unwrap();
        assert_eq!(cap.min_version(), version);
    }

    #[test]
    fn old_seat_is_skipped() {
        let caps = Capabilities::from_advertised([
            (1, "wl_compositor", 1),
            (2, "xdg_wm_base", 1),
            (3, "wl_seat", 2),
            (4, "wl_seat", 5),
        ])
        .unwrap();

        assert!(caps.contains(Capability::Seat));
        assert!(!caps.bound.contains(&(3, Capability::Seat)));
        assert!(caps.bound.contains(&(4, Capability::Seat)));
    }

    #[test]
    fn removal_of_untracked_is_noop() {
        let mut caps = Capabilities::from_advertised([
            (1, "wl_compositor", 1),
            (2, "xdg_wm_base", 1),
            (3, "wl_seat", 4),
        ])
        .unwrap();

        assert_eq!(caps.remove(42), None);
        assert_eq!(caps.remove(3), Some(Capability::Seat));
        assert_eq!(caps.remove(3), None);
        assert!(caps.contains(Capability::Compositor));
    }

    #[test]
    fn first_advertisement_wins() {
        let mut caps = Capabilities::from_advertised([
            (1, "wl_compositor", 1),
            (2, "wl_compositor", 4),
            (3, "xdg_wm_base", 1),
        ])
        .unwrap();

        assert_eq!(caps.remove(2), None);
        assert_eq!(caps.remove(1), Some(Capability::Compositor));
    }
}
