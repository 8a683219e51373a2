use sctk::{
    output::{OutputHandler, OutputState},
    reexports::client::{protocol::wl_output::WlOutput, *},
};

use super::Window;

// Outputs are only tracked because surface dispatch needs them. Fullscreen
// placement is left to the compositor.
impl OutputHandler for Window {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }

    fn new_output(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, output: WlOutput) {
        if let Some(info) = self.output_state.info(&output) {
            log::debug!(
                "output {} {} {}",
                info.id,
                info.name.as_deref().unwrap_or("unnamed"),
                info.model
            );
        }
    }

    fn update_output(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _output: WlOutput,
    ) {
    }

    fn output_destroyed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        output: WlOutput,
    ) {
        log::debug!("output {:?} gone", output.id());
    }
}
