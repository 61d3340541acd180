use crate::config::{ConfigStore, Settings, SharedSettings};
use crate::overlay::{Corner, OverlayWindow};
use crate::probe::Reading;
use crate::sampler::ActivityGate;
use crate::tray::command::TrayCommand;
use crate::tray::surface::{EditOutcome, RenderLayer, SettingsEditor};
use tracing::{debug, info, warn};

/// Whether the event loop keeps running after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Mediates between tray commands, the settings store and the overlay window.
///
/// This is the only writer of `SharedSettings`. Every accepted change is
/// persisted before it is published; a failed save is logged and the change
/// still takes effect for the running session.
pub struct TrayController<R: RenderLayer, E: SettingsEditor> {
    store: ConfigStore,
    settings: SharedSettings,
    window: OverlayWindow,
    renderer: R,
    editor: E,
    gate: ActivityGate,
    last_reading: Reading,
}

impl<R: RenderLayer, E: SettingsEditor> TrayController<R, E> {
    /// Create the (hidden) overlay window from the current settings
    pub fn new(
        store: ConfigStore,
        settings: SharedSettings,
        renderer: R,
        editor: E,
        gate: ActivityGate,
    ) -> Self {
        let current = settings.snapshot();
        let window = OverlayWindow::new(
            current.position,
            renderer.screen_size(),
            current.window_flags(),
        );
        gate.set_active(false);

        let mut controller = Self {
            store,
            settings,
            window,
            renderer,
            editor,
            gate,
            last_reading: Reading::placeholder(),
        };
        controller.recreate_window();
        controller
    }

    pub fn window(&self) -> &OverlayWindow {
        &self.window
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    pub fn settings(&self) -> &SharedSettings {
        &self.settings
    }

    pub fn store(&self) -> &ConfigStore {
        &self.store
    }

    pub fn dispatch(&mut self, command: TrayCommand) -> Flow {
        debug!(command = ?command, "Dispatching tray command");
        match command {
            TrayCommand::ShowOverlay => self.show_overlay(),
            TrayCommand::HideOverlay => self.hide_overlay(),
            TrayCommand::ToggleOverlay => self.toggle_overlay(),
            TrayCommand::ToggleClickThrough => self.toggle_click_through(),
            TrayCommand::SetPosition(corner) => self.set_position(corner),
            TrayCommand::OpenSettings => {
                self.open_settings(false);
            }
            TrayCommand::Exit => return self.exit(),
        }
        Flow::Continue
    }

    pub fn show_overlay(&mut self) {
        self.window.set_visible(true);
        self.renderer.set_visible(true);
        self.gate.set_active(true);
        self.reposition();
        info!("Overlay shown");
    }

    pub fn hide_overlay(&mut self) {
        self.window.set_visible(false);
        self.renderer.set_visible(false);
        self.gate.set_active(false);
        info!("Overlay hidden");
    }

    pub fn toggle_overlay(&mut self) {
        if self.window.is_visible() {
            self.hide_overlay();
        } else {
            self.show_overlay();
        }
    }

    pub fn toggle_click_through(&mut self) {
        let mut next = (*self.settings.snapshot()).clone();
        next.click_through = !next.click_through;
        info!(click_through = next.click_through, "Toggling click-through");
        self.commit(next);
        self.recreate_window();
    }

    pub fn set_position(&mut self, corner: Corner) {
        let mut next = (*self.settings.snapshot()).clone();
        next.position = corner;
        self.commit(next);
        let position = self.window.set_corner(corner);
        self.renderer.move_to(position);
        info!(corner = %corner, x = position.x, y = position.y, "Overlay moved to corner");
    }

    /// Run the modal settings dialog until it is applied or cancelled.
    ///
    /// Returns true when new settings were accepted. A candidate that fails
    /// validation is reported back and the dialog is shown again with it.
    /// Nothing is persisted or published before an accepted apply. The
    /// overlay is hidden while the dialog owns the terminal.
    pub fn open_settings(&mut self, first_run: bool) -> bool {
        self.renderer.set_visible(false);
        let accepted = self.run_dialog(first_run);
        self.renderer.set_visible(self.window.is_visible());
        accepted
    }

    fn run_dialog(&mut self, first_run: bool) -> bool {
        let mut current = (*self.settings.snapshot()).clone();

        loop {
            let outcome = match self.editor.edit(&current, first_run) {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!(error = %e, "Settings dialog failed, treating as cancel");
                    return false;
                }
            };

            match outcome {
                EditOutcome::Cancel => {
                    debug!("Settings dialog cancelled");
                    return false;
                }
                EditOutcome::Reset => {
                    // Refill the dialog only; defaults take effect on apply
                    debug!("Settings dialog reset to defaults");
                    current = Settings::default();
                }
                EditOutcome::Apply(candidate) => match candidate.clone().validate() {
                    Ok(accepted) => {
                        info!(host = %accepted.host, "Settings applied");
                        self.commit(accepted.clone());
                        self.publish(accepted);
                        self.show_overlay();
                        return true;
                    }
                    Err(e) => {
                        debug!(error = %e, "Settings rejected");
                        self.editor.reject(&e);
                        current = candidate;
                    }
                },
            }
        }
    }

    /// Show a one-off message without disturbing the overlay line
    pub fn notice(&mut self, message: &str) {
        self.renderer.notice(message);
    }

    /// Feed a reading from the sampler to the window and re-pin it
    pub fn on_reading(&mut self, reading: Reading) {
        self.last_reading = reading;
        self.reposition();
    }

    /// Flush settings and close the window
    pub fn exit(&mut self) -> Flow {
        self.gate.set_active(false);
        if let Err(e) = self.store.save(&self.settings.snapshot()) {
            warn!(error = %e, "Failed to flush settings on exit");
        }
        self.renderer.close();
        info!("Overlay closed");
        Flow::Exit
    }

    fn commit(&mut self, next: Settings) {
        if let Err(e) = self.store.save(&next) {
            warn!(error = %e, "Settings not persisted, keeping them for this session");
        }
        self.settings.replace(next);
    }

    /// Bring the window in line with the live settings
    fn publish(&mut self, settings: Settings) {
        self.settings.replace(settings);
        let corner = self.settings.snapshot().position;
        self.window.set_corner(corner);
        self.recreate_window();
    }

    fn recreate_window(&mut self) {
        let flags = self.settings.snapshot().window_flags();
        self.window.set_flags(flags);
        self.renderer.create_window(flags);
        self.renderer.set_visible(self.window.is_visible());
        self.reposition();
    }

    fn reposition(&mut self) {
        let content = self.renderer.render(&self.last_reading);
        let position = self.window.set_content_size(content);
        self.renderer.move_to(position);
    }
}
