//! Event loop: the single scheduler that owns the controller.
//!
//! Readings from the sampler thread and commands from the input thread are
//! funneled through one channel and handled in arrival order on the calling
//! thread.

use crate::probe::Reading;
use crate::sampler::DisplaySink;
use crate::tray::{Flow, RenderLayer, SettingsEditor, TrayCommand, TrayController};
use std::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Reading(Reading),
    Command(TrayCommand),
    /// Message for the user, e.g. help or a rejected command
    Notice(String),
    /// The command input reached end of file
    InputClosed,
}

/// Display sink that forwards readings to the event loop
#[derive(Debug, Clone)]
pub struct ChannelSink {
    tx: Sender<AppEvent>,
}

impl ChannelSink {
    pub fn new(tx: Sender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl DisplaySink for ChannelSink {
    fn publish(&self, reading: Reading) {
        // A closed channel means the event loop is gone; nothing left to show
        let _ = self.tx.send(AppEvent::Reading(reading));
    }
}

pub struct App<R: RenderLayer, E: SettingsEditor> {
    controller: TrayController<R, E>,
    tx: Sender<AppEvent>,
    rx: Receiver<AppEvent>,
}

impl<R: RenderLayer, E: SettingsEditor> App<R, E> {
    pub fn new(controller: TrayController<R, E>) -> Self {
        let (tx, rx) = mpsc::channel();
        Self::with_channel(controller, tx, rx)
    }

    /// Use a channel created earlier, when producers must exist before the
    /// controller does
    pub fn with_channel(
        controller: TrayController<R, E>,
        tx: Sender<AppEvent>,
        rx: Receiver<AppEvent>,
    ) -> Self {
        Self { controller, tx, rx }
    }

    pub fn sender(&self) -> Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn sink(&self) -> ChannelSink {
        ChannelSink::new(self.sender())
    }

    pub fn controller(&self) -> &TrayController<R, E> {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut TrayController<R, E> {
        &mut self.controller
    }

    /// Handle one event
    pub fn handle(&mut self, event: AppEvent) -> Flow {
        match event {
            AppEvent::Reading(reading) => {
                self.controller.on_reading(reading);
                Flow::Continue
            }
            AppEvent::Command(command) => self.controller.dispatch(command),
            AppEvent::Notice(message) => {
                self.controller.notice(&message);
                Flow::Continue
            }
            AppEvent::InputClosed => {
                info!("Command input closed, overlay keeps running");
                Flow::Continue
            }
        }
    }

    /// Process events until an exit command arrives.
    ///
    /// The loop holds a sender itself, so it only ends through `Exit`.
    pub fn run(&mut self) {
        info!("Event loop started");
        while let Ok(event) = self.rx.recv() {
            if self.handle(event) == Flow::Exit {
                break;
            }
        }
        debug!("Event loop finished");
    }
}
