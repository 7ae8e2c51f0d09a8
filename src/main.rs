use std::{sync::mpsc, thread, time::Instant};

use libremarkable::{appctx, framebuffer::core::Framebuffer, input::InputEvent};
use log::{debug, info, warn};

use crate::{
    config::Settings,
    controller::{PickerController, PickerEvent},
    dispatch::Dispatcher,
    haptics::NoHaptics,
    pulse::Pulse,
    selector::RandomSelector,
};

mod config;
mod controller;
mod dispatch;
mod drawing;
mod haptics;
mod input;
mod pulse;
mod registry;
mod render;
mod selector;
mod timer;

fn spawn_picker(settings: Settings, input: mpsc::Receiver<PickerEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let fb = Framebuffer::new();
        let controller = PickerController::new(
            settings.countdown(),
            RandomSelector::new(settings.seed),
            NoHaptics::default(),
        );
        let mut dispatcher = Dispatcher::new(controller, Pulse::new(Instant::now()), fb);
        dispatcher.run(input);
    })
}

fn main() {
    env_logger::init();
    let settings = Settings::load();
    info!("Starting picker with {:?} countdown", settings.countdown());

    let (input_tx, input_rx) = mpsc::channel();
    let picker = spawn_picker(settings, input_rx);

    let mut app: appctx::ApplicationContext<'_> = appctx::ApplicationContext::default();
    info!("Init complete. Beginning event dispatch...");

    // Blocking call to process events from the touchscreen
    app.start_event_loop(false, true, false, |_ctx, evt| match evt {
        InputEvent::MultitouchEvent { event } => {
            if let Some(picker_event) = input::translate(event) {
                if input_tx.send(picker_event).is_err() {
                    warn!("Picker thread has gone away, dropping {picker_event:?}");
                }
            }
        }
        ev => {
            debug!("event: {ev:?}");
        }
    });

    drop(input_tx);
    if picker.join().is_err() {
        warn!("Picker thread panicked");
    }
}
