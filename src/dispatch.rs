use std::{
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::{Duration, Instant},
};

use log::{debug, info};

use crate::{
    controller::{PickerController, PickerEvent},
    haptics::Haptics,
    pulse::Pulse,
    render::RenderModel,
    selector::Selector,
};

pub const FRAME_INTERVAL: Duration = Duration::from_millis(100);

/// Where frames end up.
pub trait Surface {
    fn paint(&mut self, model: &RenderModel);
    fn blank(&mut self);
}

/// The single event thread. Owns the controller, the pulse and the surface; input
/// arrives over a channel and a quiet channel doubles as the frame clock.
pub struct Dispatcher<S: Selector, H: Haptics, D: Surface> {
    controller: PickerController<S, H>,
    pulse: Pulse,
    surface: D,
    last_frame: Option<Instant>,
    blank_shown: bool,
}

impl<S: Selector, H: Haptics, D: Surface> Dispatcher<S, H, D> {
    pub fn new(controller: PickerController<S, H>, pulse: Pulse, surface: D) -> Self {
        Self {
            controller,
            pulse,
            surface,
            last_frame: None,
            blank_shown: false,
        }
    }

    #[cfg(test)]
    pub fn controller(&self) -> &PickerController<S, H> {
        &self.controller
    }

    #[cfg(test)]
    pub fn surface(&self) -> &D {
        &self.surface
    }

    fn frame_due(&self, now: Instant) -> bool {
        match self.last_frame {
            Some(last) => now.saturating_duration_since(last) >= FRAME_INTERVAL,
            None => true,
        }
    }

    /// Applies a whole batch of input before painting at most once. Moves only
    /// repaint when a frame is due; every other event repaints at once.
    pub fn on_events<I>(&mut self, events: I, now: Instant)
    where
        I: IntoIterator<Item = PickerEvent>,
    {
        let mut repaint = false;
        for event in events {
            self.controller.handle(event, now);
            repaint |= !matches!(event, PickerEvent::Moved { .. });
        }
        if repaint || self.frame_due(now) {
            self.frame(now);
        }
    }

    pub fn on_frame(&mut self, now: Instant) {
        self.controller.advance(now);
        self.frame(now);
    }

    fn frame(&mut self, now: Instant) {
        let model = self.controller.render(self.pulse.scale_at(now));
        if model.is_blank() {
            if !self.blank_shown {
                debug!("Nothing on screen, blanking");
                self.surface.blank();
                self.blank_shown = true;
            }
        } else {
            self.surface.paint(&model);
            self.blank_shown = false;
        }
        self.last_frame = Some(now);
    }

    /// Runs until every sender of `input` has gone away.
    pub fn run(&mut self, input: Receiver<PickerEvent>) {
        loop {
            match input.recv_timeout(FRAME_INTERVAL) {
                Ok(event) => {
                    let pending: Vec<PickerEvent> =
                        std::iter::once(event).chain(input.try_iter()).collect();
                    self.on_events(pending, Instant::now());
                }
                Err(RecvTimeoutError::Timeout) => self.on_frame(Instant::now()),
                Err(RecvTimeoutError::Disconnected) => {
                    info!("Input closed, stopping picker");
                    return;
                }
            }
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;
    use std::{
        sync::mpsc,
        time::{Duration, Instant},
    };

    use super::{Dispatcher, Surface};
    use crate::{
        controller::{PickerController, PickerEvent},
        haptics::RecordingHaptics,
        pulse::Pulse,
        registry::Position,
        render::RenderModel,
        selector::RandomSelector,
        timer::DEFAULT_COUNTDOWN,
    };

    #[derive(Default)]
    struct RecordingSurface {
        frames: Vec<RenderModel>,
        blanks: usize,
    }

    impl Surface for RecordingSurface {
        fn paint(&mut self, model: &RenderModel) {
            self.frames.push(model.clone());
        }

        fn blank(&mut self) {
            self.blanks += 1;
        }
    }

    type TestDispatcher = Dispatcher<RandomSelector, RecordingHaptics, RecordingSurface>;

    fn dispatcher(start: Instant) -> TestDispatcher {
        Dispatcher::new(
            PickerController::new(
                DEFAULT_COUNTDOWN,
                RandomSelector::seeded(3),
                RecordingHaptics::default(),
            ),
            Pulse::new(start),
            RecordingSurface::default(),
        )
    }

    fn ms(millis: u64) -> Duration {
        Duration::from_millis(millis)
    }

    fn press(id: i32) -> PickerEvent {
        PickerEvent::Added {
            id,
            position: Position::new(100.0, 100.0),
        }
    }

    #[test]
    fn idle_screen_blanks_once() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        for step in 0..10 {
            dispatcher.on_frame(start + ms(step * 100));
        }
        assert_eq!(1, dispatcher.surface().blanks);
        assert!(dispatcher.surface().frames.is_empty());
    }

    #[test]
    fn press_paints_immediately_with_countdown() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        dispatcher.on_events([press(1)], start);
        let frames = &dispatcher.surface().frames;
        assert_eq!(1, frames.len());
        assert_eq!(Some("5".to_string()), frames[0].countdown_label);
    }

    #[test]
    fn moves_are_throttled_to_frame_rate() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        dispatcher.on_events([press(1)], start);
        for step in 1..=9 {
            dispatcher.on_events(
                [PickerEvent::Moved {
                    id: 1,
                    position: Position::new(step as f32, 0.0),
                }],
                start + ms(step * 10),
            );
        }
        assert_eq!(1, dispatcher.surface().frames.len());
        dispatcher.on_events(
            [PickerEvent::Moved {
                id: 1,
                position: Position::new(50.0, 0.0),
            }],
            start + ms(100),
        );
        assert_eq!(2, dispatcher.surface().frames.len());
    }

    #[test]
    fn frames_carry_the_pulse() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        dispatcher.on_events([press(1)], start);
        dispatcher.on_frame(start + ms(800));
        let frames = &dispatcher.surface().frames;
        assert!((frames[0].circles[0].radius - 180.0).abs() < 1e-2);
        assert!((frames[1].circles[0].radius - 220.0).abs() < 1e-2);
    }

    #[test]
    fn frame_clock_drives_the_pick() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        dispatcher.on_events([press(1)], start);
        dispatcher.on_frame(start + ms(5000));
        assert_eq!(Some(1), dispatcher.controller().state().picked_id);
        let last = dispatcher.surface().frames.last().unwrap();
        assert!(last.circles[0].picked);
        assert_eq!(None, last.countdown_label);
    }

    #[test]
    fn lifting_blanks_again() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        dispatcher.on_frame(start);
        dispatcher.on_events([press(1)], start + ms(100));
        dispatcher.on_events([PickerEvent::Removed { id: 1 }], start + ms(200));
        assert_eq!(2, dispatcher.surface().blanks);
    }

    #[test]
    fn run_stops_when_input_closes() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        let (tx, rx) = mpsc::channel();
        tx.send(press(1)).unwrap();
        tx.send(press(2)).unwrap();
        tx.send(PickerEvent::Removed { id: 1 }).unwrap();
        drop(tx);
        dispatcher.run(rx);
        assert_eq!(vec![2], dispatcher.controller().registry().ids());
        assert!(dispatcher.controller().state().timer_active);
    }

    #[test]
    fn queued_input_is_applied_before_painting() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        let (tx, rx) = mpsc::channel();
        tx.send(press(1)).unwrap();
        tx.send(press(2)).unwrap();
        tx.send(press(3)).unwrap();
        tx.send(PickerEvent::Moved {
            id: 2,
            position: Position::new(40.0, 40.0),
        })
        .unwrap();
        drop(tx);
        dispatcher.run(rx);

        let frames = &dispatcher.surface().frames;
        assert_eq!(1, frames.len());
        let ids: Vec<i32> = frames[0].circles.iter().map(|c| c.id).collect();
        assert_eq!(vec![1, 2, 3], ids);
        assert_eq!(Position::new(40.0, 40.0), frames[0].circles[1].center);
    }

    #[test]
    fn batch_of_moves_paints_once() {
        let start = Instant::now();
        let mut dispatcher = dispatcher(start);
        dispatcher.on_events([press(1)], start);
        let moves = (1..=5).map(|step| PickerEvent::Moved {
            id: 1,
            position: Position::new(step as f32, 0.0),
        });
        dispatcher.on_events(moves, start + ms(150));
        let frames = &dispatcher.surface().frames;
        assert_eq!(2, frames.len());
        assert_eq!(Position::new(5.0, 0.0), frames[1].circles[0].center);
    }
}
