use std::time::{Duration, Instant};

use log::{debug, info};

use crate::{
    haptics::{Haptics, PICK_PULSE},
    registry::{ContactId, ContactRegistry, Position},
    render::RenderModel,
    selector::Selector,
    timer::{SelectionTimer, TimerEvent},
};

#[derive(PartialEq, Debug, Clone, Copy)]
pub enum PickerEvent {
    Added { id: ContactId, position: Position },
    Moved { id: ContactId, position: Position },
    Removed { id: ContactId },
}

#[derive(PartialEq, Debug, Clone, Default)]
pub struct PickerState {
    pub picked_id: Option<ContactId>,
    pub countdown_label: Option<String>,
    pub timer_active: bool,
}

/// Owns the touch session: which fingers are down, the countdown, and the pick.
/// Every handler runs to completion on the event thread before the next one starts.
pub struct PickerController<S: Selector, H: Haptics> {
    registry: ContactRegistry,
    state: PickerState,
    timer: SelectionTimer,
    selector: S,
    haptics: H,
}

impl<S: Selector, H: Haptics> PickerController<S, H> {
    pub fn new(countdown: Duration, selector: S, haptics: H) -> PickerController<S, H> {
        PickerController {
            registry: ContactRegistry::new(),
            state: PickerState::default(),
            timer: SelectionTimer::new(countdown),
            selector,
            haptics,
        }
    }

    #[cfg(test)]
    pub fn registry(&self) -> &ContactRegistry {
        &self.registry
    }

    pub fn state(&self) -> &PickerState {
        &self.state
    }

    #[cfg(test)]
    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Applies one input event, then delivers whatever the timer has due at `now`.
    pub fn handle(&mut self, event: PickerEvent, now: Instant) {
        match event {
            PickerEvent::Added { id, position } => self.on_contact_added(id, position, now),
            PickerEvent::Moved { id, position } => self.on_contact_moved(id, position),
            PickerEvent::Removed { id } => self.on_contact_removed(id),
        }
        self.advance(now);
    }

    pub fn on_contact_added(&mut self, id: ContactId, position: Position, now: Instant) {
        let was_empty = self.registry.is_empty();
        self.registry.upsert(id, position);
        debug!(
            "Contact {id} down at {position:?}, {} touching",
            self.registry.len()
        );
        if was_empty {
            info!("First contact {id}, starting {:?} countdown", self.timer.total());
            self.state.picked_id = None;
            self.state.timer_active = true;
            self.timer.start(now);
        }
    }

    pub fn on_contact_moved(&mut self, id: ContactId, position: Position) {
        self.registry.upsert(id, position);
    }

    pub fn on_contact_removed(&mut self, id: ContactId) {
        if !self.registry.remove(id) {
            debug!("Ignoring lift of unknown contact {id}");
            return;
        }
        debug!("Contact {id} lifted");
        if self.registry.is_empty() {
            if self.timer.is_running() {
                info!("All contacts lifted, countdown cancelled");
            }
            self.timer.cancel();
            self.state = PickerState::default();
        }
    }

    pub fn on_tick(&mut self, remaining_secs: u64) {
        debug!("Countdown {remaining_secs}");
        self.state.countdown_label = Some(remaining_secs.to_string());
    }

    pub fn on_timer_complete(&mut self) {
        self.state.countdown_label = None;
        self.state.timer_active = false;
        if self.registry.is_empty() {
            info!("Countdown finished with no contacts, nothing to pick");
            return;
        }
        let ids = self.registry.ids();
        self.state.picked_id = self.selector.choose(&ids);
        info!("Picked {:?} out of {ids:?}", self.state.picked_id);
        self.haptics.pulse(PICK_PULSE);
    }

    /// Delivers a single timer event, dropping it if its run has since been
    /// cancelled or replaced. Returns whether it was applied.
    pub fn deliver(&mut self, event: TimerEvent) -> bool {
        if !self.timer.is_current(event.token()) {
            debug!("Dropping stale timer event {event:?}");
            return false;
        }
        match event {
            TimerEvent::Tick { remaining_secs, .. } => self.on_tick(remaining_secs),
            TimerEvent::Complete { token } => {
                self.on_timer_complete();
                self.timer.finish(token);
            }
        }
        true
    }

    /// Returns whether any timer event was applied.
    pub fn advance(&mut self, now: Instant) -> bool {
        let mut changed = false;
        for event in self.timer.poll(now) {
            changed |= self.deliver(event);
        }
        changed
    }

    pub fn render(&self, pulse_scale: f32) -> RenderModel {
        RenderModel::build(&self.registry, &self.state, pulse_scale)
    }
}
