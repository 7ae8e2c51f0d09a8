use libremarkable::{cgmath::Point2, input::MultitouchEvent};
use log::debug;

use crate::{
    controller::PickerEvent,
    registry::{ContactId, Position},
};

fn position(pos: Point2<u16>) -> Position {
    Position::new(pos.x as f32, pos.y as f32)
}

pub fn translate(event: MultitouchEvent) -> Option<PickerEvent> {
    match event {
        MultitouchEvent::Press { finger } => Some(PickerEvent::Added {
            id: finger.tracking_id as ContactId,
            position: position(finger.pos),
        }),
        MultitouchEvent::Move { finger } => Some(PickerEvent::Moved {
            id: finger.tracking_id as ContactId,
            position: position(finger.pos),
        }),
        MultitouchEvent::Release { finger } => Some(PickerEvent::Removed {
            id: finger.tracking_id as ContactId,
        }),
        ev => {
            debug!("Ignoring multitouch event: {ev:?}");
            None
        }
    }
}
