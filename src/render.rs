use crate::{
    controller::PickerState,
    registry::{ContactId, ContactRegistry, Position},
};

pub const CONTACT_RADIUS: f32 = 200.0;
pub const PICKED_RADIUS: f32 = 230.0;
pub const RING_OFFSET: f32 = 20.0;
pub const RING_WIDTH: f32 = 14.0;

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Ring {
    pub radius: f32,
    pub width: f32,
}

#[derive(PartialEq, Debug, Clone, Copy)]
pub struct Circle {
    pub id: ContactId,
    pub center: Position,
    pub radius: f32,
    pub picked: bool,
    pub ring: Option<Ring>,
}

/// What the screen should show right now.
#[derive(PartialEq, Debug, Clone, Default)]
pub struct RenderModel {
    pub circles: Vec<Circle>,
    pub countdown_label: Option<String>,
}

impl RenderModel {
    pub fn build(registry: &ContactRegistry, state: &PickerState, pulse_scale: f32) -> RenderModel {
        let circles = registry
            .iter()
            .map(|contact| {
                let picked = state.picked_id == Some(contact.id);
                let base = if picked { PICKED_RADIUS } else { CONTACT_RADIUS };
                let radius = base * pulse_scale;
                Circle {
                    id: contact.id,
                    center: contact.position,
                    radius,
                    picked,
                    ring: picked.then_some(Ring {
                        radius: radius + RING_OFFSET,
                        width: RING_WIDTH,
                    }),
                }
            })
            .collect();
        RenderModel {
            circles,
            countdown_label: state.countdown_label.clone(),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.circles.is_empty() && self.countdown_label.is_none()
    }
}
