use std::time::Instant;

use libremarkable::{
    cgmath::Point2,
    framebuffer::{
        common::{color, display_temp, dither_mode, mxcfb_rect, waveform_mode},
        core::Framebuffer,
        FramebufferDraw, FramebufferRefresh,
    },
};
use log::debug;

use crate::{
    dispatch::Surface,
    render::{Circle, RenderModel},
};

const COUNTDOWN_TEXT_SIZE: f32 = 150.0;
const COUNTDOWN_BASELINE_OFFSET: f32 = 50.0;
const CONTACT_FILL: color = color::RGB(0xCC, 0xCC, 0xCC);
const PICKED_FILL: color = color::RGB(0x44, 0x44, 0x44);

fn start_refresh(fb: &Framebuffer, region: &mxcfb_rect, waveform: waveform_mode) -> u32 {
    fb.partial_refresh(
        region,
        libremarkable::framebuffer::PartialRefreshMode::Async,
        waveform,
        display_temp::TEMP_USE_REMARKABLE_DRAW,
        dither_mode::EPDC_FLAG_EXP1,
        0,
        false,
    )
}

pub fn refresh_with_options(fb: &Framebuffer, region: &mxcfb_rect, waveform: waveform_mode) {
    let marker = start_refresh(fb, region, waveform);
    fb.wait_refresh_complete(marker);
}

/// Queues the refresh and returns straight away; the panel catches up on its own.
pub fn refresh_without_waiting(fb: &Framebuffer, region: &mxcfb_rect, waveform: waveform_mode) {
    start_refresh(fb, region, waveform);
}

fn full_screen() -> mxcfb_rect {
    mxcfb_rect {
        top: 0,
        left: 0,
        width: libremarkable::dimensions::DISPLAYWIDTH as u32,
        height: libremarkable::dimensions::DISPLAYHEIGHT as u32,
    }
}

pub fn refresh(fb: &Framebuffer) {
    refresh_with_options(fb, &full_screen(), waveform_mode::WAVEFORM_MODE_AUTO);
}

pub fn clear_screen(fb: &mut Framebuffer) {
    fb.clear();
    refresh(fb);
}

fn center_of(circle: &Circle) -> Point2<i32> {
    Point2 {
        x: circle.center.x.round() as i32,
        y: circle.center.y.round() as i32,
    }
}

fn draw_circle(fb: &mut Framebuffer, circle: &Circle) {
    let center = center_of(circle);
    if let Some(ring) = circle.ring {
        let half = ring.width / 2.0;
        fb.fill_circle(center, (ring.radius + half).round() as u32, color::BLACK);
        fb.fill_circle(center, (ring.radius - half).round() as u32, color::WHITE);
    }
    let fill = if circle.picked {
        PICKED_FILL
    } else {
        CONTACT_FILL
    };
    fb.fill_circle(center, circle.radius.round() as u32, fill);
}

fn draw_countdown(fb: &mut Framebuffer, label: &str) {
    let width = libremarkable::dimensions::DISPLAYWIDTH as f32;
    let height = libremarkable::dimensions::DISPLAYHEIGHT as f32;
    let baseline = Point2 {
        x: width / 2.0,
        y: height / 2.0 + COUNTDOWN_BASELINE_OFFSET,
    };
    let extent = fb.draw_text(baseline, label, COUNTDOWN_TEXT_SIZE, color::BLACK, true);
    fb.draw_text(
        Point2 {
            x: baseline.x - extent.width as f32 / 2.0,
            y: baseline.y,
        },
        label,
        COUNTDOWN_TEXT_SIZE,
        color::BLACK,
        false,
    );
}

/// Repaints the whole screen from `model` with the fast DU waveform. Does not wait for
/// the panel, so the event thread gets straight back to its input.
pub fn draw_model(fb: &mut Framebuffer, model: &RenderModel) {
    let start = Instant::now();
    fb.clear();
    // Picked circle last so its ring sits on top of any neighbours.
    for circle in model.circles.iter().filter(|c| !c.picked) {
        draw_circle(fb, circle);
    }
    for circle in model.circles.iter().filter(|c| c.picked) {
        debug!("Drawing picked contact {}", circle.id);
        draw_circle(fb, circle);
    }
    if let Some(label) = &model.countdown_label {
        draw_countdown(fb, label);
    }
    refresh_without_waiting(fb, &full_screen(), waveform_mode::WAVEFORM_MODE_DU);
    let elapsed = start.elapsed();
    debug!("draw_model elapsed: {:.2?}", elapsed);
}

impl Surface for Framebuffer {
    fn paint(&mut self, model: &RenderModel) {
        draw_model(self, model);
    }

    fn blank(&mut self) {
        clear_screen(self);
    }
}
