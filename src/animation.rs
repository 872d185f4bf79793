use std::fmt::Display;
use std::thread;
use std::time::Duration;

use crate::config::{Params, Variant};
use crate::profiles::DiseaseProfile;
use crate::waves::{WaveLayer, waves};

/// Monotone animation time. Owned by the caller and passed in on every
/// frame; nothing here is global.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Clock {
    t: f64,
    dt: f64,
}

impl Clock {
    pub fn new(dt: f64) -> Self {
        Self { t: 0.0, dt: dt.abs() }
    }

    pub fn t(&self) -> f64 {
        self.t
    }

    pub fn tick(&mut self) -> f64 {
        self.t += self.dt;
        self.t
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new(0.1)
    }
}

/// Run at most `frames` iterations: sample waves at the clock's time,
/// hand them to `redraw`, advance the clock, sleep `delay`. Stops at the
/// first redraw error. Returns the number of frames drawn.
pub fn animate<E, F>(
    params: &Params,
    profile: &DiseaseProfile,
    variant: Variant,
    clock: &mut Clock,
    frames: usize,
    delay: Duration,
    mut redraw: F,
) -> usize
where
    E: Display,
    F: FnMut(usize, &[WaveLayer]) -> Result<(), E>,
{
    for frame in 0..frames {
        let layers = waves(params, profile, variant, clock.t());
        if let Err(e) = redraw(frame, &layers) {
            tracing::warn!(frame, error = %e, "redraw failed, stopping animation");
            return frame;
        }
        clock.tick();
        if !delay.is_zero() && frame + 1 < frames {
            thread::sleep(delay);
        }
    }
    frames
}
