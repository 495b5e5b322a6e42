//! Easing curves and frame-rate independent smoothing.

pub fn ease_in_out_quad(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    if t < 0.5 {
        2.0 * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(2) / 2.0
    }
}

pub fn ease_out_cubic(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

/// Converts a per-frame lerp rate tuned at `reference_fps` into the factor
/// for a frame of `dt` seconds. Identical to `rate` when `dt` is exactly one
/// reference frame; always within `[0, 1]`, so smoothing never overshoots.
pub fn smoothing_factor(rate: f32, dt: f32, reference_fps: f32) -> f32 {
    let rate = rate.clamp(0.0, 1.0);
    if dt <= 0.0 {
        return 0.0;
    }
    let frames = dt * reference_fps;
    (1.0 - (1.0 - rate).powf(frames)).clamp(0.0, 1.0)
}
