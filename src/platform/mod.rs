//! Platform abstraction layer
//!
//! Turns browser measurements into simulation space:
//! - canvas client size × device pixel ratio -> physical [`Viewport`]
//! - element-local pointer coordinates -> physical pixels
//! - DOM key codes -> restart intent
//! - mouse buttons -> attack intent
//! - page lifecycle -> suspend or teardown

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::Viewport;

/// Physical viewport for a canvas of `client_w × client_h` CSS pixels
pub fn viewport_from_client(client_w: f64, client_h: f64, device_pixel_ratio: f64) -> Viewport {
    let dpr = device_pixel_ratio.max(1.0);
    Viewport::new(
        (client_w * dpr).floor() as f32,
        (client_h * dpr).floor() as f32,
        dpr as f32,
    )
}

/// Element-local logical pointer position -> physical pixels
#[inline]
pub fn pointer_to_physical(local_x: f64, local_y: f64, viewport: &Viewport) -> Vec2 {
    Vec2::new(local_x as f32, local_y as f32) * viewport.dpr
}

/// Whether a keydown with this `code` should restart the run
pub fn is_restart(code: &str, settings: &Settings) -> bool {
    settings.is_restart_key(code)
}

/// `MouseEvent.button` of the primary (usually left) button
pub const PRIMARY_BUTTON: i16 = 0;

/// Only the primary button swings the sword
#[inline]
pub fn is_attack_button(button: i16) -> bool {
    button == PRIMARY_BUTTON
}

/// What to do when the page is hidden
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageHide {
    /// Page kept in the back/forward cache: pause the loop, keep listeners
    Suspend,
    /// Page is going away: cancel the loop and remove listeners
    Teardown,
}

impl PageHide {
    /// From `PageTransitionEvent.persisted`
    pub fn from_persisted(persisted: bool) -> Self {
        if persisted {
            PageHide::Suspend
        } else {
            PageHide::Teardown
        }
    }
}
