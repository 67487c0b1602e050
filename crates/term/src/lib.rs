//! Terminal front end for the player-entry form.
//!
//! The form is drawn into a plain framebuffer by [`FormView`] and flushed by
//! [`Screen`], which only rewrites cells that changed since the last frame.
//! No widget toolkit is involved; the layout is small and fixed.

pub mod fb;
pub mod form_view;
pub mod renderer;

pub use gamemng_core as core;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use form_view::{FormView, Viewport, BUTTON_LABEL, PANEL_H, PANEL_W, SUBTITLE, TITLE};
pub use renderer::{encode_frame, Screen};
