#![cfg_attr(not(test), no_std)]

//! Word pacing core for an RSVP reader: decides when the next word is shown.

pub mod content;
pub mod pacing;
pub mod render;
pub mod settings;
