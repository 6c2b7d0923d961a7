//! Data model, transforms and host glue shared by every view.

pub mod animation;
pub mod format;
pub mod quality;
pub mod settings;
pub mod snapshot;
pub mod source;
pub mod timing;
pub mod transform;
