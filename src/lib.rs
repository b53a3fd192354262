#![deny(missing_docs)]
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]
#![deny(unused_import_braces)]
#![deny(unused_qualifications)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

//! This crate integrates Zortrax Plus 3D printers into a home-automation
//! host, exposing each configured printer as a camera, a status sensor,
//! and a (deliberately inert) power switch.

mod camera;
mod config;
mod sensor;
mod switch;
mod traits;

pub use camera::Camera;
pub use config::{Config, PrinterConfig, DEFAULT_NAME};
pub use sensor::Sensor;
pub use switch::Switch;
pub use traits::Entity;
