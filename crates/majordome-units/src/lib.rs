//! majordome-units - Gas flow rate unit conversions
//!
//! Thin, exact conversions between the flow rate units that show up in
//! lab and process work: normal cubic meters per hour, standard cubic
//! centimeters per minute, mass flow, and mean gas speed.

pub mod flow;

pub use flow::*;
