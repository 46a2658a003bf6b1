// StateBeacon — Hardware Seams
//
// The controller talks to hardware through these traits.  The binary wires
// in the console/simulator implementations below; tests substitute their
// own recording fakes.

pub mod console;
pub mod sim;

use anyhow::Result;

/// The radio seam.  One call replaces the advertised manufacturer-specific
/// payload; the implementation keeps broadcasting it until the next call.
pub trait Advertiser {
    fn set_advertising(&mut self, manufacturer_id: u16, payload: &[u8]) -> Result<()>;
}

/// The indicator LED seam.  Level-based: callers state the level they want,
/// implementations absorb repeats.
pub trait IndicatorLight {
    fn set_lit(&mut self, lit: bool);
}

/// On-demand reads of the slow housekeeping sensors.
pub trait SensorReader {
    fn battery_percent(&mut self) -> f32;
    fn temperature_c(&mut self) -> f32;
}
