// StateBeacon — Console Drivers
//
// Log-backed stand-ins for the radio and the indicator LED.  Everything the
// device would do to hardware shows up as a log line instead.

use anyhow::Result;

use crate::drivers::{Advertiser, IndicatorLight};

pub struct ConsoleAdvertiser;

impl Advertiser for ConsoleAdvertiser {
    fn set_advertising(&mut self, manufacturer_id: u16, payload: &[u8]) -> Result<()> {
        log::info!(
            "advertising mfr=0x{manufacturer_id:04x} payload={:?}",
            String::from_utf8_lossy(payload)
        );
        Ok(())
    }
}

pub struct ConsoleIndicator {
    lit: bool,
}

impl ConsoleIndicator {
    pub fn new() -> Self {
        Self { lit: false }
    }
}

impl Default for ConsoleIndicator {
    fn default() -> Self {
        Self::new()
    }
}

impl IndicatorLight for ConsoleIndicator {
    fn set_lit(&mut self, lit: bool) {
        // Only transitions are worth a log line; deviation checks repeat the
        // current level on every field sample.
        if lit != self.lit {
            self.lit = lit;
            log::info!("indicator {}", if lit { "ON" } else { "OFF" });
        }
    }
}
