pub mod display;
pub mod indicator;

pub use display::{ConsoleDisplay, DisplayDriver};
pub use indicator::{IndicatorDriver, LogIndicators, SysfsLeds};

use crate::models::OutputPlan;

/// The enabled output peripherals. Either may be switched off in configuration.
#[derive(Default)]
pub struct Outputs {
    pub indicators: Option<Box<dyn IndicatorDriver>>,
    pub display: Option<Box<dyn DisplayDriver>>,
}

impl Outputs {
    /// Indicator slots available for rendering, 0 when indicators are disabled
    pub fn capacity(&self) -> usize {
        self.indicators.as_ref().map_or(0, |leds| leds.capacity())
    }

    /// Bring every peripheral to a blank state before the first cycle
    pub fn init(&mut self) {
        self.all_off();
        if let Some(display) = self.display.as_mut() {
            display.clear();
        }
    }

    /// Send `plan` to the peripherals; `extra_lines` follow the count on the display
    pub fn dispatch(&mut self, plan: &OutputPlan, extra_lines: &[String]) {
        if let Some(leds) = self.indicators.as_mut() {
            leds.apply(&plan.indicator_plan);
        }

        if let Some(display) = self.display.as_mut() {
            let mut lines = Vec::with_capacity(1 + extra_lines.len());
            lines.push(plan.display_plan.clone());
            lines.extend_from_slice(extra_lines);
            display.show(&lines);
        }
    }

    pub fn all_off(&mut self) {
        if let Some(leds) = self.indicators.as_mut() {
            let off = vec![false; leds.capacity()];
            leds.apply(&off);
        }
    }
}
