/// Discrete indicator lights, one per slot
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

pub trait IndicatorDriver {
    /// Number of physical slots
    fn capacity(&self) -> usize;

    /// Switch slot `i` on or off according to `plan[i]`. Extra entries are ignored.
    fn apply(&mut self, plan: &[bool]);
}

struct LedSlot {
    dir: PathBuf,
    on_value: String,
}

/// LEDs exposed by the kernel under `/sys/class/leds/<name>`
pub struct SysfsLeds {
    slots: Vec<LedSlot>,
}

impl SysfsLeds {
    pub fn new<I, P>(dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let slots = dirs
            .into_iter()
            .map(|dir| {
                let dir = dir.as_ref().to_path_buf();
                // Full brightness when on; plain GPIO LEDs report 1
                let on_value = fs::read_to_string(dir.join("max_brightness"))
                    .map(|max| max.trim().to_string())
                    .ok()
                    .filter(|max| !max.is_empty())
                    .unwrap_or_else(|| "1".to_string());
                LedSlot { dir, on_value }
            })
            .collect();
        Self { slots }
    }
}

impl IndicatorDriver for SysfsLeds {
    fn capacity(&self) -> usize {
        self.slots.len()
    }

    fn apply(&mut self, plan: &[bool]) {
        for (slot, on) in self.slots.iter().zip(plan) {
            let value = if *on { slot.on_value.as_str() } else { "0" };
            if let Err(e) = fs::write(slot.dir.join("brightness"), value) {
                warn!("Failed to set LED {}: {}", slot.dir.display(), e);
            }
        }
    }
}

/// Stand-in when no LEDs are wired up: logs the slot pattern, e.g. `[##-]`
pub struct LogIndicators {
    capacity: usize,
}

impl LogIndicators {
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }
}

impl IndicatorDriver for LogIndicators {
    fn capacity(&self) -> usize {
        self.capacity
    }

    fn apply(&mut self, plan: &[bool]) {
        info!("Indicators: [{}]", slot_pattern(&plan[..plan.len().min(self.capacity)]));
    }
}

fn slot_pattern(plan: &[bool]) -> String {
    plan.iter().map(|on| if *on { '#' } else { '-' }).collect()
}
