use crate::models::{CycleResult, OutputPlan};
use crate::registry::SignalRegistry;

/// Turn a cycle count into indicator and display output.
///
/// The first `min(count, capacity)` slots are lit, the rest are off; a count
/// above `capacity` saturates instead of failing.
pub fn render(count: CycleResult, capacity: usize) -> OutputPlan {
    let active = usize::try_from(count).map_or(capacity, |count| count.min(capacity));

    OutputPlan {
        indicator_plan: (0..capacity).map(|slot| slot < active).collect(),
        display_plan: format!("Found {} devices that passed the filter.", count),
    }
}

/// One `<address>: <magnitude>` line per known device, ordered by address
pub fn strength_report(registry: &SignalRegistry) -> Vec<String> {
    registry
        .sorted_entries()
        .into_iter()
        .map(|(address, magnitude)| format!("{}: {}", address, magnitude))
        .collect()
}
