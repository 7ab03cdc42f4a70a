/// One scan-filter-aggregate pass over the nearby access points
use log::{debug, info};

use crate::error::ScanResult;
use crate::filter::matches;
use crate::models::{AddressPrefix, CycleResult};
use crate::registry::SignalRegistry;
use crate::wifi::{ScanProvider, ScanSession};

/// Owns the scan provider and the signal registry it feeds.
///
/// The registry lives as long as the `ScanCycle` and only grows; the count
/// returned by [`ScanCycle::run`] is recomputed from each scan alone.
pub struct ScanCycle<P: ScanProvider> {
    provider: P,
    registry: SignalRegistry,
}

impl<P: ScanProvider> ScanCycle<P> {
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            registry: SignalRegistry::new(),
        }
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }

    /// Scan once, record every observation whose address starts with `filter`
    /// and return how many did.
    ///
    /// An empty scan is a normal result (count 0). Errors only come from the
    /// scan provider itself, in which case the registry is left untouched. The
    /// provider's scan buffer is released on every path.
    pub async fn run(&mut self, filter: &AddressPrefix) -> ScanResult<CycleResult> {
        let mut session = ScanSession::begin(&mut self.provider);
        let observations = session.observations().await?;

        if observations.is_empty() {
            info!("No WiFi devices in AP mode found");
            return Ok(0);
        }

        info!("Found {} devices.", observations.len());

        let mut num_filtered: CycleResult = 0;
        for (i, observation) in observations.iter().enumerate() {
            debug!(
                "{}: {} - {} ({})",
                i + 1,
                observation.name,
                observation.identity,
                observation.strength
            );

            if matches(&observation.identity, filter) {
                self.registry.upsert(
                    observation.identity.canonical_key(),
                    observation.strength.unsigned_abs(),
                );
                num_filtered += 1;
            }
        }

        Ok(num_filtered)
    }
}
