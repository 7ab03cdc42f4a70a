/// Passive WiFi access point scanning through `iw`
use async_trait::async_trait;
use log::{debug, warn};
use tokio::process::Command;

use crate::error::{ScanError, ScanResult};
use crate::models::{DeviceObservation, HardwareAddress};

const IW_BINARY: &str = "iw";

/// Source of access point observations.
///
/// `scan` blocks until the radio has finished a full pass and keeps the
/// results in an internal buffer; `release_scan_buffer` frees that buffer.
/// Use [`ScanSession`] so that every scan is paired with a release.
#[async_trait]
pub trait ScanProvider: Send {
    async fn scan(&mut self) -> ScanResult<&[DeviceObservation]>;

    fn release_scan_buffer(&mut self);
}

/// Scoped scan: the provider's buffer is released when the session is dropped,
/// whether or not the scan succeeded.
pub struct ScanSession<'a, P: ScanProvider + ?Sized> {
    provider: &'a mut P,
}

impl<'a, P: ScanProvider + ?Sized> ScanSession<'a, P> {
    pub fn begin(provider: &'a mut P) -> Self {
        Self { provider }
    }

    pub async fn observations(&mut self) -> ScanResult<&[DeviceObservation]> {
        self.provider.scan().await
    }
}

impl<P: ScanProvider + ?Sized> Drop for ScanSession<'_, P> {
    fn drop(&mut self) {
        self.provider.release_scan_buffer();
    }
}

/// Scans with `iw dev <interface> scan`. Needs CAP_NET_ADMIN (usually root).
pub struct IwScanner {
    interface: String,
    buffer: Vec<DeviceObservation>,
}

impl IwScanner {
    pub fn new(interface: impl Into<String>) -> Self {
        Self {
            interface: interface.into(),
            buffer: Vec::new(),
        }
    }
}

#[async_trait]
impl ScanProvider for IwScanner {
    async fn scan(&mut self) -> ScanResult<&[DeviceObservation]> {
        debug!("Running {} dev {} scan", IW_BINARY, self.interface);

        let output = Command::new(IW_BINARY)
            .args(["dev", self.interface.as_str(), "scan"])
            .output()
            .await?;

        if !output.status.success() {
            return Err(ScanError::CommandFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        self.buffer = parse_iw_scan(&String::from_utf8_lossy(&output.stdout));
        Ok(&self.buffer)
    }

    fn release_scan_buffer(&mut self) {
        self.buffer.clear();
        self.buffer.shrink_to_fit();
    }
}

struct PendingEntry {
    identity: HardwareAddress,
    name: String,
    strength: Option<i32>,
}

fn finish_entry(entry: Option<PendingEntry>, observations: &mut Vec<DeviceObservation>) {
    let Some(entry) = entry else { return };
    match entry.strength {
        Some(strength) => observations.push(DeviceObservation {
            identity: entry.identity,
            name: entry.name,
            strength,
        }),
        None => warn!("Dropping {}: no signal reported", entry.identity),
    }
}

/// Parse the text output of `iw dev <if> scan` into observations
///
/// Each access point starts with an unindented `BSS <mac>(on <if>)` line,
/// followed by indented attributes. Only `signal: <dBm> dBm` and `SSID: <name>`
/// are used; the signal is rounded to whole dBm. Entries with an unparseable
/// address or without a signal line are skipped.
pub fn parse_iw_scan(output: &str) -> Vec<DeviceObservation> {
    let mut observations = Vec::new();
    let mut current: Option<PendingEntry> = None;

    for line in output.lines() {
        if let Some(rest) = line.strip_prefix("BSS ") {
            finish_entry(current.take(), &mut observations);

            let address = rest
                .split(|c: char| c == '(' || c.is_whitespace())
                .next()
                .unwrap_or_default();
            match address.parse::<HardwareAddress>() {
                Ok(identity) => {
                    current = Some(PendingEntry {
                        identity,
                        name: String::new(),
                        strength: None,
                    })
                }
                Err(e) => warn!("Skipping scan entry '{}': {}", rest.trim(), e),
            }
            continue;
        }

        let Some(entry) = current.as_mut() else {
            continue;
        };

        let attribute = line.trim();
        if let Some(value) = attribute.strip_prefix("signal:") {
            match value
                .split_whitespace()
                .next()
                .and_then(|dbm| dbm.parse::<f32>().ok())
            {
                Some(dbm) => entry.strength = Some(dbm.round() as i32),
                None => warn!("Invalid signal for {}: '{}'", entry.identity, value.trim()),
            }
        } else if let Some(ssid) = attribute.strip_prefix("SSID:") {
            entry.name = ssid.trim().to_string();
        }
    }

    finish_entry(current, &mut observations);
    observations
}

#[cfg(test)]
mod tests {
    use super::*;

    const IW_OUTPUT: &str = "\
BSS 00:0d:97:12:34:56(on wlan0) -- associated
\tTSF: 1234567890 usec (0d, 00:20:34)
\tfreq: 2412
\tbeacon interval: 100 TUs
\tcapability: ESS Privacy ShortSlotTime (0x0411)
\tsignal: -40.00 dBm
\tlast seen: 120 ms ago
\tSSID: Shop Floor
\tBSS Load:
\t\t * station count: 3
BSS 00:0d:97:ab:cd:ef(on wlan0)
\tfreq: 5180
\tsignal: -55.50 dBm
\tSSID:
BSS 12:34:56:78:9a:bc(on wlan0)
\tsignal: -71.00 dBm
\tSSID: Neighbour
";

    #[test]
    fn parses_entries_in_order() {
        let observations = parse_iw_scan(IW_OUTPUT);
        assert_eq!(observations.len(), 3);

        assert_eq!(
            observations[0],
            DeviceObservation {
                identity: HardwareAddress([0x00, 0x0D, 0x97, 0x12, 0x34, 0x56]),
                name: "Shop Floor".to_string(),
                strength: -40,
            }
        );
        assert_eq!(observations[1].name, "");
        assert_eq!(observations[1].strength, -56);
        assert_eq!(observations[2].name, "Neighbour");
        assert_eq!(observations[2].strength, -71);
    }

    #[test]
    fn skips_entries_without_signal_or_valid_address() {
        let output = "\
BSS zz:0d:97:12:34:56(on wlan0)
\tsignal: -40.00 dBm
BSS 00:0d:97:12:34:57(on wlan0)
\tSSID: no signal here
BSS 00:0d:97:12:34:58(on wlan0)
\tsignal: -61.00 dBm
";
        let observations = parse_iw_scan(output);
        assert_eq!(observations.len(), 1);
        assert_eq!(observations[0].identity.canonical_key(), "00:0D:97:12:34:58");
    }

    #[test]
    fn empty_output_yields_no_observations() {
        assert!(parse_iw_scan("").is_empty());
    }

    #[test]
    fn release_clears_buffer() {
        let mut scanner = IwScanner::new("wlan0");
        scanner.buffer = parse_iw_scan(IW_OUTPUT);
        scanner.release_scan_buffer();
        assert!(scanner.buffer.is_empty());
    }
}
