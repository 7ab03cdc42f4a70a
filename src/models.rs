/// Addresses, scan observations and output plans shared across the service
use std::fmt;
use std::str::FromStr;

use crate::error::AddressParseError;

/// Parse `N` hex bytes separated by `:` or `-` (e.g. `00:0D:97`)
fn parse_hex_bytes<const N: usize>(input: &str) -> Result<[u8; N], AddressParseError> {
    let parts: Vec<&str> = input.trim().split(|c: char| c == ':' || c == '-').collect();
    if parts.len() != N {
        return Err(AddressParseError::Length {
            input: input.to_string(),
            expected: N,
            found: parts.len(),
        });
    }

    let mut bytes = [0u8; N];
    for (slot, part) in bytes.iter_mut().zip(parts) {
        if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(AddressParseError::InvalidByte(part.to_string()));
        }
        *slot = u8::from_str_radix(part, 16)
            .map_err(|_| AddressParseError::InvalidByte(part.to_string()))?;
    }
    Ok(bytes)
}

fn write_hex_bytes(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for (i, byte) in bytes.iter().enumerate() {
        if i > 0 {
            write!(f, ":")?;
        }
        write!(f, "{:02X}", byte)?;
    }
    Ok(())
}

/// 6-byte hardware address of an access point's radio (BSSID)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HardwareAddress(pub [u8; 6]);

impl HardwareAddress {
    pub fn octets(&self) -> &[u8; 6] {
        &self.0
    }

    /// Canonical registry key: upper-case hex, colon separated
    pub fn canonical_key(&self) -> String {
        self.to_string()
    }
}

impl FromStr for HardwareAddress {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_bytes::<6>(s).map(HardwareAddress)
    }
}

impl fmt::Display for HardwareAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex_bytes(f, &self.0)
    }
}

/// First three bytes of a hardware address, usually the vendor OUI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressPrefix(pub [u8; 3]);

impl AddressPrefix {
    pub fn octets(&self) -> &[u8; 3] {
        &self.0
    }
}

impl FromStr for AddressPrefix {
    type Err = AddressParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_hex_bytes::<3>(s).map(AddressPrefix)
    }
}

impl fmt::Display for AddressPrefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex_bytes(f, &self.0)
    }
}

/// One access point reported by a scan. Only lives for one cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceObservation {
    pub identity: HardwareAddress,
    pub name: String,
    /// Received signal strength in dBm, usually negative
    pub strength: i32,
}

/// Number of observations that passed the filter in one cycle
pub type CycleResult = u32;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub indicator_plan: Vec<bool>,
    pub display_plan: String,
}
