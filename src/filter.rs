use crate::models::{AddressPrefix, HardwareAddress};

/// True iff the first three bytes of `identity` equal `prefix` exactly
pub fn matches(identity: &HardwareAddress, prefix: &AddressPrefix) -> bool {
    identity.octets()[..3] == prefix.octets()[..]
}
