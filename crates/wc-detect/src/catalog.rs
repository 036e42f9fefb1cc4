//! Device catalog of USB-serial adapters used by Whitecat boards
//!
//! A board is recognised by the VID/PID of the USB-to-serial bridge it
//! carries. Identifiers are kept in their canonical string form (`0x` followed
//! by lowercase hex without superfluous leading zeros) so that catalog entries
//! loaded from configuration and identities read from the OS compare by plain
//! string equality.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

/// Known USB-serial bridges found on Whitecat-compatible boards
pub mod adapters {
    /// Silicon Labs CP210x
    pub mod cp210x {
        pub const VID: u16 = 0x10C4;
        pub const CP2102: u16 = 0xEA60;
    }

    /// FTDI (Future Technology Devices International)
    pub mod ftdi {
        pub const VID: u16 = 0x0403;
        pub const FT232R: u16 = 0x6001;
        pub const FT231X: u16 = 0x6015;
    }

    /// WCH CH340
    pub mod ch340 {
        pub const VID: u16 = 0x1A86;
        pub const CH340: u16 = 0x7523;
    }
}

/// Get adapter type name from VID
pub fn adapter_name(vid: u16) -> Option<&'static str> {
    match vid {
        adapters::cp210x::VID => Some("CP210x"),
        adapters::ftdi::VID => Some("FTDI"),
        adapters::ch340::VID => Some("CH340"),
        _ => None,
    }
}

/// Format a USB id in canonical form
pub fn canonical_hex(id: u16) -> String {
    format!("0x{:x}", id)
}

/// Normalize a configured id string into canonical form.
///
/// Accepts an optional `0x`/`0X` prefix, either letter case and leading zeros.
fn canonical_id(field: &'static str, raw: &str) -> Result<String, CatalogError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(CatalogError::Empty { field });
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(CatalogError::NotHex {
            field,
            value: raw.to_string(),
        });
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(canonical_hex(0));
    }

    // Only overflow can fail here, the digits were checked above
    u16::from_str_radix(significant, 16)
        .map(canonical_hex)
        .map_err(|_| CatalogError::OutOfRange {
            field,
            value: raw.to_string(),
        })
}

/// A (vendor id, product id) pair in canonical string form
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "DescriptorRecord", into = "DescriptorRecord")]
pub struct DeviceDescriptor {
    vendor_id: String,
    product_id: String,
}

impl DeviceDescriptor {
    /// Build a descriptor from numeric USB ids
    pub fn from_ids(vid: u16, pid: u16) -> Self {
        Self {
            vendor_id: canonical_hex(vid),
            product_id: canonical_hex(pid),
        }
    }

    /// Parse a descriptor from configured strings, normalizing both ids
    pub fn parse(vendor_id: &str, product_id: &str) -> Result<Self, CatalogError> {
        Ok(Self {
            vendor_id: canonical_id("vendor", vendor_id)?,
            product_id: canonical_id("product", product_id)?,
        })
    }

    /// Vendor id, e.g. `0x10c4`
    pub fn vendor_id(&self) -> &str {
        &self.vendor_id
    }

    /// Product id, e.g. `0xea60`
    pub fn product_id(&self) -> &str {
        &self.product_id
    }
}

impl fmt::Display for DeviceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.vendor_id, self.product_id)
    }
}

/// On-disk shape of a catalog entry
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DescriptorRecord {
    #[serde(rename = "VendorId")]
    vendor_id: String,
    #[serde(rename = "ProductId")]
    product_id: String,
}

impl TryFrom<DescriptorRecord> for DeviceDescriptor {
    type Error = CatalogError;

    fn try_from(record: DescriptorRecord) -> Result<Self, Self::Error> {
        Self::parse(&record.vendor_id, &record.product_id)
    }
}

impl From<DeviceDescriptor> for DescriptorRecord {
    fn from(descriptor: DeviceDescriptor) -> Self {
        Self {
            vendor_id: descriptor.vendor_id,
            product_id: descriptor.product_id,
        }
    }
}

/// Ordered list of recognised board descriptors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviceCatalog {
    devices: Vec<DeviceDescriptor>,
}

impl DeviceCatalog {
    /// Create a catalog from descriptors, keeping their order
    pub fn new(devices: Vec<DeviceDescriptor>) -> Self {
        Self { devices }
    }

    /// Create a catalog from `(vendor, product)` string records
    pub fn from_records<'a, I>(records: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let devices = records
            .into_iter()
            .map(|(vid, pid)| DeviceDescriptor::parse(vid, pid))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { devices })
    }

    /// Check whether a descriptor is part of the catalog
    pub fn contains(&self, descriptor: &DeviceDescriptor) -> bool {
        self.devices.iter().any(|d| d == descriptor)
    }

    /// Iterate over the descriptors in catalog order
    pub fn iter(&self) -> impl Iterator<Item = &DeviceDescriptor> {
        self.devices.iter()
    }

    pub fn len(&self) -> usize {
        self.devices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }
}

impl Default for DeviceCatalog {
    fn default() -> Self {
        use adapters::{ch340, cp210x, ftdi};

        Self::new(vec![
            DeviceDescriptor::from_ids(cp210x::VID, cp210x::CP2102),
            DeviceDescriptor::from_ids(ftdi::VID, ftdi::FT232R),
            DeviceDescriptor::from_ids(ftdi::VID, ftdi::FT231X),
            DeviceDescriptor::from_ids(ch340::VID, ch340::CH340),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ids_is_lowercase_without_padding() {
        let d = DeviceDescriptor::from_ids(0x0403, 0x6001);
        assert_eq!(d.vendor_id(), "0x403");
        assert_eq!(d.product_id(), "0x6001");
        assert_eq!(d.to_string(), "0x403:0x6001");
    }

    #[test]
    fn test_parse_normalizes_case_prefix_and_zeros() {
        let expected = DeviceDescriptor::from_ids(0x10C4, 0xEA60);
        assert_eq!(DeviceDescriptor::parse("0x10c4", "0xea60").unwrap(), expected);
        assert_eq!(DeviceDescriptor::parse("0X10C4", "0XEA60").unwrap(), expected);
        assert_eq!(DeviceDescriptor::parse("10c4", "ea60").unwrap(), expected);
        assert_eq!(DeviceDescriptor::parse("0x010c4", " 0xEA60 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_zero() {
        let d = DeviceDescriptor::parse("0x0000", "0").unwrap();
        assert_eq!(d.vendor_id(), "0x0");
        assert_eq!(d.product_id(), "0x0");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(
            DeviceDescriptor::parse("0x", "0xea60"),
            Err(CatalogError::Empty { field: "vendor" })
        );
        assert!(matches!(
            DeviceDescriptor::parse("0x10c4", "0xzz"),
            Err(CatalogError::NotHex { field: "product", .. })
        ));
        assert!(matches!(
            DeviceDescriptor::parse("0x10000", "0x1"),
            Err(CatalogError::OutOfRange { field: "vendor", .. })
        ));
    }

    #[test]
    fn test_catalog_records_deserialize() {
        let json = r#"[{"VendorId":"0x10C4","ProductId":"0xea60"},{"VendorId":"0403","ProductId":"6001"}]"#;
        let catalog: DeviceCatalog = serde_json::from_str(json).unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains(&DeviceDescriptor::from_ids(0x10c4, 0xea60)));
        assert!(catalog.contains(&DeviceDescriptor::from_ids(0x0403, 0x6001)));
    }

    #[test]
    fn test_catalog_rejects_bad_record() {
        let json = r#"[{"VendorId":"usb","ProductId":"0xea60"}]"#;
        assert!(serde_json::from_str::<DeviceCatalog>(json).is_err());
    }

    #[test]
    fn test_catalog_serializes_canonical_records() {
        let catalog = DeviceCatalog::from_records([("0X10C4", "0XEA60")]).unwrap();
        let json = serde_json::to_string(&catalog).unwrap();
        assert_eq!(json, r#"[{"VendorId":"0x10c4","ProductId":"0xea60"}]"#);
    }

    #[test]
    fn test_default_catalog_contains_cp2102() {
        let catalog = DeviceCatalog::default();
        assert!(catalog.contains(&DeviceDescriptor::parse("0x10c4", "0xea60").unwrap()));
        assert_eq!(adapter_name(0x10c4), Some("CP210x"));
        assert_eq!(adapter_name(0xffff), None);
    }
}
