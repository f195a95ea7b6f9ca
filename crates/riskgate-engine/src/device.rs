//! Device integrity risk from the client-reported virtualisation flag.

use riskgate_core::constants::{DEVICE_RISK_PHYSICAL, DEVICE_RISK_VIRTUAL};
use riskgate_core::types::DeviceData;

/// Absent device data is treated as a physical device.
pub fn device_risk(device: Option<&DeviceData>) -> f64 {
    match device {
        Some(d) if d.is_virtual_device => DEVICE_RISK_VIRTUAL,
        _ => DEVICE_RISK_PHYSICAL,
    }
}
