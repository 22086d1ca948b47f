//! Tool configuration loading
//!
//! `tool.toml` is validated and encoded at build time; this decodes the
//! embedded bytes at boot.

use defmt::*;
use sickle_core::ToolConfig;

static EMBEDDED_CONFIG: &[u8] = include_bytes!(concat!(env!("OUT_DIR"), "/tool_config.bin"));

/// Decode the embedded configuration, falling back to defaults
pub fn load() -> ToolConfig {
    let config = match postcard::from_bytes::<ToolConfig>(EMBEDDED_CONFIG) {
        Ok(config) => config,
        Err(_) => {
            warn!("Embedded config could not be decoded, using defaults");
            return ToolConfig::default();
        }
    };

    if let Err(e) = config.validate() {
        warn!("Embedded config rejected ({}), using defaults", e);
        return ToolConfig::default();
    }

    info!(
        "Config: duty gripper={}% vertical={}%, poll={}ms, abort_on_trip={}",
        config.duty.gripper.get(),
        config.duty.vertical.get(),
        config.timing.step_poll_ms,
        config.cycle.abort_on_trip
    );
    config
}
