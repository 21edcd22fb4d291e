//! Application constants
//!
//! Centralized location for magic strings and configuration defaults.

/// Application name
#[allow(dead_code)]
pub const APP_NAME: &str = "Verdant";

/// Application version
#[allow(dead_code)]
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory under the home dir holding preferences
pub const CONFIG_DIR_NAME: &str = ".verdant";

/// Preferences file inside the config dir
pub const PREFS_FILE_NAME: &str = "prefs.json";

/// Log file written next to the working directory
pub const LOG_FILE_NAME: &str = "verdant.log";

/// Simulated hardware pairing delay in milliseconds (cosmetic only)
pub const PAIRING_DELAY_MS: u64 = 1500;

/// Flat price of a single nutrient pack refill, in cents
pub const REFILL_PRICE_CENTS: u32 = 1899;

/// Cumulative XP required for each level; index 0 is level 1
pub const LEVEL_THRESHOLDS: &[u32] = &[0, 100, 250, 450, 700, 1000, 1400, 1900, 2500];
