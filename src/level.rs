// Log levels and threshold filters

use serde::{Deserialize, Serialize};

/// Log severity levels (0-6, higher is more severe)
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    /// Verbose tracing (per-call detail)
    Trace = 0,
    /// Debug-level messages
    Debug = 1,
    /// Informational (normal operation)
    Info = 2,
    /// Warning conditions (degraded but functional)
    Warn = 3,
    /// Error conditions
    Error = 4,
    /// Fatal conditions (component unusable)
    Fatal = 5,
    /// Unconditional logging; never suppressed by any threshold
    Audit = 6,
}

impl Level {
    /// Get level as u8 (0-6)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Get level name as static string
    pub const fn as_str(self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Fatal => "FATAL",
            Level::Audit => "AUDIT",
        }
    }

    /// Create from u8 value (returns None if invalid)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Level::Trace),
            1 => Some(Level::Debug),
            2 => Some(Level::Info),
            3 => Some(Level::Warn),
            4 => Some(Level::Error),
            5 => Some(Level::Fatal),
            6 => Some(Level::Audit),
            _ => None,
        }
    }
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Minimum-level threshold applied by a log target.
///
/// Distinct from [`Level`] because a threshold can also be `Off`
/// (suppress everything). `Audit` records bypass every filter,
/// `Off` included.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LevelFilter {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Fatal = 5,
    Audit = 6,
    /// Suppress all records except `Audit`
    Off = 7,
}

impl LevelFilter {
    /// Whether a record at `level` passes this threshold.
    ///
    /// This is the single suppression predicate for the whole crate;
    /// `log` and `is_enabled_for` must agree because both call it.
    #[inline]
    pub fn enables(self, level: Level) -> bool {
        if level == Level::Audit {
            return true;
        }
        level.as_u8() >= self as u8
    }

    /// Get filter as u8 (0-7)
    #[inline]
    pub const fn as_u8(self) -> u8 {
        self as u8
    }

    /// Create from u8 value (returns None if invalid)
    pub const fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(LevelFilter::Trace),
            1 => Some(LevelFilter::Debug),
            2 => Some(LevelFilter::Info),
            3 => Some(LevelFilter::Warn),
            4 => Some(LevelFilter::Error),
            5 => Some(LevelFilter::Fatal),
            6 => Some(LevelFilter::Audit),
            7 => Some(LevelFilter::Off),
            _ => None,
        }
    }
}

impl From<Level> for LevelFilter {
    fn from(level: Level) -> Self {
        // Level and LevelFilter share the 0-6 discriminants
        LevelFilter::from_u8(level.as_u8()).unwrap_or(LevelFilter::Off)
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert!(Level::Error < Level::Fatal);
        assert!(Level::Fatal < Level::Audit);
    }

    #[test]
    fn test_level_from_u8() {
        assert_eq!(Level::from_u8(0), Some(Level::Trace));
        assert_eq!(Level::from_u8(6), Some(Level::Audit));
        assert_eq!(Level::from_u8(7), None);
    }

    #[test]
    fn test_level_display() {
        assert_eq!(format!("{}", Level::Warn), "WARN");
        assert_eq!(format!("{}", Level::Audit), "AUDIT");
    }

    #[test]
    fn test_filter_enables_at_and_above() {
        let filter = LevelFilter::Info;
        assert!(!filter.enables(Level::Trace));
        assert!(!filter.enables(Level::Debug));
        assert!(filter.enables(Level::Info));
        assert!(filter.enables(Level::Warn));
        assert!(filter.enables(Level::Error));
        assert!(filter.enables(Level::Fatal));
    }

    #[test]
    fn test_audit_bypasses_every_filter() {
        for raw in 0..=7 {
            let filter = LevelFilter::from_u8(raw).unwrap();
            assert!(
                filter.enables(Level::Audit),
                "AUDIT must pass filter {:?}",
                filter
            );
        }
    }

    #[test]
    fn test_off_suppresses_everything_else() {
        let filter = LevelFilter::Off;
        assert!(!filter.enables(Level::Trace));
        assert!(!filter.enables(Level::Fatal));
        assert!(filter.enables(Level::Audit));
    }

    #[test]
    fn test_filter_from_level() {
        assert_eq!(LevelFilter::from(Level::Warn), LevelFilter::Warn);
        assert_eq!(LevelFilter::from(Level::Audit), LevelFilter::Audit);
    }
}
