//! Priority definitions
//!
//! Each severity occupies its own bit so that logger filters can be built by
//! OR-ing severities together (`Priority::Error | Priority::Warning`) or by
//! masking them out of [`PriorityMask::ALL`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

#[repr(u8)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Emergency = 1,
    Alert = 2,
    Critical = 4,
    Error = 8,
    Warning = 16,
    Notice = 32,
    #[default]
    Info = 64,
    Debug = 128,
}

impl Priority {
    /// Every severity, most severe first
    pub const ALL: [Priority; 8] = [
        Priority::Emergency,
        Priority::Alert,
        Priority::Critical,
        Priority::Error,
        Priority::Warning,
        Priority::Notice,
        Priority::Info,
        Priority::Debug,
    ];

    #[inline]
    pub const fn bits(self) -> u8 {
        self as u8
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Priority::Emergency => "EMERGENCY",
            Priority::Alert => "ALERT",
            Priority::Critical => "CRITICAL",
            Priority::Error => "ERROR",
            Priority::Warning => "WARNING",
            Priority::Notice => "NOTICE",
            Priority::Info => "INFO",
            Priority::Debug => "DEBUG",
        }
    }

    /// Map a single bit value back to its severity
    ///
    /// Returns `None` for zero and for values with more than one bit set.
    pub const fn from_bits(bits: u8) -> Option<Self> {
        match bits {
            1 => Some(Priority::Emergency),
            2 => Some(Priority::Alert),
            4 => Some(Priority::Critical),
            8 => Some(Priority::Error),
            16 => Some(Priority::Warning),
            32 => Some(Priority::Notice),
            64 => Some(Priority::Info),
            128 => Some(Priority::Debug),
            _ => None,
        }
    }

    #[cfg(feature = "console")]
    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Priority::Emergency | Priority::Alert => BrightRed,
            Priority::Critical | Priority::Error => Red,
            Priority::Warning => Yellow,
            Priority::Notice => Cyan,
            Priority::Info => Green,
            Priority::Debug => Blue,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "EMERGENCY" | "EMERG" => Ok(Priority::Emergency),
            "ALERT" => Ok(Priority::Alert),
            "CRITICAL" | "CRIT" => Ok(Priority::Critical),
            "ERROR" | "ERR" => Ok(Priority::Error),
            "WARNING" | "WARN" => Ok(Priority::Warning),
            "NOTICE" => Ok(Priority::Notice),
            "INFO" => Ok(Priority::Info),
            "DEBUG" => Ok(Priority::Debug),
            _ => Err(format!("Invalid priority: '{}'", s)),
        }
    }
}

/// Bitmask of severities used as a logger filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriorityMask(u8);

impl PriorityMask {
    pub const NONE: PriorityMask = PriorityMask(0);
    pub const ALL: PriorityMask = PriorityMask(0xFF);

    #[inline]
    pub const fn from_bits(bits: u8) -> Self {
        PriorityMask(bits)
    }

    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// True when the mask shares at least one bit with `priority`
    #[inline]
    pub const fn matches(self, priority: Priority) -> bool {
        self.0 & priority.bits() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Severities contained in this mask, most severe first
    pub fn priorities(self) -> impl Iterator<Item = Priority> {
        Priority::ALL.into_iter().filter(move |p| self.matches(*p))
    }
}

impl Default for PriorityMask {
    fn default() -> Self {
        PriorityMask::ALL
    }
}

impl From<Priority> for PriorityMask {
    fn from(priority: Priority) -> Self {
        PriorityMask(priority.bits())
    }
}

impl fmt::Display for PriorityMask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == PriorityMask::ALL {
            return write!(f, "ALL");
        }
        let names: Vec<&str> = self.priorities().map(Priority::as_str).collect();
        if names.is_empty() {
            write!(f, "NONE")
        } else {
            write!(f, "{}", names.join("|"))
        }
    }
}

impl BitOr for PriorityMask {
    type Output = PriorityMask;

    fn bitor(self, rhs: PriorityMask) -> PriorityMask {
        PriorityMask(self.0 | rhs.0)
    }
}

impl BitOr<Priority> for PriorityMask {
    type Output = PriorityMask;

    fn bitor(self, rhs: Priority) -> PriorityMask {
        PriorityMask(self.0 | rhs.bits())
    }
}

impl BitOr for Priority {
    type Output = PriorityMask;

    fn bitor(self, rhs: Priority) -> PriorityMask {
        PriorityMask(self.bits() | rhs.bits())
    }
}

impl BitOr<PriorityMask> for Priority {
    type Output = PriorityMask;

    fn bitor(self, rhs: PriorityMask) -> PriorityMask {
        PriorityMask(self.bits() | rhs.0)
    }
}

impl BitAnd for PriorityMask {
    type Output = PriorityMask;

    fn bitand(self, rhs: PriorityMask) -> PriorityMask {
        PriorityMask(self.0 & rhs.0)
    }
}

impl BitAnd<Priority> for PriorityMask {
    type Output = PriorityMask;

    fn bitand(self, rhs: Priority) -> PriorityMask {
        PriorityMask(self.0 & rhs.bits())
    }
}

impl Not for PriorityMask {
    type Output = PriorityMask;

    fn not(self) -> PriorityMask {
        PriorityMask(!self.0)
    }
}

impl Not for Priority {
    type Output = PriorityMask;

    fn not(self) -> PriorityMask {
        PriorityMask(!self.bits())
    }
}
