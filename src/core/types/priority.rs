//! Priority classes accepted for launched processes

use std::fmt;
use winapi::shared::minwindef::DWORD;
use winapi::um::winbase::{
    ABOVE_NORMAL_PRIORITY_CLASS, BELOW_NORMAL_PRIORITY_CLASS, HIGH_PRIORITY_CLASS,
    IDLE_PRIORITY_CLASS, NORMAL_PRIORITY_CLASS, REALTIME_PRIORITY_CLASS,
};

/// The six standard priority classes, addressed by operator level 1-6
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityClass {
    Idle,
    BelowNormal,
    Normal,
    AboveNormal,
    High,
    Realtime,
}

impl PriorityClass {
    /// Map an operator-supplied level (1-6) to a priority class
    pub fn from_level(level: u32) -> Option<Self> {
        match level {
            1 => Some(PriorityClass::Idle),
            2 => Some(PriorityClass::BelowNormal),
            3 => Some(PriorityClass::Normal),
            4 => Some(PriorityClass::AboveNormal),
            5 => Some(PriorityClass::High),
            6 => Some(PriorityClass::Realtime),
            _ => None,
        }
    }

    /// The operator-facing level of this class
    pub const fn level(self) -> u32 {
        match self {
            PriorityClass::Idle => 1,
            PriorityClass::BelowNormal => 2,
            PriorityClass::Normal => 3,
            PriorityClass::AboveNormal => 4,
            PriorityClass::High => 5,
            PriorityClass::Realtime => 6,
        }
    }

    /// The process-creation flag for this class
    pub fn creation_flag(self) -> DWORD {
        match self {
            PriorityClass::Idle => IDLE_PRIORITY_CLASS,
            PriorityClass::BelowNormal => BELOW_NORMAL_PRIORITY_CLASS,
            PriorityClass::Normal => NORMAL_PRIORITY_CLASS,
            PriorityClass::AboveNormal => ABOVE_NORMAL_PRIORITY_CLASS,
            PriorityClass::High => HIGH_PRIORITY_CLASS,
            PriorityClass::Realtime => REALTIME_PRIORITY_CLASS,
        }
    }

    /// Display label for logs
    pub const fn label(self) -> &'static str {
        match self {
            PriorityClass::Idle => "IDLE",
            PriorityClass::BelowNormal => "BELOW NORMAL",
            PriorityClass::Normal => "NORMAL",
            PriorityClass::AboveNormal => "ABOVE NORMAL",
            PriorityClass::High => "HIGH",
            PriorityClass::Realtime => "REALTIME",
        }
    }
}

impl Default for PriorityClass {
    fn default() -> Self {
        PriorityClass::Normal
    }
}

impl fmt::Display for PriorityClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(PriorityClass::from_level(1), Some(PriorityClass::Idle));
        assert_eq!(PriorityClass::from_level(3), Some(PriorityClass::Normal));
        assert_eq!(PriorityClass::from_level(6), Some(PriorityClass::Realtime));
    }

    #[test]
    fn test_out_of_range_levels() {
        assert_eq!(PriorityClass::from_level(0), None);
        assert_eq!(PriorityClass::from_level(7), None);
        assert_eq!(PriorityClass::from_level(9), None);
        assert_eq!(PriorityClass::from_level(u32::MAX), None);
    }

    #[test]
    fn test_level_roundtrip() {
        for level in 1..=6 {
            let class = PriorityClass::from_level(level).unwrap();
            assert_eq!(class.level(), level);
        }
    }

    #[test]
    fn test_creation_flags() {
        assert_eq!(
            PriorityClass::Normal.creation_flag(),
            NORMAL_PRIORITY_CLASS
        );
        assert_eq!(
            PriorityClass::Realtime.creation_flag(),
            REALTIME_PRIORITY_CLASS
        );
        assert_eq!(PriorityClass::Idle.creation_flag(), IDLE_PRIORITY_CLASS);
    }

    #[test]
    fn test_default_is_normal() {
        assert_eq!(PriorityClass::default(), PriorityClass::Normal);
    }

    #[test]
    fn test_labels() {
        assert_eq!(PriorityClass::Idle.label(), "IDLE");
        assert_eq!(PriorityClass::BelowNormal.label(), "BELOW NORMAL");
        assert_eq!(PriorityClass::Realtime.to_string(), "REALTIME");
    }
}
