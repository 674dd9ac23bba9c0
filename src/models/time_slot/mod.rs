// Time slot model
// Coarse time-of-day an event is scheduled in

use std::fmt;

/// Ordered time-of-day slots. `Unspecified` is written as `none`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum TimeSlot {
    Begin,
    Dawn,
    Morning,
    Noon,
    Afternoon,
    Evening,
    Night,
    Midnight,
    End,
    #[default]
    Unspecified,
}

impl TimeSlot {
    /// All slots in display order.
    pub const ALL: [TimeSlot; 10] = [
        TimeSlot::Begin,
        TimeSlot::Dawn,
        TimeSlot::Morning,
        TimeSlot::Noon,
        TimeSlot::Afternoon,
        TimeSlot::Evening,
        TimeSlot::Night,
        TimeSlot::Midnight,
        TimeSlot::End,
        TimeSlot::Unspecified,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Begin => "Begin",
            Self::Dawn => "Dawn",
            Self::Morning => "Morning",
            Self::Noon => "Noon",
            Self::Afternoon => "Afternoon",
            Self::Evening => "Evening",
            Self::Night => "Night",
            Self::Midnight => "Midnight",
            Self::End => "End",
            Self::Unspecified => "none",
        }
    }

    /// Case-insensitive parse. Unknown text maps to `Unspecified`.
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|slot| slot.as_str().eq_ignore_ascii_case(text))
            .unwrap_or(Self::Unspecified)
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("Morning", TimeSlot::Morning; "exact")]
    #[test_case("midnight", TimeSlot::Midnight; "lower case")]
    #[test_case(" END ", TimeSlot::End; "padded upper case")]
    #[test_case("none", TimeSlot::Unspecified; "explicit none")]
    #[test_case("brunch", TimeSlot::Unspecified; "unknown")]
    #[test_case("", TimeSlot::Unspecified; "empty")]
    fn test_parse(input: &str, expected: TimeSlot) {
        assert_eq!(TimeSlot::parse(input), expected);
    }

    #[test]
    fn test_display_round_trips() {
        for slot in TimeSlot::ALL {
            assert_eq!(TimeSlot::parse(&slot.to_string()), slot);
        }
    }

    #[test]
    fn test_ordering_matches_day_progression() {
        assert!(TimeSlot::Begin < TimeSlot::Dawn);
        assert!(TimeSlot::Night < TimeSlot::Midnight);
        assert!(TimeSlot::End < TimeSlot::Unspecified);
    }
}
