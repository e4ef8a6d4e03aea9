use chrono::{DateTime, TimeZone, Utc};

/// Application settings, constructed once at startup and handed to each
/// component. Display strings are shown to the user verbatim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AppConfig {
    /// Versioned prefix for persisted keys. Changing region semantics means
    /// bumping the version so stale data from older releases is never read.
    pub storage_prefix: &'static str,
    pub map_title: &'static str,
    pub map_subtitle: &'static str,
    pub save_message: &'static str,
    pub reset_confirm_message: &'static str,
    /// `None` disables the scripted reveal entirely.
    pub schedule: Option<DiscoverySchedule>,
}

/// Timing for the scripted reveal sequence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscoverySchedule {
    pub start_date: DateTime<Utc>,
    /// Delay before the first reveal fires, in milliseconds.
    pub initial_delay_ms: u32,
    /// Stagger between consecutive reveals, in milliseconds.
    pub discovery_delay_ms: u32,
    pub cadence: RevealCadence,
}

/// How elapsed time since `start_date` maps to a reveal count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealCadence {
    /// One region per 24h period, with the first region unlocked at (and
    /// slightly before) the start date.
    CalendarDays,
    /// One region per Mon-Fri day boundary; nothing before the start date and
    /// nothing over weekends. Weekdays are evaluated in UTC.
    BusinessDays,
}

impl AppConfig {
    /// The deployed Silvarion configuration.
    pub fn kingdom() -> Self {
        Self {
            storage_prefix: "map_silvarion_v5_",
            map_title: "Silvarion",
            map_subtitle: "Království",
            save_message: "Tvůj postup v nové zemi byl uložen.",
            reset_confirm_message: "Opravdu chceš vymazat celou novou mapu a začít znovu?",
            schedule: Some(DiscoverySchedule::kingdom()),
        }
    }
}

impl DiscoverySchedule {
    /// Launch schedule for the Silvarion map: one region per business day
    /// starting Monday 2025-09-01, with the animation staggered under two
    /// seconds per region.
    pub fn kingdom() -> Self {
        Self {
            start_date: Utc
                .with_ymd_and_hms(2025, 9, 1, 6, 0, 0)
                .single()
                .unwrap_or(DateTime::UNIX_EPOCH),
            initial_delay_ms: 800,
            discovery_delay_ms: 1_200,
            cadence: RevealCadence::BusinessDays,
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Weekday};

    use super::{AppConfig, DiscoverySchedule, RevealCadence};

    #[test]
    fn storage_prefix_is_versioned() {
        assert!(AppConfig::kingdom().storage_prefix.ends_with("_v5_"));
    }

    #[test]
    fn kingdom_schedule_starts_on_a_business_day() {
        let schedule = DiscoverySchedule::kingdom();
        assert_eq!(schedule.cadence, RevealCadence::BusinessDays);
        assert_eq!(schedule.start_date.weekday(), Weekday::Mon);
    }
}
