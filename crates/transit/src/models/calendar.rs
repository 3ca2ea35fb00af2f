//! Service calendar for determining when trips run.
//!
//! Only the weekly pattern of GTFS calendar.txt is modeled; a schedule is
//! analyzed for a "typical weekday" rather than for concrete dates.

use chrono::Weekday;

use crate::identifiers::ServiceIdentifier;

/// Determines which days of the week a transit service operates
#[derive(Clone, Debug)]
pub struct ServiceCalendar {
    pub service_id: ServiceIdentifier,
    pub weekdays: WeekdayFlags,
}

/// Compact representation of which weekdays a service runs
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct WeekdayFlags {
    pub(crate) flags: u8,
}

const WORKING_WEEK: [Weekday; 5] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
];

impl WeekdayFlags {
    pub fn new() -> Self {
        Self { flags: 0 }
    }

    pub fn set(&mut self, weekday: Weekday) {
        self.flags |= 1 << weekday.number_from_monday();
    }

    pub fn contains(&self, weekday: Weekday) -> bool {
        (self.flags & (1 << weekday.number_from_monday())) != 0
    }

    pub fn from_bools(mon: bool, tue: bool, wed: bool, thu: bool, fri: bool, sat: bool, sun: bool) -> Self {
        let mut flags = Self::new();
        if mon { flags.set(Weekday::Mon); }
        if tue { flags.set(Weekday::Tue); }
        if wed { flags.set(Weekday::Wed); }
        if thu { flags.set(Weekday::Thu); }
        if fri { flags.set(Weekday::Fri); }
        if sat { flags.set(Weekday::Sat); }
        if sun { flags.set(Weekday::Sun); }
        flags
    }

    /// Monday through Friday, weekend flags ignored
    pub fn covers_working_week(&self) -> bool {
        WORKING_WEEK.iter().all(|day| self.contains(*day))
    }
}

impl ServiceCalendar {
    pub fn new(service_id: ServiceIdentifier, weekdays: WeekdayFlags) -> Self {
        Self { service_id, weekdays }
    }

    /// Check if the service runs on a given day of the week
    pub fn runs_on(&self, weekday: Weekday) -> bool {
        self.weekdays.contains(weekday)
    }

    /// A service belongs to the typical weekday iff it runs on all of
    /// Monday through Friday.
    pub fn runs_every_weekday(&self) -> bool {
        self.weekdays.covers_working_week()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weekday_flags() {
        let mut flags = WeekdayFlags::new();
        flags.set(Weekday::Mon);
        flags.set(Weekday::Wed);
        flags.set(Weekday::Fri);

        assert!(flags.contains(Weekday::Mon));
        assert!(!flags.contains(Weekday::Tue));
        assert!(flags.contains(Weekday::Wed));
        assert!(!flags.covers_working_week());
    }

    #[test]
    fn test_typical_weekday_service() {
        let weekday = ServiceCalendar::new(
            ServiceIdentifier::new("weekday"),
            WeekdayFlags::from_bools(true, true, true, true, true, false, false),
        );
        let daily = ServiceCalendar::new(
            ServiceIdentifier::new("daily"),
            WeekdayFlags::from_bools(true, true, true, true, true, true, true),
        );
        let no_friday = ServiceCalendar::new(
            ServiceIdentifier::new("mon_thu"),
            WeekdayFlags::from_bools(true, true, true, true, false, false, false),
        );
        let weekend = ServiceCalendar::new(
            ServiceIdentifier::new("weekend"),
            WeekdayFlags::from_bools(false, false, false, false, false, true, true),
        );

        assert!(weekday.runs_every_weekday());
        assert!(daily.runs_every_weekday());
        assert!(!no_friday.runs_every_weekday());
        assert!(!weekend.runs_every_weekday());
        assert!(weekend.runs_on(Weekday::Sun));
    }
}
