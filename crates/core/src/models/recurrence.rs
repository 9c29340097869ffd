use chrono::{DateTime, Datelike, Duration, NaiveDate, Timelike, Utc, Weekday};

/// Weekly rule: publish `name` with `times` on `weekday` at the globally
/// configured publish hour.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleRule {
    pub weekday: Weekday,
    pub name: String,
    pub times: Vec<String>,
}

impl SimpleRule {
    pub fn new(weekday: Weekday, name: &str, times: &[&str]) -> Self {
        Self {
            weekday,
            name: name.to_string(),
            times: times.iter().map(|t| t.to_string()).collect(),
        }
    }

    pub fn due_at(&self, now: DateTime<Utc>, publish_hour: u32) -> bool {
        now.hour() == publish_hour && now.weekday() == self.weekday
    }

    /// Event name for the occurrence published at `today`.
    pub fn occurrence_name(&self, today: NaiveDate) -> String {
        occurrence_name(&self.name, next_weekday_date(self.weekday, today))
    }
}

/// Interval rule anchored on a start date: publish every `interval_days`
/// days at `hour` UTC, counting from `start_date`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdvancedRule {
    pub name: String,
    pub times: Vec<String>,
    pub start_date: NaiveDate,
    pub hour: u32,
    pub interval_days: i64,
}

impl AdvancedRule {
    pub fn due_at(&self, now: DateTime<Utc>) -> bool {
        let elapsed = (now.date_naive() - self.start_date).num_days();
        elapsed >= 0 && elapsed % self.interval_days == 0 && now.hour() == self.hour
    }

    /// The weekday this rule publishes for: a weekday fragment in the base
    /// name wins, the anchor date's weekday is the fallback.
    pub fn occurrence_weekday(&self) -> Weekday {
        weekday_from_fragment(&self.name).unwrap_or_else(|| self.start_date.weekday())
    }

    pub fn occurrence_name(&self, today: NaiveDate) -> String {
        occurrence_name(&self.name, next_weekday_date(self.occurrence_weekday(), today))
    }
}

/// Recognize a weekday by an English name fragment anywhere in `text`.
pub fn weekday_from_fragment(text: &str) -> Option<Weekday> {
    let text = text.to_lowercase();
    const FRAGMENTS: [(&str, Weekday); 7] = [
        ("mon", Weekday::Mon),
        ("tue", Weekday::Tue),
        ("wed", Weekday::Wed),
        ("thu", Weekday::Thu),
        ("fri", Weekday::Fri),
        ("sat", Weekday::Sat),
        ("sun", Weekday::Sun),
    ];

    FRAGMENTS
        .iter()
        .find(|(fragment, _)| text.contains(fragment))
        .map(|(_, weekday)| *weekday)
}

/// Date of the next occurrence of `weekday` strictly after `today`.
pub fn next_weekday_date(weekday: Weekday, today: NaiveDate) -> NaiveDate {
    let mut ahead = i64::from(weekday.num_days_from_monday())
        - i64::from(today.weekday().num_days_from_monday());
    if ahead <= 0 {
        ahead += 7;
    }
    today + Duration::days(ahead)
}

/// Date-suffixed event name disambiguating repeated occurrences of a rule.
pub fn occurrence_name(base: &str, date: NaiveDate) -> String {
    format!("{} – {}", base, date.format("%Y-%m-%d"))
}
