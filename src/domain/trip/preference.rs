//! Travel preference submitted by one participant.

use serde::Serialize;

use crate::domain::foundation::ValidationError;

const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// One person's free-text travel preference.
///
/// Immutable once constructed. The only way to build one is
/// [`PreferenceRecord::new`], which validates every field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreferenceRecord {
    user: String,
    location: String,
    budget: String,
    dates: String,
    mode: String,
}

impl PreferenceRecord {
    /// Validates and builds a preference.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` when a field is blank, when the budget is
    /// not a number once thousands separators and whitespace are removed, or
    /// when the dates name neither a month nor contain a digit.
    pub fn new(
        user: impl Into<String>,
        location: impl Into<String>,
        budget: impl Into<String>,
        dates: impl Into<String>,
        mode: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let user = required("user", user.into())?;
        let location = required("location", location.into())?;
        let budget = required("budget", budget.into())?;
        let dates = required("dates", dates.into())?;
        let mode = required("mode", mode.into())?.to_lowercase();

        parse_budget(&budget)?;
        if !looks_like_dates(&dates) {
            return Err(ValidationError::invalid_format(
                "dates",
                "expected a month name or a numeric date",
            ));
        }

        Ok(Self {
            user,
            location,
            budget,
            dates,
            mode,
        })
    }

    pub fn user(&self) -> &str {
        &self.user
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    /// Budget exactly as the participant typed it.
    pub fn budget(&self) -> &str {
        &self.budget
    }

    /// Budget as a number, separators removed.
    pub fn budget_amount(&self) -> f64 {
        // Validated in `new`.
        parse_budget(&self.budget).unwrap_or_default()
    }

    pub fn dates(&self) -> &str {
        &self.dates
    }

    /// Trip mode, always lower-cased.
    pub fn mode(&self) -> &str {
        &self.mode
    }

    /// Renders the single prompt line describing this preference.
    pub fn prompt_line(&self) -> String {
        format!(
            "- {} wants to travel to {} on a {} trip with a budget of {} during {}.",
            self.user, self.location, self.mode, self.budget, self.dates
        )
    }
}

fn required(field: &'static str, value: String) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(trimmed.to_string())
}

fn parse_budget(budget: &str) -> Result<f64, ValidationError> {
    let digits: String = budget
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();

    match digits.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        Ok(_) => Err(ValidationError::invalid_format(
            "budget",
            "must be a non-negative amount",
        )),
        Err(_) => Err(ValidationError::invalid_format(
            "budget",
            format!("'{}' is not a number", budget),
        )),
    }
}

fn looks_like_dates(dates: &str) -> bool {
    if dates.chars().any(|c| c.is_ascii_digit()) {
        return true;
    }

    dates
        .split(|c: char| !c.is_alphabetic())
        .filter(|word| word.len() >= 3)
        .map(str::to_lowercase)
        .any(|word| is_month(&word))
}

fn is_month(word: &str) -> bool {
    MONTHS
        .iter()
        .any(|month| *month == word || month[..3] == *word || (*month == "september" && word == "sept"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid() -> Result<PreferenceRecord, ValidationError> {
        PreferenceRecord::new("alice", "Lisbon", "1,500", "3/10-3/16", "Relax")
    }

    #[test]
    fn new_lowercases_mode_and_trims_fields() {
        let pref = PreferenceRecord::new(" alice ", " beach ", " 1,000 ", "March", "  RELAX ")
            .unwrap();
        assert_eq!(pref.user(), "alice");
        assert_eq!(pref.location(), "beach");
        assert_eq!(pref.budget(), "1,000");
        assert_eq!(pref.mode(), "relax");
    }

    #[test]
    fn budget_with_thousands_separators_parses() {
        let pref = valid().unwrap();
        assert_eq!(pref.budget_amount(), 1500.0);
    }

    #[test]
    fn budget_with_internal_spaces_parses() {
        let pref = PreferenceRecord::new("bob", "Rome", "2 000", "May", "explore").unwrap();
        assert_eq!(pref.budget_amount(), 2000.0);
    }

    #[test]
    fn non_numeric_budget_is_rejected() {
        let err = PreferenceRecord::new("bob", "Rome", "cheap", "May", "explore").unwrap_err();
        assert_eq!(err.field(), "budget");
    }

    #[test]
    fn negative_budget_is_rejected() {
        let err = PreferenceRecord::new("bob", "Rome", "-5", "May", "explore").unwrap_err();
        assert_eq!(err.field(), "budget");
    }

    #[test]
    fn blank_field_is_rejected() {
        let err = PreferenceRecord::new("bob", "  ", "100", "May", "explore").unwrap_err();
        assert_eq!(err, ValidationError::empty_field("location"));
    }

    #[test]
    fn dates_accept_month_names_and_abbreviations() {
        for dates in ["march", "Late Sept", "dec to jan", "sometime in AUGUST"] {
            assert!(
                PreferenceRecord::new("a", "b", "1", dates, "c").is_ok(),
                "{dates} should be accepted"
            );
        }
    }

    #[test]
    fn dates_accept_digits() {
        assert!(PreferenceRecord::new("a", "b", "1", "week 12", "c").is_ok());
    }

    #[test]
    fn dates_without_month_or_digit_are_rejected() {
        let err = PreferenceRecord::new("a", "b", "1", "whenever", "c").unwrap_err();
        assert_eq!(err.field(), "dates");

        // "mar" inside another word is not a month
        let err = PreferenceRecord::new("a", "b", "1", "summertime", "c").unwrap_err();
        assert_eq!(err.field(), "dates");
    }

    #[test]
    fn prompt_line_describes_preference() {
        let pref = valid().unwrap();
        assert_eq!(
            pref.prompt_line(),
            "- alice wants to travel to Lisbon on a relax trip with a budget of 1,500 during 3/10-3/16."
        );
    }
}
