//! Display ordering of resolved library results.

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{LibraryResult, LibraryStatus};

/// Waits that cannot be parsed from the status text sort after every
/// parseable wait.
const UNPARSEABLE_WAIT_HOURS: u32 = u32::MAX;

/// Sort results for display: status precedence first, then shorter waits
/// before longer ones within the waitlisted group.
///
/// The sort is stable, so results that compare equal keep the order they
/// were resolved in, which is the caller's requested library order.
pub fn sort_for_display(mut results: Vec<LibraryResult>) -> Vec<LibraryResult> {
    results.sort_by(|a, b| {
        let by_status = a.status.precedence().cmp(&b.status.precedence());
        if by_status.is_eq() && a.status == LibraryStatus::Wait {
            wait_hours(&a.status_text).cmp(&wait_hours(&b.status_text))
        } else {
            by_status
        }
    });
    results
}

/// Parse an estimated wait out of status text like "5 weeks wait" or
/// "3 days wait", normalized to hours for comparison.
fn wait_hours(text: &str) -> u32 {
    static WEEKS: OnceLock<Regex> = OnceLock::new();
    static DAYS: OnceLock<Regex> = OnceLock::new();
    static HOURS: OnceLock<Regex> = OnceLock::new();

    let weeks = WEEKS.get_or_init(|| Regex::new(r"(?i)(\d+)\s*(?:week|month)").unwrap());
    let days = DAYS.get_or_init(|| Regex::new(r"(?i)(\d+)\s*day").unwrap());
    let hours = HOURS.get_or_init(|| Regex::new(r"(?i)(\d+)\s*hour").unwrap());

    if let Some(n) = capture_number(weeks, text) {
        // Months were rendered from weeks, so weigh them back as 4 weeks
        let factor = if text.to_lowercase().contains("month") {
            4 * 168
        } else {
            168
        };
        return n.saturating_mul(factor);
    }
    if let Some(n) = capture_number(days, text) {
        return n.saturating_mul(24);
    }
    if let Some(n) = capture_number(hours, text) {
        return n;
    }

    UNPARSEABLE_WAIT_HOURS
}

fn capture_number(re: &Regex, text: &str) -> Option<u32> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}
