//! Availability classification and wait-time estimation.
//!
//! Classification is an explicit ordered rule chain over one catalog record;
//! rendering the classification into user-facing text is kept separate so
//! the precedence stays auditable on its own.

use crate::models::{Availability, CatalogRecord};

/// How long one copy is assumed to stay checked out, in weeks. A guessed
/// heuristic, kept tunable rather than treated as a law.
pub const ASSUMED_LENDING_WEEKS: u32 = 2;

/// Estimated waits up to this many weeks are quoted in weeks; longer waits
/// are converted to months.
const WEEKS_QUOTED_AS_WEEKS_MAX: u32 = 8;

/// Estimated waits of at least this many weeks collapse to "Several months".
const WEEKS_SEVERAL_MONTHS_MIN: u32 = 26;

/// Normalized availability of one catalog record.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub status: Availability,
    /// User-facing status text ("Available now", "5 weeks wait", ...)
    pub text: String,
    /// Hold-queue explanation, wait status only
    pub wait_detail: Option<String>,
}

/// The classification rules, evaluated top-down; the first rule whose guard
/// holds decides the status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    /// Catalog flags the record borrowable, or free copies exist
    AvailableNow,
    /// A hold queue exists
    HoldQueue,
    /// The library owns copies but exposes no availability signal
    OwnedOnly,
    /// Nothing suggests the library carries this record
    NotCarried,
}

const RULES: [Rule; 4] = [
    Rule::AvailableNow,
    Rule::HoldQueue,
    Rule::OwnedOnly,
    Rule::NotCarried,
];

impl Rule {
    fn apply(&self, record: &CatalogRecord) -> Option<Availability> {
        match self {
            Rule::AvailableNow => (record.is_available == Some(true)
                || record.available_copies.unwrap_or(0) > 0)
                .then_some(Availability::Available),
            Rule::HoldQueue => {
                (record.holds_count.unwrap_or(0) > 0).then_some(Availability::Wait)
            }
            Rule::OwnedOnly => {
                (record.owned_copies.unwrap_or(0) > 0).then_some(Availability::Unknown)
            }
            Rule::NotCarried => Some(Availability::Unavailable),
        }
    }
}

/// Derive the availability of one catalog record.
pub fn classify(record: &CatalogRecord) -> Classification {
    let status = RULES
        .iter()
        .find_map(|rule| rule.apply(record))
        .unwrap_or(Availability::Unavailable);

    render(status, record)
}

/// Render a status into its user-facing text and wait detail.
fn render(status: Availability, record: &CatalogRecord) -> Classification {
    match status {
        Availability::Available => Classification {
            status,
            text: "Available now".to_string(),
            wait_detail: None,
        },
        Availability::Wait => {
            let holds = record.holds_count.unwrap_or(0);
            // Owned count defaults to 1 for display only; estimation below
            // still distinguishes absent from present.
            let owned_display = match record.owned_copies {
                Some(n) if n > 0 => n,
                _ => 1,
            };
            Classification {
                status,
                text: wait_text(record),
                wait_detail: Some(format!(
                    "{} {}, {} {}",
                    owned_display,
                    plural(owned_display, "copy", "copies"),
                    holds,
                    plural(holds, "hold", "holds"),
                )),
            }
        }
        Availability::Unknown => Classification {
            status,
            text: "Check availability".to_string(),
            wait_detail: None,
        },
        Availability::Unavailable => Classification {
            status,
            text: "Not available".to_string(),
            wait_detail: None,
        },
    }
}

/// Estimated wait text for a record with a hold queue.
///
/// The catalog's own day estimate wins when present; otherwise the wait is
/// derived from the holds-per-copy ratio assuming [`ASSUMED_LENDING_WEEKS`]
/// per copy. When neither is computable the text falls back to a generic
/// estimate rather than an error.
fn wait_text(record: &CatalogRecord) -> String {
    if let Some(days) = record.estimated_wait_days {
        if days > 0 {
            return if days < 7 {
                format!("{} {} wait", days, plural(days, "day", "days"))
            } else if days < 30 {
                let weeks = days.div_ceil(7);
                format!("{} {} wait", weeks, plural(weeks, "week", "weeks"))
            } else {
                let months = days.div_ceil(30);
                format!("{} {} wait", months, plural(months, "month", "months"))
            };
        }
    }

    match (record.holds_count, record.owned_copies) {
        (Some(holds), Some(owned)) if holds > 0 && owned > 0 => {
            let weeks = (holds * ASSUMED_LENDING_WEEKS).div_ceil(owned);
            if weeks >= WEEKS_SEVERAL_MONTHS_MIN {
                "Several months wait".to_string()
            } else if weeks > WEEKS_QUOTED_AS_WEEKS_MAX {
                let months = weeks.div_ceil(4);
                format!("{} {} wait", months, plural(months, "month", "months"))
            } else {
                format!("{} {} wait", weeks, plural(weeks, "week", "weeks"))
            }
        }
        _ => "Several weeks wait".to_string(),
    }
}

fn plural<'a>(count: u32, singular: &'a str, plural: &'a str) -> &'a str {
    if count == 1 {
        singular
    } else {
        plural
    }
}
