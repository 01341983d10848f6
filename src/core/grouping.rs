//! # Date Grouping
//!
//! Pure projection from the flat timeline into per-day buckets.
//!
//! Buckets appear in the order their date is first seen in the timeline, not
//! sorted. A message whose date already has a bucket joins it, so an
//! out-of-order optimistic append shows up in its own day rather than
//! opening a duplicate separator.

use std::collections::HashMap;

use chrono::{Local, NaiveDate, TimeZone};

use crate::core::message::Message;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateBucket {
    pub date: NaiveDate,
    pub messages: Vec<Message>,
}

/// The grouped view of a timeline.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Projection {
    pub buckets: Vec<DateBucket>,
}

impl Projection {
    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Total messages across all buckets.
    pub fn message_count(&self) -> usize {
        self.buckets.iter().map(|b| b.messages.len()).sum()
    }
}

#[cfg(test)]
impl Projection {
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.buckets.iter().map(|b| b.date).collect()
    }
}

/// Group messages by calendar date in `tz`.
pub fn project<Tz: TimeZone>(messages: &[Message], tz: &Tz) -> Projection {
    let mut buckets: Vec<DateBucket> = Vec::new();
    let mut index: HashMap<NaiveDate, usize> = HashMap::new();

    for message in messages {
        let date = message.timestamp.with_timezone(tz).date_naive();
        let slot = *index.entry(date).or_insert_with(|| {
            buckets.push(DateBucket {
                date,
                messages: Vec::new(),
            });
            buckets.len() - 1
        });
        buckets[slot].messages.push(message.clone());
    }

    Projection { buckets }
}

/// Group messages by the viewer's local calendar day.
pub fn project_local(messages: &[Message]) -> Projection {
    project(messages, &Local)
}

/// Separator text for a bucket.
pub fn date_label(date: NaiveDate, today: NaiveDate) -> String {
    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        date.format("%a, %b %d %Y").to_string()
    }
}
