use crate::models::LogEntry;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stats {
    pub latest: Option<f64>,
    pub change: Option<f64>,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeDirection {
    Increase,
    Decrease,
    Neutral,
}

impl Stats {
    // Sign of the rounded change; what the page colours by.
    pub fn direction(&self) -> ChangeDirection {
        match self.change {
            Some(change) if change > 0.0 => ChangeDirection::Increase,
            Some(change) if change < 0.0 => ChangeDirection::Decrease,
            _ => ChangeDirection::Neutral,
        }
    }
}

impl ChangeDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            ChangeDirection::Increase => "increase",
            ChangeDirection::Decrease => "decrease",
            ChangeDirection::Neutral => "neutral",
        }
    }
}

// Takes the sequence as the store hands it out: newest date first. The change
// is latest minus earliest, rounded to one decimal.
pub fn compute_stats(entries: &[LogEntry]) -> Stats {
    let (Some(newest), Some(oldest)) = (entries.first(), entries.last()) else {
        return Stats {
            latest: None,
            change: None,
            count: 0,
        };
    };

    Stats {
        latest: Some(newest.weight),
        change: Some(round_tenths(newest.weight - oldest.weight)),
        count: entries.len(),
    }
}

fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: i64, date: &str, weight: f64) -> LogEntry {
        LogEntry {
            id,
            date: date.to_string(),
            weight,
            bodyfat: None,
        }
    }

    #[test]
    fn stats_report_latest_change_and_count() {
        // Newest first, as the store sorts.
        let entries = vec![entry(2, "2024-02-01", 78.0), entry(1, "2024-01-01", 80.0)];

        let stats = compute_stats(&entries);
        assert_eq!(stats.latest, Some(78.0));
        assert_eq!(stats.change, Some(-2.0));
        assert_eq!(stats.count, 2);
        assert_eq!(stats.direction(), ChangeDirection::Decrease);
    }

    #[test]
    fn stats_empty_store_has_no_values() {
        let stats = compute_stats(&[]);
        assert_eq!(stats.latest, None);
        assert_eq!(stats.change, None);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.direction(), ChangeDirection::Neutral);
    }

    #[test]
    fn stats_single_entry_is_neutral() {
        let entries = vec![entry(1, "2024-01-01", 80.0)];

        let stats = compute_stats(&entries);
        assert_eq!(stats.latest, Some(80.0));
        assert_eq!(stats.change, Some(0.0));
        assert_eq!(stats.count, 1);
        assert_eq!(stats.direction(), ChangeDirection::Neutral);
    }

    #[test]
    fn stats_gaining_weight_reads_as_increase() {
        let entries = vec![entry(2, "2024-02-01", 81.5), entry(1, "2024-01-01", 80.0)];

        let stats = compute_stats(&entries);
        assert_eq!(stats.change, Some(1.5));
        assert_eq!(stats.direction(), ChangeDirection::Increase);
    }

    #[test]
    fn stats_change_is_rounded_to_one_decimal() {
        let entries = vec![entry(2, "2024-02-01", 80.04), entry(1, "2024-01-01", 80.0)];

        let stats = compute_stats(&entries);
        // 0.04 rounds away; the direction follows the rounded value.
        assert_eq!(stats.change, Some(0.0));
        assert_eq!(stats.direction(), ChangeDirection::Neutral);
    }
}
