//! Draw history queries

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::DrawResult;

/// Filter over committed draw results
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
    pub list_id: Option<Uuid>,
    /// First calendar day included (UTC)
    pub from: Option<NaiveDate>,
    /// Last calendar day included (UTC)
    pub to: Option<NaiveDate>,
}

impl HistoryQuery {
    pub fn for_list(list_id: Uuid) -> Self {
        Self {
            list_id: Some(list_id),
            ..Self::default()
        }
    }

    pub fn between(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from = from;
        self.to = to;
        self
    }

    pub fn matches(&self, result: &DrawResult) -> bool {
        if self.list_id.is_some_and(|id| id != result.list_id) {
            return false;
        }
        let day = result.timestamp.date_naive();
        if self.from.is_some_and(|from| day < from) {
            return false;
        }
        if self.to.is_some_and(|to| day > to) {
            return false;
        }
        true
    }

    /// Matching results, newest first
    pub fn apply<'a>(&self, history: &'a [DrawResult]) -> Vec<&'a DrawResult> {
        let mut matched: Vec<_> = history.iter().filter(|r| self.matches(r)).collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        matched
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DrawSettings;
    use chrono::{TimeZone, Utc};

    fn make_result(list_id: Uuid, day: u32, hour: u32) -> DrawResult {
        DrawResult {
            id: Uuid::new_v4(),
            list_id,
            drawn_names: Vec::new(),
            timestamp: Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap(),
            settings: DrawSettings::default(),
        }
    }

    #[test]
    fn test_filter_by_list_newest_first() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let history = vec![
            make_result(a, 1, 10),
            make_result(b, 2, 10),
            make_result(a, 3, 10),
        ];

        let matched = HistoryQuery::for_list(a).apply(&history);
        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, history[2].id);
        assert_eq!(matched[1].id, history[0].id);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let list = Uuid::new_v4();
        let history = vec![
            make_result(list, 1, 23),
            make_result(list, 2, 0),
            make_result(list, 3, 23),
            make_result(list, 4, 0),
        ];

        let from = NaiveDate::from_ymd_opt(2024, 3, 2);
        let to = NaiveDate::from_ymd_opt(2024, 3, 3);
        let matched = HistoryQuery::for_list(list).between(from, to).apply(&history);

        assert_eq!(matched.len(), 2);
        assert_eq!(matched[0].id, history[2].id);
        assert_eq!(matched[1].id, history[1].id);
    }

    #[test]
    fn test_open_ended_range() {
        let list = Uuid::new_v4();
        let history = vec![make_result(list, 1, 0), make_result(list, 9, 0)];
        let query = HistoryQuery::default().between(NaiveDate::from_ymd_opt(2024, 3, 5), None);
        assert_eq!(query.apply(&history).len(), 1);
    }
}
