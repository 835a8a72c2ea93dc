use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::models::job::Job;

pub const EXCELLENT_THRESHOLD: f64 = 85.0;
pub const GOOD_THRESHOLD: f64 = 70.0;
pub const FAIR_THRESHOLD: f64 = 50.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MatchTier {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            MatchTier::Excellent => "Excellent",
            MatchTier::Good => "Good",
            MatchTier::Fair => "Fair",
            MatchTier::Poor => "Poor",
        };
        f.write_str(s)
    }
}

pub fn match_tier(score: f64) -> MatchTier {
    if score >= EXCELLENT_THRESHOLD {
        MatchTier::Excellent
    } else if score >= GOOD_THRESHOLD {
        MatchTier::Good
    } else if score >= FAIR_THRESHOLD {
        MatchTier::Fair
    } else {
        MatchTier::Poor
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    MatchScore,
    Salary,
    Recent,
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "match" | "match_score" => Ok(SortKey::MatchScore),
            "salary" => Ok(SortKey::Salary),
            "recent" | "date" => Ok(SortKey::Recent),
            other => Err(format!("unknown sort key '{other}' (expected match, salary or recent)")),
        }
    }
}

/// Sorts best-first. The sort is stable, so ties keep listing order.
/// Jobs without a salary or posting date sort after those that have one.
pub fn sort_jobs(jobs: &mut [Job], key: SortKey, default_score: f64) {
    match key {
        SortKey::MatchScore => jobs.sort_by(|a, b| {
            b.effective_match_score(default_score)
                .total_cmp(&a.effective_match_score(default_score))
        }),
        SortKey::Salary => jobs.sort_by(|a, b| b.salary_max.cmp(&a.salary_max)),
        SortKey::Recent => jobs.sort_by(|a, b| b.posted_at.cmp(&a.posted_at)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::job::fixtures::job;
    use chrono::{TimeZone, Utc};

    fn ids(jobs: &[Job]) -> Vec<i64> {
        jobs.iter().map(|j| j.id).collect()
    }

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(match_tier(85.0), MatchTier::Excellent);
        assert_eq!(match_tier(84.9), MatchTier::Good);
        assert_eq!(match_tier(70.0), MatchTier::Good);
        assert_eq!(match_tier(50.0), MatchTier::Fair);
        assert_eq!(match_tier(49.0), MatchTier::Poor);
    }

    #[test]
    fn test_sort_by_match_uses_default_for_unscored() {
        let mut a = job(1, "A", "Pune");
        a.match_score = Some(60.0);
        let b = job(2, "B", "Pune");
        let mut c = job(3, "C", "Pune");
        c.match_score = Some(92.0);

        let mut jobs = vec![a, b, c];
        sort_jobs(&mut jobs, SortKey::MatchScore, 70.0);
        assert_eq!(ids(&jobs), vec![3, 2, 1]);
    }

    #[test]
    fn test_sort_is_stable_on_ties() {
        let mut jobs = vec![job(1, "A", "Pune"), job(2, "B", "Pune"), job(3, "C", "Pune")];
        sort_jobs(&mut jobs, SortKey::MatchScore, 70.0);
        assert_eq!(ids(&jobs), vec![1, 2, 3]);
    }

    #[test]
    fn test_sort_by_salary_puts_undisclosed_last() {
        let mut low = job(1, "A", "Pune");
        low.salary_max = Some(1_800_000);
        let mut none = job(2, "B", "Pune");
        none.salary_max = None;
        let high = job(3, "C", "Pune");

        let mut jobs = vec![low, none, high];
        sort_jobs(&mut jobs, SortKey::Salary, 70.0);
        assert_eq!(ids(&jobs), vec![3, 1, 2]);
    }

    #[test]
    fn test_sort_by_recent() {
        let old = job(1, "A", "Pune");
        let mut fresh = job(2, "B", "Pune");
        fresh.posted_at = Some(Utc.with_ymd_and_hms(2026, 10, 4, 0, 0, 0).unwrap());

        let mut jobs = vec![old, fresh];
        sort_jobs(&mut jobs, SortKey::Recent, 70.0);
        assert_eq!(ids(&jobs), vec![2, 1]);
    }

    #[test]
    fn test_sort_key_parses() {
        assert_eq!("match-score".parse::<SortKey>().unwrap(), SortKey::MatchScore);
        assert_eq!("Salary".parse::<SortKey>().unwrap(), SortKey::Salary);
    }
}
