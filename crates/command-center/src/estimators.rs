//! Estimator leaderboard: close rates, average tickets, and ranking.

use serde::{Deserialize, Serialize};

/// Close rate below which an estimator gets a coaching suggestion.
pub const COACHING_THRESHOLD: f64 = 60.0;

/// Close rate below which an estimator trips an operator-radar alert.
pub const ALERT_THRESHOLD: f64 = 30.0;

/// Medal shown next to the top performers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    Gold,
    Silver,
    Bronze,
    None,
}

impl Badge {
    fn for_rank(rank: u32) -> Badge {
        match rank {
            1 => Badge::Gold,
            2 => Badge::Silver,
            3 => Badge::Bronze,
            _ => Badge::None,
        }
    }
}

/// Raw performance numbers for one estimator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Estimator {
    pub id: String,
    pub name: String,
    pub quotes_given: u32,
    pub jobs_closed: u32,
    pub total_revenue_cents: i64,
    /// Period-over-period revenue movement in whole percent.
    pub trend_pct: i32,
}

impl Estimator {
    pub fn new(id: &str, name: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            quotes_given: 0,
            jobs_closed: 0,
            total_revenue_cents: 0,
            trend_pct: 0,
        }
    }

    pub fn with_performance(
        mut self,
        quotes_given: u32,
        jobs_closed: u32,
        total_revenue_cents: i64,
    ) -> Self {
        self.quotes_given = quotes_given;
        self.jobs_closed = jobs_closed;
        self.total_revenue_cents = total_revenue_cents;
        self
    }

    pub fn with_trend(mut self, trend_pct: i32) -> Self {
        self.trend_pct = trend_pct;
        self
    }

    /// Jobs closed per quote given, as a percentage rounded to one
    /// decimal. Zero quotes means a zero rate.
    pub fn close_rate(&self) -> f64 {
        if self.quotes_given == 0 {
            return 0.0;
        }
        let raw = self.jobs_closed as f64 / self.quotes_given as f64 * 100.0;
        (raw * 10.0).round() / 10.0
    }

    /// Average closed-job value in cents. Zero closed jobs means zero.
    pub fn avg_ticket_cents(&self) -> i64 {
        if self.jobs_closed == 0 {
            return 0;
        }
        (self.total_revenue_cents as f64 / self.jobs_closed as f64).round() as i64
    }

    /// Close rate low enough to suggest coaching.
    pub fn needs_coaching(&self) -> bool {
        self.close_rate() < COACHING_THRESHOLD
    }

    /// Close rate low enough to alert the operator radar.
    pub fn below_alert_threshold(&self) -> bool {
        self.close_rate() < ALERT_THRESHOLD
    }
}

/// An estimator with leaderboard placement and derived figures attached.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEstimator {
    pub rank: u32,
    pub badge: Badge,
    pub close_rate: f64,
    pub avg_ticket_cents: i64,
    #[serde(flatten)]
    pub estimator: Estimator,
}

/// Ranks estimators by total revenue, highest first. Ties keep input
/// order. The top three get medals.
pub fn leaderboard(estimators: &[Estimator]) -> Vec<RankedEstimator> {
    let mut sorted: Vec<Estimator> = estimators.to_vec();
    sorted.sort_by(|a, b| b.total_revenue_cents.cmp(&a.total_revenue_cents));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, estimator)| {
            let rank = i as u32 + 1;
            RankedEstimator {
                rank,
                badge: Badge::for_rank(rank),
                close_rate: estimator.close_rate(),
                avg_ticket_cents: estimator.avg_ticket_cents(),
                estimator,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<Estimator> {
        vec![
            Estimator::new("E4", "Tony Rodriguez")
                .with_performance(98, 28, 6_240_000)
                .with_trend(-3),
            Estimator::new("E1", "Ali Sheikh")
                .with_performance(156, 108, 24_560_000)
                .with_trend(12),
            Estimator::new("E3", "Sarah Chen")
                .with_performance(142, 85, 18_730_000)
                .with_trend(5),
            Estimator::new("E2", "Marcus Johnson")
                .with_performance(134, 89, 19_840_000)
                .with_trend(8),
        ]
    }

    #[test]
    fn test_close_rate_one_decimal() {
        let roster = roster();
        let by_id = |id: &str| roster.iter().find(|e| e.id == id).unwrap();

        assert_eq!(by_id("E1").close_rate(), 69.2);
        assert_eq!(by_id("E2").close_rate(), 66.4);
        assert_eq!(by_id("E3").close_rate(), 59.9);
        assert_eq!(by_id("E4").close_rate(), 28.6);
    }

    #[test]
    fn test_close_rate_with_no_quotes_is_zero() {
        let fresh = Estimator::new("E9", "New Hire");
        assert_eq!(fresh.close_rate(), 0.0);
        assert_eq!(fresh.avg_ticket_cents(), 0);
    }

    #[test]
    fn test_avg_ticket() {
        let ali = Estimator::new("E1", "Ali Sheikh").with_performance(156, 108, 24_560_000);
        // $245,600 over 108 closed jobs.
        assert_eq!(ali.avg_ticket_cents(), 227_407);
    }

    #[test]
    fn test_leaderboard_ranks_by_revenue() {
        let ranked = leaderboard(&roster());

        let order: Vec<&str> = ranked.iter().map(|r| r.estimator.id.as_str()).collect();
        assert_eq!(order, ["E1", "E2", "E3", "E4"]);

        assert_eq!(ranked[0].rank, 1);
        assert_eq!(ranked[0].badge, Badge::Gold);
        assert_eq!(ranked[1].badge, Badge::Silver);
        assert_eq!(ranked[2].badge, Badge::Bronze);
        assert_eq!(ranked[3].badge, Badge::None);
    }

    #[test]
    fn test_thresholds() {
        let roster = roster();
        let by_id = |id: &str| roster.iter().find(|e| e.id == id).unwrap();

        // 59.9% gets a coaching flag but not an alert.
        assert!(by_id("E3").needs_coaching());
        assert!(!by_id("E3").below_alert_threshold());

        // 28.6% trips both.
        assert!(by_id("E4").needs_coaching());
        assert!(by_id("E4").below_alert_threshold());

        assert!(!by_id("E1").needs_coaching());
    }

    #[test]
    fn test_ranked_serde_flattens_estimator() {
        let ranked = leaderboard(&roster());
        let json = serde_json::to_value(&ranked[0]).unwrap();
        assert_eq!(json["rank"], 1);
        assert_eq!(json["badge"], "gold");
        assert_eq!(json["name"], "Ali Sheikh");
        assert_eq!(json["closeRate"], 69.2);
    }
}
