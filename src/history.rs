//! Round history log and session statistics.
//!
//! Each settled round is appended as one JSON line so the log can be
//! tailed and replayed without a database.

use crate::amount::round2;
use crate::config::HistoryConfig;
use crate::engine::{MineCount, RoundOutcome};
use crate::errors::HistoryError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::PathBuf;

/// One settled round.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundRecord {
    pub round_id: String,
    pub timestamp: DateTime<Utc>,
    pub bet: f64,
    pub mine_count: MineCount,
    pub revealed_safe: usize,
    pub multiplier: f64,
    /// Zero on a loss
    pub payout: f64,
    pub outcome: RoundOutcome,
}

impl RoundRecord {
    pub fn new(
        bet: f64,
        mine_count: MineCount,
        revealed_safe: usize,
        multiplier: f64,
        payout: f64,
        outcome: RoundOutcome,
    ) -> Self {
        Self {
            round_id: uuid::Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            bet,
            mine_count,
            revealed_safe,
            multiplier,
            payout,
            outcome,
        }
    }
}

/// Append-only JSON-lines round log. Disabled history is a no-op sink.
pub struct RoundHistory {
    file: Option<PathBuf>,
}

impl RoundHistory {
    pub fn from_config(config: &HistoryConfig) -> Self {
        Self {
            file: config.enabled.then(|| PathBuf::from(&config.file)),
        }
    }

    pub fn disabled() -> Self {
        Self { file: None }
    }

    pub fn append(&self, record: &RoundRecord) -> Result<(), HistoryError> {
        let Some(path) = &self.file else {
            return Ok(());
        };

        let append_failed = |source: std::io::Error| HistoryError::AppendFailed {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(&append_failed)?;
        }

        let line = serde_json::to_string(record)?;
        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(&append_failed)?;
        writeln!(file, "{}", line).map_err(&append_failed)?;
        Ok(())
    }
}

/// Aggregate statistics for the current session.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub rounds_played: u64,
    pub rounds_won: u64,
    pub rounds_lost: u64,
    pub total_wagered: f64,
    pub total_paid_out: f64,
}

impl SessionStats {
    pub fn record(&mut self, record: &RoundRecord) {
        self.rounds_played += 1;
        match record.outcome {
            RoundOutcome::Won => self.rounds_won += 1,
            RoundOutcome::Lost => self.rounds_lost += 1,
        }
        self.total_wagered = round2(self.total_wagered + record.bet);
        self.total_paid_out = round2(self.total_paid_out + record.payout);
    }

    /// Operator profit over the session; negative when players are ahead.
    pub fn house_profit(&self) -> f64 {
        round2(self.total_wagered - self.total_paid_out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(bet: f64, payout: f64, outcome: RoundOutcome) -> RoundRecord {
        RoundRecord::new(bet, MineCount::new(3).unwrap(), 5, 1.9, payout, outcome)
    }

    #[test]
    fn test_stats_accumulate() {
        let mut stats = SessionStats::default();
        stats.record(&record(10.0, 19.0, RoundOutcome::Won));
        stats.record(&record(10.0, 0.0, RoundOutcome::Lost));
        stats.record(&record(5.0, 0.0, RoundOutcome::Lost));

        assert_eq!(stats.rounds_played, 3);
        assert_eq!(stats.rounds_won, 1);
        assert_eq!(stats.rounds_lost, 2);
        assert_eq!(stats.total_wagered, 25.0);
        assert_eq!(stats.total_paid_out, 19.0);
        assert_eq!(stats.house_profit(), 6.0);
    }

    #[test]
    fn test_history_appends_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let config = HistoryConfig {
            enabled: true,
            file: dir.path().join("rounds.jsonl").to_string_lossy().into_owned(),
        };
        let history = RoundHistory::from_config(&config);
        history.append(&record(10.0, 19.0, RoundOutcome::Won)).unwrap();
        history.append(&record(2.0, 0.0, RoundOutcome::Lost)).unwrap();

        let contents = std::fs::read_to_string(dir.path().join("rounds.jsonl")).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: RoundRecord = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed.bet, 10.0);
        assert_eq!(parsed.outcome, RoundOutcome::Won);
    }

    #[test]
    fn test_disabled_history_is_noop() {
        let history = RoundHistory::disabled();
        assert!(history.append(&record(1.0, 0.0, RoundOutcome::Lost)).is_ok());
    }
}
