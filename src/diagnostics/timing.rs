use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Wall-clock time of one named stage of a cloud run.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Stage timings of a cloud run plus the end-to-end total.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Records the time since `start` under `label` and returns it.
    pub fn record(&mut self, label: impl Into<String>, start: Instant) -> f64 {
        let ms = elapsed_ms(start);
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms: ms,
        });
        ms
    }

    /// Elapsed time of the first stage named `label`.
    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }

    /// Average cost of one query in stage `label`; `None` for an empty batch
    /// or an unknown stage.
    pub fn per_query_ms(&self, label: &str, queries: usize) -> Option<f64> {
        if queries == 0 {
            return None;
        }
        self.stage_ms(label).map(|ms| ms / queries as f64)
    }
}

/// Milliseconds since `start`.
#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_query_cost_divides_stage_time() {
        let mut timing = TimingBreakdown::default();
        timing.stages.push(StageTiming {
            label: "fit".to_string(),
            elapsed_ms: 12.0,
        });
        assert_eq!(timing.per_query_ms("fit", 4), Some(3.0));
        assert_eq!(timing.per_query_ms("fit", 0), None);
        assert_eq!(timing.per_query_ms("orient", 4), None);
    }

    #[test]
    fn record_appends_in_order() {
        let mut timing = TimingBreakdown::default();
        let start = Instant::now();
        let fit = timing.record("fit", start);
        timing.record("orient", start);
        assert!(fit >= 0.0);
        assert_eq!(timing.stages.len(), 2);
        assert_eq!(timing.stages[0].label, "fit");
        assert_eq!(timing.stage_ms("fit"), Some(fit));
    }
}
