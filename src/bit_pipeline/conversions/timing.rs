//! Wall-clock timings of the pipeline stages

use std::time::{Duration, Instant};
use tracing::info;

#[derive(Debug, Clone)]
pub struct StepTiming {
    pub name: &'static str,
    pub duration: Duration,
}

/// Ordered record of how long each stage of a run took.
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    steps: Vec<StepTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: &'static str, duration: Duration) {
        self.steps.push(StepTiming { name, duration });
    }

    /// Runs `step` and records its duration under `name`, whether or not it succeeds.
    pub fn time<T>(&mut self, name: &'static str, step: impl FnOnce() -> T) -> T {
        let started = Instant::now();
        let result = step();
        self.add_step(name, started.elapsed());
        result
    }

    /// Appends every step of `other` after the steps already recorded.
    pub fn extend(&mut self, other: PipelineTimings) {
        self.steps.extend(other.steps);
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every step recorded as `name`.
    pub fn get_step(&self, name: &str) -> Option<Duration> {
        self.steps
            .iter()
            .filter(|s| s.name == name)
            .map(|s| s.duration)
            .reduce(|a, b| a + b)
    }

    pub fn steps(&self) -> &[StepTiming] {
        &self.steps
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        for step in &self.steps {
            let share = if total.is_zero() {
                0.0
            } else {
                step.duration.as_secs_f64() / total.as_secs_f64() * 100.0
            };
            info!(
                step = step.name,
                "{:>10.3}ms ({:>5.1}%)",
                step.duration.as_secs_f64() * 1000.0,
                share
            );
        }
        info!(step = "total", "{:>10.3}ms", total.as_secs_f64() * 1000.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_steps_in_order() {
        let mut timings = PipelineTimings::new();
        timings.add_step("plan_dimensions", Duration::from_millis(2));
        let value = timings.time("rasterize", || 42);
        timings.add_step("plan_dimensions", Duration::from_millis(3));

        assert_eq!(value, 42);
        let names: Vec<_> = timings.steps().iter().map(|s| s.name).collect();
        assert_eq!(names, vec!["plan_dimensions", "rasterize", "plan_dimensions"]);
        assert_eq!(timings.get_step("plan_dimensions"), Some(Duration::from_millis(5)));
        assert_eq!(timings.get_step("encode_png"), None);
        assert!(timings.total_duration() >= Duration::from_millis(5));
    }
}
