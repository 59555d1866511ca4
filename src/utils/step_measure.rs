use log::debug;
use std::time::{Duration, Instant};

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    let secs = duration.as_secs();
    if millis < 1_000 {
        format!("{millis} ms")
    } else if secs < 60 {
        format!("{secs}.{:03} s", duration.subsec_millis())
    } else {
        format!("{}:{:02}.{:03} min", secs / 60, secs % 60, duration.subsec_millis())
    }
}

/// Times the pipeline steps of a run. Every finished step is logged at debug level,
/// `stop` hands back the duration of the whole run for the summary.
pub struct StepMeasure {
    step: Option<&'static str>,
    step_start: Instant,
    run_start: Instant,
    finished: usize,
}

impl StepMeasure {
    pub fn new(step: &'static str) -> Self {
        let now = Instant::now();
        Self {
            step: Some(step),
            step_start: now,
            run_start: now,
            finished: 0,
        }
    }

    fn finish_step(&mut self) {
        if let Some(step) = self.step.take() {
            self.finished += 1;
            debug!("step {} {step} took {}", self.finished, format_duration(self.step_start.elapsed()));
        }
    }

    pub fn tick(&mut self, step: &'static str) {
        self.finish_step();
        self.step = Some(step);
        self.step_start = Instant::now();
    }

    pub fn stop(mut self) -> (usize, Duration) {
        self.finish_step();
        (self.finished, self.run_start.elapsed())
    }
}
