use crate::model::Sample;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct WindowBounds {
    pub lower_bound: f64,
    pub length: f64,
}

impl WindowBounds {
    pub const fn new(lower_bound: f64, length: f64) -> Self {
        Self { lower_bound, length }
    }

    pub fn upper_bound(&self) -> f64 {
        self.lower_bound + self.length
    }

    fn clip(&self, point_in_time: f64) -> f64 {
        point_in_time.clamp(self.lower_bound, self.upper_bound())
    }
}

/// Portion of a step function: a sample's value held over `[start, end)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Step {
    pub value: f64,
    pub start: f64,
    pub end: f64,
}

impl Step {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Interprets window data as a step function: each sample holds its value until the next sample,
/// the last one until the window's upper bound. Points in time are clipped to the window, so a
/// sample retained from before the lower bound contributes from the lower bound onward.
pub fn steps(window_data: &[Sample], bounds: WindowBounds) -> impl Iterator<Item = Step> + '_ {
    window_data.iter().enumerate().map(move |(pos, current)| {
        let start = bounds.clip(current.point_in_time());
        let end = window_data
            .get(pos + 1)
            .map_or_else(|| bounds.upper_bound(), |next| bounds.clip(next.point_in_time()));

        Step { value: current.value(), start, end: end.max(start) }
    })
}

/// Time integral of `f(value)` across the window's step function. Zero-length steps are skipped
/// so an infinite `f` at a value that is never held does not poison the sum.
pub fn integrate<F>(window_data: &[Sample], bounds: WindowBounds, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    steps(window_data, bounds)
        .filter(|step| 0.0 < step.duration())
        .map(|step| step.duration() * f(step.value))
        .sum()
}
