use std::time::Instant;

/** stopping criterion polled by the searches before each unit of work */
pub trait StoppingCriterion {
    /// true iff the search should stop
    fn is_finished(&self) -> bool;
}

/**
Time stopping criterion. A timer can be derived from a parent one: its limit is then the
minimum of the requested limit and the time left to the parent, so nested calls never outlive
their parent's deadline.
*/
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    /// creation instant
    start: Instant,
    /// time limit (seconds, may be infinite)
    limit: f64,
}

impl Timer {
    /// timer expiring after `limit` seconds
    pub fn new(limit:f64) -> Self {
        Self { start: Instant::now(), limit }
    }

    /// timer that never expires
    pub fn unlimited() -> Self { Self::new(f64::INFINITY) }

    /// timer expiring after `limit` seconds, or when the parent expires (whichever comes first)
    pub fn child(&self, limit:f64) -> Self {
        Self::new(limit.min(self.secs_left()))
    }

    /// seconds since creation
    pub fn elapsed_secs(&self) -> f64 { self.start.elapsed().as_secs_f64() }

    /// seconds before expiration (negative if expired)
    pub fn secs_left(&self) -> f64 { self.limit - self.elapsed_secs() }

    /// time limit given at creation
    pub fn limit(&self) -> f64 { self.limit }

    /// true iff the time limit is reached
    pub fn timed_out(&self) -> bool { self.elapsed_secs() >= self.limit }
}

impl StoppingCriterion for Timer {
    fn is_finished(&self) -> bool { self.timed_out() }
}
