/// Receives coarse "`done` of `total` pixels" notifications during a run.
///
/// Called from worker threads; calls may arrive slightly out of order but the
/// final call of a successful run is always `(total, total)`.
pub trait ProgressObserver: Send + Sync {
    fn on_progress(&self, done: usize, total: usize);
}

impl<F> ProgressObserver for F
where
    F: Fn(usize, usize) + Send + Sync,
{
    fn on_progress(&self, done: usize, total: usize) {
        self(done, total)
    }
}
