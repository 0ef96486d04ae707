use std::sync::atomic::{AtomicBool, Ordering};

/// Allows a single pending action. The slot is released when the guard drops.
#[derive(Debug, Default)]
pub(crate) struct SingleFlight {
    busy: AtomicBool,
}

pub(crate) struct FlightGuard<'a> {
    busy: &'a AtomicBool,
}

impl SingleFlight {
    pub(crate) fn try_acquire(&self) -> Option<FlightGuard<'_>> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| FlightGuard { busy: &self.busy })
    }
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
