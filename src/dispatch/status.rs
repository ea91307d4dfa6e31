use crate::upload::FailureKind;

/// Running totals, owned by the aggregator alone
#[derive(Debug)]
pub struct RunStatus {
    total: usize,
    received: usize,
    succeeded: usize,
    local_failures: usize,
    remote_failures: usize,
    /// Once set, stays set
    any_failure: bool,
}

impl RunStatus {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            received: 0,
            succeeded: 0,
            local_failures: 0,
            remote_failures: 0,
            any_failure: false,
        }
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Returns the success count including this one
    pub fn record_success(&mut self) -> usize {
        self.received += 1;
        self.succeeded += 1;
        self.succeeded
    }

    pub fn record_failure(&mut self, kind: FailureKind) {
        self.received += 1;
        self.any_failure = true;
        match kind {
            FailureKind::Local => self.local_failures += 1,
            FailureKind::Remote => self.remote_failures += 1,
        }
    }

    pub fn has_failures(&self) -> bool {
        self.any_failure
    }

    /// Close the books once the result channel is drained
    pub fn finalize(self) -> RunSummary {
        let missing = self.total.saturating_sub(self.received);
        RunSummary {
            total: self.total,
            succeeded: self.succeeded,
            local_failures: self.local_failures,
            remote_failures: self.remote_failures,
            missing,
            has_failures: self.any_failure || missing > 0,
        }
    }
}

/// Final outcome of a dispatch run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub local_failures: usize,
    pub remote_failures: usize,
    /// Tasks with no result message; non-zero only if a worker died
    pub missing: usize,
    has_failures: bool,
}

impl RunSummary {
    pub fn failed(&self) -> usize {
        self.local_failures + self.remote_failures + self.missing
    }

    pub fn has_failures(&self) -> bool {
        self.has_failures
    }
}
