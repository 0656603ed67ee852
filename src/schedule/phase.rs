/// Where the process is in its run.
///
/// `Assembling -> Scheduled -> RunningOnce -> IdleAwaitingCron | Terminated`, with
/// `IdleAwaitingCron` reported as `RunningRecurring` while a cron firing is executing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Assembling,
    Scheduled,
    RunningOnce,
    IdleAwaitingCron,
    RunningRecurring,
    Terminated,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Assembling => "assembling",
            Phase::Scheduled => "scheduled",
            Phase::RunningOnce => "running once",
            Phase::IdleAwaitingCron => "idle awaiting cron",
            Phase::RunningRecurring => "running recurring",
            Phase::Terminated => "terminated",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
