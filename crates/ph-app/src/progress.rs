use ph_sweep::SweepStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStage {
    LoadingProject,
    CheckingCache,
    LoadingCachedResult,
    CompilingProject,
    Sweeping,
    Paused,
    SavingResults,
    Completed,
}

impl RunStage {
    pub fn label(self) -> &'static str {
        match self {
            Self::LoadingProject => "loading project",
            Self::CheckingCache => "checking cache",
            Self::LoadingCachedResult => "loading cached run",
            Self::CompilingProject => "compiling",
            Self::Sweeping => "sweeping",
            Self::Paused => "paused",
            Self::SavingResults => "saving",
            Self::Completed => "done",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SweepProgress {
    pub completed: usize,
    pub total: usize,
    pub velocity_mps: Option<f64>,
    pub trim_deg: Option<f64>,
    pub failed: usize,
    pub fraction_complete: f64,
}

#[derive(Debug, Clone)]
pub struct RunProgressEvent {
    pub stage: RunStage,
    pub elapsed_wall_s: f64,
    pub message: Option<String>,
    pub sweep: Option<SweepProgress>,
    /// Final sweep status, set on the `Completed` stage.
    pub status: Option<SweepStatus>,
}

impl RunProgressEvent {
    pub fn stage(stage: RunStage, elapsed_wall_s: f64, message: Option<String>) -> Self {
        Self {
            stage,
            elapsed_wall_s,
            message,
            sweep: None,
            status: None,
        }
    }
}
