use std::process::ExitCode;

/// Process exit status.
///
/// - `Success` (0): every requested usage block was generated
/// - `Failure` (1): finished, but some modules failed or `init` found an existing file
/// - `Error` (2): aborted (bad path, invalid config, fail-fast module error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
