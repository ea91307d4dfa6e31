//! Process exit codes

use crate::dispatch::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Exit {
    Success = 0,
    /// Bad arguments, configuration or collection link
    Usage = 1,
    /// The source directory could not be read
    TaskSource = 2,
    /// No JSON files in the source directory
    NoTasks = 3,
    /// At least one upload failed
    UploadFailures = 20,
}

impl Exit {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<&RunSummary> for Exit {
    fn from(summary: &RunSummary) -> Self {
        if summary.has_failures() {
            Exit::UploadFailures
        } else {
            Exit::Success
        }
    }
}

impl From<Exit> for std::process::ExitCode {
    fn from(exit: Exit) -> Self {
        std::process::ExitCode::from(exit.code())
    }
}
