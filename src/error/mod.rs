use thiserror::Error;

pub type AppResult<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("gtk runtime exited with {0}")]
    Runtime(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_error_reports_the_exit_status() {
        let err = AppError::Runtime("ExitCode(1)".to_string());
        assert_eq!(err.to_string(), "gtk runtime exited with ExitCode(1)");
    }
}
