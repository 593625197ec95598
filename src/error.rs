use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtBuildError {
    #[error("Command failed with exit code {code}: {command}")]
    ToolFailed { command: String, code: i32 },

    #[error("invalid llvm-home-dir")]
    InvalidLlvmHomeDir(PathBuf),

    #[error("Working directory does not exist: {}", .0.display())]
    InvalidDirectory(PathBuf),

    #[error("Failed to start '{program}': {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

impl ExtBuildError {
    /// 프로세스 종료 코드로 변환
    ///
    /// 외부 도구 실패는 그 도구의 종료 코드를 그대로 전달합니다.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ToolFailed { code, .. } => *code,
            Self::InvalidLlvmHomeDir(_) | Self::InvalidDirectory(_) => 1,
            Self::SpawnFailed { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            Self::ConfigError(_) | Self::IoError(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtBuildError>;
