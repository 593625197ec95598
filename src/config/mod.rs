use crate::error::{ExtBuildError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// extbuild 사용자 설정
///
/// 설정 파일은 ~/.extbuild/config.toml에 저장됩니다.
/// 각 항목은 실행할 외부 도구의 프로그램 이름(또는 경로)입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// 빌드 스캐폴딩 준비 도구
    #[serde(default = "default_hphpize")]
    pub hphpize: String,

    #[serde(default = "default_cmake")]
    pub cmake: String,

    #[serde(default = "default_make")]
    pub make: String,

    /// 재귀 강제 삭제 도구 (`-rf` 인자를 받아야 함)
    #[serde(default = "default_rm")]
    pub rm: String,
}

fn default_hphpize() -> String {
    "hphpize".to_string()
}

fn default_cmake() -> String {
    "cmake".to_string()
}

fn default_make() -> String {
    "make".to_string()
}

fn default_rm() -> String {
    "rm".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hphpize: default_hphpize(),
            cmake: default_cmake(),
            make: default_make(),
            rm: default_rm(),
        }
    }
}

impl Config {
    /// 기본 설정 파일 경로
    fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".extbuild")
            .join("config.toml")
    }

    /// 설정 로드
    ///
    /// 경로를 지정하지 않으면 기본 위치를 사용하고, 파일이 없으면 기본값을 반환합니다.
    /// 명시적으로 지정한 파일이 없으면 에러입니다.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(ExtBuildError::ConfigError(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                Self::load_from(path)
            }
            None => {
                let path = Self::default_path();
                if !path.exists() {
                    return Ok(Self::default());
                }
                Self::load_from(&path)
            }
        }
    }

    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content).map_err(|e| match e {
            ExtBuildError::ConfigError(msg) => {
                ExtBuildError::ConfigError(format!("{}: {}", path.display(), msg))
            }
            other => other,
        })
    }

    /// TOML 문자열 파싱
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ExtBuildError::ConfigError(e.to_string()))
    }
}
