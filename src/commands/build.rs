use crate::config::Config;
use crate::error::{ExtBuildError, Result};
use crate::executor::{CommandRunner, Invocation, Launcher};
use std::fs;
use std::path::{Path, PathBuf};

/// cmake에 LLVM 설치 위치를 알려주는 환경 변수
pub const CMAKE_PREFIX_PATH: &str = "CMAKE_PREFIX_PATH";

/// build 명령 옵션 (경로는 이미 절대 경로로 해석됨)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildOptions {
    pub llvm_home_dir: Option<PathBuf>,
}

impl BuildOptions {
    /// `--llvm-home-dir` 값을 절대 경로로 해석
    ///
    /// 상대 경로는 `working_dir`(`-C`)이 주어지면 그 기준으로, 아니면 현재 디렉토리 기준입니다.
    /// 경로가 존재하지 않으면 `InvalidLlvmHomeDir`을 반환합니다.
    pub fn resolve(llvm_home_dir: Option<&Path>, working_dir: Option<&Path>) -> Result<Self> {
        let llvm_home_dir = llvm_home_dir
            .map(|dir| {
                let candidate = match working_dir {
                    Some(base) if dir.is_relative() => base.join(dir),
                    _ => dir.to_path_buf(),
                };
                fs::canonicalize(&candidate)
                    .map_err(|_| ExtBuildError::InvalidLlvmHomeDir(dir.to_path_buf()))
            })
            .transpose()?;

        Ok(Self { llvm_home_dir })
    }
}

/// hphpize → cmake . → make
pub fn build_steps(config: &Config, options: &BuildOptions) -> Vec<Invocation> {
    let mut cmake = Invocation::new(&config.cmake).arg(".");
    if let Some(dir) = &options.llvm_home_dir {
        cmake = cmake.env(CMAKE_PREFIX_PATH, dir.as_os_str());
    }

    vec![Invocation::new(&config.hphpize), cmake, Invocation::new(&config.make)]
}

pub async fn execute_build<L: Launcher>(
    runner: &CommandRunner<L>,
    config: &Config,
    options: &BuildOptions,
) -> Result<()> {
    runner.run_all(&build_steps(config, options)).await
}
