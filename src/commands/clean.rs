use crate::config::Config;
use crate::error::Result;
use crate::executor::{CommandRunner, Invocation, Launcher};

/// hphpize/cmake가 생성하는 파일 목록 (순서 고정)
pub const GENERATED_ARTIFACTS: &[&str] = &[
    "CMakeLists.txt",
    "CMakeFiles",
    "CMakeCache.txt",
    "Makefile",
    "cmake_install.cmake",
];

/// 생성 파일을 한 번에 지우는 `rm -rf` 호출
///
/// 목록이 비어 있으면 지울 것이 없으므로 `None`.
pub fn removal(rm: &str, artifacts: &[&str]) -> Option<Invocation> {
    if artifacts.is_empty() {
        return None;
    }
    Some(Invocation::new(rm).arg("-rf").args(artifacts.iter().copied()))
}

/// make clean → rm -rf <생성 파일들>
pub fn clean_steps(config: &Config) -> Vec<Invocation> {
    let mut steps = vec![Invocation::new(&config.make).arg("clean")];
    steps.extend(removal(&config.rm, GENERATED_ARTIFACTS));
    steps
}

pub async fn execute_clean<L: Launcher>(runner: &CommandRunner<L>, config: &Config) -> Result<()> {
    runner.run_all(&clean_steps(config)).await
}
