use crate::error::{ExtBuildError, Result};
use crate::executor::invocation::Invocation;
use async_trait::async_trait;
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

/// 외부 프로세스 실행 추상화
#[async_trait]
pub trait Launcher: Send + Sync {
    /// 호출을 실행하고 종료될 때까지 기다린 뒤 종료 코드를 반환
    async fn launch(&self, invocation: &Invocation) -> Result<i32>;
}

/// 실제 자식 프로세스를 띄우는 실행기
///
/// 자식의 stdout은 그대로 상속하고, stderr는 부모의 stdout으로 합칩니다.
pub struct ProcessLauncher {
    working_dir: Option<PathBuf>,
}

impl ProcessLauncher {
    pub fn new(working_dir: Option<PathBuf>) -> Self {
        Self { working_dir }
    }
}

#[async_trait]
impl Launcher for ProcessLauncher {
    async fn launch(&self, invocation: &Invocation) -> Result<i32> {
        let mut command = Command::new(&invocation.program);
        command
            .args(&invocation.args)
            .envs(invocation.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(std::io::stdout());

        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        let status = command
            .status()
            .await
            .map_err(|source| ExtBuildError::SpawnFailed {
                program: invocation.program.clone(),
                source,
            })?;

        Ok(status_code(status))
    }
}

/// 시그널로 종료된 경우 셸 관례대로 128 + 시그널 번호
fn status_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }

    1
}

/// 순차 명령어 실행기 (fail-fast)
pub struct CommandRunner<L: Launcher = ProcessLauncher> {
    launcher: L,
    dry_run: bool,
}

impl<L: Launcher> CommandRunner<L> {
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            dry_run: false,
        }
    }

    /// 실행하지 않고 명령어만 출력
    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[cfg(test)]
    pub fn launcher(&self) -> &L {
        &self.launcher
    }

    /// 명령어를 출력한 뒤 실행하고 종료 코드를 반환
    pub async fn run(&self, invocation: &Invocation) -> Result<i32> {
        println!("{}", invocation);

        if self.dry_run {
            return Ok(0);
        }

        self.launcher.launch(invocation).await
    }

    /// 순서대로 실행하다가 처음 실패한 단계에서 중단
    ///
    /// 이후 단계는 실행되지 않으며, 실패한 단계의 종료 코드가 에러에 담깁니다.
    pub async fn run_all(&self, steps: &[Invocation]) -> Result<()> {
        for step in steps {
            let code = self.run(step).await?;
            if code != 0 {
                return Err(ExtBuildError::ToolFailed {
                    command: step.to_string(),
                    code,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// 프로그램별 종료 코드를 미리 정해두고 호출 기록을 남기는 실행기
    #[derive(Default)]
    pub(crate) struct ScriptedLauncher {
        codes: HashMap<String, i32>,
        pub(crate) calls: Mutex<Vec<Invocation>>,
    }

    impl ScriptedLauncher {
        pub(crate) fn fail(mut self, program: &str, code: i32) -> Self {
            self.codes.insert(program.to_string(), code);
            self
        }

        pub(crate) fn called(&self) -> Vec<String> {
            self.calls
                .lock()
                .unwrap()
                .iter()
                .map(|inv| inv.to_string())
                .collect()
        }
    }

    #[async_trait]
    impl Launcher for ScriptedLauncher {
        async fn launch(&self, invocation: &Invocation) -> Result<i32> {
            self.calls.lock().unwrap().push(invocation.clone());
            Ok(self.codes.get(&invocation.program).copied().unwrap_or(0))
        }
    }

    fn steps() -> Vec<Invocation> {
        vec![
            Invocation::new("first"),
            Invocation::new("second"),
            Invocation::new("third"),
        ]
    }

    #[tokio::test]
    async fn test_all_steps_succeed() {
        let runner = CommandRunner::new(ScriptedLauncher::default());
        runner.run_all(&steps()).await.unwrap();
        assert_eq!(runner.launcher.called(), vec!["first", "second", "third"]);
    }

    #[tokio::test]
    async fn test_stops_at_first_failure() {
        let launcher = ScriptedLauncher::default().fail("second", 3).fail("third", 4);
        let runner = CommandRunner::new(launcher);

        let err = runner.run_all(&steps()).await.unwrap_err();

        assert_eq!(err.exit_code(), 3);
        assert!(matches!(err, ExtBuildError::ToolFailed { ref command, code: 3 } if command == "second"));
        assert_eq!(runner.launcher.called(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_first_step_failure_runs_nothing_else() {
        let runner = CommandRunner::new(ScriptedLauncher::default().fail("first", 127));
        let err = runner.run_all(&steps()).await.unwrap_err();
        assert_eq!(err.exit_code(), 127);
        assert_eq!(runner.launcher.called(), vec!["first"]);
    }

    #[tokio::test]
    async fn test_dry_run_launches_nothing() {
        let runner = CommandRunner::new(ScriptedLauncher::default().fail("first", 1)).dry_run(true);
        runner.run_all(&steps()).await.unwrap();
        assert!(runner.launcher.called().is_empty());
    }

    #[tokio::test]
    async fn test_empty_sequence_succeeds() {
        let runner = CommandRunner::new(ScriptedLauncher::default());
        runner.run_all(&[]).await.unwrap();
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_launcher_exit_codes() {
        let launcher = ProcessLauncher::new(None);

        let ok = Invocation::new("sh").args(["-c", "exit 0"]);
        assert_eq!(launcher.launch(&ok).await.unwrap(), 0);

        let failed = Invocation::new("sh").args(["-c", "exit 42"]);
        assert_eq!(launcher.launch(&failed).await.unwrap(), 42);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_launcher_passes_env() {
        let launcher = ProcessLauncher::new(None);
        let inv = Invocation::new("sh")
            .args(["-c", "test \"$CMAKE_PREFIX_PATH\" = /opt/llvm"])
            .env("CMAKE_PREFIX_PATH", "/opt/llvm");
        assert_eq!(launcher.launch(&inv).await.unwrap(), 0);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_launcher_working_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("marker"), "").unwrap();

        let launcher = ProcessLauncher::new(Some(dir.path().to_path_buf()));
        let inv = Invocation::new("sh").args(["-c", "test -f marker"]);
        assert_eq!(launcher.launch(&inv).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_process_launcher_missing_program() {
        let launcher = ProcessLauncher::new(None);
        let inv = Invocation::new("extbuild-definitely-not-installed");
        let err = launcher.launch(&inv).await.unwrap_err();
        assert_eq!(err.exit_code(), 127);
    }
}
