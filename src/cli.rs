use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extbuild")]
#[command(version)]
#[command(about = "Build and clean an HHVM native extension", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 명령어만 출력하고 실행하지 않음
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// 디버그 모드
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// 이 디렉토리에서 모든 단계 실행
    #[arg(short = 'C', long, global = true, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// 설정 파일 경로 (기본: ~/.extbuild/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// hphpize, cmake ., make 순서로 확장 빌드
    Build {
        /// cmake에 CMAKE_PREFIX_PATH로 전달할 LLVM 설치 디렉토리 (상대 경로는 -C 기준)
        #[arg(long, value_name = "PATH")]
        llvm_home_dir: Option<PathBuf>,
    },

    /// make clean 후 cmake 생성 파일 삭제
    Clean,
}
