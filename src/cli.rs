use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rundoc")]
#[command(version)]
#[command(about = "Runnable documentation: render docs as markdown or run them as scripts", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 디버그 로그 출력
    #[arg(short = 'd', long, global = true)]
    pub debug: bool,

    /// 실행 정책 설정 파일 (미지정시 ~/.rundoc/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// 명령어 실행 제한 시간 (초, 0이면 무제한)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// 문서를 마크다운으로 렌더링
    Render {
        /// 문서 이름
        #[arg(long)]
        doc_name: String,

        /// 저장할 파일 경로
        #[arg(long, default_value = "README.md")]
        path: String,
    },

    /// 렌더링 결과와 저장된 파일 비교
    Compare {
        #[arg(long)]
        doc_name: String,

        #[arg(long, default_value = "README.md")]
        path: String,
    },

    /// 문서를 스크립트로 실행
    Run {
        #[arg(long)]
        doc_name: String,

        /// 실행할 섹션 (미지정시 전체)
        #[arg(long, default_value = "")]
        section: String,
    },

    /// 실행하지 않고 실행 계획만 출력
    Plan {
        #[arg(long)]
        doc_name: String,

        #[arg(long, default_value = "")]
        section: String,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 등록된 문서 목록
    List,
}
