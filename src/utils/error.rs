use std::path::PathBuf;
use thiserror::Error;

/// 애플리케이션 전역 에러
///
/// 파일 작업 실패는 모두 타입이 있는 variant로 반환되며,
/// 커맨드 경계를 넘어 panic하지 않습니다.
#[derive(Error, Debug)]
pub enum TwinDirError {
    /// 경로가 없거나, 디렉토리가 아니거나, 접근 권한이 없음
    #[error("Cannot access {path}: {reason}")]
    NotAccessible { path: PathBuf, reason: String },

    /// 대상 이름이 이미 존재 (덮어쓰기 금지)
    #[error("Destination already exists: {path}")]
    NameConflict { path: PathBuf },

    /// 빈 이름 또는 경로 구분자를 포함한 이름
    #[error("Invalid name: '{name}'")]
    InvalidName { name: String },

    /// 목록 조회와 작업 사이에 소스가 사라짐
    #[error("Source no longer exists: {path}")]
    SourceMissing { path: PathBuf },

    /// OS 기본 프로그램 실행 실패
    #[error("Failed to open {path}: {reason}")]
    OpenFailed { path: PathBuf, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TwinDirError>;
