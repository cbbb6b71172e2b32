use crate::utils::error::{Result, TwinDirError};
use std::path::Path;

/// 외부 프로그램 실행 능력
///
/// 파일을 OS 기본 프로그램으로 여는 주입형 인터페이스.
/// 테스트에서는 기록만 하는 구현으로 대체합니다.
pub trait Launcher {
    /// 주어진 경로를 기본 핸들러로 열기
    fn open(&self, path: &Path) -> Result<()>;
}

/// OS 기본 프로그램 런처 (open crate 래퍼)
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SystemLauncher {
    fn default() -> Self {
        Self::new()
    }
}

impl Launcher for SystemLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            return Err(TwinDirError::OpenFailed {
                path: path.to_path_buf(),
                reason: "path not found".to_string(),
            });
        }

        // detached 실행 - 종료 상태는 추적하지 않음
        open::that_detached(path).map_err(|e| TwinDirError::OpenFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }
}

/// 실행 요청만 기록하는 테스트용 런처
#[cfg(test)]
pub struct RecordingLauncher {
    opened: std::rc::Rc<std::cell::RefCell<Vec<std::path::PathBuf>>>,
    fail: bool,
}

#[cfg(test)]
impl RecordingLauncher {
    pub fn new() -> Self {
        Self {
            opened: std::rc::Rc::new(std::cell::RefCell::new(Vec::new())),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            opened: std::rc::Rc::new(std::cell::RefCell::new(Vec::new())),
            fail: true,
        }
    }

    /// 기록 공유 핸들 (런처를 App에 넘긴 뒤에도 조회 가능)
    pub fn log(&self) -> std::rc::Rc<std::cell::RefCell<Vec<std::path::PathBuf>>> {
        self.opened.clone()
    }
}

#[cfg(test)]
impl Launcher for RecordingLauncher {
    fn open(&self, path: &Path) -> Result<()> {
        self.opened.borrow_mut().push(path.to_path_buf());
        if self.fail {
            Err(TwinDirError::OpenFailed {
                path: path.to_path_buf(),
                reason: "launcher disabled in tests".to_string(),
            })
        } else {
            Ok(())
        }
    }
}
