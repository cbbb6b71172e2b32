use crate::models::operation::{OperationKind, OperationRequest};
use crate::utils::error::{Result, TwinDirError};
use std::fs;
use std::path::{Path, PathBuf};

/// 파일 작업 실행 모듈
///
/// copy/move/delete/rename/mkdir를 실제 파일시스템에 수행합니다.
/// 이름 충돌 검사는 바이트를 쓰기 전에 끝나며, 기존 대상 객체를
/// 덮어쓰는 일은 없습니다. 패널 상태는 건드리지 않습니다.
pub struct OperationExecutor;

impl OperationExecutor {
    /// 새 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 단일 작업 요청 실행
    ///
    /// 커맨드 디스패치에서 만든 OperationRequest를 종류별 구현으로
    /// 연결합니다.
    pub fn execute(&self, request: &OperationRequest) -> Result<()> {
        match request.kind {
            OperationKind::Copy | OperationKind::Move => {
                let dest_dir = request.dest_dir.as_deref().ok_or_else(|| {
                    TwinDirError::NotAccessible {
                        path: request.source.clone(),
                        reason: "transfer request without destination".to_string(),
                    }
                })?;
                if request.kind == OperationKind::Move {
                    self.move_entry(&request.source, dest_dir)
                } else {
                    self.copy(&request.source, dest_dir)
                }
            }
            OperationKind::Delete => self.delete(&request.source),
            OperationKind::Trash => self.trash(&request.source),
            OperationKind::Rename => {
                let name = request.new_name.as_deref().ok_or_else(|| {
                    TwinDirError::InvalidName {
                        name: String::new(),
                    }
                })?;
                self.rename(&request.source, name).map(|_| ())
            }
            OperationKind::Mkdir => {
                let name = request.new_name.as_deref().ok_or_else(|| {
                    TwinDirError::InvalidName {
                        name: String::new(),
                    }
                })?;
                self.mkdir(&request.source, name).map(|_| ())
            }
        }
    }

    /// 파일/디렉토리 복사
    ///
    /// 소스의 이름을 유지한 채 대상 디렉토리 아래로 복사합니다.
    /// 디렉토리는 재귀 복사.
    pub fn copy(&self, source: &Path, dest_dir: &Path) -> Result<()> {
        let dest = self.transfer_destination(source, dest_dir)?;

        if source.is_dir() {
            self.copy_directory(source, &dest)
        } else {
            self.copy_file(source, &dest)
        }
    }

    /// 파일/디렉토리 이동
    ///
    /// 같은 볼륨에서는 rename 한 번으로 끝내고, 실패하면 복사 후 삭제로
    /// 대체합니다. 복사가 실패하면 소스는 삭제하지 않습니다.
    pub fn move_entry(&self, source: &Path, dest_dir: &Path) -> Result<()> {
        let dest = self.transfer_destination(source, dest_dir)?;

        if fs::rename(source, &dest).is_ok() {
            return Ok(());
        }

        if source.is_dir() {
            self.copy_directory(source, &dest)?;
            fs::remove_dir_all(source).map_err(|e| Self::not_accessible(source, &e))?;
        } else {
            self.copy_file(source, &dest)?;
            fs::remove_file(source).map_err(|e| Self::not_accessible(source, &e))?;
        }

        Ok(())
    }

    /// 영구 삭제
    ///
    /// 디렉토리는 내용 전체를 재귀 삭제합니다. 실패 시 부분 삭제 상태는
    /// 롤백하지 않고 그대로 보고합니다.
    pub fn delete(&self, target: &Path) -> Result<()> {
        if !target.exists() {
            return Err(TwinDirError::SourceMissing {
                path: target.to_path_buf(),
            });
        }

        if target.is_dir() {
            fs::remove_dir_all(target).map_err(|e| Self::not_accessible(target, &e))
        } else {
            fs::remove_file(target).map_err(|e| Self::not_accessible(target, &e))
        }
    }

    /// 휴지통으로 이동 (trash crate 래퍼)
    pub fn trash(&self, target: &Path) -> Result<()> {
        if !target.exists() {
            return Err(TwinDirError::SourceMissing {
                path: target.to_path_buf(),
            });
        }

        trash::delete(target).map_err(|e| TwinDirError::NotAccessible {
            path: target.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// 같은 부모 디렉토리 안에서 이름 변경
    pub fn rename(&self, target: &Path, new_name: &str) -> Result<PathBuf> {
        Self::validate_name(new_name)?;

        if !target.exists() {
            return Err(TwinDirError::SourceMissing {
                path: target.to_path_buf(),
            });
        }

        let new_path = target
            .parent()
            .map(|p| p.join(new_name))
            .unwrap_or_else(|| PathBuf::from(new_name));

        if new_path.exists() {
            return Err(TwinDirError::NameConflict { path: new_path });
        }

        fs::rename(target, &new_path).map_err(|e| Self::not_accessible(target, &e))?;
        Ok(new_path)
    }

    /// 새 디렉토리 생성
    pub fn mkdir(&self, parent_dir: &Path, name: &str) -> Result<PathBuf> {
        Self::validate_name(name)?;

        let new_path = parent_dir.join(name);
        if new_path.exists() {
            return Err(TwinDirError::NameConflict { path: new_path });
        }

        fs::create_dir(&new_path).map_err(|e| Self::not_accessible(&new_path, &e))?;
        Ok(new_path)
    }

    /// 복사/이동 공통 사전 검사
    ///
    /// 소스 존재, 대상 디렉토리 접근 가능, 이름 충돌 없음,
    /// 자기 자신 내부로의 이동/복사가 아님을 확인한 뒤 대상 경로를 돌려줍니다.
    fn transfer_destination(&self, source: &Path, dest_dir: &Path) -> Result<PathBuf> {
        if !source.exists() {
            return Err(TwinDirError::SourceMissing {
                path: source.to_path_buf(),
            });
        }

        if !dest_dir.is_dir() {
            return Err(TwinDirError::NotAccessible {
                path: dest_dir.to_path_buf(),
                reason: "destination is not a directory".to_string(),
            });
        }

        if source.is_dir() && dest_dir.starts_with(source) {
            return Err(TwinDirError::NotAccessible {
                path: dest_dir.to_path_buf(),
                reason: "cannot copy a directory into itself".to_string(),
            });
        }

        let name = source.file_name().ok_or_else(|| TwinDirError::InvalidName {
            name: source.to_string_lossy().to_string(),
        })?;

        let dest = dest_dir.join(name);
        if dest.exists() {
            return Err(TwinDirError::NameConflict { path: dest });
        }

        Ok(dest)
    }

    /// 단일 파일 복사
    fn copy_file(&self, src: &Path, dest: &Path) -> Result<()> {
        fs::copy(src, dest).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                TwinDirError::SourceMissing {
                    path: src.to_path_buf(),
                }
            } else {
                Self::not_accessible(src, &e)
            }
        })?;
        Ok(())
    }

    /// 디렉토리 재귀 복사
    fn copy_directory(&self, src: &Path, dest: &Path) -> Result<()> {
        fs::create_dir_all(dest).map_err(|e| Self::not_accessible(dest, &e))?;

        for entry in fs::read_dir(src).map_err(|e| Self::not_accessible(src, &e))? {
            let entry = entry.map_err(|e| Self::not_accessible(src, &e))?;
            let entry_path = entry.path();
            let dest_path = dest.join(entry.file_name());

            if entry_path.is_dir() {
                self.copy_directory(&entry_path, &dest_path)?;
            } else {
                self.copy_file(&entry_path, &dest_path)?;
            }
        }

        Ok(())
    }

    /// 빈 이름과 경로 구분자 포함 이름 거부
    fn validate_name(name: &str) -> Result<()> {
        if name.is_empty() || name.chars().any(std::path::is_separator) {
            return Err(TwinDirError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(())
    }

    fn not_accessible(path: &Path, e: &std::io::Error) -> TwinDirError {
        TwinDirError::NotAccessible {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

impl Default for OperationExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};
    use std::io::Write;
    use tempfile::TempDir;

    fn executor() -> OperationExecutor {
        OperationExecutor::new()
    }

    #[test]
    fn test_copy_file() {
        let temp = TempDir::new().unwrap();
        let src_dir = temp.path().join("src");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&dst_dir).unwrap();

        let src = src_dir.join("a.txt");
        fs::write(&src, "hello").unwrap();

        executor().copy(&src, &dst_dir).unwrap();

        assert_eq!(fs::read_to_string(dst_dir.join("a.txt")).unwrap(), "hello");
        // 소스는 그대로
        assert!(src.exists());
    }

    #[test]
    fn test_copy_directory_recursive() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tree");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::create_dir_all(src.join("empty")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("nested/deep.txt"), "deep").unwrap();
        fs::create_dir_all(&dst_dir).unwrap();

        executor().copy(&src, &dst_dir).unwrap();

        let copied = dst_dir.join("tree");
        assert_eq!(fs::read_to_string(copied.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(copied.join("nested/deep.txt")).unwrap(),
            "deep"
        );
        assert!(copied.join("empty").is_dir());
    }

    #[test]
    fn test_copy_conflict_preserves_existing_destination() {
        let temp = TempDir::new().unwrap();
        let src_dir = temp.path().join("src");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&dst_dir).unwrap();

        let src = src_dir.join("a.txt");
        fs::write(&src, "new content").unwrap();
        fs::write(dst_dir.join("a.txt"), "original").unwrap();

        let result = executor().copy(&src, &dst_dir);

        match result {
            Err(TwinDirError::NameConflict { path }) => {
                assert_eq!(path, dst_dir.join("a.txt"));
            }
            other => panic!("expected NameConflict, got {:?}", other),
        }
        // 기존 대상은 바이트 단위로 그대로
        assert_eq!(
            fs::read_to_string(dst_dir.join("a.txt")).unwrap(),
            "original"
        );
        assert!(src.exists());
    }

    #[test]
    fn test_copy_missing_source() {
        let temp = TempDir::new().unwrap();
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(&dst_dir).unwrap();

        let result = executor().copy(&temp.path().join("ghost.txt"), &dst_dir);
        assert!(matches!(result, Err(TwinDirError::SourceMissing { .. })));
    }

    #[test]
    fn test_copy_directory_into_itself_rejected() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("parent");
        let child = src.join("child");
        fs::create_dir_all(&child).unwrap();

        let result = executor().copy(&src, &child);
        assert!(matches!(result, Err(TwinDirError::NotAccessible { .. })));
    }

    #[test]
    fn test_move_file_content_identical_and_source_gone() {
        let temp = TempDir::new().unwrap();
        let src_dir = temp.path().join("src");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&dst_dir).unwrap();

        let src = src_dir.join("payload.bin");
        let content: Vec<u8> = (0..8192u32).flat_map(|n| n.to_le_bytes()).collect();
        let mut file = File::create(&src).unwrap();
        file.write_all(&content).unwrap();
        drop(file);

        executor().move_entry(&src, &dst_dir).unwrap();

        assert!(!src.exists());
        assert_eq!(fs::read(dst_dir.join("payload.bin")).unwrap(), content);
    }

    #[test]
    fn test_move_conflict_keeps_source_and_destination() {
        let temp = TempDir::new().unwrap();
        let src_dir = temp.path().join("src");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&dst_dir).unwrap();

        let src = src_dir.join("a.txt");
        fs::write(&src, "moving").unwrap();
        fs::write(dst_dir.join("a.txt"), "original").unwrap();

        let result = executor().move_entry(&src, &dst_dir);

        assert!(matches!(result, Err(TwinDirError::NameConflict { .. })));
        assert_eq!(fs::read_to_string(&src).unwrap(), "moving");
        assert_eq!(
            fs::read_to_string(dst_dir.join("a.txt")).unwrap(),
            "original"
        );
    }

    #[test]
    fn test_move_directory() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("tree");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::write(src.join("nested/deep.txt"), "deep").unwrap();
        fs::create_dir_all(&dst_dir).unwrap();

        executor().move_entry(&src, &dst_dir).unwrap();

        assert!(!src.exists());
        assert_eq!(
            fs::read_to_string(dst_dir.join("tree/nested/deep.txt")).unwrap(),
            "deep"
        );
    }

    #[test]
    fn test_delete_file() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("doomed.txt");
        fs::write(&target, "x").unwrap();

        executor().delete(&target).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_delete_directory_recursive() {
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("tree");
        fs::create_dir_all(target.join("nested")).unwrap();
        fs::write(target.join("nested/file.txt"), "x").unwrap();

        executor().delete(&target).unwrap();
        assert!(!target.exists());
    }

    #[test]
    fn test_delete_missing_target() {
        let temp = TempDir::new().unwrap();
        let result = executor().delete(&temp.path().join("ghost"));
        assert!(matches!(result, Err(TwinDirError::SourceMissing { .. })));
    }

    #[test]
    fn test_rename() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("old.txt");
        fs::write(&src, "content").unwrap();

        let new_path = executor().rename(&src, "new.txt").unwrap();

        assert_eq!(new_path, temp.path().join("new.txt"));
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&new_path).unwrap(), "content");
    }

    #[test]
    fn test_rename_conflict_preserves_existing() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("old.txt");
        let taken = temp.path().join("taken.txt");
        fs::write(&src, "renaming").unwrap();
        fs::write(&taken, "original").unwrap();

        let result = executor().rename(&src, "taken.txt");

        assert!(matches!(result, Err(TwinDirError::NameConflict { .. })));
        assert_eq!(fs::read_to_string(&taken).unwrap(), "original");
        assert!(src.exists());
    }

    #[test]
    fn test_rename_invalid_names() {
        let temp = TempDir::new().unwrap();
        let src = temp.path().join("old.txt");
        fs::write(&src, "x").unwrap();

        let result = executor().rename(&src, "");
        assert!(matches!(result, Err(TwinDirError::InvalidName { .. })));

        let result = executor().rename(&src, "a/b");
        assert!(matches!(result, Err(TwinDirError::InvalidName { .. })));

        // 실패했으므로 소스는 그대로
        assert!(src.exists());
    }

    #[test]
    fn test_mkdir() {
        let temp = TempDir::new().unwrap();

        let created = executor().mkdir(temp.path(), "newdir").unwrap();

        assert_eq!(created, temp.path().join("newdir"));
        assert!(created.is_dir());
    }

    #[test]
    fn test_mkdir_empty_name_creates_nothing() {
        let temp = TempDir::new().unwrap();
        let before: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();

        let result = executor().mkdir(temp.path(), "");

        assert!(matches!(result, Err(TwinDirError::InvalidName { .. })));
        let after: Vec<_> = fs::read_dir(temp.path()).unwrap().collect();
        assert_eq!(before.len(), after.len());
    }

    #[test]
    fn test_execute_dispatches_by_kind() {
        let temp = TempDir::new().unwrap();
        let src_dir = temp.path().join("src");
        let dst_dir = temp.path().join("dst");
        fs::create_dir_all(&src_dir).unwrap();
        fs::create_dir_all(&dst_dir).unwrap();
        fs::write(src_dir.join("a.txt"), "a").unwrap();

        let exec = executor();

        let copy = OperationRequest::transfer(
            OperationKind::Copy,
            src_dir.join("a.txt"),
            dst_dir.clone(),
        );
        exec.execute(&copy).unwrap();
        assert!(dst_dir.join("a.txt").exists());

        let mkdir = OperationRequest::mkdir(dst_dir.clone(), "made".to_string());
        exec.execute(&mkdir).unwrap();
        assert!(dst_dir.join("made").is_dir());

        let rename = OperationRequest::rename(dst_dir.join("a.txt"), "b.txt".to_string());
        exec.execute(&rename).unwrap();
        assert!(dst_dir.join("b.txt").exists());

        let delete = OperationRequest::removal(OperationKind::Delete, dst_dir.join("b.txt"));
        exec.execute(&delete).unwrap();
        assert!(!dst_dir.join("b.txt").exists());
    }

    #[test]
    fn test_mkdir_conflict() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("exists")).unwrap();

        let result = executor().mkdir(temp.path(), "exists");
        assert!(matches!(result, Err(TwinDirError::NameConflict { .. })));
    }
}
