use crate::models::file_entry::{EntryKind, FileEntry};
use crate::utils::error::{Result, TwinDirError};
use std::fs;
use std::path::Path;

/// 디렉토리 목록 조회 모듈
///
/// 경로 하나를 읽어 정렬된 엔트리 목록을 반환합니다. 순수 읽기 전용이며
/// 패널 상태를 직접 건드리지 않습니다.
pub struct DirectoryLister;

impl DirectoryLister {
    /// 새 인스턴스 생성
    pub fn new() -> Self {
        Self
    }

    /// 디렉토리 읽기
    ///
    /// 정렬 규칙: ".."(루트가 아니면) → 디렉토리 → 파일,
    /// 각 그룹은 이름 알파벳순 (대소문자 무시).
    pub fn list(&self, path: &Path) -> Result<Vec<FileEntry>> {
        // 1. 경로 존재 확인
        if !path.exists() {
            return Err(TwinDirError::NotAccessible {
                path: path.to_path_buf(),
                reason: "path not found".to_string(),
            });
        }

        // 2. 디렉토리 여부 확인
        if !path.is_dir() {
            return Err(TwinDirError::NotAccessible {
                path: path.to_path_buf(),
                reason: "not a directory".to_string(),
            });
        }

        // 3. 디렉토리 읽기
        let read_dir = fs::read_dir(path).map_err(|e| TwinDirError::NotAccessible {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        // 4. 엔트리별 메타데이터 파싱
        let mut entries = Vec::new();

        for entry in read_dir {
            // 개별 엔트리 에러는 스킵
            let Ok(entry) = entry else { continue };

            let entry_path = entry.path();
            let name = entry.file_name().to_string_lossy().to_string();

            // symlink는 대상 기준으로 파일/디렉토리 분류, 깨진 링크는 파일 취급
            let metadata = match fs::metadata(&entry_path).or_else(|_| fs::symlink_metadata(&entry_path)) {
                Ok(m) => m,
                Err(_) => continue,
            };

            let kind = if metadata.is_dir() {
                EntryKind::Directory
            } else {
                EntryKind::File
            };

            let size = match kind {
                EntryKind::Directory => 0,
                _ => metadata.len(),
            };

            let modified = metadata
                .modified()
                .unwrap_or_else(|_| std::time::SystemTime::now());

            entries.push(FileEntry::new(name, entry_path, kind, size, modified));
        }

        Self::sort_entries(&mut entries);

        // 5. 루트가 아니면 상위 링크를 맨 앞에 삽입
        if let Some(parent) = path.parent() {
            entries.insert(0, FileEntry::parent_link(parent.to_path_buf()));
        }

        Ok(entries)
    }

    /// 디렉토리 → 파일, 그룹 내 이름순 정렬
    fn sort_entries(entries: &mut [FileEntry]) {
        entries.sort_by(|a, b| {
            match (a.kind == EntryKind::Directory, b.kind == EntryKind::Directory) {
                (true, false) => std::cmp::Ordering::Less,
                (false, true) => std::cmp::Ordering::Greater,
                _ => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            }
        });
    }
}

impl Default for DirectoryLister {
    fn default() -> Self {
        Self::new()
    }
}
