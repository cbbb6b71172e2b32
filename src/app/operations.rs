use super::*;
use crate::models::operation::{OperationKind, OperationReport, OperationRequest};
use std::path::Path;

impl App {
    // === 작업 소스 결정 ===

    /// 작업 대상 결정: 다중 선택이 있으면 선택 전체, 없으면 커서 항목
    ///
    /// ".."(상위 링크)는 어떤 작업의 대상도 되지 않습니다.
    pub fn operation_sources(&self) -> Vec<(String, std::path::PathBuf)> {
        let pane = self.active_pane();

        if !pane.selected.is_empty() {
            let mut names: Vec<&String> = pane.selected.iter().collect();
            names.sort();
            return names
                .into_iter()
                .map(|name| (name.clone(), pane.current_path.join(name)))
                .collect();
        }

        match pane.current_entry() {
            Some(entry) if !entry.is_parent_link() => {
                vec![(entry.name.clone(), entry.path.clone())]
            }
            _ => Vec::new(),
        }
    }

    /// 디렉토리를 자기 자신 또는 하위로 복사/이동하는지 검사
    pub(super) fn is_recursive_path(source: &Path, dest: &Path) -> bool {
        source.is_dir() && (dest == source || dest.starts_with(source))
    }

    /// 소스 목록 중 하나라도 재귀 복사면 에러 메시지 반환
    pub(super) fn check_recursive_operation(
        sources: &[(String, std::path::PathBuf)],
        kind: OperationKind,
        dest_dir: &Path,
    ) -> Option<String> {
        for (name, path) in sources {
            if Self::is_recursive_path(path, dest_dir) {
                let verb = match kind {
                    OperationKind::Move => "move",
                    _ => "copy",
                };
                return Some(format!(
                    "Cannot {} '{}' into itself or its subdirectory.",
                    verb, name
                ));
            }
        }
        None
    }

    // === 복사 / 이동 ===

    /// 복사 시작 (대상: 반대편 패널 경로)
    pub fn start_copy(&mut self) {
        self.run_transfer(OperationKind::Copy);
    }

    /// 이동 시작 (대상: 반대편 패널 경로)
    pub fn start_move(&mut self) {
        self.run_transfer(OperationKind::Move);
    }

    /// 복사/이동 공통 실행
    ///
    /// 항목별로 실행하고 실패해도 나머지 항목을 계속 처리합니다.
    /// 결과는 집계해서 한 번에 보고합니다.
    fn run_transfer(&mut self, kind: OperationKind) {
        let sources = self.operation_sources();
        if sources.is_empty() {
            self.set_toast("No items selected");
            return;
        }

        let dest_dir = self.inactive_pane().current_path.clone();

        if let Some(reason) = Self::check_recursive_operation(&sources, kind, &dest_dir) {
            self.dialog = Some(DialogKind::error(
                "Error",
                Self::format_user_error(
                    kind.name(),
                    None,
                    &reason,
                    "Choose a destination outside the source directory.",
                ),
            ));
            return;
        }

        let mut report = OperationReport::new();
        for (name, path) in &sources {
            let request = OperationRequest::transfer(kind, path.clone(), dest_dir.clone());
            report.record(name, self.executor.execute(&request));
        }

        self.active_pane_mut().clear_selection();
        self.refresh_both_panes();
        self.report_operation(kind, &report);
    }

    // === 삭제 ===

    /// 삭제 시작: 확인 다이얼로그 표시
    pub fn start_delete(&mut self) {
        let sources = self.operation_sources();
        if sources.is_empty() {
            self.set_toast("No items selected");
            return;
        }

        let items = sources.into_iter().map(|(name, _)| name).collect();
        self.dialog = Some(DialogKind::delete_confirm(items));
    }

    /// 삭제 확인
    ///
    /// `use_trash`: true면 휴지통, false면 영구 삭제
    pub fn confirm_delete(&mut self, use_trash: bool) {
        let Some(DialogKind::DeleteConfirm { items, .. }) = self.dialog.take() else {
            return;
        };

        let base = self.active_pane().current_path.clone();
        let kind = if use_trash {
            OperationKind::Trash
        } else {
            OperationKind::Delete
        };

        let mut report = OperationReport::new();
        for name in &items {
            let request = OperationRequest::removal(kind, base.join(name));
            report.record(name, self.executor.execute(&request));
        }

        self.active_pane_mut().clear_selection();
        self.refresh_active_pane();
        self.report_operation(kind, &report);
    }

    // === 이름 변경 ===

    /// 이름 변경 시작: 현재 이름으로 시드된 입력 다이얼로그 표시
    pub fn start_rename(&mut self) {
        let pane = self.active_pane();
        let Some(entry) = pane.current_entry() else {
            self.set_toast("No item under cursor");
            return;
        };

        if entry.is_parent_link() {
            self.set_toast("Cannot rename parent entry ('..')");
            return;
        }

        self.dialog = Some(DialogKind::rename_input(
            entry.path.clone(),
            entry.name.clone(),
        ));
    }

    /// 이름 변경 확인
    pub fn confirm_rename(&mut self, new_name: String, original_path: std::path::PathBuf) {
        let new_name = new_name.trim().to_string();
        let request = OperationRequest::rename(original_path.clone(), new_name.clone());

        match self.executor.execute(&request) {
            Ok(_) => {
                self.dialog = None;
                self.refresh_active_pane();
                self.active_pane_mut().focus_entry(&new_name);
                self.adjust_scroll_offset();
                self.set_toast(&format!("Renamed to '{}'", new_name));
            }
            Err(e) => {
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Rename",
                        Some(&original_path),
                        &e.to_string(),
                        "Check duplicate names and write permission.",
                    ),
                ));
            }
        }
    }

    // === 디렉토리 생성 ===

    /// 디렉토리 생성 시작: 입력 다이얼로그 표시
    pub fn start_mkdir(&mut self) {
        let parent = self.active_pane().current_path.clone();
        self.dialog = Some(DialogKind::mkdir_input(parent));
    }

    /// 디렉토리 생성 확인
    pub fn confirm_mkdir(&mut self, dir_name: String, parent_path: std::path::PathBuf) {
        let dir_name = dir_name.trim().to_string();
        let request = OperationRequest::mkdir(parent_path.clone(), dir_name.clone());

        match self.executor.execute(&request) {
            Ok(_) => {
                self.dialog = None;
                self.refresh_active_pane();
                self.active_pane_mut().focus_entry(&dir_name);
                self.adjust_scroll_offset();
                self.set_toast(&format!("Directory '{}' created", dir_name));
            }
            Err(e) => {
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Create directory",
                        Some(&parent_path.join(&dir_name)),
                        &e.to_string(),
                        "Use a valid name and check write permission.",
                    ),
                ));
            }
        }
    }

    // === 외부 프로그램 실행 ===

    /// 기본 연결 앱으로 파일 열기 (o)
    pub fn start_open_default_app(&mut self) {
        let Some(entry) = self.active_pane().current_entry().cloned() else {
            self.set_toast("No item under cursor");
            return;
        };

        if entry.is_directory() {
            self.set_toast("Only files can be opened");
            return;
        }

        self.open_with_launcher(&entry.path);
    }

    /// 런처로 파일 열기
    ///
    /// 결과와 무관하게 Browsing 상태를 유지하며, 실패는 보고만 합니다.
    pub(super) fn open_with_launcher(&mut self, path: &Path) {
        let display_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| path.to_string_lossy().to_string());

        match self.launcher().open(path) {
            Ok(()) => {
                self.set_toast(&format!("Opened: {}", display_name));
            }
            Err(e) => {
                self.dialog = Some(DialogKind::error(
                    "Error",
                    Self::format_user_error(
                        "Open with default app",
                        Some(path),
                        &e.to_string(),
                        "Check file path and OS application association.",
                    ),
                ));
            }
        }
    }

    // === 결과 보고 ===

    /// 집계된 작업 결과 보고
    ///
    /// 전부 성공이면 토스트, 하나라도 실패하면 항목별 사유를 담은
    /// 에러 다이얼로그를 띄웁니다. 부분 성공도 그대로 드러냅니다.
    pub(super) fn report_operation(&mut self, kind: OperationKind, report: &OperationReport) {
        let failures = report.failures();

        if failures.is_empty() {
            let count = report.succeeded();
            self.set_toast(&format!(
                "{}: {}",
                kind.past_tense(),
                crate::utils::formatter::pluralize(count, "item", "items")
            ));
            return;
        }

        let mut message = format!(
            "{} finished: {} succeeded, {} failed.\n",
            kind.name(),
            report.succeeded(),
            failures.len()
        );
        for (name, err) in &failures {
            message.push_str(&format!("  {}: {}\n", name, err));
        }
        message.push_str("Hint: failed items are left untouched; fix the cause and retry.");

        self.dialog = Some(DialogKind::error("Error", message));
    }

    /// 사용자용 에러 메시지 구성
    ///
    /// "작업 failed. / Reason / Hint" 3단 형식
    pub(super) fn format_user_error(
        operation: &str,
        path: Option<&Path>,
        reason: &str,
        hint: &str,
    ) -> String {
        let mut message = format!("{} failed.", operation);
        if let Some(path) = path {
            message.push_str(&format!("\nPath: {}", path.display()));
        }
        message.push_str(&format!("\nReason: {}", reason));
        if !hint.is_empty() {
            message.push_str(&format!("\nHint: {}", hint));
        }
        message
    }
}
