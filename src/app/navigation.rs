use super::*;
use crate::core::actions::Action;
use crate::models::file_entry::EntryKind;

impl App {
    /// 액션 실행 (단일 진실 원천)
    pub fn execute_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.quit(),
            Action::TogglePanel => self.toggle_panel(),
            Action::MoveUp => self.move_cursor_up(),
            Action::MoveDown => self.move_cursor_down(),
            Action::GoToParent => self.go_to_parent(),
            Action::EnterSelected => self.enter_selected(),
            Action::GoToTop => self.go_to_top(),
            Action::GoToBottom => self.go_to_bottom(),
            Action::PageUp => self.move_cursor_page_up(),
            Action::PageDown => self.move_cursor_page_down(),
            Action::ToggleSelection => self.toggle_selection_under_cursor(),
            Action::InvertSelection => self.invert_selection(),
            Action::SelectAll => self.select_all(),
            Action::DeselectAll => self.deselect_all(),
            Action::Copy => self.start_copy(),
            Action::Move => self.start_move(),
            Action::OpenDefaultApp => self.start_open_default_app(),
            Action::Delete => self.start_delete(),
            Action::MakeDirectory => self.start_mkdir(),
            Action::Rename => self.start_rename(),
            Action::ShowHelp => self.dialog = Some(DialogKind::help()),
            Action::Refresh => {
                self.refresh_both_panes();
                self.set_toast("Refreshed");
            }
            Action::ThemeDark => self.switch_theme_and_save("dark"),
            Action::ThemeLight => self.switch_theme_and_save("light"),
        }
    }

    // === 커서 이동 ===

    /// 커서를 위로 이동
    pub fn move_cursor_up(&mut self) {
        self.active_pane_mut().move_cursor(-1);
        self.adjust_scroll_offset();
    }

    /// 커서를 아래로 이동
    pub fn move_cursor_down(&mut self) {
        self.active_pane_mut().move_cursor(1);
        self.adjust_scroll_offset();
    }

    /// 커서를 맨 위로
    pub fn go_to_top(&mut self) {
        self.active_pane_mut().cursor_to_top();
        self.adjust_scroll_offset();
    }

    /// 커서를 맨 아래로
    pub fn go_to_bottom(&mut self) {
        self.active_pane_mut().cursor_to_bottom();
        self.adjust_scroll_offset();
    }

    /// 반 페이지 위로
    pub fn move_cursor_page_up(&mut self) {
        let half = (self.layout.panel_page_height() / 2).max(1) as isize;
        self.active_pane_mut().move_cursor(-half);
        self.adjust_scroll_offset();
    }

    /// 반 페이지 아래로
    pub fn move_cursor_page_down(&mut self) {
        let half = (self.layout.panel_page_height() / 2).max(1) as isize;
        self.active_pane_mut().move_cursor(half);
        self.adjust_scroll_offset();
    }

    /// 커서가 보이도록 스크롤 오프셋 조정
    pub fn adjust_scroll_offset(&mut self) {
        let page_height = self.layout.panel_page_height().max(1);
        let pane = self.active_pane_mut();

        if pane.cursor < pane.scroll_offset {
            pane.scroll_offset = pane.cursor;
        } else if pane.cursor >= pane.scroll_offset + page_height {
            pane.scroll_offset = pane.cursor + 1 - page_height;
        }
    }

    // === 선택 ===

    /// 커서 위치의 항목 선택 토글 후 커서를 한 칸 내림
    pub fn toggle_selection_under_cursor(&mut self) {
        let pane = self.active_pane_mut();
        if let Some(name) = pane.current_entry().map(|e| e.name.clone()) {
            pane.toggle_selection(&name);
            pane.move_cursor(1);
        }
        self.adjust_scroll_offset();
    }

    /// 선택 반전
    pub fn invert_selection(&mut self) {
        self.active_pane_mut().invert_selection();
    }

    /// 전체 선택
    pub fn select_all(&mut self) {
        self.active_pane_mut().select_all();
    }

    /// 전체 선택 해제
    pub fn deselect_all(&mut self) {
        self.active_pane_mut().clear_selection();
    }

    // === 디렉토리 이동 ===

    /// 커서 위치 항목 열기
    ///
    /// 디렉토리/상위 링크면 이동, 파일이면 OS 기본 프로그램으로 엽니다.
    pub fn enter_selected(&mut self) {
        let Some(entry) = self.active_pane().current_entry().cloned() else {
            return;
        };

        match entry.kind {
            EntryKind::Directory | EntryKind::Parent => {
                self.enter_directory(entry.path);
            }
            EntryKind::File => {
                self.open_with_launcher(&entry.path);
            }
        }
    }

    /// 상위 디렉토리로 이동
    pub fn go_to_parent(&mut self) {
        let Some(parent) = self.active_pane().current_path.parent().map(|p| p.to_path_buf())
        else {
            return;
        };
        self.enter_directory(parent);
    }

    /// 디렉토리 진입
    ///
    /// 목록을 먼저 읽고, 성공한 경우에만 경로를 바꿉니다.
    /// 읽을 수 없는 디렉토리로는 패널이 절대 이동하지 않습니다.
    pub fn enter_directory(&mut self, target: std::path::PathBuf) {
        let entries = match self.lister.list(&target) {
            Ok(entries) => entries,
            Err(e) => {
                self.set_toast(&format!("Cannot enter: {}", e));
                return;
            }
        };

        let pane = self.active_pane_mut();
        pane.set_path(target);
        pane.refresh(entries);
        self.adjust_scroll_offset();
    }

    // === 새로고침 ===

    /// 단일 패널 새로고침
    ///
    /// 목록 조회 실패 시 기존 엔트리를 유지합니다 (stale-but-valid).
    pub fn refresh_pane(&mut self, panel: ActivePanel) {
        let path = self.pane(panel).current_path.clone();
        match self.lister.list(&path) {
            Ok(entries) => {
                self.pane_mut(panel).refresh(entries);
            }
            Err(e) => {
                self.set_toast(&format!("Refresh failed: {}", e));
            }
        }
    }

    /// 양쪽 패널 새로고침
    pub fn refresh_both_panes(&mut self) {
        self.refresh_pane(ActivePanel::Left);
        self.refresh_pane(ActivePanel::Right);
        self.adjust_scroll_offset();
    }

    /// 활성 패널 새로고침 (+ 같은 경로를 보는 반대편 패널)
    pub fn refresh_active_pane(&mut self) {
        let active = self.active_panel();
        self.refresh_pane(active);

        let other = active.other();
        if self.pane(other).current_path == self.pane(active).current_path {
            self.refresh_pane(other);
        }
        self.adjust_scroll_offset();
    }
}
