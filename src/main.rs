use crossterm::{
    event::{self, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::io;
use twindir::app::App;
use twindir::core::actions::{
    find_action, find_sequence_action, generate_command_bar_items, is_sequence_prefix,
};
use twindir::ui::{
    ActivePanel, CommandBar, Dialog, DialogKind, LayoutMode, Panel, PanelStatus, StatusBar,
    WarningScreen,
};
use twindir::utils::error::Result;
use twindir::utils::formatter::format_file_size;

fn main() -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app
    let mut app = App::new()?;

    // Run app
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| {
            let size = f.area();

            // 레이아웃 업데이트
            app.layout.update(size);

            match app.layout_mode() {
                LayoutMode::TooSmall => {
                    let (width, height) = app.layout.terminal_size();
                    let warning = WarningScreen::new()
                        .current_size(width, height)
                        .theme(app.theme_manager.current());
                    f.render_widget(warning, size);
                }
                _ => {
                    render_main_ui(f, app);
                }
            }
        })?;

        // 시퀀스 키 대기 중에는 짧은 타임아웃으로 이벤트 체크
        let poll_timeout = if app.pending_key.is_some() {
            std::time::Duration::from_millis(50)
        } else {
            std::time::Duration::from_millis(100)
        };

        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if app.is_dialog_active() {
                    handle_dialog_keys(app, key.modifiers, key.code);
                } else {
                    handle_normal_keys(app, key.modifiers, key.code);
                }
            }
        }

        // pending 키 타임아웃 체크
        if app.pending_key.is_some() && app.is_pending_key_expired() {
            app.clear_pending_key();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

/// 일반 모드 키 처리 (액션 레지스트리 기반)
fn handle_normal_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    // 1) 대기 중인 시퀀스 처리 (gg, td, ...)
    if let Some(pending) = app.pending_key {
        app.clear_pending_key();
        if let KeyCode::Char(c) = code {
            if let Some(action) = find_sequence_action(pending, c) {
                app.execute_action(action);
                return;
            }
        }
    }

    // 2) prefix 입력 시 시퀀스 모드 진입
    if modifiers == KeyModifiers::NONE {
        if let KeyCode::Char(c) = code {
            if is_sequence_prefix(c) {
                app.set_pending_key(c);
                return;
            }
        }
    }

    // 3) 테이블 조회 → 액션 실행
    if let Some(action) = find_action(modifiers, code) {
        app.execute_action(action);
    }
}

/// 다이얼로그 모드 키 처리
fn handle_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    let Some(dialog) = &app.dialog else {
        return;
    };

    match dialog {
        DialogKind::MkdirInput { .. } | DialogKind::RenameInput { .. } => {
            handle_input_dialog_keys(app, modifiers, code);
        }
        DialogKind::DeleteConfirm { .. } => {
            handle_delete_confirm_dialog_keys(app, modifiers, code);
        }
        DialogKind::Error { .. } | DialogKind::Message { .. } => {
            handle_message_dialog_keys(app, code);
        }
        DialogKind::Help { .. } => {
            handle_help_dialog_keys(app, code);
        }
    }
}

/// 이름 입력 다이얼로그 키 처리 (mkdir/rename)
fn handle_input_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        // 확인 (선택된 버튼에 따라 동작)
        (_, KeyCode::Enter) => {
            if app.dialog_input_selected_button().unwrap_or(0) == 0 {
                app.confirm_input_dialog();
            } else {
                app.close_dialog();
            }
        }
        // 취소
        (_, KeyCode::Esc) => {
            app.close_dialog();
        }
        // 버튼 전환 (Tab / Shift+Tab)
        (KeyModifiers::NONE, KeyCode::Tab) | (KeyModifiers::SHIFT, KeyCode::BackTab) => {
            app.dialog_input_toggle_button();
        }
        // 문자 입력
        (KeyModifiers::NONE | KeyModifiers::SHIFT, KeyCode::Char(c)) => {
            app.dialog_input_char(c);
        }
        (_, KeyCode::Backspace) => app.dialog_input_backspace(),
        (_, KeyCode::Delete) => app.dialog_input_delete(),
        (_, KeyCode::Left) => app.dialog_input_left(),
        (_, KeyCode::Right) => app.dialog_input_right(),
        (_, KeyCode::Home) => app.dialog_input_home(),
        (_, KeyCode::End) => app.dialog_input_end(),
        _ => {}
    }
}

/// 삭제 확인 다이얼로그 키 처리
fn handle_delete_confirm_dialog_keys(app: &mut App, modifiers: KeyModifiers, code: KeyCode) {
    match (modifiers, code) {
        // 버튼 이동 (Tab/Right: 다음, Shift+Tab/Left: 이전)
        (KeyModifiers::NONE, KeyCode::Tab) | (_, KeyCode::Right) => {
            app.dialog_delete_confirm_next();
        }
        (KeyModifiers::SHIFT, KeyCode::BackTab) | (_, KeyCode::Left) => {
            app.dialog_delete_confirm_prev();
        }
        // 선택
        (_, KeyCode::Enter) => {
            match app.delete_confirm_button() {
                Some(0) => app.confirm_delete(true),  // 휴지통
                Some(1) => app.confirm_delete(false), // 영구 삭제
                _ => app.close_dialog(),
            }
        }
        // 취소
        (_, KeyCode::Esc) => {
            app.close_dialog();
        }
        _ => {}
    }
}

/// 메시지/에러 다이얼로그 키 처리
fn handle_message_dialog_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ') => {
            app.close_dialog();
        }
        _ => {}
    }
}

/// 도움말 다이얼로그 키 처리
fn handle_help_dialog_keys(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            app.close_dialog();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.dialog_help_scroll_down();
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.dialog_help_scroll_up();
        }
        _ => {}
    }
}

/// 패널 위젯 생성 + 렌더링 (좌/우 공통)
fn render_pane(f: &mut ratatui::Frame<'_>, app: &App, panel: ActivePanel, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }

    let pane = app.pane(panel);
    let theme = app.theme_manager.current();
    let path = pane.current_path.to_string_lossy();

    let widget = Panel::new()
        .title(&path)
        .status(if app.active_panel() == panel {
            PanelStatus::Active
        } else {
            PanelStatus::Inactive
        })
        .entries(&pane.entries)
        .cursor(pane.cursor)
        .scroll_offset(pane.scroll_offset)
        .selected(&pane.selected)
        .theme(theme);
    f.render_widget(widget, area);
}

/// 상태바 데이터 수집 + 렌더링
fn render_status_bar(f: &mut ratatui::Frame<'_>, app: &App, area: Rect) {
    let pane = app.active_pane();
    let theme = app.theme_manager.current();
    let total_size = format_file_size(pane.total_size());
    let selected_size = format_file_size(pane.selected_size());

    let status_bar = StatusBar::new()
        .file_count(pane.file_count())
        .dir_count(pane.dir_count())
        .total_size(&total_size)
        .selected_count(pane.selected_count())
        .selected_size(&selected_size)
        .message(app.toast_display())
        .theme(theme);
    f.render_widget(status_bar, area);
}

/// 메인 UI 렌더링
fn render_main_ui(f: &mut ratatui::Frame<'_>, app: &App) {
    let areas = app.layout.areas().clone();
    let theme = app.theme_manager.current();

    render_pane(f, app, ActivePanel::Left, areas.left_panel);
    render_pane(f, app, ActivePanel::Right, areas.right_panel);

    render_status_bar(f, app, areas.status_bar);

    let command_bar = CommandBar::new()
        .commands(generate_command_bar_items())
        .theme(theme);
    f.render_widget(command_bar, areas.command_bar);

    if let Some(ref dialog_kind) = app.dialog {
        let dialog = Dialog::new(dialog_kind).theme(theme);
        f.render_widget(dialog, f.area());
    }
}
