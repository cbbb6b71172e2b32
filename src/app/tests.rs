use super::*;
use crate::models::operation::OperationKind;
use crate::system::RecordingLauncher;
use crate::ui::DialogKind;
use std::fs;
use tempfile::TempDir;

/// 좌/우 패널용 디렉토리를 만든 테스트 앱 생성
fn make_test_app(temp: &TempDir) -> App {
    let left = temp.path().join("left");
    let right = temp.path().join("right");
    fs::create_dir_all(&left).unwrap();
    fs::create_dir_all(&right).unwrap();
    App::new_for_test(left, right)
}


/// 테스트 파일 생성 (중간 디렉토리 포함)
fn seed(temp: &TempDir, rel: &str, content: &str) {
    let path = temp.path().join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn entry_names(pane: &crate::models::PaneState) -> Vec<String> {
    pane.entries.iter().map(|e| e.name.clone()).collect()
}

/// 커서를 이름 위치로 이동
fn put_cursor_on(app: &mut App, name: &str) {
    app.active_pane_mut().focus_entry(name);
    assert_eq!(
        app.active_pane().current_entry().unwrap().name,
        name,
        "cursor should sit on {}",
        name
    );
}

#[test]
fn test_initial_listing_has_parent_first() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    fs::create_dir_all(temp.path().join("left/sub")).unwrap();
    let app = make_test_app(&temp);

    let names = entry_names(&app.left_pane);
    assert_eq!(names, vec!["..", "sub", "a.txt"]);
}

#[test]
fn test_switch_pane_roundtrip_is_noop() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    let mut app = make_test_app(&temp);
    app.move_cursor_down();

    let left_before = (
        app.left_pane.current_path.clone(),
        app.left_pane.cursor,
        entry_names(&app.left_pane),
    );
    let right_before = (
        app.right_pane.current_path.clone(),
        app.right_pane.cursor,
        entry_names(&app.right_pane),
    );

    app.toggle_panel();
    assert_eq!(app.active_panel(), crate::ui::ActivePanel::Right);
    app.toggle_panel();
    assert_eq!(app.active_panel(), crate::ui::ActivePanel::Left);

    assert_eq!(
        left_before,
        (
            app.left_pane.current_path.clone(),
            app.left_pane.cursor,
            entry_names(&app.left_pane),
        )
    );
    assert_eq!(
        right_before,
        (
            app.right_pane.current_path.clone(),
            app.right_pane.cursor,
            entry_names(&app.right_pane),
        )
    );
}

#[test]
fn test_copy_cursor_item_to_other_pane() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "alpha");
    seed(&temp, "left/b.txt", "beta");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.start_copy();

    // 실패 보고 없음
    assert!(app.dialog.is_none());
    assert_eq!(app.toast_display(), Some("Copied: 1 item"));

    // 우측에는 a.txt만, 좌측은 그대로
    assert_eq!(entry_names(&app.right_pane), vec!["..", "a.txt"]);
    assert_eq!(entry_names(&app.left_pane), vec!["..", "a.txt", "b.txt"]);
    assert_eq!(
        fs::read_to_string(temp.path().join("right/a.txt")).unwrap(),
        "alpha"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("left/a.txt")).unwrap(),
        "alpha"
    );
}

#[test]
fn test_copy_conflict_keeps_existing_destination() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "new content");
    seed(&temp, "right/a.txt", "original");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.start_copy();

    // NameConflict가 에러 다이얼로그로 보고됨
    match &app.dialog {
        Some(DialogKind::Error { message, .. }) => {
            assert!(message.contains("a.txt"));
            assert!(message.contains("already exists"));
        }
        other => panic!("expected error dialog, got {:?}", other.is_some()),
    }

    // 기존 대상과 소스 모두 그대로
    assert_eq!(
        fs::read_to_string(temp.path().join("right/a.txt")).unwrap(),
        "original"
    );
    assert_eq!(
        fs::read_to_string(temp.path().join("left/a.txt")).unwrap(),
        "new content"
    );
}

#[test]
fn test_copy_selected_items() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    seed(&temp, "left/b.txt", "b");
    seed(&temp, "left/c.txt", "c");
    let mut app = make_test_app(&temp);

    app.active_pane_mut().toggle_selection("a.txt");
    app.active_pane_mut().toggle_selection("c.txt");
    app.start_copy();

    assert_eq!(app.toast_display(), Some("Copied: 2 items"));
    assert_eq!(entry_names(&app.right_pane), vec!["..", "a.txt", "c.txt"]);
    // 작업 후 선택 해제
    assert!(app.left_pane.selected.is_empty());
}

#[test]
fn test_copy_with_parent_under_cursor_does_nothing() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "..");
    app.start_copy();

    assert_eq!(app.toast_display(), Some("No items selected"));
    assert_eq!(entry_names(&app.right_pane), vec![".."]);
}

#[test]
fn test_move_removes_source_and_keeps_content() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "payload");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.start_move();

    assert_eq!(app.toast_display(), Some("Moved: 1 item"));
    assert!(!temp.path().join("left/a.txt").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("right/a.txt")).unwrap(),
        "payload"
    );
    assert_eq!(entry_names(&app.left_pane), vec![".."]);
    assert_eq!(entry_names(&app.right_pane), vec!["..", "a.txt"]);
}

#[test]
fn test_transfer_partial_failure_is_aggregated() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    seed(&temp, "left/b.txt", "b");
    seed(&temp, "right/b.txt", "original");
    let mut app = make_test_app(&temp);

    app.active_pane_mut().toggle_selection("a.txt");
    app.active_pane_mut().toggle_selection("b.txt");
    app.start_copy();

    // b.txt 실패는 보고되고 a.txt는 복사되어 있어야 함
    match &app.dialog {
        Some(DialogKind::Error { message, .. }) => {
            assert!(message.contains("1 succeeded"));
            assert!(message.contains("1 failed"));
            assert!(message.contains("b.txt"));
        }
        _ => panic!("expected aggregated error dialog"),
    }
    assert!(temp.path().join("right/a.txt").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("right/b.txt")).unwrap(),
        "original"
    );
}

#[test]
fn test_copy_directory_into_itself_blocked() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("left/tree")).unwrap();
    let mut app = make_test_app(&temp);

    // 우측 패널을 소스 디렉토리 내부로 이동
    app.toggle_panel();
    app.enter_directory(temp.path().join("left/tree"));
    app.toggle_panel();

    put_cursor_on(&mut app, "tree");
    app.start_copy();

    match &app.dialog {
        Some(DialogKind::Error { message, .. }) => {
            assert!(message.contains("into itself"));
        }
        _ => panic!("expected recursive-copy error dialog"),
    }
}

#[test]
fn test_delete_requires_confirmation() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.start_delete();

    assert!(matches!(
        app.dialog,
        Some(DialogKind::DeleteConfirm { .. })
    ));
    // 확인 전에는 아무것도 지워지지 않음
    assert!(temp.path().join("left/a.txt").exists());

    // 취소
    app.close_dialog();
    assert!(temp.path().join("left/a.txt").exists());
    assert!(app.dialog.is_none());
}

#[test]
fn test_delete_permanent_removes_items() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    fs::create_dir_all(temp.path().join("left/tree/nested")).unwrap();
    seed(&temp, "left/tree/nested/deep.txt", "x");
    let mut app = make_test_app(&temp);

    app.active_pane_mut().toggle_selection("a.txt");
    app.active_pane_mut().toggle_selection("tree");
    app.start_delete();
    app.confirm_delete(false);

    assert!(!temp.path().join("left/a.txt").exists());
    assert!(!temp.path().join("left/tree").exists());
    assert_eq!(entry_names(&app.left_pane), vec![".."]);
    assert_eq!(app.toast_display(), Some("Deleted: 2 items"));
}

#[test]
fn test_delete_missing_source_reported() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.start_delete();

    // 목록 조회와 확인 사이에 파일이 사라진 경우
    fs::remove_file(temp.path().join("left/a.txt")).unwrap();
    app.confirm_delete(false);

    match &app.dialog {
        Some(DialogKind::Error { message, .. }) => {
            assert!(message.contains("no longer exists"));
        }
        _ => panic!("expected error dialog for missing source"),
    }
}

#[test]
fn test_rename_flow() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/old.txt", "content");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "old.txt");
    app.start_rename();

    // 현재 이름으로 시드된 입력 다이얼로그
    match &app.dialog {
        Some(DialogKind::RenameInput { value, .. }) => assert_eq!(value, "old.txt"),
        _ => panic!("expected rename input dialog"),
    }

    // 입력값 교체 후 확정
    if let Some(DialogKind::RenameInput {
        value, cursor_pos, ..
    }) = &mut app.dialog
    {
        value.clear();
        value.push_str("new.txt");
        *cursor_pos = value.len();
    }
    app.confirm_input_dialog();

    assert!(app.dialog.is_none());
    assert!(!temp.path().join("left/old.txt").exists());
    assert_eq!(
        fs::read_to_string(temp.path().join("left/new.txt")).unwrap(),
        "content"
    );
    // 커서는 변경된 항목으로
    assert_eq!(app.active_pane().current_entry().unwrap().name, "new.txt");
}

#[test]
fn test_rename_cancel_has_no_effect() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/old.txt", "content");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "old.txt");
    app.start_rename();
    app.close_dialog();

    assert!(temp.path().join("left/old.txt").exists());
    assert_eq!(entry_names(&app.left_pane), vec!["..", "old.txt"]);
}

#[test]
fn test_rename_parent_link_rejected() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "..");
    app.start_rename();

    assert!(app.dialog.is_none());
    assert_eq!(app.toast_display(), Some("Cannot rename parent entry ('..')"));
}

#[test]
fn test_rename_to_existing_name_conflict() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    seed(&temp, "left/b.txt", "original");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.start_rename();
    if let Some(DialogKind::RenameInput {
        value, cursor_pos, ..
    }) = &mut app.dialog
    {
        value.clear();
        value.push_str("b.txt");
        *cursor_pos = value.len();
    }
    app.confirm_input_dialog();

    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
    // 충돌 대상은 그대로
    assert_eq!(
        fs::read_to_string(temp.path().join("left/b.txt")).unwrap(),
        "original"
    );
    assert!(temp.path().join("left/a.txt").exists());
}

#[test]
fn test_mkdir_flow() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);

    app.start_mkdir();
    assert!(matches!(app.dialog, Some(DialogKind::MkdirInput { .. })));

    for c in "photos".chars() {
        app.dialog_input_char(c);
    }
    app.confirm_input_dialog();

    assert!(app.dialog.is_none());
    assert!(temp.path().join("left/photos").is_dir());
    assert_eq!(app.active_pane().current_entry().unwrap().name, "photos");
    assert_eq!(app.toast_display(), Some("Directory 'photos' created"));
}

#[test]
fn test_mkdir_empty_name_fails_invalid() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);
    let before = entry_names(&app.left_pane);

    app.start_mkdir();
    app.confirm_input_dialog();

    match &app.dialog {
        Some(DialogKind::Error { message, .. }) => {
            assert!(message.contains("Invalid name"));
        }
        _ => panic!("expected InvalidName error dialog"),
    }
    // 디렉토리는 생성되지 않음
    app.close_dialog();
    app.refresh_both_panes();
    assert_eq!(entry_names(&app.left_pane), before);
}

#[test]
fn test_mkdir_cancel_has_no_effect() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);

    app.start_mkdir();
    for c in "ghost".chars() {
        app.dialog_input_char(c);
    }
    app.close_dialog();

    assert!(!temp.path().join("left/ghost").exists());
}

#[test]
fn test_enter_directory_and_back() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("left/sub")).unwrap();
    seed(&temp, "left/sub/inner.txt", "x");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "sub");
    app.enter_selected();

    assert_eq!(app.active_pane().current_path, temp.path().join("left/sub"));
    assert_eq!(app.active_pane().cursor, 0);
    assert_eq!(entry_names(app.active_pane()), vec!["..", "inner.txt"]);

    // ".."로 다시 위로
    app.enter_selected();
    assert_eq!(app.active_pane().current_path, temp.path().join("left"));
}

#[test]
fn test_enter_unlistable_directory_keeps_pane_settled() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    let mut app = make_test_app(&temp);
    let path_before = app.active_pane().current_path.clone();
    let entries_before = entry_names(app.active_pane());

    app.enter_directory(temp.path().join("left/nonexistent"));

    // 패널은 이전 경로/목록을 유지
    assert_eq!(app.active_pane().current_path, path_before);
    assert_eq!(entry_names(app.active_pane()), entries_before);
    assert!(app.toast_display().unwrap().starts_with("Cannot enter"));
}

#[test]
fn test_refresh_keeps_stale_entries_on_error() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    fs::create_dir_all(temp.path().join("left/sub")).unwrap();
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "sub");
    app.enter_selected();

    // 현재 디렉토리가 외부에서 삭제된 상황
    fs::remove_dir_all(temp.path().join("left/sub")).unwrap();
    app.refresh_pane(crate::ui::ActivePanel::Left);

    // stale-but-valid: 이전 목록 유지
    assert_eq!(app.left_pane.current_path, temp.path().join("left/sub"));
    assert!(app.toast_display().unwrap().starts_with("Refresh failed"));
}

#[test]
fn test_refresh_clamps_cursor_and_selection_after_external_change() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    seed(&temp, "left/b.txt", "b");
    let mut app = make_test_app(&temp);

    app.go_to_bottom();
    app.active_pane_mut().toggle_selection("b.txt");

    fs::remove_file(temp.path().join("left/b.txt")).unwrap();
    app.refresh_both_panes();

    let pane = &app.left_pane;
    assert!(pane.cursor < pane.entries.len());
    assert!(pane.selected.is_empty());
}

#[test]
fn test_enter_file_hands_path_to_launcher() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/doc.pdf", "pdf");
    let mut app = make_test_app(&temp);

    let recorder = RecordingLauncher::new();
    let log = recorder.log();
    app.set_launcher_for_test(Box::new(recorder));

    put_cursor_on(&mut app, "doc.pdf");
    app.enter_selected();

    assert_eq!(log.borrow().as_slice(), &[temp.path().join("left/doc.pdf")]);
    assert_eq!(app.toast_display(), Some("Opened: doc.pdf"));
    // 패널은 이동하지 않음
    assert_eq!(app.active_pane().current_path, temp.path().join("left"));
}

#[test]
fn test_launcher_failure_is_reported_not_fatal() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/doc.pdf", "pdf");
    let mut app = make_test_app(&temp);
    app.set_launcher_for_test(Box::new(RecordingLauncher::failing()));

    put_cursor_on(&mut app, "doc.pdf");
    app.enter_selected();

    assert!(matches!(app.dialog, Some(DialogKind::Error { .. })));
    assert!(!app.should_quit());
    // 닫으면 계속 Browsing
    app.close_dialog();
    assert!(app.dialog.is_none());
}

#[test]
fn test_open_default_app_rejects_directory() {
    let temp = TempDir::new().unwrap();
    fs::create_dir_all(temp.path().join("left/sub")).unwrap();
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "sub");
    app.start_open_default_app();

    assert_eq!(app.toast_display(), Some("Only files can be opened"));
}

#[test]
fn test_is_recursive_path() {
    let temp = TempDir::new().unwrap();
    let parent = temp.path().join("parent");
    let child = parent.join("child");
    fs::create_dir_all(&child).unwrap();
    let sibling = temp.path().join("sibling");
    fs::create_dir_all(&sibling).unwrap();
    let file = temp.path().join("file.txt");
    fs::write(&file, "x").unwrap();

    assert!(App::is_recursive_path(&parent, &child));
    assert!(App::is_recursive_path(&parent, &parent));
    assert!(!App::is_recursive_path(&parent, &sibling));
    // 파일은 재귀 검사 대상 아님
    assert!(!App::is_recursive_path(&file, &sibling));
}

#[test]
fn test_check_recursive_operation_messages() {
    let temp = TempDir::new().unwrap();
    let parent = temp.path().join("parent");
    let child = parent.join("child");
    fs::create_dir_all(&child).unwrap();

    let sources = vec![("parent".to_string(), parent.clone())];
    let result = App::check_recursive_operation(&sources, OperationKind::Move, &child);
    assert!(result.unwrap().contains("Cannot move"));

    let other = temp.path().join("other");
    fs::create_dir_all(&other).unwrap();
    assert!(App::check_recursive_operation(&sources, OperationKind::Copy, &other).is_none());
}

#[test]
fn test_persisted_state_roundtrip() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);
    app.switch_theme_and_save("light");

    let encoded = app.encode_app_state().unwrap();
    let decoded = App::decode_app_state(&encoded).unwrap();
    assert_eq!(decoded.theme, "light");
    assert_eq!(decoded.version, App::APP_STATE_VERSION);

    // 알 수 없는 버전은 무시
    let stale = encoded.replace("version = 1", "version = 99");
    assert!(App::decode_app_state(&stale).is_none());
}

#[test]
fn test_theme_sequence_actions() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);

    app.execute_action(crate::core::actions::Action::ThemeLight);
    assert_eq!(app.theme_manager.current_name(), "light");

    app.execute_action(crate::core::actions::Action::ThemeDark);
    assert_eq!(app.theme_manager.current_name(), "dark");
}

#[test]
fn test_quit_action() {
    let temp = TempDir::new().unwrap();
    let mut app = make_test_app(&temp);

    assert!(!app.should_quit());
    app.execute_action(crate::core::actions::Action::Quit);
    assert!(app.should_quit());
}

#[test]
fn test_toggle_selection_action_advances_cursor() {
    let temp = TempDir::new().unwrap();
    seed(&temp, "left/a.txt", "a");
    seed(&temp, "left/b.txt", "b");
    let mut app = make_test_app(&temp);

    put_cursor_on(&mut app, "a.txt");
    app.toggle_selection_under_cursor();

    assert!(app.active_pane().selected.contains("a.txt"));
    assert_eq!(app.active_pane().current_entry().unwrap().name, "b.txt");
}
