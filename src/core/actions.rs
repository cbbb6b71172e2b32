//! 액션 시스템 — 단일 진실 원천 (Single Source of Truth)
//!
//! 모든 키 바인딩, 커맨드바 항목, 도움말 내용이
//! 이 모듈의 레지스트리를 참조합니다.

use crate::ui::components::command_bar::CommandItem;
use crossterm::event::{KeyCode, KeyModifiers};
use std::sync::LazyLock;

/// 모든 가능한 액션의 열거
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Navigation
    MoveUp,
    MoveDown,
    GoToParent,
    EnterSelected,
    GoToTop,
    GoToBottom,
    PageUp,
    PageDown,
    TogglePanel,
    // File Operations
    Copy,
    Move,
    OpenDefaultApp,
    Delete,
    MakeDirectory,
    Rename,
    // Selection
    ToggleSelection,
    InvertSelection,
    SelectAll,
    DeselectAll,
    // System
    ShowHelp,
    Refresh,
    Quit,
    // Theme (시퀀스 전용)
    ThemeDark,
    ThemeLight,
}

/// 액션 카테고리
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionCategory {
    Navigation,
    FileOperation,
    Selection,
    System,
}

/// 커맨드바 표시 정보
pub struct CommandBarEntry {
    pub key: &'static str,
    pub label: &'static str,
    pub priority: u8,
}

/// 액션 정의 (메타데이터)
pub struct ActionDef {
    pub action: Action,
    pub label: &'static str,
    pub category: ActionCategory,
    pub shortcut_display: Option<&'static str>,
    pub command_bar: Option<CommandBarEntry>,
}

/// 키 바인딩 정의
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: Option<KeyModifiers>, // None = any modifier
    pub action: Action,
}

/// 시퀀스 키 바인딩 정의 (예: `g` + `g`)
pub struct SequenceBinding {
    pub prefix: char,
    pub key: char,
    pub action: Action,
}

/// 모든 액션 메타데이터
pub static ACTION_DEFS: &[ActionDef] = &[
    // Navigation
    ActionDef {
        action: Action::MoveUp,
        label: "Move up",
        category: ActionCategory::Navigation,
        shortcut_display: Some("j / k"),
        command_bar: Some(CommandBarEntry {
            key: "j/k",
            label: "Up/Dn",
            priority: 50,
        }),
    },
    ActionDef {
        action: Action::MoveDown,
        label: "Move down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToParent,
        label: "Parent dir",
        category: ActionCategory::Navigation,
        shortcut_display: Some("h / l"),
        command_bar: Some(CommandBarEntry {
            key: "h/l",
            label: "Nav",
            priority: 51,
        }),
    },
    ActionDef {
        action: Action::EnterSelected,
        label: "Enter dir / open file",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Enter"),
        command_bar: None,
    },
    ActionDef {
        action: Action::GoToTop,
        label: "Top",
        category: ActionCategory::Navigation,
        shortcut_display: Some("gg / Home"),
        command_bar: Some(CommandBarEntry {
            key: "gg/G",
            label: "Top/Bot",
            priority: 52,
        }),
    },
    ActionDef {
        action: Action::GoToBottom,
        label: "Bottom",
        category: ActionCategory::Navigation,
        shortcut_display: Some("G / End"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageUp,
        label: "Half page up",
        category: ActionCategory::Navigation,
        shortcut_display: Some("^U / ^D"),
        command_bar: None,
    },
    ActionDef {
        action: Action::PageDown,
        label: "Half page down",
        category: ActionCategory::Navigation,
        shortcut_display: None,
        command_bar: None,
    },
    ActionDef {
        action: Action::TogglePanel,
        label: "Switch panel",
        category: ActionCategory::Navigation,
        shortcut_display: Some("Tab"),
        command_bar: Some(CommandBarEntry {
            key: "Tab",
            label: "Panel",
            priority: 54,
        }),
    },
    // File Operations
    ActionDef {
        action: Action::Copy,
        label: "Copy to other panel",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("y / F5"),
        command_bar: Some(CommandBarEntry {
            key: "y",
            label: "Copy",
            priority: 10,
        }),
    },
    ActionDef {
        action: Action::Move,
        label: "Move to other panel",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("x / F6"),
        command_bar: Some(CommandBarEntry {
            key: "x",
            label: "Move",
            priority: 11,
        }),
    },
    ActionDef {
        action: Action::OpenDefaultApp,
        label: "Open with default app",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("o"),
        command_bar: None,
    },
    ActionDef {
        action: Action::Delete,
        label: "Delete",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("d / F8"),
        command_bar: Some(CommandBarEntry {
            key: "d",
            label: "Del",
            priority: 12,
        }),
    },
    ActionDef {
        action: Action::MakeDirectory,
        label: "New directory",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("a / F7"),
        command_bar: Some(CommandBarEntry {
            key: "a",
            label: "MkDir",
            priority: 13,
        }),
    },
    ActionDef {
        action: Action::Rename,
        label: "Rename",
        category: ActionCategory::FileOperation,
        shortcut_display: Some("r / F2"),
        command_bar: Some(CommandBarEntry {
            key: "r",
            label: "Ren",
            priority: 14,
        }),
    },
    // Selection
    ActionDef {
        action: Action::ToggleSelection,
        label: "Toggle select",
        category: ActionCategory::Selection,
        shortcut_display: Some("Space"),
        command_bar: Some(CommandBarEntry {
            key: "Sp",
            label: "Sel",
            priority: 30,
        }),
    },
    ActionDef {
        action: Action::InvertSelection,
        label: "Invert selection",
        category: ActionCategory::Selection,
        shortcut_display: Some("v"),
        command_bar: None,
    },
    ActionDef {
        action: Action::SelectAll,
        label: "Select all",
        category: ActionCategory::Selection,
        shortcut_display: Some("^A"),
        command_bar: None,
    },
    ActionDef {
        action: Action::DeselectAll,
        label: "Deselect all",
        category: ActionCategory::Selection,
        shortcut_display: Some("u"),
        command_bar: None,
    },
    // System
    ActionDef {
        action: Action::ShowHelp,
        label: "Keyboard help",
        category: ActionCategory::System,
        shortcut_display: Some("?"),
        command_bar: Some(CommandBarEntry {
            key: "?",
            label: "Keys",
            priority: 20,
        }),
    },
    ActionDef {
        action: Action::Refresh,
        label: "Refresh",
        category: ActionCategory::System,
        shortcut_display: Some("^R"),
        command_bar: Some(CommandBarEntry {
            key: "^R",
            label: "Refresh",
            priority: 41,
        }),
    },
    ActionDef {
        action: Action::Quit,
        label: "Quit",
        category: ActionCategory::System,
        shortcut_display: Some("q"),
        command_bar: Some(CommandBarEntry {
            key: "q",
            label: "Quit",
            priority: 21,
        }),
    },
    ActionDef {
        action: Action::ThemeDark,
        label: "Dark theme",
        category: ActionCategory::System,
        shortcut_display: Some("td"),
        command_bar: None,
    },
    ActionDef {
        action: Action::ThemeLight,
        label: "Light theme",
        category: ActionCategory::System,
        shortcut_display: Some("tl"),
        command_bar: None,
    },
];

fn build_key_bindings() -> Vec<KeyBinding> {
    vec![
        // 종료
        KeyBinding {
            code: KeyCode::Char('q'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Quit,
        },
        KeyBinding {
            code: KeyCode::Char('c'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Quit,
        },
        // 패널 전환
        KeyBinding {
            code: KeyCode::Tab,
            modifiers: None,
            action: Action::TogglePanel,
        },
        // 탐색: Vim + 화살표
        KeyBinding {
            code: KeyCode::Char('j'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Down,
            modifiers: None,
            action: Action::MoveDown,
        },
        KeyBinding {
            code: KeyCode::Char('k'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Up,
            modifiers: None,
            action: Action::MoveUp,
        },
        KeyBinding {
            code: KeyCode::Char('h'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::GoToParent,
        },
        KeyBinding {
            code: KeyCode::Left,
            modifiers: Some(KeyModifiers::NONE),
            action: Action::GoToParent,
        },
        KeyBinding {
            code: KeyCode::Char('l'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::EnterSelected,
        },
        KeyBinding {
            code: KeyCode::Enter,
            modifiers: Some(KeyModifiers::NONE),
            action: Action::EnterSelected,
        },
        // G / Home / End
        KeyBinding {
            code: KeyCode::Char('G'),
            modifiers: None,
            action: Action::GoToBottom,
        },
        KeyBinding {
            code: KeyCode::Home,
            modifiers: None,
            action: Action::GoToTop,
        },
        KeyBinding {
            code: KeyCode::End,
            modifiers: None,
            action: Action::GoToBottom,
        },
        // 페이지
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::PageUp,
            modifiers: None,
            action: Action::PageUp,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::PageDown,
        },
        KeyBinding {
            code: KeyCode::PageDown,
            modifiers: None,
            action: Action::PageDown,
        },
        // 파일 조작 (Total Commander 펑션키 병행)
        KeyBinding {
            code: KeyCode::Char('y'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Copy,
        },
        KeyBinding {
            code: KeyCode::F(5),
            modifiers: None,
            action: Action::Copy,
        },
        KeyBinding {
            code: KeyCode::Char('x'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Move,
        },
        KeyBinding {
            code: KeyCode::F(6),
            modifiers: None,
            action: Action::Move,
        },
        KeyBinding {
            code: KeyCode::Char('o'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::OpenDefaultApp,
        },
        KeyBinding {
            code: KeyCode::Char('d'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Delete,
        },
        KeyBinding {
            code: KeyCode::F(8),
            modifiers: None,
            action: Action::Delete,
        },
        KeyBinding {
            code: KeyCode::Char('a'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::MakeDirectory,
        },
        KeyBinding {
            code: KeyCode::F(7),
            modifiers: None,
            action: Action::MakeDirectory,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::Rename,
        },
        KeyBinding {
            code: KeyCode::F(2),
            modifiers: None,
            action: Action::Rename,
        },
        // 선택
        KeyBinding {
            code: KeyCode::Char(' '),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::ToggleSelection,
        },
        KeyBinding {
            code: KeyCode::Char('v'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::InvertSelection,
        },
        KeyBinding {
            code: KeyCode::Char('a'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::SelectAll,
        },
        KeyBinding {
            code: KeyCode::Char('u'),
            modifiers: Some(KeyModifiers::NONE),
            action: Action::DeselectAll,
        },
        // 시스템
        KeyBinding {
            code: KeyCode::Char('?'),
            modifiers: None,
            action: Action::ShowHelp,
        },
        KeyBinding {
            code: KeyCode::Char('r'),
            modifiers: Some(KeyModifiers::CONTROL),
            action: Action::Refresh,
        },
    ]
}

static KEY_BINDINGS: LazyLock<Vec<KeyBinding>> = LazyLock::new(build_key_bindings);

/// 키 바인딩 목록 조회 (1회 초기화 후 재사용)
pub fn key_bindings() -> &'static [KeyBinding] {
    KEY_BINDINGS.as_slice()
}

/// 키 입력으로 액션 조회
pub fn find_action(modifiers: KeyModifiers, code: KeyCode) -> Option<Action> {
    for binding in key_bindings() {
        let code_matches = binding.code == code;
        let mod_matches = match binding.modifiers {
            None => true, // any modifier
            Some(required) => modifiers == required,
        };
        if code_matches && mod_matches {
            return Some(binding.action);
        }
    }
    None
}

fn build_sequence_bindings() -> Vec<SequenceBinding> {
    vec![
        SequenceBinding {
            prefix: 'g',
            key: 'g',
            action: Action::GoToTop,
        },
        SequenceBinding {
            prefix: 't',
            key: 'd',
            action: Action::ThemeDark,
        },
        SequenceBinding {
            prefix: 't',
            key: 'l',
            action: Action::ThemeLight,
        },
    ]
}

static SEQUENCE_BINDINGS: LazyLock<Vec<SequenceBinding>> = LazyLock::new(build_sequence_bindings);

/// 시퀀스 키 바인딩 목록 조회
pub fn sequence_bindings() -> &'static [SequenceBinding] {
    SEQUENCE_BINDINGS.as_slice()
}

/// 시퀀스 입력(prefix + key)으로 액션 조회
pub fn find_sequence_action(prefix: char, key: char) -> Option<Action> {
    sequence_bindings()
        .iter()
        .find(|binding| binding.prefix == prefix && binding.key == key)
        .map(|binding| binding.action)
}

/// 시퀀스 시작 prefix 여부
pub fn is_sequence_prefix(c: char) -> bool {
    sequence_bindings()
        .iter()
        .any(|binding| binding.prefix == c)
}

/// 커맨드바용 항목 생성 (priority 순 정렬)
pub fn generate_command_bar_items() -> Vec<CommandItem> {
    let mut entries: Vec<&CommandBarEntry> = ACTION_DEFS
        .iter()
        .filter_map(|def| def.command_bar.as_ref())
        .collect();

    entries.sort_by_key(|cb| cb.priority);

    entries
        .into_iter()
        .map(|cb| CommandItem::new(cb.key, cb.label))
        .collect()
}

/// 도움말 다이얼로그용 엔트리 생성
///
/// 반환: (카테고리명, Vec<(단축키, 설명)>) 목록
pub fn generate_help_entries() -> Vec<(&'static str, Vec<(&'static str, &'static str)>)> {
    let categories = [
        (ActionCategory::Navigation, "Navigation"),
        (ActionCategory::FileOperation, "File Operations"),
        (ActionCategory::Selection, "Selection"),
        (ActionCategory::System, "System"),
    ];

    categories
        .iter()
        .map(|(cat, name)| {
            let items: Vec<(&'static str, &'static str)> = ACTION_DEFS
                .iter()
                .filter(|d| d.category == *cat && d.shortcut_display.is_some())
                .map(|d| (d.shortcut_display.unwrap(), d.label))
                .collect();
            (*name, items)
        })
        .filter(|(_, items)| !items.is_empty())
        .collect()
}
