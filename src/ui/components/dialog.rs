//! 다이얼로그 시스템
//!
//! 이름 입력(mkdir/rename), 삭제 확인, 에러/메시지, 도움말 다이얼로그
//! 정의와 렌더링

use crate::core::actions::generate_help_entries;
use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};
use std::path::PathBuf;
use unicode_width::UnicodeWidthStr;

/// 다이얼로그 내부 좌우 패딩 (border 안쪽 여백)
const DIALOG_H_PADDING: u16 = 2;

/// 다이얼로그 종류
#[derive(Debug, Clone)]
pub enum DialogKind {
    /// 새 디렉토리 생성 입력 다이얼로그
    MkdirInput {
        value: String,
        cursor_pos: usize,
        selected_button: usize, // 0: OK, 1: Cancel
        parent_path: PathBuf,
    },
    /// 이름 변경 입력 다이얼로그
    RenameInput {
        value: String,
        cursor_pos: usize,
        selected_button: usize, // 0: OK, 1: Cancel
        original_path: PathBuf,
    },
    /// 삭제 확인 다이얼로그
    DeleteConfirm {
        items: Vec<String>,
        selected_button: usize, // 0: 휴지통, 1: 영구 삭제, 2: 취소
    },
    /// 에러 다이얼로그
    Error { title: String, message: String },
    /// 메시지 다이얼로그 (정보 표시)
    Message { title: String, message: String },
    /// 단축키 도움말 다이얼로그
    Help { scroll_offset: usize },
}

impl DialogKind {
    /// 에러 다이얼로그 생성
    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Error {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 메시지 다이얼로그 생성
    pub fn message(title: impl Into<String>, message: impl Into<String>) -> Self {
        DialogKind::Message {
            title: title.into(),
            message: message.into(),
        }
    }

    /// 새 디렉토리 입력 다이얼로그 생성
    pub fn mkdir_input(parent_path: PathBuf) -> Self {
        DialogKind::MkdirInput {
            value: String::new(),
            cursor_pos: 0,
            selected_button: 0,
            parent_path,
        }
    }

    /// 이름 변경 입력 다이얼로그 생성 (현재 이름으로 시드)
    pub fn rename_input(original_path: PathBuf, current_name: String) -> Self {
        let cursor_pos = current_name.len();
        DialogKind::RenameInput {
            value: current_name,
            cursor_pos,
            selected_button: 0,
            original_path,
        }
    }

    /// 삭제 확인 다이얼로그 생성
    pub fn delete_confirm(items: Vec<String>) -> Self {
        DialogKind::DeleteConfirm {
            items,
            selected_button: 0,
        }
    }

    /// 도움말 다이얼로그 생성
    pub fn help() -> Self {
        DialogKind::Help { scroll_offset: 0 }
    }
}

/// 다이얼로그 위젯
pub struct Dialog<'a> {
    kind: &'a DialogKind,
    bg_color: Color,
    fg_color: Color,
    accent_color: Color,
    error_color: Color,
}

impl<'a> Dialog<'a> {
    pub fn new(kind: &'a DialogKind) -> Self {
        Self {
            kind,
            bg_color: Color::Rgb(37, 37, 38),
            fg_color: Color::Rgb(212, 212, 212),
            accent_color: Color::Rgb(0, 120, 212),
            error_color: Color::Rgb(244, 71, 71),
        }
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.fg_color = theme.fg_primary.to_color();
        self.accent_color = theme.accent.to_color();
        self.error_color = theme.error.to_color();
        self
    }

    /// 화면 중앙에 고정 크기 영역 계산
    fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
        let w = width.min(area.width);
        let h = height.min(area.height);
        Rect {
            x: area.x + (area.width.saturating_sub(w)) / 2,
            y: area.y + (area.height.saturating_sub(h)) / 2,
            width: w,
            height: h,
        }
    }

    /// 테두리 블록 생성 + 배경 클리어
    fn draw_frame(&self, title: &str, border_color: Color, area: Rect, buf: &mut Buffer) -> Rect {
        Clear.render(area, buf);
        buf.set_style(area, Style::default().bg(self.bg_color));

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color))
            .title(Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(self.fg_color)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        block.render(area, buf);
        inner
    }

    /// 입력 필드 렌더링 (커서 하이라이트 포함)
    fn render_input_field(&self, value: &str, cursor_pos: usize, area: Rect, buf: &mut Buffer) {
        let field_style = Style::default().fg(self.fg_color).bg(Color::Rgb(60, 60, 60));
        buf.set_style(area, field_style);

        let before = &value[..cursor_pos];
        let cursor_char = value[cursor_pos..].chars().next();
        let after: &str = cursor_char
            .map(|c| &value[cursor_pos + c.len_utf8()..])
            .unwrap_or("");

        let cursor_style = Style::default()
            .fg(Color::Rgb(30, 30, 30))
            .bg(self.fg_color);

        let spans = vec![
            Span::styled(before.to_string(), field_style),
            Span::styled(cursor_char.map(String::from).unwrap_or_else(|| " ".to_string()), cursor_style),
            Span::styled(after.to_string(), field_style),
        ];

        // 필드보다 긴 입력은 커서가 보이도록 앞부분을 잘라낸다
        let total_width = before.width() + 1;
        let skip = total_width.saturating_sub(area.width as usize);
        let line = Line::from(spans);
        if skip == 0 {
            buf.set_line(area.x, area.y, &line, area.width);
        } else {
            let shifted: String = value.chars().skip(skip).collect();
            buf.set_string(area.x, area.y, shifted, field_style);
        }
    }

    /// 버튼 줄 렌더링
    fn render_buttons(&self, labels: &[&str], selected: usize, area: Rect, buf: &mut Buffer) {
        let total_width: usize = labels.iter().map(|l| l.width() + 4).sum::<usize>()
            + labels.len().saturating_sub(1) * 2;
        let mut x = area.x + (area.width.saturating_sub(total_width as u16)) / 2;

        for (i, label) in labels.iter().enumerate() {
            let text = format!("[ {} ]", label);
            let style = if i == selected {
                Style::default()
                    .fg(Color::Rgb(255, 255, 255))
                    .bg(self.accent_color)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(self.fg_color)
            };
            buf.set_string(x, area.y, &text, style);
            x += text.width() as u16 + 2;
        }
    }

    fn render_input_dialog(
        &self,
        title: &str,
        prompt: &str,
        value: &str,
        cursor_pos: usize,
        selected_button: usize,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let dialog_area = Self::centered_rect(52, 8, area);
        let inner = self.draw_frame(title, self.accent_color, dialog_area, buf);

        let x = inner.x + DIALOG_H_PADDING;
        let width = inner.width.saturating_sub(DIALOG_H_PADDING * 2);

        buf.set_string(x, inner.y + 1, prompt, Style::default().fg(self.fg_color));

        let field_area = Rect {
            x,
            y: inner.y + 2,
            width,
            height: 1,
        };
        self.render_input_field(value, cursor_pos, field_area, buf);

        let button_area = Rect {
            x: inner.x,
            y: inner.y + 4,
            width: inner.width,
            height: 1,
        };
        self.render_buttons(&["OK", "Cancel"], selected_button, button_area, buf);
    }

    fn render_delete_confirm(
        &self,
        items: &[String],
        selected_button: usize,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let shown = items.len().min(5);
        let height = 7 + shown as u16;
        let dialog_area = Self::centered_rect(56, height, area);
        let inner = self.draw_frame("Delete", self.error_color, dialog_area, buf);

        let x = inner.x + DIALOG_H_PADDING;

        let header = format!("Delete {}?", crate::utils::formatter::pluralize(items.len(), "item", "items"));
        buf.set_string(x, inner.y + 1, header, Style::default().fg(self.fg_color));

        for (i, item) in items.iter().take(shown).enumerate() {
            let text = format!("  {}", item);
            buf.set_string(
                x,
                inner.y + 2 + i as u16,
                text,
                Style::default().fg(self.fg_color),
            );
        }
        if items.len() > shown {
            buf.set_string(
                x,
                inner.y + 2 + shown as u16,
                format!("  ... and {} more", items.len() - shown),
                Style::default().fg(self.fg_color).add_modifier(Modifier::DIM),
            );
        }

        let button_area = Rect {
            x: inner.x,
            y: inner.y + inner.height.saturating_sub(2),
            width: inner.width,
            height: 1,
        };
        self.render_buttons(
            &["Trash", "Delete permanently", "Cancel"],
            selected_button,
            button_area,
            buf,
        );
    }

    fn render_text_dialog(
        &self,
        title: &str,
        message: &str,
        border_color: Color,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let line_count = message.lines().count().max(1) as u16;
        let dialog_area = Self::centered_rect(60, line_count + 5, area);
        let inner = self.draw_frame(title, border_color, dialog_area, buf);

        let text_area = Rect {
            x: inner.x + DIALOG_H_PADDING,
            y: inner.y + 1,
            width: inner.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: inner.height.saturating_sub(3),
        };

        let lines: Vec<Line> = message
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(self.fg_color))))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(text_area, buf);

        let button_area = Rect {
            x: inner.x,
            y: inner.y + inner.height.saturating_sub(1),
            width: inner.width,
            height: 1,
        };
        self.render_buttons(&["OK"], 0, button_area, buf);
    }

    fn render_help(&self, scroll_offset: usize, area: Rect, buf: &mut Buffer) {
        let dialog_area = Self::centered_rect(60, area.height.saturating_sub(4).clamp(10, 30), area);
        let inner = self.draw_frame("Keyboard Help", self.accent_color, dialog_area, buf);

        let mut lines: Vec<Line> = Vec::new();
        for (category, items) in generate_help_entries() {
            lines.push(Line::from(Span::styled(
                category,
                Style::default()
                    .fg(self.accent_color)
                    .add_modifier(Modifier::BOLD),
            )));
            for (shortcut, label) in items {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("  {:<12}", shortcut),
                        Style::default().fg(self.fg_color).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(label, Style::default().fg(self.fg_color)),
                ]));
            }
            lines.push(Line::from(""));
        }

        let visible: Vec<Line> = lines
            .into_iter()
            .skip(scroll_offset)
            .take(inner.height.saturating_sub(1) as usize)
            .collect();

        let text_area = Rect {
            x: inner.x + DIALOG_H_PADDING,
            y: inner.y,
            width: inner.width.saturating_sub(DIALOG_H_PADDING * 2),
            height: inner.height.saturating_sub(1),
        };
        Paragraph::new(visible).render(text_area, buf);

        buf.set_string(
            inner.x + DIALOG_H_PADDING,
            inner.y + inner.height.saturating_sub(1),
            "j/k: scroll | Esc: close",
            Style::default().fg(self.fg_color).add_modifier(Modifier::DIM),
        );
    }
}

impl Widget for Dialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self.kind {
            DialogKind::MkdirInput {
                value,
                cursor_pos,
                selected_button,
                ..
            } => {
                self.render_input_dialog(
                    "New Directory",
                    "Directory name:",
                    value,
                    *cursor_pos,
                    *selected_button,
                    area,
                    buf,
                );
            }
            DialogKind::RenameInput {
                value,
                cursor_pos,
                selected_button,
                ..
            } => {
                self.render_input_dialog(
                    "Rename",
                    "New name:",
                    value,
                    *cursor_pos,
                    *selected_button,
                    area,
                    buf,
                );
            }
            DialogKind::DeleteConfirm {
                items,
                selected_button,
            } => {
                self.render_delete_confirm(items, *selected_button, area, buf);
            }
            DialogKind::Error { title, message } => {
                self.render_text_dialog(title, message, self.error_color, area, buf);
            }
            DialogKind::Message { title, message } => {
                self.render_text_dialog(title, message, self.accent_color, area, buf);
            }
            DialogKind::Help { scroll_offset } => {
                self.render_help(*scroll_offset, area, buf);
            }
        }
    }
}
