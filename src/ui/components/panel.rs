// Panel component - 파일 패널 컴포넌트
//
// 파일 리스트 표시, 커서/다중 선택 상태, 테두리 렌더링

use crate::models::file_entry::{EntryKind, FileEntry};
use crate::ui::Theme;
use crate::utils::formatter::{format_date, format_file_size};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Widget},
};
use std::collections::HashSet;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// 패널 상태
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStatus {
    #[default]
    Inactive,
    Active,
}

/// 패널 컴포넌트
pub struct Panel<'a> {
    /// 패널 제목 (경로)
    title: &'a str,
    /// 패널 상태
    status: PanelStatus,
    /// 엔트리 목록 (".." 포함)
    entries: &'a [FileEntry],
    /// 커서 위치
    cursor: usize,
    /// 스크롤 오프셋
    scroll_offset: usize,
    /// 다중 선택된 항목 이름
    selected: &'a HashSet<String>,
    /// 활성 테두리 색상
    active_border_color: Color,
    /// 비활성 테두리 색상
    inactive_border_color: Color,
    /// 패널 배경색
    bg_color: Color,
    /// 파일 일반 색상
    file_normal_color: Color,
    /// 커서 행 색상
    file_selected_color: Color,
    /// 커서 행 배경색
    file_selected_bg_color: Color,
    /// 다중 선택(마킹) 색상
    file_marked_color: Color,
    /// 디렉토리 색상
    directory_color: Color,
}

/// 빈 HashSet을 위한 정적 참조
static EMPTY_SELECTION: std::sync::LazyLock<HashSet<String>> =
    std::sync::LazyLock::new(HashSet::new);

impl<'a> Default for Panel<'a> {
    fn default() -> Self {
        Self {
            title: "",
            status: PanelStatus::default(),
            entries: &[],
            cursor: 0,
            scroll_offset: 0,
            selected: &EMPTY_SELECTION,
            active_border_color: Color::Rgb(0, 120, 212),
            inactive_border_color: Color::Rgb(60, 60, 60),
            bg_color: Color::Rgb(30, 30, 30),
            file_normal_color: Color::Rgb(212, 212, 212),
            file_selected_color: Color::Rgb(255, 255, 255),
            file_selected_bg_color: Color::Rgb(0, 120, 212),
            file_marked_color: Color::Rgb(255, 215, 0),
            directory_color: Color::Rgb(86, 156, 214),
        }
    }
}

impl<'a> Panel<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 제목 설정
    pub fn title(mut self, title: &'a str) -> Self {
        self.title = title;
        self
    }

    /// 패널 상태 설정
    pub fn status(mut self, status: PanelStatus) -> Self {
        self.status = status;
        self
    }

    /// 엔트리 목록 설정
    pub fn entries(mut self, entries: &'a [FileEntry]) -> Self {
        self.entries = entries;
        self
    }

    /// 커서 위치 설정
    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor;
        self
    }

    /// 스크롤 오프셋 설정
    pub fn scroll_offset(mut self, offset: usize) -> Self {
        self.scroll_offset = offset;
        self
    }

    /// 다중 선택 항목 설정
    pub fn selected(mut self, selected: &'a HashSet<String>) -> Self {
        self.selected = selected;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.active_border_color = theme.panel_active_border.to_color();
        self.inactive_border_color = theme.panel_inactive_border.to_color();
        self.bg_color = theme.panel_bg.to_color();
        self.file_normal_color = theme.file_normal.to_color();
        self.file_selected_color = theme.file_selected.to_color();
        self.file_selected_bg_color = theme.file_selected_bg.to_color();
        self.file_marked_color = theme.file_marked.to_color();
        self.directory_color = theme.directory.to_color();
        self
    }

    /// 테두리 색상 반환
    fn border_color(&self) -> Color {
        match self.status {
            PanelStatus::Active => self.active_border_color,
            PanelStatus::Inactive => self.inactive_border_color,
        }
    }

    /// 제목 스타일 반환
    fn title_style(&self) -> Style {
        let base = Style::default().fg(self.file_normal_color);
        match self.status {
            PanelStatus::Active => base.add_modifier(Modifier::BOLD),
            PanelStatus::Inactive => base,
        }
    }

    /// 엔트리 종류별 기본 색상
    fn entry_color(&self, entry: &FileEntry) -> Color {
        match entry.kind {
            EntryKind::Directory => self.directory_color,
            EntryKind::Parent => Color::Rgb(150, 150, 150),
            EntryKind::File => self.file_normal_color,
        }
    }

    /// 표시 이름 (디렉토리는 "/" 접미사, 상위 링크는 "[..]")
    fn display_name(entry: &FileEntry) -> String {
        match entry.kind {
            EntryKind::Parent => "[..]".to_string(),
            EntryKind::Directory => format!("{}/", entry.name),
            EntryKind::File => entry.name.clone(),
        }
    }

    /// 크기 컬럼 문자열
    fn size_column(entry: &FileEntry) -> String {
        match entry.kind {
            EntryKind::File => format_file_size(entry.size),
            EntryKind::Directory => "<DIR>".to_string(),
            EntryKind::Parent => String::new(),
        }
    }

    /// 이름을 컬럼 너비에 맞게 자르기
    fn truncate_name(name: &str, max_width: usize) -> String {
        if name.width() <= max_width {
            return name.to_string();
        }

        let ellipsis = "…";
        let available = max_width.saturating_sub(ellipsis.width());
        let mut result = String::new();
        let mut current = 0;

        for ch in name.chars() {
            let w = ch.width().unwrap_or(1);
            if current + w > available {
                break;
            }
            result.push(ch);
            current += w;
        }

        format!("{}{}", result, ellipsis)
    }

    /// 단일 엔트리 행 렌더링
    fn render_entry_line(
        &self,
        entry: &FileEntry,
        index: usize,
        name_width: usize,
        inner: Rect,
        buf: &mut Buffer,
        y: u16,
    ) {
        let is_cursor = index == self.cursor && self.status == PanelStatus::Active;
        let is_cursor_inactive = index == self.cursor && self.status == PanelStatus::Inactive;
        let is_marked = !entry.is_parent_link() && self.selected.contains(&entry.name);

        let fg = if is_marked {
            self.file_marked_color
        } else if is_cursor {
            self.file_selected_color
        } else {
            self.entry_color(entry)
        };

        let style = if is_cursor {
            Style::default().fg(fg).bg(self.file_selected_bg_color)
        } else if is_cursor_inactive {
            Style::default().fg(fg).add_modifier(Modifier::UNDERLINED)
        } else {
            Style::default().fg(fg)
        };

        let marker = if is_marked { "*" } else { " " };
        let name = Self::truncate_name(&Self::display_name(entry), name_width);
        let size = Self::size_column(entry);
        let date = if entry.is_parent_link() {
            String::new()
        } else {
            format_date(entry.modified)
        };

        let name_padding = name_width.saturating_sub(name.width());
        let text = format!(
            "{}{}{} {:>10} {:>16} ",
            marker,
            name,
            " ".repeat(name_padding),
            size,
            date
        );

        let line = Line::from(Span::styled(text, style));
        buf.set_line(inner.x, inner.y + y, &line, inner.width);
    }
}

impl Widget for Panel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width < 3 || area.height < 3 {
            return;
        }

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border_color()))
            .title(Span::styled(format!(" {} ", self.title), self.title_style()))
            .style(Style::default().bg(self.bg_color));

        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 {
            return;
        }

        // 이름 컬럼 너비 = 전체 - 마커(1) - 크기(11) - 날짜(17) - 여백(1)
        let name_width = (inner.width as usize).saturating_sub(30).max(8);
        let max_rows = inner.height as usize;

        let visible = self
            .entries
            .iter()
            .enumerate()
            .skip(self.scroll_offset)
            .take(max_rows);

        let mut y = 0u16;
        for (index, entry) in visible {
            self.render_entry_line(entry, index, name_width, inner, buf, y);
            y += 1;
        }
    }
}
