// Status bar component - 상태바 컴포넌트
//
// 파일/디렉토리 개수, 총 크기, 선택 정보, 토스트 메시지 표시

use crate::ui::Theme;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

/// 상태바 컴포넌트
pub struct StatusBar<'a> {
    /// 파일 개수
    file_count: usize,
    /// 디렉토리 개수
    dir_count: usize,
    /// 총 크기 (포맷된 문자열)
    total_size: &'a str,
    /// 선택된 항목 수
    selected_count: usize,
    /// 선택된 항목 총 크기 (포맷된 문자열)
    selected_size: &'a str,
    /// 토스트 메시지 (있으면 좌측 정보 대신 표시)
    message: Option<&'a str>,
    /// 배경색
    bg_color: Color,
    /// 전경색
    fg_color: Color,
    /// 강조색 (선택 정보)
    highlight_color: Color,
}

impl<'a> Default for StatusBar<'a> {
    fn default() -> Self {
        Self {
            file_count: 0,
            dir_count: 0,
            total_size: "0 B",
            selected_count: 0,
            selected_size: "0 B",
            message: None,
            bg_color: Color::Rgb(0, 122, 204),
            fg_color: Color::Rgb(255, 255, 255),
            highlight_color: Color::Yellow,
        }
    }
}

impl<'a> StatusBar<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 파일 개수 설정
    pub fn file_count(mut self, count: usize) -> Self {
        self.file_count = count;
        self
    }

    /// 디렉토리 개수 설정
    pub fn dir_count(mut self, count: usize) -> Self {
        self.dir_count = count;
        self
    }

    /// 총 크기 설정
    pub fn total_size(mut self, size: &'a str) -> Self {
        self.total_size = size;
        self
    }

    /// 선택된 항목 수 설정
    pub fn selected_count(mut self, count: usize) -> Self {
        self.selected_count = count;
        self
    }

    /// 선택된 항목 총 크기 설정
    pub fn selected_size(mut self, size: &'a str) -> Self {
        self.selected_size = size;
        self
    }

    /// 토스트 메시지 설정
    pub fn message(mut self, message: Option<&'a str>) -> Self {
        self.message = message;
        self
    }

    /// 테마 적용
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.bg_color = theme.status_bar_bg.to_color();
        self.fg_color = theme.status_bar_fg.to_color();
        self.highlight_color = theme.warning.to_color();
        self
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // 배경 채우기
        buf.set_style(area, Style::default().bg(self.bg_color));

        // 토스트 메시지가 있으면 우선 표시
        if let Some(message) = self.message {
            let line = Line::from(Span::styled(
                format!(" {}", message),
                Style::default().fg(self.fg_color),
            ));
            Paragraph::new(line).render(area, buf);
            return;
        }

        // 왼쪽 정보: 파일/디렉토리 개수, 크기
        let left_info = format!(
            " {} files, {} dirs | {}",
            self.file_count, self.dir_count, self.total_size
        );

        // 선택 정보 (있을 경우)
        let selected_info = if self.selected_count > 0 {
            format!(
                " | {} selected ({})",
                self.selected_count, self.selected_size
            )
        } else {
            String::new()
        };

        let spans = vec![
            Span::styled(left_info, Style::default().fg(self.fg_color)),
            Span::styled(selected_info, Style::default().fg(self.highlight_color)),
        ];

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}
