use crate::models::PaneState;
use crate::system::{DirectoryLister, Launcher, OperationExecutor, SystemLauncher};
use crate::ui::{ActivePanel, DialogKind, LayoutManager, LayoutMode, ThemeManager};
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

mod dialogs;
mod navigation;
mod operations;
mod text_edit;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersistedAppState {
    version: u32,
    theme: String,
}

/// 앱 상태
///
/// 양쪽 패널과 활성 패널 추적, 커맨드 디스패치를 담당하는 컨트롤러.
/// 커맨드 하나를 파일시스템 호출까지 전부 끝낸 뒤 다음 커맨드를 받습니다.
pub struct App {
    /// 종료 플래그
    pub should_quit: bool,
    /// 레이아웃 매니저 (활성 패널 포함)
    pub layout: LayoutManager,
    /// 좌측 패널
    pub left_pane: PaneState,
    /// 우측 패널
    pub right_pane: PaneState,
    /// 디렉토리 목록 조회
    pub lister: DirectoryLister,
    /// 파일 작업 실행
    pub executor: OperationExecutor,
    /// 외부 프로그램 런처 (주입형)
    launcher: Box<dyn Launcher>,
    /// 테마 관리자
    pub theme_manager: ThemeManager,
    /// 현재 표시 중인 다이얼로그
    pub dialog: Option<DialogKind>,
    /// 대기 중인 시퀀스 키 (예: 'g' for 'gg')
    pub pending_key: Option<char>,
    /// 대기 키 입력 시각
    pub pending_key_time: Option<Instant>,
    /// 토스트 메시지 (3초 후 자동 소멸)
    pub toast_message: Option<(String, Instant)>,
    /// 테스트에서 설정 저장 경로를 격리하기 위한 override
    state_store_override: Option<PathBuf>,
}

impl App {
    const APP_STATE_VERSION: u32 = 1;
    const TOAST_DURATION: Duration = Duration::from_secs(3);
    const PENDING_KEY_TIMEOUT: Duration = Duration::from_millis(1000);

    pub fn new() -> Result<Self> {
        // 좌측: 작업 디렉토리, 우측: 홈 디렉토리, 둘 다 없으면 루트
        let left_path = env::current_dir()
            .ok()
            .filter(|p| p.is_dir())
            .unwrap_or_else(Self::filesystem_root);
        let right_path = dirs::home_dir()
            .filter(|p| p.is_dir())
            .unwrap_or_else(Self::filesystem_root);

        let mut app = Self::with_panes(left_path, right_path, Box::new(SystemLauncher::new()));
        let _ = app.theme_manager.load_themes_from_config_dir();
        app.load_persisted_state();
        app.refresh_both_panes();
        Ok(app)
    }

    fn with_panes(left_path: PathBuf, right_path: PathBuf, launcher: Box<dyn Launcher>) -> Self {
        Self {
            should_quit: false,
            layout: LayoutManager::new(),
            left_pane: PaneState::new(left_path),
            right_pane: PaneState::new(right_path),
            lister: DirectoryLister::new(),
            executor: OperationExecutor::new(),
            launcher,
            theme_manager: ThemeManager::new(),
            dialog: None,
            pending_key: None,
            pending_key_time: None,
            toast_message: None,
            state_store_override: None,
        }
    }

    fn filesystem_root() -> PathBuf {
        #[cfg(unix)]
        {
            PathBuf::from("/")
        }
        #[cfg(windows)]
        {
            PathBuf::from("C:\\")
        }
        #[cfg(not(any(unix, windows)))]
        {
            PathBuf::from(".")
        }
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(left_path: PathBuf, right_path: PathBuf) -> Self {
        use crate::system::RecordingLauncher;
        use std::sync::atomic::{AtomicUsize, Ordering};

        static TEST_APP_COUNTER: AtomicUsize = AtomicUsize::new(0);
        let suffix = TEST_APP_COUNTER.fetch_add(1, Ordering::Relaxed);
        let state_store_override = std::env::temp_dir().join(format!(
            "twindir-test-settings-{}-{}.toml",
            std::process::id(),
            suffix
        ));

        let mut app = Self::with_panes(left_path, right_path, Box::new(RecordingLauncher::new()));
        app.state_store_override = Some(state_store_override);
        app.refresh_both_panes();
        app
    }

    #[cfg(test)]
    pub(crate) fn set_launcher_for_test(&mut self, launcher: Box<dyn Launcher>) {
        self.launcher = launcher;
    }

    /// 런처 참조 반환
    pub(crate) fn launcher(&self) -> &dyn Launcher {
        self.launcher.as_ref()
    }

    /// 종료
    pub fn quit(&mut self) {
        let _ = self.save_persisted_state();
        self.should_quit = true;
    }

    /// 종료 상태 확인
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    // === 설정 저장/복원 ===

    fn state_store_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.state_store_override {
            return Some(path.clone());
        }
        if let Ok(custom) = env::var("TWINDIR_SETTINGS_FILE") {
            let trimmed = custom.trim();
            if !trimmed.is_empty() {
                return Some(PathBuf::from(trimmed));
            }
        }
        dirs::home_dir().map(|home| home.join(".twindir").join("settings.toml"))
    }

    fn encode_app_state(&self) -> std::result::Result<String, toml::ser::Error> {
        let payload = PersistedAppState {
            version: Self::APP_STATE_VERSION,
            theme: self.theme_manager.current_name().to_string(),
        };
        toml::to_string_pretty(&payload)
    }

    fn decode_app_state(data: &str) -> Option<PersistedAppState> {
        let parsed: PersistedAppState = toml::from_str(data).ok()?;
        if parsed.version != Self::APP_STATE_VERSION {
            return None;
        }
        if parsed.theme.trim().is_empty() {
            return None;
        }
        Some(parsed)
    }

    fn save_persisted_state(&self) -> std::io::Result<()> {
        let Some(path) = self.state_store_path() else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = self
            .encode_app_state()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, data)
    }

    fn load_persisted_state(&mut self) {
        let Some(path) = self.state_store_path() else {
            return;
        };
        let Ok(data) = fs::read_to_string(path) else {
            return;
        };
        let Some(state) = Self::decode_app_state(&data) else {
            return;
        };

        let _ = self.theme_manager.switch_theme(&state.theme);
    }

    /// 테마 전환 후 즉시 저장
    pub(crate) fn switch_theme_and_save(&mut self, theme_name: &str) {
        if self.theme_manager.switch_theme(theme_name).is_ok() {
            let _ = self.save_persisted_state();
            self.set_toast(&format!("Theme: {}", theme_name));
        }
    }

    // === 패널 접근 ===

    /// 패널 전환 (Tab)
    pub fn toggle_panel(&mut self) {
        self.layout.toggle_panel();
    }

    /// 활성 패널 반환
    pub fn active_panel(&self) -> ActivePanel {
        self.layout.active_panel()
    }

    /// 패널 상태 반환
    pub fn pane(&self, panel: ActivePanel) -> &PaneState {
        match panel {
            ActivePanel::Left => &self.left_pane,
            ActivePanel::Right => &self.right_pane,
        }
    }

    /// 패널 상태 반환 (mutable)
    pub fn pane_mut(&mut self, panel: ActivePanel) -> &mut PaneState {
        match panel {
            ActivePanel::Left => &mut self.left_pane,
            ActivePanel::Right => &mut self.right_pane,
        }
    }

    /// 활성 패널 상태 반환
    pub fn active_pane(&self) -> &PaneState {
        self.pane(self.active_panel())
    }

    /// 활성 패널 상태 반환 (mutable)
    pub fn active_pane_mut(&mut self) -> &mut PaneState {
        self.pane_mut(self.active_panel())
    }

    /// 비활성 패널 상태 반환
    pub fn inactive_pane(&self) -> &PaneState {
        self.pane(self.active_panel().other())
    }

    // === 다이얼로그 ===

    /// 다이얼로그 활성 여부
    pub fn is_dialog_active(&self) -> bool {
        self.dialog.is_some()
    }

    /// 다이얼로그 닫기 (취소 - 파일시스템 영향 없음)
    pub fn close_dialog(&mut self) {
        self.dialog = None;
    }

    // === 토스트 / 시퀀스 키 ===

    /// 토스트 메시지 설정
    pub fn set_toast(&mut self, message: &str) {
        self.toast_message = Some((message.to_string(), Instant::now()));
    }

    /// 만료되지 않은 토스트 메시지 반환
    pub fn toast_display(&self) -> Option<&str> {
        self.toast_message
            .as_ref()
            .filter(|(_, at)| at.elapsed() < Self::TOAST_DURATION)
            .map(|(msg, _)| msg.as_str())
    }

    /// 시퀀스 대기 키 설정
    pub fn set_pending_key(&mut self, key: char) {
        self.pending_key = Some(key);
        self.pending_key_time = Some(Instant::now());
    }

    /// 시퀀스 대기 키 해제
    pub fn clear_pending_key(&mut self) {
        self.pending_key = None;
        self.pending_key_time = None;
    }

    /// 시퀀스 대기 키 만료 여부
    pub fn is_pending_key_expired(&self) -> bool {
        self.pending_key_time
            .map(|at| at.elapsed() >= Self::PENDING_KEY_TIMEOUT)
            .unwrap_or(false)
    }

    /// 레이아웃 모드 반환
    pub fn layout_mode(&self) -> LayoutMode {
        self.layout.mode()
    }
}

#[cfg(test)]
mod tests;
