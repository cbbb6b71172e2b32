// UI Layer
pub mod components;
pub mod layout;
pub mod theme;

// Re-export layout types for convenience
pub use layout::{ActivePanel, LayoutManager, LayoutMode};

// Re-export components
pub use components::{CommandBar, Dialog, DialogKind, Panel, PanelStatus, StatusBar, WarningScreen};
pub use theme::{Theme, ThemeManager};
