//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`heap`]: Both heap regions with hex dumps and corruption highlighting
//! - [`menu`]: The menu choices, value prompt and win banner
//! - [`terminal`]: Session transcript
//! - [`status`]: Status bar with phase indicator and keybindings
//!
//! Each pane module exports a `render_*` function taking the frame, its area
//! and a borrowed render-data struct. Panes hold no state of their own beyond
//! scroll offsets owned by the app.

pub mod heap;
pub mod menu;
pub mod status;
pub mod terminal;

// Re-export render functions for convenience
pub use heap::{render_heap_pane, HeapRenderData, HeapScrollState};
pub use menu::{render_menu_pane, MenuRenderData};
pub use status::{render_status_bar, StatusRenderData};
pub use terminal::render_terminal_pane;
