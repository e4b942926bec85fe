//! Terminal presentation helpers

pub mod panel;
pub mod spinner;

pub use panel::render_panel;
pub use spinner::Spinner;

/// Panels never grow past this many columns, even on wide terminals
pub const MAX_PANEL_WIDTH: usize = 100;

/// Width available for a panel on the current stdout terminal
pub fn panel_width() -> usize {
    let (_, columns) = console::Term::stdout().size();
    usize::from(columns).min(MAX_PANEL_WIDTH)
}
