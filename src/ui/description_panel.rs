//! Floating description of the hovered body

use imgui::{Condition, WindowFlags};

use crate::simulation::DescriptionOverlay;

/// Widest the panel grows before wrapping, in pixels
pub const MAX_PANEL_WIDTH: f32 = 300.0;

fn panel_flags() -> WindowFlags {
    WindowFlags::NO_TITLE_BAR
        | WindowFlags::ALWAYS_AUTO_RESIZE
        | WindowFlags::NO_INPUTS
        | WindowFlags::NO_SAVED_SETTINGS
        | WindowFlags::NO_FOCUS_ON_APPEARING
}

/// Draws the overlay at its anchor, or nothing when no body is hovered
///
/// The panel ignores input, so the pointer keeps reaching the scene even
/// while it passes over the text.
pub fn description_panel(ui: &imgui::Ui, overlay: Option<&DescriptionOverlay>) {
    let Some(overlay) = overlay else {
        return;
    };

    ui.window("##planet-description")
        .position(overlay.position, Condition::Always)
        .bg_alpha(0.75)
        .flags(panel_flags())
        .build(|| {
            let _wrap = ui.push_text_wrap_pos_with_pos(ui.cursor_pos()[0] + MAX_PANEL_WIDTH);
            ui.text(&overlay.text);
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_never_takes_input() {
        let flags = panel_flags();
        assert!(flags.contains(WindowFlags::NO_INPUTS));
        assert!(flags.contains(WindowFlags::NO_TITLE_BAR));
        assert!(flags.contains(WindowFlags::ALWAYS_AUTO_RESIZE));
    }
}
