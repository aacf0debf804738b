use mapedit_engine::core::App;

/// Map editor logic.
///
/// Editing features are not built yet; the editor only advances its fixed-step
/// clock and draws the empty (black) canvas.
#[derive(Debug, Default)]
pub struct Editor {
    steps: u64,
}

impl App for Editor {
    fn update(&mut self) {
        self.steps += 1;
        if self.steps % 1000 == 0 {
            log::trace!("editor reached step {}", self.steps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_update_is_one_step() {
        let mut editor = Editor::default();
        for _ in 0..3 {
            editor.update();
        }
        assert_eq!(editor.steps, 3);
    }

    #[test]
    fn canvas_is_cleared_to_black() {
        assert_eq!(Editor::default().background(), wgpu::Color::BLACK);
    }
}
