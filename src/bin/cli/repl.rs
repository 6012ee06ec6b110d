use std::path::{Path, PathBuf};

use reedline::{
    ColumnarMenu, DefaultCompleter, Emacs, ExampleHighlighter, FileBackedHistory, KeyCode,
    KeyModifiers, Reedline, ReedlineEvent, ReedlineMenu, Signal,
};
use tracing::warn;

use crate::prompt::BookfinderPrompt;

const HISTORY_SIZE: usize = 1000;

fn file_history(location: &Path) -> Option<FileBackedHistory> {
    if let Some(parent) = location.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            warn!(location = %parent.display(), error = %e, "history disabled");
            return None;
        }
    }
    match FileBackedHistory::with_file(HISTORY_SIZE, location.to_path_buf()) {
        Ok(history) => Some(history),
        Err(e) => {
            warn!(location = %location.display(), error = %e, "history disabled");
            None
        }
    }
}

pub struct Repl {
    reedline: Reedline,
    prompt:   BookfinderPrompt,
}

impl Repl {
    pub fn new(commands: Vec<String>, history_location: Option<PathBuf>) -> Self {
        let completer = Box::new(DefaultCompleter::new_with_wordlen(commands.clone(), 1));

        let completion_menu = Box::new(ColumnarMenu::default().with_name("completion_menu"));

        let mut keybindings = reedline::default_emacs_keybindings();
        keybindings.add_binding(
            KeyModifiers::NONE,
            KeyCode::Tab,
            ReedlineEvent::UntilFound(vec![
                ReedlineEvent::Menu("completion_menu".to_string()),
                ReedlineEvent::MenuNext,
            ]),
        );

        let edit_mode = Box::new(Emacs::new(keybindings));

        let mut line_editor = Reedline::create()
            .with_highlighter(Box::new(ExampleHighlighter::new(commands)))
            .with_completer(completer)
            .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
            .with_edit_mode(edit_mode);

        if let Some(history) = history_location.as_deref().and_then(file_history) {
            line_editor = line_editor.with_history(Box::new(history));
        }

        Repl {
            reedline: line_editor,
            prompt:   BookfinderPrompt::default(),
        }
    }

    pub fn read_line(&mut self, status: String) -> anyhow::Result<Signal> {
        self.prompt.status = status;
        Ok(self.reedline.read_line(&self.prompt)?)
    }
}
