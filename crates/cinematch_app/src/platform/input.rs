use cinematch_core::Msg;

use super::ui::constants::{COMMAND_QUIT, COMMAND_QUIT_SHORT, COMMAND_RETRY};

#[derive(Debug, Clone, PartialEq)]
pub enum UserInput {
    Messages(Vec<Msg>),
    Quit,
}

/// Maps one line typed by the user to the messages it stands for.
pub fn parse_line(line: &str) -> UserInput {
    match line.trim() {
        COMMAND_QUIT | COMMAND_QUIT_SHORT => UserInput::Quit,
        COMMAND_RETRY => UserInput::Messages(vec![Msg::RetryClicked]),
        // Blank lines still go through submit; the guard in `update` drops them.
        _ => UserInput::Messages(vec![
            Msg::InputChanged(line.to_string()),
            Msg::QuerySubmitted,
        ]),
    }
}
