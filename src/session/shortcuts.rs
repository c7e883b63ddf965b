use crate::session::messages::SessionEvent;

/// One parsed console command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Event(SessionEvent),
    /// Press and release at the same point; lands on a control or draws nothing
    Click(i32, i32),
}

/// Map a console line to a command.
///
/// Bindings follow the desktop tool: Backspace deletes the last region and
/// so does Return.
pub fn parse_command(line: &str) -> Option<Command> {
    let mut words = line.split_whitespace();
    let verb = words.next()?.to_ascii_lowercase();
    let args: Vec<&str> = words.collect();

    let point = || -> Option<(i32, i32)> {
        match args.as_slice() {
            [x, y] => Some((x.parse().ok()?, y.parse().ok()?)),
            _ => None,
        }
    };

    match verb.as_str() {
        "down" | "press" => point().map(|(x, y)| Command::Event(SessionEvent::pointer_down(x, y))),
        "drag" | "move" => point().map(|(x, y)| Command::Event(SessionEvent::pointer_drag(x, y))),
        "up" | "release" => point().map(|(x, y)| Command::Event(SessionEvent::pointer_up(x, y))),
        "click" => point().map(|(x, y)| Command::Click(x, y)),
        "next" | "n" if args.is_empty() => Some(Command::Event(SessionEvent::Advance)),
        "undo" | "u" if args.is_empty() => Some(Command::Event(SessionEvent::Undo)),
        "delete" | "backspace" | "return" | "enter" if args.is_empty() => {
            Some(Command::Event(SessionEvent::DeleteLast))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_commands_carry_coordinates() {
        assert_eq!(
            parse_command("down 10 20"),
            Some(Command::Event(SessionEvent::pointer_down(10, 20)))
        );
        assert_eq!(
            parse_command("  DRAG -3 40 "),
            Some(Command::Event(SessionEvent::pointer_drag(-3, 40)))
        );
        assert_eq!(
            parse_command("up 1 1"),
            Some(Command::Event(SessionEvent::pointer_up(1, 1)))
        );
        assert_eq!(parse_command("click 5 6"), Some(Command::Click(5, 6)));
    }

    #[test]
    fn control_commands() {
        assert_eq!(parse_command("next"), Some(Command::Event(SessionEvent::Advance)));
        assert_eq!(parse_command("u"), Some(Command::Event(SessionEvent::Undo)));
        for line in ["delete", "backspace", "Return", "enter"] {
            assert_eq!(
                parse_command(line),
                Some(Command::Event(SessionEvent::DeleteLast)),
                "{line}"
            );
        }
    }

    #[test]
    fn malformed_lines_are_rejected() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("down 10"), None);
        assert_eq!(parse_command("down ten 20"), None);
        assert_eq!(parse_command("next please"), None);
        assert_eq!(parse_command("zoom 2"), None);
    }
}
