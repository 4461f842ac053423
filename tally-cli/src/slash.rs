use tally_core::{aliases_of, Category, Session};

use crate::render::history_table;

/// Outcome of a `/command` typed into the chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slash {
    Reply(String),
    Quit,
}

pub fn handle_slash(input: &str, session: &Session) -> Option<Slash> {
    let s = input.trim();
    if !s.starts_with('/') {
        return None;
    }
    let reply = match s {
        "/help" => "Type your month as key=value pairs, e.g.\n\
income=50,000, food=18,000, rent=15000, entertainment=15,000\n\
Amounts accept commas, ₹ and k (1.5k = 1,500).\n\
\n\
Commands:\n\
- /help\n\
- /keys (accepted keys and aliases)\n\
- /history (months recorded this session)\n\
- /quit"
            .to_string(),
        "/keys" => keys_help(),
        "/history" => history_table(session.history(), &session.evaluator().currency),
        "/quit" | "/exit" => return Some(Slash::Quit),
        _ => "Unknown command. Try /help".to_string(),
    };
    Some(Slash::Reply(reply))
}

fn keys_help() -> String {
    let mut lines = vec!["Accepted keys (aliases):".to_string()];
    for c in Category::ALL {
        lines.push(format!("- {}: {}", c.key(), aliases_of(c).join(", ")));
    }
    lines.push("savings is calculated for you; savings=... is ignored.".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_not_a_command() {
        let s = Session::default();
        assert_eq!(handle_slash("income=100", &s), None);
    }

    #[test]
    fn test_keys_lists_aliases() {
        let s = Session::default();
        let Some(Slash::Reply(out)) = handle_slash("/keys", &s) else {
            panic!("expected reply");
        };
        assert!(out.contains("- income: income, salary, pay, wage, wages"));
        assert!(out.contains("- others: others, other, misc, miscellaneous"));
    }

    #[test]
    fn test_history_reflects_session() {
        let mut s = Session::default();
        s.submit("income=1000 rent=400", "March 2024");
        let Some(Slash::Reply(out)) = handle_slash("/history", &s) else {
            panic!("expected reply");
        };
        assert!(out.contains("March 2024"));
        assert!(out.contains("₹600"));
    }

    #[test]
    fn test_quit_and_unknown() {
        let s = Session::default();
        assert_eq!(handle_slash(" /quit ", &s), Some(Slash::Quit));
        assert_eq!(
            handle_slash("/pdf", &s),
            Some(Slash::Reply("Unknown command. Try /help".to_string()))
        );
    }
}
