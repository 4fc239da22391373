use crate::models::{DisplayState, LinkRecord};
use crate::state::RowSnapshot;
use std::fmt::Write;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

pub fn render_board(rows: &[RowSnapshot]) -> String {
    let mut out = String::from("Alarms\n");
    let visible: Vec<&RowSnapshot> = rows.iter().filter(|row| row.visible).collect();
    if visible.is_empty() {
        out.push_str("  (no alarms)\n");
        return out;
    }

    let width = visible.iter().map(|row| row.label.chars().count()).max().unwrap_or(0);
    for row in visible {
        let marker = match row.state {
            DisplayState::Counting => "   ",
            DisplayState::Expired | DisplayState::Invalid => "[!]",
        };
        let _ = writeln!(
            out,
            "{marker} #{:<4} {:<width$}  {}",
            row.id.to_string(),
            row.label,
            row.text,
        );
    }
    out
}

pub fn redraw(board: &str) -> String {
    format!("{CLEAR_SCREEN}{board}")
}

pub fn render_links(links: &[LinkRecord]) -> String {
    let mut out = String::from("Pinned links\n");
    if links.is_empty() {
        out.push_str("  (none)\n");
    }
    for link in links {
        let _ = writeln!(out, "  #{} {} <{}>", link.id, link.name, link.link);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ItemId, RowStyle};

    fn snapshot(id: u64, label: &str, text: &str, state: DisplayState, visible: bool) -> RowSnapshot {
        RowSnapshot {
            id: ItemId(id),
            label: label.to_string(),
            text: text.to_string(),
            style: RowStyle::Info,
            visible,
            state,
        }
    }

    #[test]
    fn board_lists_visible_rows_and_flags_expired() {
        let rows = vec![
            snapshot(1, "Dentist", "0d 2h 3m 4s", DisplayState::Counting, true),
            snapshot(2, "Tea", "EXPIRED", DisplayState::Expired, true),
            snapshot(3, "Gone", "0d 0h 0m 1s", DisplayState::Counting, false),
        ];
        let board = render_board(&rows);
        assert!(board.contains("#1    Dentist  0d 2h 3m 4s"));
        assert!(board.contains("[!] #2    Tea      EXPIRED"));
        assert!(!board.contains("Gone"));
    }

    #[test]
    fn empty_board_says_so() {
        assert_eq!(render_board(&[]), "Alarms\n  (no alarms)\n");
    }

    #[test]
    fn links_are_listed() {
        let links = vec![LinkRecord {
            id: ItemId(7),
            name: "Docs".to_string(),
            link: "https://docs.rs".to_string(),
            image: String::new(),
        }];
        assert_eq!(render_links(&links), "Pinned links\n  #7 Docs <https://docs.rs>\n");
    }
}
