use colored::Colorize;
use std::fmt::Write;
use todocli::api::{CmdMessage, MessageLevel};
use todocli::model::TodoItem;

pub const LIST_HEADER: &str = "Showing items in the list:";

pub fn render_messages(messages: &[CmdMessage]) -> String {
    let mut out = String::new();
    for message in messages {
        let line = match message.level {
            MessageLevel::Info => message.content.dimmed(),
            MessageLevel::Success => message.content.green(),
        };
        let _ = writeln!(out, "{}", line);
    }
    out
}

pub fn render_items(items: &[TodoItem]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", LIST_HEADER);
    for item in items {
        let _ = writeln!(out, "id# {}: {}", item.id, item.text_lossy());
    }
    out
}
