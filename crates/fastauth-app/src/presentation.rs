/*
[INPUT]:  ConnectionStatus, AuthSnapshot, ControllerError
[OUTPUT]: Badge colors, icons, labels and one-line status text
[POS]:    Presentation layer - framework-agnostic display helpers
[UPDATE]: When status styling or user-facing wording changes
*/

use console::{Color, style};
use fastauth_adapter::ConnectionStatus;

use crate::controller::AuthSnapshot;
use crate::error::ControllerError;

const FALLBACK_COLOR: &str = "#9E9E9E";

/// Hex badge color for a status
pub fn status_color(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "#4CAF50",
        ConnectionStatus::Connecting => "#FF9800",
        ConnectionStatus::Error => "#F44336",
        ConnectionStatus::Ready => "#2196F3",
        ConnectionStatus::Disconnected | ConnectionStatus::Initializing => FALLBACK_COLOR,
    }
}

/// Same mapping keyed by the lowercase status name; unknown keys fall back
/// to grey.
pub fn status_color_for_key(key: &str) -> &'static str {
    ConnectionStatus::ALL
        .into_iter()
        .find(|status| status.as_str() == key)
        .map_or(FALLBACK_COLOR, status_color)
}

pub fn status_icon(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "🟢",
        ConnectionStatus::Connecting => "🟡",
        ConnectionStatus::Error => "🔴",
        ConnectionStatus::Ready => "🔵",
        ConnectionStatus::Disconnected | ConnectionStatus::Initializing => "⚪",
    }
}

pub fn status_label(status: ConnectionStatus) -> &'static str {
    match status {
        ConnectionStatus::Connected => "Connected",
        ConnectionStatus::Connecting => "Connecting...",
        ConnectionStatus::Error => "Error",
        ConnectionStatus::Ready => "Ready",
        ConnectionStatus::Initializing => "Initializing...",
        ConnectionStatus::Disconnected => "Disconnected",
    }
}

/// Terminal color closest to the badge color
pub fn terminal_color(status: ConnectionStatus) -> Color {
    match status {
        ConnectionStatus::Connected => Color::Green,
        ConnectionStatus::Connecting => Color::Yellow,
        ConnectionStatus::Error => Color::Red,
        ConnectionStatus::Ready => Color::Blue,
        ConnectionStatus::Disconnected | ConnectionStatus::Initializing => Color::White,
    }
}

/// User-facing sentence for an error
pub fn format_error_message(err: &ControllerError) -> String {
    err.user_message()
}

/// One-line status badge, e.g. `🟢 Connected as user@example.com (contract.near)`
pub fn render_status_line(snapshot: &AuthSnapshot) -> String {
    let status = snapshot.status;
    let mut line = format!(
        "{} {}",
        status_icon(status),
        style(status_label(status)).fg(terminal_color(status)).bold()
    );

    if let Some(session) = &snapshot.session {
        line.push_str(&format!(
            " as {} ({})",
            session.identifier, session.contract_id
        ));
    }
    if let Some(message) = snapshot.error_message() {
        line.push_str(&format!(" - {}", style(message).red()));
    }
    line
}
