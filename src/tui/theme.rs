//! Presentation lookups for the dashboard.
//!
//! Every category/severity enum maps to its colors and glyphs through an
//! exhaustive `match`, so adding a variant fails to compile instead of
//! silently falling back to a default style at runtime.

use ratatui::style::Color;

use crate::config::Theme;
use crate::ingest::StageStatus;
use crate::models::{AnomalyCategory, Channel, EdgeCategory, EventCategory, NodeCategory, RiskLevel};
use crate::views::CaseStatus;

/// Base colors for chrome shared by every surface.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub border: Color,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Dark => Palette {
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Cyan,
                border: Color::DarkGray,
            },
            Theme::Light => Palette {
                fg: Color::Black,
                muted: Color::Gray,
                accent: Color::Blue,
                border: Color::Gray,
            },
        }
    }
}

pub fn risk_color(level: RiskLevel) -> Color {
    match level {
        RiskLevel::Critical => Color::Red,
        RiskLevel::High => Color::Yellow,
        RiskLevel::Medium => Color::Cyan,
        RiskLevel::Low => Color::DarkGray,
    }
}

pub fn risk_icon(level: RiskLevel) -> &'static str {
    match level {
        RiskLevel::Critical => "!!",
        RiskLevel::High => "!",
        RiskLevel::Medium => "i",
        RiskLevel::Low => "·",
    }
}

pub fn node_color(category: NodeCategory) -> Color {
    match category {
        NodeCategory::Suspect => Color::Red,
        NodeCategory::Associate => Color::Yellow,
        NodeCategory::Foreign => Color::Magenta,
        NodeCategory::Financial => Color::Cyan,
        NodeCategory::HiddenLink => Color::Green,
    }
}

pub fn edge_color(category: EdgeCategory) -> Color {
    match category {
        EdgeCategory::Frequent => Color::Gray,
        EdgeCategory::Suspicious => Color::Red,
        EdgeCategory::International => Color::Magenta,
        EdgeCategory::Financial => Color::Cyan,
        EdgeCategory::Hidden => Color::Green,
    }
}

pub fn channel_color(channel: Channel) -> Color {
    match channel {
        Channel::WhatsApp => Color::Green,
        Channel::Telegram => Color::Cyan,
        Channel::Sms => Color::Yellow,
        Channel::Signal => Color::Magenta,
    }
}

pub fn anomaly_icon(category: AnomalyCategory) -> &'static str {
    match category {
        AnomalyCategory::Temporal => "◷",
        AnomalyCategory::Linguistic => "Ａ",
        AnomalyCategory::Data => "▤",
        AnomalyCategory::Network => "◉",
    }
}

pub fn event_icon(category: EventCategory) -> &'static str {
    match category {
        EventCategory::Meeting => "⌖",
        EventCategory::Communication => "✉",
        EventCategory::Financial => "₹",
        EventCategory::Device => "◫",
    }
}

pub fn stage_glyph(status: StageStatus) -> &'static str {
    match status {
        StageStatus::Done => "✓",
        StageStatus::Current => "◌",
        StageStatus::Pending => "·",
    }
}

pub fn case_status_color(status: CaseStatus) -> Color {
    match status {
        CaseStatus::Active => Color::Green,
        CaseStatus::Closed => Color::DarkGray,
        CaseStatus::UnderReview => Color::Yellow,
    }
}
