//! Landing surface: the login form.

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::tui::theme::Palette;

/// Which input line has focus.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Email,
    Credential,
}

/// Login form state.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub credential: String,
    pub field: LoginField,
    pub error: Option<&'static str>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            LoginField::Email => LoginField::Credential,
            LoginField::Credential => LoginField::Email,
        };
    }

    pub fn push_char(&mut self, c: char) {
        match self.field {
            LoginField::Email => self.email.push(c),
            LoginField::Credential => self.credential.push(c),
        }
        self.error = None;
    }

    pub fn backspace(&mut self) {
        match self.field {
            LoginField::Email => self.email.pop(),
            LoginField::Credential => self.credential.pop(),
        };
    }

    pub fn set_error(&mut self, message: &'static str) {
        self.error = Some(message);
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

pub fn render(frame: &mut Frame, area: Rect, form: &LoginForm, palette: &Palette) {
    let box_width = 52.min(area.width);
    let box_height = 12.min(area.height);
    let popup = Rect {
        x: area.x + (area.width.saturating_sub(box_width)) / 2,
        y: area.y + (area.height.saturating_sub(box_height)) / 2,
        width: box_width,
        height: box_height,
    };

    frame.render_widget(Clear, popup);

    let field_style = |focused: bool| {
        if focused {
            Style::default().fg(palette.accent)
        } else {
            Style::default().fg(palette.fg)
        }
    };
    let masked: String = "*".repeat(form.credential.len());
    let cursor = |focused: bool| if focused { "_" } else { "" };

    let mut lines = vec![
        Line::from(Span::styled(
            "FORENSIQ COMMAND CENTER",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(vec![
            Span::styled("  Email:      ", Style::default().fg(palette.muted)),
            Span::styled(
                format!("{}{}", form.email, cursor(form.field == LoginField::Email)),
                field_style(form.field == LoginField::Email),
            ),
        ]),
        Line::from(vec![
            Span::styled("  Credential: ", Style::default().fg(palette.muted)),
            Span::styled(
                format!("{}{}", masked, cursor(form.field == LoginField::Credential)),
                field_style(form.field == LoginField::Credential),
            ),
        ]),
        Line::raw(""),
    ];
    match form.error {
        Some(error) => lines.push(Line::from(Span::styled(
            format!("  {}", error),
            Style::default().fg(Color::Red),
        ))),
        None => lines.push(Line::raw("")),
    }
    lines.push(Line::raw(""));
    lines.push(Line::from(Span::styled(
        "  Tab:Switch field  Enter:Sign in  Esc:Quit",
        Style::default().fg(palette.muted),
    )));
    lines.push(Line::from(Span::styled(
        "  Demo: officer@forensiq.gov / forensiq123",
        Style::default().fg(palette.muted),
    )));

    let form_widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.border))
            .title(" Sign in "),
    );
    frame.render_widget(form_widget, popup);
}
