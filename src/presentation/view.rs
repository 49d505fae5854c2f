use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};

use crate::{
    app::{AppSession, FormOptions, StatusKind, StatusLine},
    form::FormState,
    domain::FieldSchema,
};

use super::lines::{ViewState, form_lines};

/// Bordered widget showing one form, titled with the app name.
pub struct FormView<'a> {
    title: &'a str,
    description: Option<&'a str>,
    state: &'a FormState,
    schema: &'a [FieldSchema],
    view: &'a ViewState,
    options: &'a FormOptions,
    status: Option<&'a StatusLine>,
    scroll: u16,
}

impl<'a> FormView<'a> {
    pub fn new(
        title: &'a str,
        state: &'a FormState,
        schema: &'a [FieldSchema],
        view: &'a ViewState,
        options: &'a FormOptions,
    ) -> Self {
        Self {
            title,
            description: None,
            state,
            schema,
            view,
            options,
            status: None,
            scroll: 0,
        }
    }

    pub fn for_session(session: &'a AppSession, view: &'a ViewState, options: &'a FormOptions) -> Self {
        let description = Some(session.description()).filter(|text| !text.is_empty());
        Self::new(session.name(), session.state(), session.fields(), view, options)
            .with_description(description)
    }

    pub fn with_description(mut self, description: Option<&'a str>) -> Self {
        self.description = description;
        self
    }

    pub fn with_status(mut self, status: &'a StatusLine) -> Self {
        self.status = Some(status);
        self
    }

    pub fn with_scroll(mut self, scroll: u16) -> Self {
        self.scroll = scroll;
        self
    }

    fn lines(&self) -> Vec<Line<'static>> {
        let mut lines = Vec::new();
        if let Some(description) = self.description {
            lines.push(Line::from(Span::styled(
                description.to_string(),
                Style::default().fg(Color::Gray),
            )));
            lines.push(Line::default());
        }
        lines.extend(form_lines(self.state, self.schema, self.view, self.options));
        lines
    }
}

impl Widget for FormView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                format!(" {} ", self.title),
                Style::default().add_modifier(Modifier::BOLD),
            ));
        if let Some(status) = self.status {
            let color = match status.kind() {
                StatusKind::Info => Color::Gray,
                StatusKind::Success => Color::Green,
                StatusKind::Error => Color::Red,
            };
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", status.message()),
                Style::default().fg(color),
            )));
        }
        Paragraph::new(self.lines())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll, 0))
            .render(area, buf);
    }
}
