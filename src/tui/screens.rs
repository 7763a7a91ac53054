use crate::engine::{NavigationError, Progress, QuizSession};
use crate::flow::StepKind;
use crate::lead::{LeadField, LeadForm};
use crate::tui::navigation::{clamp_selection, NavState};
use chrono::Datelike;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, List, ListItem, Padding, Paragraph, Wrap};
use ratatui::Frame;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionBody {
    Choices { items: Vec<String>, selected: usize },
    Text { buffer: String, placeholder: String },
    Cta { text: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuestionViewModel {
    pub title: String,
    pub description: Option<String>,
    pub progress: Progress,
    pub body: QuestionBody,
    pub status_text: String,
    pub hint_text: String,
    pub footer: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeadFormViewModel {
    pub name: String,
    pub phone: String,
    pub focus: LeadField,
    pub submit_label: String,
    pub can_submit: bool,
}

pub fn footer_line(brand: &str) -> String {
    format!("{brand} © {}", chrono::Local::now().year())
}

pub fn project_question_view_model(
    session: &QuizSession,
    nav: &NavState,
    footer: &str,
) -> Result<QuestionViewModel, NavigationError> {
    let view = session.view()?;
    let step = view.step;
    let body = match step.kind {
        StepKind::SingleChoice => QuestionBody::Choices {
            items: step
                .options
                .iter()
                .map(|option| option.label.clone())
                .collect(),
            selected: clamp_selection(nav.selected, step.options.len()),
        },
        StepKind::TextInput => QuestionBody::Text {
            buffer: nav.text_buffer.clone(),
            placeholder: step.placeholder.clone().unwrap_or_default(),
        },
        StepKind::Info => QuestionBody::Cta {
            text: step.cta_text.clone().unwrap_or_default(),
        },
    };
    Ok(QuestionViewModel {
        title: step.question_text().to_string(),
        description: step.description.clone(),
        progress: view.progress,
        body,
        status_text: nav.status_text.clone(),
        hint_text: nav.hint_text.clone(),
        footer: footer.to_string(),
    })
}

pub fn project_lead_form_view_model(form: &LeadForm, focus: LeadField, sending: bool) -> LeadFormViewModel {
    LeadFormViewModel {
        name: form.name.clone(),
        phone: form.phone.clone(),
        focus,
        submit_label: if sending {
            "Enviando...".to_string()
        } else {
            "Falar Com o JP Agora".to_string()
        },
        can_submit: form.can_submit() && !sending,
    }
}

pub fn tail_for_display(value: &str, max_chars: usize) -> String {
    if max_chars == 0 {
        return String::new();
    }
    let chars: Vec<char> = value.chars().collect();
    if chars.len() <= max_chars {
        return value.to_string();
    }
    chars[chars.len() - max_chars..].iter().collect()
}

pub(crate) fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

fn highlighted() -> Style {
    Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD)
}

/// Draws the current question. `dimmed` renders the outgoing step during a
/// transition delay.
pub(crate) fn draw_question(frame: &mut Frame<'_>, view_model: &QuestionViewModel, dimmed: bool) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(4),
            Constraint::Min(6),
            Constraint::Length(4),
            Constraint::Length(1),
        ])
        .split(frame.area());

    let base = if dimmed {
        Style::default().add_modifier(Modifier::DIM)
    } else {
        Style::default()
    };

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::White))
        .ratio(view_model.progress.ratio().clamp(0.0, 1.0))
        .label(view_model.progress.to_string());
    frame.render_widget(gauge, chunks[0]);

    let mut header = vec![Line::from(Span::styled(
        view_model.title.clone(),
        base.fg(Color::Cyan).add_modifier(Modifier::BOLD),
    ))];
    if let Some(description) = &view_model.description {
        header.push(Line::from(Span::styled(
            description.clone(),
            base.fg(Color::Gray),
        )));
    }
    frame.render_widget(
        Paragraph::new(header)
            .wrap(Wrap { trim: true })
            .block(Block::default().padding(Padding::horizontal(2))),
        chunks[1],
    );

    match &view_model.body {
        QuestionBody::Choices { items, selected } => {
            let list_items = items
                .iter()
                .enumerate()
                .map(|(idx, label)| {
                    let item = ListItem::new(Line::from(Span::raw(label.clone())));
                    if idx == *selected && !dimmed {
                        item.style(highlighted())
                    } else {
                        item.style(base)
                    }
                })
                .collect::<Vec<_>>();
            frame.render_widget(List::new(list_items).block(main_panel_block()), chunks[2]);
        }
        QuestionBody::Text {
            buffer,
            placeholder,
        } => {
            let block = main_panel_block();
            let inner = block.inner(chunks[2]);
            let max_input_width = inner.width.saturating_sub(2) as usize;
            let line = if buffer.is_empty() {
                Line::from(Span::styled(
                    format!("> {placeholder}"),
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Line::from(format!("> {}", tail_for_display(buffer, max_input_width)))
            };
            frame.render_widget(Paragraph::new(line).style(base).block(block), chunks[2]);
            if !dimmed {
                let shown = tail_for_display(buffer, max_input_width).chars().count() as u16;
                frame.set_cursor_position((inner.x + 2 + shown, inner.y));
            }
        }
        QuestionBody::Cta { text } => {
            frame.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("[ {text} ]"),
                    if dimmed { base } else { highlighted() },
                )))
                .centered()
                .block(main_panel_block()),
                chunks[2],
            );
        }
    }

    let footer = Paragraph::new(vec![
        Line::from(view_model.hint_text.clone()),
        Line::from(format!("Status: {}", view_model.status_text)),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, chunks[3]);

    frame.render_widget(
        Paragraph::new(view_model.footer.clone())
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[4],
    );
}

pub(crate) fn draw_lead_form(
    frame: &mut Frame<'_>,
    question: &QuestionViewModel,
    form: &LeadFormViewModel,
) {
    draw_question(frame, question, true);

    let area = centered_rect(60, 50, frame.area());
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(2, 2, 1, 1));
    frame.render_widget(block.clone(), area);
    let inner = block.inner(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            "Quase lá!",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )))
        .centered(),
        rows[0],
    );

    let field_style = |field: LeadField| {
        if form.focus == field {
            highlighted()
        } else {
            Style::default()
        }
    };
    let max_width = rows[3].width.saturating_sub(2) as usize;
    let name = tail_for_display(&form.name, max_width);
    let phone = if form.phone.is_empty() {
        "(00) 00000-0000".to_string()
    } else {
        form.phone.clone()
    };

    frame.render_widget(
        Paragraph::new("NOME COMPLETO").style(field_style(LeadField::Name)),
        rows[2],
    );
    frame.render_widget(Paragraph::new(format!("> {name}")), rows[3]);
    frame.render_widget(
        Paragraph::new("WHATSAPP COM DDD").style(field_style(LeadField::Phone)),
        rows[4],
    );
    frame.render_widget(Paragraph::new(format!("> {phone}")), rows[5]);

    let submit_style = if form.can_submit {
        highlighted()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Paragraph::new(format!("[ {} ]", form.submit_label))
            .style(submit_style)
            .centered(),
        rows[7],
    );

    let cursor_row = match form.focus {
        LeadField::Name => (rows[3], name.chars().count()),
        LeadField::Phone => (rows[5], form.phone.chars().count()),
    };
    frame.set_cursor_position((cursor_row.0.x + 2 + cursor_row.1 as u16, cursor_row.0.y));
}

fn main_panel_block() -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .padding(Padding::new(3, 3, 1, 1))
}
