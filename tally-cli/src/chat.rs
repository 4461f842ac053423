use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph, Wrap},
    Terminal,
};
use std::io::{self, BufRead, IsTerminal, Stdout, Write};
use tally_core::{ChartData, Message, Reply, Session};

use crate::config::Config;
use crate::period::PeriodSource;
use crate::render::text_chart;
use crate::slash::{handle_slash, Slash};
use crate::transcript::Transcript;

const GREETING: &str = "Hi, I'm Tally. Tell me your month like: income=50,000, food=18,000, rent=15000";

/// What the chart pane shows
#[derive(Debug, Clone, PartialEq)]
pub enum ChartPane {
    Empty,
    Skipped(&'static str),
    Chart(ChartData),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Quit,
}

/// Chat state shared by the TUI and line mode.
pub struct ChatApp {
    session: Session,
    period: PeriodSource,
    transcript: Transcript,
    /// Session messages plus slash-command exchanges, in display order
    display: Vec<Message>,
    chart: ChartPane,
}

impl ChatApp {
    pub fn new(cfg: &Config, period: PeriodSource, transcript: Transcript) -> Self {
        Self {
            session: Session::new(cfg.evaluator()),
            period,
            transcript,
            display: vec![Message::Assistant(GREETING.to_string())],
            chart: ChartPane::Empty,
        }
    }

    pub fn display(&self) -> &[Message] {
        &self.display
    }

    pub fn chart(&self) -> &ChartPane {
        &self.chart
    }

    pub fn handle_line(&mut self, line: &str) -> Result<Step> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Ok(Step::Continue);
        }

        if let Some(slash) = handle_slash(trimmed, &self.session) {
            let Slash::Reply(reply) = slash else {
                return Ok(Step::Quit);
            };
            for m in [
                Message::User(trimmed.to_string()),
                Message::Assistant(reply),
            ] {
                self.transcript.append_message(&m)?;
                self.display.push(m);
            }
            return Ok(Step::Continue);
        }

        let period = self.period.label()?;
        let before = self.session.messages().len();
        let reply = self.session.submit(trimmed, &period);

        for m in &self.session.messages()[before..] {
            self.transcript.append_message(m)?;
            self.display.push(m.clone());
        }

        match &reply {
            Reply::Guidance { .. } => {
                tracing::info!(period = %period, "no usable data; sent guidance");
            }
            Reply::Summary { evaluation } => {
                tracing::info!(
                    period = %period,
                    recognized = evaluation.recognized.len(),
                    months = self.session.history().len(),
                    "recorded month"
                );
                self.chart = match &evaluation.chart {
                    Some(c) => ChartPane::Chart(c.clone()),
                    None => ChartPane::Skipped(evaluation.chart_notice().unwrap_or_default()),
                };
            }
        }
        Ok(Step::Continue)
    }
}

pub fn run_chat(mut app: ChatApp) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = chat_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

fn chat_loop(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut ChatApp) -> Result<()> {
    let mut input = String::new();
    app.transcript.append_system("session_start")?;

    loop {
        terminal.draw(|f| {
            let size = f.area();
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(4),
                    Constraint::Min(6),
                    Constraint::Length(9),
                    Constraint::Length(3),
                ])
                .split(size);

            let splash = Paragraph::new(Text::from(vec![
                Line::from(Span::styled(
                    "Tally",
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "Enter=send  Esc=quit  /help for commands",
                    Style::default().fg(Color::Gray),
                )),
            ]))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
            f.render_widget(splash, chunks[0]);

            let lines = conversation_lines(app.display());
            let visible = chunks[1].height.saturating_sub(2) as usize;
            let scroll = lines.len().saturating_sub(visible) as u16;
            let history = Paragraph::new(Text::from(lines))
                .block(Block::default().borders(Borders::ALL).title("conversation"))
                .wrap(Wrap { trim: false })
                .scroll((scroll, 0));
            f.render_widget(history, chunks[1]);

            let chart_block = Block::default().borders(Borders::ALL).title("expenses");
            match app.chart() {
                ChartPane::Chart(chart) => {
                    let bars: Vec<Bar> = chart
                        .iter()
                        .zip(chart.percentages())
                        .map(|((label, value), pct)| {
                            Bar::default()
                                .value(value.max(0) as u64)
                                .label(Line::from(label.to_string()))
                                .text_value(format!("{pct:.1}%"))
                        })
                        .collect();
                    let widget = BarChart::default()
                        .block(chart_block)
                        .data(BarGroup::default().bars(&bars))
                        .bar_width(13)
                        .bar_gap(1)
                        .bar_style(Style::default().fg(Color::Cyan))
                        .value_style(Style::default().fg(Color::Black).bg(Color::Cyan));
                    f.render_widget(widget, chunks[2]);
                }
                ChartPane::Skipped(notice) => {
                    let p = Paragraph::new(*notice)
                        .style(Style::default().fg(Color::Gray))
                        .block(chart_block);
                    f.render_widget(p, chunks[2]);
                }
                ChartPane::Empty => {
                    f.render_widget(chart_block, chunks[2]);
                }
            }

            let input_widget = Paragraph::new(input.as_str())
                .block(Block::default().borders(Borders::ALL).title("message"))
                .style(Style::default().fg(Color::White));
            f.render_widget(input_widget, chunks[3]);
        })?;

        if event::poll(std::time::Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Esc => break,
                    KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                    KeyCode::Enter => {
                        let line = std::mem::take(&mut input);
                        if app.handle_line(&line)? == Step::Quit {
                            break;
                        }
                    }
                    KeyCode::Backspace => {
                        input.pop();
                    }
                    KeyCode::Char(c) => {
                        input.push(c);
                    }
                    _ => {}
                }
            }
        }
    }

    app.transcript.append_system("session_end")?;
    Ok(())
}

fn conversation_lines(messages: &[Message]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for m in messages {
        let (tag, color, body) = match m {
            Message::User(text) => ("you", Color::Cyan, text.clone()),
            Message::Assistant(text) => ("tally", Color::Magenta, text.clone()),
            Message::Chart(chart) => ("chart", Color::Gray, text_chart(chart)),
        };
        for (i, l) in body.lines().enumerate() {
            if i == 0 {
                lines.push(Line::from(vec![
                    Span::styled(format!("{tag}: "), Style::default().fg(color)),
                    Span::raw(l.to_string()),
                ]));
            } else {
                lines.push(Line::raw(format!("  {l}")));
            }
        }
        lines.push(Line::raw(""));
    }
    lines
}

/// Line-oriented chat over stdin/stdout, for pipes and dumb terminals.
pub fn run_plain(mut app: ChatApp) -> Result<()> {
    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut out = io::stdout();
    app.transcript.append_system("session_start")?;

    if interactive {
        writeln!(out, "{GREETING}\n")?;
    }

    let mut shown = app.display().len();
    loop {
        if interactive {
            write!(out, "you> ")?;
            out.flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let step = app.handle_line(&line)?;

        for m in &app.display()[shown..] {
            match m {
                Message::User(_) => {}
                Message::Assistant(text) => writeln!(out, "{text}\n")?,
                Message::Chart(chart) => writeln!(out, "{}\n", text_chart(chart))?,
            }
        }
        shown = app.display().len();

        if step == Step::Quit {
            break;
        }
    }

    app.transcript.append_system("session_end")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::CHART_SKIPPED;

    fn app() -> ChatApp {
        let period = PeriodSource::Fixed("March 2024".to_string());
        let transcript = Transcript::open(false).unwrap();
        ChatApp::new(&Config::default(), period, transcript)
    }

    #[test]
    fn test_summary_updates_chart_pane() {
        let mut a = app();
        assert_eq!(a.chart(), &ChartPane::Empty);

        a.handle_line("income=1000 food=300").unwrap();
        assert!(matches!(a.chart(), ChartPane::Chart(_)));

        a.handle_line("income=1000").unwrap();
        assert_eq!(a.chart(), &ChartPane::Skipped(CHART_SKIPPED));

        // guidance leaves the last chart in place
        a.handle_line("hello").unwrap();
        assert_eq!(a.chart(), &ChartPane::Skipped(CHART_SKIPPED));
    }

    #[test]
    fn test_slash_commands_do_not_touch_session() {
        let mut a = app();
        assert_eq!(a.handle_line("/keys").unwrap(), Step::Continue);
        assert_eq!(a.display().len(), 3);
        assert!(a.session.messages().is_empty());
        assert_eq!(a.handle_line("/quit").unwrap(), Step::Quit);
    }

    #[test]
    fn test_blank_line_ignored() {
        let mut a = app();
        assert_eq!(a.handle_line("   ").unwrap(), Step::Continue);
        assert_eq!(a.display().len(), 1);
    }

    #[test]
    fn test_conversation_lines_split_multiline_replies() {
        let lines = conversation_lines(&[Message::Assistant("a\nb".to_string())]);
        assert_eq!(lines.len(), 3);
    }
}
