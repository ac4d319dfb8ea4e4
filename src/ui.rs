pub mod charting;

use std::ops::Range;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{Axis, Block, Borders, Chart, Clear, Dataset, GraphType, Paragraph, Widget, Wrap},
};
use itertools::Itertools;
use unicode_width::UnicodeWidthChar;

use crate::app::{App, Modal};
use crate::engine::Clock;
use crate::language::ContentProvider;
use crate::session::{LetterStatus, Mode, SessionState, Word};
use crate::stats::Stats;
use crate::theme::Palette;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

/// Lines of words visible at once; the cursor sits on the second once the
/// first line has been typed.
const VISIBLE_LINES: usize = 3;

impl<P: ContentProvider, C: Clock> Widget for &App<P, C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let palette = self.theme().palette();
        Block::default()
            .style(Style::default().bg(palette.bg).fg(palette.text))
            .render(area, buf);

        match self.summary() {
            Some(stats) => render_results(self.session(), stats, &palette, area, buf),
            None => render_typing(self, &palette, area, buf),
        }

        match self.modal() {
            Some(Modal::Shortcuts) => render_shortcuts(&palette, area, buf),
            Some(Modal::CustomText(text)) => render_custom_text(text, &palette, area, buf),
            None => {}
        }
    }
}

fn word_width(word: &Word) -> usize {
    word.letters
        .iter()
        .map(|l| l.char.width().unwrap_or(0))
        .sum::<usize>()
        .max(1)
}

/// Groups word indices into lines no wider than `width`, one space between
/// words. A word wider than the line gets a line of its own.
pub fn wrap_words(words: &[Word], width: usize) -> Vec<Range<usize>> {
    let mut lines = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (idx, word) in words.iter().enumerate() {
        let w = word_width(word);
        if idx > start && used + 1 + w > width {
            lines.push(start..idx);
            start = idx;
            used = w;
        } else if idx == start {
            used = w;
        } else {
            used += 1 + w;
        }
    }
    if start < words.len() {
        lines.push(start..words.len());
    }
    lines
}

/// The slice of `lines` to show so the line holding `word_index` stays in view.
pub fn visible_lines(lines: &[Range<usize>], word_index: usize) -> Range<usize> {
    let current = lines
        .iter()
        .position(|l| l.contains(&word_index))
        .unwrap_or(lines.len().saturating_sub(1));
    let first = current.saturating_sub(1);
    first..(first + VISIBLE_LINES).min(lines.len())
}

fn letter_style(status: LetterStatus, palette: &Palette) -> Style {
    let fg = match status {
        LetterStatus::Pending => palette.sub,
        LetterStatus::Correct => palette.text,
        LetterStatus::Incorrect => palette.error,
        LetterStatus::Extra => palette.error_extra,
    };
    Style::default().fg(fg)
}

fn word_lines(state: &SessionState, palette: &Palette, width: usize) -> Vec<Line<'static>> {
    let caret = Style::default()
        .fg(palette.bg)
        .bg(palette.main)
        .add_modifier(Modifier::BOLD);
    let cursor = state.cursor;
    let show_caret = !state.is_finished();

    let lines = wrap_words(&state.words, width);
    lines[visible_lines(&lines, cursor.word_index)]
        .iter()
        .map(|range| {
            let mut spans = Vec::new();
            for idx in range.clone() {
                let word = &state.words[idx];
                let here = show_caret && idx == cursor.word_index;
                for (i, letter) in word.letters.iter().enumerate() {
                    let style = if here && i == cursor.letter_index {
                        caret
                    } else {
                        letter_style(letter.status, palette)
                    };
                    spans.push(Span::styled(letter.char.to_string(), style));
                }
                let gap = if here && cursor.letter_index >= word.len() {
                    caret
                } else {
                    Style::default()
                };
                spans.push(Span::styled(" ", gap));
            }
            Line::from(spans)
        })
        .collect()
}

fn config_bar(state: &SessionState, palette: &Palette) -> Line<'static> {
    let active = Style::default()
        .fg(palette.main)
        .add_modifier(Modifier::BOLD);
    let idle = Style::default().fg(palette.sub);

    let mut spans: Vec<Span> = Mode::ALL
        .iter()
        .map(|m| {
            let style = if *m == state.mode { active } else { idle };
            Span::styled(format!("{m} "), style)
        })
        .collect();

    let presets = state.mode.defaults().presets;
    if !presets.is_empty() {
        spans.push(Span::styled("| ", idle));
        for p in presets {
            let style = if *p == state.config { active } else { idle };
            spans.push(Span::styled(format!("{p} "), style));
        }
    }
    spans.push(Span::styled(format!("| {}", state.language), idle));
    Line::from(spans)
}

fn progress(state: &SessionState) -> String {
    match state.mode {
        Mode::Time => state.time_remaining.to_string(),
        Mode::Zen => "∞".to_string(),
        _ => format!("{}/{}", state.cursor.word_index, state.words.len()),
    }
}

fn render_typing<P: ContentProvider, C: Clock>(
    app: &App<P, C>,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let state = app.session();
    let [bar, _, counter, words, _, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(VISIBLE_LINES as u16),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .horizontal_margin(HORIZONTAL_MARGIN)
    .vertical_margin(1)
    .areas(area);

    let sub = Style::default().fg(palette.sub);
    let main = Style::default()
        .fg(palette.main)
        .add_modifier(Modifier::BOLD);

    if !state.is_running() {
        Paragraph::new(config_bar(state, palette))
            .alignment(Alignment::Center)
            .render(bar, buf);
    }

    let mut status = vec![Span::styled(progress(state), main)];
    if app.show_live_wpm() && state.is_running() {
        status.push(Span::styled(format!("  {} wpm", app.live_wpm()), sub));
    }
    Paragraph::new(Line::from(status)).render(counter, buf);

    Paragraph::new(word_lines(state, palette, words.width as usize)).render(words, buf);

    Paragraph::new(Span::styled("tab - restart   ctrl+k - shortcuts", sub))
        .alignment(Alignment::Center)
        .render(hint, buf);
}

fn render_results(
    state: &SessionState,
    stats: &Stats,
    palette: &Palette,
    area: Rect,
    buf: &mut Buffer,
) {
    let [headline, chart_area, test_type, details, _, hint] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .horizontal_margin(HORIZONTAL_MARGIN)
    .vertical_margin(VERTICAL_MARGIN)
    .areas(area);

    let label = Style::default().fg(palette.sub);
    let value = Style::default()
        .fg(palette.main)
        .add_modifier(Modifier::BOLD);

    Paragraph::new(Line::from(vec![
        Span::styled("wpm ", label),
        Span::styled(stats.wpm.to_string(), value),
        Span::styled("   acc ", label),
        Span::styled(format!("{}%", stats.accuracy), value),
    ]))
    .render(headline, buf);

    let points = charting::chart_points(&state.wpm_history);
    let (duration, highest) = charting::compute_chart_params(&points, stats.elapsed_secs);
    let datasets = vec![Dataset::default()
        .marker(Marker::Braille)
        .style(Style::default().fg(palette.main))
        .graph_type(GraphType::Line)
        .data(&points)];
    Chart::new(datasets)
        .style(Style::default().fg(palette.sub))
        .x_axis(
            Axis::default()
                .title("seconds")
                .bounds([0.0, duration])
                .labels(vec![
                    Span::styled("0", label),
                    Span::styled(charting::format_label(duration), label),
                ]),
        )
        .y_axis(
            Axis::default()
                .title("wpm")
                .bounds([0.0, highest])
                .labels(vec![
                    Span::styled("0", label),
                    Span::styled(charting::format_label(highest), label),
                ]),
        )
        .render(chart_area, buf);

    let config = if stats.mode.uses_config() {
        format!(" {}", stats.config)
    } else {
        String::new()
    };
    Paragraph::new(Line::from(vec![
        Span::styled("test type ", label),
        Span::styled(format!("{}{} {}", stats.mode, config, stats.language), value),
    ]))
    .render(test_type, buf);

    Paragraph::new(Line::from(vec![
        Span::styled("raw ", label),
        Span::styled(stats.raw_wpm.to_string(), value),
        Span::styled("   characters ", label),
        Span::styled(
            [stats.correct_chars, stats.incorrect_chars, stats.extra_chars, 0]
                .iter()
                .join("/"),
            value,
        ),
        Span::styled("   consistency ", label),
        Span::styled(format!("{}%", stats.consistency), value),
        Span::styled("   time ", label),
        Span::styled(format!("{}s", stats.elapsed_secs), value),
    ]))
    .wrap(Wrap { trim: true })
    .render(details, buf);

    Paragraph::new(Span::styled("tab - restart   esc - quit", label))
        .alignment(Alignment::Center)
        .render(hint, buf);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn modal_block(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.main))
        .style(Style::default().bg(palette.bg).fg(palette.text))
}

const SHORTCUTS: [(&str, &str); 10] = [
    ("tab", "restart test"),
    ("left / right", "change mode"),
    ("up / down", "change length"),
    ("ctrl+t", "next theme"),
    ("ctrl+s", "toggle sound"),
    ("ctrl+l", "next language"),
    ("ctrl+e", "custom text"),
    ("ctrl+w", "live wpm"),
    ("esc", "close / quit"),
    ("ctrl+c", "quit"),
];

const ABOUT: &str = "a minimalist typing test";

fn render_shortcuts(palette: &Palette, area: Rect, buf: &mut Buffer) {
    let popup = centered(area, 40, SHORTCUTS.len() as u16 + 5);
    let key = Style::default().fg(palette.main);
    let mut lines = vec![
        Line::from(vec![
            Span::styled("minitype ", key.add_modifier(Modifier::BOLD)),
            Span::raw(concat!("v", env!("CARGO_PKG_VERSION"))),
        ])
        .centered(),
        Line::from(Span::styled(ABOUT, Style::default().fg(palette.sub))).centered(),
        Line::default(),
    ];
    lines.extend(
        SHORTCUTS
            .iter()
            .map(|(k, what)| Line::from(vec![Span::styled(format!("{k:>14}  "), key), Span::raw(*what)])),
    );

    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(modal_block("shortcuts", palette))
        .render(popup, buf);
}

fn render_custom_text(text: &str, palette: &Palette, area: Rect, buf: &mut Buffer) {
    let popup = centered(area, area.width.saturating_sub(10).max(20), 8);
    let hint = Style::default().fg(palette.sub);
    let lines = vec![
        Line::from(vec![
            Span::raw(text.to_string()),
            Span::styled("_", Style::default().fg(palette.main)),
        ]),
        Line::default(),
        Line::from(Span::styled("enter - apply   esc - cancel", hint)),
    ];

    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(modal_block("custom text", palette))
        .wrap(Wrap { trim: false })
        .render(popup, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::config::MemoryStore;
    use crate::engine::{Engine, ManualClock};
    use crate::language::ScriptedProvider;
    use crate::runtime::AppEvent;
    use crate::sound::Silent;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn app(words: &[&str], mode: Mode, config: u32) -> App<ScriptedProvider, ManualClock> {
        let seed = SessionState {
            mode,
            config,
            ..SessionState::default()
        };
        let engine = Engine::with_state(
            seed,
            ScriptedProvider::new(words.to_vec()),
            ManualClock::new(),
        );
        App::new(engine, Box::new(MemoryStore::new()), Box::new(Silent))
    }

    fn press(app: &mut App<ScriptedProvider, ManualClock>, code: KeyCode, mods: KeyModifiers) {
        app.handle(AppEvent::Key(KeyEvent::new(code, mods)));
    }

    fn draw(app: &App<ScriptedProvider, ManualClock>) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        app.render(area, &mut buf);
        buf.content.iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_wrap_words_breaks_at_width() {
        let words: Vec<Word> = ["aa", "bb", "cc"].into_iter().map(Word::from).collect();
        assert_eq!(wrap_words(&words, 5), vec![0..2, 2..3]);
        assert_eq!(wrap_words(&words, 80), vec![0..3]);
        assert_eq!(wrap_words(&words, 1), vec![0..1, 1..2, 2..3]);
        assert!(wrap_words(&[], 10).is_empty());
    }

    #[test]
    fn test_visible_lines_follow_cursor() {
        let lines = vec![0..2, 2..4, 4..6, 6..8, 8..10];
        assert_eq!(visible_lines(&lines, 0), 0..3);
        assert_eq!(visible_lines(&lines, 3), 0..3);
        assert_eq!(visible_lines(&lines, 5), 1..4);
        assert_eq!(visible_lines(&lines, 9), 3..5);
    }

    #[test]
    fn test_typing_screen_shows_counter_words_and_hint() {
        let app = app(&["alpha", "beta"], Mode::Words, 2);
        let screen = draw(&app);
        assert!(screen.contains("0/2"));
        assert!(screen.contains("alpha beta"));
        assert!(screen.contains("tab - restart"));
        assert!(screen.contains("words"));
    }

    #[test]
    fn test_zen_and_time_counters() {
        let screen = draw(&app(&["a"; 20], Mode::Zen, 25));
        assert!(screen.contains('∞'));

        let screen = draw(&app(&["a"; 20], Mode::Time, 15));
        assert!(screen.contains("15"));
    }

    #[test]
    fn test_results_screen_after_finishing() {
        let mut app = app(&["ok"], Mode::Words, 1);
        for c in "ok ".chars() {
            press(&mut app, KeyCode::Char(c), KeyModifiers::NONE);
        }
        let screen = draw(&app);
        assert!(screen.contains("acc"));
        assert!(screen.contains("100%"));
        assert!(screen.contains("characters"));
        assert!(screen.contains("2/0/0/0"));
        assert!(screen.contains("words 1 english"));
    }

    #[test]
    fn test_modals_render_on_top() {
        let mut app = app(&["a"], Mode::Words, 1);
        press(&mut app, KeyCode::Char('k'), KeyModifiers::CONTROL);
        let screen = draw(&app);
        assert!(screen.contains("shortcuts"));
        assert!(screen.contains(concat!("minitype v", env!("CARGO_PKG_VERSION"))));
        assert!(screen.contains(ABOUT));

        press(&mut app, KeyCode::Esc, KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('e'), KeyModifiers::CONTROL);
        press(&mut app, KeyCode::Char('h'), KeyModifiers::NONE);
        press(&mut app, KeyCode::Char('i'), KeyModifiers::NONE);
        let screen = draw(&app);
        assert!(screen.contains("custom text"));
        assert!(screen.contains("hi_"));
    }
}
