//! Main UI renderer

use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::{
    Axis, BarChart, Block, Borders, Cell, Chart, Clear, Dataset, GraphType, Paragraph, Row, Table,
    TableState, Tabs, Wrap,
};

use crate::core::stats::{creation_timeline, language_histogram, stars_vs_forks, RepoStats};
use crate::core::table::ExportTable;
use crate::render::ChartKind;
use crate::tui::app::{App, Screen, Tab};
use crate::tui::theme::Theme;

const SPINNER: &[&str] = &["\u{25d0}", "\u{25d3}", "\u{25d1}", "\u{25d2}"]; // ◐ ◓ ◑ ◒

/// Render the full UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(frame.area());

    render_header(frame, chunks[0], app);
    match app.screen {
        Screen::Login => render_login(frame, chunks[1], app),
        Screen::Main => render_content(frame, chunks[1], app),
    }
    render_status_bar(frame, chunks[2], app);

    if app.show_help {
        render_help_overlay(frame, app);
    }
    if app.error_popup.is_some() {
        render_error_popup(frame, app);
    }
}

/// Render the header: title, account and tab strip
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    if app.screen == Screen::Login {
        let header = Paragraph::new(" streamgit │ Sign in ")
            .style(Theme::header())
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
        return;
    }

    let account = app.login.as_deref().unwrap_or("…");
    let titles: Vec<Line> = Tab::ALL
        .iter()
        .enumerate()
        .map(|(i, t)| Line::from(format!("{} {}", i + 1, t.title())))
        .collect();

    let tabs = Tabs::new(titles)
        .select(app.tab.index())
        .style(Theme::header())
        .highlight_style(Theme::tab_active())
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .title(format!(" streamgit │ {} ", account)),
        );

    frame.render_widget(tabs, area);
}

fn render_login(frame: &mut Frame, area: Rect, app: &App) {
    let masked = "•".repeat(app.token_input.chars().count());

    let text = vec![
        Line::from(""),
        Line::from("  No GitHub token found in the secrets file or GITHUB_TOKEN."),
        Line::from("  Paste a personal access token to continue. It is kept in memory only."),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Token: ", Theme::label()),
            Span::raw(masked),
            Span::styled("▏", Theme::muted()),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "  Enter to sign in │ Esc to quit",
            Theme::muted(),
        )),
    ];

    let paragraph = Paragraph::new(text).block(
        Block::default()
            .title(" Authentication ")
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

/// Render the main content area based on current tab
fn render_content(frame: &mut Frame, area: Rect, app: &App) {
    match app.tab {
        Tab::Statistics => render_statistics(frame, area, app),
        Tab::Activity => render_activity(frame, area, app),
        Tab::Repositories => render_repositories(frame, area, app),
        Tab::Visualizations => render_visualizations(frame, area, app),
        Tab::Starred => render_starred(frame, area, app),
        Tab::Create => render_create(frame, area, app),
        Tab::Delete => render_delete(frame, area, app),
    }
}

fn render_statistics(frame: &mut Frame, area: Rect, app: &App) {
    if app.repos.is_empty() {
        return render_placeholder(frame, area, "Statistics", &empty_message(app));
    }

    let stats = RepoStats::compute(&app.repos, app.login.as_deref().unwrap_or_default());

    let mut lines: Vec<Line> = vec![Line::from("")];
    lines.extend(stats.entries().into_iter().map(|(label, value)| {
        Line::from(vec![
            Span::styled(format!("  {:<28}", label), Theme::label()),
            Span::styled(value.to_string(), Theme::value()),
        ])
    }));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<28}", "Stars"), Theme::label()),
        Span::styled(
            format!("★ {}", stats.total_stars),
            Theme::stars(),
        ),
    ]));
    lines.push(Line::from(vec![
        Span::styled(format!("  {:<28}", "Forks"), Theme::label()),
        Span::raw(stats.total_forks.to_string()),
    ]));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Statistics ")
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

fn render_activity(frame: &mut Frame, area: Rect, app: &App) {
    if app.commits.is_empty() {
        return render_placeholder(frame, area, "Recent Activity", &empty_message(app));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);

    let mut summary = Vec::new();
    if let Some(split) = app.commit_split() {
        summary.push(Span::styled(" You: ", Theme::label()));
        summary.push(Span::styled(
            format!("{} commits in {} repos", split.mine, split.mine_repos),
            Theme::value(),
        ));
        summary.push(Span::styled("  │  Others: ", Theme::label()));
        summary.push(Span::styled(
            format!("{} commits in {} repos", split.others, split.others_repos),
            Theme::value(),
        ));
    }
    let filter = if app.only_mine { "only mine" } else { "all" };
    summary.push(Span::styled(format!("  │  m: {}", filter), Theme::muted()));
    frame.render_widget(Paragraph::new(Line::from(summary)), chunks[0]);

    let commits = app.visible_commits();
    if commits.is_empty() {
        return render_placeholder(
            frame,
            chunks[1],
            "Recent Activity",
            "None of these commits are yours. Press m to show all commits.",
        );
    }

    let rows = commits.into_iter().map(|c| {
        Row::new(vec![
            c.date
                .map(|d| d.format("%Y-%m-%d %H:%M").to_string())
                .unwrap_or_default(),
            c.repository.clone(),
            c.short_sha().to_string(),
            c.author.clone(),
            c.summary().to_string(),
        ])
    });

    let widths = [
        Constraint::Length(16),
        Constraint::Length(28),
        Constraint::Length(8),
        Constraint::Length(18),
        Constraint::Min(20),
    ];

    let title = format!(" Recent Activity │ {} repositories ", app.recent.len());
    render_table(
        frame,
        chunks[1],
        app,
        &title,
        ["Date", "Repository", "SHA", "Author", "Message"],
        rows,
        &widths,
    );
}

fn render_repositories(frame: &mut Frame, area: Rect, app: &App) {
    if app.repos.is_empty() {
        return render_placeholder(frame, area, "Repositories", &empty_message(app));
    }

    let rows = app.repos.iter().map(|r| {
        let visibility = if r.private { "private" } else { "public" };
        Row::new(vec![
            Cell::from(r.full_name.clone()),
            Cell::from(r.language.clone().unwrap_or_default()),
            Cell::from(visibility).style(Theme::visibility(r.private)),
            Cell::from(r.stars.to_string()).style(Theme::stars()),
            Cell::from(r.forks.to_string()),
            Cell::from(r.updated_at.format("%Y-%m-%d").to_string()),
        ])
    });

    let widths = [
        Constraint::Min(24),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Length(7),
        Constraint::Length(7),
        Constraint::Length(11),
    ];

    let title = format!(" Repositories │ {} ", app.repos.len());
    render_table(
        frame,
        area,
        app,
        &title,
        ["Name", "Language", "Visibility", "Stars", "Forks", "Updated"],
        rows,
        &widths,
    );
}

fn render_starred(frame: &mut Frame, area: Rect, app: &App) {
    if app.starred.is_empty() {
        return render_placeholder(frame, area, "Starred", &empty_message(app));
    }

    let rows = app.starred.iter().map(|r| {
        Row::new(vec![
            r.full_name.clone(),
            r.language.clone().unwrap_or_else(|| "Unknown".to_string()),
            r.stars.to_string(),
            r.description.clone().unwrap_or_default(),
        ])
    });

    let widths = [
        Constraint::Length(32),
        Constraint::Length(14),
        Constraint::Length(8),
        Constraint::Min(20),
    ];

    let title = format!(" Starred │ {} ", app.starred.len());
    render_table(
        frame,
        area,
        app,
        &title,
        ["Repository", "Language", "Stars", "Description"],
        rows,
        &widths,
    );
}

fn render_table<'a, const N: usize>(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    title: &str,
    header: [&'a str; N],
    rows: impl Iterator<Item = Row<'a>>,
    widths: &[Constraint],
) {
    let header = Row::new(header.to_vec()).style(Theme::label().add_modifier(Modifier::BOLD));

    let table = Table::new(rows, widths.to_vec())
        .header(header)
        .row_highlight_style(Theme::selected())
        .block(Block::default().title(title.to_string()).borders(Borders::ALL));

    let mut state = TableState::default().with_selected(Some(app.selection.selected));
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_visualizations(frame: &mut Frame, area: Rect, app: &App) {
    if app.repos.is_empty() {
        return render_placeholder(frame, area, "Visualizations", &empty_message(app));
    }

    let table = ExportTable::repositories(&app.repos, app.login.as_deref().unwrap_or_default());
    let title = format!(" {} │ j/k to switch, p to save PNG ", app.chart.title());
    let block = Block::default().title(title).borders(Borders::ALL);

    match app.chart {
        ChartKind::LanguageDistribution => {
            render_bar_chart(frame, area, block, language_histogram(&table))
        }
        ChartKind::CreationTimeline => {
            render_bar_chart(frame, area, block, creation_timeline(&table))
        }
        ChartKind::StarsVsForks => {
            let points: Vec<(f64, f64)> = stars_vs_forks(&table)
                .iter()
                .map(|p| (p.stars as f64, p.forks as f64))
                .collect();

            let max_x = points.iter().map(|p| p.0).fold(1.0, f64::max);
            let max_y = points.iter().map(|p| p.1).fold(1.0, f64::max);

            let dataset = Dataset::default()
                .name("repositories")
                .marker(symbols::Marker::Dot)
                .graph_type(GraphType::Scatter)
                .style(Theme::stars())
                .data(&points);

            let chart = Chart::new(vec![dataset])
                .block(block)
                .x_axis(
                    Axis::default()
                        .title("Stars")
                        .style(Theme::muted())
                        .bounds([0.0, max_x])
                        .labels(["0".to_string(), format!("{}", max_x)]),
                )
                .y_axis(
                    Axis::default()
                        .title("Forks")
                        .style(Theme::muted())
                        .bounds([0.0, max_y])
                        .labels(["0".to_string(), format!("{}", max_y)]),
                );

            frame.render_widget(chart, area);
        }
    }
}

fn render_bar_chart(frame: &mut Frame, area: Rect, block: Block, series: Vec<(String, usize)>) {
    let data: Vec<(&str, u64)> = series
        .iter()
        .map(|(label, count)| (label.as_str(), *count as u64))
        .collect();

    let chart = BarChart::default()
        .block(block)
        .data(data.as_slice())
        .bar_width(9)
        .bar_gap(1)
        .bar_style(Style::default().fg(Theme::PRIMARY))
        .value_style(Theme::selected());

    frame.render_widget(chart, area);
}

fn render_create(frame: &mut Frame, area: Rect, app: &App) {
    let form = &app.create_form;

    let field = |idx: usize, label: &str, value: String| {
        let marker = if form.field == idx { "▸ " } else { "  " };
        let style = if form.field == idx {
            Theme::tab_active()
        } else {
            Style::default()
        };
        Line::from(vec![
            Span::styled(format!("{}{:<14}", marker, label), Theme::label()),
            Span::styled(value, style),
        ])
    };
    let checkbox = |on: bool| if on { "[x]".to_string() } else { "[ ]".to_string() };

    let mut lines = vec![
        Line::from(""),
        field(0, "Name", form.name.clone()),
        field(1, "Description", form.description.clone()),
        field(2, "Private", checkbox(form.private)),
        field(3, "Initialize", checkbox(form.auto_init)),
        Line::from(""),
    ];

    lines.push(Line::from(Span::styled(
        "  ↑/↓ field │ Space toggle │ Enter create │ Esc clear │ Tab next tab",
        Theme::muted(),
    )));

    let paragraph = Paragraph::new(lines).block(
        Block::default()
            .title(" Create Repository ")
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

fn render_delete(frame: &mut Frame, area: Rect, app: &App) {
    let owned = app.owned_repos();
    if owned.is_empty() {
        return render_placeholder(frame, area, "Delete Repository", &empty_message(app));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(4)])
        .split(area);

    let rows = owned.iter().map(|r| {
        Row::new(vec![
            r.name.clone(),
            if r.private { "private" } else { "public" }.to_string(),
            r.updated_at.format("%Y-%m-%d").to_string(),
        ])
    });
    let widths = [
        Constraint::Min(24),
        Constraint::Length(8),
        Constraint::Length(11),
    ];
    render_table(
        frame,
        chunks[0],
        app,
        " Delete Repository │ owned by you ",
        ["Name", "Visibility", "Updated"],
        rows,
        &widths,
    );

    let target = owned
        .get(app.selection.selected)
        .map(|r| r.name.as_str())
        .unwrap_or_default();

    let confirm = Paragraph::new(vec![
        Line::from(vec![
            Span::styled(" Type ", Theme::muted()),
            Span::styled(target.to_string(), Theme::error()),
            Span::styled(" to confirm: ", Theme::muted()),
            Span::raw(app.delete_confirm.clone()),
        ]),
        Line::from(Span::styled(
            " This cannot be undone. Enter to delete │ Esc to clear",
            Theme::muted(),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(confirm, chunks[1]);
}

fn empty_message(app: &App) -> String {
    if app.loading {
        let spinner = SPINNER[app.tick_counter % SPINNER.len()];
        format!("{} Loading...", spinner)
    } else {
        "Nothing to show. Press r to refresh.".to_string()
    }
}

fn render_placeholder(frame: &mut Frame, area: Rect, title: &str, message: &str) {
    let paragraph = Paragraph::new(format!("\n  {}", message)).block(
        Block::default()
            .title(format!(" {} ", title))
            .borders(Borders::ALL),
    );
    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let token = match (app.credential_source(), app.masked_token()) {
        (Some(source), Some(masked)) => format!("{} ({})", masked, source),
        _ => "not signed in".to_string(),
    };

    let status_text = match &app.status_message {
        Some(msg) if app.loading => {
            format!(" {} {}", SPINNER[app.tick_counter % SPINNER.len()], msg)
        }
        Some(msg) => format!(" {} │ {}", msg, token),
        None => format!(" Token: {} │ ? for help ", token),
    };

    let status = Paragraph::new(status_text)
        .style(Theme::status_bar())
        .block(Block::default().borders(Borders::TOP));

    frame.render_widget(status, area);
}

/// Area of `percent_x` by `max_height` centred in `area`
fn popup_area(area: Rect, percent_x: u16, max_width: u16, max_height: u16) -> Rect {
    let width = (area.width * percent_x / 100).min(max_width);
    let height = max_height.min(area.height);
    let x = area.width.saturating_sub(width) / 2;
    let y = area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

fn render_error_popup(frame: &mut Frame, app: &App) {
    let Some(popup) = &app.error_popup else {
        return;
    };
    let area = popup_area(frame.area(), 60, 70, 9);
    frame.render_widget(Clear, area);

    let body = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(popup.message.clone(), Theme::error())),
        Line::from(""),
        Line::from(Span::styled("Enter / Esc to dismiss", Theme::muted())),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(format!(" {} ", popup.title))
            .borders(Borders::ALL)
            .border_style(Theme::error()),
    )
    .style(Style::default().bg(Color::Black));

    frame.render_widget(body, area);
}

/// Render the help overlay
fn render_help_overlay(frame: &mut Frame, app: &App) {
    let area = popup_area(frame.area(), 60, 60, 18);
    frame.render_widget(Clear, area);

    let (title, help_lines) = get_help_content(app);

    let text: Vec<Line> = help_lines
        .into_iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("  {:12}", key), Style::default().fg(Theme::PRIMARY)),
                Span::raw(desc),
            ])
        })
        .collect();

    let help = Paragraph::new(text)
        .block(
            Block::default()
                .title(format!(" {} ", title))
                .borders(Borders::ALL)
                .border_style(Theme::stars()),
        )
        .style(Style::default().bg(Color::Black));

    frame.render_widget(help, area);
}

fn get_help_content(app: &App) -> (&'static str, Vec<(&'static str, &'static str)>) {
    if app.screen == Screen::Login {
        return (
            "Help - Sign in",
            vec![("Enter", "Use the typed token"), ("Esc", "Quit")],
        );
    }

    let mut keys = vec![
        ("Tab / →", "Next tab"),
        ("S-Tab / ←", "Previous tab"),
        ("1-7", "Jump to tab"),
        ("j / ↓", "Move down"),
        ("k / ↑", "Move up"),
        ("r", "Refresh"),
        ("e", "Export table to CSV"),
        ("L", "Log out"),
        ("q", "Quit"),
        ("?", "Show this help"),
    ];
    if app.tab == Tab::Visualizations {
        keys.insert(5, ("p", "Save chart as PNG"));
    }
    if app.tab == Tab::Activity {
        keys.insert(5, ("m", "Only my commits"));
    }
    ("Help - Dashboard", keys)
}
