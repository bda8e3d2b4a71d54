use std::fs;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use fpl_transfer_terminal::config::{AnalysisConfig, DataSource, ProviderSettings};
use fpl_transfer_terminal::demo_feed::DemoProvider;
use fpl_transfer_terminal::feed;
use fpl_transfer_terminal::fixture_difficulty::format_run;
use fpl_transfer_terminal::fpl_fetch::{DataProvider, FplClient};
use fpl_transfer_terminal::http_cache::app_cache_dir;
use fpl_transfer_terminal::model::{Player, Recommendation};
use fpl_transfer_terminal::squad_export;
use fpl_transfer_terminal::state::{
    AppState, Delta, PlanOutcome, ProviderCommand, SQUAD_SLOTS, Tab, TransferRow, apply_delta,
};

struct App {
    state: AppState,
    settings: ProviderSettings,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
}

impl App {
    fn new(
        config: AnalysisConfig,
        settings: ProviderSettings,
        cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    ) -> Self {
        Self {
            state: AppState::new(config),
            settings,
            should_quit: false,
            cmd_tx,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('1') => self.state.tab = Tab::QuickAnalysis,
            KeyCode::Char('2') => self.state.tab = Tab::SquadPlan,
            KeyCode::Char('3') => self.state.tab = Tab::Compare,
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('l') | KeyCode::Right => self.state.cycle_slot_player(true),
            KeyCode::Char('h') | KeyCode::Left => self.state.cycle_slot_player(false),
            KeyCode::Char(']') => self.state.cycle_compare(true),
            KeyCode::Char('[') => self.state.cycle_compare(false),
            KeyCode::Char('+') | KeyCode::Char('=') => self.state.adjust_horizon(1),
            KeyCode::Char('-') => self.state.adjust_horizon(-1),
            KeyCode::Char('p') => self.state.cycle_position_filter(),
            KeyCode::Char('m') => {
                self.state.toggle_model();
                let label = self.state.config.model.label();
                self.state.push_log(format!("[INFO] Scoring model: {label}"));
            }
            KeyCode::Char('d') => {
                self.state.reset_default_squad();
                self.state.push_log("[INFO] Squad reset to defaults");
            }
            KeyCode::Char('r') => self.send(ProviderCommand::Reload, "Reload"),
            KeyCode::Char('L') => self.request_manager_team(),
            KeyCode::Char('e') => self.export(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            _ => {}
        }
    }

    fn send(&mut self, cmd: ProviderCommand, label: &str) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log(format!("[INFO] {label} unavailable"));
            return;
        };
        let reload = cmd == ProviderCommand::Reload;
        if tx.send(cmd).is_err() {
            self.state.push_log(format!("[WARN] {label} request failed"));
            return;
        }
        if reload {
            self.state.loading = true;
        }
        self.state.push_log(format!("[INFO] {label} request sent"));
    }

    fn request_manager_team(&mut self) {
        let Some(manager_id) = self.settings.manager_id else {
            self.state
                .push_log("[INFO] Set FPL_MANAGER_ID to load your team");
            return;
        };
        self.send(ProviderCommand::LoadManager(manager_id), "Manager team");
    }

    fn export(&mut self) {
        let path = Path::new(&self.settings.export_path).to_path_buf();
        match squad_export::export_squad_plan(&path, &self.state) {
            Ok(report) => self.state.push_log(format!(
                "[INFO] Exported {} transfers, {} squad rows to {}",
                report.transfers,
                report.squad,
                path.display()
            )),
            Err(err) => {
                error!(error = %format!("{err:#}"), "export failed");
                self.state.push_log(format!("[WARN] Export failed: {err}"));
            }
        }
    }
}

fn main() -> io::Result<()> {
    let _ = dotenvy::from_filename(".env.local");
    let _ = dotenvy::from_filename(".env");
    init_logging();

    let config = AnalysisConfig::from_env();
    let settings = ProviderSettings::from_env();
    info!(?config, source = ?settings.source, "starting dashboard");

    let provider: Box<dyn DataProvider + Send> = match settings.source {
        DataSource::Live => Box::new(FplClient::new(settings.api_base.clone())),
        DataSource::Demo => Box::new(DemoProvider::default()),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    if let Some(manager_id) = settings.manager_id {
        // Queued behind the initial snapshot load.
        let _ = cmd_tx.send(ProviderCommand::LoadManager(manager_id));
    }
    feed::spawn_provider(provider, tx, cmd_rx);

    let mut app = App::new(config, settings, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

/// Logs go to a file in the cache dir; stdout belongs to the terminal UI.
fn init_logging() {
    let Some(dir) = app_cache_dir() else {
        return;
    };
    if fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join("fpl_terminal.log"))
    else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fpl_transfer_terminal=info,fpl_terminal=info".into()),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(7),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(1)])
        .split(chunks[1]);
    render_squad(frame, body[0], &app.state);
    match app.state.tab {
        Tab::QuickAnalysis => render_quick_analysis(frame, body[1], &app.state),
        Tab::SquadPlan => render_squad_plan(frame, body[1], &app.state),
        Tab::Compare => render_compare(frame, body[1], &app.state),
    }

    render_console(frame, chunks[2], &app.state);

    let footer = Paragraph::new(footer_text(&app.state))
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.help_overlay {
        render_help_overlay(frame, frame.size(), app.state.config.good_threshold);
    }
}

fn header_text(state: &AppState) -> String {
    let gw = match &state.next_gameweek {
        Some(gw) => {
            let deadline = gw
                .deadline_time
                .as_deref()
                .map(format_deadline)
                .unwrap_or_else(|| "TBD".to_string());
            format!("GW{} deadline {deadline}", gw.id)
        }
        None => "GW -".to_string(),
    };
    let filter = state
        .position_filter
        .map(|p| p.code())
        .unwrap_or("own");
    let line1 = format!(
        " FPL TRANSFERS | {} | {gw} | Horizon {} | Model {} | Pos {filter}",
        tab_label(state.tab),
        state.config.games_ahead,
        state.config.model.label(),
    );
    let squad = state.squad_players();
    let loading = if state.loading { " | loading..." } else { "" };
    let line2 = format!(
        " Squad value {} | Bank {} | Players {}/{}{loading}",
        state.squad_value(),
        state.budget(),
        squad.len(),
        SQUAD_SLOTS.len(),
    );
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    match state.tab {
        Tab::QuickAnalysis => {
            "1/2/3 Tabs | j/k Slot | h/l Swap player | +/- Horizon | p Position | m Model | L Load team | e Export | ? Help | q Quit".to_string()
        }
        Tab::SquadPlan => {
            "1/2/3 Tabs | j/k Scroll | +/- Horizon | m Model | r Reload | e Export | ? Help | q Quit".to_string()
        }
        Tab::Compare => {
            "1/2/3 Tabs | j/k Slot | [/] Other player | p Position | ? Help | q Quit".to_string()
        }
    }
}

fn tab_label(tab: Tab) -> &'static str {
    match tab {
        Tab::QuickAnalysis => "QUICK ANALYSIS",
        Tab::SquadPlan => "SQUAD PLAN",
        Tab::Compare => "COMPARE",
    }
}

fn format_deadline(raw: &str) -> String {
    match DateTime::parse_from_rfc3339(raw.trim()) {
        Ok(dt) => dt.with_timezone(&Utc).format("%a %d %b %H:%M UTC").to_string(),
        Err(_) => raw.replace('T', " "),
    }
}

fn render_squad(frame: &mut Frame, area: Rect, state: &AppState) {
    let eval = state.evaluator();
    let mut lines = Vec::with_capacity(SQUAD_SLOTS.len());
    for (slot, position) in SQUAD_SLOTS.iter().enumerate() {
        let selected = slot == state.selected_slot;
        let style = if selected {
            Style::default().fg(Color::White).bg(Color::DarkGray)
        } else {
            Style::default()
        };
        let text = match state.slot_player(slot) {
            Some(p) => {
                let flag = if p.is_flagged() { "!" } else { " " };
                format!(
                    "{} {flag}{:<18} {:>6} {:>5.1}",
                    position.code(),
                    clip(&p.name, 18),
                    p.price.to_string(),
                    eval.expected_points(p)
                )
            }
            None => format!("{} -", position.code()),
        };
        lines.push(Line::from(Span::styled(text, style)));
    }
    let widget = Paragraph::new(lines).block(
        Block::default()
            .title(" Squad  pos  player  price  xP ")
            .borders(Borders::ALL),
    );
    frame.render_widget(widget, area);
}

fn render_quick_analysis(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title(" Quick Transfer Analysis ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(view) = state.quick_analysis() else {
        render_message(frame, inner, "Select your squad first (h/l on a slot)");
        return;
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(inner);

    let n = state.config.horizon();
    let a = view.outgoing_analysis;
    let run = format_run(state.index.upcoming(&view.outgoing.team, n));
    let summary = format!(
        "Replacing {} ({}, {}) {}\nForm {:.2} | FDR next {n}: {:.2} | Pos weight {:.2}x | xP {:.1} | vs {}\nNext: {}",
        view.outgoing.name,
        view.outgoing.team,
        view.outgoing.position,
        view.outgoing.price,
        a.form,
        a.average_difficulty,
        a.position_weight,
        a.expected_points,
        view.position,
        if run.is_empty() { "-".to_string() } else { run },
    );
    frame.render_widget(Paragraph::new(summary), sections[0]);

    if let Some(msg) = outcome_message(view.outcome, state) {
        let (table_area, msg_area) = split_message(sections[1], &view.outcome);
        render_message(frame, msg_area, &msg);
        if view.rows.is_empty() {
            return;
        }
        render_transfer_table(frame, table_area, &view.rows, 0, false);
        return;
    }
    render_transfer_table(frame, sections[1], &view.rows, 0, false);
}

fn render_squad_plan(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default()
        .title(format!(" Full Squad Transfer Plan (bank {}) ", state.budget()))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let view = state.squad_plan();
    if let Some(msg) = outcome_message(view.outcome, state) {
        let (table_area, msg_area) = split_message(inner, &view.outcome);
        render_message(frame, msg_area, &msg);
        if view.rows.is_empty() {
            return;
        }
        render_transfer_table(frame, table_area, &view.rows, state.plan_scroll, true);
        return;
    }
    render_transfer_table(frame, inner, &view.rows, state.plan_scroll, true);
}

fn split_message(area: Rect, outcome: &PlanOutcome) -> (Rect, Rect) {
    if !matches!(outcome, PlanOutcome::Found { .. }) {
        return (Rect { height: 0, ..area }, area);
    }
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);
    (parts[1], parts[0])
}

/// Distinguishes "no data", "nothing worth doing" and "nothing affordable".
fn outcome_message(outcome: PlanOutcome, state: &AppState) -> Option<String> {
    match outcome {
        PlanOutcome::NoData if state.loading => Some("Fetching FPL data...".to_string()),
        PlanOutcome::NoData => {
            Some("Failed to fetch FPL data. Check your connection and press r.".to_string())
        }
        PlanOutcome::NoGoodTransfers => Some("No smart transfers found.".to_string()),
        PlanOutcome::NoneAffordable { good_total } => Some(format!(
            "No transfers within your budget of {}. Found {good_total} matches outside budget.",
            state.budget()
        )),
        PlanOutcome::Found {
            shown,
            filtered_by_budget,
        } if filtered_by_budget > 0 => Some(format!(
            "Found {shown} affordable transfer(s); {filtered_by_budget} filtered out by budget"
        )),
        PlanOutcome::Found { .. } => None,
    }
}

fn transfer_columns(with_out: bool) -> Vec<Constraint> {
    let mut cols = Vec::new();
    if with_out {
        cols.push(Constraint::Length(20));
        cols.push(Constraint::Length(7));
    }
    cols.extend([
        Constraint::Min(18),
        Constraint::Length(6),
        Constraint::Length(7),
        Constraint::Length(6),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
        Constraint::Length(8),
    ]);
    cols
}

fn render_transfer_table(
    frame: &mut Frame,
    area: Rect,
    rows: &[TransferRow<'_>],
    scroll: usize,
    with_out: bool,
) {
    if area.height == 0 {
        return;
    }
    let widths = transfer_columns(with_out);
    let mut header = Vec::new();
    if with_out {
        header.extend(["Player Out", "Out FDR"]);
    }
    header.extend(["Player In", "Team", "Form", "FDR", "£ Cost", "xP Gain", "Net", "Rating"]);
    render_row(
        frame,
        Rect { height: 1, ..area },
        &widths,
        &header.iter().map(|s| s.to_string()).collect::<Vec<_>>(),
        Style::default().add_modifier(Modifier::BOLD),
    );

    let visible = area.height.saturating_sub(1) as usize;
    let start = scroll.min(rows.len().saturating_sub(visible));
    for (i, row) in rows.iter().skip(start).take(visible).enumerate() {
        let t = &row.transfer;
        let mut cells = Vec::new();
        if with_out {
            cells.push(clip(&t.player_out().name, 19));
            cells.push(format!("{:.2}", row.out_analysis.average_difficulty));
        }
        cells.extend([
            clip(&t.player_in().name, 24),
            t.player_in().team.clone(),
            format!("{:.2}", row.in_analysis.form),
            format!("{:.2}", row.in_analysis.average_difficulty),
            t.price_delta().to_string(),
            format!("{:.1}", t.expected_points_gain()),
            format!("{:.1}", t.net_point_gain()),
            t.recommendation().label().to_string(),
        ]);
        let style = match t.recommendation() {
            Recommendation::Good => Style::default().fg(Color::Green),
            Recommendation::Neutral => Style::default().fg(Color::Yellow),
            Recommendation::Bad => Style::default().fg(Color::Red),
        };
        let row_area = Rect {
            y: area.y + 1 + i as u16,
            height: 1,
            ..area
        };
        render_row(frame, row_area, &widths, &cells, style);
    }
}

fn render_compare(frame: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().title(" Player Comparison ").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(view) = state.compare() else {
        render_message(frame, inner, "Select a squad player to compare");
        return;
    };
    let right = view.right;
    let opt = |f: fn(&Player) -> String| right.map(f).unwrap_or_else(|| "-".to_string());
    let ra = view.right_analysis;
    let stats: Vec<(&str, String, String)> = vec![
        ("Name", view.left.name.clone(), opt(|p| p.name.clone())),
        ("Team", view.left.team.clone(), opt(|p| p.team.clone())),
        ("Position", view.left.position.to_string(), opt(|p| p.position.to_string())),
        ("Price", view.left.price.to_string(), opt(|p| p.price.to_string())),
        ("Total Points", view.left.points.to_string(), opt(|p| p.points.to_string())),
        ("Games", view.left.games_played.to_string(), opt(|p| p.games_played.to_string())),
        (
            "Form",
            format!("{:.2}", view.left_analysis.form),
            ra.map(|a| format!("{:.2}", a.form)).unwrap_or_else(|| "-".to_string()),
        ),
        (
            "Selected by %",
            format!("{:.1}%", view.left.selected_by_percent),
            opt(|p| format!("{:.1}%", p.selected_by_percent)),
        ),
        ("Status", status_text(view.left), opt(status_text)),
        (
            "FDR",
            format!("{:.2}", view.left_analysis.average_difficulty),
            ra.map(|a| format!("{:.2}", a.average_difficulty))
                .unwrap_or_else(|| "-".to_string()),
        ),
        (
            "xP",
            format!("{:.1}", view.left_analysis.expected_points),
            ra.map(|a| format!("{:.1}", a.expected_points))
                .unwrap_or_else(|| "-".to_string()),
        ),
    ];

    let widths = [Constraint::Length(16), Constraint::Min(20), Constraint::Min(20)];
    render_row(
        frame,
        Rect { height: 1, ..inner },
        &widths,
        &["Stat".to_string(), "Squad".to_string(), "Other".to_string()],
        Style::default().add_modifier(Modifier::BOLD),
    );
    for (i, (label, left, right)) in stats.into_iter().enumerate() {
        let y = inner.y + 1 + i as u16;
        if y >= inner.y + inner.height {
            break;
        }
        let row_area = Rect { y, height: 1, ..inner };
        render_row(frame, row_area, &widths, &[label.to_string(), left, right], Style::default());
    }
}

fn status_text(p: &Player) -> String {
    let code = p
        .status
        .as_ref()
        .map(|s| s.code().to_string())
        .unwrap_or_else(|| "-".to_string());
    match p.chance_of_playing {
        Some(chance) => format!("{code} ({chance}%)"),
        None => code,
    }
}

fn render_console(frame: &mut Frame, area: Rect, state: &AppState) {
    let visible = area.height.saturating_sub(2) as usize;
    let lines: Vec<Line> = state
        .logs
        .iter()
        .rev()
        .take(visible)
        .rev()
        .map(|msg| {
            let style = if msg.starts_with("[WARN]") {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(msg.clone(), style))
        })
        .collect();
    let widget = Paragraph::new(lines).block(Block::default().title(" Log ").borders(Borders::ALL));
    frame.render_widget(widget, area);
}

fn render_row(frame: &mut Frame, area: Rect, widths: &[Constraint], cells: &[String], style: Style) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(widths.to_vec())
        .split(area);
    for (col, text) in cols.iter().zip(cells) {
        render_cell_text(frame, *col, text, style);
    }
}

fn render_cell_text(frame: &mut Frame, area: Rect, text: &str, style: Style) {
    let text_area = Rect {
        x: area.x,
        y: area.y + (area.height / 2),
        width: area.width,
        height: 1,
    };
    let paragraph = Paragraph::new(text).style(style);
    frame.render_widget(paragraph, text_area);
}

fn render_message(frame: &mut Frame, area: Rect, msg: &str) {
    let paragraph = Paragraph::new(msg).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn clip(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max.saturating_sub(1)).collect();
    out.push('…');
    out
}

fn render_help_overlay(frame: &mut Frame, area: Rect, good_threshold: f64) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let help = Paragraph::new(help_text(good_threshold))
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn help_text(good_threshold: f64) -> String {
    let good_rule = format!("GOOD when net gain (xP gain − transfer cost) ≥ {good_threshold}");

    let lines = [
        "FPL Transfer Terminal - Help",
        "",
        "Global:",
        "  1 / 2 / 3    Quick analysis / Squad plan / Compare",
        "  + / -        Games ahead (1-19)",
        "  m            Toggle scoring model (multi-factor / form only)",
        "  p            Cycle candidate position (own, GKP..FWD)",
        "  r            Reload FPL data",
        "  L            Load team of FPL_MANAGER_ID",
        "  d            Reset squad to defaults",
        "  e            Export plan to xlsx",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Squad:",
        "  j/k or ↑/↓   Select slot (scroll in squad plan)",
        "  h/l or ←/→   Swap slot player",
        "  [ / ]        Cycle comparison player",
        "",
        "xP = form × games × (6 − FDR)/3 × position weight × availability",
        good_rule.as_str(),
    ];
    lines.join("\n")
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_shows_configured_threshold() {
        assert!(help_text(5.0).contains("≥ 5"));
        let custom = help_text(7.5);
        assert!(custom.contains("≥ 7.5"));
        assert!(!custom.contains("≥ 5"));
    }
}
