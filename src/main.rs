//! Verdant TUI - terminal companion for hydroponic smart gardens
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - store dispatching actions over an immutable snapshot
//! - Device Layer (Tokio) - simulated pairing handshake

mod app;
mod constants;
mod device;
mod messages;
mod models;
mod seed;
mod storage;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{prelude::*, widgets::*};
use tokio::sync::mpsc;

use app::AppActor;
use constants::LOG_FILE_NAME;
use device::DeviceActor;
use messages::ui_events::{key_to_ui_event, AppTab};
use messages::{DeviceCommand, DeviceEvent, RenderState, UiEvent};
use models::TaskStatus;
use storage::PrefsStore;
use ui::{
    format_cents, health_color, notification_color, priority_color, render_tabs, status_color,
    text_gauge,
};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging to file
    let file_appender = tracing_appender::rolling::never(".", LOG_FILE_NAME);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (device_cmd_tx, device_cmd_rx) = mpsc::unbounded_channel::<DeviceCommand>();
    let (device_event_tx, device_event_rx) = mpsc::unbounded_channel::<DeviceEvent>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn device actor
    let device_actor = DeviceActor::new(device_event_tx);
    tokio::spawn(device_actor.run(device_cmd_rx));

    // Spawn app actor with the seed snapshot and persisted prefs
    let prefs_store = PrefsStore::new();
    let prefs = prefs_store.load();
    let app_actor = AppActor::new(
        seed::initial_state(),
        prefs,
        prefs_store,
        device_cmd_tx,
        render_tx,
    );
    tokio::spawn(app_actor.run(ui_rx, device_event_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_tab,
                    current_state.show_help,
                    current_state.onboarding_pending,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    // Main layout with tab bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Tab bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_tab_bar(f, state, main_chunks[0]);

    match state.active_tab {
        AppTab::Dashboard => draw_dashboard(f, state, main_chunks[1]),
        AppTab::Colony => draw_colony_tab(f, state, main_chunks[1]),
        AppTab::Tasks => draw_tasks_tab(f, state, main_chunks[1]),
        AppTab::Alerts => draw_alerts_tab(f, state, main_chunks[1]),
        AppTab::Family => draw_family_tab(f, state, main_chunks[1]),
        AppTab::Supply => draw_supply_tab(f, state, main_chunks[1]),
    }

    draw_status_bar(f, state, main_chunks[2]);

    // Popups
    if state.show_help {
        draw_help_popup(f, area);
    }

    if state.onboarding_pending {
        draw_onboarding_popup(f, area);
    }
}

fn draw_tab_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let unread = state.notifications.iter().filter(|n| !n.is_read).count();
    let alerts_title = if unread > 0 {
        format!("4:Alerts({unread})")
    } else {
        String::from("4:Alerts")
    };

    let titles = [
        String::from("1:Dashboard"),
        String::from("2:Colony"),
        String::from("3:Tasks"),
        alerts_title,
        String::from("5:Family"),
        String::from("6:Supply"),
    ];
    let titles: Vec<&str> = titles.iter().map(String::as_str).collect();

    let selected = match state.active_tab {
        AppTab::Dashboard => 0,
        AppTab::Colony => 1,
        AppTab::Tasks => 2,
        AppTab::Alerts => 3,
        AppTab::Family => 4,
        AppTab::Supply => 5,
    };

    f.render_widget(render_tabs(&titles, selected), area);
}

fn draw_dashboard(f: &mut Frame, state: &RenderState, area: Rect) {
    let items: Vec<ListItem> = state
        .colonies
        .iter()
        .map(|colony| {
            let pairing = state.pairing_colony.as_deref() == Some(colony.id.as_str());
            let status_text = if pairing {
                String::from("pairing...")
            } else {
                colony.status.as_str().to_string()
            };

            let title_line = Line::from(vec![
                Span::raw(format!("{} {} ", colony.mascot, colony.name)),
                Span::styled(
                    format!("{:>3} ", colony.health_score),
                    Style::default().fg(health_color(colony.health_score)).bold(),
                ),
                Span::styled(status_text, Style::default().fg(status_color(colony.status))),
                Span::styled(
                    format!("  {} open tasks", colony.pending_tasks()),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            if state.compact_view {
                ListItem::new(title_line)
            } else {
                let sensors = &colony.sensors;
                let detail_line = Line::from(Span::styled(
                    format!(
                        "   water {}  pH {:.1}  EC {:.1}  {:.0}°C  {:.0}% RH",
                        text_gauge(sensors.water_level_pct, 8),
                        sensors.ph,
                        sensors.ec,
                        sensors.air_temp_c,
                        sensors.humidity_pct,
                    ),
                    Style::default().fg(Color::Gray),
                ));
                ListItem::new(vec![title_line, detail_line, Line::raw("")])
            }
        })
        .collect();

    let title = if state.compact_view {
        " Colonies (compact) "
    } else {
        " Colonies "
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    list_state.select(Some(state.list_index));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_colony_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let Some(colony) = &state.selected_colony else {
        // Missing entity renders a placeholder, never a fault
        let placeholder = Paragraph::new("Colony not found.\n\nPress 1 and pick one from the dashboard.")
            .block(Block::default().borders(Borders::ALL).title(" Colony "))
            .wrap(Wrap { trim: false });
        f.render_widget(placeholder, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header + sensors
            Constraint::Min(4),    // Plants
            Constraint::Min(4),    // Tasks
        ])
        .split(area);

    let sensors = &colony.sensors;
    let header = vec![
        Line::from(vec![
            Span::raw(format!("{} {}  ", colony.mascot, colony.name)),
            Span::styled(
                format!("health {}", colony.health_score),
                Style::default().fg(health_color(colony.health_score)).bold(),
            ),
            Span::styled(
                format!("  {}", colony.status.as_str()),
                Style::default().fg(status_color(colony.status)),
            ),
        ]),
        Line::from(Span::styled(
            format!(
                "water {}  pH {:.1}  EC {:.1}  water {:.1}°C  air {:.1}°C  {:.0}% RH  {} lux",
                text_gauge(sensors.water_level_pct, 8),
                sensors.ph,
                sensors.ec,
                sensors.water_temp_c,
                sensors.air_temp_c,
                sensors.humidity_pct,
                sensors.light_lux,
            ),
            Style::default().fg(Color::Gray),
        )),
    ];
    let header = Paragraph::new(header).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" updated {} ", colony.updated_at.format("%H:%M"))),
    );
    f.render_widget(header, chunks[0]);

    // Plants
    let plant_items: Vec<ListItem> = colony
        .plants
        .iter()
        .map(|plant| {
            let harvest_text = if plant.is_harvestable() {
                Span::styled("ready to harvest", Style::default().fg(Color::Green).bold())
            } else {
                Span::styled(
                    format!("{} days to harvest", plant.days_to_harvest),
                    Style::default().fg(Color::DarkGray),
                )
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{} ({}) ", plant.species, plant.variety)),
                Span::styled(
                    format!("{:>3} ", plant.health_score),
                    Style::default().fg(health_color(plant.health_score)),
                ),
                Span::raw(format!(
                    "{}  {:.0}cm  {} leaves  ",
                    plant.stage.as_str(),
                    plant.height_cm,
                    plant.leaf_count
                )),
                harvest_text,
                Span::styled(
                    format!("  cared by {}", plant.caretaker),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let plants = List::new(plant_items)
        .block(Block::default().borders(Borders::ALL).title(" Plants "));
    f.render_widget(plants, chunks[1]);

    // Tasks
    let task_items: Vec<ListItem> = colony.tasks.iter().map(task_list_item).collect();
    let tasks = List::new(task_items).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Tasks ({} open) ", colony.pending_tasks())),
    );
    f.render_widget(tasks, chunks[2]);
}

fn task_list_item(task: &models::Task) -> ListItem<'static> {
    let done = task.status == TaskStatus::Completed;
    let checkbox = if done { "[x]" } else { "[ ]" };
    let base_style = if done {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("{checkbox} "), base_style),
        Span::styled(
            format!("{:<9}", task.priority.as_str()),
            Style::default().fg(priority_color(task.priority)),
        ),
        Span::styled(
            format!("{:<12}", task.kind.as_str()),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(format!("{}  ", task.title), base_style),
        Span::styled(
            format!("+{} XP  ~{}min", task.xp_reward, task.estimated_minutes),
            Style::default().fg(Color::DarkGray),
        ),
    ];
    if let Some(by) = &task.completed_by {
        spans.push(Span::styled(
            format!("  done by {by}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn draw_tasks_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let open = state.tasks.iter().filter(|t| t.is_pending()).count();
    let items: Vec<ListItem> = state.tasks.iter().map(task_list_item).collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Tasks ({open} open, Enter completes) ")),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());

    let mut list_state = ListState::default();
    list_state.select(Some(state.list_index));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_alerts_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let items: Vec<ListItem> = state
        .notifications
        .iter()
        .map(|n| {
            let marker = if n.is_read { "  " } else { "● " };
            let title_style = if n.is_read {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().fg(notification_color(n.kind)).bold()
            };
            let read_at = n
                .read_at
                .map(|at| format!("  read {}", at.format("%m-%d %H:%M")))
                .unwrap_or_default();

            ListItem::new(vec![
                Line::from(vec![
                    Span::raw(marker),
                    Span::styled(n.title.clone(), title_style),
                    Span::styled(read_at, Style::default().fg(Color::DarkGray)),
                ]),
                Line::from(Span::styled(
                    format!("  {}", n.message),
                    Style::default().fg(Color::Gray),
                )),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Alerts (Enter marks read) "),
        )
        .highlight_style(Style::default().fg(Color::Yellow));

    let mut list_state = ListState::default();
    list_state.select(Some(state.list_index));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_family_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let user = &state.user;
    let next_level = user
        .xp_to_next_level()
        .map(|xp| format!("{xp} XP to next level"))
        .unwrap_or_else(|| String::from("max level"));

    let lines = vec![
        Line::from(vec![
            Span::raw(format!("{} {}  ", user.avatar, user.name)),
            Span::styled(user.role.as_str(), Style::default().fg(Color::DarkGray)),
        ]),
        Line::raw(""),
        Line::from(vec![
            Span::styled(
                format!("Level {}  ", user.level),
                Style::default().fg(Color::Magenta).bold(),
            ),
            Span::raw(format!("{} XP  ({next_level})", user.xp)),
        ]),
        Line::raw(format!(
            "{} tasks completed, {} plants cared for",
            user.tasks_completed, user.plants_cared_for
        )),
        Line::raw(""),
        Line::raw(format!("Badges: {}", user.badges.join(", "))),
        Line::raw(format!("Achievements: {}", user.achievements.join(", "))),
    ];

    let profile = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Family "))
        .wrap(Wrap { trim: false });
    f.render_widget(profile, area);
}

fn draw_supply_tab(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Min(4)])
        .split(area);

    // Nutrient packs
    let pack_items: Vec<ListItem> = state
        .subscription
        .packs
        .iter()
        .map(|pack| {
            let doses_style = if pack.doses_remaining <= 1 {
                Style::default().fg(Color::Red).bold()
            } else {
                Style::default().fg(Color::Green)
            };
            ListItem::new(Line::from(vec![
                Span::raw(format!("{}  ", pack.name)),
                Span::styled(
                    format!("{} doses left", pack.doses_remaining),
                    doses_style,
                ),
            ]))
        })
        .collect();

    let packs = List::new(pack_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Nutrient packs (d:use dose r:order refill) "),
        )
        .highlight_style(Style::default().fg(Color::Yellow).bold());
    let mut list_state = ListState::default();
    list_state.select(Some(state.list_index));
    f.render_stateful_widget(packs, chunks[0], &mut list_state);

    // Order history
    let order_items: Vec<ListItem> = state
        .subscription
        .orders
        .iter()
        .rev()
        .map(|order| {
            let items: Vec<String> = order
                .items
                .iter()
                .map(|i| format!("{}x {}", i.quantity, i.name))
                .collect();
            ListItem::new(Line::from(vec![
                Span::raw(format!(
                    "{}  {}  {}  ",
                    order.placed_at.format("%Y-%m-%d"),
                    items.join(", "),
                    format_cents(order.total_cents),
                )),
                Span::styled(
                    order.status.as_str().to_string(),
                    Style::default().fg(Color::Cyan),
                ),
            ]))
        })
        .collect();

    let orders = List::new(order_items)
        .block(Block::default().borders(Borders::ALL).title(" Refill orders "));
    f.render_widget(orders, chunks[1]);
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if !state.status_line.is_empty() {
        format!(" {} ", state.status_line)
    } else if state.pairing_colony.is_some() {
        String::from(" Pairing... ")
    } else {
        String::from(" 1-6:tabs | ↑/↓:move | Enter:act | v:compact | p:pair | ?:help | q:quit ")
    };

    let bar = Paragraph::new(status).style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 VERDANT TUI - Keyboard Shortcuts

 NAVIGATION
   1-6                Switch tabs
   ↑ / ↓              Move selection
   Enter              Act on selection
   Esc                Back to dashboard (from colony view)

 DASHBOARD / COLONY
   Enter              Open colony detail
   p                  Pair with the base unit

 TASKS
   Enter              Complete the selected task

 ALERTS
   Enter              Mark read (follows the alert's colony)

 SUPPLY
   d                  Use one nutrient dose
   r                  Order a refill

 GENERAL
   v                  Toggle compact view
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn draw_onboarding_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 40, area);

    let text = "\n Welcome to Verdant!\n\n\
        Your colonies are seeded with demo data.\n\
        Browse them with the number keys, complete tasks\n\
        to earn XP, and keep an eye on the alerts tab.\n\n\
        Press Enter to start.";

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Getting started ")
        .style(Style::default().bg(Color::Black));

    let popup = Paragraph::new(text).block(block).wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(popup, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
