use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::model::{Task, TaskStatus};
use crate::views;

use super::app::{AppState, DeleteConfirmState, HelpContext, StatusKind, Tab};
use super::editor::{EditorState, EmployeePicker, StatusPicker};

const STATUS_WIDTH: usize = 11;
const ID_WIDTH: usize = 5;
const BAR_WIDTH: u64 = 30;
const HELP_KEY_WIDTH: usize = 14;
const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_MUTED_DARK: Color = Color::Rgb(118, 124, 130);
const COLOR_BG_MUTED: Color = Color::Rgb(52, 56, 60);
const COLOR_INFO: Color = Color::Rgb(116, 198, 219);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_ERROR: Color = Color::Rgb(255, 107, 107);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_BORDER_LIST: Color = Color::Rgb(92, 126, 166);
const COLOR_BORDER_DETAIL: Color = Color::Rgb(180, 156, 92);

pub fn render(frame: &mut Frame, app: &mut AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(area);
    let tabs = chunks[0];
    let main = chunks[1];
    let footer = chunks[2];

    render_tabs(frame, app, tabs);

    if app.load_error.is_some() {
        render_load_error(frame, app, main);
    } else {
        match app.tab {
            Tab::Overview => render_overview(frame, app, main),
            Tab::Tasks => render_tasks_tab(frame, app, main),
            Tab::Employees => render_employees_tab(frame, app, main),
        }
    }

    render_footer(frame, app, footer);

    if let Some(editor) = app.editor.as_ref() {
        render_editor_modal(frame, area, editor);
    }
    if let Some(state) = app.employee_picker.as_ref() {
        render_employee_picker_modal(frame, area, &state.picker);
    }
    if let Some(state) = app.status_picker.as_ref() {
        let title = match state.mode {
            super::app::StatusPickerMode::Filter => "Status Filter",
            super::app::StatusPickerMode::Change => "Status",
        };
        render_status_modal(frame, area, &state.picker, title);
    }
    if let Some(state) = app.delete_confirm.as_ref() {
        render_delete_confirm_modal(frame, area, state);
    }
    if app.help_context != HelpContext::None {
        render_help_modal(frame, area, app.help_context);
    }
}

fn render_tabs(frame: &mut Frame, app: &AppState, area: Rect) {
    let task_count = app.tasks().len();
    let employee_count = app
        .snapshot
        .as_ref()
        .map(|snapshot| snapshot.employees.len())
        .unwrap_or(0);
    let tabs = vec![
        ("1 Overview", app.tab == Tab::Overview, None, COLOR_INFO),
        (
            "2 Tasks",
            app.tab == Tab::Tasks,
            Some(task_count),
            COLOR_ACCENT,
        ),
        (
            "3 Employees",
            app.tab == Tab::Employees,
            Some(employee_count),
            COLOR_SUCCESS,
        ),
    ];

    let mut spans = Vec::new();
    for (idx, (label, selected, count, color)) in tabs.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled("  ", Style::default().fg(COLOR_MUTED_DARK)));
        }
        let text = match count {
            Some(count) => format!("{label} ({count})"),
            None => label.to_string(),
        };
        let style = if selected {
            Style::default()
                .fg(color)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        spans.push(Span::styled(text, style));
    }
    if app.loading {
        spans.push(Span::styled(
            "  syncing...",
            Style::default().fg(COLOR_WARNING),
        ));
    }

    let widget = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_load_error(frame: &mut Frame, app: &AppState, area: Rect) {
    let message = app
        .load_error
        .as_deref()
        .unwrap_or("connection lost")
        .to_string();
    let lines = vec![
        Line::from(Span::styled(
            "Cannot reach the tracker API",
            Style::default()
                .fg(COLOR_ERROR)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(COLOR_TEXT))),
        Line::from(""),
        Line::from(Span::styled(
            "press r to retry, q to quit",
            Style::default().fg(COLOR_MUTED),
        )),
    ];
    let widget = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(COLOR_ERROR))
                .title(" Connection Error "),
        );
    frame.render_widget(widget, area);
}

fn render_overview(frame: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)].as_ref())
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(7), Constraint::Min(0)].as_ref())
        .split(chunks[0]);

    render_status_chart(frame, app, left[0]);
    render_workload_chart(frame, app, left[1]);
    render_recent_tasks(frame, app, chunks[1]);
}

fn render_status_chart(frame: &mut Frame, app: &AppState, area: Rect) {
    let dashboard = app.snapshot.as_ref().map(|snapshot| &snapshot.dashboard);
    let buckets = views::status_chart(dashboard);
    let max = buckets.iter().map(|bucket| bucket.count).max().unwrap_or(0);

    let mut lines = Vec::new();
    if buckets.is_empty() {
        lines.push(Line::from(Span::styled(
            if app.loading { "loading..." } else { "no data" },
            Style::default().fg(COLOR_MUTED),
        )));
    }
    for bucket in &buckets {
        let color = status_color(bucket.status);
        let bar = bar_string(bucket.count, max);
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<width$}", bucket.label, width = STATUS_WIDTH + 1),
                Style::default().fg(COLOR_TEXT),
            ),
            Span::styled(bar, Style::default().fg(color)),
            Span::styled(
                format!(" {}", bucket.count),
                Style::default().fg(COLOR_MUTED),
            ),
        ]));
    }
    if let Some(dashboard) = dashboard {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(
                "completion rate: {}",
                views::completion_rate_label(dashboard)
            ),
            Style::default().fg(COLOR_INFO),
        )));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_LIST))
            .title(" Tasks by Status "),
    );
    frame.render_widget(widget, area);
}

fn render_workload_chart(frame: &mut Frame, app: &AppState, area: Rect) {
    let dashboard = app.snapshot.as_ref().map(|snapshot| &snapshot.dashboard);
    let bars = views::employee_chart(dashboard);
    let max = bars.iter().map(|bar| bar.tasks).max().unwrap_or(0);

    let mut lines = Vec::new();
    if bars.is_empty() {
        lines.push(Line::from(Span::styled(
            "no assignments",
            Style::default().fg(COLOR_MUTED),
        )));
    }
    for bar in &bars {
        lines.push(Line::from(vec![
            Span::styled(
                format!("{:<16.16} ", bar.name),
                Style::default().fg(COLOR_TEXT),
            ),
            Span::styled(
                bar_string(bar.tasks, max),
                Style::default().fg(COLOR_ACCENT),
            ),
            Span::styled(format!(" {}", bar.tasks), Style::default().fg(COLOR_MUTED)),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_LIST))
            .title(" Workload by Employee "),
    );
    frame.render_widget(widget, area);
}

fn render_recent_tasks(frame: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.tasks();
    let recent = views::recent_tasks(tasks, app.recent_limit);

    let mut lines = Vec::new();
    if recent.is_empty() {
        lines.push(Line::from(Span::styled(
            if app.loading { "loading..." } else { "no tasks" },
            Style::default().fg(COLOR_MUTED),
        )));
    }
    for task in recent {
        lines.push(task_line(task, false));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_DETAIL))
            .title(" Recent Tasks "),
    );
    frame.render_widget(widget, area);
}

fn render_tasks_tab(frame: &mut Frame, app: &AppState, area: Rect) {
    if app.is_narrow() && !app.show_detail {
        render_task_list(frame, app, area);
    } else if app.is_narrow() {
        render_task_detail(frame, app, area);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)].as_ref())
            .split(area);
        render_task_list(frame, app, chunks[0]);
        render_task_detail(frame, app, chunks[1]);
    }
}

fn render_task_list(frame: &mut Frame, app: &AppState, area: Rect) {
    let tasks = app.tasks();
    let mut lines = Vec::new();

    if app.filter_active || !app.filter.is_empty() {
        lines.push(Line::from(vec![
            Span::styled("filter: ", Style::default().fg(COLOR_MUTED)),
            Span::styled(app.filter.clone(), Style::default().fg(COLOR_TEXT)),
            Span::styled(
                if app.filter_active { "_" } else { "" },
                Style::default().fg(COLOR_ACCENT),
            ),
        ]));
        lines.push(Line::from(""));
    }

    if app.filtered.is_empty() {
        let message = if tasks.is_empty() && app.loading {
            "loading..."
        } else if tasks.is_empty() {
            "no tasks yet"
        } else {
            "no tasks found"
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(COLOR_MUTED),
        )));
    }

    for &idx in &app.filtered {
        let Some(task) = tasks.get(idx) else {
            continue;
        };
        let selected = app.selected == Some(idx);
        lines.push(task_line(task, selected));
    }

    let title = format!(" Tasks ({}/{}) ", app.filtered.len(), tasks.len());
    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_LIST))
            .title(title),
    );
    frame.render_widget(widget, area);
}

fn render_task_detail(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();
    match app.selected_task() {
        Some(task) => {
            lines.push(Line::from(Span::styled(
                task.title.clone(),
                Style::default()
                    .fg(COLOR_TEXT)
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(detail_row("id", format!("#{}", task.id)));
            lines.push(Line::from(vec![
                Span::styled(
                    format!("{:<10}", "status"),
                    Style::default().fg(COLOR_MUTED),
                ),
                Span::styled(
                    task.status.label(),
                    Style::default().fg(status_color(task.status)),
                ),
            ]));
            lines.push(detail_row(
                "assignee",
                format!("{} (#{})", task.employee_name, task.employee_id),
            ));
            lines.push(detail_row(
                "due",
                task.due_date
                    .map(|date| date.to_string())
                    .unwrap_or_else(|| "-".to_string()),
            ));
            if let Some(created) = &task.created_at {
                lines.push(detail_row("created", created.clone()));
            }
            if !task.description.is_empty() {
                lines.push(Line::from(""));
                lines.push(Line::from(Span::styled(
                    task.description.clone(),
                    Style::default().fg(COLOR_TEXT),
                )));
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                "no task selected",
                Style::default().fg(COLOR_MUTED),
            )));
        }
    }

    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_DETAIL))
            .title(" Detail "),
    );
    frame.render_widget(widget, area);
}

fn render_employees_tab(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();
    match app.snapshot.as_ref() {
        Some(snapshot) => {
            let stats = views::employee_stats(&snapshot.employees, &snapshot.tasks);
            if stats.is_empty() {
                lines.push(Line::from(Span::styled(
                    "no employees registered (press o to add one)",
                    Style::default().fg(COLOR_MUTED),
                )));
            }
            for (employee, stat) in snapshot.employees.iter().zip(stats.iter()) {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{:>width$} ", format!("#{}", employee.id), width = ID_WIDTH),
                        Style::default().fg(COLOR_MUTED_DARK),
                    ),
                    Span::styled(
                        format!("{:<20.20}", employee.name),
                        Style::default().fg(COLOR_TEXT),
                    ),
                    Span::styled(
                        format!(" {:<24.24}", employee.email),
                        Style::default().fg(COLOR_MUTED),
                    ),
                    Span::styled(
                        format!(
                            " {}/{} done",
                            stat.completed_tasks, stat.total_tasks
                        ),
                        Style::default().fg(COLOR_SUCCESS),
                    ),
                ]));
                if !employee.department.is_empty() || !employee.position.is_empty() {
                    lines.push(Line::from(Span::styled(
                        format!(
                            "{:width$} {} {}",
                            "",
                            employee.department,
                            employee.position,
                            width = ID_WIDTH
                        ),
                        Style::default().fg(COLOR_MUTED_DARK),
                    )));
                }
            }
        }
        None => {
            lines.push(Line::from(Span::styled(
                if app.loading { "loading..." } else { "no data" },
                Style::default().fg(COLOR_MUTED),
            )));
        }
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER_LIST))
            .title(" Employees "),
    );
    frame.render_widget(widget, area);
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut lines = Vec::new();

    if let Some((message, kind)) = app.status_line() {
        let color = match kind {
            StatusKind::Error => COLOR_ERROR,
            StatusKind::Info => COLOR_INFO,
        };
        lines.push(Line::from(Span::styled(
            message,
            Style::default().fg(color),
        )));
    } else {
        lines.push(Line::from(Span::styled(
            app.summary_line(),
            Style::default().fg(COLOR_MUTED),
        )));
    }
    lines.push(Line::from(Span::styled(
        app.footer_hint(),
        Style::default().fg(COLOR_MUTED_DARK),
    )));

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::TOP)
            .border_style(Style::default().fg(COLOR_BG_MUTED)),
    );
    frame.render_widget(widget, area);
}

fn render_editor_modal(frame: &mut Frame, area: Rect, editor: &EditorState) {
    let height = (editor.fields().len() as u16 + 6).min(area.height);
    let modal = centered_rect(area, 60, height);
    frame.render_widget(Clear, modal);

    let mut lines = Vec::new();
    for (idx, field) in editor.fields().iter().enumerate() {
        let active = idx == editor.active_index() && !editor.confirming();
        let marker = if active { "> " } else { "  " };
        let required = if field.required { "*" } else { " " };
        let label_style = if active {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_MUTED)
        };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
            Span::styled(
                format!("{:<18}{required} ", field.label),
                label_style,
            ),
            Span::styled(field.value.clone(), Style::default().fg(COLOR_TEXT)),
            Span::styled(
                if active { "_" } else { "" },
                Style::default().fg(COLOR_ACCENT),
            ),
        ]));
    }

    lines.push(Line::from(""));
    if editor.confirming() {
        lines.push(Line::from(Span::styled(
            "save changes? enter/c confirm, esc cancel",
            Style::default().fg(COLOR_WARNING),
        )));
    } else if let Some(error) = editor.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(COLOR_ERROR),
        )));
    }

    let title = match editor.kind() {
        super::editor::EditorKind::NewTask => " New Task ",
        super::editor::EditorKind::EditTask => " Edit Task ",
        super::editor::EditorKind::NewEmployee => " New Employee ",
    };
    let widget = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .title(title),
    );
    frame.render_widget(widget, modal);
}

fn render_status_modal(frame: &mut Frame, area: Rect, picker: &StatusPicker, title: &str) {
    let height = (picker.options().len() as u16 + 2).min(area.height);
    let modal = centered_rect(area, 30, height);
    frame.render_widget(Clear, modal);

    let mut lines = Vec::new();
    for (idx, option) in picker.options().iter().enumerate() {
        let selected = idx == picker.selected_index();
        let style = if selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        let marker = if selected { "> " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
            Span::styled(option.clone(), style),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .title(format!(" {title} ")),
    );
    frame.render_widget(widget, modal);
}

fn render_employee_picker_modal(frame: &mut Frame, area: Rect, picker: &EmployeePicker) {
    let visible = picker.visible();
    let height = (visible.len() as u16 + 4).min(area.height).max(5);
    let modal = centered_rect(area, 44, height);
    frame.render_widget(Clear, modal);

    let mut lines = Vec::new();
    lines.push(Line::from(vec![
        Span::styled("filter: ", Style::default().fg(COLOR_MUTED)),
        Span::styled(picker.query().to_string(), Style::default().fg(COLOR_TEXT)),
        Span::styled("_", Style::default().fg(COLOR_ACCENT)),
    ]));
    lines.push(Line::from(""));
    if visible.is_empty() {
        lines.push(Line::from(Span::styled(
            "no matches",
            Style::default().fg(COLOR_MUTED),
        )));
    }
    for (idx, option) in visible.iter().enumerate() {
        let selected = idx == picker.selected_index();
        let style = if selected {
            Style::default()
                .fg(COLOR_ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(COLOR_TEXT)
        };
        let marker = if selected { "> " } else { "  " };
        lines.push(Line::from(vec![
            Span::styled(marker, Style::default().fg(COLOR_ACCENT)),
            Span::styled(option.label.clone(), style),
        ]));
    }

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ACCENT))
            .title(" Employee "),
    );
    frame.render_widget(widget, modal);
}

fn render_delete_confirm_modal(frame: &mut Frame, area: Rect, state: &DeleteConfirmState) {
    let modal = centered_rect(area, 50, 6);
    frame.render_widget(Clear, modal);

    let lines = vec![
        Line::from(Span::styled(
            format!("Delete task #{}?", state.task_id),
            Style::default()
                .fg(COLOR_TEXT)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.title.clone(),
            Style::default().fg(COLOR_MUTED),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "y confirm  esc cancel",
            Style::default().fg(COLOR_WARNING),
        )),
    ];

    let widget = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_ERROR))
            .title(" Confirm Delete "),
    );
    frame.render_widget(widget, modal);
}

fn render_help_modal(frame: &mut Frame, area: Rect, context: HelpContext) {
    let entries: &[(&str, &str)] = match context {
        HelpContext::Editor => &[
            ("tab/down", "next field"),
            ("shift-tab/up", "previous field"),
            ("ctrl-u", "clear field"),
            ("p", "pick employee/status"),
            ("enter", "confirm, then save"),
            ("esc", "cancel"),
        ],
        _ => &[
            ("1/2/3", "switch tab"),
            ("j/k", "move selection"),
            ("/", "text filter"),
            ("a", "assignee filter"),
            ("s", "status filter"),
            ("n", "new task"),
            ("o", "new employee"),
            ("e", "edit task"),
            ("d", "delete task"),
            ("r", "refresh"),
            ("q", "quit"),
        ],
    };

    let height = (entries.len() as u16 + 2).min(area.height);
    let modal = centered_rect(area, 44, height);
    frame.render_widget(Clear, modal);

    let lines: Vec<Line> = entries
        .iter()
        .map(|(key, description)| {
            Line::from(vec![
                Span::styled(
                    format!("{key:<width$}", width = HELP_KEY_WIDTH),
                    Style::default().fg(COLOR_ACCENT),
                ),
                Span::styled(*description, Style::default().fg(COLOR_TEXT)),
            ])
        })
        .collect();

    let widget = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_INFO))
            .title(" Help "),
    );
    frame.render_widget(widget, modal);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    Rect {
        x,
        y,
        width,
        height,
    }
}

fn task_line(task: &Task, selected: bool) -> Line<'static> {
    let marker = if selected { "> " } else { "  " };
    let base = if selected {
        Style::default()
            .fg(COLOR_TEXT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(COLOR_TEXT)
    };
    let due = task
        .due_date
        .map(|date| format!("  due {date}"))
        .unwrap_or_default();
    Line::from(vec![
        Span::styled(marker.to_string(), Style::default().fg(COLOR_ACCENT)),
        Span::styled(
            format!("{:>width$} ", format!("#{}", task.id), width = ID_WIDTH),
            Style::default().fg(COLOR_MUTED_DARK),
        ),
        Span::styled(
            format!("{:<width$}", task.status.label(), width = STATUS_WIDTH + 1),
            Style::default().fg(status_color(task.status)),
        ),
        Span::styled(task.title.clone(), base),
        Span::styled(
            format!("  {}", task.employee_name),
            Style::default().fg(COLOR_MUTED),
        ),
        Span::styled(due, Style::default().fg(COLOR_MUTED_DARK)),
    ])
}

fn detail_row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{label:<10}"), Style::default().fg(COLOR_MUTED)),
        Span::styled(value, Style::default().fg(COLOR_TEXT)),
    ])
}

fn status_color(status: TaskStatus) -> Color {
    match status {
        TaskStatus::Completed => COLOR_SUCCESS,
        TaskStatus::InProgress => COLOR_INFO,
        TaskStatus::Pending => COLOR_WARNING,
    }
}

fn bar_string(value: u64, max: u64) -> String {
    if max == 0 {
        return String::new();
    }
    let width = (value * BAR_WIDTH).div_ceil(max.max(1));
    "█".repeat(width as usize)
}
