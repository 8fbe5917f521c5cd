use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};

use crate::cli::state::{self, App};
use crate::cli::util::{fmt_money, fmt_rate};

pub fn draw(f: &mut Frame, app: &mut App) {
    let size = f.size();

    // top tabs | main content | bottom status bar
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(1),
        ])
        .split(size);

    let titles = ["Savings", "AddEntry", "FIRE", "Help"]
        .into_iter()
        .map(|t| Line::from(Span::raw(t)))
        .collect::<Vec<_>>();
    let tabs = Tabs::new(titles)
        .select(match app.tab {
            state::Tab::Savings => 0,
            state::Tab::AddEntry => 1,
            state::Tab::Fire => 2,
            state::Tab::Help => 3,
        })
        .block(Block::default().borders(Borders::ALL).title("FIRE Planner"))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    f.render_widget(tabs, root[0]);

    match app.tab {
        state::Tab::Savings => draw_savings(f, root[1], app),
        state::Tab::AddEntry => draw_add_entry(f, root[1], app),
        state::Tab::Fire => draw_fire(f, root[1], app),
        state::Tab::Help => draw_help(f, root[1]),
    }

    let status = Paragraph::new(app.status.clone());
    f.render_widget(status, root[2]);
}

// Savings page

fn draw_savings(f: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["Name", "Amount", "Created", "Formatted"]).height(1);

    let body: Vec<Row> = app
        .savings
        .entries
        .iter()
        .map(|e| {
            Row::new(vec![
                Cell::from(e.name.clone()),
                Cell::from(fmt_money(e.amount)),
                Cell::from(e.created_at.clone()),
                Cell::from(e.formatted.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Percentage(40),
        Constraint::Length(14),
        Constraint::Length(20),
        Constraint::Length(18),
    ];

    let title = if app.savings.loading {
        "Savings (loading…)"
    } else {
        "Savings  (Up/Down, d=delete, r=refresh)"
    };

    let mut tsel = app.savings.tsel.clone();
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(table, area, &mut tsel);
    app.savings.tsel = tsel;
}

// Add entry page

fn draw_add_entry(f: &mut Frame, area: Rect, app: &App) {
    use state::EntryField;

    let form = &app.add;
    let (m_name, m_amount) = match form.editing {
        Some(EntryField::Name) => ("  <editing>", ""),
        Some(EntryField::Amount) => ("", "  <editing>"),
        None => ("", ""),
    };

    let lines = vec![
        format!("Name   : {}{}", form.name, m_name),
        format!("Amount : {}{}", form.amount, m_amount),
        "".into(),
        "TAB: switch field | Enter: save | Esc: stop editing".into(),
        form.error
            .clone()
            .or_else(|| form.success.clone())
            .unwrap_or_default(),
    ]
    .join("\n");

    let p = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title("New Savings Entry"));
    f.render_widget(p, area);
}

// FIRE page

fn draw_fire(f: &mut Frame, area: Rect, app: &mut App) {
    use state::FireField;

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let form = &app.fire.form;
    let (m_income, m_expenses, m_rate) = match form.editing {
        Some(FireField::Income) => ("  <editing>", "", ""),
        Some(FireField::Expenses) => ("", "  <editing>", ""),
        Some(FireField::Rate) => ("", "", "  <editing>"),
        None => ("", "", ""),
    };

    let mut lines = vec![
        format!("Monthly income   : {}{}", form.income, m_income),
        format!("Monthly expenses : {}{}", form.expenses, m_expenses),
        format!("Return rate      : {}{}", form.rate, m_rate),
        "".into(),
        "e: edit | TAB: switch field | Enter: project".into(),
        format!(
            "Rate is a fraction (0.05 = {}); empty uses the default.",
            fmt_rate(0.05)
        ),
    ];
    if let Some(err) = &form.error {
        lines.push(String::new());
        lines.push(err.clone());
    }
    if let Some(result) = &app.fire.result {
        lines.push(String::new());
        lines.push(format!("FIRE number : {}", fmt_money(result.fire_number)));
        match (result.years_to_fire, result.exhausted) {
            (Some(years), false) => lines.push(format!("Years to FIRE : {years}")),
            (Some(years), true) => lines.push(format!(
                "Not reached within {years} years (projection capped)"
            )),
            (None, _) => {}
        }
        if let Some(message) = &result.message {
            lines.push(message.clone());
        }
    }

    let p = Paragraph::new(lines.join("\n"))
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("FIRE Calculator"));
    f.render_widget(p, cols[0]);

    draw_projection_table(f, cols[1], app);
}

fn draw_projection_table(f: &mut Frame, area: Rect, app: &mut App) {
    let header = Row::new(vec!["Year", "Savings"]).height(1);

    let body: Vec<Row> = app
        .fire
        .result
        .as_ref()
        .map(|r| {
            r.projections
                .iter()
                .map(|p| {
                    Row::new(vec![
                        Cell::from(p.year.to_string()),
                        Cell::from(fmt_money(p.savings)),
                    ])
                })
                .collect()
        })
        .unwrap_or_default();

    let widths = [Constraint::Length(6), Constraint::Min(14)];

    let mut tsel = app.fire.tsel.clone();
    let table = Table::new(body, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title("Projection"))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    f.render_stateful_widget(table, area, &mut tsel);
    app.fire.tsel = tsel;
}

// Help page

fn draw_help(f: &mut Frame, area: Rect) {
    let text = [
        "1: Savings list    2: Add entry    3: FIRE calculator    ?: Help",
        "",
        "Savings:  Up/Down select, d delete, r refresh",
        "Add:      TAB switch field, Enter save, Esc stop editing",
        "FIRE:     e edit form, Enter project",
        "",
        "q quits from any tab when not editing.",
    ]
    .join("\n");

    let p = Paragraph::new(text).block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}
