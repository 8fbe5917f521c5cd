// src/cli/state.rs
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::widgets::TableState;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::cli::api::Client;
use crate::cli::util;

#[derive(Debug, Clone, Deserialize)]
pub struct SavingEntryDto {
    pub id: i64,
    pub name: String,
    pub amount: f64,
    pub created_at: String,
    pub formatted: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectionYearDto {
    pub year: u32,
    pub savings: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FireOutcome {
    pub fire_number: f64,
    pub years_to_fire: Option<u32>,
    #[serde(default)]
    pub projections: Vec<ProjectionYearDto>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub exhausted: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Savings,
    AddEntry,
    Fire,
    Help,
}

#[derive(Default)]
pub struct SavingsPage {
    pub entries: Vec<SavingEntryDto>,
    pub tsel: TableState,
    pub loading: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Name,
    Amount,
}

#[derive(Default, Clone)]
pub struct AddEntryForm {
    pub name: String,
    pub amount: String,
    pub editing: Option<EntryField>,
    pub error: Option<String>,
    pub success: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireField {
    Income,
    Expenses,
    Rate,
}

#[derive(Default, Clone)]
pub struct FireForm {
    pub income: String,
    pub expenses: String,
    // Empty means "use the server default of 5%".
    pub rate: String,
    pub editing: Option<FireField>,
    pub error: Option<String>,
}

#[derive(Default)]
pub struct FirePage {
    pub form: FireForm,
    pub result: Option<FireOutcome>,
    pub tsel: TableState,
}

pub struct App {
    pub api: Client,
    pub tab: Tab,
    pub status: String,
    pub quit: bool,
    pub savings: SavingsPage,
    pub add: AddEntryForm,
    pub fire: FirePage,
}

impl App {
    pub fn new(api: Client) -> Self {
        Self {
            api,
            tab: Tab::Savings,
            status: "1 Savings | 2 Add | 3 FIRE | ? Help | q quit".into(),
            quit: false,
            savings: SavingsPage::default(),
            add: AddEntryForm::default(),
            fire: FirePage::default(),
        }
    }

    pub async fn refresh_entries(&mut self) -> Result<()> {
        self.savings.loading = true;
        let result = self.api.list_savings().await;
        self.savings.loading = false;

        match result {
            Ok(entries) => {
                self.savings.entries = entries;
                if self.savings.tsel.selected().is_none() && !self.savings.entries.is_empty() {
                    self.savings.tsel.select(Some(0));
                }
                self.clamp_entry_selection();
                self.status = format!("{} entries loaded", self.savings.entries.len());
            }
            Err(e) => {
                self.status = format!("Failed to load entries: {e}");
            }
        }
        Ok(())
    }

    fn clamp_entry_selection(&mut self) {
        let len = self.savings.entries.len();
        match (len, self.savings.tsel.selected()) {
            (0, _) => self.savings.tsel.select(None),
            (n, Some(i)) if i >= n => self.savings.tsel.select(Some(n - 1)),
            _ => {}
        }
    }

    fn move_entry(&mut self, delta: isize) {
        let n = self.savings.entries.len();
        if n == 0 {
            self.savings.tsel.select(None);
            return;
        }
        let cur = self.savings.tsel.selected().unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(n as isize) as usize;
        self.savings.tsel.select(Some(next));
    }

    fn selected_entry_id(&self) -> Option<i64> {
        let idx = self.savings.tsel.selected()?;
        self.savings.entries.get(idx).map(|e| e.id)
    }

    async fn delete_selected(&mut self) -> Result<()> {
        let Some(id) = self.selected_entry_id() else {
            self.status = "Nothing selected".into();
            return Ok(());
        };
        match self.api.delete_saving(id).await {
            Ok(()) => {
                self.status = format!("Entry {id} deleted");
                self.refresh_entries().await?;
            }
            Err(e) => {
                self.status = format!("Delete failed: {e}");
            }
        }
        Ok(())
    }

    fn move_projection_row(&mut self, delta: isize) {
        let n = self
            .fire
            .result
            .as_ref()
            .map(|r| r.projections.len())
            .unwrap_or(0);
        if n == 0 {
            self.fire.tsel.select(None);
            return;
        }
        let cur = self.fire.tsel.selected().unwrap_or(0) as isize;
        let next = (cur + delta).rem_euclid(n as isize) as usize;
        self.fire.tsel.select(Some(next));
    }

    pub async fn handle_key(&mut self, k: KeyEvent) -> Result<()> {
        if k.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.tab == Tab::AddEntry && self.add.editing.is_some() {
            self.handle_add_entry_input(k).await?;
            return Ok(());
        }
        if self.tab == Tab::Fire && self.fire.form.editing.is_some() {
            self.handle_fire_input(k).await?;
            return Ok(());
        }

        match k.code {
            KeyCode::Char('q') => {
                self.quit = true;
                return Ok(());
            }
            KeyCode::Char('1') => {
                self.tab = Tab::Savings;
                return Ok(());
            }
            KeyCode::Char('2') => {
                self.tab = Tab::AddEntry;
                self.add.editing = Some(EntryField::Name);
                return Ok(());
            }
            KeyCode::Char('3') => {
                self.tab = Tab::Fire;
                return Ok(());
            }
            KeyCode::Char('?') => {
                self.tab = Tab::Help;
                return Ok(());
            }
            _ => {}
        }

        match self.tab {
            Tab::Savings => match k.code {
                KeyCode::Up => self.move_entry(-1),
                KeyCode::Down => self.move_entry(1),
                KeyCode::Char('r') => {
                    self.refresh_entries().await.ok();
                }
                KeyCode::Char('d') => self.delete_selected().await?,
                _ => {}
            },
            Tab::AddEntry => match k.code {
                KeyCode::Enter | KeyCode::Char('e') => {
                    self.add.editing = Some(EntryField::Name);
                }
                _ => {}
            },
            Tab::Fire => match k.code {
                KeyCode::Char('e') => {
                    self.fire.form.editing = Some(FireField::Income);
                }
                KeyCode::Enter => self.run_projection().await,
                KeyCode::Up => self.move_projection_row(-1),
                KeyCode::Down => self.move_projection_row(1),
                _ => {}
            },
            Tab::Help => {}
        }
        Ok(())
    }

    async fn handle_add_entry_input(&mut self, k: KeyEvent) -> Result<()> {
        let Some(field) = self.add.editing else {
            return Ok(());
        };

        match k.code {
            KeyCode::Esc => self.add.editing = None,
            KeyCode::Tab => {
                self.add.editing = Some(match field {
                    EntryField::Name => EntryField::Amount,
                    EntryField::Amount => EntryField::Name,
                });
            }
            KeyCode::Enter => self.submit_entry().await?,
            KeyCode::Backspace => {
                self.active_entry_field(field).pop();
            }
            KeyCode::Char(c) => {
                self.active_entry_field(field).push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn active_entry_field(&mut self, field: EntryField) -> &mut String {
        match field {
            EntryField::Name => &mut self.add.name,
            EntryField::Amount => &mut self.add.amount,
        }
    }

    async fn submit_entry(&mut self) -> Result<()> {
        self.add.error = None;
        self.add.success = None;

        let name = self.add.name.trim().to_string();
        if name.is_empty() {
            self.add.error = Some("Name is required".into());
            return Ok(());
        }
        let Some(amount) = util::parse_money(&self.add.amount) else {
            self.add.error = Some("Amount must be a number".into());
            return Ok(());
        };
        if amount < Decimal::ZERO {
            self.add.error = Some("Amount cannot be negative".into());
            return Ok(());
        }

        match self.api.add_saving(&name, self.add.amount.trim()).await {
            Ok(entries) => {
                self.savings.entries = entries;
                self.clamp_entry_selection();
                self.add.name.clear();
                self.add.amount.clear();
                self.add.editing = Some(EntryField::Name);
                self.add.success = Some("Entry saved".into());
            }
            Err(e) => {
                self.add.error = Some(format!("Save failed: {e}"));
            }
        }
        Ok(())
    }

    async fn handle_fire_input(&mut self, k: KeyEvent) -> Result<()> {
        let Some(field) = self.fire.form.editing else {
            return Ok(());
        };

        match k.code {
            KeyCode::Esc => self.fire.form.editing = None,
            KeyCode::Tab => {
                self.fire.form.editing = Some(match field {
                    FireField::Income => FireField::Expenses,
                    FireField::Expenses => FireField::Rate,
                    FireField::Rate => FireField::Income,
                });
            }
            KeyCode::Enter => self.run_projection().await,
            KeyCode::Backspace => {
                self.active_fire_field(field).pop();
            }
            KeyCode::Char(c) => {
                self.active_fire_field(field).push(c);
            }
            _ => {}
        }
        Ok(())
    }

    fn active_fire_field(&mut self, field: FireField) -> &mut String {
        match field {
            FireField::Income => &mut self.fire.form.income,
            FireField::Expenses => &mut self.fire.form.expenses,
            FireField::Rate => &mut self.fire.form.rate,
        }
    }

    async fn run_projection(&mut self) {
        self.fire.form.error = None;

        let Some(income) = util::parse_number(&self.fire.form.income) else {
            self.fire.form.error = Some("Monthly income must be a number".into());
            return;
        };
        let Some(expenses) = util::parse_number(&self.fire.form.expenses) else {
            self.fire.form.error = Some("Monthly expenses must be a number".into());
            return;
        };
        let rate = if self.fire.form.rate.trim().is_empty() {
            None
        } else {
            match util::parse_number(&self.fire.form.rate) {
                Some(r) => Some(r),
                None => {
                    self.fire.form.error = Some("Return rate must be a number".into());
                    return;
                }
            }
        };

        match self.api.fire_projection(income, expenses, rate).await {
            Ok(outcome) => {
                self.fire.tsel
                    .select(if outcome.projections.is_empty() { None } else { Some(0) });
                self.fire.result = Some(outcome);
                self.fire.form.editing = None;
            }
            Err(e) => {
                self.fire.form.error = Some(format!("Projection failed: {e}"));
            }
        }
    }
}
