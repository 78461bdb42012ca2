//! Interactive session: executes commands against an in-memory catalog.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;

use stockroom_core::AggregateRoot;
use stockroom_inventory::{Catalog, EditInfoForm, LotForm, NewEntryForm};

use crate::command::{Command, HELP, parse_line};
use crate::error::ShellError;
use crate::render;

/// Result of executing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Output(String),
    Quit,
}

#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    today: NaiveDate,
}

impl Session {
    pub fn new(today: NaiveDate) -> Self {
        Self::with_catalog(Catalog::new(), today)
    }

    pub fn with_catalog(catalog: Catalog, today: NaiveDate) -> Self {
        Self { catalog, today }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn execute(&mut self, command: Command) -> Result<Outcome, ShellError> {
        tracing::debug!(?command, "executing command");

        let output = match command {
            Command::Create {
                name,
                category,
                quantity,
                expiration_date,
            } => {
                let form = NewEntryForm {
                    name,
                    category,
                    expirable: expiration_date.is_some(),
                    quantity,
                    expiration_date,
                };
                let id = self.catalog.insert(form.into_entry()?);
                let index = self.catalog.position(id).unwrap_or_default();
                tracing::info!(entry = %id, "catalog entry created");
                format!("created entry {}\n{}", index + 1, self.view(index)?)
            }
            Command::List => render::catalog(&self.catalog, self.today),
            Command::Show { entry } => self.view(entry)?,
            Command::Info {
                entry,
                name,
                category,
            } => self.mutate(entry, |e| {
                EditInfoForm { name, category }.apply(e);
                Ok(())
            })?,
            Command::Add {
                entry,
                quantity,
                expiration_date,
            } => self.mutate(entry, |e| LotForm::new(quantity, expiration_date).add_to(e))?,
            Command::Edit {
                entry,
                lot,
                quantity,
                expiration_date,
            } => self.mutate(entry, |e| {
                LotForm::new(quantity, expiration_date).update(e, lot)
            })?,
            Command::Remove { entry, lot } => {
                self.mutate(entry, |e| e.remove_lot(lot).map(|_| ()))?
            }
            Command::Expirable { entry, expirable } => {
                self.mutate(entry, |e| e.set_expirable(expirable))?
            }
            Command::Delete { entry } => {
                let id = self.catalog.at(entry)?.id_typed();
                let removed = self.catalog.remove(id)?;
                tracing::info!(entry = %id, "catalog entry deleted");
                format!("deleted {}", removed.name())
            }
            Command::Category { name } => {
                render::list(self.catalog.in_category(&name), self.today)
            }
            Command::Export => serde_json::to_string_pretty(&self.catalog)?,
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };

        Ok(Outcome::Output(output))
    }

    /// Consolidate an entry and render it, the way every view is refreshed.
    fn view(&mut self, index: usize) -> Result<String, ShellError> {
        let entry = self.catalog.at_mut(index)?;
        entry.organize();
        Ok(render::entry(entry, self.today))
    }

    /// Run `op` on an entry and re-render it when its version moved.
    fn mutate<F>(&mut self, index: usize, op: F) -> Result<String, ShellError>
    where
        F: FnOnce(&mut stockroom_inventory::CatalogEntry) -> stockroom_core::DomainResult<()>,
    {
        let entry = self.catalog.at_mut(index)?;
        let before = entry.version();
        op(entry)?;

        if entry.version() == before {
            return Ok("nothing changed".to_string());
        }
        self.view(index)
    }

    /// Read commands from `input` until EOF or `quit`, writing views and errors
    /// to `output`. Command errors never end the session.
    pub fn run<R, W>(&mut self, input: R, output: &mut W, prompt: &str) -> io::Result<()>
    where
        R: BufRead,
        W: Write,
    {
        write!(output, "{prompt}")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            let result = parse_line(&line).and_then(|command| match command {
                Some(command) => self.execute(command).map(Some),
                None => Ok(None),
            });

            match result {
                Ok(Some(Outcome::Quit)) => return Ok(()),
                Ok(Some(Outcome::Output(text))) => writeln!(output, "{text}")?,
                Ok(None) => {}
                Err(err) => {
                    tracing::debug!(error = %err, "command failed");
                    writeln!(output, "error: {err}")?;
                }
            }

            write!(output, "{prompt}")?;
            output.flush()?;
        }

        Ok(())
    }
}
