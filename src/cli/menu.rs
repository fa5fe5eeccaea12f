//! Interactive menu driving the pokedex service.
//!
//! Generic over its input and output so tests can script a whole session.
//! End of input leaves every menu level, like choosing "exit".

use std::io::{BufRead, Write};

use itertools::Itertools;
use tracing::{debug, instrument};

use crate::application::services::{AddOutcome, DisplayOrder, EvolveOutcome, PokedexService};
use crate::application::ApplicationError;
use crate::cli::error::CliResult;
use crate::cli::output;
use crate::domain::{Direction, FightResult, OwnerId, RecordId, Traversal};

pub struct Menu<'s, 'c, R, W> {
    service: &'s mut PokedexService<'c>,
    input: R,
    output: W,
}

impl<'s, 'c, R: BufRead, W: Write> Menu<'s, 'c, R, W> {
    pub fn new(service: &'s mut PokedexService<'c>, input: R, output: W) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Give the writer back, e.g. to inspect a scripted session.
    pub fn into_output(self) -> W {
        self.output
    }

    /// Next input line with surrounding whitespace removed; `None` at end of input.
    fn read_line(&mut self) -> CliResult<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Prompt until the line is an integer; `None` at end of input.
    fn read_int(&mut self, prompt: &str) -> CliResult<Option<i64>> {
        loop {
            output::prompt(&mut self.output, prompt)?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<i64>() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => output::info(&mut self.output, "Invalid input.")?,
            }
        }
    }

    fn read_id(&mut self, prompt: &str) -> CliResult<Option<RecordId>> {
        let Some(value) = self.read_int(prompt)? else {
            return Ok(None);
        };
        match RecordId::try_from(value) {
            Ok(id) if self.service.catalog().contains(id) => Ok(Some(id)),
            _ => {
                output::info(&mut self.output, "Invalid ID.")?;
                Ok(None)
            }
        }
    }

    /// Report a use-case failure and keep the session going.
    fn report(&mut self, error: &ApplicationError) -> CliResult<()> {
        debug!("Use case failed: {}", error);
        output::error(&mut self.output, error)?;
        Ok(())
    }

    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> CliResult<()> {
        loop {
            output::header(&mut self.output, "\n=== Main Menu ===")?;
            for line in [
                "1. New Pokedex",
                "2. Existing Pokedex",
                "3. Delete a Pokedex",
                "4. Merge Pokedexes",
                "5. Sort Owners by Name",
                "6. Print Owners in a direction X times",
                "7. Exit",
            ] {
                output::info(&mut self.output, line)?;
            }
            let Some(choice) = self.read_int("Your choice:")? else {
                break;
            };
            match choice {
                1 => self.open_pokedex()?,
                2 => self.enter_existing_pokedex()?,
                3 => self.delete_pokedex()?,
                4 => self.merge_pokedexes()?,
                5 => self.sort_owners()?,
                6 => self.print_owners_circular()?,
                7 => {
                    output::info(&mut self.output, "Goodbye!")?;
                    break;
                }
                _ => output::info(&mut self.output, "Invalid.")?,
            }
        }
        Ok(())
    }

    fn open_pokedex(&mut self) -> CliResult<()> {
        output::prompt(&mut self.output, "Your name:")?;
        let Some(name) = self.read_line()? else {
            return Ok(());
        };
        if self.service.find_owner(&name).is_ok() {
            output::warning(
                &mut self.output,
                &format!("Owner '{}' already exists. Not creating a new Pokedex.", name),
            )?;
            return Ok(());
        }

        let catalog = self.service.catalog();
        let starters = catalog
            .starters()
            .enumerate()
            .map(|(i, record)| format!("{}. {}", i + 1, record.name))
            .join("\n");
        let prompt = format!("Choose Starter:\n{}\nYour choice:", starters);
        let Some(choice) = self.read_int(&prompt)? else {
            return Ok(());
        };

        match usize::try_from(choice)
            .map_err(|_| ApplicationError::InvalidStarter(0))
            .and_then(|choice| self.service.open_pokedex(&name, choice))
        {
            Ok(id) => {
                let owner = self.service.owner(id)?;
                let starter = owner
                    .pokedex()
                    .root()
                    .map(|node| node.record().name.clone())
                    .unwrap_or_default();
                let msg = format!("New Pokedex created for {} with starter {}.", name, starter);
                output::success(&mut self.output, &msg)?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    /// Print "N. name" for every owner; returns the count.
    fn list_owners(&mut self) -> CliResult<usize> {
        let names: Vec<String> = self
            .service
            .owner_names()
            .into_iter()
            .map(str::to_string)
            .collect();
        for (position, name) in names.iter().enumerate() {
            output::info(&mut self.output, &format!("{}. {}", position + 1, name))?;
        }
        Ok(names.len())
    }

    fn choose_owner(&mut self, prompt: &str) -> CliResult<Option<OwnerId>> {
        let Some(choice) = self.read_int(prompt)? else {
            return Ok(None);
        };
        let position = usize::try_from(choice).unwrap_or(0);
        match self.service.owner_at(position) {
            Ok(id) => Ok(Some(id)),
            Err(e) => {
                self.report(&e)?;
                Ok(None)
            }
        }
    }

    fn enter_existing_pokedex(&mut self) -> CliResult<()> {
        if self.service.owner_count() == 0 {
            output::info(&mut self.output, "No existing Pokedexes.")?;
            return Ok(());
        }
        output::header(&mut self.output, "\nExisting Pokedexes:")?;
        self.list_owners()?;
        let Some(owner) = self.choose_owner("Choose a Pokedex by number:")? else {
            return Ok(());
        };
        let name = self.service.owner(owner)?.name().to_string();
        output::info(&mut self.output, &format!("\nEntering {}'s Pokedex...", name))?;

        loop {
            output::header(&mut self.output, &format!("\n-- {}'s Pokedex Menu --", name))?;
            for line in [
                "1. Add Pokemon",
                "2. Display Pokedex",
                "3. Release Pokemon (by ID)",
                "4. Pokemon Fight!",
                "5. Evolve Pokemon",
                "6. Back to Main",
            ] {
                output::info(&mut self.output, line)?;
            }
            let Some(choice) = self.read_int("Your choice:")? else {
                return Ok(());
            };
            match choice {
                1 => self.add_pokemon(owner)?,
                2 => self.display_pokedex(owner)?,
                3 => self.release_pokemon(owner)?,
                4 => self.fight(owner)?,
                5 => self.evolve(owner)?,
                6 => {
                    output::info(&mut self.output, "Back to Main Menu.")?;
                    return Ok(());
                }
                _ => output::info(&mut self.output, "Invalid choice.")?,
            }
        }
    }

    fn add_pokemon(&mut self, owner: OwnerId) -> CliResult<()> {
        let Some(id) = self.read_id("Enter ID to add:")? else {
            return Ok(());
        };
        match self.service.add_pokemon(owner, id) {
            Ok(AddOutcome::Added) => {
                let name = self
                    .service
                    .catalog()
                    .get(id)
                    .map(|record| record.name.as_str())
                    .unwrap_or_default();
                output::success(&mut self.output, &format!("Pokemon {} (ID {}) added.", name, id))?;
            }
            Ok(AddOutcome::AlreadyPresent) => output::info(
                &mut self.output,
                &format!("Pokemon with ID {} is already in the Pokedex. No changes made.", id),
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn display_pokedex(&mut self, owner: OwnerId) -> CliResult<()> {
        if self.service.owner(owner)?.pokedex().is_empty() {
            output::info(&mut self.output, "Pokedex is empty.")?;
            return Ok(());
        }
        output::info(&mut self.output, "Display:")?;
        for (i, traversal) in Traversal::ALL.iter().enumerate() {
            output::info(&mut self.output, &format!("{}. {}", i + 1, traversal))?;
        }
        output::info(&mut self.output, "5. Alphabetical (by name)")?;
        output::info(&mut self.output, "6. Tree")?;

        let Some(choice) = self.read_int("Your choice:")? else {
            return Ok(());
        };
        let order = match choice {
            1..=4 => DisplayOrder::Traversal(Traversal::ALL[(choice - 1) as usize]),
            5 => DisplayOrder::Alphabetical,
            6 => {
                let tree = self.service.render_tree(owner)?;
                write!(self.output, "{}", tree)?;
                return Ok(());
            }
            _ => {
                output::info(&mut self.output, "Invalid choice.")?;
                return Ok(());
            }
        };
        for record in self.service.display(owner, order)? {
            output::info(&mut self.output, record)?;
        }
        Ok(())
    }

    fn release_pokemon(&mut self, owner: OwnerId) -> CliResult<()> {
        if self.service.owner(owner)?.pokedex().is_empty() {
            output::info(&mut self.output, "No Pokemon to release.")?;
            return Ok(());
        }
        let Some(value) = self.read_int("Enter Pokemon ID to release:")? else {
            return Ok(());
        };
        let id = RecordId::try_from(value).unwrap_or(0);
        let name = self
            .service
            .owner(owner)?
            .pokedex()
            .search(id)
            .map(|node| node.record().name.clone());
        let removed = name.is_some() && self.service.release_pokemon(owner, id)?;
        match name {
            Some(name) if removed => output::info(
                &mut self.output,
                &format!("Removing Pokemon {} (ID {}).", name, id),
            )?,
            _ => output::info(&mut self.output, &format!("No Pokemon with ID {} found.", value))?,
        }
        Ok(())
    }

    fn fight(&mut self, owner: OwnerId) -> CliResult<()> {
        if self.service.owner(owner)?.pokedex().is_empty() {
            output::info(&mut self.output, "Pokedex is empty.")?;
            return Ok(());
        }
        let Some(first) = self.read_int("Enter ID of the first Pokemon:")? else {
            return Ok(());
        };
        let Some(second) = self.read_int("Enter ID of the second Pokemon:")? else {
            return Ok(());
        };
        let ids = (RecordId::try_from(first), RecordId::try_from(second));
        let report = match ids {
            (Ok(first), Ok(second)) => match self.service.fight(owner, first, second) {
                Ok(report) => Some(report),
                Err(ApplicationError::RecordNotOwned(_)) => None,
                Err(e) => return self.report(&e),
            },
            // negative ids can never be owned
            _ => None,
        };
        let Some(report) = report else {
            output::info(&mut self.output, "One or both Pokemon IDs not found.")?;
            return Ok(());
        };

        output::detail(
            &mut self.output,
            &format!("Pokemon 1: {} (Score = {:.2})", report.first.name, report.first_score),
        )?;
        output::detail(
            &mut self.output,
            &format!("Pokemon 2: {} (Score = {:.2})", report.second.name, report.second_score),
        )?;
        match (report.result, report.winner()) {
            (FightResult::Tie, _) | (_, None) => output::info(&mut self.output, "It's a tie!")?,
            (_, Some(winner)) => {
                output::success(&mut self.output, &format!("{} wins!", winner.name))?
            }
        }
        Ok(())
    }

    fn evolve(&mut self, owner: OwnerId) -> CliResult<()> {
        if self.service.owner(owner)?.pokedex().is_empty() {
            output::info(&mut self.output, "Cannot evolve. Pokedex empty.")?;
            return Ok(());
        }
        let Some(value) = self.read_int("Enter ID of Pokemon to evolve:")? else {
            return Ok(());
        };
        let id = RecordId::try_from(value).unwrap_or(0);
        match self.service.evolve(owner, id) {
            Ok(EvolveOutcome::Evolved { from, to }) => output::success(
                &mut self.output,
                &format!(
                    "Pokemon evolved from {} (ID {}) to {} (ID {}).",
                    from.name, from.id, to.name, to.id
                ),
            )?,
            Ok(EvolveOutcome::Released { from, to }) => output::info(
                &mut self.output,
                &format!(
                    "Evolution ID {} ({}) already in the Pokedex. Releasing {} (ID {}).",
                    to.id, to.name, from.name, from.id
                ),
            )?,
            Ok(EvolveOutcome::CannotEvolve(record)) => output::info(
                &mut self.output,
                &format!("{} (ID {}) cannot evolve.", record.name, record.id),
            )?,
            Err(ApplicationError::RecordNotOwned(_)) => output::info(
                &mut self.output,
                &format!("No Pokemon with ID {} found.", value),
            )?,
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn delete_pokedex(&mut self) -> CliResult<()> {
        if self.service.owner_count() == 0 {
            output::info(&mut self.output, "No existing Pokedexes to delete.")?;
            return Ok(());
        }
        output::header(&mut self.output, "\n=== Delete a Pokedex ===")?;
        self.list_owners()?;
        let Some(owner) = self.choose_owner("Choose a Pokedex to delete by number:")? else {
            return Ok(());
        };
        let name = self.service.owner(owner)?.name().to_string();
        output::info(&mut self.output, &format!("Deleting {}'s entire Pokedex...", name))?;
        self.service.delete_pokedex(owner)?;
        output::success(&mut self.output, "Pokedex deleted.")?;
        Ok(())
    }

    fn merge_pokedexes(&mut self) -> CliResult<()> {
        if self.service.owner_count() < 2 {
            output::info(&mut self.output, "Not enough owners to merge.")?;
            return Ok(());
        }
        output::header(&mut self.output, "\n=== Merge Pokedexes ===")?;
        output::prompt(&mut self.output, "Enter name of first owner:")?;
        let Some(first) = self.read_line()? else {
            return Ok(());
        };
        output::prompt(&mut self.output, "Enter name of second owner:")?;
        let Some(second) = self.read_line()? else {
            return Ok(());
        };

        let merged = self.service.find_owner(&first).and_then(|target| {
            let source = self.service.find_owner(&second)?;
            self.service.merge(target, source)
        });
        match merged {
            Ok(added) => {
                output::info(
                    &mut self.output,
                    &format!("Merging {} and {}... ({} new)", first, second, added),
                )?;
                output::success(&mut self.output, "Merge completed.")?;
                output::info(&mut self.output, &format!("Owner '{}' has been removed after merging.", second))?;
            }
            Err(e) => self.report(&e)?,
        }
        Ok(())
    }

    fn sort_owners(&mut self) -> CliResult<()> {
        if self.service.owner_count() < 2 {
            output::info(&mut self.output, "0 or 1 owners only => no need to sort.")?;
            return Ok(());
        }
        self.service.sort_owners();
        output::success(&mut self.output, "Owners sorted by name.")?;
        Ok(())
    }

    fn print_owners_circular(&mut self) -> CliResult<()> {
        if self.service.owner_count() == 0 {
            output::info(&mut self.output, "No owners.")?;
            return Ok(());
        }
        let direction = loop {
            output::prompt(&mut self.output, "Enter direction (F or B):")?;
            let Some(line) = self.read_line()? else {
                return Ok(());
            };
            match line.as_str() {
                "F" | "f" => break Direction::Forward,
                "B" | "b" => break Direction::Backward,
                _ => output::info(&mut self.output, "Invalid direction, must be F or B.")?,
            }
        };
        let Some(count) = self.read_int("How many prints?")? else {
            return Ok(());
        };
        let count = usize::try_from(count).unwrap_or(0);
        for (step, name) in self.service.walk_owners(direction, count) {
            output::info(&mut self.output, &format!("[{}] {}", step, name))?;
        }
        Ok(())
    }
}
