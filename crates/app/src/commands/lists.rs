//! List and participant commands

use std::fmt::Write;

use sorteador_core::{RaffleList, Result};
use tracing::info;
use uuid::Uuid;

use crate::cli::{ListCommand, NameCommand};
use crate::state::AppState;

pub fn run_list(state: &mut AppState, cmd: ListCommand) -> Result<String> {
    match cmd {
        ListCommand::Create { name, description } => {
            let existing = state.db.lists().list_all()?;
            let mut list = RaffleList::named(&name, &existing)?;
            if let Some(description) = description {
                list = list.with_description(description);
            }
            state.db.lists().create(&list)?;
            info!(list_id = %list.id, "List created");
            Ok(format!("Created list \"{}\" ({})", list.name, list.id))
        }
        ListCommand::All => {
            let lists = state.db.lists().list_all()?;
            if lists.is_empty() {
                return Ok("No lists yet".to_string());
            }
            let mut out = String::new();
            for list in lists {
                let _ = writeln!(
                    out,
                    "{}  {} ({} names, {} drawn this cycle)",
                    list.id,
                    list.name,
                    list.names.len(),
                    list.names.len() - list.undrawn().len()
                );
            }
            Ok(out)
        }
        ListCommand::Show { list_id } => {
            let list = state.db.lists().get(list_id)?;
            Ok(describe_list(&list, &list.search("")))
        }
        ListCommand::Search { list_id, term } => {
            let list = state.db.lists().get(list_id)?;
            Ok(describe_list(&list, &list.search(&term)))
        }
        ListCommand::Rename { list_id, name } => {
            let list = state.db.lists().get(list_id)?;
            let existing = state.db.lists().list_all()?;
            let renamed = list.renamed(&name, &existing)?;
            state.db.lists().update(&renamed)?;
            info!(%list_id, "List renamed");
            Ok(format!("Renamed \"{}\" to \"{}\"", list.name, renamed.name))
        }
        ListCommand::Duplicate { list_id } => {
            let list = state.db.lists().get(list_id)?;
            let existing = state.db.lists().list_all()?;
            let copy = list.duplicate(&existing);
            state.db.lists().create(&copy)?;
            info!(%list_id, copy_id = %copy.id, "List duplicated");
            Ok(format!("Created list \"{}\" ({})", copy.name, copy.id))
        }
        ListCommand::Delete { list_id } => {
            state.db.lists().delete(list_id)?;
            info!(%list_id, "List deleted");
            Ok(format!("Deleted list {}", list_id))
        }
    }
}

pub fn run_name(state: &mut AppState, cmd: NameCommand) -> Result<String> {
    match cmd {
        NameCommand::Add { list_id, name } => {
            let list = state.db.lists().get(list_id)?;
            let updated = list.add_name(&name)?;
            state.db.lists().update(&updated)?;
            Ok(format!("Added \"{}\"", name.trim()))
        }
        NameCommand::Import {
            list_id,
            names,
            file,
        } => {
            let text = match file {
                Some(path) => std::fs::read_to_string(path)?,
                None => names.unwrap_or_default(),
            };
            let list = state.db.lists().get(list_id)?;
            let (updated, added) = list.import_names(&text);
            if added == 0 {
                return Ok("No new names: every imported name was already on the list".into());
            }
            state.db.lists().update(&updated)?;
            info!(%list_id, added, "Names imported");
            Ok(format!("Imported {} new name(s)", added))
        }
        NameCommand::Remove {
            list_id,
            participant_id,
        } => {
            let list = state.db.lists().get(list_id)?;
            let updated = list.remove_name(participant_id)?;
            state.db.lists().update(&updated)?;
            Ok(format!("Removed participant {}", participant_id))
        }
    }
}

pub fn reset(state: &mut AppState, list_id: Uuid) -> Result<String> {
    let list = state.db.lists().get(list_id)?;
    state.db.lists().update(&list.reset_fair_mode())?;
    info!(%list_id, "Fair-mode cycle reset");
    Ok(format!("Fair-mode cycle of \"{}\" restarted", list.name))
}

fn describe_list(list: &RaffleList, shown: &[&sorteador_core::Participant]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", list.name, list.id);
    if let Some(description) = &list.description {
        let _ = writeln!(out, "{}", description);
    }
    let _ = writeln!(out, "Names ({} / {}):", shown.len(), list.names.len());
    for participant in shown {
        let marker = if list.drawn_names.contains(&participant.id) {
            "*"
        } else {
            " "
        };
        let _ = writeln!(out, " {} {}  {}", marker, participant.id, participant.name);
    }
    out
}
