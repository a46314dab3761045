//! Interactive adjustment of the dashboard's display settings

use crate::top::CategoryFilter;
use dialoguer::{FuzzySelect, Input, Select};
use std::num::NonZeroUsize;

/// What the user wants to do after looking at the dashboard
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Action {
    /// Pick another country filter
    Country,

    /// Change the number of ranked institutions
    TopInstitutions,

    /// Change the number of ranked topics
    TopTopics,

    /// Change the number of countries in the per-country breakdown
    TopCountries,

    /// Stop here
    Quit,
}
//
impl Action {
    /// Every action, with its menu label
    const MENU: [(&'static str, Action); 5] = [
        ("Filter by country", Action::Country),
        ("Top N institutions", Action::TopInstitutions),
        ("Top N topics", Action::TopTopics),
        ("Top N countries", Action::TopCountries),
        ("Quit", Action::Quit),
    ];
}

/// Ask the user what to do next
pub fn prompt_action() -> dialoguer::Result<Action> {
    let labels = Action::MENU.map(|(label, _action)| label);
    let idx = Select::new()
        .with_prompt("Change display settings")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(Action::MENU[idx].1)
}

/// Ask the user to pick a country filter
pub fn prompt_country(
    choices: &[CategoryFilter],
    current: &CategoryFilter,
) -> dialoguer::Result<CategoryFilter> {
    let labels = choices
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>();
    let idx = FuzzySelect::new()
        .with_prompt("Filter by country")
        .items(&labels)
        .default(choice_index(choices, current))
        .max_length(usize::MAX)
        .interact()?;
    Ok(choices[idx].clone())
}

/// Position of the active filter among the choices, or of "All" if the active
/// filter matches nothing
fn choice_index(choices: &[CategoryFilter], current: &CategoryFilter) -> usize {
    choices
        .iter()
        .position(|choice| choice == current)
        .unwrap_or(0)
}

/// Ask the user for a new number of displayed records, between 1 and `max`
pub fn prompt_top_n(
    what: &str,
    current: NonZeroUsize,
    max: usize,
) -> dialoguer::Result<NonZeroUsize> {
    let max = max.max(1);
    let n = Input::<usize>::new()
        .with_prompt(format!("{what} (1-{max})"))
        .default(current.get().min(max))
        .validate_with(move |n: &usize| -> Result<(), String> {
            if (1..=max).contains(n) {
                Ok(())
            } else {
                Err(format!("please pick a number between 1 and {max}"))
            }
        })
        .interact_text()?;
    Ok(NonZeroUsize::new(n).unwrap_or(current))
}
