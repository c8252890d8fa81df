use dialoguer::{Confirm, Input, Select};
use strsim::jaro_winkler;

use crate::error::Result;
use crate::models::Catalog;
use crate::reader::RawCell;

/// Minimum similarity for a fuzzy item suggestion.
const FUZZY_THRESHOLD: f64 = 0.7;

/// Maximum suggestions shown for an ambiguous item name.
const MAX_SUGGESTIONS: usize = 5;

/// Actions offered by the interactive budget menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    StartBudget,
    AddLine,
    SetItem,
    SetQuantity,
    ShowBudget,
    ShowCatalog,
    ReloadCatalog,
    Export,
    Quit,
}

impl MenuAction {
    const ALL: [MenuAction; 9] = [
        MenuAction::StartBudget,
        MenuAction::AddLine,
        MenuAction::SetItem,
        MenuAction::SetQuantity,
        MenuAction::ShowBudget,
        MenuAction::ShowCatalog,
        MenuAction::ReloadCatalog,
        MenuAction::Export,
        MenuAction::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            MenuAction::StartBudget => "Start new budget (clears lines)",
            MenuAction::AddLine => "Add line",
            MenuAction::SetItem => "Choose item for a line",
            MenuAction::SetQuantity => "Set quantity for a line",
            MenuAction::ShowBudget => "Show budget",
            MenuAction::ShowCatalog => "Show catalog",
            MenuAction::ReloadCatalog => "Load another catalog file",
            MenuAction::Export => "Export budget",
            MenuAction::Quit => "Quit",
        }
    }
}

/// Result of matching typed text against catalog item names.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemMatch {
    Exact(String),
    /// Best candidates first.
    Suggestions(Vec<String>),
    NoMatch,
}

/// What the user chose for a line's item.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemChoice {
    Selected(String),
    Clear,
    Cancel,
}

/// Match `input` against catalog names: exact (case-insensitive, trimmed)
/// first, then Jaro-Winkler suggestions above the threshold.
pub fn match_item(catalog: &Catalog, input: &str) -> ItemMatch {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return ItemMatch::NoMatch;
    }

    if let Some(item) = catalog
        .items()
        .iter()
        .find(|i| i.name.trim().to_lowercase() == needle)
    {
        return ItemMatch::Exact(item.name.clone());
    }

    let mut candidates: Vec<(&str, f64)> = catalog
        .items()
        .iter()
        .map(|i| (i.name.as_str(), jaro_winkler(&i.name.to_lowercase(), &needle)))
        .filter(|(_, score)| *score > FUZZY_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    if candidates.is_empty() {
        ItemMatch::NoMatch
    } else {
        ItemMatch::Suggestions(
            candidates
                .into_iter()
                .take(MAX_SUGGESTIONS)
                .map(|(name, _)| name.to_string())
                .collect(),
        )
    }
}

/// Parse a typed quantity, accepting `2.5` or `2,5`.
pub fn parse_quantity(input: &str) -> Option<f64> {
    RawCell::Text(input.to_string()).as_number()
}

pub fn prompt_menu_action() -> Result<MenuAction> {
    let labels: Vec<&str> = MenuAction::ALL.iter().map(|a| a.label()).collect();
    let selection = Select::new()
        .with_prompt("What next?")
        .items(&labels)
        .default(0)
        .interact()?;
    Ok(MenuAction::ALL[selection])
}

/// Ask which line to edit. Returns `None` when the budget has no lines.
pub fn prompt_line_index(line_count: usize) -> Result<Option<usize>> {
    if line_count == 0 {
        return Ok(None);
    }
    if line_count == 1 {
        return Ok(Some(0));
    }

    let labels: Vec<String> = (1..=line_count).map(|n| format!("Line {}", n)).collect();
    let selection = Select::new()
        .with_prompt("Which line?")
        .items(&labels)
        .default(line_count - 1)
        .interact()?;
    Ok(Some(selection))
}

/// Ask for an item name with fuzzy matching. Empty input clears the line.
pub fn prompt_item(catalog: &Catalog) -> Result<ItemChoice> {
    loop {
        let input: String = Input::new()
            .with_prompt("Item name (empty to clear the line)")
            .allow_empty(true)
            .interact_text()?;

        if input.trim().is_empty() {
            return Ok(ItemChoice::Clear);
        }

        match match_item(catalog, &input) {
            ItemMatch::Exact(name) => return Ok(ItemChoice::Selected(name)),
            ItemMatch::NoMatch => {
                println!("No matching item found for '{}'", input.trim());
                if !prompt_yes_no("Try again?", true)? {
                    return Ok(ItemChoice::Cancel);
                }
            }
            ItemMatch::Suggestions(options) if options.len() == 1 => {
                let confirm = Confirm::new()
                    .with_prompt(format!("Did you mean '{}'?", options[0]))
                    .default(true)
                    .interact()?;
                if confirm {
                    return Ok(ItemChoice::Selected(options[0].clone()));
                }
            }
            ItemMatch::Suggestions(options) => {
                let mut selection_options = options.clone();
                selection_options.push("None of these".to_string());

                let selection = Select::new()
                    .with_prompt("Which did you mean?")
                    .items(&selection_options)
                    .default(0)
                    .interact()?;

                if selection < options.len() {
                    return Ok(ItemChoice::Selected(options[selection].clone()));
                }
            }
        }
    }
}

/// Ask for a quantity. Re-prompts until the text parses as a number.
pub fn prompt_quantity(current: f64) -> Result<f64> {
    let input: String = Input::new()
        .with_prompt("Quantity")
        .default(current.to_string())
        .validate_with(|input: &String| -> std::result::Result<(), &str> {
            match parse_quantity(input) {
                Some(_) => Ok(()),
                None => Err("Invalid number"),
            }
        })
        .interact_text()?;

    Ok(parse_quantity(&input).unwrap_or(0.0))
}

pub fn prompt_path(prompt: &str, default: &str) -> Result<String> {
    let input: String = Input::new()
        .with_prompt(prompt)
        .default(default.to_string())
        .interact_text()?;
    Ok(input.trim().to_string())
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CatalogItem;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new("Base");
        for name in ["Cimento CP-II", "Cimento CP-V", "Areia média", "Tijolo"] {
            catalog.insert(CatalogItem::priced(name, "un", 1.0, 1.0).unwrap());
        }
        catalog
    }

    #[test]
    fn test_match_item_exact_ignores_case() {
        assert_eq!(
            match_item(&catalog(), "  tijolo "),
            ItemMatch::Exact("Tijolo".to_string())
        );
    }

    #[test]
    fn test_match_item_suggests_close_names() {
        match match_item(&catalog(), "cimento") {
            ItemMatch::Suggestions(options) => {
                assert!(options.contains(&"Cimento CP-II".to_string()));
                assert!(options.contains(&"Cimento CP-V".to_string()));
                assert!(!options.contains(&"Tijolo".to_string()));
            }
            other => panic!("expected suggestions, got {:?}", other),
        }
    }

    #[test]
    fn test_match_item_no_match() {
        assert_eq!(match_item(&catalog(), "xyzzy"), ItemMatch::NoMatch);
        assert_eq!(match_item(&catalog(), "   "), ItemMatch::NoMatch);
    }

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("2,5"), Some(2.5));
        assert_eq!(parse_quantity(" 3 "), Some(3.0));
        assert_eq!(parse_quantity("-1"), Some(-1.0));
        assert_eq!(parse_quantity("dois"), None);
    }

    #[test]
    fn test_menu_labels_are_distinct() {
        let labels: std::collections::HashSet<&str> =
            MenuAction::ALL.iter().map(|a| a.label()).collect();
        assert_eq!(labels.len(), MenuAction::ALL.len());
    }
}
