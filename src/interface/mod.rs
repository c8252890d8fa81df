pub mod prompts;
pub mod render;

pub use prompts::{
    match_item, parse_quantity, prompt_item, prompt_line_index, prompt_menu_action, prompt_path,
    prompt_quantity, prompt_yes_no, ItemChoice, ItemMatch, MenuAction,
};
pub use render::{display_budget, display_catalog, display_load_summary};
