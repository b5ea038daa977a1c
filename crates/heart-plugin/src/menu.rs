use heart_variants::{Button, TextMenu, Variants};
use std::sync::Arc;

pub const SECTION_TITLE: &str = "Heart Variants";
pub const RESET_ALL_LABEL: &str = "Reset all Heart Variants to default values";

/// Append the mod's options: a sub-header, every variant in order, and a
/// reset-all button.
pub fn create_menu_section(variants: &Arc<Variants>, menu: &mut TextMenu) {
    menu.add_sub_header(SECTION_TITLE);
    variants.add_all_to_menu(menu);
    let variants = variants.clone();
    menu.add_button(Button::new(RESET_ALL_LABEL).pressed(move |_| variants.reset_all()));
}
