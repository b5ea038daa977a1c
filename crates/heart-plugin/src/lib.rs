pub mod callbacks;
pub mod menu;
pub mod module;

pub use callbacks::{orb_count, transform_orb, transform_value};
pub use menu::{create_menu_section, RESET_ALL_LABEL, SECTION_TITLE};
pub use module::{HeartVariantsModule, COLLECT_ROUTINE};
