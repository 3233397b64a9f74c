pub mod city_form;
pub mod compare_display;
pub mod palette;
pub mod results_body;
pub mod title_header;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use city_form::{CityForm, CityFormProps};
pub use compare_display::{CompareDisplay, CompareDisplayProps};
pub use results_body::{ERROR_ICON, ResultsBody, ResultsBodyProps};
pub use title_header::{TitleHeader, TitleHeaderProps};
