pub mod current_conditions;
pub mod forecast_list;
pub mod search_input;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use current_conditions::{CurrentConditionsProps, CurrentConditionsView};
pub use forecast_list::{ForecastListProps, ForecastListView};
pub use search_input::{SearchInput, SearchInputProps};
pub use weather_display::{WeatherDisplay, WeatherDisplayProps};
