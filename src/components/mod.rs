pub mod forecast_strip;
pub mod location_header;
pub mod message_panels;
pub mod results_panel;
pub mod search_bar;
pub mod weather_display;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use forecast_strip::{ForecastStrip, ForecastStripProps};
pub use location_header::{LocationHeader, LocationHeaderProps};
pub use message_panels::{NotFoundPanel, NotFoundPanelProps, SearchPromptPanel, SearchPromptPanelProps};
pub use results_panel::{ResultsPanel, ResultsPanelProps};
pub use search_bar::{SearchBar, SearchBarProps};
pub use weather_display::{ERROR_ICON, WeatherDisplay, WeatherDisplayProps};
