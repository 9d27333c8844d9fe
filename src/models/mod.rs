mod state;
mod widget;

pub use state::AppState;
pub use widget::{Dimensions, WidgetRequest, WidgetResponse};
