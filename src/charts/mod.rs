//! Charts module - Static chart export

mod renderer;

pub use renderer::{
    status_color, ChartError, ChartRenderer, COMPANY_BAR_FILE, OUTCOME_STACK_FILE,
    STATUS_PIE_FILE, SUCCESS_LINE_FILE,
};
