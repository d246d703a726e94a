pub mod use_cases;

pub use use_cases::predict::{Clock, PredictUseCase, SystemClock};
pub use use_cases::reference_catalog::load_choices;
