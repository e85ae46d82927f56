//! Wizard Pages - one widget per wizard step
//!
//! Pages never navigate on their own. They update the shared wizard state
//! and emit signals; the wizard host decides what is shown next.

mod complete;
mod progress;
mod select_input;
mod select_output;
mod welcome;

pub use complete::CompletePage;
pub use progress::ProgressPage;
pub use select_input::SelectInputPage;
pub use select_output::SelectOutputPage;
pub use welcome::WelcomePage;
