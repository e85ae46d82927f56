//! UI Module - GTK4 + Libadwaita Interface
//!
//! A fixed-size window whose content is replaced page by page as the user
//! walks through the wizard.

use crate::state::WizardState;
use std::cell::RefCell;
use std::rc::Rc;

pub mod app;
pub mod dialogs;
pub mod pages;
pub mod window;
pub mod wizard;

/// Wizard state shared by the host and the pages, main thread only
pub type SharedState = Rc<RefCell<WizardState>>;
