//! Wizard Host - swaps one page at a time
//!
//! Owns the shared [`WizardState`](crate::state::WizardState). Every
//! transition drops the current page widget before the next one is built,
//! so there is never more than one page alive and no back-stack.

use crate::converter::ConversionResult;
use crate::state::WizardStep;
use crate::ui::dialogs;
use crate::ui::pages::{CompletePage, ProgressPage, SelectInputPage, SelectOutputPage, WelcomePage};
use crate::ui::SharedState;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct WizardHost {
        pub state: SharedState,
        pub current_page: RefCell<Option<gtk::Widget>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for WizardHost {
        const NAME: &'static str = "TiffconvWizardHost";
        type Type = super::WizardHost;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for WizardHost {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().show_current();
        }
    }

    impl WidgetImpl for WizardHost {}
    impl BoxImpl for WizardHost {}
}

glib::wrapper! {
    pub struct WizardHost(ObjectSubclass<imp::WizardHost>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl WizardHost {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("vexpand", true)
            .build()
    }

    fn state(&self) -> SharedState {
        self.imp().state.clone()
    }

    /// Replace the visible page with the one for the current step
    fn show_current(&self) {
        let imp = self.imp();

        let previous = imp.current_page.borrow_mut().take();
        if let Some(previous) = previous {
            self.remove(&previous);
        }

        let step = imp.state.borrow().step();
        tracing::debug!("Showing wizard step {:?}", step);

        let page: gtk::Widget = match step {
            WizardStep::Welcome => {
                let page = WelcomePage::new();
                self.connect_advance(&page, "next-clicked");
                page.upcast()
            }
            WizardStep::SelectInputFormat => {
                let page = SelectInputPage::new(self.state());
                self.connect_advance(&page, "next-clicked");
                page.upcast()
            }
            WizardStep::SelectOutput => {
                let page = SelectOutputPage::new(self.state());
                self.connect_advance(&page, "next-clicked");
                page.upcast()
            }
            WizardStep::Converting => {
                let page = ProgressPage::new();
                page.connect_local(
                    "conversion-finished",
                    false,
                    glib::clone!(@weak self as host => @default-return None, move |values: &[glib::Value]| {
                        let succeeded = values[1].get::<bool>().unwrap_or(false);
                        let message = values[2].get::<String>().unwrap_or_default();
                        let result = if succeeded {
                            ConversionResult::success()
                        } else {
                            ConversionResult::failure(message)
                        };
                        host.finish(result);
                        None
                    }),
                );
                page.upcast()
            }
            WizardStep::Result => {
                let (result, output) = {
                    let state = imp.state.borrow();
                    (
                        state
                            .outcome()
                            .cloned()
                            .unwrap_or_else(|| ConversionResult::failure("no conversion has run")),
                        state.output_directory().map(|p| p.to_path_buf()),
                    )
                };
                let page = CompletePage::new(&result, output);
                self.connect_advance(&page, "restart-clicked");
                page.upcast()
            }
        };

        self.append(&page);
        *imp.current_page.borrow_mut() = Some(page.clone());

        if let Some(progress) = page.downcast_ref::<ProgressPage>() {
            self.start_conversion(progress);
        }
    }

    fn connect_advance(&self, page: &impl IsA<glib::Object>, signal: &str) {
        page.connect_local(
            signal,
            false,
            glib::clone!(@weak self as host => @default-return None, move |_| {
                host.advance();
                None
            }),
        );
    }

    fn advance(&self) {
        let result = self.imp().state.borrow_mut().advance();
        match result {
            Ok(step) => {
                tracing::info!("Wizard advanced to {:?}", step);
                self.show_current();
            }
            Err(e) => dialogs::show_error(self, &e.to_string()),
        }
    }

    fn start_conversion(&self, page: &ProgressPage) {
        let request = self.imp().state.borrow().conversion_request();
        match request {
            Ok(request) => page.start(request),
            Err(e) => {
                tracing::error!("Cannot start conversion: {}", e);
                self.finish(ConversionResult::failure(e.to_string()));
            }
        }
    }

    fn finish(&self, result: ConversionResult) {
        self.imp().state.borrow_mut().finish(result);
        self.show_current();
    }
}

impl Default for WizardHost {
    fn default() -> Self {
        Self::new()
    }
}
