//! Progress Page - Shows conversion progress
//!
//! ARCHITECTURE: the conversion runs on the worker thread (see `worker`).
//! This page drains the worker channel from a `glib::timeout_add_local`
//! callback, so every widget update happens on the GTK main thread.

use crate::converter::{ConversionRequest, ConversionResult};
use crate::settings;
use crate::worker::{self, ConversionMessage};
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::sync::mpsc::TryRecvError;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct ProgressPage {
        pub progress_bar: RefCell<Option<gtk::ProgressBar>>,
        pub percent_label: RefCell<Option<gtk::Label>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for ProgressPage {
        const NAME: &'static str = "TiffconvProgressPage";
        type Type = super::ProgressPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for ProgressPage {
        fn constructed(&self) {
            self.parent_constructed();
            self.obj().setup_ui();
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| {
                vec![
                    // (succeeded, error message or "")
                    glib::subclass::Signal::builder("conversion-finished")
                        .param_types([bool::static_type(), String::static_type()])
                        .build(),
                ]
            })
        }
    }

    impl WidgetImpl for ProgressPage {}
    impl BoxImpl for ProgressPage {}
}

glib::wrapper! {
    pub struct ProgressPage(ObjectSubclass<imp::ProgressPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl ProgressPage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 12)
            .property("valign", gtk::Align::Center)
            .property("vexpand", true)
            .build()
    }

    fn setup_ui(&self) {
        let imp = self.imp();

        let status_label = gtk::Label::builder()
            .label("Converting...")
            .css_classes(["title-3"])
            .build();

        let progress_bar = gtk::ProgressBar::builder()
            .show_text(false)
            .width_request(300)
            .halign(gtk::Align::Center)
            .margin_top(8)
            .build();

        let percent_label = gtk::Label::builder()
            .label("0%")
            .css_classes(["numeric", "dim-label"])
            .build();

        self.append(&status_label);
        self.append(&progress_bar);
        self.append(&percent_label);

        *imp.progress_bar.borrow_mut() = Some(progress_bar);
        *imp.percent_label.borrow_mut() = Some(percent_label);
    }

    /// Run `request` on the worker thread and follow its progress
    pub fn start(&self, request: ConversionRequest) {
        let handle = match worker::spawn(request, settings::worker::CHANNEL_CAPACITY) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("{:#}", e);
                // Deferred so the wizard has finished showing this page
                let result = ConversionResult::failure(format!("{:#}", e));
                glib::idle_add_local_once(glib::clone!(@weak self as page => move || {
                    page.emit_finished(&result);
                }));
                return;
            }
        };

        let page = self.clone();
        glib::timeout_add_local(settings::worker::POLL_INTERVAL, move || loop {
            match handle.try_recv() {
                Ok(ConversionMessage::Progress(percent)) => {
                    page.update_progress(percent);
                }
                Ok(ConversionMessage::Finished(result)) => {
                    page.emit_finished(&result);
                    return glib::ControlFlow::Break;
                }
                Err(TryRecvError::Empty) => return glib::ControlFlow::Continue,
                Err(TryRecvError::Disconnected) => {
                    tracing::error!("Conversion worker exited without a result");
                    page.emit_finished(&worker::worker_lost());
                    return glib::ControlFlow::Break;
                }
            }
        });
    }

    fn update_progress(&self, percent: u8) {
        let imp = self.imp();

        if let Some(ref bar) = *imp.progress_bar.borrow() {
            bar.set_fraction(f64::from(percent) / 100.0);
        }

        if let Some(ref label) = *imp.percent_label.borrow() {
            label.set_label(&format!("{}%", percent));
        }
    }

    fn emit_finished(&self, result: &ConversionResult) {
        let message = result.error_message().unwrap_or_default().to_string();
        self.emit_by_name::<()>("conversion-finished", &[&result.succeeded(), &message]);
    }
}

impl Default for ProgressPage {
    fn default() -> Self {
        Self::new()
    }
}
