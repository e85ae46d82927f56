//! Complete Page - Shows success or failure after a conversion
//!
//! Offers to open the output folder (success only) and to go back to the
//! welcome screen.

use crate::converter::ConversionResult;
use crate::shell;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::path::PathBuf;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct CompletePage {
        pub output_directory: RefCell<Option<PathBuf>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for CompletePage {
        const NAME: &'static str = "TiffconvCompletePage";
        type Type = super::CompletePage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for CompletePage {
        fn constructed(&self) {
            self.parent_constructed();
            // NOTE: setup_ui() needs the result, so it runs from new()
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| vec![glib::subclass::Signal::builder("restart-clicked").build()])
        }
    }

    impl WidgetImpl for CompletePage {}
    impl BoxImpl for CompletePage {}
}

glib::wrapper! {
    pub struct CompletePage(ObjectSubclass<imp::CompletePage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl CompletePage {
    pub fn new(result: &ConversionResult, output_directory: Option<PathBuf>) -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 12)
            .property("valign", gtk::Align::Center)
            .property("vexpand", true)
            .build();

        *obj.imp().output_directory.borrow_mut() = output_directory;
        obj.setup_ui(result);

        obj
    }

    fn setup_ui(&self, result: &ConversionResult) {
        let (icon_name, icon_class, title) = if result.succeeded() {
            ("emblem-ok-symbolic", "success", "Conversion completed successfully!".to_string())
        } else {
            (
                "dialog-error-symbolic",
                "error",
                format!(
                    "Conversion failed: {}",
                    result.error_message().unwrap_or("unknown error")
                ),
            )
        };

        let icon = gtk::Image::builder()
            .icon_name(icon_name)
            .pixel_size(56)
            .css_classes([icon_class])
            .build();

        let title_label = gtk::Label::builder()
            .label(&title)
            .css_classes(["title-3"])
            .wrap(true)
            .max_width_chars(50)
            .justify(gtk::Justification::Center)
            .margin_bottom(12)
            .build();

        self.append(&icon);
        self.append(&title_label);

        let button_box = gtk::Box::builder()
            .orientation(gtk::Orientation::Horizontal)
            .spacing(12)
            .halign(gtk::Align::Center)
            .build();

        if result.succeeded() {
            let open_button = gtk::Button::builder()
                .label("Open Output Folder")
                .css_classes(["pill", "suggested-action"])
                .height_request(40)
                .build();

            open_button.connect_clicked(glib::clone!(
                @weak self as page =>
                move |_| {
                    page.open_output_folder();
                }
            ));

            button_box.append(&open_button);
        }

        let restart_button = gtk::Button::builder()
            .label("Back to Start")
            .css_classes(["pill"])
            .height_request(40)
            .build();

        restart_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |_| {
                page.emit_by_name::<()>("restart-clicked", &[]);
            }
        ));

        button_box.append(&restart_button);
        self.append(&button_box);
    }

    fn open_output_folder(&self) {
        match *self.imp().output_directory.borrow() {
            Some(ref dir) => shell::open_folder_logged(dir),
            None => tracing::warn!("No output folder to open"),
        }
    }
}
