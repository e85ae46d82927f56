//! Output Page - choose or name the destination folder
//!
//! Two ways in: pick an existing folder, or pick a parent and type a new
//! subfolder name. The folder itself is created when the conversion starts.

use crate::ui::{dialogs, SharedState};
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::path::{Path, PathBuf};

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct SelectOutputPage {
        pub state: RefCell<Option<SharedState>>,
        pub path_label: RefCell<Option<gtk::Label>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SelectOutputPage {
        const NAME: &'static str = "TiffconvSelectOutputPage";
        type Type = super::SelectOutputPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for SelectOutputPage {
        fn constructed(&self) {
            self.parent_constructed();
            // NOTE: setup_ui() runs from new(), once the state is attached
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| vec![glib::subclass::Signal::builder("next-clicked").build()])
        }
    }

    impl WidgetImpl for SelectOutputPage {}
    impl BoxImpl for SelectOutputPage {}
}

glib::wrapper! {
    pub struct SelectOutputPage(ObjectSubclass<imp::SelectOutputPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl SelectOutputPage {
    pub fn new(state: SharedState) -> Self {
        let obj: Self = glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 8)
            .property("vexpand", true)
            .build();

        *obj.imp().state.borrow_mut() = Some(state);
        obj.setup_ui();

        obj
    }

    fn state(&self) -> Option<SharedState> {
        self.imp().state.borrow().clone()
    }

    fn setup_ui(&self) {
        let current = self.state().and_then(|s| {
            let output = s.borrow().output_directory().map(Path::to_path_buf);
            output
        });

        let intro = gtk::Label::builder()
            .label("Select or create the folder where the converted images will be saved:")
            .halign(gtk::Align::Start)
            .wrap(true)
            .build();

        let existing_button = gtk::Button::builder()
            .label("Select Existing Folder")
            .halign(gtk::Align::Start)
            .build();

        existing_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |button| {
                dialogs::pick_folder(button, "Select the output folder", glib::clone!(
                    @weak page => move |folder| {
                        page.set_output(folder);
                    }
                ));
            }
        ));

        let create_button = gtk::Button::builder()
            .label("Create New Folder")
            .halign(gtk::Align::Start)
            .build();

        create_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |button| {
                dialogs::pick_folder(button, "Select where to create the folder", glib::clone!(
                    @weak page => move |base| {
                        page.create_subfolder(base);
                    }
                ));
            }
        ));

        let path_label = gtk::Label::builder()
            .halign(gtk::Align::Start)
            .ellipsize(gtk::pango::EllipsizeMode::Middle)
            .max_width_chars(60)
            .css_classes(["caption", "dim-label"])
            .build();

        let start_button = gtk::Button::builder()
            .label("Start Conversion")
            .css_classes(["pill", "suggested-action"])
            .halign(gtk::Align::Center)
            .width_request(180)
            .margin_top(20)
            .build();

        start_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |_| {
                page.emit_by_name::<()>("next-clicked", &[]);
            }
        ));

        self.append(&intro);
        self.append(&existing_button);
        self.append(&create_button);
        self.append(&path_label);
        self.append(&start_button);

        *self.imp().path_label.borrow_mut() = Some(path_label);
        self.show_output(current.as_deref());
    }

    fn set_output(&self, folder: Option<PathBuf>) {
        if let Some(state) = self.state() {
            state.borrow_mut().set_output_directory(folder.clone());
        }
        tracing::info!("Output folder: {:?}", folder);
        self.show_output(folder.as_deref());
    }

    fn create_subfolder(&self, base: Option<PathBuf>) {
        let Some(base) = base else {
            self.set_output(None);
            return;
        };

        dialogs::ask_folder_name(self, glib::clone!(
            @weak self as page => move |name| {
                let Some(state) = page.state() else {
                    return;
                };
                let result = state
                    .borrow_mut()
                    .create_output_subfolder(Some(base), name.as_deref());
                let output = state.borrow().output_directory().map(Path::to_path_buf);
                page.show_output(output.as_deref());

                if let Err(e) = result {
                    dialogs::show_error(&page, &e.to_string());
                }
            }
        ));
    }

    fn show_output(&self, folder: Option<&Path>) {
        if let Some(ref label) = *self.imp().path_label.borrow() {
            let text = folder
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "No folder selected".to_string());
            label.set_label(&text);
        }
    }
}
