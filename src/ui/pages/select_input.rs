//! Input Page - choose the TIFF folder and the output format
//!
//! Nothing here blocks leaving the page; the wizard host refuses to move on
//! while no input folder is set.

use crate::converter::TargetFormat;
use crate::ui::{dialogs, SharedState};
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;
use std::cell::RefCell;
use std::path::Path;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct SelectInputPage {
        pub state: RefCell<Option<SharedState>>,
        pub path_label: RefCell<Option<gtk::Label>>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for SelectInputPage {
        const NAME: &'static str = "TiffconvSelectInputPage";
        type Type = super::SelectInputPage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for SelectInputPage {
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

    impl WidgetImpl for SelectInputPage {}
    impl BoxImpl for SelectInputPage {}
}

glib::wrapper! {
    pub struct SelectInputPage(ObjectSubclass<imp::SelectInputPage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl SelectInputPage {
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
        let Some(state) = self.state() else {
            tracing::warn!("SelectInputPage::setup_ui called without wizard state");
            return;
        };
        let (input, format) = {
            let state = state.borrow();
            (state.input_directory().map(Path::to_path_buf), state.target_format())
        };

        let input_label = gtk::Label::builder()
            .label("Select the folder containing the TIFF files to convert:")
            .halign(gtk::Align::Start)
            .wrap(true)
            .build();

        let input_button = gtk::Button::builder()
            .label("Select Input Folder")
            .halign(gtk::Align::Start)
            .build();

        let path_label = gtk::Label::builder()
            .halign(gtk::Align::Start)
            .ellipsize(gtk::pango::EllipsizeMode::Middle)
            .max_width_chars(60)
            .css_classes(["caption", "dim-label"])
            .margin_bottom(12)
            .build();

        input_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |button| {
                dialogs::pick_folder(button, "Select the input folder", glib::clone!(
                    @weak page => move |folder| {
                        if let Some(state) = page.state() {
                            state.borrow_mut().set_input_directory(folder.clone());
                        }
                        tracing::info!("Input folder: {:?}", folder);
                        page.show_input(folder.as_deref());
                    }
                ));
            }
        ));

        let format_label = gtk::Label::builder()
            .label("Select the output format:")
            .halign(gtk::Align::Start)
            .build();

        let labels: Vec<&str> = TargetFormat::ALL.iter().map(TargetFormat::as_str).collect();
        let format_dropdown = gtk::DropDown::from_strings(&labels);
        format_dropdown.set_halign(gtk::Align::Start);
        let selected = TargetFormat::ALL
            .iter()
            .position(|f| *f == format)
            .unwrap_or_default();
        format_dropdown.set_selected(selected as u32);

        format_dropdown.connect_selected_notify(glib::clone!(
            @weak self as page =>
            move |dropdown| {
                let Some(format) = TargetFormat::ALL.get(dropdown.selected() as usize) else {
                    return;
                };
                if let Some(state) = page.state() {
                    state.borrow_mut().set_target_format(*format);
                }
                tracing::debug!("Output format: {}", format);
            }
        ));

        let next_button = gtk::Button::builder()
            .label("Next")
            .css_classes(["pill", "suggested-action"])
            .halign(gtk::Align::Center)
            .width_request(140)
            .margin_top(20)
            .build();

        next_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |_| {
                page.emit_by_name::<()>("next-clicked", &[]);
            }
        ));

        self.append(&input_label);
        self.append(&input_button);
        self.append(&path_label);
        self.append(&format_label);
        self.append(&format_dropdown);
        self.append(&next_button);

        *self.imp().path_label.borrow_mut() = Some(path_label);
        self.show_input(input.as_deref());
    }

    fn show_input(&self, folder: Option<&Path>) {
        if let Some(ref label) = *self.imp().path_label.borrow() {
            let text = folder
                .map(|f| f.display().to_string())
                .unwrap_or_else(|| "No folder selected".to_string());
            label.set_label(&text);
        }
    }
}
