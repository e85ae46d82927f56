//! Welcome Page - First page of the wizard
//!
//! Shows the application icon, a one-line pitch and the Next button.

use crate::settings;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct WelcomePage;

    #[glib::object_subclass]
    impl ObjectSubclass for WelcomePage {
        const NAME: &'static str = "TiffconvWelcomePage";
        type Type = super::WelcomePage;
        type ParentType = gtk::Box;
    }

    impl ObjectImpl for WelcomePage {
        fn constructed(&self) {
            self.parent_constructed();
            // No constructor arguments, so the UI can be built right away
            self.obj().setup_ui();
        }

        fn signals() -> &'static [glib::subclass::Signal] {
            use std::sync::OnceLock;
            static SIGNALS: OnceLock<Vec<glib::subclass::Signal>> = OnceLock::new();
            SIGNALS.get_or_init(|| vec![glib::subclass::Signal::builder("next-clicked").build()])
        }
    }

    impl WidgetImpl for WelcomePage {}
    impl BoxImpl for WelcomePage {}
}

glib::wrapper! {
    pub struct WelcomePage(ObjectSubclass<imp::WelcomePage>)
        @extends gtk::Box, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Orientable;
}

impl WelcomePage {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("orientation", gtk::Orientation::Vertical)
            .property("spacing", 16)
            .property("valign", gtk::Align::Center)
            .property("vexpand", true)
            .build()
    }

    fn setup_ui(&self) {
        let icon = gtk::Image::builder()
            .icon_name(settings::ICON_NAME)
            .pixel_size(72)
            .css_classes(["app-icon"])
            .build();

        let title = gtk::Label::builder()
            .label("Convert your images from TIFF to another format!")
            .css_classes(["title-2"])
            .wrap(true)
            .max_width_chars(40)
            .justify(gtk::Justification::Center)
            .margin_top(8)
            .build();

        let next_button = gtk::Button::builder()
            .label("Next")
            .css_classes(["pill", "suggested-action"])
            .halign(gtk::Align::Center)
            .width_request(160)
            .height_request(44)
            .margin_top(24)
            .build();

        next_button.connect_clicked(glib::clone!(
            @weak self as page =>
            move |_| {
                page.emit_by_name::<()>("next-clicked", &[]);
            }
        ));

        self.append(&icon);
        self.append(&title);
        self.append(&next_button);
    }
}

impl Default for WelcomePage {
    fn default() -> Self {
        Self::new()
    }
}
