//! tiffconv Application - GTK4 Application Setup
//!
//! Initializes the GTK4/Libadwaita application and handles the main event loop.

use crate::settings::APP_ID;
use crate::ui::window::MainWindow;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::gio;

mod imp {
    use super::*;

    #[derive(Default)]
    pub struct TiffconvApplication;

    #[glib::object_subclass]
    impl ObjectSubclass for TiffconvApplication {
        const NAME: &'static str = "TiffconvApplication";
        type Type = super::TiffconvApplication;
        type ParentType = adw::Application;
    }

    impl ObjectImpl for TiffconvApplication {}

    impl ApplicationImpl for TiffconvApplication {
        fn activate(&self) {
            let app = self.obj();

            // Single window; re-activation just raises it
            if let Some(window) = app.active_window() {
                window.present();
                return;
            }

            let window = MainWindow::new(&app);
            window.present();
        }

        fn startup(&self) {
            self.parent_startup();

            let css_provider = gtk::CssProvider::new();
            css_provider.load_from_data(include_str!("styles.css"));

            match gtk::gdk::Display::default() {
                Some(display) => {
                    gtk::style_context_add_provider_for_display(
                        &display,
                        &css_provider,
                        gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
                    );
                }
                None => {
                    tracing::warn!("No display available. CSS styling will not be applied.");
                }
            }

            let app = self.obj();
            app.setup_actions();
        }
    }

    impl GtkApplicationImpl for TiffconvApplication {}
    impl AdwApplicationImpl for TiffconvApplication {}
}

glib::wrapper! {
    pub struct TiffconvApplication(ObjectSubclass<imp::TiffconvApplication>)
        @extends adw::Application, gtk::Application, gio::Application,
        @implements gio::ActionGroup, gio::ActionMap;
}

impl TiffconvApplication {
    pub fn new() -> Self {
        glib::Object::builder()
            .property("application-id", APP_ID)
            .property("flags", gio::ApplicationFlags::FLAGS_NONE)
            .build()
    }

    fn setup_actions(&self) {
        let quit_action = gio::SimpleAction::new("quit", None);
        quit_action.connect_activate(glib::clone!(
            @weak self as app =>
            move |_, _| {
                app.quit();
            }
        ));
        self.add_action(&quit_action);

        self.set_accels_for_action("app.quit", &["<Ctrl>q"]);
    }

    pub fn run(&self) -> glib::ExitCode {
        // Our own arguments were already handled by clap
        ApplicationExtManual::run_with_args::<&str>(self, &[])
    }
}

impl Default for TiffconvApplication {
    fn default() -> Self {
        Self::new()
    }
}
