//! Main Window - fixed-size window hosting the wizard
//!
//! The template only provides the frame (header bar, content area, credit
//! line); the wizard swaps its pages inside `content_box`.

use crate::settings::{self, window as geometry};
use crate::ui::app::TiffconvApplication;
use crate::ui::wizard::WizardHost;
use adw::prelude::*;
use adw::subclass::prelude::*;
use gtk::glib;

mod imp {
    use super::*;

    #[derive(Default, gtk::CompositeTemplate)]
    #[template(string = r#"
        <?xml version="1.0" encoding="UTF-8"?>
        <interface>
            <template class="TiffconvWindow" parent="AdwApplicationWindow">
                <style>
                    <class name="tiffconv-window"/>
                </style>
                <property name="content">
                    <object class="GtkBox" id="main_box">
                        <property name="orientation">vertical</property>
                        <child>
                            <object class="AdwHeaderBar" id="header_bar">
                                <style>
                                    <class name="flat"/>
                                </style>
                            </object>
                        </child>
                        <child>
                            <object class="GtkBox" id="content_box">
                                <property name="orientation">vertical</property>
                                <property name="vexpand">true</property>
                                <property name="margin-start">20</property>
                                <property name="margin-end">20</property>
                                <property name="margin-top">8</property>
                            </object>
                        </child>
                        <child>
                            <object class="GtkLabel" id="credit_label">
                                <property name="valign">end</property>
                                <property name="margin-bottom">5</property>
                                <style>
                                    <class name="caption"/>
                                    <class name="dim-label"/>
                                    <class name="credit"/>
                                </style>
                            </object>
                        </child>
                    </object>
                </property>
            </template>
        </interface>
    "#)]
    pub struct MainWindow {
        #[template_child]
        pub content_box: TemplateChild<gtk::Box>,

        #[template_child]
        pub credit_label: TemplateChild<gtk::Label>,
    }

    #[glib::object_subclass]
    impl ObjectSubclass for MainWindow {
        const NAME: &'static str = "TiffconvWindow";
        type Type = super::MainWindow;
        type ParentType = adw::ApplicationWindow;

        fn class_init(klass: &mut Self::Class) {
            klass.bind_template();
        }

        fn instance_init(obj: &glib::subclass::InitializingObject<Self>) {
            obj.init_template();
        }
    }

    impl ObjectImpl for MainWindow {
        fn constructed(&self) {
            self.parent_constructed();
            self.credit_label.set_label(settings::CREDIT_TEXT);
        }
    }

    impl WidgetImpl for MainWindow {}
    impl WindowImpl for MainWindow {}
    impl ApplicationWindowImpl for MainWindow {}
    impl AdwApplicationWindowImpl for MainWindow {}
}

glib::wrapper! {
    pub struct MainWindow(ObjectSubclass<imp::MainWindow>)
        @extends adw::ApplicationWindow, gtk::ApplicationWindow, gtk::Window, gtk::Widget,
        @implements gtk::Accessible, gtk::Buildable, gtk::ConstraintTarget, gtk::Native, gtk::Root, gtk::ShortcutManager;
}

impl MainWindow {
    pub fn new(app: &TiffconvApplication) -> Self {
        let window: Self = glib::Object::builder()
            .property("application", app)
            .property("title", settings::WINDOW_TITLE)
            .property("icon-name", settings::ICON_NAME)
            .property("default-width", geometry::WIDTH)
            .property("default-height", geometry::HEIGHT)
            .property("resizable", geometry::RESIZABLE)
            .build();

        let wizard = WizardHost::new();
        window.imp().content_box.append(&wizard);

        window
    }
}
