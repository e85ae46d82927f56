//! Dialogs - folder picker, folder name prompt and error box
//!
//! All helpers are callback based and never block the main loop.

use crate::settings;
use adw::prelude::*;
use gtk::{gio, glib};
use std::cell::Cell;
use std::path::PathBuf;

/// Window that owns `widget`, if it is already mapped into one
pub fn parent_window(widget: &impl IsA<gtk::Widget>) -> Option<gtk::Window> {
    widget
        .root()
        .and_then(|root| root.downcast::<gtk::Window>().ok())
}

/// Native folder picker; `on_done` receives `None` when the user cancels
pub fn pick_folder<F>(widget: &impl IsA<gtk::Widget>, title: &str, on_done: F)
where
    F: FnOnce(Option<PathBuf>) + 'static,
{
    let dialog = gtk::FileDialog::builder().title(title).modal(true).build();
    if let Some(start) = settings::picker::start_dir() {
        dialog.set_initial_folder(Some(&gio::File::for_path(start)));
    }

    let parent = parent_window(widget);
    dialog.select_folder(parent.as_ref(), gio::Cancellable::NONE, move |result| {
        let folder = match result {
            Ok(file) => file.path(),
            Err(e) => {
                tracing::debug!("Folder selection ended: {}", e);
                None
            }
        };
        on_done(folder);
    });
}

/// Ask for the name of a new folder; `None` when cancelled
pub fn ask_folder_name<F>(widget: &impl IsA<gtk::Widget>, on_done: F)
where
    F: FnOnce(Option<String>) + 'static,
{
    let parent = parent_window(widget);
    let dialog = adw::MessageDialog::new(
        parent.as_ref(),
        Some("Folder Name"),
        Some("Enter the name of the new folder:"),
    );

    let entry = gtk::Entry::builder()
        .activates_default(true)
        .placeholder_text("converted")
        .build();
    dialog.set_extra_child(Some(&entry));

    dialog.add_response("cancel", "Cancel");
    dialog.add_response("create", "Create");
    dialog.set_response_appearance("create", adw::ResponseAppearance::Suggested);
    dialog.set_default_response(Some("create"));
    dialog.set_close_response("cancel");

    // connect_response wants Fn; the callback must run at most once
    let on_done = Cell::new(Some(on_done));
    dialog.connect_response(
        None,
        glib::clone!(@weak entry => move |_, response| {
            let name = (response == "create").then(|| entry.text().to_string());
            if let Some(callback) = on_done.take() {
                callback(name);
            }
        }),
    );

    dialog.present();
}

/// Blocking-style error box (modal, single OK button)
pub fn show_error(widget: &impl IsA<gtk::Widget>, message: &str) {
    tracing::warn!("{}", message);

    let parent = parent_window(widget);
    let dialog = adw::MessageDialog::new(parent.as_ref(), Some("Error"), Some(message));
    dialog.add_response("ok", "OK");
    dialog.set_default_response(Some("ok"));
    dialog.set_close_response("ok");
    dialog.present();
}
