use log::{error, info};

mod anchors;
mod config;
mod contact;
mod counter;
mod dom;
mod effects;
mod error;
mod events;
mod nav;
mod observer;
mod page;
mod validation;

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    info!("Starting page script");
    if let Err(e) = page::start() {
        error!("Page script not started: {}", e);
    }
}
