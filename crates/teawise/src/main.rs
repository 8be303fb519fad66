mod config;
mod events;
mod gui;
mod sys;

use flavorwheel::journal::MemoryJournal;
use gui::app::AppModel;
use relm4::prelude::*;
use sys::runtime;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    if let Err(e) = config::write_default_config() {
        log::warn!("Could not write default wheel file: {}", e);
    }

    let wheel = config::load_or_default()?;
    let journal = MemoryJournal::with_sample()?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.teawise.teawise");

    app.run::<AppModel>((wheel, journal, rx));
    Ok(())
}
