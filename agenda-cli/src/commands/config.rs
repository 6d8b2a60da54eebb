use agenda_core::AgendaConfig;
use agenda_core::store::EVENTS_KEY;
use agenda_core::FileStore;
use anyhow::Result;
use owo_colors::OwoColorize;

pub fn run() -> Result<()> {
    let config_path = AgendaConfig::config_path()?;
    let config = AgendaConfig::load()?;
    let store = FileStore::new(config.data_path());

    println!("{}", "Paths".bold());
    println!("  Config:     {}", config_path.display());
    println!("  Data:       {}", config.display_path().display());
    println!("  Events:     {}", store.path_for(EVENTS_KEY).display());
    println!();
    println!("{}", "Settings".bold());
    println!("  Time zone:  {}", config.time_zone);
    println!("  View:       {}", config.default_view);

    if let Err(e) = config.zone() {
        println!("  {}", e.to_string().red());
    }

    Ok(())
}
