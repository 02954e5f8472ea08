use colored::Colorize;

use crate::cli::ConfigCommands;
use crate::config::Config;

pub fn run(command: ConfigCommands) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            let config = Config::load_or_default();
            let path = Config::path()?;
            println!("{} {}", "Config file:".bold(), path.display());
            println!();
            let yaml = serde_yaml::to_string(&config)?;
            if yaml.trim() == "{}" {
                println!("{}", "(no values set, using built-in defaults)".dimmed());
                println!();
                println!("  defaults.template    default");
                println!("  defaults.layout      content");
                println!("  defaults.transition  none");
                println!("  defaults.start_mode  first");
            } else {
                print!("{yaml}");
            }
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let mut config = Config::load_or_default();
            config.set(&key, &value)?;
            let path = config.save()?;
            println!("{} {key} = {value}", "Set".green().bold());
            println!("{} {}", "Saved to".dimmed(), path.display());
            Ok(())
        }
    }
}
