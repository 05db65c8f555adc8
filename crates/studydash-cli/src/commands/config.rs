use clap::Subcommand;
use studydash_core::Config;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print one setting
    Get {
        /// Dotted key, e.g. "alarms.poll_interval_secs" or "ui.default_tab"
        key: String,
    },
    /// Change one setting and save it
    Set {
        /// Dotted key
        key: String,
        /// New value, checked against the setting's type and range
        value: String,
    },
    /// Print every setting as `key = value`
    List {
        /// Print the whole config as JSON instead
        #[arg(long)]
        json: bool,
    },
    /// Print where the config file lives
    Path,
    /// Overwrite the config file with defaults
    Reset,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Get { key } => {
            let config = Config::load()?;
            let value = config
                .get(&key)
                .ok_or_else(|| unknown_key(&config, &key))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            let mut config = Config::load()?;
            if config.get(&key).is_none() {
                return Err(unknown_key(&config, &key).into());
            }
            config.set(&key, &value)?;
            tracing::info!(%key, %value, "config updated");
            println!("{key} = {}", config.get(&key).unwrap_or(value));
        }
        ConfigAction::List { json } => {
            let config = Config::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", render_entries(&config));
            }
        }
        ConfigAction::Path => println!("{}", Config::path()?.display()),
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("defaults written to {}", Config::path()?.display());
        }
    }
    Ok(())
}

fn render_entries(config: &Config) -> String {
    config
        .entries()
        .into_iter()
        .map(|(key, value)| format!("{key} = {value}\n"))
        .collect()
}

fn unknown_key(config: &Config, key: &str) -> String {
    let known: Vec<String> = config.entries().into_iter().map(|(k, _)| k).collect();
    format!("unknown key '{key}' (known keys: {})", known.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entries_render_one_per_line() {
        let text = render_entries(&Config::default());
        assert!(text.starts_with("alarms.poll_interval_secs = 30\n"));
        assert!(text.contains("audio.enabled = true\n"));
        assert!(text.contains("ui.default_tab = daily\n"));
        assert_eq!(text.lines().count(), Config::default().entries().len());
    }

    #[test]
    fn unknown_key_lists_the_known_ones() {
        let message = unknown_key(&Config::default(), "ui.theme");
        assert!(message.starts_with("unknown key 'ui.theme'"));
        assert!(message.contains("audio.ambient_volume"));
        assert!(message.contains("logging.level"));
    }
}
