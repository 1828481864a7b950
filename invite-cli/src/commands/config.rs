use anyhow::Result;
use invite_core::config::InviteConfig;
use owo_colors::OwoColorize;

pub fn run(config: &InviteConfig, explicit_path: Option<&str>) -> Result<()> {
    let config_path = match explicit_path {
        Some(path) => path.to_string(),
        None => InviteConfig::default_path()?.display().to_string(),
    };

    println!("{}", "Paths".bold());
    println!("  Config:  {}", config_path);
    println!();
    println!("{}", "Effective configuration".bold());
    println!("{}", config.to_toml()?);

    Ok(())
}
