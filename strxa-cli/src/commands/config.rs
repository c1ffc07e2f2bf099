use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use strxa_lib::{Settings, load_settings, save_settings, settings_path};

use crate::error::CliError;

/// Show the effective settings and where they come from.
pub(crate) fn run_config_show() {
    let path = settings_path();
    let settings = load_settings();

    log::info!(
        "{}",
        "strxa Settings".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("");

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    log::info!("");

    let fields = [
        ("audio.volume", settings.audio.volume.to_string()),
        ("scan.min_str_frames", settings.scan.min_str_frames.to_string()),
        ("scan.min_xa_sectors", settings.scan.min_xa_sectors.to_string()),
        ("scan.tim", settings.scan.tim.to_string()),
    ];
    for (name, value) in fields {
        log::info!(
            "  {} {}",
            format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
            value,
        );
    }
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", settings_path().display());
}

/// Write the default settings, refusing to clobber an existing file unless forced.
pub(crate) fn run_config_init(force: bool) -> Result<(), CliError> {
    let path = settings_path();
    if path.exists() && !force {
        return Err(CliError::config(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }
    save_settings(&Settings::default())?;
    log::info!(
        "{} Wrote {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display().if_supports_color(Stdout, |t| t.cyan()),
    );
    Ok(())
}
