use crate::events::AppEvent;
use async_channel::Sender;
use directories::ProjectDirs;
use flavorwheel::config::{self as wheel_config, DEFAULT_WHEEL};
use flavorwheel::wheel::WheelConfiguration;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ENV_PREFIX: &str = "TEAWISE";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("{0}")]
    Wheel(#[from] wheel_config::ConfigError),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "teawise", "teawise").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("wheel.toml"))
}

pub fn load_config() -> Result<WheelConfiguration, ConfigError> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<WheelConfiguration, ConfigError> {
    Ok(wheel_config::load_wheel(Some(path), Some(ENV_PREFIX))?)
}

/// The user's wheel, or the built-in one when the file is broken.
pub fn load_or_default() -> Result<WheelConfiguration, ConfigError> {
    match load_config() {
        Ok(wheel) => Ok(wheel),
        Err(e) => {
            log::error!("Failed to load wheel config, using default: {}", e);
            Ok(wheel_config::default_wheel()?)
        }
    }
}

pub fn write_default_config() -> std::io::Result<PathBuf> {
    let path =
        get_config_path().map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e))?;
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(&path, DEFAULT_WHEEL)?;
        log::info!("Wrote default wheel to {}", path.display());
    }
    Ok(path)
}

/// Whether a watcher event can have changed the wheel file at `wheel_path`.
fn touches_wheel(event: &Event, wheel_path: &Path) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    ) && event.paths.iter().any(|p| p == wheel_path)
}

pub async fn run_async_watcher(tx: Sender<AppEvent>) {
    let wheel_path = match get_config_path() {
        Ok(p) => p,
        Err(e) => {
            log::error!("Wheel watcher disabled: {}", e);
            return;
        }
    };
    let Some(wheel_dir) = wheel_path.parent().map(Path::to_path_buf) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&wheel_dir) {
        log::error!("Failed to create {} for watching: {}", wheel_dir.display(), e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create wheel watcher: {}", e);
            return;
        }
    };

    // editors often replace the file, so watch the directory
    if let Err(e) = watcher.watch(&wheel_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch {}: {}", wheel_dir.display(), e);
        return;
    }
    log::info!("Watching {} for wheel changes", wheel_path.display());

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) if touches_wheel(&event, &wheel_path) => {
                log::debug!("Wheel file {:?}: {}", event.kind, wheel_path.display());
                if tx.send(AppEvent::ConfigReload).await.is_err() {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => log::error!("Watch error on {}: {}", wheel_dir.display(), e),
        }
    }
}
