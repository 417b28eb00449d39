use std::ffi::OsString;
use std::path::{Path, PathBuf};

use clap::Parser;
use clap::error::ErrorKind;
use vplayer_backend::VideoSource;
use vplayer_backend::headless::{MEMORY_SCHEME, MemorySource};
use vplayer_runtime::Player;
use vplayer_runtime::error::Result;

use crate::gif_source::GifSource;

#[derive(Debug, Parser)]
#[command(
    name = "vplayer",
    about = "Play a video in a window whose controls are drawn into the same canvas",
    version
)]
pub struct Cli {
    /// Video file to play. `memory://<frames>[@<fps>]` plays a synthetic clip.
    pub path: PathBuf,
}

/// Parse `args` (program name first).
///
/// # Errors
///
/// Returns clap's error for `--help`, `--version`, and bad arguments alike;
/// use [`parse_exit_code`] to tell them apart.
pub fn parse_from<I, T>(args: I) -> std::result::Result<Cli, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(args)
}

/// Exit status for a parse failure: 0 for help and version, 1 otherwise.
pub fn parse_exit_code(error: &clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}

/// True when `path` names a synthetic clip rather than a file.
pub fn is_memory_path(path: &Path) -> bool {
    path.to_str().is_some_and(|p| p.starts_with(MEMORY_SCHEME))
}

/// Open the source `cli.path` names and build the player around it.
///
/// # Errors
///
/// Any startup failure: the file is missing or undecodable, it reports no
/// frames, or its first frame cannot be read.
pub fn open_player(cli: &Cli) -> Result<PlayerSource> {
    if is_memory_path(&cli.path) {
        Ok(PlayerSource::Memory(build(MemorySource::open(&cli.path)?, &cli.path)?))
    } else {
        Ok(PlayerSource::File(build(GifSource::open(&cli.path)?, &cli.path)?))
    }
}

fn build<S: VideoSource>(source: S, path: &Path) -> Result<Player<S>> {
    Player::new(source, &path.display().to_string())
}

/// A player over whichever source the command line picked.
#[derive(Debug)]
pub enum PlayerSource {
    File(Player<GifSource>),
    Memory(Player<MemorySource>),
}

impl PlayerSource {
    /// Canvas size in pixels.
    pub fn size(&self) -> (u32, u32) {
        let canvas = match self {
            Self::File(player) => player.canvas(),
            Self::Memory(player) => player.canvas(),
        };
        (canvas.width(), canvas.height())
    }
}

#[cfg(feature = "window")]
pub fn run(cli: &Cli) -> Result<()> {
    use vplayer_backend::SystemClock;
    use vplayer_runtime::{PlayerError, Program, ProgramConfig};

    use crate::window::WindowDisplay;

    let player = open_player(cli)?;
    let (width, height) = player.size();
    let display = WindowDisplay::new("vplayer", width, height).map_err(PlayerError::display)?;
    match player {
        PlayerSource::File(player) => {
            Program::new(player, display, SystemClock::new(), ProgramConfig::default()).run()
        }
        PlayerSource::Memory(player) => {
            Program::new(player, display, SystemClock::new(), ProgramConfig::default()).run()
        }
    }
}
