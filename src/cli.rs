use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Default)]
#[command(name = "timbercrop")]
#[command(
    version,
    about = "Mark square regions on a folder of images and export them as training crops",
    long_about = None
)]
pub struct Args {
    /// Folder holding the images to process (opens a folder picker if omitted)
    #[arg(short, long, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Lot number for this batch of images (asked on stdin if omitted)
    #[arg(short, long, value_name = "ID")]
    pub lot: Option<String>,

    /// Config file to use instead of the per-user one
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Usable display width for the preview
    #[arg(long, value_name = "PX")]
    pub width: Option<u32>,

    /// Usable display height for the preview
    #[arg(long, value_name = "PX")]
    pub height: Option<u32>,

    /// Replay events from a JSON file instead of reading commands from stdin
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Write the rendered preview to this PNG after every change
    #[arg(short, long, value_name = "FILE")]
    pub preview: Option<PathBuf>,

    /// Store the effective settings as the per-user config
    #[arg(long)]
    pub save_config: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_command_line() {
        let args = Args::try_parse_from([
            "timbercrop",
            "--root",
            "/data/scans",
            "--lot",
            "LOT1",
            "--width",
            "1366",
            "--height",
            "768",
            "--script",
            "events.json",
            "--save-config",
        ])
        .unwrap();

        assert_eq!(args.root, Some(PathBuf::from("/data/scans")));
        assert_eq!(args.lot.as_deref(), Some("LOT1"));
        assert_eq!((args.width, args.height), (Some(1366), Some(768)));
        assert_eq!(args.script, Some(PathBuf::from("events.json")));
        assert!(args.save_config);
    }

    #[test]
    fn everything_is_optional() {
        let args = Args::try_parse_from(["timbercrop"]).unwrap();
        assert!(args.root.is_none() && args.lot.is_none() && args.preview.is_none());
    }
}
