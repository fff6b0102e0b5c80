use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct CliArgs {
    no_audio: bool,
    no_demo: bool,
    name: Option<String>,
    volume: Option<u8>,
}

fn main() -> anyhow::Result<()> {
    let args = parse_args(std::env::args().skip(1).collect())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("mixtape=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    mixtape::app::run_with_startup(mixtape::app::AppStartupOptions {
        audio_disabled: args.no_audio,
        skip_demo: args.no_demo,
        playlist_name: args.name,
        volume_percent: args.volume,
    })
}

fn parse_args(args: Vec<String>) -> anyhow::Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut index = 0;
    while index < args.len() {
        match args[index].as_str() {
            "--no-audio" => out.no_audio = true,
            "--no-demo" => out.no_demo = true,
            "--name" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--name requires a playlist name");
                };
                if value.trim().is_empty() {
                    anyhow::bail!("--name cannot be empty");
                }
                out.name = Some(value.trim().to_string());
            }
            "--volume" => {
                index += 1;
                let Some(value) = args.get(index) else {
                    anyhow::bail!("--volume requires a value between 0 and 100");
                };
                let percent: u8 = value
                    .trim()
                    .parse()
                    .map_err(|_| anyhow::anyhow!("--volume must be a number between 0 and 100"))?;
                if percent > 100 {
                    anyhow::bail!("--volume must be a number between 0 and 100");
                }
                out.volume = Some(percent);
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            other => anyhow::bail!("unknown argument {other}"),
        }
        index += 1;
    }
    Ok(out)
}

fn print_help() {
    println!("mixtape");
    println!("  --no-audio        Start with playback disabled");
    println!("  --no-demo         Do not generate demo tone tracks");
    println!("  --name <name>     Playlist name");
    println!("  --volume <0-100>  Initial volume");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn parses_flags_and_values() {
        let parsed = parse_args(args(&["--no-audio", "--name", "Road Trip", "--volume", "40"]))
            .expect("valid");
        assert!(parsed.no_audio);
        assert!(!parsed.no_demo);
        assert_eq!(parsed.name.as_deref(), Some("Road Trip"));
        assert_eq!(parsed.volume, Some(40));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_args(args(&["--volume", "140"])).is_err());
        assert!(parse_args(args(&["--name"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }
}
