use std::env;
use std::error::Error;
use std::fmt;
use std::path::{Path, PathBuf};

use driftfield::prelude::*;

const USAGE: &str = "\
Usage: driftfield [OPTIONS]

Options:
  --config <file.json>   Load simulation settings from a JSON file
  --touch                Use the touch interaction preset
  --seed <n>             Fixed random seed
  --snapshot <out.png>   Render headless and write a PNG instead of opening a window
  --frames <n>           Frames to simulate for a snapshot (default 300)
  --size <WxH>           Snapshot size in pixels (default 800x600)
  --pointer <X,Y>        Hold the pointer at X,Y during a snapshot
  -h, --help             Print this message";

#[derive(Debug, Clone, PartialEq)]
struct Options {
    config: Option<PathBuf>,
    profile: DeviceProfile,
    seed: Option<u64>,
    snapshot: Option<PathBuf>,
    frames: u64,
    size: (u32, u32),
    pointer: Option<(f64, f64)>,
    help: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            config: None,
            profile: DeviceProfile::Desktop,
            seed: None,
            snapshot: None,
            frames: 300,
            size: (800, 600),
            pointer: None,
            help: false,
        }
    }
}

#[derive(Debug, PartialEq)]
struct ArgError(String);

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}", self.0, USAGE)
    }
}

impl Error for ArgError {}

impl Options {
    fn parse<I>(args: I) -> Result<Self, ArgError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut options = Options::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => options.config = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--touch" => options.profile = DeviceProfile::Touch,
                "--seed" => options.seed = Some(number(&value(&mut args, &arg)?, &arg)?),
                "--snapshot" => options.snapshot = Some(PathBuf::from(value(&mut args, &arg)?)),
                "--frames" => options.frames = number(&value(&mut args, &arg)?, &arg)?,
                "--size" => {
                    let raw = value(&mut args, &arg)?;
                    let (w, h): (u32, u32) = pair(&raw, 'x', &arg)?;
                    if w == 0 || h == 0 {
                        return Err(ArgError(format!("{} must be non-zero, got `{}`", arg, raw)));
                    }
                    options.size = (w, h);
                }
                "--pointer" => {
                    let raw = value(&mut args, &arg)?;
                    options.pointer = Some(pair(&raw, ',', &arg)?);
                }
                "-h" | "--help" => options.help = true,
                other => return Err(ArgError(format!("unknown argument `{}`", other))),
            }
        }

        Ok(options)
    }
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, ArgError> {
    args.next()
        .ok_or_else(|| ArgError(format!("{} expects a value", flag)))
}

fn number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, ArgError> {
    raw.trim()
        .parse()
        .map_err(|_| ArgError(format!("invalid value for {}: `{}`", flag, raw)))
}

fn pair<T: std::str::FromStr>(raw: &str, sep: char, flag: &str) -> Result<(T, T), ArgError> {
    let (a, b) = raw
        .split_once(sep)
        .ok_or_else(|| ArgError(format!("{} expects two values separated by `{}`", flag, sep)))?;
    Ok((number(a, flag)?, number(b, flag)?))
}

fn snapshot(options: &Options, config: SimConfig, out: &Path) -> Result<(), Box<dyn Error>> {
    let (width, height) = options.size;
    let viewport = Viewport::new(width as f64, height as f64);
    let seed = options.seed.unwrap_or(0);
    let mut sim = SimulationState::with_seed(config, options.profile, viewport, seed)?;
    let mut canvas = Canvas::new(width, height);

    let pointer = match options.pointer {
        Some((x, y)) => PointerState::pressed(DVec2::new(x, y)),
        None => PointerState::released(),
    };
    let inputs = FrameInputs {
        pointer,
        amplitude: None,
    };

    for _ in 0..options.frames {
        let frame = sim.step(&inputs);
        canvas.draw(&frame);
    }

    canvas.save_png(out)?;
    log::info!(
        "wrote {} after {} frames ({} particles)",
        out.display(),
        options.frames,
        sim.pool().len()
    );
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = Options::parse(env::args().skip(1))?;
    if options.help {
        println!("{}", USAGE);
        return Ok(());
    }

    let config = match &options.config {
        Some(path) => {
            let config = SimConfig::load(path)?;
            log::info!("loaded config from {}", path.display());
            config
        }
        None => SimConfig::default(),
    };

    if let Some(out) = &options.snapshot {
        return snapshot(&options, config, out);
    }

    viewer::run(ViewerOptions {
        config,
        profile: options.profile,
        seed: options.seed,
        ..Default::default()
    })?;
    Ok(())
}
