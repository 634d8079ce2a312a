use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use anyhow::Context as _;
use asciimorph::{
    FrameScheduler, GlyphAtlas, MorphConfig, MorphSession, RelatedWords, StaticRelatedWords,
    TerminalRenderer, TextRenderer, TickClock, TransitionKind, interpolate, parse_words,
    split_related, terminal_size,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};

#[derive(Parser, Debug)]
#[command(name = "asciimorph", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace). Logs go to stderr.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate words full-screen in the terminal.
    Play(PlayArgs),
    /// Print one composited frame to stdout.
    Frame(FrameArgs),
    /// Print every frame of a transition between two words to stdout.
    Transition(TransitionArgs),
}

#[derive(Args, Debug)]
struct SceneArgs {
    /// JSON config file (see `MorphConfig`); flags below override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// JSON glyph atlas (`{"A": {values, lengths, width, height}, ...}`); built-in font if unset.
    #[arg(long)]
    atlas: Option<PathBuf>,

    /// Random seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Comma-separated related words used to tile the letters.
    #[arg(long)]
    related: Option<String>,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Words to show first (commas or spaces separate lines).
    #[arg(required = true)]
    words: Vec<String>,

    /// Further words to move to, one transition each.
    #[arg(long)]
    then: Vec<String>,

    /// Stop after this many seconds; runs until `q` otherwise.
    #[arg(long)]
    seconds: Option<f64>,

    /// Start with autoplay on.
    #[arg(long)]
    autoplay: bool,

    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Args, Debug)]
struct FrameArgs {
    #[arg(required = true)]
    words: Vec<String>,

    #[arg(long, default_value_t = 24)]
    rows: usize,

    #[arg(long, default_value_t = 80)]
    cols: usize,

    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Args, Debug)]
struct TransitionArgs {
    /// Source words.
    #[arg(long)]
    from: String,

    /// Target words.
    #[arg(long)]
    to: String,

    #[arg(long, value_enum, default_value_t = KindChoice::Ot)]
    kind: KindChoice,

    #[arg(long, default_value_t = 10)]
    steps: usize,

    #[arg(long, default_value_t = 24)]
    rows: usize,

    #[arg(long, default_value_t = 80)]
    cols: usize,

    #[command(flatten)]
    scene: SceneArgs,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum KindChoice {
    Flip,
    Map,
    Ot,
}

impl From<KindChoice> for TransitionKind {
    fn from(k: KindChoice) -> Self {
        match k {
            KindChoice::Flip => TransitionKind::RandomFlip,
            KindChoice::Map => TransitionKind::RandomMap,
            KindChoice::Ot => TransitionKind::ApproximateOt,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    // Warnings would land on top of the full-screen display.
    let quiet = matches!(cli.cmd, Command::Play(_));
    init_tracing(cli.verbose, quiet);
    match cli.cmd {
        Command::Play(args) => cmd_play(args),
        Command::Frame(args) => cmd_frame(args),
        Command::Transition(args) => cmd_transition(args),
    }
}

fn init_tracing(verbose: u8, quiet: bool) {
    let level = match verbose {
        0 if quiet => tracing::Level::ERROR,
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();
}

fn read_config(path: &Path) -> anyhow::Result<MorphConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    MorphConfig::from_json_reader(BufReader::new(f))
        .with_context(|| format!("parse config '{}'", path.display()))
}

fn read_atlas(path: &Path) -> anyhow::Result<GlyphAtlas> {
    let f = File::open(path).with_context(|| format!("open atlas '{}'", path.display()))?;
    GlyphAtlas::from_json_reader(BufReader::new(f))
        .with_context(|| format!("parse atlas '{}'", path.display()))
}

fn prepare(scene: &SceneArgs) -> anyhow::Result<(MorphConfig, GlyphAtlas)> {
    let mut cfg = match &scene.config {
        Some(path) => read_config(path)?,
        None => MorphConfig::default(),
    };
    if scene.seed.is_some() {
        cfg.seed = scene.seed;
    }
    cfg.validate()?;
    let atlas = match &scene.atlas {
        Some(path) => read_atlas(path)?,
        None => GlyphAtlas::builtin(),
    };
    Ok((cfg, atlas))
}

fn related_reply(scene: &SceneArgs, query: &str) -> anyhow::Result<Vec<String>> {
    let Some(list) = &scene.related else {
        anyhow::bail!("no related-words source configured");
    };
    StaticRelatedWords::new(split_related(list)).fetch(query)
}

fn words_arg(words: &[String]) -> Vec<String> {
    parse_words(&words.join(" "))
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let (cfg, atlas) = prepare(&args.scene)?;
    let lines = words_arg(&args.words);
    anyhow::ensure!(!lines.is_empty(), "no words given");

    let mut session = MorphSession::new(cfg, atlas, args.rows + 1, args.cols)?;
    session.show(&lines)?;
    let query = session.query().unwrap_or_default();
    session.receive_related(related_reply(&args.scene, &query))?;

    println!("{}", session.canvas().get_frame());
    Ok(())
}

fn cmd_transition(args: TransitionArgs) -> anyhow::Result<()> {
    let (cfg, atlas) = prepare(&args.scene)?;
    let from = parse_words(&args.from);
    let to = parse_words(&args.to);
    anyhow::ensure!(!from.is_empty() && !to.is_empty(), "--from and --to need words");

    let mut a = MorphSession::new(cfg.clone(), atlas.clone(), args.rows + 1, args.cols)?;
    a.show(&from)?;
    a.receive_related(related_reply(&args.scene, &from.join(" ")))?;
    let mut b = MorphSession::new(cfg.clone(), atlas, args.rows + 1, args.cols)?;
    b.show(&to)?;
    b.receive_related(related_reply(&args.scene, &to.join(" ")))?;

    let mut rng = asciimorph::rng_from_seed(cfg.seed);
    let frames = interpolate(
        args.kind.into(),
        &a.canvas().get_frame(),
        &b.canvas().get_frame(),
        args.steps,
        &mut rng,
    )?;

    let mut scheduler = FrameScheduler::new(cfg.fps()?);
    scheduler.add_frames(frames);
    scheduler.start();
    let mut out = TextRenderer::new(std::io::stdout().lock());
    while scheduler.num_remaining_frames() > 0 {
        scheduler.tick(&mut out)?;
    }
    Ok(())
}

/// Restores cooked mode when play exits, however it exits.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> anyhow::Result<Self> {
        crossterm::terminal::enable_raw_mode().context("enable raw mode")?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if let Err(err) = crossterm::terminal::disable_raw_mode() {
            tracing::warn!(error = %err, "failed to disable raw mode");
        }
    }
}

enum Input {
    Quit,
    Scroll(f64),
    ToggleAutoplay,
}

fn poll_input() -> anyhow::Result<Option<Input>> {
    if !event::poll(Duration::ZERO)? {
        return Ok(None);
    }
    let input = match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Input::Quit),
            KeyCode::Char('a') => Some(Input::ToggleAutoplay),
            KeyCode::Up | KeyCode::Char('k') => Some(Input::Scroll(-1.0)),
            KeyCode::Down | KeyCode::Char('j') => Some(Input::Scroll(1.0)),
            _ => None,
        },
        _ => None,
    };
    Ok(input)
}

fn cmd_play(args: PlayArgs) -> anyhow::Result<()> {
    let (mut cfg, atlas) = prepare(&args.scene)?;
    let lines = words_arg(&args.words);
    anyhow::ensure!(!lines.is_empty(), "no words given");

    let (rows, cols) = match (cfg.rows, cfg.cols) {
        (Some(r), Some(c)) => (r, c),
        (r, c) => {
            let (tr, tc) = terminal_size()?;
            (r.unwrap_or(tr), c.unwrap_or(tc))
        }
    };
    cfg.rows = Some(rows);
    cfg.cols = Some(cols);

    let fps = cfg.fps()?;
    // Related words arrive after a short delay so the shimmer is visible.
    let related_delay = fps.secs_to_frames(1.0).max(1);
    let autoplay_every = fps.secs_to_frames(cfg.autoplay_secs).max(1);
    let total_ticks = args.seconds.map(|s| fps.secs_to_frames(s));

    let mut session = MorphSession::new(cfg, atlas, rows, cols)?;
    session.show(&lines)?;
    session.start();

    let mut pending: std::collections::VecDeque<Vec<String>> =
        args.then.iter().map(|w| parse_words(w)).collect();
    let mut autoplay = args.autoplay;

    let _raw = RawModeGuard::enable()?;
    let mut renderer = TerminalRenderer::new(std::io::stdout());
    renderer.set_autoplay(autoplay);
    renderer.enter()?;

    let mut clock = TickClock::new(fps);
    let started = Instant::now();
    let mut tick: u64 = 0;
    let mut changed_at: u64 = 0;

    loop {
        clock.wait();
        tick += 1;

        match poll_input()? {
            Some(Input::Quit) => break,
            Some(Input::Scroll(dir)) => {
                session.scroll(dir)?;
            }
            Some(Input::ToggleAutoplay) => {
                autoplay = !autoplay;
                renderer.set_autoplay(autoplay);
                tracing::info!(autoplay, "autoplay toggled");
            }
            None => {}
        }

        if session.is_transitioning() && tick - changed_at >= related_delay {
            let query = session.query().unwrap_or_default();
            session.receive_related(related_reply(&args.scene, &query))?;
            if let Some(word) = session.word() {
                renderer.set_related(word.related());
            }
        }
        session.shimmer_tick()?;

        if !session.is_transitioning() && tick - changed_at >= autoplay_every {
            let next = match pending.pop_front() {
                Some(next) => Some(next),
                None if autoplay => session.autoplay_pick().map(|w| parse_words(&w)),
                None => None,
            };
            if let Some(next) = next.filter(|n| !n.is_empty()) {
                session.transition_to(&next)?;
                changed_at = tick;
            }
        }

        session.tick(&mut renderer)?;

        if total_ticks.is_some_and(|n| tick >= n) {
            break;
        }
    }

    renderer.leave()?;
    tracing::info!(
        ticks = tick,
        secs = started.elapsed().as_secs_f64(),
        "play finished"
    );
    Ok(())
}
