use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(name = "timegrid", version)]
struct Cli {
    /// Input render request JSON ({"style": ..., "courses": [...]}).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output directory for the rendered PNG (filename comes from the style).
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the JSON output envelope (filename + base64 PNG) here.
    #[arg(long)]
    out_json: Option<PathBuf>,

    /// Regular font file (TTF). Falls back to the builtin face when absent.
    #[arg(long)]
    font_regular: Option<PathBuf>,

    /// Bold font file (TTF). Falls back to the builtin face when absent.
    #[arg(long)]
    font_bold: Option<PathBuf>,

    /// Shuffle seed override for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut request = read_request_json(&cli.in_path)?;
    if cli.seed.is_some() {
        request.seed = cli.seed;
    }

    let fonts = timegrid::FontSet::load(cli.font_regular.as_deref(), cli.font_bold.as_deref());
    let output = timegrid::render_timetable(&request, &fonts)?;

    std::fs::create_dir_all(&cli.out_dir)
        .with_context(|| format!("create output dir '{}'", cli.out_dir.display()))?;
    let png_path = cli.out_dir.join(&output.filename);
    let png = timegrid::encode::from_base64(&output.filedata_encoded)?;
    std::fs::write(&png_path, png)
        .with_context(|| format!("write png '{}'", png_path.display()))?;
    eprintln!("wrote {}", png_path.display());

    if let Some(json_path) = cli.out_json {
        let json = serde_json::to_string_pretty(&output)?;
        std::fs::write(&json_path, json)
            .with_context(|| format!("write envelope '{}'", json_path.display()))?;
        eprintln!("wrote {}", json_path.display());
    }

    Ok(())
}

fn read_request_json(path: &Path) -> anyhow::Result<timegrid::RenderRequest> {
    let f = File::open(path).with_context(|| format!("open request '{}'", path.display()))?;
    let r = BufReader::new(f);
    let request: timegrid::RenderRequest =
        serde_json::from_reader(r).with_context(|| "parse request JSON")?;
    Ok(request)
}
