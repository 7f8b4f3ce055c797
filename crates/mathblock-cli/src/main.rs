use anyhow::{Context, Result, bail};
use mathblock_config::Config;
use mathblock_engine::{Parser, ParserOptions};
use std::{env, path::PathBuf, process};
use xi_rope::Rope;

const USAGE: &str = "Usage: mathblock <file.md> [--config <path>] [--outline]";

#[derive(Debug, PartialEq, Eq)]
struct Args {
    file: PathBuf,
    config: Option<PathBuf>,
    outline: bool,
}

fn parse_args(args: &[String]) -> Result<Args> {
    let mut file = None;
    let mut config = None;
    let mut outline = false;

    let mut it = args.iter().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--config" => {
                let path = it.next().context("--config needs a path")?;
                config = Some(PathBuf::from(path));
            }
            "--outline" => outline = true,
            other if other.starts_with("--") => bail!("unknown option {other}"),
            other => {
                if file.replace(PathBuf::from(other)).is_some() {
                    bail!("only one input file is supported");
                }
            }
        }
    }

    Ok(Args {
        file: file.context("missing input file")?,
        config,
        outline,
    })
}

fn load_options(config_path: Option<&PathBuf>) -> Result<ParserOptions> {
    let config = match config_path {
        Some(path) => Config::load_from_path(path)?
            .with_context(|| format!("config file {} does not exist", path.display()))?,
        None => Config::load()?.unwrap_or_default(),
    };
    log::debug!("using {config:?}");
    Ok(ParserOptions {
        math_blocks: config.math_blocks,
        fenced_code: config.fenced_code,
    })
}

fn run(args: &Args) -> Result<()> {
    let options = load_options(args.config.as_ref())?;
    let md = std::fs::read_to_string(&args.file)
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    let rope = Rope::from(md.as_str());

    let doc = Parser::new(options).parse(&rope);

    if args.outline {
        print!("{}", doc.tree.outline(&rope));
        return Ok(());
    }

    let blocks = doc.math_blocks(&rope);
    log::info!("found {} math block(s) in {}", blocks.len(), args.file.display());
    for (i, (id, content)) in blocks.iter().enumerate() {
        let line = doc
            .tree
            .lines(*id)
            .first()
            .map(|sp| rope.line_of_offset(sp.start) + 1);
        match line {
            Some(line) => println!("--- block {} (line {line})", i + 1),
            None => println!("--- block {} (empty)", i + 1),
        }
        println!("{content}");
    }
    Ok(())
}

fn main() {
    env_logger::init();

    let argv: Vec<String> = env::args().collect();
    let args = match parse_args(&argv) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            process::exit(2);
        }
    };

    if let Err(e) = run(&args) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
