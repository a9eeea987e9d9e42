use clap::{Arg, Command};
use snapvocab_examples::{MockMode, MockTranslator, PipelineConfig, WordCategory};
use std::path::PathBuf;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let matches = Command::new("snapvocab-examples")
        .version("0.1.0")
        .about("Example sentence pipeline for SnapVocab")
        .arg(
            Arg::new("word")
                .help("Learned word to find an example for")
                .required(true)
                .index(1),
        )
        .arg(
            Arg::new("target-locale")
                .help("Target language code (e.g., es, fr, de)")
                .index(2)
                .default_value("es"),
        )
        .arg(
            Arg::new("category")
                .long("category")
                .short('c')
                .help("Semantic category (derived from the word when omitted)"),
        )
        .arg(
            Arg::new("cache")
                .long("cache")
                .help("Path to a durable response cache file"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Show pipeline tracing")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let verbose = matches.get_flag("verbose");
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.parse()?),
        )
        .init();

    let word = matches
        .get_one::<String>("word")
        .map(|s| s.as_str())
        .unwrap_or_default();
    let target_locale = matches
        .get_one::<String>("target-locale")
        .map(|s| s.as_str())
        .unwrap_or("es");

    let category = match matches.get_one::<String>("category") {
        Some(raw) => Some(raw.parse::<WordCategory>()?),
        None => None,
    };

    let mut config = PipelineConfig::from_env();
    if let Some(path) = matches.get_one::<String>("cache") {
        config.cache_path = Some(PathBuf::from(path));
    }

    let pipeline = config.build_pipeline();

    // No real MT backend ships with the pipeline; the app injects its own.
    // The mock marks the translation with the target locale.
    let translator = MockTranslator::new(MockMode::Suffix);

    let example = pipeline
        .get_example_sentence(word, target_locale, &translator, category)
        .await?;

    println!("English:    {}", example.english);
    println!("Translated: {}", example.translated);
    println!("Source:     {}", example.source);

    Ok(())
}
