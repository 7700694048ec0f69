use custode::{Classifier, ClassifierConfig, MediaKind};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "custode=warn".into()),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    // Get input: title (and optional description) from CLI args or stdin
    let (title, description) = if args.is_empty() {
        use std::io::{self, Read};
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        (buffer.trim().to_string(), String::new())
    } else {
        (args[0].clone(), args[1..].join(" "))
    };

    if title.is_empty() {
        eprintln!("Usage: custode <title> [description...]");
        eprintln!("   or: echo <title> | custode");
        eprintln!();
        eprintln!("Classifies the text metadata of a media item and prints the");
        eprintln!("moderation outcome as a single JSON line.");
        std::process::exit(1);
    }

    let classifier = Classifier::new(ClassifierConfig::default());
    let outcome = classifier
        .classify(&title, &description, None, MediaKind::Image)
        .await;

    println!("{}", serde_json::to_string(&outcome)?);

    Ok(())
}
