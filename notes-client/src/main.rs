//! notes-client — terminal front end for the notes API.
//!
//! Talks to the notes server at NOTES_API_URL and to the analysis endpoint
//! at NOTES_ANALYSIS_URL (defaults to the same host).
//!
//! Default: http://localhost:5000

use notes_client::{Config, NotesApiClient, NotesClient, shell};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let api = match NotesApiClient::new(&config) {
        Ok(api) => api,
        Err(e) => {
            log::error!("Failed to create notes API client: {}", e);
            std::process::exit(1);
        }
    };

    log::info!(
        "Using notes API at {} (analysis: {})",
        api.api_url(),
        config.analysis_url
    );

    let mut client = NotesClient::new(api);

    // Initial load; the shell still starts with an empty list if this fails
    match client.refresh().await {
        Ok(count) => println!("{} notes loaded. Type 'help' for commands.", count),
        Err(e) => println!("Could not load notes: {}. Type 'help' for commands.", e),
    }

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    if let Err(e) = shell::run(&mut client, stdin, &mut stdout).await {
        log::error!("Shell terminated: {}", e);
        std::process::exit(1);
    }
}
