#[cfg(not(target_arch = "wasm32"))]
use deezplay::api::{models::format_duration, SearchOptions, Track};
#[cfg(not(target_arch = "wasm32"))]
use deezplay::{audio_manager, config, db, diagnostics, DeezerClient, PlaybackStore};

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    diagnostics::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("failed to start runtime: {e}");
            std::process::exit(1);
        }
    };

    if let Err(message) = runtime.block_on(run(&args)) {
        eprintln!("{message}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    deezplay::diagnostics::init_logging();
}

#[cfg(not(target_arch = "wasm32"))]
const USAGE: &str = "usage: deezplay <chart [limit] | search <query> | album <id> | genres | play <title> <artist>>";

#[cfg(not(target_arch = "wasm32"))]
async fn run(args: &[String]) -> Result<(), String> {
    let storage = db::default_store();
    let settings = config::load_settings(storage.as_ref());
    let client = DeezerClient::from_settings(&settings);

    match args.first().map(String::as_str) {
        Some("chart") => {
            let limit = args
                .get(1)
                .and_then(|raw| raw.parse::<usize>().ok())
                .unwrap_or(10);
            let tracks = client.get_top_tracks(limit).await.map_err(|e| e.to_string())?;
            print_tracks(&tracks);
        }
        Some("search") => {
            let query = args[1..].join(" ");
            let options = SearchOptions::default().with_limit(settings.search_limit);
            let tracks = client
                .search_tracks(&query, &options)
                .await
                .map_err(|e| e.to_string())?;
            print_tracks(&tracks);
        }
        Some("album") => {
            let id = args.get(1).map(String::as_str).unwrap_or_default();
            let album = client.get_album(id).await.map_err(|e| e.to_string())?;
            println!(
                "{} - {}",
                album.title.as_deref().unwrap_or("Unknown album"),
                album.artist.name.as_deref().unwrap_or("Unknown artist")
            );
            print_tracks(&album.tracks);
        }
        Some("genres") => {
            for genre in client.get_genres().await.map_err(|e| e.to_string())? {
                println!(
                    "{:>6}  {}",
                    genre.id.map(|id| id.to_string()).unwrap_or_default(),
                    genre.name.unwrap_or_default()
                );
            }
        }
        Some("play") => {
            let title = args.get(1).cloned().unwrap_or_default();
            let artist = args.get(2).cloned().unwrap_or_default();
            let store = PlaybackStore::new(audio_manager::default_engine_factory(), storage);
            if !store.load_remote_track(&client, &title, &artist).await {
                return Err(format!("nothing playable found for \"{title}\""));
            }
            store.toggle();
            let session = store.session();
            if let Some(track) = &session.current_track {
                println!(
                    "now playing: {} - {} [{}]",
                    track.display_title(),
                    track.display_artist(),
                    session.duration_display
                );
            }
        }
        _ => return Err(USAGE.to_string()),
    }

    let stats = client.cache().stats();
    tracing::debug!(
        entries = stats.entry_count,
        fetches = stats.network_fetches,
        "catalog cache"
    );
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
fn print_tracks(tracks: &[Track]) {
    for (index, track) in tracks.iter().enumerate() {
        let ordinal = track.position.unwrap_or(index as u32 + 1);
        println!(
            "{:>3}. {} - {} ({})",
            ordinal,
            track.display_title(),
            track.display_artist(),
            format_duration(track.duration.unwrap_or(0))
        );
    }
}
