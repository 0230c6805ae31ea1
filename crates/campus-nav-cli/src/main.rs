// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use anyhow::{Context, Result};
use campus_nav_core::config::Config;
use campus_nav_core::export::{save_document, TextSurface};
use campus_nav_core::routing::{MapSurface, OsrmRouter, OverlayHandle, RoutePath, RouteStatus};
use campus_nav_core::voice::{FileAudioInput, HttpTranscriber, VoiceOutcome, VoiceSearchController};
use campus_nav_core::{
    AppEvent, DataSource, EndpointRole, JsonFileDataSource, LatLng, MockDataSource, Navigator,
    StaffCache, TypeFilter,
};
use clap::{Parser, Subcommand};
use log::{debug, info};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config.json
    #[arg(short, long, env = "CAMPUS_NAV_CONFIG")]
    config: Option<PathBuf>,

    /// Department dataset (JSON). Defaults to the built-in demo campus.
    #[arg(short, long, env = "CAMPUS_NAV_DATA")]
    data: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List departments matching a search and type filter
    List {
        #[arg(short, long, default_value = "")]
        search: String,
        #[arg(short = 't', long = "type", default_value = "All")]
        kind: TypeFilter,
    },
    /// Show one department's details
    Show { id: String },
    /// Print a department's staff roster
    Staff {
        id: String,
        /// Also write the roster document into this directory
        #[arg(long)]
        export: Option<PathBuf>,
    },
    /// Walking route between two departments
    Route {
        from: String,
        to: String,
        #[arg(long)]
        service_url: Option<String>,
        #[arg(long)]
        profile: Option<String>,
    },
    /// Voice search using a recorded webm clip
    Voice {
        clip: PathBuf,
        #[arg(long)]
        endpoint: Option<String>,
    },
}

/// Terminal stand-in for the map: overlays only exist in the log.
#[derive(Default)]
struct ConsoleMap {
    next_overlay: u64,
}

impl MapSurface for ConsoleMap {
    fn acquire_overlay(&mut self, waypoints: [LatLng; 2]) -> OverlayHandle {
        self.next_overlay += 1;
        debug!(
            "Overlay acquired — overlay={} from={:.5},{:.5} to={:.5},{:.5}",
            self.next_overlay, waypoints[0].lat, waypoints[0].lng, waypoints[1].lat, waypoints[1].lng
        );
        OverlayHandle::new(self.next_overlay)
    }

    fn draw_route(&mut self, _handle: &OverlayHandle, path: &RoutePath) {
        debug!("Overlay drawn — points={}", path.points.len());
    }

    fn release_overlay(&mut self, handle: OverlayHandle) {
        debug!("Overlay released — overlay={}", handle.id());
    }
}

fn print_departments(nav: &Navigator<ConsoleMap>) {
    let scene = nav.scene();
    for marker in &scene.markers {
        if let Some(dept) = nav.department(&marker.department_id) {
            println!(
                "{:>3}  {:<6} {:<28} {:<15} {:.5},{:.5}",
                dept.id,
                dept.code,
                dept.name,
                dept.kind.as_str(),
                dept.lat,
                dept.lng
            );
        }
    }
    let stats = nav.stats();
    println!(
        "{} shown — campus: {} departments, {} faculty, {} engineering",
        scene.markers.len(),
        stats.departments,
        stats.faculty,
        stats.engineering
    );
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialise logging")?;

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load config")?;

    let source: Arc<dyn DataSource> = match &cli.data {
        Some(path) => {
            let data = JsonFileDataSource::load(path)
                .with_context(|| format!("Failed to load dataset {}", path.display()))?;
            Arc::new(StaffCache::new(data))
        }
        None => Arc::new(StaffCache::new(MockDataSource::new())),
    };

    if let Commands::Route {
        service_url,
        profile,
        ..
    } = &cli.command
    {
        if let Some(url) = service_url {
            config.routing.service_url = url.clone();
        }
        if let Some(profile) = profile {
            config.routing.profile = profile.clone();
        }
    }
    if let Commands::Voice {
        endpoint: Some(url),
        ..
    } = &cli.command
    {
        config.voice.endpoint = url.clone();
    }

    let mut nav = Navigator::load(source, ConsoleMap::default(), config).await;

    match cli.command {
        Commands::List { search, kind } => {
            nav.dispatch(AppEvent::SearchChanged(search));
            nav.dispatch(AppEvent::TypeFilterChanged(kind));
            print_departments(&nav);
        }
        Commands::Show { id } => match nav.popup(&id) {
            Some(popup) => {
                println!("{} ({}) — {}", popup.name, popup.code, popup.kind);
                println!("{}", popup.description);
                println!("Faculty: {}", popup.faculty_count);
                for facility in &popup.facilities {
                    let mark = if facility.available { "[x]" } else { "[ ]" };
                    println!("{} {}", mark, facility.name);
                }
            }
            None => println!("No department with id '{}'", id),
        },
        Commands::Staff { id, export } => {
            nav.dispatch(AppEvent::DepartmentSelected(id.clone()));
            let Some((dept, staff)) = nav.staff_panel().await else {
                println!("No department with id '{}'", id);
                return Ok(());
            };

            println!("Staff — {} ({} members)", dept.name, staff.len());
            for (idx, member) in staff.iter().enumerate() {
                println!(
                    "{:>2}. {} — {} ({}) <{}>",
                    idx + 1,
                    member.name,
                    member.designation,
                    member.qualification,
                    member.email
                );
            }

            if let Some(dir) = export {
                let doc = nav.export_selected_staff().await;
                let path = save_document(&doc, &TextSurface::default(), &dir)?;
                println!("Exported {} page(s) to {}", doc.page_count(), path.display());
            }
        }
        Commands::Route { from, to, .. } => {
            let router =
                OsrmRouter::from_config(&nav.config().routing).context("Failed to build router")?;
            info!("Routing — profile={}", router.profile());

            nav.dispatch(AppEvent::RouteEndpointSet {
                role: EndpointRole::From,
                id: from.clone(),
            });
            let status = nav
                .dispatch_and_route(
                    AppEvent::RouteEndpointSet {
                        role: EndpointRole::To,
                        id: to.clone(),
                    },
                    &router,
                )
                .await;

            match status {
                RouteStatus::Ready(pair, path) => {
                    println!(
                        "{} → {}: {:.0} m, about {:.0} min ({} points)",
                        pair.from_id,
                        pair.to_id,
                        path.distance_m,
                        path.duration_s / 60.0,
                        path.points.len()
                    );
                }
                RouteStatus::Failed(_, e) => println!("Could not compute route: {}", e),
                RouteStatus::Idle | RouteStatus::Routing(_) => println!(
                    "No route: '{}' and '{}' must be two different known departments",
                    from, to
                ),
            }
        }
        Commands::Voice { clip, .. } => {
            let transcriber = HttpTranscriber::from_config(&nav.config().voice)
                .context("Failed to build transcription client")?;
            let voice = VoiceSearchController::new(
                Arc::new(FileAudioInput::new(clip)),
                Arc::new(transcriber),
                nav.config().voice.max_recording(),
            );
            let router =
                OsrmRouter::from_config(&nav.config().routing).context("Failed to build router")?;

            match nav.voice_search(&voice, &router).await {
                VoiceOutcome::Transcribed(text) => println!("Heard: \"{}\"", text),
                VoiceOutcome::NoResult => println!("Nothing recognised"),
                VoiceOutcome::Busy => println!("Voice search already running"),
                VoiceOutcome::DeviceUnavailable(reason) => {
                    println!("Audio input unavailable: {}", reason)
                }
                VoiceOutcome::Failed(reason) => println!("Voice search failed: {}", reason),
            }
            print_departments(&nav);
        }
    }

    Ok(())
}
