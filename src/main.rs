use clap::Parser;
use doctor_directory::core::suggest::DEFAULT_SUGGESTION_LIMIT;
use doctor_directory::utils::{logger, validation::Validate};
use doctor_directory::{
    CliConfig, ConfigProvider, ConsultationMode, DirectoryLoader, DirectoryView, FileConfig,
    HttpDirectorySource, Phase, RenderSurface, Session, SortKey, DEFAULT_ENDPOINT,
};
use std::io::{BufRead, Write};

struct TextRenderer;

impl RenderSurface for TextRenderer {
    fn render(&mut self, view: &DirectoryView) {
        match &view.phase {
            Phase::Loading => println!("Loading practitioners..."),
            Phase::Failed(message) => {
                println!("Could not load the directory: {}", message);
                println!("Type 'reload' to retry.");
            }
            Phase::Empty => {
                println!("No practitioners match the current filters.");
                print_selections(view);
            }
            Phase::Ready => {
                println!("{} practitioner(s):", view.results.len());
                for p in &view.results {
                    let modes: Vec<&str> =
                        p.consultation_modes.iter().map(|m| m.label()).collect();
                    println!(
                        "  {:<28} {:<32} {:>2} yrs  Rs {:>5}  {:<16} {}",
                        p.name,
                        p.specialties.join(", "),
                        p.experience_years,
                        p.consultation_fee,
                        p.location,
                        modes.join(" / ")
                    );
                }
                print_selections(view);
            }
        }
    }
}

fn print_selections(view: &DirectoryView) {
    let mut active = Vec::new();
    if !view.query.search_text.is_empty() {
        active.push(format!("search '{}'", view.query.search_text));
    }
    if let Some(mode) = view.query.consultation {
        active.push(mode.label().to_string());
    }
    for s in &view.query.specialties {
        active.push(s.clone());
    }
    if let Some(key) = view.query.sort {
        active.push(format!("sort by {}", key.label()));
    }
    if active.is_empty() {
        println!("  filters: none");
    } else {
        println!("  filters: {}", active.join(" | "));
    }
    println!("  address: ?{}", view.address);
}

/// A TOML file supplies anything the command line left at its default.
fn resolve_config(cli: &CliConfig) -> anyhow::Result<(String, Option<String>, usize)> {
    let file = match &cli.config {
        Some(path) => {
            let file = FileConfig::from_file(path)?;
            file.validate()?;
            Some(file)
        }
        None => None,
    };

    let endpoint = if cli.endpoint != DEFAULT_ENDPOINT {
        cli.endpoint.clone()
    } else {
        file.as_ref()
            .map(|f| f.endpoint().to_string())
            .unwrap_or_else(|| cli.endpoint.clone())
    };

    let initial_query = cli.query.clone().or_else(|| {
        file.as_ref()
            .and_then(|f| f.initial_query().map(str::to_string))
    });

    let suggestion_limit = if cli.suggestion_limit != DEFAULT_SUGGESTION_LIMIT {
        cli.suggestion_limit
    } else {
        file.as_ref()
            .map(|f| f.suggestion_limit())
            .unwrap_or(cli.suggestion_limit)
    };

    Ok((endpoint, initial_query, suggestion_limit))
}

fn print_help() {
    println!("Commands:");
    println!("  search <text>      filter names by substring (no text clears)");
    println!("  suggest <text>     top name suggestions for partial input");
    println!("  mode video|clinic  toggle the consultation filter");
    println!("  spec <name>        toggle one specialty filter");
    println!("  sort fees|exp      toggle a sort order");
    println!("  specs              list available specialties");
    println!("  back / forward     navigate the address history");
    println!("  show               redraw the current view");
    println!("  reload             fetch the listing again");
    println!("  quit               exit");
}

async fn load_session(
    loader: &DirectoryLoader<HttpDirectorySource>,
    initial_query: Option<&str>,
    renderer: &mut TextRenderer,
) -> Option<Session> {
    renderer.render(&loading_view());
    match loader.load(initial_query).await {
        Ok(session) => {
            renderer.render(&session.view());
            Some(session)
        }
        Err(e) => {
            tracing::error!("Directory load failed: {}", e);
            renderer.render(&failed_view(&e.to_string()));
            None
        }
    }
}

fn loading_view() -> DirectoryView {
    DirectoryView {
        phase: Phase::Loading,
        results: Vec::new(),
        specialty_options: Vec::new(),
        query: Default::default(),
        address: String::new(),
    }
}

fn failed_view(message: &str) -> DirectoryView {
    DirectoryView {
        phase: Phase::Failed(message.to_string()),
        results: Vec::new(),
        specialty_options: Vec::new(),
        query: Default::default(),
        address: String::new(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting doctor-directory");
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("{}", e);
        std::process::exit(1);
    }

    let (endpoint, initial_query, suggestion_limit) = resolve_config(&config)?;
    tracing::debug!("Using endpoint {}", endpoint);

    let loader = DirectoryLoader::new(HttpDirectorySource::new(endpoint));
    let mut renderer = TextRenderer;
    let mut session = load_session(&loader, initial_query.as_deref(), &mut renderer).await;

    if config.once {
        return match session {
            Some(_) => Ok(()),
            None => std::process::exit(2),
        };
    }

    println!();
    print_help();

    let stdin = std::io::stdin();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (command, rest) = match line.split_once(char::is_whitespace) {
            Some((c, r)) => (c, r.trim()),
            None => (line, ""),
        };

        match command {
            "" => {}
            "quit" | "exit" => break,
            "help" => print_help(),
            "reload" => {
                // Fresh, independent fetch attempt; the previous
                // failure or session is discarded.
                session = load_session(&loader, initial_query.as_deref(), &mut renderer).await;
            }
            _ => {
                let Some(active) = session.as_mut() else {
                    renderer.render(&failed_view("the listing is not loaded"));
                    continue;
                };
                match command {
                    "search" => {
                        active.set_search(rest);
                        renderer.render(&active.view());
                    }
                    "suggest" => {
                        for name in active.suggestions(rest, suggestion_limit) {
                            println!("  {}", name);
                        }
                    }
                    "mode" => match rest {
                        "video" => {
                            active.toggle_consultation(ConsultationMode::VideoConsult);
                            renderer.render(&active.view());
                        }
                        "clinic" => {
                            active.toggle_consultation(ConsultationMode::InClinic);
                            renderer.render(&active.view());
                        }
                        _ => println!("usage: mode video|clinic"),
                    },
                    "spec" => {
                        if rest.is_empty() {
                            println!("usage: spec <name>");
                        } else {
                            active.toggle_specialty(rest);
                            renderer.render(&active.view());
                        }
                    }
                    "sort" => match rest {
                        "fees" => {
                            active.toggle_sort(SortKey::Fees);
                            renderer.render(&active.view());
                        }
                        "exp" | "experience" => {
                            active.toggle_sort(SortKey::Experience);
                            renderer.render(&active.view());
                        }
                        _ => println!("usage: sort fees|exp"),
                    },
                    "specs" => {
                        for s in active.specialty_options() {
                            println!("  {}", s);
                        }
                    }
                    "back" => {
                        if active.back() {
                            renderer.render(&active.view());
                        } else {
                            println!("already at the oldest entry");
                        }
                    }
                    "forward" => {
                        if active.forward() {
                            renderer.render(&active.view());
                        } else {
                            println!("already at the newest entry");
                        }
                    }
                    "show" => renderer.render(&active.view()),
                    other => println!("unknown command '{}', try 'help'", other),
                }
            }
        }
    }

    Ok(())
}
