use clap::Parser;
use reten::config::Args;
use reten::content::LocalContent;
use reten::dashboard::{Dashboard, UPCOMING_LANDINGS};
use reten::display::{self, FlightRow};
use reten::service::FeedService;
use reten::source;
use reten::terminal::TerminalCategory;
use reten::time::{local_now, Time};
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::{Context, Editor, Helper, Highlighter, Hinter, Validator};
use std::io::Write;
use std::process::{Command, Stdio};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Helper, Hinter, Highlighter, Validator)]
pub struct CompleteHelper {
    pub commands: Vec<String>,
}

impl Completer for CompleteHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, _pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let mut candidates = Vec::new();

        for cmd in &self.commands {
            if cmd.starts_with(line) {
                candidates.push(Pair {
                    display: cmd.clone(),
                    replacement: format!("{} ", cmd),
                });
            }
        }

        Ok((0, candidates))
    }
}

fn paginate(content: String) {
    let pager = Command::new("less")
        .arg("-R")
        .stdin(Stdio::piped())
        .spawn()
        .or_else(|_| Command::new("more").stdin(Stdio::piped()).spawn());

    let mut pager = match pager {
        Ok(pager) => pager,
        Err(_) => {
            println!("{}", content);
            return;
        }
    };

    if let Some(mut stdin) = pager.stdin.take() {
        if let Err(e) = stdin.write_all(content.as_bytes()) {
            // user quit the pager early
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                eprintln!("Error writing to pager: {}", e);
            }
        }
    }

    let _ = pager.wait();
}

fn print_long(content: String, rows: usize) {
    if rows > 20 {
        paginate(content);
    } else {
        println!("{}", content);
    }
}

fn print_help() {
    println!("\nComandos:");
    println!("  ls [t1|t2|t2c|pa]   - Llegadas ordenadas por hora, todas o de una terminal");
    println!("  next [n]            - Próximos n aterrizajes (por defecto {})", UPCOMING_LANDINGS);
    println!("  terminals           - Vuelos, pax, retén y próximo vuelo por terminal");
    println!("  hours <n>           - Vuelos por terminal en las próximas n horas");
    println!("  trains              - Llegadas de larga distancia a Sants");
    println!("  port                - Cruceros y retén del puerto");
    println!("  events              - Próximos eventos");
    println!("  license             - Precio de la licencia");
    println!("  weather             - Probabilidad de lluvia");
    println!("  refresh             - Volver a descargar los datos");
    println!("  help / ?            - Esta ayuda");
    println!("  exit / quit         - Salir\n");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let settings = args.settings()?;
    let content = match &args.content {
        Some(path) => LocalContent::load_from_file(path)?,
        None => LocalContent::default(),
    };

    let source = source::open(&args.source, settings.request_timeout())?;
    let service = Arc::new(FeedService::new(source, settings.feeds.clone()));
    let updates = service.subscribe();
    println!("Conectando radar... ({})", service.describe());

    let poller = service.spawn(args.refresh_interval());
    let mut snapshot = match updates.recv_timeout(settings.request_timeout() * 2) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "no snapshot from poller yet, refreshing in place");
            let snapshot = service.refresh();
            while updates.try_recv().is_ok() {}
            snapshot
        }
    };
    info!(interval_secs = args.interval, "radar activo");

    let config = rustyline::Config::builder()
        .history_ignore_space(true)
        .completion_type(rustyline::CompletionType::List)
        .build();

    let helper = CompleteHelper {
        commands: [
            "ls", "next", "terminals", "hours", "trains", "port", "events", "license", "weather", "refresh", "help",
            "exit",
        ]
        .iter()
        .map(|c| c.to_string())
        .collect(),
    };

    let mut rl = Editor::with_config(config)?;
    rl.set_helper(Some(helper));

    {
        let clock = local_now();
        let dashboard = Dashboard::build(&snapshot, &content, &settings, clock.date_naive(), Time::of_day(&clock));
        println!("{}", display::header(&dashboard));
        println!("{}", display::terminals_table(&dashboard));
    }

    loop {
        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() { continue; }

                rl.add_history_entry(trimmed)?;

                while let Ok(latest) = updates.try_recv() {
                    println!("{}", display::refreshed(&latest));
                    snapshot = latest;
                }

                let parts: Vec<&str> = trimmed.split_whitespace().collect();
                if parts[0] == "refresh" {
                    snapshot = service.refresh();
                    while updates.try_recv().is_ok() {}
                    println!("{}", display::refreshed(&snapshot));
                    continue;
                }

                let clock = local_now();
                let dashboard = Dashboard::build(&snapshot, &content, &settings, clock.date_naive(), Time::of_day(&clock));

                match parts[0] {
                    "ls" => {
                        let filter = match parts.get(1).map(|s| s.parse::<TerminalCategory>()) {
                            Some(Ok(category)) => Some(category),
                            Some(Err(e)) => {
                                println!("{}", e);
                                continue;
                            }
                            None => None,
                        };
                        let rows: Vec<FlightRow> = dashboard.view.entries().iter()
                            .filter(|(_, category)| filter.is_none_or(|f| f == *category))
                            .map(|(flight, category)| FlightRow::new(flight, *category))
                            .collect();
                        if rows.is_empty() {
                            println!("No hay vuelos.");
                        } else {
                            let count = rows.len();
                            print_long(display::flights_table(rows), count);
                        }
                    },
                    "next" => {
                        let limit = parts.get(1).and_then(|n| n.parse::<usize>().ok()).unwrap_or(UPCOMING_LANDINGS);
                        let rows: Vec<FlightRow> = dashboard.view.upcoming(limit).into_iter()
                            .map(|(flight, category)| FlightRow::new(flight, category))
                            .collect();
                        if rows.is_empty() {
                            println!("No hay aterrizajes próximos.");
                        } else {
                            let count = rows.len();
                            print_long(display::flights_table(rows), count);
                        }
                    },
                    "terminals" | "t" => {
                        println!("{}", display::header(&dashboard));
                        println!("{}", display::terminals_table(&dashboard));
                    },
                    "hours" => {
                        if let Some(hours) = parts.get(1).and_then(|n| n.parse::<u32>().ok()) {
                            println!("{}", display::hours_table(&dashboard, hours));
                        } else {
                            println!("Usage: hours <n>");
                        }
                    },
                    "trains" => {
                        if dashboard.trains.is_empty() {
                            println!("No hay trenes en las próximas {} min.", settings.train_window_minutes);
                        } else {
                            print_long(display::trains_table(&dashboard), dashboard.trains.len());
                        }
                    },
                    "port" => println!("{}", display::port_summary(&dashboard)),
                    "events" => {
                        if dashboard.events.is_empty() {
                            println!("No hay eventos próximos.");
                        } else {
                            println!("{}", display::events_table(&dashboard));
                        }
                    },
                    "license" => println!("{}", display::license_summary(&dashboard)),
                    "weather" => println!("{}", display::weather_summary(&dashboard)),
                    "help" | "?" => print_help(),
                    "exit" | "quit" => break,
                    _ => println!("Unknown command: {}", parts[0]),
                }
            },
            Err(ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            },
            Err(ReadlineError::Eof) => {
                println!("CTRL-D");
                break;
            },
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    poller.stop();
    Ok(())
}
