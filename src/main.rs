use anyhow::Result;
use clap::Parser;
use tiny_cat_storyteller::app::App;
use tiny_cat_storyteller::surface::InputEvent;
use tiny_cat_storyteller::view;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "tiny-cat-storyteller")]
#[command(about = "Explain any topic as an illustrated story about tiny cats")]
struct CliArgs {
    /// Topic to explain. Starts an interactive prompt when omitted.
    #[arg(value_name = "TOPIC")]
    topic: Option<String>,

    /// Use one of the predefined example topics (1-based).
    #[arg(long, value_name = "N", conflicts_with = "topic", value_parser = parse_example_arg)]
    example: Option<usize>,

    /// Print the predefined example topics and exit.
    #[arg(long)]
    list_examples: bool,

    /// Print the page as HTML instead of text.
    #[arg(long)]
    html: bool,
}

/// Command typed at the interactive prompt.
#[derive(Debug, PartialEq, Eq)]
enum Command<'a> {
    Topic(&'a str),
    Example(usize),
    ListExamples,
    Quit,
    Invalid(String),
}

fn parse_example_arg(input: &str) -> std::result::Result<usize, String> {
    match input.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(format!(
            "Invalid example '{}'. Expected a number starting at 1",
            input
        )),
    }
}

fn parse_command(line: &str) -> Command<'_> {
    let trimmed = line.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some(("/example", n)) => match parse_example_arg(n) {
            Ok(index) => Command::Example(index),
            Err(e) => Command::Invalid(e),
        },
        _ => match trimmed {
            "/examples" => Command::ListExamples,
            "/quit" | "/exit" => Command::Quit,
            _ => Command::Topic(line.trim_end_matches(['\r', '\n'])),
        },
    }
}

fn print_view(app: &App, html: bool) {
    if html {
        print!("{}", view::render_html(app.session(), app.examples()));
    } else {
        print!("{}", view::render_text(app.session(), app.examples()));
    }
}

fn print_examples(app: &App) {
    for (i, example) in app.examples().iter().enumerate() {
        println!("{}. {}", i + 1, example);
    }
}

async fn interactive(app: &mut App, html: bool) -> Result<()> {
    print_view(app, html);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let result = match parse_command(&line) {
            Command::Quit => break,
            Command::ListExamples => {
                print_examples(app);
                continue;
            }
            Command::Invalid(message) => {
                eprintln!("{}", message);
                continue;
            }
            Command::Example(index) => app.handle_event(InputEvent::ExampleClicked(index)).await,
            Command::Topic(topic) => app.submit_line(topic).await,
        };

        if result.is_some() {
            print_view(app, html);
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tiny_cat_storyteller=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    let mut app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    if args.list_examples {
        print_examples(&app);
        return Ok(());
    }

    let outcome = match (args.topic.as_deref(), args.example) {
        (Some(topic), _) => app.submit_line(topic).await,
        (None, Some(index)) => app.handle_event(InputEvent::ExampleClicked(index)).await,
        (None, None) => {
            info!("Starting interactive session");
            return interactive(&mut app, args.html).await;
        }
    };

    print_view(&app, args.html);
    match outcome {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => {
            error!("Generation failed: {}", e);
            std::process::exit(1);
        }
        None => {
            error!("No example at that position; see --list-examples");
            std::process::exit(1);
        }
    }
}
