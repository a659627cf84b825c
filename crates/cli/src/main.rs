use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use domain::{BlendError, BlendResult, ErrorResponse, Identity, Post};
use pipeline::{build_prompt, select_best, SYSTEM_INSTRUCTION};
use server::{BlendConfig, BlendOrchestrator};
use std::process::ExitCode;
use std::time::Instant;
use tracing::debug;

/// Post Blend - compare two accounts' posting personalities
#[derive(Parser)]
#[command(name = "post-blend")]
#[command(about = "Blend two social media accounts into one witty analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Blend two accounts
    Blend {
        /// First handle (leading @ optional)
        #[arg(long)]
        user1: String,

        /// Second handle
        #[arg(long)]
        user2: String,

        /// Print the result (or error) as JSON
        #[arg(long)]
        json: bool,
    },

    /// List an account's posts and mark the best one
    Posts {
        /// Handle to look up
        #[arg(long)]
        handle: String,
    },

    /// Print the prompt that would be sent for a pair, without calling the model
    Prompt {
        #[arg(long)]
        user1: String,

        #[arg(long)]
        user2: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from {}", path.display());
    }
    let config = BlendConfig::from_env().context("Failed to load configuration")?;
    let orchestrator = BlendOrchestrator::from_config(&config);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Blend { user1, user2, json } => {
            handle_blend(&orchestrator, &user1, &user2, json).await
        }
        Commands::Posts { handle } => handle_posts(&orchestrator, &handle).await,
        Commands::Prompt { user1, user2 } => handle_prompt(&orchestrator, &user1, &user2).await,
    }
}

/// Handle the 'blend' command
async fn handle_blend(
    orchestrator: &BlendOrchestrator,
    user1: &str,
    user2: &str,
    json: bool,
) -> Result<ExitCode> {
    let start = Instant::now();

    match orchestrator.blend(user1, user2).await {
        Ok(result) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&*result)?);
            } else {
                print_blend(&result);
                println!("{} Blended in {:.2?}", "✓".green(), start.elapsed());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&err, json)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Handle the 'posts' command
async fn handle_posts(orchestrator: &BlendOrchestrator, handle: &str) -> Result<ExitCode> {
    let posts = match orchestrator.fetcher().fetch_posts(handle).await {
        Ok(posts) => posts,
        Err(err) => {
            print_error(&err, false)?;
            return Ok(ExitCode::FAILURE);
        }
    };

    let best = select_best(&posts);
    println!(
        "{}",
        format!("Posts for @{} ({}):", handle.trim().trim_start_matches('@'), posts.len())
            .bold()
            .blue()
    );

    for (i, post) in posts.iter().enumerate() {
        let marker = if best.is_some_and(|b| std::ptr::eq(b, post)) {
            "★".yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {}. {} {}",
            marker,
            (i + 1).to_string().green(),
            post.content().unwrap_or("<no text>"),
            format_engagement(post).dimmed()
        );
    }

    Ok(ExitCode::SUCCESS)
}

/// Handle the 'prompt' command
async fn handle_prompt(
    orchestrator: &BlendOrchestrator,
    user1: &str,
    user2: &str,
) -> Result<ExitCode> {
    let fetched = async {
        let id1 = Identity::parse(user1)?;
        let id2 = Identity::parse(user2)?;
        let fetcher = orchestrator.fetcher();
        let (posts1, posts2) = tokio::try_join!(fetcher.fetch(&id1), fetcher.fetch(&id2))?;
        Ok::<_, BlendError>(build_prompt(&posts1, &posts2, &id1, &id2))
    }
    .await;

    match fetched {
        Ok(prompt) => {
            println!("{}", "System:".bold().blue());
            println!("{SYSTEM_INSTRUCTION}\n");
            println!("{}", "Prompt:".bold().blue());
            println!("{prompt}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            print_error(&err, false)?;
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_error(err: &BlendError, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&ErrorResponse::from(err))?);
    } else {
        eprintln!(
            "{} [{}] {}",
            "✗".red(),
            err.kind().as_str().yellow(),
            err
        );
    }
    Ok(())
}

fn format_engagement(post: &Post) -> String {
    match post.engagement {
        Some(e) => format!(
            "({} replies, {} reposts, {} likes)",
            e.reply_count.unwrap_or(0),
            e.repost_count.unwrap_or(0),
            e.favorite_count.unwrap_or(0)
        ),
        None => "(no engagement data)".to_string(),
    }
}

/// Helper function to format and print a blend
fn print_blend(result: &BlendResult) {
    let analysis = &result.analysis;

    println!(
        "{}",
        format!("@{} + @{}: {}", result.user1, result.user2, analysis.title)
            .bold()
            .blue()
    );
    println!(
        "{} Compatibility: {}",
        "•".green(),
        format!("{}%", analysis.compatibility_score).bold()
    );

    println!("{}", "\nCommon themes:".bold());
    for theme in &analysis.common_themes {
        println!("  {} {}", "•".green(), theme);
    }

    println!("{}", "\nDifferences:".bold());
    for difference in &analysis.differences {
        println!("  {} {}", "•".green(), difference);
    }

    println!("{}", "\nBlended post:".bold());
    println!("  {}", analysis.blended_post.italic());

    if !analysis.conversation.is_empty() {
        println!("{}", "\nIf they talked:".bold());
        for line in &analysis.conversation {
            if line.speaker.is_empty() {
                println!("  {}", line.text);
            } else {
                println!("  {}: {}", line.speaker.cyan(), line.text);
            }
        }
    }

    if let Some(question) = &analysis.debate_question {
        println!("{} {}", "\nDebate:".bold(), question);
    }

    if !analysis.blend_persona.is_empty() {
        println!("{} {}", "\nBlend persona:".bold(), analysis.blend_persona);
    }

    let irl = &analysis.irl_potentials;
    println!("{}", "\nIf you met IRL:".bold());
    println!("  Dating: {}%", irl.dating);
    println!("  Friendship: {}%", irl.friendship);
    println!("  Enemy: {}%", irl.enemy);
    println!("  Might just kill: {}%", irl.might_just_kill);

    for (identity, best) in [
        (&result.user1, &result.user1_best_post),
        (&result.user2, &result.user2_best_post),
    ] {
        if let Some(text) = best.as_ref().and_then(|p| p.content()) {
            println!("{} @{}: {}", "\nBest post from".bold(), identity, text);
        }
    }

    if !analysis.summary.is_empty() {
        println!("\n{}", analysis.summary);
    }
}
