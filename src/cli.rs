// src/cli.rs
use crate::config::RankerConfig;
use crate::core::{HttpRanker, LogSink, Notification, NotificationLevel, NotificationSink};
use crate::workflow::{RankingWorkflow, SubmitOutcome};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "resume-ranker")]
#[command(about = "Rank resumes against a job description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML file with `local` / `production` sections
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Base URL of the ranking service
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Use canned results instead of calling the service
    #[arg(long, global = true)]
    pub demo: bool,

    /// Request timeout in seconds (none by default)
    #[arg(long, global = true)]
    pub timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Upload a job description and resumes, print the ranking
    Rank {
        #[arg(long, short = 'j')]
        job_description: PathBuf,
        #[arg(long, short = 'r', num_args = 1.., required = true)]
        resumes: Vec<PathBuf>,
        /// Show every reasoning panel
        #[arg(long)]
        expand: bool,
        /// Print results as JSON, best first
        #[arg(long)]
        json: bool,
    },
    /// Interactive session reading commands from stdin
    Session,
    /// Show the ranking service banner
    Status,
}

impl Cli {
    /// Flags override file and environment settings
    pub fn apply_overrides(&self, mut config: RankerConfig) -> RankerConfig {
        if let Some(url) = &self.api_url {
            config = config.with_api_url(url.clone());
        }
        if self.demo {
            config = config.with_demo(true);
        }
        if let Some(seconds) = self.timeout {
            config = config.with_timeout_seconds(seconds);
        }
        config
    }
}

/// Prints notifications for the terminal user and logs them
pub struct ConsoleSink {
    log: LogSink,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { log: LogSink }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationSink for ConsoleSink {
    fn notify(&self, notification: Notification) {
        match notification.level {
            NotificationLevel::Success => println!("✅ {}", notification.message),
            NotificationLevel::Error => eprintln!("❌ {}", notification.message),
        }
        self.log.notify(notification);
    }
}

pub fn build_workflow(config: &RankerConfig) -> Result<RankingWorkflow> {
    let ranker = crate::build_ranker(config)?;
    Ok(RankingWorkflow::new(ranker, Arc::new(ConsoleSink::new())).with_accept(&config.accept))
}

pub async fn handle_command(command: Command, config: RankerConfig) -> Result<()> {
    match command {
        Command::Rank {
            job_description,
            resumes,
            expand,
            json,
        } => {
            let mut workflow = build_workflow(&config)?;
            run_rank(&mut workflow, job_description, resumes, expand, json).await
        }
        Command::Session => {
            let mut workflow = build_workflow(&config)?;
            run_session(&mut workflow).await
        }
        Command::Status => show_status(&config).await,
    }
}

async fn run_rank(
    workflow: &mut RankingWorkflow,
    job_description: PathBuf,
    resumes: Vec<PathBuf>,
    expand: bool,
    json: bool,
) -> Result<()> {
    let picked = workflow.job_selector().browse(&[job_description]).await?;
    workflow.on_job_description_selected(picked);

    let picked = workflow.resume_selector().browse(&resumes).await?;
    workflow.on_resumes_selected(picked);

    let outcome = workflow.submit().await;

    if expand {
        workflow.results_mut().expand_all();
    }

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&workflow.results().sorted())?
        );
    } else {
        println!("{}", workflow.view());
    }

    match outcome {
        SubmitOutcome::Ranked(count) => {
            info!("Ranked {} resume(s)", count);
            Ok(())
        }
        SubmitOutcome::Rejected(err) => anyhow::bail!("Submission rejected: {}", err),
        SubmitOutcome::Failed(err) => anyhow::bail!("Ranking failed: {}", err),
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    JobDescription(PathBuf),
    Resumes(Vec<PathBuf>),
    Rank,
    Toggle(usize),
    Show,
    Help,
    Quit,
}

const SESSION_HELP: &str = "Commands:
  jd PATH             pick the job description
  resumes PATH...     pick the resumes (replaces the previous set)
  rank                send both to the ranking service
  toggle N            show/hide the reasoning of result N
  show                print the whole page
  help                this text
  quit                leave the session";

pub fn parse_session_line(line: &str) -> std::result::Result<SessionCommand, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty command".to_string());
    };
    let rest: Vec<&str> = words.collect();

    match head {
        "jd" => match rest.as_slice() {
            [path] => Ok(SessionCommand::JobDescription(PathBuf::from(path))),
            _ => Err("usage: jd PATH".to_string()),
        },
        "resumes" => {
            // an empty pick is a cancelled dialog
            Ok(SessionCommand::Resumes(
                rest.iter().map(PathBuf::from).collect(),
            ))
        }
        "rank" => Ok(SessionCommand::Rank),
        "toggle" => match rest.as_slice() {
            [n] => match n.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(SessionCommand::Toggle(n)),
                _ => Err(format!("not a result number: {}", n)),
            },
            _ => Err("usage: toggle N".to_string()),
        },
        "show" => Ok(SessionCommand::Show),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command: {} (try help)", other)),
    }
}

async fn run_session(workflow: &mut RankingWorkflow) -> Result<()> {
    println!("{}\n", workflow.view());
    println!("{}", SESSION_HELP);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let command = match parse_session_line(&line) {
            Ok(command) => command,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        match command {
            SessionCommand::JobDescription(path) => {
                let picked = workflow.job_selector().browse(&[path]).await;
                match picked {
                    Ok(files) => {
                        workflow.on_job_description_selected(files);
                    }
                    Err(e) => {
                        error!("Job description pick failed: {:#}", e);
                        eprintln!("❌ {:#}", e);
                    }
                }
            }
            SessionCommand::Resumes(paths) => {
                let picked = workflow.resume_selector().browse(&paths).await;
                match picked {
                    Ok(files) => {
                        workflow.on_resumes_selected(files);
                    }
                    Err(e) => {
                        error!("Resume pick failed: {:#}", e);
                        eprintln!("❌ {:#}", e);
                    }
                }
            }
            SessionCommand::Rank => {
                if workflow.submit().await.is_success() {
                    print!("{}", workflow.results().render());
                }
            }
            SessionCommand::Toggle(n) => match workflow.results_mut().toggle(n - 1) {
                Some(_) => print!("{}", workflow.results().render()),
                None => eprintln!("no result #{}", n),
            },
            SessionCommand::Show => println!("{}", workflow.view()),
            SessionCommand::Help => println!("{}", SESSION_HELP),
            SessionCommand::Quit => break,
        }
    }

    Ok(())
}

async fn show_status(config: &RankerConfig) -> Result<()> {
    if config.demo {
        println!("Demo mode: canned results, no ranking service is contacted");
        return Ok(());
    }

    let client = HttpRanker::new(&config.api_url, &config.endpoint, config.timeout())?;
    let banner = client.service_info().await?;

    println!("{}", banner.message);
    if let Some(project) = banner.project {
        println!("  {}", project);
    }
    println!("  Ranking endpoint: {}", client.rank_url());
    Ok(())
}
