//! Headless tournament runner: every participant is an AI, every match is
//! simulated on a virtual clock.

use anyhow::{bail, Context, Result};
use clap::Parser;

use bracket::{AiDifficulty, Tournament};
use game_core::{sanitize_win_score, MatchSettings, Topology};
use match_host::run_tournament;

#[derive(Parser, Debug)]
#[command(name = "pong-tournament", version, about = "Simulate an all-AI Pong tournament")]
struct Cli {
    /// Number of participants (even, at least 2)
    #[arg(long, short = 'n', default_value_t = 8)]
    players: usize,

    /// Difficulties handed out to participants in turn
    #[arg(long, value_delimiter = ',', default_value = "easy,medium,hard")]
    difficulty: Vec<String>,

    /// Seed for every random choice in the run
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Points needed to win a match (3-10)
    #[arg(long, default_value_t = 5)]
    win_score: i64,

    /// short, normal or long
    #[arg(long, default_value = "normal")]
    paddle_length: String,

    /// small, normal or large
    #[arg(long, default_value = "normal")]
    ball_size: String,

    /// slow, normal or fast
    #[arg(long, default_value = "normal")]
    ball_speed: String,

    /// Two paddles per side
    #[arg(long)]
    four_player: bool,

    /// Print the finished bracket as JSON
    #[arg(long)]
    json: bool,
}

impl Cli {
    fn settings(&self) -> MatchSettings {
        MatchSettings {
            topology: if self.four_player {
                Topology::FourPlayer
            } else {
                Topology::TwoPlayer
            },
            paddle_length: self.paddle_length.parse().unwrap_or_default(),
            ball_size: self.ball_size.parse().unwrap_or_default(),
            ball_speed: self.ball_speed.parse().unwrap_or_default(),
            win_score: sanitize_win_score(self.win_score),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.difficulty.is_empty() {
        bail!("at least one difficulty is required");
    }

    let mut tournament = Tournament::new("pong-tournament", cli.players);
    for i in 0..cli.players {
        let difficulty: AiDifficulty =
            cli.difficulty[i % cli.difficulty.len()].parse().unwrap_or_default();
        tournament
            .add_ai(format!("{}-{}", difficulty.as_str(), i + 1), difficulty)
            .context("registering participants")?;
    }

    let champion = run_tournament(&mut tournament, cli.settings(), cli.seed)
        .context("running tournament")?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&tournament)?);
    } else {
        for m in tournament.matches() {
            let alias = |id| tournament.participant(id).map(|p| p.alias.as_str()).unwrap_or("?");
            let score = m.score.map(|s| format!("{}-{}", s.a, s.b)).unwrap_or_default();
            println!("round {} {}: {} vs {} {}", m.round, m.id, alias(m.a), alias(m.b), score);
        }
        if let Some(winner) = tournament.participant(champion) {
            println!("winner: {} ({} wins)", winner.alias, winner.wins);
        }
    }
    Ok(())
}
