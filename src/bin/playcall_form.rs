use anyhow::Context;
use clap::Parser;
use playcall::client::{PlayForm, PlaycallClient};
use tracing_subscriber::EnvFilter;

/// Ask the playcall service for a recommendation.
#[derive(Parser, Debug)]
#[command(name = "playcall-form", version)]
struct Args {
    #[arg(long, env = "PLAYCALL_API_URL", default_value = "http://127.0.0.1:8787")]
    base_url: String,
    #[arg(long, default_value_t = 1)]
    down: i64,
    #[arg(long)]
    distance: Option<i64>,
    #[arg(long, default_value_t = 50)]
    yard_line: i64,
    #[arg(long, default_value_t = 1)]
    quarter: i64,
    #[arg(long)]
    minutes: Option<i64>,
    #[arg(long)]
    seconds: Option<i64>,
    #[arg(long)]
    our_score: Option<i64>,
    #[arg(long)]
    their_score: Option<i64>,
    /// 0 Fair, 1 Light Rain, 2 Medium/Heavy Rain, 3 Light Snow, 4 Heavy Snow
    #[arg(long, default_value_t = 0)]
    weather: i64,
    /// Injuries, tendencies, anything else worth knowing
    #[arg(long, default_value = "")]
    info: String,
    /// Only check that the service is up
    #[arg(long)]
    health: bool,
}

impl Args {
    fn form(&self) -> PlayForm {
        let mut form = PlayForm::default();
        form.set_down(self.down);
        form.set_yard_line(self.yard_line);
        form.set_quarter(self.quarter);
        form.set_weather(self.weather);
        form.distance = self.distance;
        form.time_minutes = self.minutes;
        form.time_seconds = self.seconds;
        form.our_score = self.our_score;
        form.their_score = self.their_score;
        form.additional_info = self.info.clone();
        form
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();
    let client = PlaycallClient::new(&args.base_url);

    if args.health {
        let ok = client.health().await.context("health check failed")?;
        println!("ok: {}", ok);
        return Ok(());
    }

    let mut form = args.form();
    tracing::info!("submitting {:?} ({})", form.to_game_state(), form.weather_label());
    eprintln!("Thinking...");
    client
        .submit(&mut form)
        .await
        .with_context(|| format!("prediction failed against {}", args.base_url))?;

    if let Some(playcall) = &form.result {
        println!("{}", playcall);
    }
    Ok(())
}
