use anyhow::Result;
use clap::Parser;
use enroll_flow::utils::{logger, validation::Validate};
use enroll_flow::{
    ApiConfig, CheckoutWizard, CurrentStatus, PaymentStatus, ProfileField, Step, SubmissionClient,
    Track, TrackCatalog,
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

#[derive(Debug, Parser)]
#[command(name = "enroll")]
#[command(about = "Interactive enrollment checkout for program tracks")]
struct Args {
    /// Database service base URL (overrides environment resolution)
    #[arg(long)]
    base_url: Option<String>,

    /// Database service access key (overrides environment resolution)
    #[arg(long)]
    api_key: Option<String>,

    /// Track catalog TOML file; built-in catalog when omitted
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Track key to enroll in; prompts when omitted
    #[arg(long)]
    track: Option<String>,

    /// Tag the application as pending instead of completed
    #[arg(long)]
    pending: bool,

    #[arg(long, help = "Enable verbose output")]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    tracing::info!("Starting enroll CLI");
    if args.verbose {
        tracing::debug!("CLI args: {:?}", args);
    }

    let config = effective_config(&args);
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }

    let catalog = match &args.catalog {
        Some(path) => TrackCatalog::from_file(path)?,
        None => TrackCatalog::default(),
    };

    let track = choose_track(&catalog, args.track.as_deref())?;
    tracing::info!(track = %track.key, "track selected");

    let payment_status = if args.pending {
        PaymentStatus::Pending
    } else {
        PaymentStatus::Completed
    };

    let client = SubmissionClient::new(config);
    let wizard = Arc::new(Mutex::new(
        CheckoutWizard::new(track).with_payment_status(payment_status),
    ));

    // One-second session countdown; tick() ignores every step but Payment.
    let ticker = {
        let wizard = Arc::clone(&wizard);
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            loop {
                interval.tick().await;
                wizard.lock().await.tick();
            }
        })
    };

    loop {
        let step = wizard.lock().await.step();
        match step {
            Step::Profile => run_profile_step(&wizard).await?,
            Step::Review => run_review_step(&wizard).await?,
            Step::Payment => run_payment_step(&wizard, &client).await?,
            Step::Success => {
                println!("\n✅ Application Secured!");
                println!("Your profile has been pushed to the ops team.");
                println!("Check WhatsApp/Email for the welcome kit.");
                break;
            }
        }
    }

    ticker.abort();
    Ok(())
}

/// CLI flags win over environment resolution; each half falls back
/// independently.
fn effective_config(args: &Args) -> ApiConfig {
    let resolved = ApiConfig::resolve();
    if args.base_url.is_none() && args.api_key.is_none() {
        return resolved;
    }
    ApiConfig::new(
        args.base_url.as_deref().unwrap_or(&resolved.endpoint),
        args.api_key.as_deref().unwrap_or(&resolved.api_key),
        &resolved.hostname,
    )
}

fn choose_track(catalog: &TrackCatalog, requested: Option<&str>) -> Result<Track> {
    if let Some(key) = requested {
        return catalog
            .get(key)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("unknown track key: {}", key));
    }

    println!("Available tracks:");
    for (index, track) in catalog.tracks.iter().enumerate() {
        println!(
            "  {}. {} — {} — ₹{}",
            index + 1,
            track.title,
            track.duration,
            track.price
        );
    }
    loop {
        let answer = prompt("Select a track")?;
        if let Some(track) = answer
            .parse::<usize>()
            .ok()
            .and_then(|n| catalog.tracks.get(n.wrapping_sub(1)))
        {
            return Ok(track.clone());
        }
        if let Some(track) = catalog.get(&answer) {
            return Ok(track.clone());
        }
        println!("Unrecognized track, try again.");
    }
}

async fn run_profile_step(wizard: &Arc<Mutex<CheckoutWizard>>) -> Result<()> {
    println!("\n== {} ==", Step::Profile.title());

    let full_name = prompt("Full Name *")?;
    let email = prompt("Email *")?;
    let phone = prompt("Phone *")?;
    let linkedin = prompt("LinkedIn (optional)")?;
    let status = prompt_status()?;
    let work_experience = prompt("Work experience (optional)")?;
    let career_goals = prompt("What are your career goals? *")?;

    let mut wizard = wizard.lock().await;
    wizard.set_field(ProfileField::FullName, &full_name);
    wizard.set_field(ProfileField::Email, &email);
    wizard.set_field(ProfileField::Phone, &phone);
    wizard.set_field(ProfileField::Linkedin, &linkedin);
    wizard.set_field(ProfileField::CurrentStatus, &status);
    wizard.set_field(ProfileField::WorkExperience, &work_experience);
    wizard.set_field(ProfileField::CareerGoals, &career_goals);

    if !wizard.validate_and_advance() {
        if let Some(error) = wizard.error() {
            println!("❌ {}", error);
        }
    }
    Ok(())
}

async fn run_review_step(wizard: &Arc<Mutex<CheckoutWizard>>) -> Result<()> {
    {
        let wizard = wizard.lock().await;
        let track = wizard.track();
        let registration = wizard.registration();
        println!("\n== {} ==", Step::Review.title());
        println!("Track:    {} ({}, ₹{})", track.title, track.duration, track.price);
        println!("Name:     {}", registration.full_name);
        println!("Email:    {}", registration.email);
        println!("Phone:    {}", registration.phone);
        println!("Status:   {}", registration.current_status);
    }

    let answer = prompt("[p]roceed to payment / [m]odify profile")?;
    let mut wizard = wizard.lock().await;
    match answer.to_ascii_lowercase().as_str() {
        "m" | "modify" => wizard.go_to_step(Step::Profile),
        _ => wizard.go_to_step(Step::Payment),
    }
    Ok(())
}

async fn run_payment_step(
    wizard: &Arc<Mutex<CheckoutWizard>>,
    client: &SubmissionClient,
) -> Result<()> {
    {
        let wizard = wizard.lock().await;
        let track = wizard.track();
        println!("\n== {} ==", Step::Payment.title());
        println!("Scan to secure your seat (₹{}):", track.price);
        println!("  {}", wizard.upi_link());
        println!("Session expires in: {}", wizard.time_left_display());
    }

    let answer = prompt("Press Enter after paying to submit, or type 'cancel'")?;
    if answer.eq_ignore_ascii_case("cancel") {
        wizard.lock().await.go_to_step(Step::Review);
        return Ok(());
    }

    println!("Confirming with DB...");
    let mut wizard = wizard.lock().await;
    if !wizard.submit(client).await {
        if let Some(error) = wizard.error() {
            println!("❌ Submission Failed: {}", error);
        }
    }
    Ok(())
}

fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_status() -> Result<String> {
    let options = CurrentStatus::ALL
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>()
        .join("/");
    loop {
        let answer = prompt(&format!("Current Status ({}) *", options))?;
        if answer.is_empty() || CurrentStatus::parse(&answer).is_some() {
            return Ok(answer);
        }
        println!("Unrecognized status, try again.");
    }
}
