use std::error::Error;

use api_types::auth::RegisterUser;
use clap::{Args, Parser, Subcommand};
use client::{Financore, UploadFile};

mod settings;
mod terminal;

type BoxError = Box<dyn Error + Send + Sync>;

#[derive(Parser, Debug)]
#[command(name = "financore")]
#[command(about = "Terminal client for the Financore budget tracker")]
struct Cli {
    #[command(flatten)]
    overrides: settings::Overrides,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an account (prompts for the password).
    Register(RegisterArgs),
    /// Log in and store the bearer token.
    Login(LoginArgs),
    /// Drop the stored token.
    Logout,
    /// Show who the stored token belongs to.
    Whoami,
    /// Password recovery, one step at a time.
    Recover(Recover),
    /// Fetch everything and print the money overview.
    Dashboard,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    email: String,
    #[arg(long)]
    phone: String,
    /// Optional profile picture to upload.
    #[arg(long)]
    picture: Option<String>,
}

#[derive(Args, Debug)]
struct LoginArgs {
    #[arg(long)]
    email: String,
    /// Keep the credentials for prefill on the next login.
    #[arg(long)]
    remember: bool,
}

#[derive(Args, Debug)]
struct Recover {
    #[command(subcommand)]
    command: RecoverCommand,
}

#[derive(Subcommand, Debug)]
enum RecoverCommand {
    /// Ask the server to email a recovery code.
    Send(RecoverSendArgs),
    /// Check a received code without consuming it.
    Validate(RecoverCodeArgs),
    /// Set a new password with a validated code (prompts for it).
    Reset(RecoverCodeArgs),
}

#[derive(Args, Debug)]
struct RecoverSendArgs {
    #[arg(long)]
    email: String,
}

#[derive(Args, Debug)]
struct RecoverCodeArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    code: String,
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let cli = Cli::parse();
    let settings = settings::load(&cli.overrides)?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "financore={level},client={level}",
            level = settings.level
        ))
        .init();

    let mut builder = Financore::builder().base_url(&settings.base_url);
    if let Some(path) = &settings.session_path {
        builder = builder.session_path(path);
    }
    let financore = builder.build()?;
    tracing::debug!(base_url = %settings.base_url, "talking to backend");

    match cli.command {
        Command::Register(args) => register(&financore, args).await?,
        Command::Login(args) => login(&financore, args).await?,
        Command::Logout => {
            financore.auth().logout().await?;
            println!("logged out");
        }
        Command::Whoami => whoami(&financore).await?,
        Command::Recover(Recover { command }) => match command {
            RecoverCommand::Send(args) => {
                financore.auth().forgot_password(&args.email).await?;
                println!("recovery code sent to {}", args.email);
            }
            RecoverCommand::Validate(args) => {
                financore
                    .auth()
                    .validate_recovery_code(&args.email, &args.code)
                    .await?;
                println!("code accepted");
            }
            RecoverCommand::Reset(args) => {
                let password = terminal::read_new_password()?;
                financore
                    .auth()
                    .reset_password(&args.email, &args.code, &password)
                    .await?;
                println!("password updated");
            }
        },
        Command::Dashboard => dashboard(&financore).await?,
    }

    Ok(())
}

async fn register(financore: &Financore, args: RegisterArgs) -> Result<(), BoxError> {
    let password = terminal::read_new_password()?;
    let picture = match &args.picture {
        Some(path) => Some(UploadFile::from_path(path).await?),
        None => None,
    };

    financore
        .auth()
        .register(
            RegisterUser {
                name: args.name,
                email: args.email.clone(),
                password,
                phone: args.phone,
            },
            picture,
        )
        .await?;
    println!("registered {}", args.email);
    Ok(())
}

async fn login(financore: &Financore, args: LoginArgs) -> Result<(), BoxError> {
    let password = terminal::read_password("Password: ")?;
    let token = financore
        .auth()
        .login(&args.email, &password, args.remember)
        .await?;

    match client::decode_claims(&token) {
        Ok(claims) => println!("logged in as {}", claims.email.unwrap_or(claims.id)),
        Err(_) => println!("logged in"),
    }
    Ok(())
}

async fn whoami(financore: &Financore) -> Result<(), BoxError> {
    let Some(token) = financore.session().token().await else {
        eprintln!("not logged in");
        std::process::exit(1);
    };

    let claims = client::decode_claims(&token)?;
    println!("id: {}", claims.id);
    if let Some(email) = claims.email {
        println!("email: {email}");
    }
    if let Some(exp) = claims.exp {
        match chrono::DateTime::from_timestamp(exp, 0) {
            Some(when) => println!("token expires: {when}"),
            None => println!("token expires: {exp}"),
        }
    }
    Ok(())
}

async fn dashboard(financore: &Financore) -> Result<(), BoxError> {
    let Some(token) = financore.session().token().await else {
        eprintln!("not logged in");
        std::process::exit(1);
    };
    let claims = client::decode_claims(&token)?;

    let user = financore.user().fetch(&claims.id).await?;
    let earnings = financore.earnings().list().await?;
    let budgets = financore.budgets().list().await?;
    let transactions = financore.transactions().list().await?;

    println!("{}'s money", user.name);
    let totals = stats::totals(&earnings);
    println!(
        "earned {} / budgeted {} / free {}",
        totals.general,
        totals.budgeted,
        totals.free()
    );
    for earning in &earnings {
        println!(
            "  {} {} (free {})",
            earning.name,
            earning.general_amount,
            stats::free_salary(earning)
        );
    }

    if !budgets.is_empty() {
        println!();
        println!("budgets");
        let amounts: Vec<f64> = budgets.iter().map(|budget| budget.amount).collect();
        let shares = stats::percentage_share(&amounts);
        for (budget, share) in budgets.iter().zip(shares) {
            let flow = stats::budget_flow(&transactions, &budget.id);
            println!(
                "  {} {:.2} ({share:.0}% of allocations) in {} out {}",
                budget.name,
                budget.amount,
                flow.income,
                flow.expense_magnitude()
            );
        }
    }

    Ok(())
}
