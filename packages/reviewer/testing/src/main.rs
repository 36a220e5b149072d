use clap::{Parser, Subcommand};
use pr_reviewer_testing::{ReviewerApiClient, TeamBuilder};

#[derive(Parser)]
#[command(name = "pr-reviewer-test")]
#[command(about = "Send requests to a running PR reviewer server", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Create a team with its members")]
    AddTeam {
        #[arg(long)]
        name: String,

        /// Member as `user_id:username`, or `user_id:username:inactive`
        #[arg(long = "member")]
        members: Vec<String>,
    },
    #[command(about = "Show a team")]
    GetTeam {
        #[arg(long)]
        name: String,
    },
    #[command(about = "Activate or deactivate a user")]
    SetActive {
        #[arg(long)]
        user_id: String,

        #[arg(long, action = clap::ArgAction::Set)]
        active: bool,
    },
    #[command(about = "List pull requests a user reviews")]
    GetReview {
        #[arg(long)]
        user_id: String,
    },
    #[command(about = "Open a pull request")]
    CreatePr {
        #[arg(long)]
        id: String,

        #[arg(long)]
        name: String,

        #[arg(long)]
        author: String,
    },
    #[command(about = "Merge a pull request")]
    Merge {
        #[arg(long)]
        id: String,
    },
    #[command(about = "Replace a reviewer on a pull request")]
    Reassign {
        #[arg(long)]
        id: String,

        #[arg(long)]
        old_user_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let client = ReviewerApiClient::new(&cli.url);

    let output = match cli.command {
        Command::AddTeam { name, members } => {
            let mut builder = TeamBuilder::new(&name);
            for member in &members {
                builder = parse_member(builder, member)?;
            }
            serde_json::to_string_pretty(&client.add_team(&builder.build()).await?)?
        }
        Command::GetTeam { name } => serde_json::to_string_pretty(&client.get_team(&name).await?)?,
        Command::SetActive { user_id, active } => {
            serde_json::to_string_pretty(&client.set_is_active(&user_id, active).await?)?
        }
        Command::GetReview { user_id } => {
            serde_json::to_string_pretty(&client.get_review(&user_id).await?)?
        }
        Command::CreatePr { id, name, author } => {
            serde_json::to_string_pretty(&client.create_pr(&id, &name, &author).await?)?
        }
        Command::Merge { id } => serde_json::to_string_pretty(&client.merge_pr(&id).await?)?,
        Command::Reassign { id, old_user_id } => {
            serde_json::to_string_pretty(&client.reassign(&id, &old_user_id).await?)?
        }
    };

    println!("{output}");

    Ok(())
}

fn parse_member(builder: TeamBuilder, member: &str) -> anyhow::Result<TeamBuilder> {
    match member.split(':').collect::<Vec<_>>().as_slice() {
        [user_id, username] => Ok(builder.member(user_id, username)),
        [user_id, username, "inactive"] => Ok(builder.inactive_member(user_id, username)),
        [user_id, username, "active"] => Ok(builder.member(user_id, username)),
        _ => anyhow::bail!(
            "Invalid member: {member}. Expected user_id:username or user_id:username:inactive"
        ),
    }
}
