use tokenguard::application_impl::Pbkdf2PasswordHasher;
use tokenguard::application_port::*;
use tokenguard::logger::*;
use tokenguard::server::*;
use tokenguard::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::new_bootstrap()?;

    // hashing needs no backend
    let command = match cli.command {
        Command::HashPassword { password } => {
            println!("{}", Pbkdf2PasswordHasher.hash_password(&password).await?);
            return Ok(());
        }
        command => command,
    };

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let server = Server::try_new(&project_settings).await?;
    let result = run(&server, command).await;
    server.shutdown().await;

    result.map_err(|e| {
        error!(status = e.status_code(), "{}", e);
        anyhow::anyhow!(e)
    })
}

async fn run(server: &Server, command: Command) -> Result<(), AuthError> {
    match command {
        Command::HashPassword { .. } => unreachable!("handled before startup"),
        Command::Login { value, password } => {
            let tokens = server
                .session_actions
                .login(AuthenticateInput {
                    lookup_value: value,
                    input_password: password,
                })
                .await?;
            print_tokens(&tokens)?;
        }
        Command::Refresh { token } => {
            let tokens = server.session_actions.refresh(Some(&token)).await?;
            print_tokens(&tokens)?;
        }
        Command::Logout { token } => {
            server.session_actions.logout(Some(&token)).await?;
        }
        Command::Whoami { access_token } => {
            let user_id = server
                .session_actions
                .current_user(Some(&access_token))
                .await?;
            println!("{}", user_id);
        }
    }
    Ok(())
}

fn print_tokens(tokens: &AuthTokens) -> Result<(), AuthError> {
    let json = serde_json::to_string_pretty(tokens)
        .map_err(|e| AuthError::InternalError(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
