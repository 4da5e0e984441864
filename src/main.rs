use std::sync::Arc;

use secrecy::SecretString;
use tokio::io::{AsyncBufReadExt, BufReader};

use moto_onboard::api::ApiClient;
use moto_onboard::auth::{AuthContext, AuthPhase, decide};
use moto_onboard::config::ClientConfig;
use moto_onboard::session::{FileStore, SessionVault};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = ClientConfig::from_env()?;

    eprintln!("🏍️  moto-onboard v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   API: {}", config.base_url);
    eprintln!("   Data dir: {}", config.data_dir.display());
    eprintln!("   Commands: login <email> <password> | whoami | guard | logout | quit\n");

    let store = Arc::new(FileStore::new(&config.data_dir));
    let vault = Arc::new(SessionVault::new(store));
    let api = Arc::new(ApiClient::new(&config, vault)?);
    let auth = Arc::new(AuthContext::new(Arc::clone(&api)));

    auth.hydrate().await;
    let snapshot = auth.snapshot().await;
    match snapshot.phase {
        AuthPhase::Authenticated => {
            let email = snapshot.user.map(|u| u.email).unwrap_or_default();
            eprintln!("Session restored for {email}");
        }
        _ => eprintln!("Not logged in"),
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let parts: Vec<&str> = line.split_whitespace().collect();
        match parts.as_slice() {
            ["login", email, password] => {
                let password = SecretString::from(password.to_string());
                match auth.login(email, &password).await {
                    Ok(()) => eprintln!("Login realizado com sucesso!"),
                    Err(e) => eprintln!("Error: {e}"),
                }
            }
            ["whoami"] => match auth.refresh_profile().await {
                Ok(profile) => {
                    eprintln!(
                        "{} <{}> phone={} cpf={}",
                        profile.name, profile.email, profile.phone, profile.cpf
                    );
                }
                Err(e) if e.is_unauthorized() => {
                    eprintln!("Session expired, please log in again");
                }
                Err(e) => eprintln!("Error: {e}"),
            },
            ["guard"] => {
                let decision = decide(auth.snapshot().await.phase);
                eprintln!("{decision:?}");
            }
            ["logout"] => {
                auth.logout().await;
                eprintln!("Logged out");
            }
            ["quit"] | ["exit"] => break,
            [] => {}
            _ => eprintln!("Unknown command"),
        }
    }

    Ok(())
}
