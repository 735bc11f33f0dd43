use vitrin::session::{SessionController, View};

#[tokio::main]
async fn main() -> vitrin::Result<()> {
    tracing_subscriber::fmt::init();

    let controller = SessionController::from_env();
    let state = controller.state();
    if let Some(diagnostic) = &state.init_error {
        println!("yapılandırma hatası: {diagnostic}");
        return Ok(());
    }

    let (Ok(email), Ok(password)) = (
        std::env::var("VITRIN_DEMO_EMAIL"),
        std::env::var("VITRIN_DEMO_PASSWORD"),
    ) else {
        println!("view: {:?} (set VITRIN_DEMO_EMAIL / VITRIN_DEMO_PASSWORD to sign in)", state.view);
        return Ok(());
    };

    controller.begin_auth();
    controller.sign_in(&email, &password).await?;

    let state = controller.state();
    if state.view == View::Dashboard {
        let email = state
            .session
            .as_ref()
            .and_then(|session| session.user.email.as_deref())
            .unwrap_or("-");
        println!("signed in as {email}");
    }

    controller.sign_out().await;
    println!("view after sign-out: {:?}", controller.state().view);
    Ok(())
}
