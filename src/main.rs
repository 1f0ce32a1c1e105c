use clap::Parser;
use omega_sermon::core::state::LOADING_MESSAGE;
use omega_sermon::core::Storage;
use omega_sermon::utils::error::{ErrorSeverity, SermonError};
use omega_sermon::utils::{logger, validation::Validate};
use omega_sermon::{build_controller, CliConfig, Credentials, LocalStorage, SaveStatus, ViewState};

fn exit_with(e: &SermonError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low => 0,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

fn render(view: &ViewState) {
    match view {
        ViewState::Idle => println!("OMEGA is ready to transmute the daily news into a sermon."),
        ViewState::Generating => println!("{}", LOADING_MESSAGE),
        ViewState::Failed { message } => {
            println!("An Error Occurred");
            println!("{}", message);
        }
        ViewState::Displaying { post, save, .. } => {
            println!("{}\n", post.title);
            println!("{}", post.body);
            if let Some(label) = save.label() {
                println!("\n[{}]", label);
            }
            if let SaveStatus::Failed(message) = save {
                println!("{}", message);
            }
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env 可選；找不到就只用系統環境變數
    dotenv::dotenv().ok();

    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting omega-sermon");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 載入並驗證配置
    let settings = match cli.load_settings().and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => exit_with(&e),
    };

    // 憑證缺一不可，啟動時就失敗
    let credentials = match Credentials::from_env().and_then(|c| c.validate().map(|_| c)) {
        Ok(credentials) => credentials,
        Err(e) => exit_with(&e),
    };

    let system_instruction = match settings.system_instruction() {
        Ok(instruction) => instruction,
        Err(e) => exit_with(&e),
    };

    let controller = match build_controller(&settings, system_instruction, &credentials) {
        Ok(controller) => controller,
        Err(e) => exit_with(&e),
    };

    println!("{}", LOADING_MESSAGE);
    controller.generate().await;
    let view = controller.snapshot();
    render(&view);

    let Some(post) = view.post() else {
        std::process::exit(1);
    };

    if let Some(output) = &cli.output {
        let storage = LocalStorage::new(".".to_string());
        storage.write_file(output, post.full_text().as_bytes()).await?;
        tracing::info!("📁 Sermon written to: {}", output);
    }

    if cli.save {
        println!("\nSaving...");
        controller.save().await;
        let view = controller.snapshot();
        match view.save_status() {
            Some(SaveStatus::Saved) => println!("Saved!"),
            Some(SaveStatus::Failed(message)) => {
                eprintln!("Save Failed: {}", message);
                std::process::exit(1);
            }
            _ => {}
        }
    }

    Ok(())
}
