use asl_server::{AppState, Args, build_pipeline, router};
use clap::Parser;
use std::sync::Arc;

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
    }
    log::info!("Shutting down");
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    match &args.log_dir {
        Some(dir) => asl_base::init_file_logger(dir, args.log_level)?,
        None => asl_base::init_stdout_logger(args.log_level),
    }

    log::info!("Sign Recognition Stream Server");
    log::info!("Mode: {}", args.mode.model_type());
    log::info!("Model: {}", args.model.display());

    let pipeline = Arc::new(build_pipeline(&args)?);
    let app = router(AppState::new(pipeline.clone(), &args));

    let listener = tokio::net::TcpListener::bind(args.bind_addr()).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let timeout = args.stop_timeout();
    tokio::task::spawn_blocking(move || pipeline.stop(timeout)).await??;
    Ok(())
}
