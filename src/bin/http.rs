#[cfg(feature = "http_api")]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use std::net::SocketAddr;

    use academic_calendar::{CalendarTemplate, http_api, load_config_from_json};
    use chrono::{Datelike, Local};

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let addr: SocketAddr = std::env::var("ACADEMIC_CALENDAR_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let config = match std::env::var("ACADEMIC_CALENDAR_CONFIG") {
        Ok(path) => {
            tracing::info!(%path, "loading initial calendar config");
            load_config_from_json(path)?
        }
        Err(_) => CalendarTemplate::TwoSemesterIndustrial.build(Local::now().year()),
    };

    tracing::info!(%addr, "academic-calendar HTTP API listening");
    http_api::serve(addr, http_api::AppState::new(config)).await?;
    Ok(())
}

#[cfg(not(feature = "http_api"))]
fn main() {
    eprintln!("Rebuild with the `http_api` feature to enable the HTTP server.");
}
