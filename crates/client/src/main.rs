//! Terminal front end: one query in, ranked countries out.

use anyhow::Context;

use countryguide_client::{
    ClientConfig, HttpRecommendationService, RecommendationSession, SessionState, SubmitOutcome,
    SubmitRejection,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    countryguide_observability::init();

    let config = ClientConfig::from_env().context("invalid client configuration")?;
    tracing::info!(endpoint = %config.recommend_url(), "using recommendation service");

    let service = HttpRecommendationService::new(&config)?;
    let session = RecommendationSession::new(service);

    let query = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    session.update_query(query);

    match session.submit().await {
        SubmitOutcome::Rejected(SubmitRejection::EmptyQuery) => {
            anyhow::bail!("usage: countryguide <describe the country you want to live in>");
        }
        SubmitOutcome::Rejected(SubmitRejection::AlreadyPending) => {
            anyhow::bail!("a request is already in flight");
        }
        SubmitOutcome::Completed(_) => print_state(&session.current_view()),
    }

    Ok(())
}

fn print_state(state: &SessionState) {
    if let Some(message) = state.error_message() {
        eprintln!("Error: {message}");
        return;
    }

    let Some(view) = state.result() else {
        println!("{}", state.status().as_str());
        return;
    };

    println!("Score Profile");
    for point in &view.radar {
        println!("  {:<20} {:>3}/{}", point.label, point.value, point.full_scale);
    }

    println!();
    println!("Criteria Analysis");
    for row in &view.progress {
        println!("  {:<20} {:>8}%", row.label, row.percent_text);
    }

    if let Some(best) = &view.best_match {
        println!();
        println!("Best Match: {} ({})", best.name, best.cluster_label);
    }

    println!();
    println!("Recommended Countries");
    if view.cards.is_empty() {
        println!("  (none)");
    }
    for card in &view.cards {
        println!(
            "  {}. {} [{}] {} - {}",
            card.rank, card.name, card.score_label, card.location, card.cluster_label
        );
        if let Some(capital) = &card.capital {
            println!("     capital: {capital}");
        }
        if !card.description.is_empty() {
            println!("     {}", card.description);
        }
    }
}
